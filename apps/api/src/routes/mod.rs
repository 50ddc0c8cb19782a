pub mod health;

use axum::{routing::get, routing::post, Router};

use crate::scoring::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Scoring API
        .route("/api/v1/scores/compute", post(handlers::handle_compute_score))
        .route("/api/v1/scores/ats", post(handlers::handle_compute_ats_score))
        .route(
            "/api/v1/scores/jobs/:job_id/recalculate",
            post(handlers::handle_recalculate_job),
        )
        .route(
            "/api/v1/scores/recalculate-all",
            post(handlers::handle_recalculate_all),
        )
        .with_state(state)
}
