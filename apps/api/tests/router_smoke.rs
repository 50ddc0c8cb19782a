use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use sqlx::postgres::PgPoolOptions;
use tower::ServiceExt;

use match_api::config::Config;
use match_api::routes::build_router;
use match_api::scoring::engine::KeywordMatchScorer;
use match_api::scoring::service::ScoringService;
use match_api::state::AppState;

/// State with a lazy pool: no connection is made until a query runs, so
/// routes that reject before touching the database are testable offline.
fn test_state() -> AppState {
    let pool = PgPoolOptions::new()
        .connect_lazy("postgres://localhost/match_api_test")
        .expect("lazy pool");
    let scoring = Arc::new(ScoringService::new(pool, Arc::new(KeywordMatchScorer)));
    AppState {
        config: Config {
            database_url: "postgres://localhost/match_api_test".to_string(),
            cron_secret: "test-cron-secret".to_string(),
            admin_secret: None,
            port: 8080,
            rust_log: "info".to_string(),
        },
        scoring,
    }
}

#[tokio::test]
async fn health_is_ok() {
    let app = build_router(test_state());

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn ats_endpoint_requires_caller_identity() {
    let app = build_router(test_state());

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/scores/ats")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(
                    r#"{"application_id":"00000000-0000-0000-0000-000000000001"}"#,
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn recalculate_all_requires_bearer_secret() {
    let app = build_router(test_state());

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/scores/recalculate-all")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from("{}"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn recalculate_all_rejects_wrong_secret() {
    let app = build_router(test_state());

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/scores/recalculate-all")
                .header(header::CONTENT_TYPE, "application/json")
                .header(header::AUTHORIZATION, "Bearer wrong-secret")
                .body(Body::from("{}"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
