//! Axum route handlers for the Scoring API.

use std::time::Instant;

use axum::{
    extract::{Path, State},
    http::HeaderMap,
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::{require_batch_secret, Caller};
use crate::errors::AppError;
use crate::scoring::batch::{recalculate_applications, BatchItemError, BatchOptions, PlatformReport};
use crate::scoring::service::ScoreSummary;
use crate::state::AppState;
use crate::store;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ComputeScoreRequest {
    pub application_id: Uuid,
}

#[derive(Debug, Deserialize)]
pub struct AtsScoreRequest {
    pub application_id: Uuid,
    #[serde(default)]
    pub force_recalculate: bool,
    pub algorithm_version: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RecalculateJobRequest {
    pub algorithm_version: Option<String>,
    pub batch_size: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct RecalculateJobResponse {
    pub processed_count: usize,
    pub error_count: usize,
    pub errors: Vec<BatchItemError>,
    pub duration_ms: u64,
}

#[derive(Debug, Default, Deserialize)]
pub struct RecalculateAllRequest {
    /// Defaults to every job on the platform when absent.
    pub job_ids: Option<Vec<Uuid>>,
}

#[derive(Debug, Serialize)]
pub struct RecalculateAllResponse {
    pub results: PlatformReport,
    pub duration_ms: u64,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/scores/compute
///
/// Keyword-overlap scoring for one application. Persists and returns
/// `match_score`, `match_reason`, and `match_details`.
pub async fn handle_compute_score(
    State(state): State<AppState>,
    Json(request): Json<ComputeScoreRequest>,
) -> Result<Json<ScoreSummary>, AppError> {
    if request.application_id.is_nil() {
        return Err(AppError::Validation(
            "application_id is required".to_string(),
        ));
    }

    let summary = state.scoring.score_application(request.application_id).await?;
    Ok(Json(summary))
}

/// POST /api/v1/scores/ats
///
/// ATS-variant scoring with the itemized breakdown. Caller must be the
/// owning candidate or a company/HR/admin user of the job's company.
pub async fn handle_compute_ats_score(
    State(state): State<AppState>,
    caller: Caller,
    Json(request): Json<AtsScoreRequest>,
) -> Result<Json<ScoreSummary>, AppError> {
    if request.application_id.is_nil() {
        return Err(AppError::Validation(
            "application_id is required".to_string(),
        ));
    }

    let application = state
        .scoring
        .fetch_application(request.application_id)
        .await?;
    let job = state.scoring.fetch_job(application.job_id).await?;

    if !caller.may_score(application.developer_id, job.company_id) {
        return Err(AppError::Forbidden);
    }

    let summary = state
        .scoring
        .score_application_ats(
            request.application_id,
            request.force_recalculate,
            request.algorithm_version.as_deref(),
        )
        .await?;
    Ok(Json(summary))
}

/// POST /api/v1/scores/jobs/:job_id/recalculate
///
/// Re-scores every application of one job. Per-item failures are captured
/// into `errors`; the batch never aborts.
pub async fn handle_recalculate_job(
    State(state): State<AppState>,
    Path(job_id): Path<Uuid>,
    Json(request): Json<RecalculateJobRequest>,
) -> Result<Json<RecalculateJobResponse>, AppError> {
    // 404 for an unknown job, before walking applications
    state.scoring.fetch_job(job_id).await?;

    let started = Instant::now();
    let application_ids = store::list_application_ids_for_job(state.scoring.pool(), job_id).await?;

    let options = BatchOptions {
        algorithm_version: request.algorithm_version,
        batch_size: request.batch_size,
    };
    let report = recalculate_applications(state.scoring.as_ref(), &application_ids, &options).await;

    Ok(Json(RecalculateJobResponse {
        processed_count: report.processed.len(),
        error_count: report.errors.len(),
        errors: report.errors,
        duration_ms: started.elapsed().as_millis() as u64,
    }))
}

/// POST /api/v1/scores/recalculate-all
///
/// Platform-wide recalculation, gated by the cron/admin bearer secret.
/// Walks every job (or the supplied subset) and aggregates a per-job
/// results table.
pub async fn handle_recalculate_all(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<RecalculateAllRequest>,
) -> Result<Json<RecalculateAllResponse>, AppError> {
    require_batch_secret(&headers, &state.config)?;

    let started = Instant::now();
    let job_ids = match request.job_ids {
        Some(ids) => ids,
        None => store::list_job_ids(state.scoring.pool()).await?,
    };

    let mut results = PlatformReport::new();
    for job_id in job_ids {
        let application_ids =
            store::list_application_ids_for_job(state.scoring.pool(), job_id).await?;
        let report = recalculate_applications(
            state.scoring.as_ref(),
            &application_ids,
            &BatchOptions::default(),
        )
        .await;
        results.insert(job_id, report);
    }

    Ok(Json(RecalculateAllResponse {
        results,
        duration_ms: started.elapsed().as_millis() as u64,
    }))
}
