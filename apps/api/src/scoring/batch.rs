//! Batch recalculation: re-runs the scorer across every application of a
//! job, or across many jobs, fire-and-continue. Each application is scored
//! and persisted independently; one failure never aborts the batch and
//! never touches the failing application's previously stored score.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::scoring::service::ApplicationScorer;

const DEFAULT_BATCH_SIZE: usize = 25;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BatchOptions {
    pub algorithm_version: Option<String>,
    /// Chunk size bounding how many applications are walked between
    /// progress log lines. Scoring stays sequential within a chunk.
    pub batch_size: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchItemError {
    pub id: Uuid,
    pub error: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BatchReport {
    pub processed: Vec<Uuid>,
    pub errors: Vec<BatchItemError>,
}

/// Scores every listed application, collecting successes and per-item
/// failures.
pub async fn recalculate_applications(
    scorer: &dyn ApplicationScorer,
    application_ids: &[Uuid],
    options: &BatchOptions,
) -> BatchReport {
    let chunk_size = options.batch_size.filter(|n| *n > 0).unwrap_or(DEFAULT_BATCH_SIZE);
    let version = options.algorithm_version.as_deref();

    let mut report = BatchReport::default();

    for chunk in application_ids.chunks(chunk_size) {
        for &application_id in chunk {
            match scorer.recalculate(application_id, version).await {
                Ok(summary) => {
                    report.processed.push(summary.application_id);
                }
                Err(e) => {
                    warn!(application_id = %application_id, error = %e, "batch scoring failed for application");
                    report.errors.push(BatchItemError {
                        id: application_id,
                        error: e.to_string(),
                    });
                }
            }
        }
        info!(
            processed = report.processed.len(),
            errors = report.errors.len(),
            total = application_ids.len(),
            "batch chunk complete"
        );
    }

    report
}

/// Platform-wide variant: a per-job report table keyed by job id. Job order
/// follows the input; the map is keyed for stable serialization.
pub type PlatformReport = BTreeMap<Uuid, BatchReport>;
