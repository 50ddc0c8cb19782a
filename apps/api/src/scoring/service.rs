//! Scoring orchestration: resolves an application's job and candidate rows,
//! runs the scorer, and persists the three `match_*` fields back onto the
//! application. A failed run never writes a partial result, so previously
//! stored scores survive failed refresh attempts.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::application::ApplicationRow;
use crate::models::job::JobPostingRow;
use crate::scoring::aggregate::{candidate_text, job_text, CandidateBundle};
use crate::scoring::ats::{
    ats_reason, breakdown_details, compute_ats_breakdown, DEFAULT_ALGORITHM_VERSION,
};
use crate::scoring::engine::{MatchDetails, MatchScorer, ScoreInput};
use crate::store;

/// Persisted result of one scoring run, echoed back to the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreSummary {
    pub application_id: Uuid,
    pub match_score: u32,
    pub match_reason: String,
    pub match_details: MatchDetails,
}

pub struct ScoringService {
    pool: PgPool,
    scorer: Arc<dyn MatchScorer>,
}

impl ScoringService {
    pub fn new(pool: PgPool, scorer: Arc<dyn MatchScorer>) -> Self {
        Self { pool, scorer }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Resolves the application row or fails with 404 semantics.
    pub async fn fetch_application(&self, id: Uuid) -> Result<ApplicationRow, AppError> {
        store::fetch_application(&self.pool, id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Application {id} not found")))
    }

    /// Resolves the job row for an application or fails with 404 semantics.
    pub async fn fetch_job(&self, job_id: Uuid) -> Result<JobPostingRow, AppError> {
        store::fetch_job(&self.pool, job_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Job {job_id} not found")))
    }

    /// Gathers the candidate-side rows for one application. Missing CV or
    /// parsed-profile rows are treated as absent, not as errors.
    async fn load_bundle(&self, application: &ApplicationRow) -> Result<CandidateBundle, AppError> {
        let profile = store::fetch_profile(&self.pool, application.developer_id).await?;

        let (cv, cv_profile) = match application.cv_id {
            Some(cv_id) => {
                let cv = store::fetch_cv(&self.pool, cv_id).await?;
                let cv_profile = store::fetch_cv_profile(&self.pool, cv_id).await?;
                (cv, cv_profile)
            }
            None => (None, None),
        };

        let experiences = store::list_experiences(&self.pool, application.developer_id).await?;
        let educations = store::list_educations(&self.pool, application.developer_id).await?;

        Ok(CandidateBundle {
            profile,
            cv,
            cv_profile,
            experiences,
            educations,
        })
    }

    /// Keyword-variant scoring run for one application; persists and
    /// returns the result.
    pub async fn score_application(&self, application_id: Uuid) -> Result<ScoreSummary, AppError> {
        let application = self.fetch_application(application_id).await?;
        let job = self.fetch_job(application.job_id).await?;
        let bundle = self.load_bundle(&application).await?;

        let input = ScoreInput {
            job_text: job_text(&job),
            candidate_text: candidate_text(&bundle),
            job_level: job.experience_level.clone(),
            candidate_seniority: bundle.cv_profile.as_ref().and_then(|p| p.seniority.clone()),
            candidate_years: bundle.cv_profile.as_ref().and_then(|p| p.experience_years),
        };

        let outcome = self.scorer.score(&input).await?;

        self.persist(application_id, outcome.score, &outcome.reason, &outcome.details)
            .await?;

        info!(
            application_id = %application_id,
            score = outcome.score,
            "match score computed"
        );

        Ok(ScoreSummary {
            application_id,
            match_score: outcome.score,
            match_reason: outcome.reason,
            match_details: outcome.details,
        })
    }

    /// ATS-variant scoring run. With `force_recalculate` unset and a score
    /// already stored, returns the stored values without recomputing.
    pub async fn score_application_ats(
        &self,
        application_id: Uuid,
        force_recalculate: bool,
        algorithm_version: Option<&str>,
    ) -> Result<ScoreSummary, AppError> {
        let application = self.fetch_application(application_id).await?;

        if !force_recalculate {
            if let Some(stored) = stored_summary(&application) {
                return Ok(stored);
            }
        }

        let job = self.fetch_job(application.job_id).await?;
        let bundle = self.load_bundle(&application).await?;

        let version = algorithm_version.unwrap_or(DEFAULT_ALGORITHM_VERSION);
        let breakdown = compute_ats_breakdown(&job, &bundle, version);
        let details = breakdown_details(&breakdown);
        let reason = ats_reason(breakdown.final_score);

        self.persist(application_id, breakdown.final_score, &reason, &details)
            .await?;

        info!(
            application_id = %application_id,
            score = breakdown.final_score,
            algorithm_version = version,
            "ats score computed"
        );

        Ok(ScoreSummary {
            application_id,
            match_score: breakdown.final_score,
            match_reason: reason,
            match_details: details,
        })
    }

    async fn persist(
        &self,
        application_id: Uuid,
        score: u32,
        reason: &str,
        details: &MatchDetails,
    ) -> Result<(), AppError> {
        let details_value = serde_json::to_value(details)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("serializing match details: {e}")))?;
        store::update_application_score(
            &self.pool,
            application_id,
            score.min(100) as i32,
            reason,
            &details_value,
        )
        .await?;
        Ok(())
    }
}

/// Reconstructs a summary from the fields already stored on an application,
/// if a prior run completed.
fn stored_summary(application: &ApplicationRow) -> Option<ScoreSummary> {
    let score = application.match_score?;
    let details = application
        .match_details
        .clone()
        .and_then(|v| serde_json::from_value(v).ok())
        .unwrap_or_default();
    Some(ScoreSummary {
        application_id: application.id,
        match_score: score.clamp(0, 100) as u32,
        match_reason: application.match_reason.clone().unwrap_or_default(),
        match_details: details,
    })
}

/// Per-application scoring seam used by the batch recalculator, so batches
/// are testable with a fake scorer.
#[async_trait]
pub trait ApplicationScorer: Send + Sync {
    async fn recalculate(
        &self,
        application_id: Uuid,
        algorithm_version: Option<&str>,
    ) -> Result<ScoreSummary, AppError>;
}

#[async_trait]
impl ApplicationScorer for ScoringService {
    async fn recalculate(
        &self,
        application_id: Uuid,
        algorithm_version: Option<&str>,
    ) -> Result<ScoreSummary, AppError> {
        self.score_application_ats(application_id, true, algorithm_version)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use serde_json::json;

    fn make_application(
        match_score: Option<i32>,
        match_reason: Option<&str>,
        match_details: Option<serde_json::Value>,
    ) -> ApplicationRow {
        ApplicationRow {
            id: Uuid::new_v4(),
            job_id: Uuid::new_v4(),
            developer_id: Uuid::new_v4(),
            cv_id: None,
            match_score,
            match_reason: match_reason.map(|s| s.to_string()),
            match_details,
            status: "pending".to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_stored_summary_absent_when_never_scored() {
        let application = make_application(None, None, None);
        assert!(stored_summary(&application).is_none());
    }

    #[test]
    fn test_stored_summary_round_trips_fields() {
        let details = json!({
            "matching_skills": ["rust"],
            "missing_skills": [],
            "missing_optional": [],
            "positive_factors": [],
            "negative_factors": []
        });
        let application = make_application(Some(72), Some("Suitable match"), Some(details));
        let summary = stored_summary(&application).unwrap();
        assert_eq!(summary.match_score, 72);
        assert_eq!(summary.match_reason, "Suitable match");
        assert_eq!(summary.match_details.matching_skills, vec!["rust"]);
    }

    #[test]
    fn test_stored_summary_clamps_out_of_range_score() {
        let application = make_application(Some(140), None, None);
        let summary = stored_summary(&application).unwrap();
        assert_eq!(summary.match_score, 100);
    }

    #[test]
    fn test_stored_summary_tolerates_malformed_details() {
        let application = make_application(Some(10), Some("ok"), Some(json!("not an object")));
        let summary = stored_summary(&application).unwrap();
        assert_eq!(summary.match_details, MatchDetails::default());
    }
}
