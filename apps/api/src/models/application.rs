use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

/// A candidate's application to a job. The three `match_*` fields are
/// created empty at application time and overwritten on every scoring run;
/// no history is kept.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ApplicationRow {
    pub id: Uuid,
    pub job_id: Uuid,
    pub developer_id: Uuid,
    pub cv_id: Option<Uuid>,
    pub match_score: Option<i32>,
    pub match_reason: Option<String>,
    pub match_details: Option<Value>,
    pub status: String,
    pub created_at: DateTime<Utc>,
}
