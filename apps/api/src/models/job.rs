use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A published job posting. The scorer only reads the text fields and the
/// declared experience level; all edit flows live elsewhere.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct JobPostingRow {
    pub id: Uuid,
    pub company_id: Uuid,
    pub title: String,
    pub description: String,
    pub requirements: String,
    pub responsibilities: Option<String>,
    /// One of "junior" | "mid" | "senior" | "lead"; anything else is treated
    /// as unknown and skips the experience-fit adjustment.
    pub experience_level: Option<String>,
    pub created_at: DateTime<Utc>,
}
