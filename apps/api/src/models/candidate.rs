use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// One profile per candidate.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DeveloperProfileRow {
    pub developer_id: Uuid,
    pub bio: Option<String>,
    pub title: Option<String>,
}

/// An uploaded CV. `raw_text` is populated by the external extraction
/// pipeline once `status` reaches "processed".
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CvRow {
    pub id: Uuid,
    pub developer_id: Uuid,
    pub raw_text: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

/// Structured fields parsed out of a CV by the (external) parsing pipeline.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CvProfileRow {
    pub cv_id: Uuid,
    pub summary: Option<String>,
    pub experience_years: Option<f64>,
    pub roles: Vec<String>,
    pub seniority: Option<String>,
    pub skills: Vec<String>,
}

/// A work-history entry on the candidate's profile.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ExperienceRow {
    pub id: Uuid,
    pub developer_id: Uuid,
    pub position: String,
    pub company_name: String,
    pub description: Option<String>,
}

/// An education entry on the candidate's profile.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct EducationRow {
    pub id: Uuid,
    pub developer_id: Uuid,
    pub degree: String,
    pub field_of_study: String,
    pub school_name: String,
}
