//! Row-level data access for the scoring engine. Plain sqlx queries with
//! `fetch_optional` not-found semantics; callers decide whether a missing
//! row is an error.

use serde_json::Value;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::application::ApplicationRow;
use crate::models::candidate::{
    CvProfileRow, CvRow, DeveloperProfileRow, EducationRow, ExperienceRow,
};
use crate::models::job::JobPostingRow;

pub async fn fetch_application(
    pool: &PgPool,
    id: Uuid,
) -> Result<Option<ApplicationRow>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM applications WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn fetch_job(pool: &PgPool, id: Uuid) -> Result<Option<JobPostingRow>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM job_postings WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn fetch_profile(
    pool: &PgPool,
    developer_id: Uuid,
) -> Result<Option<DeveloperProfileRow>, sqlx::Error> {
    sqlx::query_as("SELECT developer_id, bio, title FROM developer_profiles WHERE developer_id = $1")
        .bind(developer_id)
        .fetch_optional(pool)
        .await
}

pub async fn fetch_cv(pool: &PgPool, id: Uuid) -> Result<Option<CvRow>, sqlx::Error> {
    sqlx::query_as("SELECT id, developer_id, raw_text, status, created_at FROM cvs WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn fetch_cv_profile(
    pool: &PgPool,
    cv_id: Uuid,
) -> Result<Option<CvProfileRow>, sqlx::Error> {
    sqlx::query_as(
        "SELECT cv_id, summary, experience_years, roles, seniority, skills \
         FROM cv_profiles WHERE cv_id = $1",
    )
    .bind(cv_id)
    .fetch_optional(pool)
    .await
}

pub async fn list_experiences(
    pool: &PgPool,
    developer_id: Uuid,
) -> Result<Vec<ExperienceRow>, sqlx::Error> {
    sqlx::query_as(
        "SELECT id, developer_id, position, company_name, description \
         FROM experiences WHERE developer_id = $1 ORDER BY id",
    )
    .bind(developer_id)
    .fetch_all(pool)
    .await
}

pub async fn list_educations(
    pool: &PgPool,
    developer_id: Uuid,
) -> Result<Vec<EducationRow>, sqlx::Error> {
    sqlx::query_as(
        "SELECT id, developer_id, degree, field_of_study, school_name \
         FROM educations WHERE developer_id = $1 ORDER BY id",
    )
    .bind(developer_id)
    .fetch_all(pool)
    .await
}

pub async fn list_application_ids_for_job(
    pool: &PgPool,
    job_id: Uuid,
) -> Result<Vec<Uuid>, sqlx::Error> {
    sqlx::query_scalar("SELECT id FROM applications WHERE job_id = $1 ORDER BY created_at")
        .bind(job_id)
        .fetch_all(pool)
        .await
}

pub async fn list_job_ids(pool: &PgPool) -> Result<Vec<Uuid>, sqlx::Error> {
    sqlx::query_scalar("SELECT id FROM job_postings ORDER BY created_at")
        .fetch_all(pool)
        .await
}

/// Overwrites the three score fields on an application. Last write wins;
/// there is no cross-application invariant to protect.
pub async fn update_application_score(
    pool: &PgPool,
    id: Uuid,
    match_score: i32,
    match_reason: &str,
    match_details: &Value,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        "UPDATE applications SET match_score = $1, match_reason = $2, match_details = $3 \
         WHERE id = $4",
    )
    .bind(match_score)
    .bind(match_reason)
    .bind(match_details)
    .bind(id)
    .execute(pool)
    .await?;
    Ok(())
}
