//! Text aggregation: flattens a job posting and a candidate's full profile
//! bundle into the two strings the tokenizer consumes. Pure read-side code;
//! missing CV or parsed-profile rows are tolerated as absent.

use crate::models::candidate::{CvProfileRow, CvRow, DeveloperProfileRow, EducationRow, ExperienceRow};
use crate::models::job::JobPostingRow;

/// Everything the scorer needs about one candidate, resolved per
/// application (the CV is the one the application references, if any).
#[derive(Debug, Clone, Default)]
pub struct CandidateBundle {
    pub profile: Option<DeveloperProfileRow>,
    pub cv: Option<CvRow>,
    pub cv_profile: Option<CvProfileRow>,
    pub experiences: Vec<ExperienceRow>,
    pub educations: Vec<EducationRow>,
}

/// Joins the job posting's text fields with single spaces, skipping nulls.
pub fn job_text(job: &JobPostingRow) -> String {
    let mut parts: Vec<&str> = vec![&job.title, &job.description, &job.requirements];
    if let Some(resp) = job.responsibilities.as_deref() {
        parts.push(resp);
    }
    join_fragments(parts.into_iter())
}

/// Joins the candidate's profile, CV, parsed-CV, experience, and education
/// fragments in a fixed order, skipping everything absent or blank.
pub fn candidate_text(bundle: &CandidateBundle) -> String {
    let mut parts: Vec<String> = Vec::new();

    if let Some(profile) = &bundle.profile {
        push_opt(&mut parts, profile.bio.as_deref());
        push_opt(&mut parts, profile.title.as_deref());
    }

    if let Some(cv) = &bundle.cv {
        push_opt(&mut parts, cv.raw_text.as_deref());
    }

    if let Some(cv_profile) = &bundle.cv_profile {
        push_opt(&mut parts, cv_profile.summary.as_deref());
        if let Some(years) = cv_profile.experience_years {
            parts.push(format!("{} yıl deneyim", years));
        }
        if !cv_profile.roles.is_empty() {
            parts.push(cv_profile.roles.join(" "));
        }
        push_opt(&mut parts, cv_profile.seniority.as_deref());
        if !cv_profile.skills.is_empty() {
            parts.push(cv_profile.skills.join(" "));
        }
    }

    for exp in &bundle.experiences {
        push_non_blank(&mut parts, &exp.position);
        push_non_blank(&mut parts, &exp.company_name);
        push_opt(&mut parts, exp.description.as_deref());
    }

    for edu in &bundle.educations {
        push_non_blank(&mut parts, &edu.degree);
        push_non_blank(&mut parts, &edu.field_of_study);
        push_non_blank(&mut parts, &edu.school_name);
    }

    join_fragments(parts.iter().map(|s| s.as_str()))
}

fn push_opt(parts: &mut Vec<String>, fragment: Option<&str>) {
    if let Some(f) = fragment {
        push_non_blank(parts, f);
    }
}

fn push_non_blank(parts: &mut Vec<String>, fragment: &str) {
    if !fragment.trim().is_empty() {
        parts.push(fragment.trim().to_string());
    }
}

fn join_fragments<'a>(parts: impl Iterator<Item = &'a str>) -> String {
    parts
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn make_job(responsibilities: Option<&str>) -> JobPostingRow {
        JobPostingRow {
            id: Uuid::new_v4(),
            company_id: Uuid::new_v4(),
            title: "Senior Rust Engineer".to_string(),
            description: "Build backend services".to_string(),
            requirements: "Rust Tokio Postgres".to_string(),
            responsibilities: responsibilities.map(|s| s.to_string()),
            experience_level: Some("senior".to_string()),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_job_text_joins_all_fields() {
        let job = make_job(Some("Own the matching service"));
        assert_eq!(
            job_text(&job),
            "Senior Rust Engineer Build backend services Rust Tokio Postgres Own the matching service"
        );
    }

    #[test]
    fn test_job_text_skips_missing_responsibilities() {
        let job = make_job(None);
        assert_eq!(
            job_text(&job),
            "Senior Rust Engineer Build backend services Rust Tokio Postgres"
        );
    }

    #[test]
    fn test_candidate_text_empty_bundle() {
        assert_eq!(candidate_text(&CandidateBundle::default()), "");
    }

    #[test]
    fn test_candidate_text_full_ordering() {
        let developer_id = Uuid::new_v4();
        let cv_id = Uuid::new_v4();
        let bundle = CandidateBundle {
            profile: Some(DeveloperProfileRow {
                developer_id,
                bio: Some("Backend developer".to_string()),
                title: Some("Software Engineer".to_string()),
            }),
            cv: Some(CvRow {
                id: cv_id,
                developer_id,
                raw_text: Some("Rust and Go services".to_string()),
                status: "processed".to_string(),
                created_at: Utc::now(),
            }),
            cv_profile: Some(CvProfileRow {
                cv_id,
                summary: Some("Systems programmer".to_string()),
                experience_years: Some(4.0),
                roles: vec!["Backend Developer".to_string()],
                seniority: Some("mid".to_string()),
                skills: vec!["rust".to_string(), "postgres".to_string()],
            }),
            experiences: vec![ExperienceRow {
                id: Uuid::new_v4(),
                developer_id,
                position: "Engineer".to_string(),
                company_name: "Acme".to_string(),
                description: Some("Built APIs".to_string()),
            }],
            educations: vec![EducationRow {
                id: Uuid::new_v4(),
                developer_id,
                degree: "BSc".to_string(),
                field_of_study: "Computer Engineering".to_string(),
                school_name: "ITU".to_string(),
            }],
        };

        assert_eq!(
            candidate_text(&bundle),
            "Backend developer Software Engineer Rust and Go services Systems programmer \
             4 yıl deneyim Backend Developer mid rust postgres \
             Engineer Acme Built APIs BSc Computer Engineering ITU"
        );
    }

    #[test]
    fn test_candidate_text_missing_cv_rows_tolerated() {
        let bundle = CandidateBundle {
            profile: Some(DeveloperProfileRow {
                developer_id: Uuid::new_v4(),
                bio: Some("Frontend developer".to_string()),
                title: None,
            }),
            ..CandidateBundle::default()
        };
        assert_eq!(candidate_text(&bundle), "Frontend developer");
    }

    #[test]
    fn test_blank_fragments_are_skipped() {
        let bundle = CandidateBundle {
            profile: Some(DeveloperProfileRow {
                developer_id: Uuid::new_v4(),
                bio: Some("   ".to_string()),
                title: Some("Engineer".to_string()),
            }),
            ..CandidateBundle::default()
        };
        assert_eq!(candidate_text(&bundle), "Engineer");
    }
}
