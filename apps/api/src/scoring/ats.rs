//! ATS compute-score variant: the same overlap and experience signals as
//! the keyword scorer, assembled into an itemized breakdown with skill,
//! experience, and education components. The mapping from breakdown to the
//! UI-facing `MatchDetails` shape is a pure structural transform; no
//! re-scoring happens there.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::models::job::JobPostingRow;
use crate::scoring::aggregate::{candidate_text, CandidateBundle};
use crate::scoring::engine::{
    adjust_experience, overlap_score, MatchDetails, SeniorityLevel, MAX_SURFACED_KEYWORDS,
};
use crate::scoring::tokenize::normalize_tokenize;

pub const DEFAULT_ALGORITHM_VERSION: &str = "ats-v1";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillComponent {
    /// Job keywords found in the candidate's aggregated text, sorted.
    pub matching: Vec<String>,
    /// Keywords from title/description/requirements absent on the candidate.
    pub missing_required: Vec<String>,
    /// Keywords appearing only in responsibilities, absent on the candidate.
    pub missing_optional: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperienceComponent {
    pub candidate_years: f64,
    pub required_level: Option<String>,
    pub candidate_level: String,
    pub meets: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EducationComponent {
    pub field_relevant: bool,
    pub degree: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AtsComponents {
    pub skill: SkillComponent,
    pub experience: ExperienceComponent,
    pub education: EducationComponent,
}

/// Full ATS scoring breakdown persisted alongside the score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AtsBreakdown {
    pub algorithm_version: String,
    pub components: AtsComponents,
    pub positive_factors: Vec<String>,
    pub negative_factors: Vec<String>,
    pub final_score: u32,
}

/// Computes the ATS breakdown for one job/candidate pair.
pub fn compute_ats_breakdown(
    job: &JobPostingRow,
    bundle: &CandidateBundle,
    algorithm_version: &str,
) -> AtsBreakdown {
    // Required keywords come from the mandatory posting fields; keywords
    // only present in responsibilities count as optional.
    let required_words = normalize_tokenize(&format!(
        "{} {} {}",
        job.title, job.description, job.requirements
    ));
    let optional_words: BTreeSet<String> = job
        .responsibilities
        .as_deref()
        .map(normalize_tokenize)
        .unwrap_or_default()
        .difference(&required_words)
        .cloned()
        .collect();

    let job_words: BTreeSet<String> = required_words.union(&optional_words).cloned().collect();
    let candidate_words = normalize_tokenize(&candidate_text(bundle));

    let overlap = overlap_score(&job_words, &candidate_words);

    let candidate_years = bundle
        .cv_profile
        .as_ref()
        .and_then(|p| p.experience_years)
        .unwrap_or(0.0);
    let candidate_seniority = bundle
        .cv_profile
        .as_ref()
        .and_then(|p| p.seniority.clone());

    let fit = adjust_experience(
        overlap.score,
        job.experience_level.as_deref(),
        candidate_seniority.as_deref(),
        Some(candidate_years),
    );

    let matching: Vec<String> = overlap
        .matched
        .iter()
        .take(MAX_SURFACED_KEYWORDS)
        .cloned()
        .collect();
    let missing_required: Vec<String> = required_words
        .iter()
        .filter(|w| !candidate_words.contains(*w))
        .take(MAX_SURFACED_KEYWORDS)
        .cloned()
        .collect();
    let missing_optional: Vec<String> = optional_words
        .iter()
        .filter(|w| !candidate_words.contains(*w))
        .take(MAX_SURFACED_KEYWORDS)
        .cloned()
        .collect();

    let required_level = job
        .experience_level
        .as_deref()
        .and_then(SeniorityLevel::parse)
        .map(|l| l.label().to_string());

    let field_relevant = bundle.educations.iter().any(|edu| {
        normalize_tokenize(&edu.field_of_study)
            .iter()
            .any(|term| job_words.contains(term))
    });
    let degree = bundle.educations.first().map(|edu| edu.degree.clone());

    let mut positive_factors = Vec::new();
    let mut negative_factors = Vec::new();

    if !matching.is_empty() {
        positive_factors.push(format!("{} posting keywords matched", overlap.matched.len()));
    }
    if required_level.is_some() && fit.meets {
        positive_factors.push("experience level meets the posting".to_string());
    }
    if field_relevant {
        positive_factors.push("education field is relevant to the posting".to_string());
    }
    if !missing_required.is_empty() {
        negative_factors.push(format!(
            "missing required keywords: {}",
            missing_required
                .iter()
                .take(5)
                .cloned()
                .collect::<Vec<_>>()
                .join(", ")
        ));
    }
    if required_level.is_some() && !fit.meets {
        negative_factors.push("experience level below the posting requirement".to_string());
    }

    AtsBreakdown {
        algorithm_version: algorithm_version.to_string(),
        components: AtsComponents {
            skill: SkillComponent {
                matching,
                missing_required,
                missing_optional,
            },
            experience: ExperienceComponent {
                candidate_years,
                required_level,
                candidate_level: fit.candidate_level.label().to_string(),
                meets: fit.meets,
            },
            education: EducationComponent {
                field_relevant,
                degree,
            },
        },
        positive_factors,
        negative_factors,
        final_score: fit.score.min(100),
    }
}

/// Maps a breakdown into the UI-facing details shape. Pure transform.
pub fn breakdown_details(breakdown: &AtsBreakdown) -> MatchDetails {
    let experience = &breakdown.components.experience;
    let education = &breakdown.components.education;

    let experience_analysis = format!(
        "candidate level {} vs required {}: {}",
        experience.candidate_level,
        experience.required_level.as_deref().unwrap_or("unspecified"),
        if experience.meets { "meets" } else { "below" }
    );

    let education_match = match (&education.degree, education.field_relevant) {
        (Some(degree), true) => format!("{degree}, field relevant to the posting"),
        (Some(degree), false) => format!("{degree}, field not clearly relevant"),
        (None, _) => "no education information".to_string(),
    };

    MatchDetails {
        matching_skills: breakdown.components.skill.matching.clone(),
        missing_skills: breakdown.components.skill.missing_required.clone(),
        missing_optional: breakdown.components.skill.missing_optional.clone(),
        positive_factors: breakdown.positive_factors.clone(),
        negative_factors: breakdown.negative_factors.clone(),
        experience_analysis: Some(experience_analysis),
        education_match: Some(education_match),
    }
}

/// Three-way classifier over the final score; lower bounds inclusive.
pub fn ats_reason(final_score: u32) -> String {
    if final_score >= 80 {
        "Very strong match with the posting requirements.".to_string()
    } else if final_score >= 60 {
        "Suitable match with the posting requirements.".to_string()
    } else {
        "Limited fit with the posting requirements.".to_string()
    }
}
