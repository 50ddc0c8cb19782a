//! Match Scoring Engine: keyword-overlap scorer with an experience-level
//! fit adjustment.
//!
//! Default backend: `KeywordMatchScorer` (pure-Rust, deterministic, no
//! external calls). `AppState` carries the scorer as `Arc<dyn MatchScorer>`
//! so an alternative backend can be swapped in at startup without touching
//! handlers or the batch driver.

use std::collections::BTreeSet;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::scoring::tokenize::normalize_tokenize;

/// Matched-keyword lists surfaced to the UI are truncated to this many
/// entries.
pub const MAX_SURFACED_KEYWORDS: usize = 20;

const NOTE_LEVEL_MATCHES: &str = "experience level matches the posting";
const NOTE_LEVEL_BELOW: &str = "experience level may be below what the posting requires";

// ────────────────────────────────────────────────────────────────────────────
// Input / output data models
// ────────────────────────────────────────────────────────────────────────────

/// Pure signal inputs for one scoring run: the two aggregated text blobs
/// plus the experience signals. Everything the scorer touches is here, so a
/// run is an idempotent function of this struct.
#[derive(Debug, Clone, Default)]
pub struct ScoreInput {
    pub job_text: String,
    pub candidate_text: String,
    /// Declared level on the posting ("junior" | "mid" | "senior" | "lead").
    pub job_level: Option<String>,
    /// Declared seniority from the parsed CV, if any.
    pub candidate_seniority: Option<String>,
    /// Years of experience from the parsed CV; used to derive seniority
    /// when no declared level exists.
    pub candidate_years: Option<f64>,
}

/// Structured breakdown persisted into `match_details` and consumed by the
/// front end.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchDetails {
    pub matching_skills: Vec<String>,
    pub missing_skills: Vec<String>,
    pub missing_optional: Vec<String>,
    pub positive_factors: Vec<String>,
    pub negative_factors: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub experience_analysis: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub education_match: Option<String>,
}

/// Result of one scoring run, ready to persist onto an application.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchOutcome {
    pub score: u32,
    pub reason: String,
    pub details: MatchDetails,
}

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

/// The match scorer seam. Carried in `AppState` as `Arc<dyn MatchScorer>`.
#[async_trait]
pub trait MatchScorer: Send + Sync {
    async fn score(&self, input: &ScoreInput) -> Result<MatchOutcome, AppError>;
}

/// Default keyword-overlap backend.
pub struct KeywordMatchScorer;

#[async_trait]
impl MatchScorer for KeywordMatchScorer {
    async fn score(&self, input: &ScoreInput) -> Result<MatchOutcome, AppError> {
        Ok(compute_keyword_match(input))
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Seniority ordering
// ────────────────────────────────────────────────────────────────────────────

/// Ordinal seniority ranking used by the experience-fit comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeniorityLevel {
    Junior,
    Mid,
    Senior,
    Lead,
}

impl SeniorityLevel {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "junior" => Some(SeniorityLevel::Junior),
            "mid" => Some(SeniorityLevel::Mid),
            "senior" => Some(SeniorityLevel::Senior),
            "lead" => Some(SeniorityLevel::Lead),
            _ => None,
        }
    }

    /// junior=1 < mid=2 < senior=3 < lead=4.
    pub fn order(self) -> u8 {
        match self {
            SeniorityLevel::Junior => 1,
            SeniorityLevel::Mid => 2,
            SeniorityLevel::Senior => 3,
            SeniorityLevel::Lead => 4,
        }
    }

    /// Fallback derivation when the CV carries no declared seniority.
    pub fn from_years(years: f64) -> Self {
        if years >= 5.0 {
            SeniorityLevel::Senior
        } else if years >= 2.0 {
            SeniorityLevel::Mid
        } else {
            SeniorityLevel::Junior
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SeniorityLevel::Junior => "junior",
            SeniorityLevel::Mid => "mid",
            SeniorityLevel::Senior => "senior",
            SeniorityLevel::Lead => "lead",
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Overlap scoring
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct OverlapResult {
    pub score: u32,
    /// Job keywords found in the candidate set, lexicographically sorted.
    pub matched: Vec<String>,
}

/// Fraction of the job keyword set present in the candidate keyword set,
/// scaled to 0–100. An empty job set scores 0 with no matches; the caller
/// supplies the fallback reason text.
pub fn overlap_score(
    job_words: &BTreeSet<String>,
    candidate_words: &BTreeSet<String>,
) -> OverlapResult {
    if job_words.is_empty() {
        return OverlapResult {
            score: 0,
            matched: Vec::new(),
        };
    }

    let matched: Vec<String> = job_words
        .iter()
        .filter(|word| candidate_words.contains(*word))
        .cloned()
        .collect();

    let score = ((matched.len() as f64 / job_words.len() as f64) * 100.0).round() as u32;

    OverlapResult { score, matched }
}

// ────────────────────────────────────────────────────────────────────────────
// Experience-fit adjustment
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct ExperienceFit {
    pub score: u32,
    pub note: Option<String>,
    /// Candidate is at most one level below, at, or above the required
    /// level. Vacuously true when the posting declares no known level.
    pub meets: bool,
    pub candidate_level: SeniorityLevel,
}

/// Nudges the base score by the experience-level comparison.
///
/// Unknown job level: no adjustment, no note. A fitting candidate earns +10
/// only when the base score is at least 20, so a poor textual match is not
/// inflated. The result is always clamped to [0, 100].
pub fn adjust_experience(
    base_score: u32,
    job_level: Option<&str>,
    candidate_seniority: Option<&str>,
    candidate_years: Option<f64>,
) -> ExperienceFit {
    let candidate_level = candidate_seniority
        .and_then(SeniorityLevel::parse)
        .unwrap_or_else(|| SeniorityLevel::from_years(candidate_years.unwrap_or(0.0)));

    let job_order = job_level
        .and_then(SeniorityLevel::parse)
        .map(SeniorityLevel::order)
        .unwrap_or(0);

    if job_order == 0 {
        return ExperienceFit {
            score: base_score.min(100),
            note: None,
            meets: true,
            candidate_level,
        };
    }

    let candidate_order = candidate_level.order();

    if candidate_order >= job_order - 1 {
        if base_score >= 20 {
            ExperienceFit {
                score: (base_score + 10).min(100),
                note: Some(NOTE_LEVEL_MATCHES.to_string()),
                meets: true,
                candidate_level,
            }
        } else {
            ExperienceFit {
                score: base_score,
                note: None,
                meets: true,
                candidate_level,
            }
        }
    } else {
        ExperienceFit {
            score: base_score.min(100),
            note: Some(NOTE_LEVEL_BELOW.to_string()),
            meets: false,
            candidate_level,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Reason builder (keyword variant)
// ────────────────────────────────────────────────────────────────────────────

/// Builds the human-readable `match_reason` for the keyword variant.
pub fn build_reason(job_word_count: usize, matched_count: usize, note: Option<&str>) -> String {
    if job_word_count == 0 {
        return "No keyword text available in the posting; evaluated as a general fit."
            .to_string();
    }

    if matched_count == 0 && note.is_none() {
        return "Limited keyword overlap between the CV and the job text.".to_string();
    }

    let mut parts = Vec::new();
    if matched_count > 0 {
        parts.push(format!(
            "{matched_count} posting keywords found in candidate profile"
        ));
    }
    if let Some(note) = note {
        parts.push(note.to_string());
    }
    parts.join(" ")
}

// ────────────────────────────────────────────────────────────────────────────
// Keyword match pipeline
// ────────────────────────────────────────────────────────────────────────────

/// Full keyword-variant scoring run: tokenize both sides, overlap-score,
/// apply the experience adjustment, and assemble reason + details.
pub fn compute_keyword_match(input: &ScoreInput) -> MatchOutcome {
    let job_words = normalize_tokenize(&input.job_text);
    let candidate_words = normalize_tokenize(&input.candidate_text);

    let overlap = overlap_score(&job_words, &candidate_words);

    let fit = adjust_experience(
        overlap.score,
        input.job_level.as_deref(),
        input.candidate_seniority.as_deref(),
        input.candidate_years,
    );

    let reason = build_reason(job_words.len(), overlap.matched.len(), fit.note.as_deref());

    let details = MatchDetails {
        matching_skills: overlap
            .matched
            .iter()
            .take(MAX_SURFACED_KEYWORDS)
            .cloned()
            .collect(),
        // The keyword variant does not populate the missing-skill lists;
        // only the ATS breakdown does.
        ..MatchDetails::default()
    };

    MatchOutcome {
        score: fit.score.min(100),
        reason,
        details,
    }
}
