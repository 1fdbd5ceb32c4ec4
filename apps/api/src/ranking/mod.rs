//! Job ranking pipeline.
//!
//! Flow: snapshot jobs → `ranker::rank_via_model` → (on `ModelError`) `fallback::KeywordScorer`
//!       → `orchestrator::merge_ranked` → `RankedJobView`s for the caller.
//!
//! All model calls go through `llm_client`; nothing here talks HTTP.

use serde::{Deserialize, Serialize};

use crate::models::job::JobPosting;

pub mod fallback;
pub mod orchestrator;
pub mod prompts;
pub mod ranker;

/// Upper bound on ranked entries returned to a caller.
pub const MAX_RANKED_JOBS: usize = 30;

/// One job's fit against a resume, as produced by the model or the fallback scorer.
///
/// Model output is not trusted: `match_score` may be absent or out of range and
/// `reasoning` may be missing. `merge_ranked` applies the defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    pub id: i64,
    pub match_score: Option<i64>,
    pub reasoning: Option<String>,
    #[serde(default)]
    pub interview_questions: Vec<String>,
    #[serde(default)]
    pub missing_skills: Vec<String>,
}

/// A job posting enriched with its match data. This is the unit sent to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedJobView {
    #[serde(flatten)]
    pub job: JobPosting,
    /// 0 – 100
    pub match_score: u8,
    pub reasoning: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub interview_questions: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub missing_skills: Vec<String>,
}
