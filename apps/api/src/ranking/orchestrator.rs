//! Ranking orchestration: model first, keyword scorer on any failure, then merge.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{info, warn};

use crate::llm_client::GenerativeModel;
use crate::models::job::JobPosting;
use crate::ranking::fallback::KeywordScorer;
use crate::ranking::ranker::{rank_via_model, ModelError};
use crate::ranking::{MatchResult, RankedJobView, MAX_RANKED_JOBS};

const MISSING_REASONING: &str = "No reasoning provided.";

/// Which backend produced a ranking. Never a blend of both.
#[derive(Debug)]
pub enum RankingOutcome {
    Model(Vec<MatchResult>),
    Fallback {
        results: Vec<MatchResult>,
        cause: ModelError,
    },
}

impl RankingOutcome {
    pub fn results(&self) -> &[MatchResult] {
        match self {
            RankingOutcome::Model(results) => results,
            RankingOutcome::Fallback { results, .. } => results,
        }
    }

    pub fn into_results(self) -> Vec<MatchResult> {
        match self {
            RankingOutcome::Model(results) => results,
            RankingOutcome::Fallback { results, .. } => results,
        }
    }

    /// "model" or "fallback", for logs.
    pub fn backend(&self) -> &'static str {
        match self {
            RankingOutcome::Model(_) => "model",
            RankingOutcome::Fallback { .. } => "fallback",
        }
    }
}

/// Ranks job snapshots against a resume. Cheap to clone; shared via `AppState`.
#[derive(Clone)]
pub struct JobRanker {
    model: Arc<dyn GenerativeModel>,
    scorer: KeywordScorer,
}

impl JobRanker {
    pub fn new(model: Arc<dyn GenerativeModel>, scorer: KeywordScorer) -> Self {
        Self { model, scorer }
    }

    /// One model attempt; on `ModelError` the keyword scorer ranks the same inputs.
    pub async fn rank_jobs(&self, resume_text: &str, jobs: &[JobPosting]) -> RankingOutcome {
        match rank_via_model(self.model.as_ref(), resume_text, jobs).await {
            Ok(results) => RankingOutcome::Model(results),
            Err(cause) => {
                warn!("Model ranking failed: {cause}. Falling back to keyword matching.");
                RankingOutcome::Fallback {
                    results: self.scorer.score(resume_text, jobs),
                    cause,
                }
            }
        }
    }

    /// `rank_jobs` followed by `merge_ranked` against the same snapshot.
    pub async fn rank_and_merge(
        &self,
        resume_text: &str,
        jobs: &[JobPosting],
    ) -> Vec<RankedJobView> {
        let outcome = self.rank_jobs(resume_text, jobs).await;
        let backend = outcome.backend();
        let scored = outcome.results().len();
        let views = merge_ranked(outcome.into_results(), jobs);
        info!(backend, scored, kept = views.len(), corpus = jobs.len(), "Ranked jobs");
        views
    }
}

/// Joins ranked entries with their postings.
///
/// Entries whose id is not in the snapshot are dropped. Ranking order is kept as-is
/// (not re-sorted) and the output is capped at `MAX_RANKED_JOBS`.
pub fn merge_ranked(ranked: Vec<MatchResult>, jobs: &[JobPosting]) -> Vec<RankedJobView> {
    let by_id: HashMap<i64, &JobPosting> = jobs.iter().map(|j| (j.id, j)).collect();

    ranked
        .into_iter()
        .filter_map(|m| {
            let job = by_id.get(&m.id)?;
            Some(RankedJobView {
                job: (*job).clone(),
                match_score: m.match_score.unwrap_or(0).clamp(0, 100) as u8,
                reasoning: m
                    .reasoning
                    .unwrap_or_else(|| MISSING_REASONING.to_string()),
                interview_questions: m.interview_questions,
                missing_skills: m.missing_skills,
            })
        })
        .take(MAX_RANKED_JOBS)
        .collect()
}
