//! Model-backed ranking: one prompt, one call, strict JSON-array reply.
//!
//! No retries and no score/order enforcement here. A failure of any kind is a
//! `ModelError` and the orchestrator switches to the keyword scorer.

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use crate::llm_client::prompts::assemble;
use crate::llm_client::{strip_json_fences, GenerativeModel, LlmError};
use crate::models::job::JobPosting;
use crate::ranking::prompts::RECRUITER_INSTRUCTIONS;
use crate::ranking::MatchResult;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("model call failed: {0}")]
    Call(#[from] LlmError),

    #[error("model reply is not valid JSON: {0}")]
    Malformed(serde_json::Error),

    #[error("model reply is not a JSON array")]
    NotAnArray,

    #[error("ranking entry {index} is not a JSON object")]
    NotAnObject { index: usize },

    #[error("failed to serialize job snapshot: {0}")]
    Prompt(serde_json::Error),
}

/// The job fields the model gets to see.
#[derive(Debug, Serialize)]
struct PromptJob<'a> {
    id: i64,
    title: &'a str,
    company: &'a str,
    description: &'a str,
    requirements: &'a str,
}

impl<'a> From<&'a JobPosting> for PromptJob<'a> {
    fn from(job: &'a JobPosting) -> Self {
        Self {
            id: job.id,
            title: &job.title,
            company: &job.company,
            description: &job.description,
            requirements: &job.requirements,
        }
    }
}

/// Builds the single ranking prompt: instructions, resume, compact job JSON.
pub fn build_ranking_prompt(resume_text: &str, jobs: &[JobPosting]) -> Result<String, ModelError> {
    let compact: Vec<PromptJob<'_>> = jobs.iter().map(PromptJob::from).collect();
    let jobs_json = serde_json::to_string(&compact).map_err(ModelError::Prompt)?;

    let resume = format!("RESUME:\n{resume_text}");
    let jobs = format!("JOBS:\n{jobs_json}");

    Ok(assemble(&[RECRUITER_INSTRUCTIONS, &resume, &jobs]))
}

/// Asks the model to rank `jobs` for the resume.
pub async fn rank_via_model(
    model: &dyn GenerativeModel,
    resume_text: &str,
    jobs: &[JobPosting],
) -> Result<Vec<MatchResult>, ModelError> {
    let prompt = build_ranking_prompt(resume_text, jobs)?;
    let reply = model.generate(&prompt).await?;
    parse_ranking_reply(&reply)
}

/// Parses the model's reply into match results.
///
/// The reply must be a JSON array of objects (code fences tolerated). Inside each
/// object fields are read leniently; an entry without a usable `id` cannot reference
/// a job and is skipped.
pub fn parse_ranking_reply(reply: &str) -> Result<Vec<MatchResult>, ModelError> {
    let value: Value =
        serde_json::from_str(strip_json_fences(reply)).map_err(ModelError::Malformed)?;
    let entries = match value {
        Value::Array(entries) => entries,
        _ => return Err(ModelError::NotAnArray),
    };

    let mut results = Vec::with_capacity(entries.len());
    for (index, entry) in entries.iter().enumerate() {
        let obj = entry.as_object().ok_or(ModelError::NotAnObject { index })?;

        let Some(id) = obj.get("id").and_then(lenient_int) else {
            debug!("Skipping ranking entry {index}: missing or non-numeric id");
            continue;
        };

        results.push(MatchResult {
            id,
            match_score: obj.get("match_score").and_then(lenient_int),
            reasoning: obj
                .get("reasoning")
                .and_then(Value::as_str)
                .map(str::to_string),
            interview_questions: string_list(obj.get("interview_questions")),
            missing_skills: string_list(obj.get("missing_skills")),
        });
    }

    Ok(results)
}

/// Accepts `7`, `7.0`, `87.6` (rounded) and `"7"`.
fn lenient_int(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.round() as i64)),
        Value::String(s) => {
            let s = s.trim().trim_end_matches('%');
            s.parse::<i64>().ok().or_else(|| {
                s.parse::<f64>()
                    .ok()
                    .filter(|f| f.is_finite())
                    .map(|f| f.round() as i64)
            })
        }
        _ => None,
    }
}

fn string_list(value: Option<&Value>) -> Vec<String> {
    value
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}
