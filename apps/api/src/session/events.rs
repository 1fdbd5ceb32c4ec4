use serde::{Deserialize, Serialize};

use crate::ranking::RankedJobView;

pub const THINKING_MESSAGE: &str = "Analyzing resume with Gemini AI...";
pub const COMPLETE_MESSAGE: &str = "Successfully applied to top 10 matches!";

/// First (and only) client message of a session.
#[derive(Debug, Clone, Deserialize)]
pub struct MatchRequest {
    pub token: String,
    pub resume_text: String,
}

/// Server → client progress event, tagged by `status`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum ProgressEvent {
    Thinking { message: String },
    Ranked { jobs: Vec<RankedJobView> },
    Applying { job_id: i64, job_title: String },
    Applied { job_id: i64 },
    Complete { message: String },
    Error { message: String },
}

impl ProgressEvent {
    pub fn status(&self) -> &'static str {
        match self {
            ProgressEvent::Thinking { .. } => "thinking",
            ProgressEvent::Ranked { .. } => "ranked",
            ProgressEvent::Applying { .. } => "applying",
            ProgressEvent::Applied { .. } => "applied",
            ProgressEvent::Complete { .. } => "complete",
            ProgressEvent::Error { .. } => "error",
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        ProgressEvent::Error {
            message: message.into(),
        }
    }
}
