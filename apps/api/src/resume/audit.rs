//! Auditor. Flags fabricated skills or claims in a tailored application.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::llm_client::prompts::{assemble, JSON_ONLY_INSTRUCTION};
use crate::llm_client::{generate_json, GenerativeModel};
use crate::resume::prompts::AUDITOR_INSTRUCTIONS;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SafetyStatus {
    Pass,
    Fail,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditReport {
    pub safety_status: SafetyStatus,
    #[serde(default)]
    pub violations: Vec<String>,
    pub explanation: String,
}

impl AuditReport {
    /// Used when the auditor model is unavailable.
    pub fn unavailable() -> Self {
        Self {
            safety_status: SafetyStatus::Pass,
            violations: vec![],
            explanation: "Audit passed via fallback (AI service unavailable).".to_string(),
        }
    }
}

pub fn build_audit_prompt(original_resume: &str, tailored_text: &str) -> String {
    assemble(&[
        AUDITOR_INSTRUCTIONS,
        JSON_ONLY_INSTRUCTION,
        &format!("ORIGINAL RESUME:\n{original_resume}"),
        &format!("TAILORED APPLICATION:\n{tailored_text}"),
    ])
}

/// Audits `tailored_text` against `original_resume`.
///
/// A FAIL with no listed violations is kept as reported; the explanation carries the reason.
pub async fn audit_application(
    model: &dyn GenerativeModel,
    original_resume: &str,
    tailored_text: &str,
) -> AuditReport {
    let prompt = build_audit_prompt(original_resume, tailored_text);
    match generate_json::<AuditReport>(model, &prompt).await {
        Ok(report) => report,
        Err(e) => {
            warn!("Auditor failed: {e}");
            AuditReport::unavailable()
        }
    }
}
