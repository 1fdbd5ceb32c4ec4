//! Structured resume extraction from raw text or an uploaded PDF.

use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::llm_client::prompts::{assemble, JSON_ONLY_INSTRUCTION};
use crate::llm_client::{generate_json, GenerativeModel};
use crate::resume::prompts::{RESUME_EXTRACTION_INSTRUCTIONS, RESUME_EXTRACTION_SCHEMA};

/// Everything the extractor may draw on. Only `resume_text` is required.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResumeSources {
    pub resume_text: String,
    pub linkedin_text: Option<String>,
    /// Comma-separated.
    pub portfolio_links: Option<String>,
    /// Comma-separated.
    pub github_links: Option<String>,
    /// Comma-separated project descriptions.
    pub projects: Option<String>,
}

/// Structured output of resume extraction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResumeProfile {
    pub structured_profile: Vec<String>,
    pub bullet_bank: Vec<String>,
    pub answer_library: Vec<String>,
    pub proof_pack: Vec<String>,
    pub rules: Vec<String>,
}

pub fn build_extraction_prompt(sources: &ResumeSources) -> String {
    let optional = |label: &str, value: &Option<String>| match value.as_deref().map(str::trim) {
        Some(v) if !v.is_empty() => format!("{label}: {v}"),
        _ => String::new(),
    };

    assemble(&[
        RESUME_EXTRACTION_INSTRUCTIONS,
        &format!("Resume:\n{}", sources.resume_text),
        &optional("LinkedIn", &sources.linkedin_text),
        &optional("Portfolio Links", &sources.portfolio_links),
        &optional("GitHub Links", &sources.github_links),
        &optional("Projects", &sources.projects),
        RESUME_EXTRACTION_SCHEMA,
        JSON_ONLY_INSTRUCTION,
    ])
}

/// Runs structured extraction. Unlike ranking there is no fallback: a model failure
/// is reported to the caller.
pub async fn parse_resume(
    model: &dyn GenerativeModel,
    sources: &ResumeSources,
) -> Result<ResumeProfile, AppError> {
    if sources.resume_text.trim().is_empty() {
        return Err(AppError::Validation("resume_text cannot be empty".to_string()));
    }

    let prompt = build_extraction_prompt(sources);
    generate_json::<ResumeProfile>(model, &prompt)
        .await
        .map_err(|e| AppError::Llm(format!("Resume extraction failed: {e}")))
}

/// Extracts the text layer of a PDF. Runs on the blocking pool.
pub async fn extract_pdf_text(bytes: Vec<u8>) -> Result<String, AppError> {
    let text = tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&bytes))
        .await
        .map_err(|e| AppError::Internal(e.into()))?
        .map_err(|e| AppError::Validation(format!("Could not read PDF: {e}")))?;

    if text.trim().is_empty() {
        return Err(AppError::Validation(
            "Could not extract text from PDF".to_string(),
        ));
    }
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::testing::ScriptedModel;

    const PROFILE_JSON: &str = r#"{
        "structured_profile": ["B.Sc. Computer Science, 2024"],
        "bullet_bank": ["Cut API latency by 20% by adding a Redis cache"],
        "answer_library": ["Authorized to work in the EU"],
        "proof_pack": ["https://github.com/example/cache"],
        "rules": ["Do not invent experience"]
    }"#;

    #[test]
    fn test_prompt_includes_only_present_sources() {
        let sources = ResumeSources {
            resume_text: "Jane Doe, Rust developer".to_string(),
            github_links: Some("https://github.com/jane".to_string()),
            linkedin_text: Some("   ".to_string()),
            ..ResumeSources::default()
        };

        let prompt = build_extraction_prompt(&sources);

        assert!(prompt.contains("Resume:\nJane Doe, Rust developer"));
        assert!(prompt.contains("GitHub Links: https://github.com/jane"));
        assert!(!prompt.contains("LinkedIn:"));
        assert!(!prompt.contains("Projects:"));
    }

    #[tokio::test]
    async fn test_parse_resume_returns_profile() {
        let model = ScriptedModel::replying(PROFILE_JSON);
        let sources = ResumeSources {
            resume_text: "Jane Doe".to_string(),
            ..ResumeSources::default()
        };

        let profile = parse_resume(&model, &sources).await.unwrap();

        assert_eq!(profile.proof_pack, vec!["https://github.com/example/cache"]);
        assert_eq!(profile.rules.len(), 1);
    }

    #[tokio::test]
    async fn test_parse_resume_rejects_empty_text_without_calling_model() {
        let model = ScriptedModel::replying(PROFILE_JSON);
        let sources = ResumeSources::default();

        let err = parse_resume(&model, &sources).await.unwrap_err();

        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(model.call_count(), 0);
    }

    #[tokio::test]
    async fn test_parse_resume_surfaces_model_failure() {
        let sources = ResumeSources {
            resume_text: "Jane Doe".to_string(),
            ..ResumeSources::default()
        };

        let err = parse_resume(&ScriptedModel::failing(), &sources)
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Llm(_)));
    }

    #[tokio::test]
    async fn test_extract_pdf_text_rejects_garbage() {
        let result = extract_pdf_text(b"definitely not a pdf".to_vec()).await;
        assert!(result.is_err());
    }
}
