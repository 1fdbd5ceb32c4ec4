/// LLM Client: the single point of entry for all generative model calls.
///
/// ARCHITECTURAL RULE: No other module may call the Gemini API directly.
/// Services depend on the `GenerativeModel` trait; `GeminiClient` is the production backend.
use async_trait::async_trait;
use reqwest::Client;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

pub mod prompts;

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";
/// Model used when `GEMINI_MODEL` is not set.
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("LLM returned empty content")]
    EmptyContent,
}

/// A text-in, text-out generative model.
///
/// One call is one round-trip: implementations must not retry.
#[async_trait]
pub trait GenerativeModel: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, LlmError>;
}

/// Calls the model and deserializes its text response as JSON.
/// The prompt must instruct the model to return valid JSON.
pub async fn generate_json<T: DeserializeOwned>(
    model: &dyn GenerativeModel,
    prompt: &str,
) -> Result<T, LlmError> {
    let text = model.generate(prompt).await?;
    serde_json::from_str(strip_json_fences(&text)).map_err(LlmError::Parse)
}

#[derive(Debug, Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<RequestContent<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestContent<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    pub usage_metadata: Option<UsageMetadata>,
}

#[derive(Debug, Deserialize)]
pub struct Candidate {
    pub content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
pub struct ResponsePart {
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageMetadata {
    #[serde(default)]
    pub prompt_token_count: u32,
    #[serde(default)]
    pub candidates_token_count: u32,
}

impl GenerateContentResponse {
    /// Concatenates the text parts of the first candidate.
    pub fn text(&self) -> Option<String> {
        let parts = &self.candidates.first()?.content.as_ref()?.parts;
        let text: String = parts.iter().filter_map(|p| p.text.as_deref()).collect();
        if text.is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

#[derive(Debug, Deserialize)]
struct GeminiError {
    error: GeminiErrorBody,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorBody {
    message: String,
}

/// Gemini `generateContent` client. Constructed once at startup and shared via `AppState`.
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    api_key: String,
    model: String,
}

impl GeminiClient {
    pub fn new(api_key: String, model: String) -> Result<Self, LlmError> {
        Ok(Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(120))
                .build()?,
            api_key,
            model,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl GenerativeModel for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
        let url = format!("{GEMINI_API_BASE}/{}:generateContent", self.model);
        let request_body = GenerateContentRequest {
            contents: vec![RequestContent {
                parts: vec![RequestPart { text: prompt }],
            }],
        };

        let response = self
            .client
            .post(url)
            .header("x-goog-api-key", &self.api_key)
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<GeminiError>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body: GenerateContentResponse = response.json().await?;

        if let Some(usage) = &body.usage_metadata {
            debug!(
                "LLM call succeeded: prompt_tokens={}, output_tokens={}",
                usage.prompt_token_count, usage.candidates_token_count
            );
        }

        body.text().ok_or(LlmError::EmptyContent)
    }
}

/// Strips ```json ... ``` or ``` ... ``` code fences from LLM output.
pub fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    if let Some(stripped) = text.strip_prefix("```json") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else if let Some(stripped) = text.strip_prefix("```") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else {
        text
    }
}


#[cfg(test)]
mod tests {
    use super::testing::ScriptedModel;
    use super::*;

    #[test]
    fn test_strip_json_fences_with_json_tag() {
        let input = "```json\n{\"key\": \"value\"}\n```";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_strip_json_fences_without_tag() {
        let input = "```\n[1, 2]\n```";
        assert_eq!(strip_json_fences(input), "[1, 2]");
    }

    #[test]
    fn test_strip_json_fences_no_fences() {
        let input = "  {\"key\": \"value\"}\n";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_response_text_joins_parts_of_first_candidate() {
        let json = r#"{
            "candidates": [
                {"content": {"parts": [{"text": "[{\"id\": 1"}, {"text": "}]"}]}},
                {"content": {"parts": [{"text": "ignored"}]}}
            ],
            "usageMetadata": {"promptTokenCount": 12, "candidatesTokenCount": 4}
        }"#;
        let response: GenerateContentResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.text().as_deref(), Some("[{\"id\": 1}]"));
        assert_eq!(response.usage_metadata.unwrap().prompt_token_count, 12);
    }

    #[test]
    fn test_response_without_candidates_has_no_text() {
        let response: GenerateContentResponse =
            serde_json::from_str(r#"{"candidates": []}"#).unwrap();
        assert!(response.text().is_none());
    }

    #[tokio::test]
    async fn test_generate_json_strips_fences_before_parsing() {
        let model = ScriptedModel::replying("```json\n{\"safety_status\": \"PASS\"}\n```");
        let value: serde_json::Value = generate_json(&model, "prompt").await.unwrap();
        assert_eq!(value["safety_status"], "PASS");
    }

    #[tokio::test]
    async fn test_generate_json_reports_parse_errors() {
        let model = ScriptedModel::replying("Sorry, I cannot help with that.");
        let result: Result<serde_json::Value, _> = generate_json(&model, "prompt").await;
        assert!(matches!(result, Err(LlmError::Parse(_))));
    }
}
