//! HTTP client for the Gemini `generateContent` REST endpoint.

use std::time::Duration;

use brandpulse_core::AppConfig;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::backend::{GenerateRequest, ModelBackend};
use crate::error::GatewayError;

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const DEFAULT_TEMPERATURE: f32 = 0.7;

/// Longest slice of an error body carried into [`GatewayError::UnexpectedStatus`].
const MAX_ERROR_BODY_CHARS: usize = 500;

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest<'a> {
    contents: Vec<Content<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content<'a>>,
    generation_config: GenerationConfig<'a>,
}

#[derive(Serialize)]
struct Content<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'a str>,
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig<'a> {
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_mime_type: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_schema: Option<&'a serde_json::Value>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<CandidateContent>,
    finish_reason: Option<String>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// Client for the Gemini REST API.
///
/// Use [`GeminiClient::new`] for production or [`GeminiClient::with_base_url`]
/// to point at a mock server in tests.
pub struct GeminiClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl GeminiClient {
    /// Creates a client pointed at the public Gemini endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Http`] if the `reqwest::Client` cannot be built.
    pub fn new(api_key: &str, timeout_secs: u64) -> Result<Self, GatewayError> {
        Self::with_base_url(api_key, timeout_secs, DEFAULT_BASE_URL)
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Http`] if the `reqwest::Client` cannot be built.
    pub fn with_base_url(
        api_key: &str,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, GatewayError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("brandpulse/0.1 (analysis-gateway)")
            .build()?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            base_url: base_url.trim_end_matches('/').to_owned(),
        })
    }

    /// Creates a client from application configuration.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Http`] if the `reqwest::Client` cannot be built.
    pub fn from_config(config: &AppConfig) -> Result<Self, GatewayError> {
        Self::with_base_url(
            &config.gemini_api_key,
            config.gemini_request_timeout_secs,
            &config.gemini_base_url,
        )
    }

    fn endpoint(&self, model: &str) -> String {
        let model = model.trim().trim_start_matches("models/");
        format!("{}/models/{model}:generateContent", self.base_url)
    }

    async fn generate_content(
        &self,
        model: &str,
        request: &GenerateRequest,
    ) -> Result<String, GatewayError> {
        let body = GeminiRequest {
            contents: vec![Content {
                role: Some("user"),
                parts: vec![Part {
                    text: &request.prompt,
                }],
            }],
            system_instruction: request.system.as_deref().map(|text| Content {
                role: None,
                parts: vec![Part { text }],
            }),
            generation_config: GenerationConfig {
                temperature: request.temperature.unwrap_or(DEFAULT_TEMPERATURE),
                response_mime_type: request.schema.as_ref().map(|_| "application/json"),
                response_schema: request.schema.as_ref(),
            },
        };

        let response = self
            .client
            .post(self.endpoint(model))
            .query(&[("key", self.api_key.as_str())])
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(GatewayError::UnexpectedStatus {
                model: model.to_owned(),
                status: status.as_u16(),
                message: error_message(&text),
            });
        }

        let text = response.text().await?;
        let parsed: GeminiResponse =
            serde_json::from_str(&text).map_err(|e| GatewayError::Deserialize {
                context: format!("generateContent(model={model})"),
                source: e,
            })?;

        extract_text(model, parsed)
    }
}

impl ModelBackend for GeminiClient {
    async fn generate(&self, model: &str, request: &GenerateRequest) -> Result<String, GatewayError> {
        self.generate_content(model, request).await
    }
}

/// Concatenate the first candidate's text parts.
fn extract_text(model: &str, response: GeminiResponse) -> Result<String, GatewayError> {
    let Some(candidate) = response.candidates.into_iter().next() else {
        let reason = response
            .prompt_feedback
            .and_then(|f| f.block_reason)
            .map_or_else(|| "no candidates".to_owned(), |r| format!("blocked: {r}"));
        return Err(GatewayError::EmptyResponse {
            model: model.to_owned(),
            reason,
        });
    };

    let text: String = candidate
        .content
        .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
        .unwrap_or_default();

    if text.trim().is_empty() {
        return Err(GatewayError::EmptyResponse {
            model: model.to_owned(),
            reason: candidate
                .finish_reason
                .unwrap_or_else(|| "empty content".to_owned()),
        });
    }

    Ok(text)
}

/// Prefer the API's `error.message`; otherwise a bounded slice of the body.
fn error_message(body: &str) -> String {
    if let Ok(envelope) = serde_json::from_str::<ErrorEnvelope>(body) {
        return envelope.error.message;
    }
    body.chars().take(MAX_ERROR_BODY_CHARS).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(json: &str) -> GeminiResponse {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn endpoint_strips_models_prefix() {
        let client = GeminiClient::with_base_url("k", 5, "http://localhost:9/v1beta/").unwrap();
        assert_eq!(
            client.endpoint("models/gemini-2.5-flash"),
            "http://localhost:9/v1beta/models/gemini-2.5-flash:generateContent"
        );
    }

    #[test]
    fn extract_text_joins_parts() {
        let r = response(
            r#"{"candidates":[{"content":{"parts":[{"text":"{\"a\":"},{"text":"1}"}]}}]}"#,
        );
        assert_eq!(extract_text("m", r).unwrap(), r#"{"a":1}"#);
    }

    #[test]
    fn extract_text_reports_block_reason() {
        let r = response(r#"{"promptFeedback":{"blockReason":"SAFETY"}}"#);
        let err = extract_text("m", r).unwrap_err();
        assert!(
            matches!(err, GatewayError::EmptyResponse { ref reason, .. } if reason == "blocked: SAFETY")
        );
    }

    #[test]
    fn extract_text_rejects_empty_parts() {
        let r = response(r#"{"candidates":[{"content":{"parts":[]},"finishReason":"MAX_TOKENS"}]}"#);
        let err = extract_text("m", r).unwrap_err();
        assert!(
            matches!(err, GatewayError::EmptyResponse { ref reason, .. } if reason == "MAX_TOKENS")
        );
    }

    #[test]
    fn error_message_prefers_api_message() {
        let body = r#"{"error":{"code":429,"message":"Resource has been exhausted","status":"RESOURCE_EXHAUSTED"}}"#;
        assert_eq!(error_message(body), "Resource has been exhausted");
        assert_eq!(error_message("plain failure"), "plain failure");
    }

    #[test]
    fn request_serializes_schema_and_system() {
        let schema = serde_json::json!({"type": "OBJECT"});
        let body = GeminiRequest {
            contents: vec![Content {
                role: Some("user"),
                parts: vec![Part { text: "hi" }],
            }],
            system_instruction: Some(Content {
                role: None,
                parts: vec![Part { text: "be brief" }],
            }),
            generation_config: GenerationConfig {
                temperature: 0.5,
                response_mime_type: Some("application/json"),
                response_schema: Some(&schema),
            },
        };
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["systemInstruction"]["parts"][0]["text"], "be brief");
        assert_eq!(value["generationConfig"]["responseMimeType"], "application/json");
        assert_eq!(value["generationConfig"]["responseSchema"]["type"], "OBJECT");
        assert!(value["systemInstruction"].get("role").is_none());
    }
}
