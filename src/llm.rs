use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::time::timeout;
use tracing::{debug, error, warn};

use crate::TARGET_LLM_REQUEST;

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 120;

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("failed to reach the generative service: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("generative service error: {0}")]
    Service(String),
    #[error("generative service did not respond within {0} seconds")]
    Timeout(u64),
}

/// Single round trip against a hosted text-generation service. The
/// orchestrator only depends on this seam, so tests can script responses.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(
        &self,
        api_key: &str,
        prompt: &str,
        use_search_grounding: bool,
    ) -> Result<String, LlmError>;
}

#[derive(Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tools: Option<Vec<Tool>>,
    #[serde(rename = "generationConfig", skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Serialize)]
struct Content<'a> {
    role: &'a str,
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Serialize)]
struct Tool {
    google_search: serde_json::Value,
}

#[derive(Serialize)]
struct GenerationConfig {
    temperature: f32,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
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
struct ErrorEnvelope {
    error: Option<ErrorBody>,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// Client for the Gemini `generateContent` REST API. The credential is
/// passed per call and travels in a request header, never in the URL, so
/// transport errors and logs cannot carry it.
#[derive(Clone)]
pub struct GeminiClient {
    http: Client,
    model: String,
    temperature: Option<f32>,
    request_timeout: Duration,
}

impl GeminiClient {
    pub fn new(model: impl Into<String>, temperature: Option<f32>, request_timeout: Duration) -> Self {
        Self {
            http: Client::new(),
            model: model.into(),
            temperature,
            request_timeout,
        }
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn generate(
        &self,
        api_key: &str,
        prompt: &str,
        use_search_grounding: bool,
    ) -> Result<String, LlmError> {
        let body = GenerateContentRequest {
            contents: vec![Content {
                role: "user",
                parts: vec![Part { text: prompt }],
            }],
            tools: use_search_grounding.then(|| {
                vec![Tool {
                    google_search: serde_json::json!({}),
                }]
            }),
            generation_config: self
                .temperature
                .map(|temperature| GenerationConfig { temperature }),
        };
        let url = format!("{}/models/{}:generateContent", GEMINI_API_BASE, self.model);

        debug!(
            target: TARGET_LLM_REQUEST,
            "Sending generateContent request to {} ({} prompt chars, grounding: {})",
            self.model,
            prompt.chars().count(),
            use_search_grounding
        );

        let round_trip = async {
            let response = self
                .http
                .post(&url)
                .header("x-goog-api-key", api_key)
                .json(&body)
                .send()
                .await?;

            let status = response.status();
            if !status.is_success() {
                let payload = response.text().await.unwrap_or_default();
                let message = service_error_message(status.as_u16(), &payload);
                error!(
                    target: TARGET_LLM_REQUEST,
                    "Generative service rejected the request: {}", message
                );
                return Err(LlmError::Service(message));
            }

            let parsed: GenerateContentResponse = response.json().await?;
            Ok(response_text(parsed))
        };

        match timeout(self.request_timeout, round_trip).await {
            Ok(Ok(text)) => {
                debug!(
                    target: TARGET_LLM_REQUEST,
                    "Received {} characters from {}",
                    text.chars().count(),
                    self.model
                );
                Ok(text)
            }
            Ok(Err(e)) => Err(e),
            Err(_) => {
                warn!(
                    target: TARGET_LLM_REQUEST,
                    "Request to {} timed out after {} seconds",
                    self.model,
                    self.request_timeout.as_secs()
                );
                Err(LlmError::Timeout(self.request_timeout.as_secs()))
            }
        }
    }
}

/// An absent or empty response body is an empty-text success, not a failure.
fn response_text(response: GenerateContentResponse) -> String {
    response
        .candidates
        .into_iter()
        .next()
        .and_then(|candidate| candidate.content)
        .map(|content| {
            content
                .parts
                .into_iter()
                .filter_map(|part| part.text)
                .collect::<Vec<_>>()
                .join("")
        })
        .unwrap_or_default()
}

fn service_error_message(status: u16, payload: &str) -> String {
    serde_json::from_str::<ErrorEnvelope>(payload)
        .ok()
        .and_then(|envelope| envelope.error)
        .and_then(|body| body.message)
        .unwrap_or_else(|| format!("HTTP {}", status))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(payload: &str) -> GenerateContentResponse {
        serde_json::from_str(payload).unwrap()
    }

    #[test]
    fn concatenates_candidate_text_parts() {
        let response = parse(
            r####"{"candidates":[{"content":{"parts":[{"text":"### SEO Meta Data\n"},{"text":"body"}]}}]}"####,
        );
        assert_eq!(response_text(response), "### SEO Meta Data\nbody");
    }

    #[test]
    fn missing_candidates_is_empty_success() {
        assert_eq!(response_text(parse("{}")), "");
        assert_eq!(response_text(parse(r#"{"candidates":[]}"#)), "");
        assert_eq!(response_text(parse(r#"{"candidates":[{}]}"#)), "");
    }

    #[test]
    fn extracts_service_error_message() {
        let payload = r#"{"error":{"code":400,"message":"API key not valid","status":"INVALID_ARGUMENT"}}"#;
        assert_eq!(service_error_message(400, payload), "API key not valid");
    }

    #[test]
    fn falls_back_to_status_code_on_opaque_error_body() {
        assert_eq!(service_error_message(503, "<html>whoops</html>"), "HTTP 503");
        assert_eq!(service_error_message(500, r#"{"error":{}}"#), "HTTP 500");
    }

    #[test]
    fn grounding_tool_only_serialized_when_requested() {
        let grounded = GenerateContentRequest {
            contents: vec![],
            tools: Some(vec![Tool {
                google_search: serde_json::json!({}),
            }]),
            generation_config: None,
        };
        let body = serde_json::to_value(&grounded).unwrap();
        assert_eq!(body["tools"][0]["google_search"], serde_json::json!({}));

        let plain = GenerateContentRequest {
            contents: vec![],
            tools: None,
            generation_config: None,
        };
        let body = serde_json::to_value(&plain).unwrap();
        assert!(body.get("tools").is_none());
        assert!(body.get("generationConfig").is_none());
    }
}
