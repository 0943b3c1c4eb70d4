//! Gemini-compatible completion client.
//!
//! Speaks the `generateContent` endpoint over plain HTTPS. The base URL and
//! model are configurable so compatible gateways can stand in for the real
//! service in development.

use crate::error::{ChatError, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
const DEFAULT_MODEL: &str = "gemini-2.0-flash";
const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Configuration for the Gemini client.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    /// API key for authentication.
    pub api_key: String,

    /// Base URL of the generateContent API.
    pub api_base: String,

    /// Model identifier.
    pub model: String,

    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl GeminiConfig {
    /// Create a new config with the given API key and default settings.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_base: DEFAULT_API_BASE.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Create config from the environment.
    ///
    /// Reads the API key from `GEMINI_API_KEY`; `GEMINI_API_BASE` and
    /// `GEMINI_MODEL` override the defaults when set.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("GEMINI_API_KEY").map_err(|_| ChatError::MissingApiKey)?;

        let mut config = Self::new(api_key);
        if let Ok(api_base) = std::env::var("GEMINI_API_BASE") {
            config.api_base = api_base;
        }
        if let Ok(model) = std::env::var("GEMINI_MODEL") {
            config.model = model;
        }
        Ok(config)
    }

    /// Override the model identifier.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Override the request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }
}

/// Client for a Gemini-compatible `generateContent` endpoint.
#[derive(Debug)]
pub struct GeminiClient {
    config: GeminiConfig,
    client: reqwest::Client,
}

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    text: String,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    candidates: Option<Vec<Candidate>>,
    error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    message: String,
}

impl GeminiClient {
    /// Create a client from an explicit configuration.
    pub fn new(config: GeminiConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        Self { config, client }
    }

    /// Create a client configured from the environment.
    pub fn from_env() -> Result<Self> {
        Ok(Self::new(GeminiConfig::from_env()?))
    }

    /// The configured model identifier.
    pub fn model(&self) -> &str {
        &self.config.model
    }

    /// Send a single prompt and return the model's text.
    pub async fn complete(&self, prompt: &str) -> Result<String> {
        let url = format!(
            "{}/models/{}:generateContent",
            self.config.api_base, self.config.model
        );

        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
        };

        let response = self
            .client
            .post(&url)
            .query(&[("key", self.config.api_key.as_str())])
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let body: GenerateContentResponse = response.json().await?;

        extract_text(body, status.is_success())
    }
}

/// Pull the response text out of a generateContent body.
fn extract_text(body: GenerateContentResponse, http_ok: bool) -> Result<String> {
    if let Some(error) = body.error {
        return Err(ChatError::Api(error.message));
    }
    if !http_ok {
        return Err(ChatError::Api("request rejected by provider".to_string()));
    }

    let text: String = body
        .candidates
        .unwrap_or_default()
        .into_iter()
        .filter_map(|candidate| candidate.content)
        .flat_map(|content| content.parts)
        .map(|part| part.text)
        .collect();

    let text = text.trim().to_string();
    if text.is_empty() {
        return Err(ChatError::EmptyResponse);
    }
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn response(value: serde_json::Value) -> GenerateContentResponse {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_extract_text_joins_parts() {
        let body = response(json!({
            "candidates": [{
                "content": {"parts": [{"text": "The current ratio "}, {"text": "is 2.0."}]}
            }]
        }));
        assert_eq!(
            extract_text(body, true).unwrap(),
            "The current ratio is 2.0."
        );
    }

    #[test]
    fn test_extract_text_provider_error() {
        let body = response(json!({
            "error": {"code": 429, "message": "quota exceeded", "status": "RESOURCE_EXHAUSTED"}
        }));
        let err = extract_text(body, false).unwrap_err();
        assert!(matches!(err, ChatError::Api(msg) if msg == "quota exceeded"));
    }

    #[test]
    fn test_extract_text_empty_candidates() {
        let body = response(json!({"candidates": []}));
        assert!(matches!(
            extract_text(body, true),
            Err(ChatError::EmptyResponse)
        ));
    }

    #[test]
    fn test_config_overrides() {
        let config = GeminiConfig::new("key")
            .with_model("gemini-2.5-pro")
            .with_timeout(10);
        assert_eq!(config.model, "gemini-2.5-pro");
        assert_eq!(config.timeout_secs, 10);
        assert_eq!(config.api_base, DEFAULT_API_BASE);
    }
}
