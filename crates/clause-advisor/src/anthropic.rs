//! Anthropic Client
//!
//! Oracle implementation for the Anthropic Messages API.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use crate::error::AdvisorError;
use crate::oracle::Oracle;

/// Default Anthropic model
pub const DEFAULT_MODEL: &str = "claude-3-haiku-20240307";

const MESSAGES_URL: &str = "https://api.anthropic.com/v1/messages";
const API_VERSION: &str = "2023-06-01";

#[derive(Deserialize)]
struct ContentBlock {
    text: Option<String>,
}

#[derive(Deserialize)]
struct ApiResponse {
    content: Vec<ContentBlock>,
}

/// Anthropic Claude API client
#[derive(Clone)]
pub struct AnthropicClient {
    api_key: String,
    client: reqwest::Client,
    model: String,
}

impl AnthropicClient {
    /// Create a client; the model comes from `ANTHROPIC_MODEL` when set
    pub fn new(api_key: String, timeout: Duration) -> Result<Self, AdvisorError> {
        let model = std::env::var("ANTHROPIC_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        Self::with_model(api_key, &model, timeout)
    }

    /// Create with a specific model
    pub fn with_model(api_key: String, model: &str, timeout: Duration) -> Result<Self, AdvisorError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            api_key,
            client,
            model: model.to_string(),
        })
    }

    /// Create from environment variables
    pub fn from_env(timeout: Duration) -> Result<Self, AdvisorError> {
        let api_key = std::env::var("ANTHROPIC_API_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| {
                AdvisorError::Unavailable("ANTHROPIC_API_KEY environment variable not set".to_string())
            })?;
        Self::new(api_key, timeout)
    }

    fn request_body(&self, prompt: &str, max_tokens: u32) -> serde_json::Value {
        serde_json::json!({
            "model": &self.model,
            "max_tokens": max_tokens,
            "messages": [{"role": "user", "content": prompt}]
        })
    }
}

/// First text block of a Messages API response
fn first_text(response: ApiResponse) -> Result<String, AdvisorError> {
    response
        .content
        .into_iter()
        .find_map(|block| block.text)
        .filter(|text| !text.trim().is_empty())
        .ok_or(AdvisorError::EmptyResponse)
}

#[async_trait]
impl Oracle for AnthropicClient {
    async fn complete(&self, prompt: &str, max_tokens: u32) -> Result<String, AdvisorError> {
        let response = self
            .client
            .post(MESSAGES_URL)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", API_VERSION)
            .header("content-type", "application/json")
            .json(&self.request_body(prompt, max_tokens))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(AdvisorError::Api { status, body });
        }

        let api_response: ApiResponse = response.json().await?;
        first_text(api_response)
    }

    fn model_name(&self) -> &str {
        &self.model
    }

    fn provider_name(&self) -> &str {
        "Anthropic"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_model() {
        let client = AnthropicClient::with_model(
            "test-key".to_string(),
            "claude-3-opus",
            Duration::from_secs(5),
        )
        .unwrap();
        assert_eq!(client.model_name(), "claude-3-opus");
        assert_eq!(client.provider_name(), "Anthropic");
    }

    #[test]
    fn test_request_body_is_single_turn() {
        let client =
            AnthropicClient::with_model("k".to_string(), DEFAULT_MODEL, Duration::from_secs(5))
                .unwrap();
        let body = client.request_body("Select clauses", 2000);

        assert_eq!(body["model"], DEFAULT_MODEL);
        assert_eq!(body["max_tokens"], 2000);
        assert_eq!(body["messages"].as_array().map(Vec::len), Some(1));
        assert_eq!(body["messages"][0]["role"], "user");
        assert_eq!(body["messages"][0]["content"], "Select clauses");
    }

    #[test]
    fn test_first_text_block() {
        let response: ApiResponse = serde_json::from_str(
            r#"{"content": [{"type": "text", "text": "{\"rating\": 4}"}]}"#,
        )
        .unwrap();
        assert_eq!(first_text(response).unwrap(), "{\"rating\": 4}");

        let empty: ApiResponse = serde_json::from_str(r#"{"content": []}"#).unwrap();
        assert!(matches!(first_text(empty), Err(AdvisorError::EmptyResponse)));
    }
}
