//! OpenAI-compatible completion backend.
//!
//! Issues a single `POST {base_url}/chat/completions` per call. Works
//! against api.openai.com and any API-compatible service reachable over
//! HTTP.

use crate::backend::{ChatMessage, ChatRole, CompletionBackend, DecodingConfig};
use crate::error::UpstreamError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Completion backend speaking the OpenAI chat-completions protocol.
pub struct OpenAiBackend {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    config: DecodingConfig,
    timeout: Duration,
}

impl OpenAiBackend {
    /// Creates a backend against api.openai.com.
    #[must_use]
    pub fn new(api_key: impl Into<String>, config: DecodingConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            config,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Creates a backend against a custom base URL (Azure OpenAI or any
    /// compatible service).
    #[must_use]
    pub fn with_base_url(
        api_key: impl Into<String>,
        config: DecodingConfig,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.into(),
            base_url: base_url.into(),
            config,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Sets the per-request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Returns the base URL requests are sent to.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn build_request(&self, messages: &[ChatMessage]) -> ChatCompletionRequest {
        ChatCompletionRequest {
            model: self.config.model.clone(),
            messages: messages.iter().map(WireMessage::from).collect(),
            max_tokens: Some(self.config.max_tokens),
            temperature: Some(self.config.temperature),
            stop: if self.config.stop.is_empty() {
                None
            } else {
                Some(self.config.stop.clone())
            },
        }
    }
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<WireMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    stop: Option<Vec<String>>,
}

#[derive(Debug, Serialize)]
struct WireMessage {
    role: &'static str,
    content: String,
}

impl From<&ChatMessage> for WireMessage {
    fn from(message: &ChatMessage) -> Self {
        Self {
            role: match message.role {
                ChatRole::System => "system",
                ChatRole::User => "user",
                ChatRole::Assistant => "assistant",
            },
            content: message.content.clone(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    message: String,
}

#[async_trait]
impl CompletionBackend for OpenAiBackend {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String, UpstreamError> {
        let url = format!("{}/chat/completions", self.base_url);
        let request = self.build_request(messages);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .timeout(self.timeout)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    UpstreamError::Timeout
                } else {
                    UpstreamError::RequestFailed {
                        reason: e.to_string(),
                    }
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiError>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(UpstreamError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let completion: ChatCompletionResponse =
            response
                .json()
                .await
                .map_err(|e| UpstreamError::MalformedResponse {
                    reason: e.to_string(),
                })?;

        let choice = completion
            .choices
            .into_iter()
            .next()
            .ok_or(UpstreamError::EmptyChoices)?;

        let content = choice
            .message
            .content
            .ok_or_else(|| UpstreamError::MalformedResponse {
                reason: "choice carried no content".to_string(),
            })?;

        tracing::debug!(model = %self.config.model, chars = content.len(), "completion received");

        Ok(content.trim().to_string())
    }

    fn model(&self) -> &str {
        &self.config.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn backend() -> OpenAiBackend {
        OpenAiBackend::new("test-key", DecodingConfig::new("gpt-4o-mini"))
    }

    #[test]
    fn default_base_url() {
        assert_eq!(backend().base_url(), "https://api.openai.com/v1");
    }

    #[test]
    fn custom_base_url() {
        let backend = OpenAiBackend::with_base_url(
            "test-key",
            DecodingConfig::new("local-model"),
            "http://localhost:11434/v1",
        );
        assert_eq!(backend.base_url(), "http://localhost:11434/v1");
    }

    #[test]
    fn request_body_shape() {
        let backend = OpenAiBackend::new(
            "test-key",
            DecodingConfig::new("gpt-4o-mini")
                .with_max_tokens(128)
                .with_temperature(0.2),
        );
        let messages = vec![
            ChatMessage::system("You are a helpful assistant."),
            ChatMessage::user("hi"),
        ];

        let body = serde_json::to_value(backend.build_request(&messages)).expect("serialize");

        assert_eq!(body["model"], "gpt-4o-mini");
        assert_eq!(body["max_tokens"], 128);
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][1]["role"], "user");
        assert_eq!(body["messages"][1]["content"], "hi");
        // No stop sequences configured, so the field is omitted entirely.
        assert!(body.get("stop").is_none());
    }

    #[test]
    fn stop_sequences_serialize_when_present() {
        let backend = OpenAiBackend::new(
            "test-key",
            DecodingConfig::new("gpt-4o-mini").with_stop("END"),
        );

        let body =
            serde_json::to_value(backend.build_request(&[ChatMessage::user("hi")]))
                .expect("serialize");

        assert_eq!(body["stop"][0], "END");
    }

    #[test]
    fn api_error_body_parses() {
        let body = r#"{"error":{"message":"invalid api key","type":"auth"}}"#;
        let parsed: ApiError = serde_json::from_str(body).expect("parse");
        assert_eq!(parsed.error.message, "invalid api key");
    }

    #[test]
    fn model_accessor() {
        assert_eq!(backend().model(), "gpt-4o-mini");
    }
}
