//! Completion backend abstraction.
//!
//! A backend turns an ordered message history into generated text with one
//! live external call. No caching, no internal retries; determinism is not
//! guaranteed (temperature is above zero by default).

use crate::error::UpstreamError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// The role of a chat message sent to the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    /// System instruction.
    System,
    /// User/human message.
    User,
    /// Assistant/AI message.
    Assistant,
}

/// A role-tagged message in the shape the completion API consumes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    /// The role of the message sender.
    pub role: ChatRole,
    /// The content of the message.
    pub content: String,
}

impl ChatMessage {
    /// Creates a system message.
    #[must_use]
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::System,
            content: content.into(),
        }
    }

    /// Creates a user message.
    #[must_use]
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }

    /// Creates an assistant message.
    #[must_use]
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.into(),
        }
    }
}

/// Decoding parameters for a completion call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecodingConfig {
    /// Model identifier, selects the backend model.
    pub model: String,
    /// Cap on generated tokens.
    pub max_tokens: u32,
    /// Sampling randomness in [0, 1].
    pub temperature: f32,
    /// Truncation markers.
    pub stop: Vec<String>,
}

impl DecodingConfig {
    /// Creates a configuration for the given model with default decoding
    /// parameters.
    #[must_use]
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            max_tokens: 256,
            temperature: 0.5,
            stop: Vec::new(),
        }
    }

    /// Sets the generated-token cap.
    #[must_use]
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Sets the sampling temperature.
    #[must_use]
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Adds a stop sequence.
    #[must_use]
    pub fn with_stop(mut self, stop: impl Into<String>) -> Self {
        self.stop.push(stop.into());
        self
    }
}

/// Trait for completion backends.
///
/// Implementations are stateless per call and must not retry internally.
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    /// Sends the ordered message history to the model and returns the top
    /// choice's text, trimmed of leading and trailing whitespace.
    ///
    /// # Errors
    ///
    /// Returns [`UpstreamError`] when the call fails, times out, or yields
    /// an empty or malformed choice list.
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String, UpstreamError>;

    /// Returns the model identifier this backend targets.
    fn model(&self) -> &str;
}
