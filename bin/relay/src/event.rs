//! Inbound event boundary.
//!
//! Platform payloads are validated into a strongly-typed event exactly once,
//! here; malformed input never reaches the orchestrator.

use palaver_core::UserId;
use std::fmt;

/// A validated inbound event from the chat platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundEvent {
    /// The platform-assigned sender.
    pub user_id: UserId,
    /// The raw message text.
    pub text: String,
    /// Whether the sender asked to reset their conversation.
    pub reset: bool,
}

/// Errors from validating an inbound event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventError {
    /// The event carried no user identifier.
    MissingUserId,
    /// The event carried no message text.
    MissingText,
}

impl fmt::Display for EventError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingUserId => write!(f, "event is missing a user id"),
            Self::MissingText => write!(f, "event is missing message text"),
        }
    }
}

impl std::error::Error for EventError {}

impl InboundEvent {
    /// Validates a raw `(user id, text)` pair into an event, recognizing the
    /// `/reset` intent.
    ///
    /// # Errors
    ///
    /// Returns [`EventError`] when either part is empty.
    pub fn parse(user_id: &str, text: &str) -> Result<Self, EventError> {
        let user_id = user_id.trim();
        if user_id.is_empty() {
            return Err(EventError::MissingUserId);
        }
        let text = text.trim();
        if text.is_empty() {
            return Err(EventError::MissingText);
        }
        Ok(Self {
            user_id: UserId::new(user_id),
            text: text.to_string(),
            reset: text == "/reset",
        })
    }

    /// Parses a console line of the form `user_id<TAB>text`.
    ///
    /// # Errors
    ///
    /// Returns [`EventError`] when the line has no tab separator or either
    /// part is empty.
    pub fn parse_line(line: &str) -> Result<Self, EventError> {
        match line.split_once('\t') {
            Some((user_id, text)) => Self::parse(user_id, text),
            None => Err(EventError::MissingText),
        }
    }
}
