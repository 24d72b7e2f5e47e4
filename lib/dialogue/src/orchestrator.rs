//! Dialogue orchestration.
//!
//! The orchestrator owns the conversation store and a completion backend,
//! and turns one inbound user message into one outbound reply. A user's
//! entry lock is held across the whole append, complete, append unit, so
//! overlapping requests from one user serialize while unrelated users run
//! in parallel.

use crate::error::{ResetError, ResponseError};
use palaver_ai::{ChatMessage, ChatRole, CompletionBackend};
use palaver_conversation::{ConversationStore, Message, Role};
use palaver_core::UserId;
use std::sync::Arc;
use std::time::Instant;

fn to_chat_messages(messages: &[Message]) -> Vec<ChatMessage> {
    messages
        .iter()
        .map(|m| ChatMessage {
            role: match m.role {
                Role::System => ChatRole::System,
                Role::User => ChatRole::User,
                Role::Assistant => ChatRole::Assistant,
            },
            content: m.content.clone(),
        })
        .collect()
}

/// Turns inbound user messages into replies, maintaining per-user context.
pub struct Orchestrator {
    store: ConversationStore,
    backend: Arc<dyn CompletionBackend>,
}

impl Orchestrator {
    /// Creates an orchestrator over the given store and backend.
    #[must_use]
    pub fn new(store: ConversationStore, backend: Arc<dyn CompletionBackend>) -> Self {
        Self { store, backend }
    }

    /// Records the user's message, asks the backend for a reply with the
    /// accumulated history, records the reply, and returns it.
    ///
    /// # Errors
    ///
    /// Returns [`ResponseError::Upstream`] when the completion call fails.
    /// The user's turn stays recorded either way, preserving retry context;
    /// a failed call never leaves a dangling assistant turn.
    pub async fn get_response(
        &self,
        user_id: &UserId,
        text: impl Into<String>,
    ) -> Result<String, ResponseError> {
        let entry = self.store.entry(user_id).await;
        // Held for the whole exchange: serializes this user's requests.
        let mut history = entry.lock().await;

        history.push(Role::User, text);
        let prompt = to_chat_messages(history.messages());

        let started = Instant::now();
        match self.backend.complete(&prompt).await {
            Ok(reply) => {
                tracing::info!(
                    user = %user_id,
                    latency_ms = started.elapsed().as_millis() as u64,
                    "completion succeeded"
                );
                history.push(Role::Assistant, reply.clone());
                Ok(reply)
            }
            Err(source) => {
                tracing::warn!(user = %user_id, error = %source, "completion failed");
                Err(ResponseError::Upstream { source })
            }
        }
    }

    /// Resets the user's history to just the system seed. Resetting a user
    /// with no history is a successful no-op.
    ///
    /// # Errors
    ///
    /// Returns [`ResetError`] only on an unexpected internal fault.
    pub async fn reset_history(&self, user_id: &UserId) -> Result<(), ResetError> {
        self.store.reset(user_id).await;
        tracing::info!(user = %user_id, "conversation reset");
        Ok(())
    }

    /// Returns a snapshot of the user's history.
    pub async fn history(&self, user_id: &UserId) -> Vec<Message> {
        self.store.history(user_id).await
    }

    /// Returns the store's seed message.
    #[must_use]
    pub fn seed(&self) -> &str {
        self.store.seed()
    }
}
