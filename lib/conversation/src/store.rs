//! In-memory store mapping users to their conversation histories.
//!
//! Entries are created lazily on first append and live for the process
//! lifetime. Each user's history sits behind its own lock, so overlapping
//! requests from one user serialize while unrelated users proceed in
//! parallel. The outer map lock is only ever held to look up or insert an
//! entry, never across a suspension point.

use crate::history::ConversationHistory;
use crate::message::{Message, Role};
use palaver_core::UserId;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Shared handle to one user's history.
pub type HistoryHandle = Arc<Mutex<ConversationHistory>>;

/// Per-user conversation storage, seeded with a fixed system message.
#[derive(Debug)]
pub struct ConversationStore {
    seed: String,
    max_turns: usize,
    entries: Mutex<HashMap<UserId, HistoryHandle>>,
}

impl ConversationStore {
    /// Creates a store where every new history starts from `seed` and keeps
    /// at most `max_turns` messages beyond it.
    #[must_use]
    pub fn new(seed: impl Into<String>, max_turns: usize) -> Self {
        Self {
            seed: seed.into(),
            max_turns,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Returns the user's history entry, creating a seeded one if the user
    /// is unseen. Callers that need to span several operations atomically
    /// hold the returned entry's lock for the whole unit.
    pub async fn entry(&self, user_id: &UserId) -> HistoryHandle {
        let mut entries = self.entries.lock().await;
        entries
            .entry(user_id.clone())
            .or_insert_with(|| {
                Arc::new(Mutex::new(ConversationHistory::new(
                    self.seed.clone(),
                    self.max_turns,
                )))
            })
            .clone()
    }

    /// Appends a message to the user's history, creating it if needed and
    /// enforcing the bound.
    pub async fn append(&self, user_id: &UserId, role: Role, content: impl Into<String>) {
        let entry = self.entry(user_id).await;
        let mut history = entry.lock().await;
        history.push(role, content);
    }

    /// Returns a snapshot of the user's history, seed first. Unseen users
    /// get an empty snapshot; reading never creates an entry.
    pub async fn history(&self, user_id: &UserId) -> Vec<Message> {
        let entry = {
            let entries = self.entries.lock().await;
            entries.get(user_id).cloned()
        };
        match entry {
            Some(entry) => entry.lock().await.messages().to_vec(),
            None => Vec::new(),
        }
    }

    /// Resets the user's history to just the seed. A no-op for unseen
    /// users; no entry is created. Idempotent.
    pub async fn reset(&self, user_id: &UserId) {
        let entry = {
            let entries = self.entries.lock().await;
            entries.get(user_id).cloned()
        };
        if let Some(entry) = entry {
            entry.lock().await.reset();
        }
    }

    /// Returns true if the user has a history entry.
    pub async fn known(&self, user_id: &UserId) -> bool {
        self.entries.lock().await.contains_key(user_id)
    }

    /// Returns the number of users with a history entry.
    pub async fn user_count(&self) -> usize {
        self.entries.lock().await.len()
    }

    /// Returns the configured system seed.
    #[must_use]
    pub fn seed(&self) -> &str {
        &self.seed
    }

    /// Returns the configured bound on non-seed messages per user.
    #[must_use]
    pub fn max_turns(&self) -> usize {
        self.max_turns
    }
}
