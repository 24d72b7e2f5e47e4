//! Bounded per-user conversation history.
//!
//! Every history starts with the configured system seed and keeps at most
//! `max_turns` further messages. When an append would exceed the bound, the
//! oldest non-system entry is evicted first, so the seed and the most recent
//! exchanges always survive.

use crate::message::{Message, Role};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The ordered message history for a single user.
///
/// Invariants:
/// - the first element is always the system seed, and it is never evicted;
/// - the total length never exceeds `max_turns + 1`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationHistory {
    messages: Vec<Message>,
    max_turns: usize,
    /// When the history last changed.
    pub last_active_at: DateTime<Utc>,
}

impl ConversationHistory {
    /// Creates a history seeded with the system message.
    #[must_use]
    pub fn new(seed: impl Into<String>, max_turns: usize) -> Self {
        Self {
            messages: vec![Message::system(seed)],
            max_turns,
            last_active_at: Utc::now(),
        }
    }

    /// Appends a message, evicting the oldest non-system entries if the
    /// bound would be exceeded.
    pub fn push(&mut self, role: Role, content: impl Into<String>) {
        self.messages.push(Message::new(role, content));
        while self.messages.len() > self.max_turns + 1 {
            // Index 0 is the seed; index 1 is the oldest evictable entry.
            self.messages.remove(1);
        }
        self.last_active_at = Utc::now();
    }

    /// Drops everything but the system seed.
    pub fn reset(&mut self) {
        self.messages.truncate(1);
        self.last_active_at = Utc::now();
    }

    /// Returns the ordered messages, seed first.
    #[must_use]
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Returns the number of messages, seed included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Returns true when only the seed remains.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.len() == 1
    }

    /// Returns the last message, always at least the seed.
    #[must_use]
    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    /// Returns the configured bound on non-seed messages.
    #[must_use]
    pub fn max_turns(&self) -> usize {
        self.max_turns
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEED: &str = "You are a helpful assistant.";

    fn roles(history: &ConversationHistory) -> Vec<Role> {
        history.messages().iter().map(|m| m.role).collect()
    }

    #[test]
    fn new_history_holds_only_the_seed() {
        let history = ConversationHistory::new(SEED, 4);

        assert_eq!(history.len(), 1);
        assert!(history.is_empty());
        assert_eq!(history.messages()[0].role, Role::System);
        assert_eq!(history.messages()[0].content, SEED);
    }

    #[test]
    fn push_appends_in_order() {
        let mut history = ConversationHistory::new(SEED, 4);
        history.push(Role::User, "hi");
        history.push(Role::Assistant, "hello");

        assert_eq!(roles(&history), vec![Role::System, Role::User, Role::Assistant]);
        assert_eq!(history.last().expect("non-empty").content, "hello");
    }

    #[test]
    fn bound_holds_after_many_appends() {
        let mut history = ConversationHistory::new(SEED, 4);
        for i in 0..50 {
            history.push(Role::User, format!("q{i}"));
            history.push(Role::Assistant, format!("a{i}"));
        }

        assert!(history.len() <= 4 + 1);
        assert_eq!(history.messages()[0].content, SEED);
    }

    #[test]
    fn eviction_removes_oldest_non_system_first() {
        let mut history = ConversationHistory::new(SEED, 2);
        history.push(Role::User, "hi");
        history.push(Role::Assistant, "reply1");
        assert_eq!(roles(&history), vec![Role::System, Role::User, Role::Assistant]);

        // Next exchange pushes the oldest pair out piecewise.
        history.push(Role::User, "how are you");
        history.push(Role::Assistant, "reply2");

        assert_eq!(roles(&history), vec![Role::System, Role::User, Role::Assistant]);
        assert_eq!(history.messages()[1].content, "how are you");
        assert_eq!(history.messages()[2].content, "reply2");
    }

    #[test]
    fn seed_survives_zero_turn_bound() {
        let mut history = ConversationHistory::new(SEED, 0);
        history.push(Role::User, "hi");

        assert_eq!(history.len(), 1);
        assert_eq!(history.messages()[0].content, SEED);
    }

    #[test]
    fn reset_keeps_only_the_seed() {
        let mut history = ConversationHistory::new(SEED, 4);
        history.push(Role::User, "hi");
        history.push(Role::Assistant, "hello");

        history.reset();

        assert_eq!(history.len(), 1);
        assert_eq!(history.messages()[0].content, SEED);
    }

    #[test]
    fn reset_is_idempotent() {
        let mut history = ConversationHistory::new(SEED, 4);
        history.push(Role::User, "hi");

        history.reset();
        let after_first: Vec<String> =
            history.messages().iter().map(|m| m.content.clone()).collect();
        history.reset();
        let after_second: Vec<String> =
            history.messages().iter().map(|m| m.content.clone()).collect();

        assert_eq!(after_first, after_second);
    }
}
