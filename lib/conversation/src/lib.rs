//! Conversation state for the palaver chat relay.
//!
//! This crate provides:
//!
//! - **Message**: role-tagged conversation entries
//! - **ConversationHistory**: the bounded, seed-first history for one user
//! - **ConversationStore**: lazy per-user storage with per-user locking

pub mod history;
pub mod message;
pub mod store;

pub use history::ConversationHistory;
pub use message::{Message, Role};
pub use store::{ConversationStore, HistoryHandle};
