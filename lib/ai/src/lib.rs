//! Completion backends for the palaver chat relay.
//!
//! This crate provides:
//!
//! - **CompletionBackend**: the trait a model service implements
//! - **OpenAiBackend**: the OpenAI-compatible HTTP implementation
//! - **DecodingConfig**: model and sampling parameters for a call

pub mod backend;
pub mod error;
pub mod openai;

pub use backend::{ChatMessage, ChatRole, CompletionBackend, DecodingConfig};
pub use error::UpstreamError;
pub use openai::OpenAiBackend;
