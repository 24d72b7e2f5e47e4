//! Dialogue orchestration for the palaver chat relay.
//!
//! This crate provides:
//!
//! - **Orchestrator**: the two entry points the event adapter calls,
//!   `get_response` and `reset_history`
//! - **ResponseError / ResetError**: the typed failures those entry points
//!   surface

pub mod error;
pub mod orchestrator;

pub use error::{ResetError, ResponseError};
pub use orchestrator::Orchestrator;
