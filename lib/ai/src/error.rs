//! Error types for the ai crate.

use std::fmt;

/// Errors from the external completion call.
///
/// The caller decides whether to surface or retry; this crate never retries
/// internally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpstreamError {
    /// The request could not be sent or the connection failed.
    RequestFailed { reason: String },
    /// The request timed out.
    Timeout,
    /// The service answered with a non-success status.
    Api { status: u16, message: String },
    /// The service answered successfully but returned no choices.
    EmptyChoices,
    /// The response body could not be interpreted.
    MalformedResponse { reason: String },
}

impl fmt::Display for UpstreamError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RequestFailed { reason } => {
                write!(f, "completion request failed: {reason}")
            }
            Self::Timeout => write!(f, "completion request timed out"),
            Self::Api { status, message } => {
                write!(f, "completion service error ({status}): {message}")
            }
            Self::EmptyChoices => write!(f, "completion service returned no choices"),
            Self::MalformedResponse { reason } => {
                write!(f, "failed to parse completion response: {reason}")
            }
        }
    }
}

impl std::error::Error for UpstreamError {}
