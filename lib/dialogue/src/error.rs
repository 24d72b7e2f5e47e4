//! Error types for the dialogue crate.
//!
//! Both entry points return concrete typed errors the event adapter can
//! render. `Display` text is safe to show to end users; the underlying
//! cause is available through `std::error::Error::source`.

use palaver_ai::UpstreamError;
use std::fmt;

/// Errors from producing a reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponseError {
    /// The external completion call failed. The user's turn stays recorded
    /// so a retry keeps its context.
    Upstream { source: UpstreamError },
}

impl fmt::Display for ResponseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Upstream { .. } => {
                write!(f, "the assistant is unavailable right now, please try again")
            }
        }
    }
}

impl std::error::Error for ResponseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Upstream { source } => Some(source),
        }
    }
}

/// Errors from resetting a history.
///
/// "No history to reset" is success, not an error; this only covers
/// unexpected internal faults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResetError {
    /// Storage misbehaved while resetting.
    StorageFailed { reason: String },
}

impl fmt::Display for ResetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StorageFailed { reason } => {
                write!(f, "failed to reset conversation: {reason}")
            }
        }
    }
}

impl std::error::Error for ResetError {}
