//! The classified result of a backend authentication call.

use serde::{Deserialize, Serialize};

/// What the authentication backend concluded about one credential pair.
///
/// Every call produces exactly one outcome. Transport problems are folded
/// into [`TransientFailure`](Self::TransientFailure) or
/// [`ServiceUnavailable`](Self::ServiceUnavailable) by the backend
/// implementation rather than surfacing through a separate error channel,
/// so the attempt controller can classify outcomes without inspecting
/// anything deeper.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AuthOutcome {
    /// Credentials accepted. `token` is the session token to store.
    Success { token: String },
    /// Credentials rejected. Terminal; retrying cannot help.
    InvalidCredentials { message: String },
    /// The backend failed in a way that may heal (HTTP 5xx, timeouts).
    /// `status` lets the retry policy decide whether to try again.
    TransientFailure { status: u16, message: String },
    /// The service declared itself down. Terminal and sticky: the
    /// controller degrades and stops calling the backend.
    ServiceUnavailable { message: String },
}

impl AuthOutcome {
    /// Returns `true` for [`Success`](Self::Success).
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }
}

/// Variant name only. Safe for logging: never includes the token or the
/// user-facing message.
impl std::fmt::Display for AuthOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Success { .. } => write!(f, "Success"),
            Self::InvalidCredentials { .. } => write!(f, "InvalidCredentials"),
            Self::TransientFailure { status, .. } => {
                write!(f, "TransientFailure({status})")
            }
            Self::ServiceUnavailable { .. } => write!(f, "ServiceUnavailable"),
        }
    }
}
