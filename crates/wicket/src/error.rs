//! Unified error type for the Wicket toolkit.

use wicket_attempt::AttemptError;
use wicket_auth::StorageError;
use wicket_idle::IdleError;

/// Top-level error that wraps all crate-specific errors.
///
/// When using the `wicket` meta-crate you deal with this single type
/// instead of importing errors from each sub-crate. The `#[from]`
/// attributes generate the `From` impls, so `?` converts sub-crate
/// errors automatically.
#[derive(Debug, thiserror::Error)]
pub enum WicketError {
    /// An attempt-controller error (handle calls after shutdown).
    #[error(transparent)]
    Attempt(#[from] AttemptError),

    /// An inactivity-monitor error (handle calls after expiry or
    /// shutdown).
    #[error(transparent)]
    Idle(#[from] IdleError),

    /// A session-storage error, for callers that bubble store failures
    /// through their own flows.
    #[error(transparent)]
    Storage(#[from] StorageError),
}
