//! Error types for session storage.

/// Errors a [`SessionStore`](crate::SessionStore) can report from `save`.
///
/// A storage failure is a warning, not a login failure: the attempt
/// controller completes the login anyway and attaches the error text to
/// the success signal.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// The underlying storage rejected the write or is not reachable.
    #[error("session storage unavailable: {0}")]
    Unavailable(String),

    /// The storage refused the token for lack of space.
    #[error("session storage quota exceeded")]
    QuotaExceeded,
}
