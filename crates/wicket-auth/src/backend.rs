//! Authentication hook for validating credentials.
//!
//! Wicket does not talk to any identity provider itself. It defines the
//! [`AuthBackend`] trait: one async method that takes the submitted
//! credentials and answers with an [`AuthOutcome`]. You implement it for
//! your provider (an HTTP API, a local user table, the bundled mock) and
//! the attempt controller calls it.

use crate::AuthOutcome;

/// Answers whether a credential pair is valid.
///
/// # Trait bounds
///
/// - `Send + Sync` because the attempt controller calls it from its own
///   task while handles to the controller live elsewhere
/// - `'static` because the backend lives as long as the flow it serves
///
/// # Outcomes, not errors
///
/// `authenticate` is total: it always produces an [`AuthOutcome`]. An
/// implementation folds its own failure modes into the outcome instead of
/// returning a transport error the caller would have to re-classify.
///
/// # Example
///
/// ```
/// use wicket_auth::{AuthBackend, AuthOutcome};
///
/// /// Accepts exactly one hard-wired account. Handy in tests.
/// struct SingleUser;
///
/// impl AuthBackend for SingleUser {
///     async fn authenticate(&self, email: &str, password: &str) -> AuthOutcome {
///         if email == "admin@example.com" && password == "hunter22" {
///             AuthOutcome::Success { token: "session-1".into() }
///         } else {
///             AuthOutcome::InvalidCredentials {
///                 message: "Invalid email or password.".into(),
///             }
///         }
///     }
/// }
/// ```
pub trait AuthBackend: Send + Sync + 'static {
    /// Judges one credential pair.
    ///
    /// Called once per backend attempt, including each retry.
    /// Implementations map their failure modes as follows:
    ///
    /// - recoverable trouble (5xx, timeout) becomes
    ///   [`AuthOutcome::TransientFailure`] so the retry policy can act
    /// - a hard outage becomes [`AuthOutcome::ServiceUnavailable`],
    ///   which degrades the whole flow
    fn authenticate(
        &self,
        email: &str,
        password: &str,
    ) -> impl std::future::Future<Output = AuthOutcome> + Send;
}
