//! Signals the controller pushes to the login surface.
//!
//! The controller never renders anything. Every user-visible consequence
//! of a submission (field errors, retry status, the final verdict, timer
//! expiries) leaves the actor as an [`AttemptSignal`] through an
//! [`AttemptNotifier`]. A surface renders them; a test collects them.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

use crate::FieldError;

/// Message shown for every rejection once the controller is degraded.
pub const SERVICE_DOWN_MESSAGE: &str =
    "The login service is unavailable. Please try again later.";

// ---------------------------------------------------------------------------
// Rejections
// ---------------------------------------------------------------------------

/// Why a submission ended without a login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RejectReason {
    /// Local validation failed; nothing left the process. One entry per
    /// offending field.
    Validation(Vec<FieldError>),
    /// The rate limiter denied the attempt. `retry_after` is how long
    /// until a slot frees up; [`AttemptSignal::CooldownCleared`] fires
    /// when it does.
    RateLimited { retry_after: Duration },
    /// The backend rejected the credentials.
    InvalidCredentials { message: String },
    /// Transient failures exhausted the retry budget, or the status was
    /// not retryable to begin with.
    RetriesExhausted { message: String },
    /// The backend declared itself down. The controller is degraded from
    /// here on.
    ServiceUnavailable { message: String },
}

impl RejectReason {
    /// Returns `true` when the condition does not clear by retyping:
    /// the surface should lock its submit control (until
    /// [`AttemptSignal::CooldownCleared`] for the rate limit; for good
    /// in the degraded case).
    pub fn is_blocking(&self) -> bool {
        matches!(
            self,
            Self::RateLimited { .. } | Self::ServiceUnavailable { .. }
        )
    }
}

/// The user-facing line for the rejection, ready to render.
impl std::fmt::Display for RejectReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(_) => f.write_str("Please correct the validation errors."),
            Self::RateLimited { retry_after } => write!(
                f,
                "Too many login attempts. Please try again in {} seconds.",
                retry_after.as_secs_f64().ceil() as u64
            ),
            Self::InvalidCredentials { message } => f.write_str(message),
            Self::RetriesExhausted { message } => write!(f, "Login failed: {message}"),
            Self::ServiceUnavailable { .. } => f.write_str(SERVICE_DOWN_MESSAGE),
        }
    }
}

// ---------------------------------------------------------------------------
// Signals
// ---------------------------------------------------------------------------

/// Everything the controller reports back to its surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttemptSignal {
    /// The submission ended without a login. See [`RejectReason`].
    Rejected(RejectReason),
    /// A transient failure is being retried. `attempt` numbers the
    /// failed call (1-based); the next call starts after `delay`.
    RetryScheduled {
        attempt: u32,
        max_retries: u32,
        delay: Duration,
    },
    /// A rate-limit cooldown has elapsed; submissions may be accepted
    /// again. Fires `retry_after` after the matching
    /// [`RejectReason::RateLimited`] rejection.
    CooldownCleared,
    /// Login succeeded and the token went to the session store.
    /// `storage_warning` carries the store's error text if the write
    /// failed; the login still counts.
    Succeeded { storage_warning: Option<String> },
    /// The post-success pause has elapsed; the surface should navigate.
    RedirectReady,
}

// ---------------------------------------------------------------------------
// Notifier
// ---------------------------------------------------------------------------

/// Delivery seam for [`AttemptSignal`]s.
///
/// Must not block: the controller calls it from its own task for every
/// signal, including ones emitted by detached timers after the actor has
/// stopped. Sends into a closed receiver should be dropped silently.
pub trait AttemptNotifier: Send + Sync + 'static {
    /// Delivers one signal.
    fn notify(&self, signal: AttemptSignal);
}

/// The natural test and demo notifier: push every signal into a channel
/// and assert on (or render) the sequence at the other end.
impl AttemptNotifier for mpsc::UnboundedSender<AttemptSignal> {
    fn notify(&self, signal: AttemptSignal) {
        // A dropped receiver just means nobody is watching anymore.
        let _ = self.send(signal);
    }
}
