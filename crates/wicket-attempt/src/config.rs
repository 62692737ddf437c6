//! Controller configuration and the submission state machine.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use wicket_limit::RateLimitConfig;

// ---------------------------------------------------------------------------
// RetryPolicy
// ---------------------------------------------------------------------------

/// How transient backend failures are retried.
///
/// Retries are per submission and bounded. They are unrelated to the rate
/// limiter's window: a submission that burns its whole retry budget is
/// charged once, not once per call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryPolicy {
    /// Extra backend calls after the first one fails. The backend sees
    /// at most `1 + max_retries` calls per submission.
    pub max_retries: u32,
    /// Fixed pause between consecutive calls.
    pub delay: Duration,
    /// Status codes worth retrying. Any other transient status is
    /// terminal on first sight.
    pub retryable_statuses: Vec<u16>,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            delay: Duration::from_secs(2),
            retryable_statuses: vec![500],
        }
    }
}

impl RetryPolicy {
    /// Whether a transient failure with this status may be retried.
    pub fn is_retryable(&self, status: u16) -> bool {
        self.retryable_statuses.contains(&status)
    }
}

// ---------------------------------------------------------------------------
// ControllerConfig
// ---------------------------------------------------------------------------

/// Full configuration for the attempt controller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ControllerConfig {
    /// Sliding-window limit on charged attempts.
    pub rate_limit: RateLimitConfig,
    /// Transient-failure retry behavior.
    pub retry: RetryPolicy,
    /// Pause between the success signal and the redirect signal. The
    /// surface shows its success state for this long before navigating.
    pub success_delay: Duration,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            rate_limit: RateLimitConfig::default(),
            retry: RetryPolicy::default(),
            success_delay: Duration::from_secs(2),
        }
    }
}

impl ControllerConfig {
    /// Clamps out-of-range values.
    ///
    /// [`spawn_controller`](crate::spawn_controller) calls this; the only
    /// rules today live in [`RateLimitConfig::validated`].
    pub fn validated(mut self) -> Self {
        self.rate_limit = self.rate_limit.validated();
        self
    }
}

// ---------------------------------------------------------------------------
// ControllerState
// ---------------------------------------------------------------------------

/// Lifecycle state of the attempt controller.
///
/// ```text
///             submit              transient failure
///    Idle ──────────→ Submitting ──────────→ AwaitingRetry
///     ↑                  │   ↑                     │
///     │ terminal outcome │   └─────────────────────┘
///     └──────────────────┘        delay elapsed
///
///    Submitting ──(ServiceUnavailable)──→ Degraded   (sticky)
/// ```
///
/// - **Idle**: no submission in flight; `submit` is accepted.
/// - **Submitting**: a backend call is running. `retries` counts the
///   retries consumed so far (0 on the first call).
/// - **AwaitingRetry**: the previous call failed transiently; the
///   controller is sitting out the retry delay. `retries` numbers the
///   retry about to run.
/// - **Degraded**: the backend declared itself unavailable. Submissions
///   are rejected locally without touching the backend, for the life of
///   the controller.
///
/// While Submitting or AwaitingRetry, further `submit` calls are ignored,
/// not queued.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ControllerState {
    Idle,
    Submitting { retries: u32 },
    AwaitingRetry { retries: u32 },
    Degraded,
}

impl ControllerState {
    /// Returns `true` while a submission is in flight (backend call
    /// running or retry pending).
    pub fn is_busy(&self) -> bool {
        matches!(self, Self::Submitting { .. } | Self::AwaitingRetry { .. })
    }

    /// Returns `true` once the backend has been declared unavailable.
    pub fn is_degraded(&self) -> bool {
        matches!(self, Self::Degraded)
    }
}

impl std::fmt::Display for ControllerState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Idle => write!(f, "Idle"),
            Self::Submitting { retries } => write!(f, "Submitting({retries})"),
            Self::AwaitingRetry { retries } => write!(f, "AwaitingRetry({retries})"),
            Self::Degraded => write!(f, "Degraded"),
        }
    }
}
