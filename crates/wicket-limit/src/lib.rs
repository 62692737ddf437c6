//! Sliding-window rate limiting for Wicket.
//!
//! Tracks recent login attempts and denies new ones once a configurable
//! number has accumulated inside a rolling window. The limiter never reads
//! a clock: every operation takes an explicit `now`, so the caller decides
//! the time source and tests can replay any schedule they like.
//!
//! # Integration
//!
//! The limiter is a plain value, owned by a single task (in Wicket, the
//! attempt controller). Evaluation and recording are separate steps
//! because an attempt is only charged once its outcome is known:
//!
//! ```
//! use std::time::Instant;
//! use wicket_limit::{RateLimitConfig, RateLimiter, Verdict};
//!
//! let mut limiter = RateLimiter::new(RateLimitConfig::default());
//! let now = Instant::now();
//! assert!(matches!(limiter.evaluate(now), Verdict::Allowed));
//! // ... the attempt runs and terminally fails ...
//! limiter.record_attempt(now);
//! ```

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tracing::warn;

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Configuration for the sliding-window rate limiter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLimitConfig {
    /// Maximum charged attempts allowed inside the window.
    pub max_attempts: u32,
    /// Length of the rolling window.
    pub window: Duration,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            window: Duration::from_secs(60),
        }
    }
}

impl RateLimitConfig {
    /// Clamps out-of-range values so the config is safe to use.
    ///
    /// Called by [`RateLimiter::new`]. Rules:
    /// - `max_attempts` of 0 is raised to 1 (0 would deny every login)
    /// - a zero `window` is raised to one second
    pub fn validated(mut self) -> Self {
        if self.max_attempts == 0 {
            warn!("max_attempts of 0 would deny every login, clamping to 1");
            self.max_attempts = 1;
        }
        if self.window.is_zero() {
            warn!("rate limit window of zero, clamping to 1s");
            self.window = Duration::from_secs(1);
        }
        self
    }
}

// ---------------------------------------------------------------------------
// Verdict
// ---------------------------------------------------------------------------

/// The limiter's answer for a prospective attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// The attempt may proceed.
    Allowed,
    /// Too many recent attempts. `retry_after` is how long until the
    /// oldest charged attempt leaves the window and frees a slot.
    Denied { retry_after: Duration },
}

impl Verdict {
    /// Returns `true` if the attempt may proceed.
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allowed)
    }
}

// ---------------------------------------------------------------------------
// RateLimiter
// ---------------------------------------------------------------------------

/// Sliding-window attempt limiter.
///
/// Holds the timestamps of recently charged attempts, oldest first. One
/// limiter per login surface; it is not shared across tasks.
#[derive(Debug, Clone)]
pub struct RateLimiter {
    config: RateLimitConfig,
    /// Charged attempt timestamps, oldest at the front.
    attempts: VecDeque<Instant>,
}

impl RateLimiter {
    /// Creates a limiter with the given config (validated first).
    pub fn new(config: RateLimitConfig) -> Self {
        Self {
            config: config.validated(),
            attempts: VecDeque::new(),
        }
    }

    /// The active configuration.
    pub fn config(&self) -> &RateLimitConfig {
        &self.config
    }

    /// Charges an attempt at `now`.
    ///
    /// Only terminally failed attempts are charged; the caller decides
    /// which outcomes count. Successes and attempts that never reached
    /// the backend are not recorded.
    pub fn record_attempt(&mut self, now: Instant) {
        self.attempts.push_back(now);
    }

    /// Judges a prospective attempt at `now`.
    ///
    /// Prunes attempts that have aged out of the window, then denies if
    /// the survivors have reached `max_attempts`. Exactly `max_attempts`
    /// in-window entries already means denial. Evaluation never charges:
    /// a denied attempt does not extend its own lockout.
    pub fn evaluate(&mut self, now: Instant) -> Verdict {
        self.prune(now);

        if self.attempts.len() < self.config.max_attempts as usize {
            return Verdict::Allowed;
        }

        // The oldest survivor defines when a slot frees up.
        let oldest = self.attempts.front().copied().unwrap_or(now);
        let retry_after = self
            .config
            .window
            .saturating_sub(now.saturating_duration_since(oldest));
        Verdict::Denied { retry_after }
    }

    /// Number of charged attempts still inside the window at `now`.
    ///
    /// Read-only; does not prune.
    pub fn in_window(&self, now: Instant) -> usize {
        self.attempts
            .iter()
            .filter(|t| now.saturating_duration_since(**t) < self.config.window)
            .count()
    }

    fn prune(&mut self, now: Instant) {
        while let Some(front) = self.attempts.front() {
            if now.saturating_duration_since(*front) >= self.config.window {
                self.attempts.pop_front();
            } else {
                break;
            }
        }
    }
}
