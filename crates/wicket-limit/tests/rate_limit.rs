//! Integration tests for the sliding-window rate limiter.
//!
//! The limiter takes explicit `Instant`s, so every test builds its own
//! timeline from a single base instant. No clocks, no sleeping.

use std::time::{Duration, Instant};

use wicket_limit::{RateLimitConfig, RateLimiter, Verdict};

// =========================================================================
// Helpers
// =========================================================================

fn secs(s: u64) -> Duration {
    Duration::from_secs(s)
}

fn limiter_5_per_minute() -> RateLimiter {
    RateLimiter::new(RateLimitConfig {
        max_attempts: 5,
        window: secs(60),
    })
}

/// Charges `count` attempts spaced one second apart starting at `start`.
fn charge_spaced(limiter: &mut RateLimiter, start: Instant, count: u64) {
    for i in 0..count {
        limiter.record_attempt(start + secs(i));
    }
}

// =========================================================================
// Configuration
// =========================================================================

#[test]
fn test_default_config_allows_five_per_minute() {
    let config = RateLimitConfig::default();
    assert_eq!(config.max_attempts, 5);
    assert_eq!(config.window, secs(60));
}

#[test]
fn test_validated_raises_zero_max_attempts() {
    let config = RateLimitConfig {
        max_attempts: 0,
        window: secs(60),
    }
    .validated();
    assert_eq!(config.max_attempts, 1);
}

#[test]
fn test_validated_raises_zero_window() {
    let config = RateLimitConfig {
        max_attempts: 5,
        window: Duration::ZERO,
    }
    .validated();
    assert_eq!(config.window, secs(1));
}

#[test]
fn test_validated_keeps_sane_values() {
    let config = RateLimitConfig {
        max_attempts: 3,
        window: secs(30),
    }
    .validated();
    assert_eq!(config.max_attempts, 3);
    assert_eq!(config.window, secs(30));
}

// =========================================================================
// Evaluation
// =========================================================================

#[test]
fn test_evaluate_with_no_history_allows() {
    let mut limiter = limiter_5_per_minute();
    assert!(limiter.evaluate(Instant::now()).is_allowed());
}

#[test]
fn test_evaluate_below_limit_allows() {
    let mut limiter = limiter_5_per_minute();
    let t0 = Instant::now();
    charge_spaced(&mut limiter, t0, 4);
    assert!(limiter.evaluate(t0 + secs(4)).is_allowed());
}

#[test]
fn test_evaluate_at_limit_denies() {
    let mut limiter = limiter_5_per_minute();
    let t0 = Instant::now();
    charge_spaced(&mut limiter, t0, 5);

    match limiter.evaluate(t0 + secs(5)) {
        Verdict::Denied { retry_after } => assert_eq!(retry_after, secs(55)),
        Verdict::Allowed => panic!("fifth charge should trip the limiter"),
    }
}

#[test]
fn test_retry_after_counts_down_as_time_passes() {
    let mut limiter = limiter_5_per_minute();
    let t0 = Instant::now();
    charge_spaced(&mut limiter, t0, 5);

    // The oldest charge is at t0, so the wait is 60s minus elapsed.
    for elapsed in [5u64, 20, 40, 59] {
        match limiter.evaluate(t0 + secs(elapsed)) {
            Verdict::Denied { retry_after } => {
                assert_eq!(retry_after, secs(60 - elapsed), "at t0+{elapsed}s");
            }
            Verdict::Allowed => panic!("expected denial at t0+{elapsed}s"),
        }
    }
}

#[test]
fn test_attempts_age_out_at_window_boundary() {
    let mut limiter = RateLimiter::new(RateLimitConfig {
        max_attempts: 1,
        window: secs(60),
    });
    let t0 = Instant::now();
    limiter.record_attempt(t0);

    assert!(!limiter.evaluate(t0 + secs(59)).is_allowed());
    // At exactly one window of age the charge no longer counts.
    assert!(limiter.evaluate(t0 + secs(60)).is_allowed());
}

#[test]
fn test_partial_expiry_frees_a_slot() {
    let mut limiter = RateLimiter::new(RateLimitConfig {
        max_attempts: 2,
        window: secs(60),
    });
    let t0 = Instant::now();
    limiter.record_attempt(t0);
    limiter.record_attempt(t0 + secs(30));

    assert!(!limiter.evaluate(t0 + secs(45)).is_allowed());
    // The t0 charge has aged out; only the t0+30s one remains.
    assert!(limiter.evaluate(t0 + secs(60)).is_allowed());
}

#[test]
fn test_denial_does_not_extend_the_lockout() {
    let mut limiter = limiter_5_per_minute();
    let t0 = Instant::now();
    charge_spaced(&mut limiter, t0, 5);

    // Repeated denied evaluations add nothing to the history.
    assert!(!limiter.evaluate(t0 + secs(5)).is_allowed());
    assert!(!limiter.evaluate(t0 + secs(6)).is_allowed());
    assert_eq!(limiter.in_window(t0 + secs(6)), 5);

    // The t0 charge still ages out on the original schedule.
    assert!(limiter.evaluate(t0 + secs(60)).is_allowed());
}

// =========================================================================
// Inspection
// =========================================================================

#[test]
fn test_in_window_counts_only_recent_charges() {
    let mut limiter = limiter_5_per_minute();
    let t0 = Instant::now();
    limiter.record_attempt(t0);
    limiter.record_attempt(t0 + secs(10));

    assert_eq!(limiter.in_window(t0 + secs(10)), 2);
    assert_eq!(limiter.in_window(t0 + secs(65)), 1);
    assert_eq!(limiter.in_window(t0 + secs(75)), 0);
}

#[test]
fn test_config_accessor_reflects_validation() {
    let limiter = RateLimiter::new(RateLimitConfig {
        max_attempts: 0,
        window: secs(60),
    });
    assert_eq!(limiter.config().max_attempts, 1);
}
