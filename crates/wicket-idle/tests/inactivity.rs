//! Integration tests for the inactivity monitor.
//!
//! All tests run under a paused Tokio clock, so thresholds measured in
//! minutes still run instantly and every elapsed assertion is exact.

use std::time::Duration;

use tokio::sync::mpsc;
use wicket_idle::{ActivityKind, IdleConfig, IdlePhase, spawn_monitor};

// =========================================================================
// Helpers
// =========================================================================

type PhaseRx = mpsc::UnboundedReceiver<IdlePhase>;

fn config_60s() -> IdleConfig {
    IdleConfig::new(Duration::from_secs(60))
}

async fn next_phase(rx: &mut PhaseRx) -> IdlePhase {
    tokio::time::timeout(Duration::from_secs(3600), rx.recv())
        .await
        .expect("timed out waiting for a phase change")
        .expect("notifier channel closed")
}

async fn advance(secs: u64) {
    tokio::time::advance(Duration::from_secs(secs)).await;
}

// =========================================================================
// Configuration
// =========================================================================

#[test]
fn test_new_config_uses_conventional_defaults() {
    let config = IdleConfig::new(Duration::from_secs(30 * 60));
    assert_eq!(config.threshold, Duration::from_secs(30 * 60));
    assert_eq!(config.grace, Duration::from_secs(5));
    assert_eq!(config.watched, ActivityKind::ALL.to_vec());
}

#[test]
fn test_builder_overrides() {
    let config = IdleConfig::new(Duration::from_secs(60))
        .with_grace(Duration::from_secs(10))
        .with_watched(vec![ActivityKind::KeyPress]);
    assert_eq!(config.grace, Duration::from_secs(10));
    assert_eq!(config.watched, vec![ActivityKind::KeyPress]);
}

// =========================================================================
// Phase walk
// =========================================================================

#[tokio::test(start_paused = true)]
async fn test_warning_fires_after_threshold_of_silence() {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let _monitor = spawn_monitor(config_60s(), tx);

    let start = tokio::time::Instant::now();
    assert_eq!(next_phase(&mut rx).await, IdlePhase::WarningShown);
    assert_eq!(start.elapsed(), Duration::from_secs(60));
}

#[tokio::test(start_paused = true)]
async fn test_expiry_fires_grace_after_the_warning() {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let _monitor = spawn_monitor(config_60s(), tx);

    let start = tokio::time::Instant::now();
    assert_eq!(next_phase(&mut rx).await, IdlePhase::WarningShown);
    assert_eq!(next_phase(&mut rx).await, IdlePhase::Expired);
    // Exactly threshold + grace of total silence.
    assert_eq!(start.elapsed(), Duration::from_secs(65));
}

#[tokio::test(start_paused = true)]
async fn test_activity_resets_the_clock() {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let monitor = spawn_monitor(config_60s(), tx);

    let start = tokio::time::Instant::now();
    advance(30).await;
    monitor.activity(ActivityKind::PointerMove).unwrap();

    // The warning moves out to 30s + a fresh threshold.
    assert_eq!(next_phase(&mut rx).await, IdlePhase::WarningShown);
    assert_eq!(start.elapsed(), Duration::from_secs(90));
}

#[tokio::test(start_paused = true)]
async fn test_each_activity_pushes_the_deadline_again() {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let monitor = spawn_monitor(config_60s(), tx);

    let start = tokio::time::Instant::now();
    for _ in 0..3 {
        advance(45).await;
        monitor.activity(ActivityKind::KeyPress).unwrap();
    }

    // Last activity at t = 135s; silence from there.
    assert_eq!(next_phase(&mut rx).await, IdlePhase::WarningShown);
    assert_eq!(start.elapsed(), Duration::from_secs(195));
}

#[tokio::test(start_paused = true)]
async fn test_activity_during_warning_resumes_the_session() {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let monitor = spawn_monitor(config_60s(), tx);

    let start = tokio::time::Instant::now();
    assert_eq!(next_phase(&mut rx).await, IdlePhase::WarningShown);

    // The user comes back inside the grace period.
    monitor.activity(ActivityKind::Click).unwrap();
    assert_eq!(next_phase(&mut rx).await, IdlePhase::Active);

    // The expiry that was pending at t = 65s never happens; the next
    // transition is a fresh warning a full threshold later.
    assert_eq!(next_phase(&mut rx).await, IdlePhase::WarningShown);
    assert_eq!(start.elapsed(), Duration::from_secs(120));

    assert_eq!(next_phase(&mut rx).await, IdlePhase::Expired);
    assert_eq!(start.elapsed(), Duration::from_secs(125));
}

#[tokio::test(start_paused = true)]
async fn test_unwatched_activity_does_not_reset() {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let config = config_60s().with_watched(vec![ActivityKind::KeyPress]);
    let monitor = spawn_monitor(config, tx);

    let start = tokio::time::Instant::now();
    advance(30).await;
    monitor.activity(ActivityKind::PointerMove).unwrap();
    monitor.activity(ActivityKind::Click).unwrap();

    // Unwatched kinds are ignored, so the warning still fires on the
    // original schedule.
    assert_eq!(next_phase(&mut rx).await, IdlePhase::WarningShown);
    assert_eq!(start.elapsed(), Duration::from_secs(60));
}

#[tokio::test(start_paused = true)]
async fn test_zero_threshold_warns_immediately() {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let _monitor = spawn_monitor(
        IdleConfig::new(Duration::ZERO).with_grace(Duration::from_secs(5)),
        tx,
    );

    let start = tokio::time::Instant::now();
    assert_eq!(next_phase(&mut rx).await, IdlePhase::WarningShown);
    assert_eq!(start.elapsed(), Duration::ZERO);
    assert_eq!(next_phase(&mut rx).await, IdlePhase::Expired);
    assert_eq!(start.elapsed(), Duration::from_secs(5));
}

// =========================================================================
// Lifecycle
// =========================================================================

#[tokio::test(start_paused = true)]
async fn test_phase_accessor_tracks_the_walk() {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let monitor = spawn_monitor(config_60s(), tx);

    assert_eq!(monitor.phase().await.unwrap(), IdlePhase::Active);

    assert_eq!(next_phase(&mut rx).await, IdlePhase::WarningShown);
    assert_eq!(monitor.phase().await.unwrap(), IdlePhase::WarningShown);
}

#[tokio::test(start_paused = true)]
async fn test_expired_monitor_stops_accepting() {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let monitor = spawn_monitor(config_60s(), tx);

    assert_eq!(next_phase(&mut rx).await, IdlePhase::WarningShown);
    assert_eq!(next_phase(&mut rx).await, IdlePhase::Expired);

    assert!(monitor.activity(ActivityKind::Click).is_err());
    assert!(monitor.phase().await.is_err());
}

#[tokio::test(start_paused = true)]
async fn test_shutdown_stops_the_monitor() {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let monitor = spawn_monitor(config_60s(), tx);

    monitor.shutdown().unwrap();

    // Commands queued behind the shutdown are dropped unanswered.
    assert!(monitor.phase().await.is_err());
    assert!(monitor.activity(ActivityKind::Click).is_err());

    // No phase ever fires; the channel just closes.
    assert_eq!(rx.recv().await, None);
}
