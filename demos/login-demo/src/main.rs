//! A terminal rendition of a login page, driven entirely by Wicket.
//!
//! Walks through the stories the toolkit covers: validation errors, a
//! wrong password, tripping the rate limiter and waiting out the
//! cooldown, a flaky backend burning its retries, the real account
//! logging in, and finally an inactivity timeout on the session that
//! follows. Timings are shortened so the whole run takes a few seconds.
//!
//! Run with `RUST_LOG=debug` to watch the controller's own view of
//! events between the page lines.

use std::time::Duration;

use tokio::sync::mpsc;
use wicket::prelude::*;

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

/// Renders one controller signal the way a login page would.
fn render(signal: &AttemptSignal) {
    match signal {
        AttemptSignal::Rejected(RejectReason::Validation(errors)) => {
            println!("  [page] Please correct the validation errors.");
            for error in errors {
                println!("         - {error}");
            }
        }
        AttemptSignal::Rejected(reason) => println!("  [page] {reason}"),
        AttemptSignal::RetryScheduled {
            attempt,
            max_retries,
            ..
        } => println!(
            "  [page] Server connection failed. Retrying (Attempt {attempt}/{max_retries})..."
        ),
        AttemptSignal::CooldownCleared => println!("  [page] login button re-enabled"),
        AttemptSignal::Succeeded { storage_warning } => match storage_warning {
            Some(warning) => println!("  [page] login successful (warning: {warning})"),
            None => println!("  [page] login successful, showing the success modal"),
        },
        AttemptSignal::RedirectReady => println!("  [page] redirecting to the dashboard"),
    }
}

/// Submits once and renders signals until the attempt settles. A
/// rate-limit rejection settles at the cooldown, when the page would
/// re-enable its button.
async fn attempt(
    flow: &LoginFlow,
    signals: &mut mpsc::UnboundedReceiver<AttemptSignal>,
    email: &str,
    password: &str,
) {
    println!("> submit as {email:?}");
    if flow.submit(email, password).await.is_err() {
        println!("  [page] login flow is gone");
        return;
    }

    while let Some(signal) = signals.recv().await {
        render(&signal);
        match signal {
            AttemptSignal::Rejected(RejectReason::RateLimited { .. }) => {
                // Keep draining; CooldownCleared is on its way.
            }
            AttemptSignal::Rejected(_)
            | AttemptSignal::CooldownCleared
            | AttemptSignal::RedirectReady => break,
            _ => {}
        }
    }
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let (signals_tx, mut signals_rx) = mpsc::unbounded_channel();
    let store = MemorySessionStore::new();

    // Short windows and delays so the story plays out quickly.
    let flow = LoginFlow::builder()
        .rate_limit(RateLimitConfig {
            max_attempts: 3,
            window: Duration::from_secs(2),
        })
        .retry(RetryPolicy {
            delay: Duration::from_millis(500),
            ..RetryPolicy::default()
        })
        .success_delay(Duration::from_millis(800))
        .build(
            MockAuthBackend::new().with_latency(Duration::from_millis(300)),
            store.clone(),
            signals_tx,
        );

    println!("-- a submission with nothing filled in");
    attempt(&flow, &mut signals_rx, "", "").await;

    println!("-- the wrong password, three times");
    for _ in 0..3 {
        attempt(&flow, &mut signals_rx, "someone@example.com", "hunter22").await;
    }

    println!("-- a fourth try trips the rate limiter");
    attempt(&flow, &mut signals_rx, "someone@example.com", "hunter22").await;

    println!("-- a flaky backend burns its retries");
    attempt(&flow, &mut signals_rx, "error@simulate.com", "password123").await;

    println!("-- the real account");
    attempt(&flow, &mut signals_rx, "test@correct.com", "password123").await;
    println!("   token in store: {:?}", store.load());

    flow.shutdown().await.ok();

    // After login the session is watched for inactivity. A real app
    // would use minutes; seconds keep the demo moving.
    println!("-- the dashboard session, left alone");
    let (phases_tx, mut phases_rx) = mpsc::unbounded_channel();
    let monitor = spawn_monitor(
        IdleConfig::new(Duration::from_secs(2)).with_grace(Duration::from_secs(1)),
        phases_tx,
    );

    // A couple of interactions, then silence.
    monitor.activity(ActivityKind::PointerMove).ok();
    monitor.activity(ActivityKind::KeyPress).ok();

    while let Some(phase) = phases_rx.recv().await {
        match phase {
            IdlePhase::WarningShown => println!("  [page] session timeout modal shown"),
            IdlePhase::Active => println!("  [page] timeout modal dismissed"),
            IdlePhase::Expired => {
                println!("  [page] session expired, back to the login page");
                break;
            }
        }
    }

    store.clear();
    println!("   token in store after logout: {:?}", store.load());
}
