//! The attempt controller actor.
//!
//! One isolated Tokio task owns the whole submission pipeline: the
//! lifecycle state, the rate limiter, and the backend, store, and
//! notifier capabilities. The outside world talks to it through a
//! [`ControllerHandle`]; it answers through the
//! [`AttemptNotifier`](crate::AttemptNotifier). Owning everything in one
//! task is what serializes concurrent submits without a lock.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::{mpsc, oneshot};
use tokio::time::Instant as TokioInstant;
use tracing::{debug, info, warn};
use wicket_auth::{AuthBackend, AuthOutcome, SessionStore};
use wicket_limit::{RateLimiter, Verdict};

use crate::{
    AttemptError, AttemptNotifier, AttemptSignal, ControllerConfig,
    ControllerState, RejectReason, RetryPolicy, SERVICE_DOWN_MESSAGE,
    validate_credentials,
};

/// Commands queued ahead of the actor. Submissions are small, so a modest
/// buffer is plenty; a full buffer only ever means a stuck actor.
const COMMAND_BUFFER: usize = 32;

// ---------------------------------------------------------------------------
// Messages
// ---------------------------------------------------------------------------

/// Commands sent to the controller through its handle.
enum ControllerCommand {
    /// Submit a credential pair.
    Submit { email: String, password: String },
    /// Request the current lifecycle state.
    GetState {
        reply: oneshot::Sender<ControllerState>,
    },
    /// Stop the actor.
    Shutdown,
}

/// Progress reports from the in-flight attempt task back to the actor.
enum AttemptEvent {
    /// A retryable failure; the task is waiting out the delay before
    /// retry number `attempt`.
    RetryWait { attempt: u32 },
    /// The delay elapsed; the retry is starting.
    RetryStart { attempt: u32 },
    /// The attempt reached a terminal outcome.
    Finished { outcome: AuthOutcome },
}

// ---------------------------------------------------------------------------
// Handle
// ---------------------------------------------------------------------------

/// Handle to a running attempt controller. Cheap to clone.
///
/// Submissions are fire-and-forget: `submit` returns once the command is
/// queued, and every consequence arrives as an
/// [`AttemptSignal`](crate::AttemptSignal) at the notifier.
#[derive(Clone)]
pub struct ControllerHandle {
    sender: mpsc::Sender<ControllerCommand>,
}

impl ControllerHandle {
    /// Queues a submission.
    pub async fn submit(&self, email: &str, password: &str) -> Result<(), AttemptError> {
        self.sender
            .send(ControllerCommand::Submit {
                email: email.to_string(),
                password: password.to_string(),
            })
            .await
            .map_err(|_| AttemptError::Unavailable)
    }

    /// Current lifecycle state.
    pub async fn state(&self) -> Result<ControllerState, AttemptError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.sender
            .send(ControllerCommand::GetState { reply: reply_tx })
            .await
            .map_err(|_| AttemptError::Unavailable)?;
        reply_rx.await.map_err(|_| AttemptError::Unavailable)
    }

    /// Stops the controller. Detached timers (cooldown, redirect pacing)
    /// still deliver their signals.
    pub async fn shutdown(&self) -> Result<(), AttemptError> {
        self.sender
            .send(ControllerCommand::Shutdown)
            .await
            .map_err(|_| AttemptError::Unavailable)
    }
}

/// Spawns the attempt controller task and returns a handle to it.
///
/// The capabilities move into the actor. Keep a clone of anything you
/// need to inspect later, the way
/// [`MemorySessionStore`](wicket_auth::MemorySessionStore) clones share
/// one slot.
pub fn spawn_controller<B, S, N>(
    config: ControllerConfig,
    backend: B,
    store: S,
    notifier: N,
) -> ControllerHandle
where
    B: AuthBackend,
    S: SessionStore,
    N: AttemptNotifier,
{
    let (tx, rx) = mpsc::channel(COMMAND_BUFFER);
    let (events_tx, events_rx) = mpsc::unbounded_channel();

    let config = config.validated();
    let limiter = RateLimiter::new(config.rate_limit.clone());

    let actor = AttemptController {
        config,
        state: ControllerState::Idle,
        limiter,
        backend: Arc::new(backend),
        store,
        notifier: Arc::new(notifier),
        commands: rx,
        events_tx,
        events_rx,
    };

    tokio::spawn(actor.run());

    ControllerHandle { sender: tx }
}

// ---------------------------------------------------------------------------
// Actor
// ---------------------------------------------------------------------------

struct AttemptController<B, S, N> {
    config: ControllerConfig,
    state: ControllerState,
    limiter: RateLimiter,
    backend: Arc<B>,
    store: S,
    notifier: Arc<N>,
    commands: mpsc::Receiver<ControllerCommand>,
    /// Cloned into each attempt task; the matching receiver is below.
    events_tx: mpsc::UnboundedSender<AttemptEvent>,
    events_rx: mpsc::UnboundedReceiver<AttemptEvent>,
}

impl<B, S, N> AttemptController<B, S, N>
where
    B: AuthBackend,
    S: SessionStore,
    N: AttemptNotifier,
{
    async fn run(mut self) {
        info!(
            max_attempts = self.config.rate_limit.max_attempts,
            max_retries = self.config.retry.max_retries,
            "attempt controller started"
        );

        loop {
            tokio::select! {
                cmd = self.commands.recv() => match cmd {
                    Some(ControllerCommand::Submit { email, password }) => {
                        self.handle_submit(email, password);
                    }
                    Some(ControllerCommand::GetState { reply }) => {
                        let _ = reply.send(self.state);
                    }
                    Some(ControllerCommand::Shutdown) | None => break,
                },
                Some(event) = self.events_rx.recv() => {
                    self.handle_event(event);
                }
            }
        }

        info!(state = %self.state, "attempt controller stopped");
    }

    fn handle_submit(&mut self, email: String, password: String) {
        if self.state.is_busy() {
            debug!(state = %self.state, "submission already in flight, ignoring");
            return;
        }

        if self.state.is_degraded() {
            debug!("degraded, rejecting without a backend call");
            self.notifier.notify(AttemptSignal::Rejected(
                RejectReason::ServiceUnavailable {
                    message: SERVICE_DOWN_MESSAGE.to_string(),
                },
            ));
            return;
        }

        if let Err(errors) = validate_credentials(&email, &password) {
            debug!(fields = errors.len(), "validation failed");
            self.notifier
                .notify(AttemptSignal::Rejected(RejectReason::Validation(errors)));
            return;
        }

        if let Verdict::Denied { retry_after } = self.limiter.evaluate(now()) {
            info!(retry_after_ms = retry_after.as_millis() as u64, "rate limited");
            self.notifier
                .notify(AttemptSignal::Rejected(RejectReason::RateLimited {
                    retry_after,
                }));
            self.spawn_cooldown(retry_after);
            return;
        }

        // The backend sees the trimmed email; the password goes verbatim.
        let email = email.trim().to_string();

        self.state = ControllerState::Submitting { retries: 0 };
        info!("submission accepted, calling backend");

        tokio::spawn(run_attempt(
            Arc::clone(&self.backend),
            email,
            password,
            self.config.retry.clone(),
            self.events_tx.clone(),
        ));
    }

    fn handle_event(&mut self, event: AttemptEvent) {
        match event {
            AttemptEvent::RetryWait { attempt } => {
                self.state = ControllerState::AwaitingRetry { retries: attempt };
                info!(
                    attempt,
                    max_retries = self.config.retry.max_retries,
                    delay_ms = self.config.retry.delay.as_millis() as u64,
                    "transient failure, retry scheduled"
                );
                self.notifier.notify(AttemptSignal::RetryScheduled {
                    attempt,
                    max_retries: self.config.retry.max_retries,
                    delay: self.config.retry.delay,
                });
            }
            AttemptEvent::RetryStart { attempt } => {
                self.state = ControllerState::Submitting { retries: attempt };
                debug!(attempt, "retrying backend call");
            }
            AttemptEvent::Finished { outcome } => self.handle_outcome(outcome),
        }
    }

    fn handle_outcome(&mut self, outcome: AuthOutcome) {
        match outcome {
            AuthOutcome::Success { token } => {
                // A success is never charged against the rate limit.
                let storage_warning = match self.store.save(&token) {
                    Ok(()) => None,
                    Err(e) => {
                        warn!(error = %e, "token not stored, login succeeds anyway");
                        Some(e.to_string())
                    }
                };
                self.state = ControllerState::Idle;
                info!("login succeeded");
                self.notifier
                    .notify(AttemptSignal::Succeeded { storage_warning });
                self.spawn_redirect_delay();
            }
            AuthOutcome::InvalidCredentials { message } => {
                self.limiter.record_attempt(now());
                self.state = ControllerState::Idle;
                info!("credentials rejected");
                self.notifier.notify(AttemptSignal::Rejected(
                    RejectReason::InvalidCredentials { message },
                ));
            }
            AuthOutcome::TransientFailure { status, message } => {
                // Terminal here: the attempt task already spent the retry
                // budget, or the status was never retryable.
                self.limiter.record_attempt(now());
                self.state = ControllerState::Idle;
                warn!(status, "transient failure is terminal");
                self.notifier.notify(AttemptSignal::Rejected(
                    RejectReason::RetriesExhausted { message },
                ));
            }
            AuthOutcome::ServiceUnavailable { message } => {
                self.limiter.record_attempt(now());
                self.state = ControllerState::Degraded;
                warn!("backend declared unavailable, controller degraded");
                self.notifier.notify(AttemptSignal::Rejected(
                    RejectReason::ServiceUnavailable { message },
                ));
            }
        }
    }

    /// The cooldown timer runs detached so its signal still fires if the
    /// actor shuts down mid-wait.
    fn spawn_cooldown(&self, retry_after: Duration) {
        let notifier = Arc::clone(&self.notifier);
        tokio::spawn(async move {
            tokio::time::sleep(retry_after).await;
            notifier.notify(AttemptSignal::CooldownCleared);
        });
    }

    /// Same detachment as the cooldown: once a login succeeded, the
    /// redirect signal is owed no matter what happens to the actor.
    fn spawn_redirect_delay(&self) {
        let delay = self.config.success_delay;
        let notifier = Arc::clone(&self.notifier);
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            notifier.notify(AttemptSignal::RedirectReady);
        });
    }
}

// ---------------------------------------------------------------------------
// The attempt task
// ---------------------------------------------------------------------------

/// One submission against the backend, including the retry loop.
///
/// Runs in its own task so the actor keeps servicing commands (and can
/// ignore re-entrant submits) while a call or a retry delay is pending.
/// Progress goes back over the event channel; the actor owns all state
/// changes and signals.
async fn run_attempt<B: AuthBackend>(
    backend: Arc<B>,
    email: String,
    password: String,
    retry: RetryPolicy,
    events: mpsc::UnboundedSender<AttemptEvent>,
) {
    let mut used_retries = 0u32;
    loop {
        let outcome = backend.authenticate(&email, &password).await;
        match outcome {
            AuthOutcome::TransientFailure { status, .. }
                if retry.is_retryable(status) && used_retries < retry.max_retries =>
            {
                used_retries += 1;
                if events
                    .send(AttemptEvent::RetryWait {
                        attempt: used_retries,
                    })
                    .is_err()
                {
                    // Actor is gone; nothing left to report to.
                    return;
                }
                tokio::time::sleep(retry.delay).await;
                let _ = events.send(AttemptEvent::RetryStart {
                    attempt: used_retries,
                });
            }
            outcome => {
                let _ = events.send(AttemptEvent::Finished { outcome });
                return;
            }
        }
    }
}

/// Rate-limit timestamps come from the Tokio clock so paused test time
/// flows through the whole pipeline.
fn now() -> Instant {
    TokioInstant::now().into_std()
}
