//! Inactivity monitoring for Wicket.
//!
//! Watches for user activity and walks a session through
//! `Active → WarningShown → Expired` when none arrives. Activity during
//! the warning rescues the session; expiry is final.
//!
//! The monitor is deliberately not self-arming: call [`spawn_monitor`]
//! when a session actually starts (after login), never on the login
//! surface itself.
//!
//! # Integration
//!
//! ```no_run
//! use std::time::Duration;
//! use tokio::sync::mpsc;
//! use wicket_idle::{ActivityKind, IdleConfig, IdlePhase, spawn_monitor};
//!
//! # async fn demo() -> Result<(), wicket_idle::IdleError> {
//! let (phases_tx, mut phases_rx) = mpsc::unbounded_channel();
//! let monitor = spawn_monitor(IdleConfig::new(Duration::from_secs(30 * 60)), phases_tx);
//!
//! // Input pump, called from event handlers:
//! monitor.activity(ActivityKind::PointerMove)?;
//!
//! // Phase consumer:
//! while let Some(phase) = phases_rx.recv().await {
//!     match phase {
//!         IdlePhase::WarningShown => { /* show the timeout modal */ }
//!         IdlePhase::Active => { /* dismiss it, the user came back */ }
//!         IdlePhase::Expired => { /* end the session */ }
//!     }
//! }
//! # Ok(())
//! # }
//! ```

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::sync::{mpsc, oneshot};
use tokio::time::{self, Instant as TokioInstant};
use tracing::{info, trace};

// ---------------------------------------------------------------------------
// Activity and phases
// ---------------------------------------------------------------------------

/// A kind of user activity the monitor can watch.
///
/// Mirrors the input events a graphical surface captures document-wide;
/// a different surface maps its own inputs onto whichever of these fit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActivityKind {
    PointerMove,
    KeyPress,
    Scroll,
    Click,
    TouchStart,
}

impl ActivityKind {
    /// Every kind, in a fixed order. The default watch list.
    pub const ALL: [ActivityKind; 5] = [
        ActivityKind::PointerMove,
        ActivityKind::KeyPress,
        ActivityKind::Scroll,
        ActivityKind::Click,
        ActivityKind::TouchStart,
    ];
}

/// Where the session stands.
///
/// ```text
///   Active ──(threshold of silence)──→ WarningShown ──(grace)──→ Expired
///     ↑                                      │
///     └────────────(watched activity)────────┘
/// ```
///
/// Expired is final: the monitor task stops, and only a fresh
/// [`spawn_monitor`] starts a new cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IdlePhase {
    /// Activity seen recently; nothing to show.
    Active,
    /// The threshold elapsed with no activity. The surface warns the
    /// user; the grace clock is running.
    WarningShown,
    /// The grace period also elapsed. The session is over.
    Expired,
}

impl IdlePhase {
    /// Returns `true` once the session is over.
    pub fn is_expired(&self) -> bool {
        matches!(self, Self::Expired)
    }
}

impl std::fmt::Display for IdlePhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Active => write!(f, "Active"),
            Self::WarningShown => write!(f, "WarningShown"),
            Self::Expired => write!(f, "Expired"),
        }
    }
}

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Configuration for the inactivity monitor.
///
/// There is no `Default`: the threshold is the product decision that
/// defines the feature, so callers choose it explicitly. [`new`](Self::new)
/// fills in the conventional grace period and watch list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdleConfig {
    /// Silence needed before the warning fires.
    pub threshold: Duration,
    /// Extra time after the warning before the session expires.
    pub grace: Duration,
    /// Which activity kinds reset the clock. Kinds not listed are
    /// ignored entirely.
    pub watched: Vec<ActivityKind>,
}

impl IdleConfig {
    /// Conventional grace period between the warning and expiry.
    pub const DEFAULT_GRACE: Duration = Duration::from_secs(5);

    /// Config with the given threshold, the default grace, and every
    /// [`ActivityKind`] watched.
    pub fn new(threshold: Duration) -> Self {
        Self {
            threshold,
            grace: Self::DEFAULT_GRACE,
            watched: ActivityKind::ALL.to_vec(),
        }
    }

    /// Overrides the grace period.
    pub fn with_grace(mut self, grace: Duration) -> Self {
        self.grace = grace;
        self
    }

    /// Watches only the given kinds.
    pub fn with_watched(mut self, watched: Vec<ActivityKind>) -> Self {
        self.watched = watched;
        self
    }
}

// ---------------------------------------------------------------------------
// Notifier and errors
// ---------------------------------------------------------------------------

/// Delivery seam for phase changes.
///
/// Called from the monitor task on every transition, including the
/// return to [`IdlePhase::Active`] when activity lands during the
/// warning (a surface needs that one to dismiss its warning).
pub trait IdleNotifier: Send + Sync + 'static {
    /// Delivers one phase change.
    fn phase_changed(&self, phase: IdlePhase);
}

impl IdleNotifier for mpsc::UnboundedSender<IdlePhase> {
    fn phase_changed(&self, phase: IdlePhase) {
        let _ = self.send(phase);
    }
}

/// Errors surfaced by [`IdleHandle`] calls.
#[derive(Debug, thiserror::Error)]
pub enum IdleError {
    /// The monitor task is not running: the session expired or the
    /// monitor was shut down.
    #[error("inactivity monitor is not running")]
    Stopped,
}

// ---------------------------------------------------------------------------
// Handle
// ---------------------------------------------------------------------------

enum MonitorCommand {
    Activity { kind: ActivityKind },
    GetPhase { reply: oneshot::Sender<IdlePhase> },
    Shutdown,
}

/// Handle to a running inactivity monitor. Cheap to clone.
#[derive(Clone)]
pub struct IdleHandle {
    sender: mpsc::UnboundedSender<MonitorCommand>,
}

impl IdleHandle {
    /// Reports one activity event.
    ///
    /// Synchronous and non-blocking, so an input pump can call it
    /// straight from its event handlers at any rate.
    pub fn activity(&self, kind: ActivityKind) -> Result<(), IdleError> {
        self.sender
            .send(MonitorCommand::Activity { kind })
            .map_err(|_| IdleError::Stopped)
    }

    /// Current phase.
    pub async fn phase(&self) -> Result<IdlePhase, IdleError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.sender
            .send(MonitorCommand::GetPhase { reply: reply_tx })
            .map_err(|_| IdleError::Stopped)?;
        reply_rx.await.map_err(|_| IdleError::Stopped)
    }

    /// Stops the monitor without expiring the session.
    pub fn shutdown(&self) -> Result<(), IdleError> {
        self.sender
            .send(MonitorCommand::Shutdown)
            .map_err(|_| IdleError::Stopped)
    }
}

/// Spawns the inactivity monitor task and returns a handle to it.
///
/// The clock starts immediately: with no activity at all, the warning
/// fires `threshold` after this call and expiry `grace` later.
pub fn spawn_monitor<N: IdleNotifier>(config: IdleConfig, notifier: N) -> IdleHandle {
    let (tx, rx) = mpsc::unbounded_channel();

    let deadline = TokioInstant::now() + config.threshold;
    let monitor = IdleMonitor {
        config,
        phase: IdlePhase::Active,
        deadline,
        notifier,
        commands: rx,
    };

    tokio::spawn(monitor.run());

    IdleHandle { sender: tx }
}

// ---------------------------------------------------------------------------
// Actor
// ---------------------------------------------------------------------------

struct IdleMonitor<N> {
    config: IdleConfig,
    phase: IdlePhase,
    /// When the next phase transition is due.
    deadline: TokioInstant,
    notifier: N,
    commands: mpsc::UnboundedReceiver<MonitorCommand>,
}

impl<N: IdleNotifier> IdleMonitor<N> {
    async fn run(mut self) {
        info!(
            threshold_ms = self.config.threshold.as_millis() as u64,
            grace_ms = self.config.grace.as_millis() as u64,
            "inactivity monitor started"
        );

        loop {
            tokio::select! {
                cmd = self.commands.recv() => match cmd {
                    Some(MonitorCommand::Activity { kind }) => self.handle_activity(kind),
                    Some(MonitorCommand::GetPhase { reply }) => {
                        let _ = reply.send(self.phase);
                    }
                    Some(MonitorCommand::Shutdown) | None => break,
                },
                _ = time::sleep_until(self.deadline) => {
                    if self.handle_deadline() {
                        break;
                    }
                }
            }
        }

        info!(phase = %self.phase, "inactivity monitor stopped");
    }

    fn handle_activity(&mut self, kind: ActivityKind) {
        if !self.config.watched.contains(&kind) {
            trace!(?kind, "unwatched activity, ignoring");
            return;
        }

        match self.phase {
            IdlePhase::Active => {
                self.deadline = TokioInstant::now() + self.config.threshold;
                trace!(?kind, "activity, timer reset");
            }
            IdlePhase::WarningShown => {
                self.phase = IdlePhase::Active;
                self.deadline = TokioInstant::now() + self.config.threshold;
                info!(?kind, "activity during warning, session resumed");
                self.notifier.phase_changed(IdlePhase::Active);
            }
            // The actor stops at expiry; no commands arrive here.
            IdlePhase::Expired => {}
        }
    }

    /// Returns `true` when the monitor is done.
    fn handle_deadline(&mut self) -> bool {
        match self.phase {
            IdlePhase::Active => {
                self.phase = IdlePhase::WarningShown;
                // Grace runs from the scheduled warning instant, so expiry
                // lands at exactly threshold + grace of silence.
                self.deadline += self.config.grace;
                info!("inactivity threshold reached, warning shown");
                self.notifier.phase_changed(IdlePhase::WarningShown);
                false
            }
            IdlePhase::WarningShown => {
                self.phase = IdlePhase::Expired;
                info!("grace period elapsed, session expired");
                self.notifier.phase_changed(IdlePhase::Expired);
                true
            }
            IdlePhase::Expired => true,
        }
    }
}
