//! # Wicket
//!
//! A client-side login flow toolkit: credential validation, sliding-window
//! rate limiting, retrying attempt control, and inactivity tracking, each
//! behind a capability trait so any surface (a browser shell, a desktop
//! app, a test harness) can drive it.
//!
//! Wicket renders nothing and speaks no particular wire protocol. You
//! bring an [`AuthBackend`], a [`SessionStore`], and a notifier for each
//! actor; the toolkit owns the policy in between.
//!
//! ## Quick start
//!
//! ```no_run
//! use tokio::sync::mpsc;
//! use wicket::prelude::*;
//!
//! # async fn demo() -> Result<(), WicketError> {
//! let (signals_tx, mut signals_rx) = mpsc::unbounded_channel();
//! let store = MemorySessionStore::new();
//!
//! let flow = LoginFlow::builder().build(MockAuthBackend::new(), store.clone(), signals_tx);
//!
//! flow.submit("test@correct.com", "password123").await?;
//!
//! while let Some(signal) = signals_rx.recv().await {
//!     match signal {
//!         AttemptSignal::Succeeded { .. } => println!("logged in"),
//!         AttemptSignal::RedirectReady => break,
//!         other => println!("{other:?}"),
//!     }
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Crate layout
//!
//! - [`wicket_limit`] is the sliding-window rate limiter
//! - [`wicket_auth`] holds the backend/store capabilities and the mock
//! - [`wicket_attempt`] is the attempt controller actor
//! - [`wicket_idle`] is the inactivity monitor actor

mod error;
mod flow;

pub use error::WicketError;
pub use flow::{LoginFlow, LoginFlowBuilder};

pub use wicket_attempt::{
    AttemptError, AttemptNotifier, AttemptSignal, ControllerConfig,
    ControllerHandle, ControllerState, Field, FieldError, MIN_PASSWORD_CHARS,
    RejectReason, RetryPolicy, SERVICE_DOWN_MESSAGE, spawn_controller,
    validate_credentials, validate_email, validate_password,
};
#[cfg(feature = "mock")]
pub use wicket_auth::MockAuthBackend;
pub use wicket_auth::{
    AuthBackend, AuthOutcome, MemorySessionStore, SessionStore, StorageError,
};
pub use wicket_idle::{
    ActivityKind, IdleConfig, IdleError, IdleHandle, IdleNotifier, IdlePhase,
    spawn_monitor,
};
pub use wicket_limit::{RateLimitConfig, RateLimiter, Verdict};

/// The commonly used surface in one import.
pub mod prelude {
    #[cfg(feature = "mock")]
    pub use crate::MockAuthBackend;
    pub use crate::{
        ActivityKind, AttemptSignal, AuthBackend, AuthOutcome, ControllerConfig,
        ControllerState, IdleConfig, IdlePhase, LoginFlow, LoginFlowBuilder,
        MemorySessionStore, RateLimitConfig, RejectReason, RetryPolicy,
        SessionStore, WicketError, spawn_monitor,
    };
}
