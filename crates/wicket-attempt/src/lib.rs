//! Login attempt control for Wicket.
//!
//! The attempt controller is the gatekeeper between a login surface and
//! an authentication backend. One submission at a time flows through
//! local validation, the rate limiter, the backend call with bounded
//! retries, and outcome classification; everything the surface needs to
//! render is pushed out as [`AttemptSignal`]s.
//!
//! # Key types
//!
//! - [`spawn_controller`] starts the actor and returns a [`ControllerHandle`]
//! - [`AttemptNotifier`] is the seam signals leave through
//! - [`ControllerConfig`] bundles rate-limit, retry, and pacing settings
//! - [`ControllerState`] is the submission lifecycle state machine
//!
//! The controller runs as an isolated Tokio task (actor model): it owns
//! its state and its limiter outright, and handles talk to it over a
//! channel. Any number of UI events can race at the handle; the actor
//! serializes them.

mod config;
mod controller;
mod error;
mod signal;
mod validate;

pub use config::{ControllerConfig, ControllerState, RetryPolicy};
pub use controller::{ControllerHandle, spawn_controller};
pub use error::AttemptError;
pub use signal::{
    AttemptNotifier, AttemptSignal, RejectReason, SERVICE_DOWN_MESSAGE,
};
pub use validate::{
    Field, FieldError, MIN_PASSWORD_CHARS, validate_credentials, validate_email,
    validate_password,
};
