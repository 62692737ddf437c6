//! `LoginFlow`: one-stop wiring for a login surface.
//!
//! Ties the attempt controller to its capabilities (backend, store,
//! notifier) behind a single handle. The inactivity monitor is
//! deliberately not part of the flow: it belongs to the session a
//! successful login starts, so arm it then, with
//! [`wicket_idle::spawn_monitor`].

use std::time::Duration;

use wicket_attempt::{
    AttemptNotifier, ControllerConfig, ControllerHandle, ControllerState,
    RetryPolicy, spawn_controller,
};
use wicket_auth::{AuthBackend, SessionStore};
use wicket_limit::RateLimitConfig;

use crate::WicketError;

/// Builder for configuring and starting a [`LoginFlow`].
///
/// # Example
///
/// ```no_run
/// use tokio::sync::mpsc;
/// use wicket::prelude::*;
///
/// # async fn demo() -> Result<(), WicketError> {
/// let (signals_tx, mut signals_rx) = mpsc::unbounded_channel();
///
/// let flow = LoginFlow::builder()
///     .success_delay(std::time::Duration::from_secs(2))
///     .build(MockAuthBackend::new(), MemorySessionStore::new(), signals_tx);
///
/// flow.submit("test@correct.com", "password123").await?;
/// while let Some(signal) = signals_rx.recv().await {
///     println!("{signal:?}");
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct LoginFlowBuilder {
    config: ControllerConfig,
}

impl LoginFlowBuilder {
    /// Creates a builder with default settings.
    pub fn new() -> Self {
        Self {
            config: ControllerConfig::default(),
        }
    }

    /// Replaces the whole controller configuration.
    pub fn controller_config(mut self, config: ControllerConfig) -> Self {
        self.config = config;
        self
    }

    /// Sets the rate-limit settings.
    pub fn rate_limit(mut self, rate_limit: RateLimitConfig) -> Self {
        self.config.rate_limit = rate_limit;
        self
    }

    /// Sets the retry policy.
    pub fn retry(mut self, retry: RetryPolicy) -> Self {
        self.config.retry = retry;
        self
    }

    /// Sets the pause between the success signal and the redirect signal.
    pub fn success_delay(mut self, delay: Duration) -> Self {
        self.config.success_delay = delay;
        self
    }

    /// Spawns the attempt controller around the given capabilities and
    /// returns the running flow.
    pub fn build<B, S, N>(self, backend: B, store: S, notifier: N) -> LoginFlow
    where
        B: AuthBackend,
        S: SessionStore,
        N: AttemptNotifier,
    {
        let handle = spawn_controller(self.config, backend, store, notifier);
        LoginFlow { handle }
    }
}

impl Default for LoginFlowBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// A running login flow.
///
/// Thin wrapper over the controller handle with the meta-crate's
/// [`WicketError`] on every call. Cheap to clone.
#[derive(Clone)]
pub struct LoginFlow {
    handle: ControllerHandle,
}

impl LoginFlow {
    /// Creates a builder.
    pub fn builder() -> LoginFlowBuilder {
        LoginFlowBuilder::new()
    }

    /// Queues a submission. Fire-and-forget; every consequence arrives
    /// at the notifier.
    pub async fn submit(&self, email: &str, password: &str) -> Result<(), WicketError> {
        self.handle.submit(email, password).await?;
        Ok(())
    }

    /// Current controller state.
    pub async fn state(&self) -> Result<ControllerState, WicketError> {
        Ok(self.handle.state().await?)
    }

    /// Stops the flow's controller.
    pub async fn shutdown(&self) -> Result<(), WicketError> {
        self.handle.shutdown().await?;
        Ok(())
    }

    /// The underlying controller handle, for callers that want the
    /// sub-crate API directly.
    pub fn controller(&self) -> &ControllerHandle {
        &self.handle
    }
}
