//! A scripted backend for demos and tests.

use std::time::Duration;

use rand::Rng;
use tracing::debug;

use crate::{AuthBackend, AuthOutcome};

/// Deterministic [`AuthBackend`] with scripted outcomes.
///
/// The script:
///
/// - [`Self::VALID_EMAIL`] with [`Self::VALID_PASSWORD`] succeeds, with a
///   fresh `mock-jwt-` token every time
/// - [`Self::TRANSIENT_EMAIL`] fails with HTTP 500 on every call, which
///   is how you watch the retry loop run dry
/// - anything else is rejected as invalid credentials
///
/// Every answer takes [`Self::DEFAULT_LATENCY`] to arrive unless
/// overridden. Under a paused Tokio clock the latency is virtual, so
/// tests stay fast.
#[derive(Debug, Clone)]
pub struct MockAuthBackend {
    latency: Duration,
    service_down: bool,
}

impl MockAuthBackend {
    /// Email that authenticates successfully with [`Self::VALID_PASSWORD`].
    pub const VALID_EMAIL: &'static str = "test@correct.com";
    /// Password accepted for [`Self::VALID_EMAIL`].
    pub const VALID_PASSWORD: &'static str = "password123";
    /// Email that triggers a retryable server failure on every call.
    pub const TRANSIENT_EMAIL: &'static str = "error@simulate.com";

    /// Simulated round-trip latency applied to every call.
    pub const DEFAULT_LATENCY: Duration = Duration::from_millis(1500);

    /// Backend with the default latency and the service up.
    pub fn new() -> Self {
        Self {
            latency: Self::DEFAULT_LATENCY,
            service_down: false,
        }
    }

    /// Overrides the simulated latency.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Marks the service down: every call answers
    /// [`AuthOutcome::ServiceUnavailable`] after the usual latency,
    /// regardless of the credentials.
    pub fn with_service_down(mut self) -> Self {
        self.service_down = true;
        self
    }
}

impl Default for MockAuthBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl AuthBackend for MockAuthBackend {
    async fn authenticate(&self, email: &str, password: &str) -> AuthOutcome {
        tokio::time::sleep(self.latency).await;

        let outcome = if self.service_down {
            AuthOutcome::ServiceUnavailable {
                message: "Authentication service is temporarily unavailable.".into(),
            }
        } else if email == Self::VALID_EMAIL && password == Self::VALID_PASSWORD {
            AuthOutcome::Success {
                token: mock_token(),
            }
        } else if email == Self::TRANSIENT_EMAIL {
            AuthOutcome::TransientFailure {
                status: 500,
                message: "Server error, retrying...".into(),
            }
        } else {
            AuthOutcome::InvalidCredentials {
                message: "Invalid email or password.".into(),
            }
        };

        debug!(%outcome, "mock auth request answered");
        outcome
    }
}

/// Random token in the `mock-jwt-<hex>` shape a real issuer might mint.
fn mock_token() -> String {
    let mut rng = rand::rng();
    let bytes: [u8; 8] = rng.random();
    let hex: String = bytes.iter().map(|b| format!("{b:02x}")).collect();
    format!("mock-jwt-{hex}")
}
