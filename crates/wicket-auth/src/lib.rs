//! Authentication and session-storage capabilities for Wicket.
//!
//! This crate defines the two seams the login flow talks through:
//!
//! 1. **[`AuthBackend`]** decides whether credentials are good. The flow
//!    never sees transport details; every backend answer is an
//!    [`AuthOutcome`], failures included.
//! 2. **[`SessionStore`]** keeps the token a successful login produces.
//!
//! The bundled [`MockAuthBackend`] (feature `mock`, on by default)
//! scripts deterministic outcomes with simulated latency so the rest of
//! the stack can be exercised without a real identity provider.

mod backend;
mod error;
#[cfg(feature = "mock")]
mod mock;
mod outcome;
mod store;

pub use backend::AuthBackend;
pub use error::StorageError;
#[cfg(feature = "mock")]
pub use mock::MockAuthBackend;
pub use outcome::AuthOutcome;
pub use store::{MemorySessionStore, SessionStore};
