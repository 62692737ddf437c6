//! Session token storage.
//!
//! After a successful login the attempt controller hands the token to a
//! [`SessionStore`]. The trait is synchronous: storing a token is a local
//! operation (an in-memory slot, a keyring, a file), not a network
//! suspension point.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::StorageError;

/// Keeps the session token a successful login produces.
///
/// An `Err` from `save` does not fail the login: the controller reports
/// it as a warning on the success signal and carries on. Implementations
/// should be cheap; the controller calls `save` from its own task.
pub trait SessionStore: Send + Sync + 'static {
    /// Stores `token`, replacing any previous one.
    fn save(&self, token: &str) -> Result<(), StorageError>;
}

/// In-memory, process-local token store.
///
/// Clones share the same slot, so a caller can keep one clone for later
/// inspection (or logout) and hand the other to the flow.
#[derive(Debug, Clone, Default)]
pub struct MemorySessionStore {
    slot: Arc<Mutex<Option<String>>>,
}

impl MemorySessionStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// The currently stored token, if any.
    pub fn load(&self) -> Option<String> {
        self.lock().clone()
    }

    /// Discards the stored token. The logout path calls this.
    pub fn clear(&self) {
        *self.lock() = None;
        tracing::debug!("session token cleared");
    }

    /// Returns `true` if no token is stored.
    pub fn is_empty(&self) -> bool {
        self.lock().is_none()
    }

    fn lock(&self) -> MutexGuard<'_, Option<String>> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl SessionStore for MemorySessionStore {
    fn save(&self, token: &str) -> Result<(), StorageError> {
        *self.lock() = Some(token.to_string());
        tracing::debug!("session token stored");
        Ok(())
    }
}
