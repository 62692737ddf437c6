//! Error types for the attempt layer.

/// Errors surfaced by [`ControllerHandle`](crate::ControllerHandle) calls.
#[derive(Debug, thiserror::Error)]
pub enum AttemptError {
    /// The controller's command channel is closed: the actor was shut
    /// down or its task panicked.
    #[error("attempt controller is unavailable")]
    Unavailable,
}
