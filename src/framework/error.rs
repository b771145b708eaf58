//! # Framework Errors
//!
//! Common error types used throughout the actor substrate. Domain clients
//! translate these back into their own error enums at the API boundary
//! (channel failures become transient errors, boxed entity errors are
//! downcast to the originating domain type).

/// Errors that can occur within the actor framework itself.
#[derive(Debug, thiserror::Error)]
pub enum FrameworkError {
    #[error("Actor closed")]
    ActorClosed,
    #[error("Actor dropped response channel")]
    ActorDropped,
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("Entity error: {0}")]
    EntityError(Box<dyn std::error::Error + Send + Sync>),
}
