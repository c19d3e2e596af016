//! # Framework Errors
//!
//! Common error types used throughout the actor framework. Entity errors travel boxed
//! inside [`FrameworkError::EntityError`]; domain clients downcast them back.

/// Errors that can occur within the actor framework itself.
#[derive(Debug, thiserror::Error)]
pub enum FrameworkError {
    #[error("Actor closed")]
    ActorClosed,
    #[error("Actor dropped response channel")]
    ActorDropped,
    #[error("Entity error: {0}")]
    EntityError(Box<dyn std::error::Error + Send + Sync>),
}

impl FrameworkError {
    /// Wraps an entity error.
    pub fn entity<E: std::error::Error + Send + Sync + 'static>(e: E) -> Self {
        FrameworkError::EntityError(Box::new(e))
    }
}
