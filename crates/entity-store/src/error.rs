//! # Store Errors
//!
//! Errors raised by the store runtime itself. Entity-specific failures are carried
//! inside [`StoreError::EntityError`] and can be recovered with `downcast_ref`.

/// Errors that can occur while talking to a [`StoreActor`](crate::StoreActor).
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Store closed")]
    ActorClosed,
    #[error("Store dropped response channel")]
    ActorDropped,
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("Entity error: {0}")]
    EntityError(Box<dyn std::error::Error + Send + Sync>),
}

impl StoreError {
    /// Returns the entity error as `E` if this is an [`StoreError::EntityError`] of that type.
    pub fn entity_error<E: std::error::Error + 'static>(&self) -> Option<&E> {
        match self {
            StoreError::EntityError(e) => e.downcast_ref::<E>(),
            _ => None,
        }
    }
}
