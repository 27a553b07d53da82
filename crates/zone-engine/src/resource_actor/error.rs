//! Error types for the resource store.

use crate::error::ZoneError;
use crate::model::{ResourceId, ResourceKind};
use thiserror::Error;

/// Errors that can occur during resource operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ResourceError {
    /// The requested resource was not found.
    #[error("Resource not found: {0}")]
    NotFound(ResourceId),

    /// The resource exists but has a different kind than requested.
    #[error("Resource {id} is a {actual}, not a {expected}")]
    KindMismatch {
        id: ResourceId,
        expected: ResourceKind,
        actual: ResourceKind,
    },

    /// Labels must not be blank.
    #[error("Resource label must not be empty")]
    EmptyLabel,

    /// An error occurred while communicating with the store.
    #[error("Store communication error: {0}")]
    StoreCommunication(String),
}

impl From<ResourceError> for ZoneError {
    fn from(e: ResourceError) -> Self {
        match e {
            ResourceError::NotFound(id) => ZoneError::ResourceNotFound { id },
            ResourceError::KindMismatch {
                id,
                expected,
                actual,
            } => ZoneError::KindMismatch {
                id,
                expected,
                actual,
            },
            ResourceError::EmptyLabel => ZoneError::EmptyLabel,
            ResourceError::StoreCommunication(msg) => ZoneError::StoreUnavailable(msg),
        }
    }
}
