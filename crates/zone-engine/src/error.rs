//! Error types surfaced by the zone engine.
//!
//! Every failure is a data-integrity violation or an unavailable store; none is
//! retried. [`ZoneError::to_api`] renders the `{ kind, message, data }` record an
//! API layer returns to its caller.

use crate::model::{ResourceId, ResourceKind, ZoneId};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use thiserror::Error;

/// Errors that can occur during zone and assignment operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ZoneError {
    /// The requested zone does not exist.
    #[error("Zone not found: {id}")]
    NotFound { id: ZoneId },

    /// The requested resource does not exist.
    #[error("Resource not found: {id}")]
    ResourceNotFound { id: ResourceId },

    /// The referenced parent zone does not exist.
    #[error("Parent zone not found: {parent_id}")]
    ParentNotFound { parent_id: ZoneId },

    /// Moving the zone under this parent would make it its own ancestor.
    #[error("Zone {zone_id} cannot be placed under {parent_id}: cycle detected")]
    CycleDetected { zone_id: ZoneId, parent_id: ZoneId },

    /// The zone still has child zones.
    #[error("Zone {zone_id} has {child_count} child zone(s)")]
    HasChildren { zone_id: ZoneId, child_count: usize },

    /// The zone still has assigned resources and the delete policy forbids orphaning them.
    #[error("Zone {zone_id} has {resource_count} assigned resource(s)")]
    HasResources {
        zone_id: ZoneId,
        resource_count: usize,
    },

    /// Zone names must contain at least one non-whitespace character.
    #[error("Zone name must not be empty")]
    EmptyName,

    /// Resource labels must contain at least one non-whitespace character.
    #[error("Resource label must not be empty")]
    EmptyLabel,

    /// The resource exists but is not of the requested kind.
    #[error("Resource {id} is a {actual}, not a {expected}")]
    KindMismatch {
        id: ResourceId,
        expected: ResourceKind,
        actual: ResourceKind,
    },

    /// The backing store could not be reached.
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),
}

/// Stable, serializable discriminator of a [`ZoneError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    NotFound,
    ParentNotFound,
    CycleDetected,
    HasChildren,
    HasResources,
    InvalidName,
    InvalidLabel,
    KindMismatch,
    StoreUnavailable,
}

/// Structured error record for the API boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiError {
    pub kind: ErrorKind,
    pub message: String,
    pub data: Value,
}

impl ZoneError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ZoneError::NotFound { .. } | ZoneError::ResourceNotFound { .. } => ErrorKind::NotFound,
            ZoneError::ParentNotFound { .. } => ErrorKind::ParentNotFound,
            ZoneError::CycleDetected { .. } => ErrorKind::CycleDetected,
            ZoneError::HasChildren { .. } => ErrorKind::HasChildren,
            ZoneError::HasResources { .. } => ErrorKind::HasResources,
            ZoneError::EmptyName => ErrorKind::InvalidName,
            ZoneError::EmptyLabel => ErrorKind::InvalidLabel,
            ZoneError::KindMismatch { .. } => ErrorKind::KindMismatch,
            ZoneError::StoreUnavailable(_) => ErrorKind::StoreUnavailable,
        }
    }

    /// Structured fields for the API `data` member.
    pub fn data(&self) -> Value {
        match self {
            ZoneError::NotFound { id } => json!({ "zone_id": id }),
            ZoneError::ResourceNotFound { id } => json!({ "resource_id": id }),
            ZoneError::ParentNotFound { parent_id } => json!({ "parent_id": parent_id }),
            ZoneError::CycleDetected { zone_id, parent_id } => {
                json!({ "zone_id": zone_id, "parent_id": parent_id })
            }
            ZoneError::HasChildren {
                zone_id,
                child_count,
            } => json!({ "zone_id": zone_id, "child_count": child_count }),
            ZoneError::HasResources {
                zone_id,
                resource_count,
            } => json!({ "zone_id": zone_id, "resource_count": resource_count }),
            ZoneError::EmptyName | ZoneError::EmptyLabel => Value::Null,
            ZoneError::KindMismatch {
                id,
                expected,
                actual,
            } => json!({ "resource_id": id, "expected": expected, "actual": actual }),
            ZoneError::StoreUnavailable(_) => Value::Null,
        }
    }

    pub fn to_api(&self) -> ApiError {
        ApiError {
            kind: self.kind(),
            message: self.to_string(),
            data: self.data(),
        }
    }
}

impl From<ZoneError> for ApiError {
    fn from(e: ZoneError) -> Self {
        e.to_api()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_children_carries_count() {
        let api = ZoneError::HasChildren {
            zone_id: ZoneId::from("a"),
            child_count: 1,
        }
        .to_api();

        assert_eq!(api.kind, ErrorKind::HasChildren);
        assert_eq!(api.data["child_count"], 1);
        assert_eq!(api.data["zone_id"], "a");
        assert_eq!(api.message, "Zone a has 1 child zone(s)");
    }

    #[test]
    fn test_api_error_serializes_snake_case_kind() {
        let api: ApiError = ZoneError::CycleDetected {
            zone_id: ZoneId::from("a"),
            parent_id: ZoneId::from("c"),
        }
        .into();

        let encoded = serde_json::to_value(&api).unwrap();
        assert_eq!(encoded["kind"], "cycle_detected");
        assert_eq!(encoded["data"]["parent_id"], "c");
    }

    #[test]
    fn test_kind_mismatch_data() {
        let err = ZoneError::KindMismatch {
            id: ResourceId::from("c1"),
            expected: ResourceKind::Detector,
            actual: ResourceKind::Circuit,
        };
        assert_eq!(err.kind(), ErrorKind::KindMismatch);
        assert_eq!(err.data()["actual"], "circuit");
        assert_eq!(err.to_string(), "Resource c1 is a circuit, not a detector");
    }

    #[test]
    fn test_empty_label_is_a_validation_error() {
        let err = ZoneError::from(crate::resource_actor::ResourceError::EmptyLabel);
        assert_eq!(err, ZoneError::EmptyLabel);

        let api = err.to_api();
        assert_eq!(api.kind, ErrorKind::InvalidLabel);
        assert_eq!(serde_json::to_value(&api).unwrap()["kind"], "invalid_label");
    }
}
