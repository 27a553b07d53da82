use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Type-safe identifier for Zones.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ZoneId(pub String);

impl ZoneId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<u32> for ZoneId {
    fn from(id: u32) -> Self {
        Self(format!("zone_{}", id))
    }
}

impl From<&str> for ZoneId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for ZoneId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl Display for ZoneId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A monitoring zone in the installation hierarchy.
///
/// # Entity Store
/// This struct implements the [`StoreEntity`](entity_store::StoreEntity) trait,
/// allowing it to be kept in a [`StoreActor`](entity_store::StoreActor).
///
/// See [`impl StoreEntity for Zone`](#impl-StoreEntity-for-Zone) for details on:
/// - Creation parameters ([`ZoneCreate`])
/// - Update parameters ([`ZonePatch`])
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Zone {
    pub id: ZoneId,
    pub name: String,
    pub parent_id: Option<ZoneId>,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Zone {
    /// Creates a zone stamped with the current time.
    ///
    /// Used when records are written with an explicit id (`ZoneClient::put_zone`);
    /// ids allocated by the store go through [`ZoneCreate`] instead.
    pub fn new(id: impl Into<ZoneId>, name: impl Into<String>, parent_id: Option<ZoneId>) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            name: name.into(),
            parent_id,
            description: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }
}

/// Payload for creating a zone under a freshly allocated id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ZoneCreate {
    pub name: String,
    pub parent_id: Option<ZoneId>,
    pub description: Option<String>,
}

/// Partial update of a zone.
///
/// `parent_id` and `description` are tri-state: `None` leaves the field alone,
/// `Some(None)` clears it (for `parent_id`: moves the zone to the root level),
/// `Some(Some(v))` sets it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ZonePatch {
    pub name: Option<String>,
    pub parent_id: Option<Option<ZoneId>>,
    pub description: Option<Option<String>>,
}

impl ZonePatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.parent_id.is_none() && self.description.is_none()
    }
}
