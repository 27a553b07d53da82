//! # Zone Lifecycle Guard
//!
//! Precondition checks that run against a fresh zone snapshot before any structural
//! mutation reaches the store. The guard never writes anything.

use crate::config::DeletePolicy;
use crate::error::ZoneError;
use crate::model::{Zone, ZoneId};
use crate::tree;
use crate::zone_actor::entity::normalize_name;
use tracing::debug;

#[derive(Debug, Clone, Copy, Default)]
pub struct ZoneLifecycleGuard {
    delete_policy: DeletePolicy,
}

impl ZoneLifecycleGuard {
    pub fn new(delete_policy: DeletePolicy) -> Self {
        Self { delete_policy }
    }

    pub fn delete_policy(&self) -> DeletePolicy {
        self.delete_policy
    }

    /// Returns the trimmed name, or `EmptyName` if nothing is left.
    pub fn validate_rename(&self, name: &str) -> Result<String, ZoneError> {
        normalize_name(name)
    }

    /// Checks a new zone's name and parent. Returns the trimmed name.
    pub fn validate_create(
        &self,
        name: &str,
        parent_id: Option<&ZoneId>,
        zones: &[Zone],
    ) -> Result<String, ZoneError> {
        let name = self.validate_rename(name)?;
        if let Some(parent_id) = parent_id {
            require_present(parent_id, zones)?;
        }
        Ok(name)
    }

    /// Checks that `zone_id` may be moved under `new_parent_id`.
    ///
    /// Moving to the root level (`None`) is always allowed. Otherwise the parent must
    /// exist, must not be the zone itself, and must not be one of its descendants.
    pub fn validate_reparent(
        &self,
        zone_id: &ZoneId,
        new_parent_id: Option<&ZoneId>,
        zones: &[Zone],
    ) -> Result<(), ZoneError> {
        let Some(parent_id) = new_parent_id else {
            return Ok(());
        };

        let cycle = || ZoneError::CycleDetected {
            zone_id: zone_id.clone(),
            parent_id: parent_id.clone(),
        };

        if parent_id == zone_id {
            return Err(cycle());
        }
        require_present(parent_id, zones)?;
        if tree::is_descendant(parent_id, zone_id, zones) {
            debug!(zone_id = %zone_id, parent_id = %parent_id, "Reparent rejected, parent is a descendant");
            return Err(cycle());
        }
        Ok(())
    }

    /// A zone can only be deleted once it has no child zones.
    pub fn validate_delete(&self, zone_id: &ZoneId, zones: &[Zone]) -> Result<(), ZoneError> {
        let child_count = tree::count_children(zone_id, zones);
        if child_count > 0 {
            return Err(ZoneError::HasChildren {
                zone_id: zone_id.clone(),
                child_count,
            });
        }
        Ok(())
    }

    /// Under [`DeletePolicy::Block`], a zone that still has resources cannot be deleted.
    /// Other policies always pass.
    pub fn validate_unassigned(
        &self,
        zone_id: &ZoneId,
        resource_count: usize,
    ) -> Result<(), ZoneError> {
        if self.delete_policy == DeletePolicy::Block && resource_count > 0 {
            return Err(ZoneError::HasResources {
                zone_id: zone_id.clone(),
                resource_count,
            });
        }
        Ok(())
    }
}

fn require_present(parent_id: &ZoneId, zones: &[Zone]) -> Result<(), ZoneError> {
    if zones.iter().any(|z| &z.id == parent_id) {
        Ok(())
    } else {
        Err(ZoneError::ParentNotFound {
            parent_id: parent_id.clone(),
        })
    }
}
