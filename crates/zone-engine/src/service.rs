//! # Zone Service
//!
//! The one entry point an API layer calls. Every mutation follows the same steps:
//!
//! 1. read a fresh zone snapshot from the store,
//! 2. run the [`ZoneLifecycleGuard`] checks against it,
//! 3. issue the write.
//!
//! Snapshots, and therefore tree siblings, are ordered by name and then id using plain
//! lexicographic string comparison: "Floor 10" sorts before "Floor 2".
//!
//! There is no lock spanning steps 1 and 3. Two concurrent structural edits can
//! both pass validation against the same snapshot; each individual write is still
//! applied atomically by its store actor.
//!
//! ```rust,ignore
//! let system = ZoneSystem::new(EngineConfig::default());
//! let root = system.service.create_zone(ZoneCreate { name: "root".into(), parent_id: None, description: None }).await?;
//! let tree = system.service.get_zone_tree().await?;
//! ```

use crate::clients::{ResourceClient, ZoneClient};
use crate::config::DeletePolicy;
use crate::error::ZoneError;
use crate::guard::ZoneLifecycleGuard;
use crate::model::{Resource, ResourceId, ResourceKind, Zone, ZoneCreate, ZoneId, ZonePatch};
use crate::registry::{BulkOutcome, ResourceAssignmentRegistry};
use crate::tree::{self, TreeNode};
use entity_store::EntityClient;
use std::collections::{BTreeSet, HashMap};
use tracing::{debug, info, instrument, warn};

#[derive(Clone)]
pub struct ZoneService {
    zones: ZoneClient,
    registry: ResourceAssignmentRegistry,
    guard: ZoneLifecycleGuard,
}

impl ZoneService {
    pub fn new(zones: ZoneClient, resources: ResourceClient, delete_policy: DeletePolicy) -> Self {
        Self {
            zones,
            registry: ResourceAssignmentRegistry::new(resources),
            guard: ZoneLifecycleGuard::new(delete_policy),
        }
    }

    pub fn registry(&self) -> &ResourceAssignmentRegistry {
        &self.registry
    }

    pub fn delete_policy(&self) -> DeletePolicy {
        self.guard.delete_policy()
    }

    /// All zones, ordered lexicographically by name and then id.
    async fn snapshot(&self) -> Result<Vec<Zone>, ZoneError> {
        let mut zones = self.zones.list().await?;
        zones.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
        Ok(zones)
    }

    #[instrument(skip(self))]
    pub async fn create_zone(&self, params: ZoneCreate) -> Result<Zone, ZoneError> {
        let zones = self.snapshot().await?;
        let name = self
            .guard
            .validate_create(&params.name, params.parent_id.as_ref(), &zones)?;

        let zone = self.zones.create_zone(ZoneCreate { name, ..params }).await?;
        info!(zone_id = %zone.id, parent_id = ?zone.parent_id, "Zone created");
        Ok(zone)
    }

    /// Renames, moves, or re-describes a zone.
    ///
    /// Reparent checks only run when the parent actually changes, so re-sending the
    /// current parent is always accepted.
    #[instrument(skip(self))]
    pub async fn update_zone(&self, id: ZoneId, mut patch: ZonePatch) -> Result<Zone, ZoneError> {
        let zones = self.snapshot().await?;
        let current = zones
            .iter()
            .find(|z| z.id == id)
            .ok_or_else(|| ZoneError::NotFound { id: id.clone() })?;

        if patch.is_empty() {
            debug!("Empty patch, nothing to write");
            return Ok(current.clone());
        }

        if let Some(name) = patch.name.take() {
            patch.name = Some(self.guard.validate_rename(&name)?);
        }
        if let Some(new_parent) = &patch.parent_id {
            if new_parent.as_ref() != current.parent_id.as_ref() {
                self.guard
                    .validate_reparent(&id, new_parent.as_ref(), &zones)?;
            }
        }

        let zone = self.zones.update_zone(id, patch).await?;
        info!(zone_id = %zone.id, "Zone updated");
        Ok(zone)
    }

    /// Deletes a childless zone, handling its resources per the configured
    /// [`DeletePolicy`].
    #[instrument(skip(self))]
    pub async fn delete_zone(&self, id: ZoneId) -> Result<(), ZoneError> {
        let zones = self.snapshot().await?;
        if !zones.iter().any(|z| z.id == id) {
            return Err(ZoneError::NotFound { id });
        }
        self.guard.validate_delete(&id, &zones)?;

        match self.guard.delete_policy() {
            DeletePolicy::Keep => {}
            DeletePolicy::Block => {
                let resource_count = self.registry.count_assigned(&id).await?;
                self.guard.validate_unassigned(&id, resource_count)?;
            }
            DeletePolicy::Unassign => {
                let outcome = self.registry.release_zone(&id).await?;
                if let Some((resource_id, error)) = outcome.failed.into_iter().next() {
                    warn!(resource_id = %resource_id, "Could not release resource, zone kept");
                    return Err(error);
                }
                debug!(released = outcome.succeeded.len(), "Resources released");
            }
        }

        self.zones.delete(id.clone()).await?;
        info!(zone_id = %id, "Zone deleted");
        Ok(())
    }

    /// The whole zone forest, siblings ordered lexicographically by name and then id.
    #[instrument(skip(self))]
    pub async fn get_zone_tree(&self) -> Result<Vec<TreeNode>, ZoneError> {
        let zones = self.snapshot().await?;
        Ok(tree::build_forest(&zones))
    }

    #[instrument(skip(self))]
    pub async fn get_zone(&self, id: ZoneId) -> Result<Zone, ZoneError> {
        self.zones.require(id).await
    }

    #[instrument(skip(self))]
    pub async fn list_zones(&self) -> Result<Vec<Zone>, ZoneError> {
        self.snapshot().await
    }

    /// The zones from the root down to `id`, inclusive.
    #[instrument(skip(self))]
    pub async fn zone_path(&self, id: ZoneId) -> Result<Vec<Zone>, ZoneError> {
        let zones = self.snapshot().await?;
        let by_id: HashMap<&ZoneId, &Zone> = zones.iter().map(|z| (&z.id, z)).collect();
        let zone = by_id
            .get(&id)
            .copied()
            .ok_or_else(|| ZoneError::NotFound { id: id.clone() })?;

        let mut path: Vec<Zone> = tree::ancestors(&id, &zones)
            .iter()
            .rev()
            .filter_map(|ancestor| by_id.get(ancestor).map(|z| (*z).clone()))
            .collect();
        path.push(zone.clone());
        Ok(path)
    }

    /// Assigns resources of `kind` to an existing zone. Each id succeeds or fails on
    /// its own; only a missing zone fails the whole call.
    #[instrument(skip(self))]
    pub async fn assign_resources(
        &self,
        zone_id: ZoneId,
        ids: BTreeSet<ResourceId>,
        kind: ResourceKind,
    ) -> Result<BulkOutcome, ZoneError> {
        self.zones.require(zone_id.clone()).await?;
        Ok(self.registry.assign_bulk(&ids, &zone_id, kind).await)
    }

    #[instrument(skip(self))]
    pub async fn unassign_resources(
        &self,
        ids: BTreeSet<ResourceId>,
        kind: ResourceKind,
    ) -> BulkOutcome {
        self.registry.unassign_bulk(&ids, kind).await
    }

    #[instrument(skip(self))]
    pub async fn unassigned_resources(
        &self,
        kind: ResourceKind,
    ) -> Result<Vec<Resource>, ZoneError> {
        self.registry.unassigned_resources(kind).await
    }

    #[instrument(skip(self))]
    pub async fn assigned_resources(
        &self,
        zone_id: ZoneId,
        kind: ResourceKind,
    ) -> Result<Vec<Resource>, ZoneError> {
        self.zones.require(zone_id.clone()).await?;
        self.registry.assigned_resources(&zone_id, kind).await
    }
}
