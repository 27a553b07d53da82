//! # Resource Assignment Registry
//!
//! Rewrites the zone reference held by detectors and circuits.
//!
//! Each id is handled by a single store action, which the resource actor applies as
//! one read-modify-write. Ids are processed one after another and independently:
//! a failure on one id is recorded in the [`BulkOutcome`] and the rest continue.
//! Only the collection-wide queries (listing, counting) fail as a whole.

use crate::clients::ResourceClient;
use crate::error::{ApiError, ZoneError};
use crate::model::{Assignable, Resource, ResourceId, ResourceKind, ZoneId};
use entity_store::EntityClient;
use serde::{Serialize, Serializer};
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, info, instrument, warn};

/// Per-id result of a bulk assignment operation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BulkOutcome {
    pub succeeded: BTreeSet<ResourceId>,
    pub failed: BTreeMap<ResourceId, ZoneError>,
}

impl BulkOutcome {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }

    pub fn len(&self) -> usize {
        self.succeeded.len() + self.failed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn record(&mut self, id: ResourceId, result: Result<(), ZoneError>) {
        match result {
            Ok(()) => {
                self.succeeded.insert(id);
            }
            Err(e) => {
                warn!(resource_id = %id, error = %e, "Resource skipped");
                self.failed.insert(id, e);
            }
        }
    }
}

/// Failures are rendered as [`ApiError`] records keyed by resource id.
impl Serialize for BulkOutcome {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        #[derive(Serialize)]
        struct Wire<'a> {
            succeeded: &'a BTreeSet<ResourceId>,
            failed: BTreeMap<&'a ResourceId, ApiError>,
        }

        Wire {
            succeeded: &self.succeeded,
            failed: self
                .failed
                .iter()
                .map(|(id, e)| (id, e.to_api()))
                .collect(),
        }
        .serialize(serializer)
    }
}

#[derive(Clone)]
pub struct ResourceAssignmentRegistry {
    resources: ResourceClient,
}

impl ResourceAssignmentRegistry {
    pub fn new(resources: ResourceClient) -> Self {
        Self { resources }
    }

    pub fn client(&self) -> &ResourceClient {
        &self.resources
    }

    async fn snapshot(&self) -> Result<Vec<Resource>, ZoneError> {
        let mut resources = self.resources.list().await?;
        resources.sort_by(|a, b| Assignable::id(a).cmp(Assignable::id(b)));
        Ok(resources)
    }

    /// Resources of `kind` that belong to no zone, ordered by id.
    #[instrument(skip(self))]
    pub async fn unassigned_resources(&self, kind: ResourceKind) -> Result<Vec<Resource>, ZoneError> {
        let mut resources = self.snapshot().await?;
        resources.retain(|r| r.kind() == kind && !r.is_assigned());
        Ok(resources)
    }

    /// Resources of `kind` currently assigned to `zone_id`, ordered by id.
    #[instrument(skip(self))]
    pub async fn assigned_resources(
        &self,
        zone_id: &ZoneId,
        kind: ResourceKind,
    ) -> Result<Vec<Resource>, ZoneError> {
        let mut resources = self.snapshot().await?;
        resources.retain(|r| r.kind() == kind && r.zone_ref() == Some(zone_id));
        Ok(resources)
    }

    /// Number of resources of either kind assigned to `zone_id`.
    #[instrument(skip(self))]
    pub async fn count_assigned(&self, zone_id: &ZoneId) -> Result<usize, ZoneError> {
        let resources = self.resources.list().await?;
        Ok(resources
            .iter()
            .filter(|r| r.zone_ref() == Some(zone_id))
            .count())
    }

    /// Points every listed resource of `kind` at `zone_id`, replacing any previous zone.
    ///
    /// The zone itself is not checked here; [`ZoneService`](crate::service::ZoneService)
    /// does that before calling.
    #[instrument(skip(self, ids), fields(count = ids.len()))]
    pub async fn assign_bulk(
        &self,
        ids: &BTreeSet<ResourceId>,
        zone_id: &ZoneId,
        kind: ResourceKind,
    ) -> BulkOutcome {
        let mut outcome = BulkOutcome::default();
        for id in ids {
            let result = self
                .resources
                .assign(id.clone(), kind, zone_id.clone())
                .await
                .map(|previous| match previous {
                    Some(previous) if &previous != zone_id => {
                        debug!(resource_id = %id, from = %previous, to = %zone_id, "Moved");
                    }
                    _ => debug!(resource_id = %id, zone_id = %zone_id, "Assigned"),
                })
                .map_err(ZoneError::from);
            outcome.record(id.clone(), result);
        }
        info!(
            succeeded = outcome.succeeded.len(),
            failed = outcome.failed.len(),
            "Bulk assign finished"
        );
        outcome
    }

    /// Clears the zone of every listed resource of `kind`.
    #[instrument(skip(self, ids), fields(count = ids.len()))]
    pub async fn unassign_bulk(&self, ids: &BTreeSet<ResourceId>, kind: ResourceKind) -> BulkOutcome {
        let mut outcome = BulkOutcome::default();
        for id in ids {
            let result = self
                .resources
                .unassign(id.clone(), kind)
                .await
                .map(|previous| debug!(resource_id = %id, previous = ?previous, "Unassigned"))
                .map_err(ZoneError::from);
            outcome.record(id.clone(), result);
        }
        info!(
            succeeded = outcome.succeeded.len(),
            failed = outcome.failed.len(),
            "Bulk unassign finished"
        );
        outcome
    }

    /// Clears the zone of every resource still pointing at `zone_id`.
    ///
    /// A resource that was moved elsewhere between the listing and its action is left
    /// alone and not reported.
    #[instrument(skip(self))]
    pub async fn release_zone(&self, zone_id: &ZoneId) -> Result<BulkOutcome, ZoneError> {
        let referencing: Vec<ResourceId> = self
            .snapshot()
            .await?
            .into_iter()
            .filter(|r| r.zone_ref() == Some(zone_id))
            .map(|r| Assignable::id(&r).clone())
            .collect();

        let mut outcome = BulkOutcome::default();
        for id in referencing {
            match self.resources.release(id.clone(), zone_id.clone()).await {
                Ok(true) => outcome.record(id, Ok(())),
                Ok(false) => debug!(resource_id = %id, "Already moved, nothing to release"),
                Err(e) => outcome.record(id, Err(e.into())),
            }
        }
        info!(released = outcome.succeeded.len(), "Zone released");
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Circuit, Detector};
    use crate::resource_actor::{ResourceActionResult, ResourceError};
    use entity_store::mock::MockStore;
    use entity_store::StoreError;

    fn detector(id: &str, zone: Option<&str>) -> Resource {
        Resource::Detector(Detector {
            id: ResourceId::from(id),
            label: format!("Detector {}", id),
            address: 1,
            zone_id: zone.map(ZoneId::from),
        })
    }

    fn circuit(id: &str, zone: Option<&str>) -> Resource {
        Resource::Circuit(Circuit {
            id: ResourceId::from(id),
            label: format!("Circuit {}", id),
            channel: 1,
            zone_id: zone.map(ZoneId::from),
        })
    }

    fn ids(list: &[&str]) -> BTreeSet<ResourceId> {
        list.iter().map(|s| ResourceId::from(*s)).collect()
    }

    #[tokio::test]
    async fn test_assign_bulk_reports_each_id() {
        let mut mock = MockStore::<Resource>::new();
        // BTreeSet iterates in id order: d1, d2, missing
        mock.expect_action(ResourceId::from("d1"))
            .return_ok(ResourceActionResult::Assign { previous: None });
        mock.expect_action(ResourceId::from("d2"))
            .return_ok(ResourceActionResult::Assign {
                previous: Some(ZoneId::from("old")),
            });
        mock.expect_action(ResourceId::from("missing"))
            .return_err(StoreError::NotFound("missing".to_string()));

        let registry = ResourceAssignmentRegistry::new(ResourceClient::new(mock.client()));
        let outcome = registry
            .assign_bulk(
                &ids(&["d1", "d2", "missing"]),
                &ZoneId::from("z1"),
                ResourceKind::Detector,
            )
            .await;

        assert_eq!(outcome.succeeded, ids(&["d1", "d2"]));
        assert_eq!(
            outcome.failed.get(&ResourceId::from("missing")),
            Some(&ZoneError::ResourceNotFound {
                id: ResourceId::from("missing")
            })
        );
        assert!(!outcome.is_complete());
        mock.verify();
    }

    #[tokio::test]
    async fn test_store_failure_on_one_id_is_reported_inline() {
        let mut mock = MockStore::<Resource>::new();
        mock.expect_action(ResourceId::from("c1"))
            .return_err(StoreError::ActorClosed);
        mock.expect_action(ResourceId::from("c2"))
            .return_ok(ResourceActionResult::Unassign {
                previous: Some(ZoneId::from("z1")),
            });

        let registry = ResourceAssignmentRegistry::new(ResourceClient::new(mock.client()));
        let outcome = registry
            .unassign_bulk(&ids(&["c1", "c2"]), ResourceKind::Circuit)
            .await;

        assert_eq!(outcome.succeeded, ids(&["c2"]));
        assert!(matches!(
            outcome.failed.get(&ResourceId::from("c1")),
            Some(ZoneError::StoreUnavailable(_))
        ));
        mock.verify();
    }

    #[tokio::test]
    async fn test_kind_mismatch_is_reported_per_id() {
        let mut mock = MockStore::<Resource>::new();
        let mismatch = ResourceError::KindMismatch {
            id: ResourceId::from("c1"),
            expected: ResourceKind::Detector,
            actual: ResourceKind::Circuit,
        };
        mock.expect_action(ResourceId::from("c1"))
            .return_err(StoreError::EntityError(Box::new(mismatch)));

        let registry = ResourceAssignmentRegistry::new(ResourceClient::new(mock.client()));
        let outcome = registry
            .assign_bulk(&ids(&["c1"]), &ZoneId::from("z1"), ResourceKind::Detector)
            .await;

        assert!(outcome.succeeded.is_empty());
        assert_eq!(
            outcome.failed.get(&ResourceId::from("c1")).map(ZoneError::kind),
            Some(crate::error::ErrorKind::KindMismatch)
        );
    }

    #[tokio::test]
    async fn test_queries_filter_by_kind_and_zone() {
        let mut mock = MockStore::<Resource>::new();
        let inventory = vec![
            detector("d2", None),
            detector("d1", Some("z1")),
            circuit("c1", None),
            circuit("c2", Some("z1")),
            detector("d3", Some("z2")),
        ];
        mock.expect_list().return_ok(inventory.clone());
        mock.expect_list().return_ok(inventory.clone());
        mock.expect_list().return_ok(inventory);

        let registry = ResourceAssignmentRegistry::new(ResourceClient::new(mock.client()));

        let free = registry
            .unassigned_resources(ResourceKind::Detector)
            .await
            .unwrap();
        assert_eq!(free, vec![detector("d2", None)]);

        let in_z1 = registry
            .assigned_resources(&ZoneId::from("z1"), ResourceKind::Circuit)
            .await
            .unwrap();
        assert_eq!(in_z1, vec![circuit("c2", Some("z1"))]);

        assert_eq!(registry.count_assigned(&ZoneId::from("z1")).await, Ok(2));
        mock.verify();
    }

    #[tokio::test]
    async fn test_release_zone_skips_resources_moved_meanwhile() {
        let mut mock = MockStore::<Resource>::new();
        mock.expect_list().return_ok(vec![
            detector("d1", Some("z1")),
            circuit("c1", Some("z1")),
            detector("d2", Some("z2")),
        ]);
        // Sorted by id: c1, d1
        mock.expect_action(ResourceId::from("c1"))
            .return_ok(ResourceActionResult::Release(true));
        mock.expect_action(ResourceId::from("d1"))
            .return_ok(ResourceActionResult::Release(false));

        let registry = ResourceAssignmentRegistry::new(ResourceClient::new(mock.client()));
        let outcome = registry.release_zone(&ZoneId::from("z1")).await.unwrap();

        assert_eq!(outcome.succeeded, ids(&["c1"]));
        assert!(outcome.failed.is_empty());
        mock.verify();
    }

    #[tokio::test]
    async fn test_list_failure_fails_the_query() {
        let mut mock = MockStore::<Resource>::new();
        mock.expect_list().return_err(StoreError::ActorDropped);

        let registry = ResourceAssignmentRegistry::new(ResourceClient::new(mock.client()));
        assert!(matches!(
            registry.count_assigned(&ZoneId::from("z1")).await,
            Err(ZoneError::StoreUnavailable(_))
        ));
    }

    #[test]
    fn test_outcome_serializes_failures_as_api_errors() {
        let mut outcome = BulkOutcome::default();
        outcome.succeeded.insert(ResourceId::from("d1"));
        outcome.failed.insert(
            ResourceId::from("d9"),
            ZoneError::ResourceNotFound {
                id: ResourceId::from("d9"),
            },
        );

        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["succeeded"], serde_json::json!(["d1"]));
        assert_eq!(json["failed"]["d9"]["kind"], "not_found");
        assert_eq!(json["failed"]["d9"]["data"]["resource_id"], "d9");
    }
}
