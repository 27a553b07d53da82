//! # Resource Client
//!
//! Provides a high‑level API for the resource store.
//! It wraps a `StoreClient<Resource>` and exposes the zone reassignment actions.
use crate::model::{Resource, ResourceCreate, ResourceId, ResourceKind, ZoneId};
use crate::resource_actor::{ResourceAction, ResourceActionResult, ResourceError};
use entity_store::{EntityClient, StoreClient, StoreError};
use tracing::{debug, instrument};

/// Client for the resource store.
#[derive(Clone)]
pub struct ResourceClient {
    inner: StoreClient<Resource>,
}

impl ResourceClient {
    pub fn new(inner: StoreClient<Resource>) -> Self {
        Self { inner }
    }
}

impl EntityClient<Resource> for ResourceClient {
    type Error = ResourceError;

    fn inner(&self) -> &StoreClient<Resource> {
        &self.inner
    }

    fn map_error(e: StoreError) -> Self::Error {
        if let Some(resource_error) = e.entity_error::<ResourceError>() {
            return resource_error.clone();
        }
        match e {
            StoreError::NotFound(id) => ResourceError::NotFound(ResourceId(id)),
            other => ResourceError::StoreCommunication(other.to_string()),
        }
    }
}

impl ResourceClient {
    /// Register a new device under a freshly allocated id (provisioning side).
    #[instrument(skip(self))]
    pub async fn provision(&self, params: ResourceCreate) -> Result<Resource, ResourceError> {
        debug!("Sending request");
        self.inner.create(params).await.map_err(Self::map_error)
    }

    /// Upsert a device record under its own id (provisioning side).
    #[instrument(skip(self))]
    pub async fn put_resource(&self, resource: Resource) -> Result<Option<Resource>, ResourceError> {
        debug!("Sending request");
        self.inner.put(resource).await.map_err(Self::map_error)
    }

    /// Point a resource at `zone_id`. Returns the zone it was previously assigned to.
    #[instrument(skip(self))]
    pub async fn assign(
        &self,
        id: ResourceId,
        kind: ResourceKind,
        zone_id: ZoneId,
    ) -> Result<Option<ZoneId>, ResourceError> {
        debug!("Sending request");
        match self
            .inner
            .perform_action(id, ResourceAction::Assign { kind, zone_id })
            .await
        {
            Ok(ResourceActionResult::Assign { previous }) => Ok(previous),
            Ok(_) => unreachable!("Assign action must return Assign result"),
            Err(e) => Err(Self::map_error(e)),
        }
    }

    /// Clear a resource's zone. Returns the zone it was previously assigned to.
    #[instrument(skip(self))]
    pub async fn unassign(
        &self,
        id: ResourceId,
        kind: ResourceKind,
    ) -> Result<Option<ZoneId>, ResourceError> {
        debug!("Sending request");
        match self
            .inner
            .perform_action(id, ResourceAction::Unassign { kind })
            .await
        {
            Ok(ResourceActionResult::Unassign { previous }) => Ok(previous),
            Ok(_) => unreachable!("Unassign action must return Unassign result"),
            Err(e) => Err(Self::map_error(e)),
        }
    }

    /// Clear a resource's zone if it still points at `zone_id`.
    #[instrument(skip(self))]
    pub async fn release(&self, id: ResourceId, zone_id: ZoneId) -> Result<bool, ResourceError> {
        debug!("Sending request");
        match self
            .inner
            .perform_action(id, ResourceAction::Release { zone_id })
            .await
        {
            Ok(ResourceActionResult::Release(cleared)) => Ok(cleared),
            Ok(_) => unreachable!("Release action must return Release result"),
            Err(e) => Err(Self::map_error(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Circuit;
    use entity_store::mock::{create_mock_client, expect_action, expect_put};

    #[tokio::test]
    async fn test_assign_sends_kind_and_zone() {
        let (client, mut receiver) = create_mock_client::<Resource>(10);
        let resource_client = ResourceClient::new(client);

        let assign_task = tokio::spawn(async move {
            resource_client
                .assign(
                    ResourceId::from("d1"),
                    ResourceKind::Detector,
                    ZoneId::from("z2"),
                )
                .await
        });

        let (id, action, responder) = expect_action(&mut receiver)
            .await
            .expect("Expected Action request");

        assert_eq!(id, ResourceId::from("d1"));
        match action {
            ResourceAction::Assign { kind, zone_id } => {
                assert_eq!(kind, ResourceKind::Detector);
                assert_eq!(zone_id, ZoneId::from("z2"));
            }
            _ => panic!("Expected Assign action"),
        }

        responder
            .send(Ok(ResourceActionResult::Assign {
                previous: Some(ZoneId::from("z1")),
            }))
            .unwrap();

        let result = assign_task.await.unwrap();
        assert_eq!(result, Ok(Some(ZoneId::from("z1"))));
    }

    #[tokio::test]
    async fn test_unassign_missing_resource() {
        let (client, mut receiver) = create_mock_client::<Resource>(10);
        let resource_client = ResourceClient::new(client);

        let unassign_task = tokio::spawn(async move {
            resource_client
                .unassign(ResourceId::from("gone"), ResourceKind::Circuit)
                .await
        });

        let (_, action, responder) = expect_action(&mut receiver)
            .await
            .expect("Expected Action request");
        assert!(matches!(
            action,
            ResourceAction::Unassign {
                kind: ResourceKind::Circuit
            }
        ));

        responder
            .send(Err(StoreError::NotFound("gone".to_string())))
            .unwrap();

        let result = unassign_task.await.unwrap();
        assert_eq!(
            result,
            Err(ResourceError::NotFound(ResourceId::from("gone")))
        );
    }

    #[tokio::test]
    async fn test_kind_mismatch_is_recovered_from_entity_error() {
        let (client, mut receiver) = create_mock_client::<Resource>(10);
        let resource_client = ResourceClient::new(client);

        let assign_task = tokio::spawn(async move {
            resource_client
                .assign(
                    ResourceId::from("c1"),
                    ResourceKind::Detector,
                    ZoneId::from("z1"),
                )
                .await
        });

        let (_, _, responder) = expect_action(&mut receiver)
            .await
            .expect("Expected Action request");
        let mismatch = ResourceError::KindMismatch {
            id: ResourceId::from("c1"),
            expected: ResourceKind::Detector,
            actual: ResourceKind::Circuit,
        };
        responder
            .send(Err(StoreError::EntityError(Box::new(mismatch.clone()))))
            .unwrap();

        assert_eq!(assign_task.await.unwrap(), Err(mismatch));
    }

    #[tokio::test]
    async fn test_put_resource_loads_inventory_record() {
        let (client, mut receiver) = create_mock_client::<Resource>(10);
        let resource_client = ResourceClient::new(client);

        let sounder = Resource::Circuit(Circuit {
            id: ResourceId::from("c7"),
            label: "Sounder".to_string(),
            channel: 3,
            zone_id: None,
        });
        let sent = sounder.clone();
        let put_task = tokio::spawn(async move { resource_client.put_resource(sent).await });

        let (entity, responder) = expect_put(&mut receiver)
            .await
            .expect("Expected Put request");
        assert_eq!(entity, sounder);
        responder.send(Ok(None)).unwrap();

        assert_eq!(put_task.await.unwrap(), Ok(None));
    }
}
