//! # Zone Client
//!
//! The ZoneStore facade: `get` / `list` / `delete` come from [`EntityClient`], the
//! write primitives are defined here. Store errors are translated into [`ZoneError`].
use crate::error::ZoneError;
use crate::model::{Zone, ZoneCreate, ZoneId, ZonePatch};
use entity_store::{EntityClient, StoreClient, StoreError};
use tracing::{debug, instrument};

/// Client for the zone store.
#[derive(Clone)]
pub struct ZoneClient {
    inner: StoreClient<Zone>,
}

impl ZoneClient {
    pub fn new(inner: StoreClient<Zone>) -> Self {
        Self { inner }
    }
}

impl EntityClient<Zone> for ZoneClient {
    type Error = ZoneError;

    fn inner(&self) -> &StoreClient<Zone> {
        &self.inner
    }

    fn map_error(e: StoreError) -> Self::Error {
        if let Some(zone_error) = e.entity_error::<ZoneError>() {
            return zone_error.clone();
        }
        match e {
            StoreError::NotFound(id) => ZoneError::NotFound { id: ZoneId(id) },
            other => ZoneError::StoreUnavailable(other.to_string()),
        }
    }
}

impl ZoneClient {
    /// Fetch a zone, treating absence as an error.
    #[instrument(skip(self))]
    pub async fn require(&self, id: ZoneId) -> Result<Zone, ZoneError> {
        self.get(id.clone())
            .await?
            .ok_or(ZoneError::NotFound { id })
    }

    /// Store a new zone under a freshly allocated id.
    #[instrument(skip(self))]
    pub async fn create_zone(&self, params: ZoneCreate) -> Result<Zone, ZoneError> {
        debug!("Sending request");
        self.inner.create(params).await.map_err(Self::map_error)
    }

    /// Upsert a zone under its own id. The caller has already validated it.
    #[instrument(skip(self, zone), fields(zone_id = %zone.id))]
    pub async fn put_zone(&self, zone: Zone) -> Result<Option<Zone>, ZoneError> {
        debug!("Sending request");
        self.inner.put(zone).await.map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn update_zone(&self, id: ZoneId, patch: ZonePatch) -> Result<Zone, ZoneError> {
        debug!("Sending request");
        self.inner.update(id, patch).await.map_err(Self::map_error)
    }
}
