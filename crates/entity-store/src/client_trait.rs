//! # EntityClient Trait
//!
//! Common read/delete operations for record-specific client facades, built on top of a
//! generic [`StoreClient`] and a facade-specific error mapping.
use crate::{StoreClient, StoreEntity, StoreError};
use async_trait::async_trait;

/// Trait for record-specific clients to inherit the standard store operations.
///
/// Implementors provide access to the inner [`StoreClient`] and a mapping from
/// [`StoreError`] to their own error type; `get`, `list` and `delete` come for free.
///
/// ```rust
/// use entity_store::{EntityClient, StoreClient, StoreEntity, StoreError};
///
/// #[derive(Clone, Debug)] struct Panel { id: u32 }
/// #[derive(Debug)] struct PanelCreate;
/// #[derive(Debug)] struct PanelUpdate;
/// #[derive(Debug)] enum PanelAction {}
/// #[derive(Debug, thiserror::Error)] #[error("panel error: {0}")] struct PanelError(String);
///
/// impl StoreEntity for Panel {
///     type Id = u32; type Create = PanelCreate; type Update = PanelUpdate;
///     type Action = PanelAction; type ActionResult = (); type Error = PanelError;
///     fn id(&self) -> &u32 { &self.id }
///     fn from_create_params(id: u32, _: PanelCreate) -> Result<Self, Self::Error> { Ok(Self { id }) }
///     fn on_update(&mut self, _: PanelUpdate) -> Result<(), Self::Error> { Ok(()) }
///     fn handle_action(&mut self, action: PanelAction) -> Result<(), Self::Error> { match action {} }
/// }
///
/// struct PanelClient { inner: StoreClient<Panel> }
///
/// impl EntityClient<Panel> for PanelClient {
///     type Error = PanelError;
///     fn inner(&self) -> &StoreClient<Panel> { &self.inner }
///     fn map_error(e: StoreError) -> Self::Error { PanelError(e.to_string()) }
/// }
///
/// async fn usage(client: PanelClient) {
///     let _ = client.get(1).await;
///     let _ = client.list().await;
///     let _ = client.delete(1).await;
/// }
/// ```
#[async_trait]
pub trait EntityClient<T: StoreEntity>: Send + Sync {
    /// The facade-specific error type.
    type Error: Send + Sync;

    /// Access the inner generic StoreClient.
    fn inner(&self) -> &StoreClient<T>;

    /// Map store errors to the facade error type.
    fn map_error(e: StoreError) -> Self::Error;

    /// Fetch a record by id.
    #[tracing::instrument(skip(self))]
    async fn get(&self, id: T::Id) -> Result<Option<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().get(id).await.map_err(Self::map_error)
    }

    /// Snapshot every record.
    #[tracing::instrument(skip(self))]
    async fn list(&self) -> Result<Vec<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().list().await.map_err(Self::map_error)
    }

    /// Delete a record by id.
    #[tracing::instrument(skip(self))]
    async fn delete(&self, id: T::Id) -> Result<(), Self::Error> {
        tracing::debug!("Sending request");
        self.inner().delete(id).await.map_err(Self::map_error)
    }
}
