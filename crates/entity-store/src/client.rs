//! # Store Client
//!
//! The typed, cloneable handle used to send requests to a [`StoreActor`](crate::StoreActor).

use crate::entity::StoreEntity;
use crate::error::StoreError;
use crate::message::StoreRequest;
use tokio::sync::{mpsc, oneshot};

/// A type-safe client for a `StoreActor`.
///
/// Holds only the channel sender, so cloning is cheap. Every method sends one request
/// and awaits its one-shot reply; a closed channel maps to [`StoreError::ActorClosed`]
/// and a dropped reply to [`StoreError::ActorDropped`].
#[derive(Clone)]
pub struct StoreClient<T: StoreEntity> {
    sender: mpsc::Sender<StoreRequest<T>>,
}

impl<T: StoreEntity> StoreClient<T> {
    pub fn new(sender: mpsc::Sender<StoreRequest<T>>) -> Self {
        Self { sender }
    }

    async fn request<R>(
        &self,
        build: impl FnOnce(oneshot::Sender<Result<R, StoreError>>) -> StoreRequest<T>,
    ) -> Result<R, StoreError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(build(respond_to))
            .await
            .map_err(|_| StoreError::ActorClosed)?;
        response.await.map_err(|_| StoreError::ActorDropped)?
    }

    pub async fn create(&self, params: T::Create) -> Result<T, StoreError> {
        self.request(|respond_to| StoreRequest::Create { params, respond_to })
            .await
    }

    pub async fn get(&self, id: T::Id) -> Result<Option<T>, StoreError> {
        self.request(|respond_to| StoreRequest::Get { id, respond_to })
            .await
    }

    pub async fn list(&self) -> Result<Vec<T>, StoreError> {
        self.request(|respond_to| StoreRequest::List { respond_to })
            .await
    }

    pub async fn put(&self, entity: T) -> Result<Option<T>, StoreError> {
        self.request(|respond_to| StoreRequest::Put { entity, respond_to })
            .await
    }

    pub async fn update(&self, id: T::Id, update: T::Update) -> Result<T, StoreError> {
        self.request(|respond_to| StoreRequest::Update {
            id,
            update,
            respond_to,
        })
        .await
    }

    pub async fn delete(&self, id: T::Id) -> Result<(), StoreError> {
        self.request(|respond_to| StoreRequest::Delete { id, respond_to })
            .await
    }

    pub async fn perform_action(
        &self,
        id: T::Id,
        action: T::Action,
    ) -> Result<T::ActionResult, StoreError> {
        self.request(|respond_to| StoreRequest::Action {
            id,
            action,
            respond_to,
        })
        .await
    }
}
