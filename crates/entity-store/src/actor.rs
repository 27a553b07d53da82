//! # Store Actor
//!
//! The server half of a store. A `StoreActor` owns the map of records and processes
//! every [`StoreRequest`] sequentially, so no request ever observes another one half-way.

use crate::client::StoreClient;
use crate::entity::StoreEntity;
use crate::error::StoreError;
use crate::message::StoreRequest;
use std::collections::HashMap;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// The actor that owns one collection of records.
///
/// **Concurrency Model**:
/// The actor processes its own requests *sequentially* in a loop, so the `store` needs no
/// `Mutex` or `RwLock`. Exclusive ownership of the map inside the task is the lock.
///
/// # Usage Pattern
///
/// 1. **Create**: `StoreActor::new()` returns the actor and a client.
/// 2. **Run**: spawn `actor.run()` on the runtime.
/// 3. **Use**: clone the client wherever requests are issued.
///
/// # Id Allocation
///
/// `Create` converts an internal `u32` counter into `T::Id`. Ids already present in the
/// store (for example, records inserted with `Put` under an explicit id) are skipped, so
/// an allocated id never overwrites an existing record.
pub struct StoreActor<T: StoreEntity> {
    receiver: mpsc::Receiver<StoreRequest<T>>,
    store: HashMap<T::Id, T>,
    next_id: u32,
}

impl<T: StoreEntity> StoreActor<T> {
    /// Creates a new `StoreActor` and its associated `StoreClient`.
    ///
    /// `buffer_size` is the capacity of the request channel; when it is full, client
    /// calls wait for space.
    pub fn new(buffer_size: usize) -> (Self, StoreClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            store: HashMap::new(),
            next_id: 1,
        };
        let client = StoreClient::new(sender);
        (actor, client)
    }

    fn allocate_id(&mut self) -> T::Id {
        loop {
            let candidate = T::Id::from(self.next_id);
            self.next_id = self.next_id.wrapping_add(1);
            if !self.store.contains_key(&candidate) {
                return candidate;
            }
        }
    }

    /// Runs the event loop until every client has been dropped.
    pub async fn run(mut self) {
        // Extract just the type name (e.g., "Zone" instead of "zone_engine::model::zone::Zone")
        let entity_type = std::any::type_name::<T>()
            .split("::")
            .last()
            .unwrap_or("Unknown");
        info!(entity_type, "Store started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                StoreRequest::Create { params, respond_to } => {
                    debug!(entity_type, ?params, "Create");
                    let id = self.allocate_id();
                    match T::from_create_params(id.clone(), params) {
                        Ok(item) => {
                            self.store.insert(id.clone(), item.clone());
                            info!(entity_type, %id, size = self.store.len(), "Created");
                            let _ = respond_to.send(Ok(item));
                        }
                        Err(e) => {
                            warn!(entity_type, error = %e, "Create failed");
                            let _ = respond_to.send(Err(StoreError::EntityError(Box::new(e))));
                        }
                    }
                }
                StoreRequest::Get { id, respond_to } => {
                    let item = self.store.get(&id).cloned();
                    let found = item.is_some();
                    debug!(entity_type, %id, found, "Get");
                    let _ = respond_to.send(Ok(item));
                }
                StoreRequest::List { respond_to } => {
                    debug!(entity_type, size = self.store.len(), "List");
                    let _ = respond_to.send(Ok(self.store.values().cloned().collect()));
                }
                StoreRequest::Put { entity, respond_to } => {
                    let id = entity.id().clone();
                    let previous = self.store.insert(id.clone(), entity);
                    info!(
                        entity_type,
                        %id,
                        replaced = previous.is_some(),
                        size = self.store.len(),
                        "Put"
                    );
                    let _ = respond_to.send(Ok(previous));
                }
                StoreRequest::Update {
                    id,
                    update,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?update, "Update");
                    if let Some(item) = self.store.get_mut(&id) {
                        if let Err(e) = item.on_update(update) {
                            warn!(entity_type, %id, error = %e, "Update failed");
                            let _ = respond_to.send(Err(StoreError::EntityError(Box::new(e))));
                            continue;
                        }
                        info!(entity_type, %id, "Updated");
                        let _ = respond_to.send(Ok(item.clone()));
                    } else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(StoreError::NotFound(id.to_string())));
                    }
                }
                StoreRequest::Delete { id, respond_to } => {
                    debug!(entity_type, %id, "Delete");
                    if self.store.remove(&id).is_some() {
                        info!(entity_type, %id, size = self.store.len(), "Deleted");
                        let _ = respond_to.send(Ok(()));
                    } else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(StoreError::NotFound(id.to_string())));
                    }
                }
                StoreRequest::Action {
                    id,
                    action,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?action, "Action");
                    if let Some(item) = self.store.get_mut(&id) {
                        let result = item
                            .handle_action(action)
                            .map_err(|e| StoreError::EntityError(Box::new(e)));
                        match &result {
                            Ok(_) => info!(entity_type, %id, "Action ok"),
                            Err(e) => warn!(entity_type, %id, error = %e, "Action failed"),
                        }
                        let _ = respond_to.send(result);
                    } else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(StoreError::NotFound(id.to_string())));
                    }
                }
            }
        }

        info!(entity_type, size = self.store.len(), "Shutdown");
    }
}
