//! # Zone Store
//!
//! Durable key-value access to zone records: a [`StoreActor<Zone>`](entity_store::StoreActor)
//! behind the typed [`ZoneClient`] facade.
//!
//! ## Structure
//!
//! - [`entity`] - [`StoreEntity`](entity_store::StoreEntity) implementation for [`Zone`]
//! - [`new()`] - Factory function that creates the store and its client
//!
//! ## Usage
//!
//! ```rust
//! use entity_store::EntityClient;
//! use zone_engine::model::ZoneCreate;
//! use zone_engine::zone_actor;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let (actor, client) = zone_actor::new(32);
//!     tokio::spawn(actor.run());
//!
//!     let zone = client
//!         .create_zone(ZoneCreate {
//!             name: "Ground floor".to_string(),
//!             parent_id: None,
//!             description: None,
//!         })
//!         .await?;
//!     assert_eq!(zone.id.as_str(), "zone_1");
//!     assert_eq!(client.list().await?.len(), 1);
//!     Ok(())
//! }
//! ```
//!
//! The store validates nothing across records; the guard and the service do.

pub mod entity;

use crate::clients::ZoneClient;
use crate::model::Zone;
use entity_store::StoreActor;

/// Creates a new zone store and its client.
pub fn new(buffer_size: usize) -> (StoreActor<Zone>, ZoneClient) {
    let (actor, generic_client) = StoreActor::new(buffer_size);
    (actor, ZoneClient::new(generic_client))
}
