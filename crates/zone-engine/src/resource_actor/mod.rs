//! # Resource Store
//!
//! Keeps detector and circuit records and rewrites their zone references.
//!
//! Resource provisioning belongs to another part of the installation software; this
//! engine only reads resources and changes their `zone_id` through
//! [`ResourceAction`]s. The [`ResourceClient`](crate::clients::ResourceClient) still
//! exposes `provision` and `put` so a host (or a test) can load the inventory.
//!
//! ## Structure
//!
//! - [`entity`] - [`StoreEntity`](entity_store::StoreEntity) implementation for [`Resource`]
//! - [`actions`] - [`ResourceAction`] and [`ResourceActionResult`]
//! - [`error`] - [`ResourceError`]
//! - [`new()`] - Factory function that creates the store and its client
//!
//! ```rust,ignore
//! // Point a detector at a zone; any previous zone is replaced.
//! let previous = resource_client.assign(id, ResourceKind::Detector, zone_id).await?;
//! ```

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::clients::ResourceClient;
use crate::model::Resource;
use entity_store::StoreActor;

/// Creates a new resource store and its client.
pub fn new(buffer_size: usize) -> (StoreActor<Resource>, ResourceClient) {
    let (actor, generic_client) = StoreActor::new(buffer_size);
    (actor, ResourceClient::new(generic_client))
}
