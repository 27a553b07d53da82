//! Type-safe facades around [`StoreClient`](entity_store::StoreClient).

pub mod resource_client;
pub mod zone_client;

pub use resource_client::*;
pub use zone_client::*;
