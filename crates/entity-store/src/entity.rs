//! # StoreEntity Trait
//!
//! The contract every record type implements to live in a [`StoreActor`](crate::StoreActor).
//! Associated types pin down the id, the creation and update payloads, and the
//! entity-specific actions, so a zone patch can never be sent to a resource store.
//!
//! All hooks are synchronous: they run inside the actor task while it holds exclusive
//! access to the record, which is what makes an `Update` or `Action` an atomic
//! read-modify-write.

use std::fmt::{Debug, Display};
use std::hash::Hash;

/// Trait that any record must implement to be managed by a `StoreActor`.
pub trait StoreEntity: Clone + Send + Sync + 'static {
    /// The unique identifier for this record.
    /// Must be convertible from u32 for automatic id allocation.
    type Id: Eq + Hash + Clone + Send + Sync + Display + Debug + From<u32>;

    /// The data required to create a new record with a freshly allocated id.
    type Create: Send + Sync + Debug;

    /// The patch applied by an `Update` request.
    type Update: Send + Sync + Debug;

    /// Record-specific operations (e.g. reassigning a resource to a zone).
    type Action: Send + Sync + Debug;

    /// The result type returned by actions.
    type ActionResult: Send + Sync + Debug;

    /// The error type for this record. One enum per entity, shared by all hooks.
    type Error: std::error::Error + Send + Sync + 'static;

    /// The key this record is stored under.
    fn id(&self) -> &Self::Id;

    /// Construct the full record from an allocated id and the payload.
    fn from_create_params(id: Self::Id, params: Self::Create) -> Result<Self, Self::Error>;

    /// Apply a patch in place. On error the record must be left unchanged.
    fn on_update(&mut self, update: Self::Update) -> Result<(), Self::Error>;

    /// Handle a record-specific action.
    fn handle_action(&mut self, action: Self::Action) -> Result<Self::ActionResult, Self::Error>;
}
