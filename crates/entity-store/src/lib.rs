//! # Entity Store
//!
//! This crate provides a small, type-safe, actor-backed keyed store. Every collection
//! of records (zones, detectors, circuits, ...) lives inside its own [`StoreActor`], a
//! Tokio task that owns a `HashMap` and processes requests one at a time. Callers talk
//! to it through a cloneable [`StoreClient`].
//!
//! ## Why an actor per collection?
//!
//! - **No locks**: the actor task is the only owner of its map, so a single request is
//!   always a serialized read-modify-write.
//! - **Independent collections**: requests against different stores run in parallel.
//! - **Uniform surface**: every collection exposes the same `get` / `list` / `put` /
//!   `delete` primitives plus id-allocating `create`, in-place `update`, and
//!   entity-specific `action` requests.
//!
//! ## Architecture Overview
//!
//! 1. **Entity Layer** ([`StoreEntity`]) - the record type and its update/action rules
//! 2. **Runtime Layer** ([`StoreActor`]) - message processing and ownership of state
//! 3. **Interface Layer** ([`StoreClient`], [`EntityClient`]) - typed async requests
//!
//! ```rust
//! use entity_store::{StoreActor, StoreEntity};
//!
//! #[derive(Clone, Debug)]
//! struct Sensor { id: u32, label: String }
//! #[derive(Debug)] struct SensorCreate { label: String }
//! #[derive(Debug)] struct SensorUpdate { label: Option<String> }
//! #[derive(Debug)] enum SensorAction {}
//! #[derive(Debug, thiserror::Error)] #[error("sensor error")] struct SensorError;
//!
//! impl StoreEntity for Sensor {
//!     type Id = u32;
//!     type Create = SensorCreate;
//!     type Update = SensorUpdate;
//!     type Action = SensorAction;
//!     type ActionResult = ();
//!     type Error = SensorError;
//!
//!     fn id(&self) -> &u32 { &self.id }
//!     fn from_create_params(id: u32, params: SensorCreate) -> Result<Self, Self::Error> {
//!         Ok(Self { id, label: params.label })
//!     }
//!     fn on_update(&mut self, update: SensorUpdate) -> Result<(), Self::Error> {
//!         if let Some(label) = update.label { self.label = label; }
//!         Ok(())
//!     }
//!     fn handle_action(&mut self, action: SensorAction) -> Result<(), Self::Error> {
//!         match action {}
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let (actor, client) = StoreActor::<Sensor>::new(10);
//!     tokio::spawn(actor.run());
//!
//!     let sensor = client.create(SensorCreate { label: "hall".into() }).await.unwrap();
//!     let fetched = client.get(sensor.id).await.unwrap().unwrap();
//!     assert_eq!(fetched.label, "hall");
//!     assert_eq!(client.list().await.unwrap().len(), 1);
//! }
//! ```
//!
//! ## Concurrency Model
//!
//! - Each store runs in its own Tokio task
//! - Requests are processed **sequentially** within a store
//! - Stores run in **parallel** with each other
//! - Dropping every client closes the channel and ends the task
//!
//! ## Testing
//!
//! The [`mock`] module provides a [`MockStore`](mock::MockStore) with queued expectations
//! and raw-channel helpers, so callers can be tested without a running actor and with
//! injected failures.

pub mod actor;
pub mod client;
pub mod client_trait;
pub mod entity;
pub mod error;
pub mod message;
pub mod mock;
pub mod tracing;

// Re-export core types for convenience
pub use actor::StoreActor;
pub use client::StoreClient;
pub use client_trait::EntityClient;
pub use entity::StoreEntity;
pub use error::StoreError;
pub use message::{Response, StoreRequest};
