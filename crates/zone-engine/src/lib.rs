//! # Zone Engine
//!
//! Hierarchical monitoring zones for a life-safety installation, and the assignment
//! of detectors and output circuits to those zones.
//!
//! - **[model]**: [`Zone`](model::Zone), [`Resource`](model::Resource) and their ids.
//! - **[zone_actor]** / **[resource_actor]**: [`entity_store`] actors holding the records.
//! - **[clients]**: typed facades over the store clients.
//! - **[tree]**: forest materialization and ancestry queries over a zone snapshot.
//! - **[guard]**: structural preconditions checked before every zone mutation.
//! - **[registry]**: bulk assignment and unassignment of resources.
//! - **[service]**: [`ZoneService`](service::ZoneService), the entry point for callers.
//! - **[lifecycle]**: [`ZoneSystem`](lifecycle::ZoneSystem) startup and shutdown.
//! - **[config]**: [`EngineConfig`](config::EngineConfig) and the delete policy.
//! - **[error]**: [`ZoneError`](error::ZoneError) and its API rendering.

pub mod clients;
pub mod config;
pub mod error;
pub mod guard;
pub mod lifecycle;
pub mod model;
pub mod registry;
pub mod resource_actor;
pub mod service;
pub mod tree;
pub mod zone_actor;
