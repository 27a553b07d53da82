//! # System Lifecycle
//!
//! Starts the two store actors, wires their clients into a [`ZoneService`], and
//! shuts everything down again.
//!
//! ```rust,ignore
//! setup_tracing();
//! let system = ZoneSystem::new(EngineConfig::from_env()?);
//!
//! let root = system.service.create_zone(params).await?;
//! // ...
//!
//! system.shutdown().await?;
//! ```
//!
//! ## Shutdown
//!
//! Each store actor exits when the last sender for its channel is dropped.
//! [`ZoneSystem::shutdown`] drops every client it owns (including the ones inside
//! the service) and then awaits the actor tasks. Clones handed out to callers keep
//! their actor alive, so drop those first.
//!
//! ## Tracing
//!
//! [`setup_tracing`] installs the compact `tracing_subscriber` formatter filtered by
//! `RUST_LOG` (default `info`):
//!
//! ```bash
//! RUST_LOG=info cargo run      # Compact logs
//! RUST_LOG=debug cargo run     # Per-request detail
//! ```

pub mod zone_system;

pub use entity_store::tracing::setup_tracing;
pub use zone_system::*;
