//! # Observability & Tracing
//!
//! Every store logs its lifecycle and each request with structured fields, keyed by
//! `entity_type` (the short type name of the record, e.g. `Zone` or `Resource`):
//!
//! ```text
//! INFO Store started entity_type="Zone"
//! INFO Created entity_type="Zone" id=zone_1 size=1
//! WARN Not found entity_type="Zone" id=zone_9
//! INFO Shutdown entity_type="Zone" size=3
//! ```
//!
//! Request payloads (`?params`, `?update`, `?action`) are only emitted at `debug`.
//!
//! ```bash
//! RUST_LOG=info cargo run     # lifecycle and mutations
//! RUST_LOG=debug cargo run    # full payloads and reads
//! ```

use tracing_subscriber::EnvFilter;

/// Installs a compact `fmt` subscriber filtered by `RUST_LOG` (defaults to `info`).
///
/// Call once at process start; a second call panics because a global subscriber is
/// already set.
pub fn setup_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false) // entity_type identifies the source instead of module paths
        .compact()
        .init();
}
