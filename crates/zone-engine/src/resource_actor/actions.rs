//! Custom actions for the resource store.
//!
//! Zone references are rewritten only through these actions, so each reassignment
//! is a single read-modify-write inside the store task. Both actions name the
//! expected [`ResourceKind`]; a detector id sent with `Circuit` is rejected.

use crate::model::{ResourceKind, ZoneId};

#[derive(Debug, Clone)]
pub enum ResourceAction {
    /// Points the resource at `zone_id`, replacing any previous zone.
    Assign { kind: ResourceKind, zone_id: ZoneId },
    /// Clears the zone reference.
    Unassign { kind: ResourceKind },
    /// Clears the zone reference only if it currently points at `zone_id`.
    Release { zone_id: ZoneId },
}

/// Results from ResourceActions - variants match 1:1 with ResourceAction
#[derive(Debug, Clone, PartialEq)]
pub enum ResourceActionResult {
    Assign { previous: Option<ZoneId> },
    Unassign { previous: Option<ZoneId> },
    /// `true` if the reference was cleared.
    Release(bool),
}
