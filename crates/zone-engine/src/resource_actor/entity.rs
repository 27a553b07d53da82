//! [`StoreEntity`] implementation for [`Resource`].
//!
//! Includes the zone reassignment actions used by the
//! [`ResourceAssignmentRegistry`](crate::registry::ResourceAssignmentRegistry).

use super::actions::{ResourceAction, ResourceActionResult};
use super::error::ResourceError;
use crate::model::{
    Assignable, Circuit, Detector, Resource, ResourceCreate, ResourceId, ResourceKind,
    ResourceUpdate,
};
use entity_store::StoreEntity;

fn check_label(label: String) -> Result<String, ResourceError> {
    if label.trim().is_empty() {
        return Err(ResourceError::EmptyLabel);
    }
    Ok(label)
}

impl Resource {
    fn expect_kind(&self, expected: ResourceKind) -> Result<(), ResourceError> {
        let actual = Assignable::kind(self);
        if actual != expected {
            return Err(ResourceError::KindMismatch {
                id: Assignable::id(self).clone(),
                expected,
                actual,
            });
        }
        Ok(())
    }
}

impl StoreEntity for Resource {
    type Id = ResourceId;
    type Create = ResourceCreate;
    type Update = ResourceUpdate;
    type Action = ResourceAction;
    type ActionResult = ResourceActionResult;
    type Error = ResourceError;

    fn id(&self) -> &ResourceId {
        Assignable::id(self)
    }

    /// New resources always start unassigned.
    fn from_create_params(id: ResourceId, params: ResourceCreate) -> Result<Self, Self::Error> {
        Ok(match params {
            ResourceCreate::Detector { label, address } => Resource::Detector(Detector {
                id,
                label: check_label(label)?,
                address,
                zone_id: None,
            }),
            ResourceCreate::Circuit { label, channel } => Resource::Circuit(Circuit {
                id,
                label: check_label(label)?,
                channel,
                zone_id: None,
            }),
        })
    }

    fn on_update(&mut self, update: ResourceUpdate) -> Result<(), Self::Error> {
        if let Some(label) = update.label {
            let label = check_label(label)?;
            match self {
                Resource::Detector(d) => d.label = label,
                Resource::Circuit(c) => c.label = label,
            }
        }
        Ok(())
    }

    /// Handles zone reassignment.
    ///
    /// # Actions
    /// - `Assign`: sets the zone, silently replacing a previous one
    /// - `Unassign`: clears the zone
    /// - `Release`: clears the zone only if it matches
    fn handle_action(&mut self, action: ResourceAction) -> Result<ResourceActionResult, Self::Error> {
        match action {
            ResourceAction::Assign { kind, zone_id } => {
                self.expect_kind(kind)?;
                let previous = self.set_zone_ref(Some(zone_id));
                Ok(ResourceActionResult::Assign { previous })
            }
            ResourceAction::Unassign { kind } => {
                self.expect_kind(kind)?;
                let previous = self.set_zone_ref(None);
                Ok(ResourceActionResult::Unassign { previous })
            }
            ResourceAction::Release { zone_id } => {
                if self.zone_ref() == Some(&zone_id) {
                    self.set_zone_ref(None);
                    Ok(ResourceActionResult::Release(true))
                } else {
                    Ok(ResourceActionResult::Release(false))
                }
            }
        }
    }
}
