//! [`StoreEntity`] implementation for [`Zone`].
//!
//! The store only enforces record-local rules (a trimmed, non-empty name and fresh
//! timestamps). Cross-zone rules such as parent existence and cycles belong to the
//! [`ZoneLifecycleGuard`](crate::guard::ZoneLifecycleGuard).

use crate::error::ZoneError;
use crate::model::{Zone, ZoneCreate, ZoneId, ZonePatch};
use chrono::Utc;
use entity_store::StoreEntity;

pub(crate) fn normalize_name(name: &str) -> Result<String, ZoneError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ZoneError::EmptyName);
    }
    Ok(trimmed.to_string())
}

impl StoreEntity for Zone {
    type Id = ZoneId;
    type Create = ZoneCreate;
    type Update = ZonePatch;
    type Action = ();
    type ActionResult = ();
    type Error = ZoneError;

    fn id(&self) -> &ZoneId {
        &self.id
    }

    fn from_create_params(id: ZoneId, params: ZoneCreate) -> Result<Self, Self::Error> {
        let name = normalize_name(&params.name)?;
        let mut zone = Zone::new(id, name, params.parent_id);
        zone.description = params.description;
        Ok(zone)
    }

    /// Applies a [`ZonePatch`] and bumps `updated_at`.
    ///
    /// The name is validated before anything is written, so a rejected patch leaves
    /// the zone untouched.
    fn on_update(&mut self, update: ZonePatch) -> Result<(), Self::Error> {
        let name = update.name.as_deref().map(normalize_name).transpose()?;
        if let Some(name) = name {
            self.name = name;
        }
        if let Some(parent_id) = update.parent_id {
            self.parent_id = parent_id;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        self.updated_at = Utc::now();
        Ok(())
    }

    fn handle_action(&mut self, _action: ()) -> Result<(), Self::Error> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_trims_name() {
        let zone = Zone::from_create_params(
            ZoneId::from("z"),
            ZoneCreate {
                name: "  Lobby ".to_string(),
                parent_id: None,
                description: Some("Ground floor".to_string()),
            },
        )
        .unwrap();

        assert_eq!(zone.name, "Lobby");
        assert_eq!(zone.description.as_deref(), Some("Ground floor"));
        assert_eq!(zone.created_at, zone.updated_at);
    }

    #[test]
    fn test_create_rejects_blank_name() {
        let result = Zone::from_create_params(
            ZoneId::from("z"),
            ZoneCreate {
                name: "   ".to_string(),
                parent_id: None,
                description: None,
            },
        );
        assert_eq!(result.unwrap_err(), ZoneError::EmptyName);
    }

    #[test]
    fn test_patch_is_tri_state() {
        let mut zone =
            Zone::new("b", "Boiler room", Some(ZoneId::from("a"))).with_description("Basement");

        zone.on_update(ZonePatch {
            name: None,
            parent_id: None,
            description: Some(None),
        })
        .unwrap();
        assert_eq!(zone.parent_id, Some(ZoneId::from("a")));
        assert_eq!(zone.description, None);

        zone.on_update(ZonePatch {
            parent_id: Some(None),
            ..Default::default()
        })
        .unwrap();
        assert!(zone.is_root());
    }

    #[test]
    fn test_rejected_patch_leaves_zone_untouched() {
        let mut zone = Zone::new("b", "Boiler room", None);
        let before = zone.clone();

        let result = zone.on_update(ZonePatch {
            name: Some(" ".to_string()),
            parent_id: Some(Some(ZoneId::from("x"))),
            description: None,
        });

        assert_eq!(result, Err(ZoneError::EmptyName));
        assert_eq!(zone, before);
    }
}
