//! Assignable hardware: detectors and output circuits.
//!
//! Both kinds share the same assignment shape, so they are one tagged union
//! ([`Resource`]) with a [`ResourceKind`] discriminator and the [`Assignable`]
//! capability. The zone reference is a weak back-reference by id; zones never own
//! resources.

use crate::model::ZoneId;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Type-safe identifier for Resources.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourceId(pub String);

impl From<u32> for ResourceId {
    fn from(id: u32) -> Self {
        Self(format!("res_{}", id))
    }
}

impl From<&str> for ResourceId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for ResourceId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl Display for ResourceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    Detector,
    Circuit,
}

impl ResourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::Detector => "detector",
            ResourceKind::Circuit => "circuit",
        }
    }
}

impl Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The capability the assignment registry works against.
pub trait Assignable {
    fn id(&self) -> &ResourceId;
    fn kind(&self) -> ResourceKind;
    fn zone_ref(&self) -> Option<&ZoneId>;
    /// Replaces the zone reference, returning the previous one.
    fn set_zone_ref(&mut self, zone_id: Option<ZoneId>) -> Option<ZoneId>;

    fn is_assigned(&self) -> bool {
        self.zone_ref().is_some()
    }
}

/// A sensing device on a detection loop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Detector {
    pub id: ResourceId,
    pub label: String,
    /// Loop address of the device.
    pub address: u16,
    pub zone_id: Option<ZoneId>,
}

/// A signaling output (sounder, strobe, relay) driven by the panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Circuit {
    pub id: ResourceId,
    pub label: String,
    /// Panel output channel.
    pub channel: u8,
    pub zone_id: Option<ZoneId>,
}

macro_rules! impl_assignable {
    ($ty:ty, $kind:expr) => {
        impl Assignable for $ty {
            fn id(&self) -> &ResourceId {
                &self.id
            }

            fn kind(&self) -> ResourceKind {
                $kind
            }

            fn zone_ref(&self) -> Option<&ZoneId> {
                self.zone_id.as_ref()
            }

            fn set_zone_ref(&mut self, zone_id: Option<ZoneId>) -> Option<ZoneId> {
                std::mem::replace(&mut self.zone_id, zone_id)
            }
        }
    };
}

impl_assignable!(Detector, ResourceKind::Detector);
impl_assignable!(Circuit, ResourceKind::Circuit);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Resource {
    Detector(Detector),
    Circuit(Circuit),
}

impl Resource {
    fn inner(&self) -> &dyn Assignable {
        match self {
            Resource::Detector(d) => d,
            Resource::Circuit(c) => c,
        }
    }

    fn inner_mut(&mut self) -> &mut dyn Assignable {
        match self {
            Resource::Detector(d) => d,
            Resource::Circuit(c) => c,
        }
    }
}

impl Assignable for Resource {
    fn id(&self) -> &ResourceId {
        self.inner().id()
    }

    fn kind(&self) -> ResourceKind {
        self.inner().kind()
    }

    fn zone_ref(&self) -> Option<&ZoneId> {
        self.inner().zone_ref()
    }

    fn set_zone_ref(&mut self, zone_id: Option<ZoneId>) -> Option<ZoneId> {
        self.inner_mut().set_zone_ref(zone_id)
    }
}

/// Payload the provisioning side uses to register a new device.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ResourceCreate {
    Detector { label: String, address: u16 },
    Circuit { label: String, channel: u8 },
}

/// Provisioning-side edits. Zone references are only changed through actions.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResourceUpdate {
    pub label: Option<String>,
}
