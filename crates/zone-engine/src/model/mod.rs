//! Plain data records ([`Zone`], [`Resource`]) and their request payloads.

pub mod resource;
pub mod zone;

pub use resource::*;
pub use zone::*;
