//! Engine configuration.
//!
//! Values come from [`Default`], from serde (any format the host uses), or from the
//! environment via [`EngineConfig::from_env`]:
//!
//! | Variable                      | Meaning                               | Default |
//! |-------------------------------|---------------------------------------|---------|
//! | `ZONE_ENGINE_CHANNEL_BUFFER`  | mpsc capacity of each store actor     | `32`    |
//! | `ZONE_ENGINE_DELETE_POLICY`   | `keep`, `block` or `unassign`         | `keep`  |

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};
use std::str::FromStr;
use thiserror::Error;

pub const ENV_CHANNEL_BUFFER: &str = "ZONE_ENGINE_CHANNEL_BUFFER";
pub const ENV_DELETE_POLICY: &str = "ZONE_ENGINE_DELETE_POLICY";

/// What happens to resources still assigned to a zone when that zone is deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeletePolicy {
    /// Delete the zone and leave the resources' `zone_id` as it is.
    #[default]
    Keep,
    /// Refuse to delete while any resource references the zone.
    Block,
    /// Clear the `zone_id` of every referencing resource, then delete.
    Unassign,
}

impl DeletePolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeletePolicy::Keep => "keep",
            DeletePolicy::Block => "block",
            DeletePolicy::Unassign => "unassign",
        }
    }
}

impl Display for DeletePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DeletePolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "keep" => Ok(DeletePolicy::Keep),
            "block" => Ok(DeletePolicy::Block),
            "unassign" => Ok(DeletePolicy::Unassign),
            other => Err(ConfigError::InvalidValue {
                key: ENV_DELETE_POLICY,
                value: other.to_string(),
                reason: "expected one of keep, block, unassign".to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigError {
    #[error("Invalid value {value:?} for {key}: {reason}")]
    InvalidValue {
        key: &'static str,
        value: String,
        reason: String,
    },
}

/// Settings for a [`ZoneSystem`](crate::lifecycle::ZoneSystem).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Capacity of each store actor's request channel. Must be at least 1.
    pub channel_buffer: usize,
    pub delete_policy: DeletePolicy,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            channel_buffer: 32,
            delete_policy: DeletePolicy::default(),
        }
    }
}

impl EngineConfig {
    /// Reads overrides from the process environment; unset variables keep their defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an injectable variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(raw) = lookup(ENV_CHANNEL_BUFFER) {
            config.channel_buffer =
                raw.trim()
                    .parse()
                    .map_err(|e: std::num::ParseIntError| ConfigError::InvalidValue {
                        key: ENV_CHANNEL_BUFFER,
                        value: raw.clone(),
                        reason: e.to_string(),
                    })?;
        }
        if let Some(raw) = lookup(ENV_DELETE_POLICY) {
            config.delete_policy = raw.parse()?;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn with_channel_buffer(mut self, channel_buffer: usize) -> Self {
        self.channel_buffer = channel_buffer;
        self
    }

    pub fn with_delete_policy(mut self, delete_policy: DeletePolicy) -> Self {
        self.delete_policy = delete_policy;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.channel_buffer == 0 {
            return Err(ConfigError::InvalidValue {
                key: ENV_CHANNEL_BUFFER,
                value: "0".to_string(),
                reason: "channel buffer must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.channel_buffer, 32);
        assert_eq!(config.delete_policy, DeletePolicy::Keep);
        assert_eq!(EngineConfig::from_lookup(lookup(&[])).unwrap(), config);
    }

    #[test]
    fn test_env_overrides() {
        let config = EngineConfig::from_lookup(lookup(&[
            (ENV_CHANNEL_BUFFER, "8"),
            (ENV_DELETE_POLICY, " Unassign "),
        ]))
        .unwrap();

        assert_eq!(config.channel_buffer, 8);
        assert_eq!(config.delete_policy, DeletePolicy::Unassign);
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let err = EngineConfig::from_lookup(lookup(&[(ENV_DELETE_POLICY, "purge")])).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue { key: ENV_DELETE_POLICY, .. }
        ));

        let err = EngineConfig::from_lookup(lookup(&[(ENV_CHANNEL_BUFFER, "lots")])).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue { key: ENV_CHANNEL_BUFFER, .. }
        ));

        assert!(EngineConfig::from_lookup(lookup(&[(ENV_CHANNEL_BUFFER, "0")])).is_err());
    }

    #[test]
    fn test_deserialize_partial_config() {
        let config: EngineConfig =
            serde_json::from_str(r#"{ "delete_policy": "block" }"#).unwrap();
        assert_eq!(config.delete_policy, DeletePolicy::Block);
        assert_eq!(config.channel_buffer, 32);
    }
}
