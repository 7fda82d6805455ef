//! Network configuration.
//!
//! Loaded from JSON. Every field is optional and falls back to its default:
//!
//! ```json
//! {
//!   "backend": "memory",
//!   "race": { "capability": "swim", "default_lanes": 4 }
//! }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::model::Capability;
use crate::storage::BackendConfig;
use crate::Result;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
    pub backend: BackendConfig,
    pub race: RaceSettings,
}

/// How races pick their participants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RaceSettings {
    /// Capability a duck needs to be eligible for a lane.
    pub capability: Capability,
    /// Lanes used by `Network::run_default_race`.
    pub default_lanes: usize,
}

impl Default for RaceSettings {
    fn default() -> Self {
        Self {
            capability: Capability::Swim,
            default_lanes: 1,
        }
    }
}

impl NetworkConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json(&raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    #[test]
    fn test_empty_object_gives_defaults() {
        let cfg = NetworkConfig::from_json("{}").unwrap();
        assert_eq!(cfg, NetworkConfig::default());
        assert_eq!(cfg.race.capability, Capability::Swim);
        assert_eq!(cfg.race.default_lanes, 1);
    }

    #[test]
    fn test_partial_race_settings() {
        let cfg = NetworkConfig::from_json(r#"{"race": {"capability": "fly"}}"#).unwrap();
        assert_eq!(cfg.race.capability, Capability::Fly);
        assert_eq!(cfg.race.default_lanes, 1);
    }

    #[test]
    fn test_backend_names_are_snake_case() {
        let cfg = NetworkConfig::from_json(
            r#"{"backend": "memory", "race": {"capability": "swim", "default_lanes": 4}}"#,
        )
        .unwrap();
        assert_eq!(cfg.backend, BackendConfig::Memory);
        assert_eq!(cfg.race.default_lanes, 4);
        assert!(NetworkConfig::from_json(r#"{"backend": "Memory"}"#).is_err());

        let json = serde_json::to_string(&NetworkConfig::default()).unwrap();
        assert!(json.contains(r#""backend":"memory""#), "{json}");
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(NetworkConfig::from_json("{race"), Err(Error::Config(_))));
    }

    #[test]
    fn test_missing_file() {
        let err = NetworkConfig::from_path("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
