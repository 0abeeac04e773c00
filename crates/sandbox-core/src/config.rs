//! Sandbox configuration.

use serde::{Deserialize, Serialize};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid sandbox config: {0}")]
    Json(#[from] serde_json::Error),
}

/// Tunables for one design session. Every field has a default, so a JSON
/// config only needs the keys it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SandboxConfig {
    /// Snap grid in canvas units. `0` behaves as `1`.
    pub grid_size: u32,
    /// Material subtotal → grand total factor (labor and overhead).
    pub labor_multiplier: f64,
    /// Canvas units per 3D scene unit.
    pub scene_scale: f64,
    /// Canvas point that maps to the 3D origin.
    pub scene_origin_x: f64,
    pub scene_origin_y: f64,
    /// Undo history depth; oldest entries are dropped past this.
    pub undo_depth: usize,
}

impl Default for SandboxConfig {
    fn default() -> Self {
        Self {
            grid_size: 20,
            labor_multiplier: crate::ledger::DEFAULT_LABOR_MULTIPLIER,
            scene_scale: 30.0,
            scene_origin_x: 600.0,
            scene_origin_y: 400.0,
            undo_depth: 100,
        }
    }
}

impl SandboxConfig {
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn partial_json_keeps_defaults() {
        let config = SandboxConfig::from_json(r#"{ "grid_size": 10, "undo_depth": 5 }"#).unwrap();
        assert_eq!(
            config,
            SandboxConfig {
                grid_size: 10,
                undo_depth: 5,
                ..SandboxConfig::default()
            }
        );
    }

    #[test]
    fn empty_object_is_default() {
        assert_eq!(SandboxConfig::from_json("{}").unwrap(), SandboxConfig::default());
    }

    #[test]
    fn malformed_json_errors() {
        assert!(SandboxConfig::from_json("{ grid_size: }").is_err());
    }
}
