//! Settings supplied by the embedding application.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::inventory::PlacementMode;

/// The highest layer a tile can be placed on, unless configured otherwise.
pub const DEFAULT_MAX_LAYER: u32 = 50;

/// The number of transactions that can be undone, unless configured otherwise.
pub const DEFAULT_UNDO_CAPACITY: usize = 100;

/// The height of one layer in world units, unless configured otherwise.
pub const DEFAULT_LAYER_HEIGHT: f32 = 1.0;

/// Configures a [`TilePlanner`](crate::planner::TilePlanner).
///
/// Missing fields in a config file fall back to their defaults.
#[derive(Debug, Clone, PartialEq, Resource, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    /// Whether placements are limited by the tiles the player owns.
    pub placement_mode: PlacementMode,
    /// How many transactions are kept for undo; the oldest are dropped first.
    pub undo_capacity: usize,
    /// The highest layer a tile can be placed on.
    pub max_layer: u32,
    /// The height of one layer in world units, used to turn cursor heights into layers.
    pub layer_height: f32,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        PlannerConfig {
            placement_mode: PlacementMode::default(),
            undo_capacity: DEFAULT_UNDO_CAPACITY,
            max_layer: DEFAULT_MAX_LAYER,
            layer_height: DEFAULT_LAYER_HEIGHT,
        }
    }
}

/// The config file could not be read.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file was not valid config JSON.
    #[error("could not parse the planner config: {0}")]
    Json(#[from] serde_json::Error),
}

impl PlannerConfig {
    /// Parses a config file.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_use_defaults() {
        let config = PlannerConfig::from_json(r#"{ "placement_mode": "Unlimited" }"#).unwrap();

        assert_eq!(config.placement_mode, PlacementMode::Unlimited);
        assert_eq!(config.undo_capacity, DEFAULT_UNDO_CAPACITY);
        assert_eq!(config.max_layer, DEFAULT_MAX_LAYER);
    }

    #[test]
    fn empty_config_is_default() {
        assert_eq!(PlannerConfig::from_json("{}").unwrap(), PlannerConfig::default());
    }

    #[test]
    fn garbage_is_an_error() {
        assert!(PlannerConfig::from_json("[1, 2]").is_err());
    }
}
