//! Plans layouts of numbered hexagonal terrain tiles, stacked in layers,
//! against the biome sets and environment packs a player owns.
//!
//! [`TilePlanner`](planner::TilePlanner) owns all mutable state; everything else reads it.

#![forbid(unsafe_code)]
#![warn(clippy::doc_markdown)]
#![warn(missing_docs)]

pub mod analytics;
pub mod catalog;
pub mod config;
pub mod enum_iter;
pub mod errors;
pub mod geometry;
pub mod history;
pub mod inventory;
pub mod map;
pub mod persistence;
pub mod planner;
pub mod plugin;
pub mod tiles;

/// The most commonly used types, for glob imports.
pub mod prelude {
    pub use crate::{
        catalog::{BiomeId, PackId, TileCatalog},
        config::PlannerConfig,
        errors::PlannerError,
        geometry::{CellKey, TileRotation},
        inventory::PlacementMode,
        persistence::{LoadReport, PlanSnapshot},
        planner::{PlannerChange, PlannerCommand, TilePlanner},
        plugin::{PlannerCommandRejected, PlannerPlugin},
        tiles::{InstanceId, PlacedTile, TileNumber},
    };
}
