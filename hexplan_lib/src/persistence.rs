//! A serializable picture of a plan: what is owned, and every tile on the board.
//!
//! Tiles are saved in placement order.
//! Loading replays them through the placement path, so the rebuilt board and
//! inventory match what was saved.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    catalog::{BiomeId, PackId},
    errors::PlannerError,
    geometry::{CellKey, TileRotation},
    inventory::PlacementMode,
    tiles::{PlacedTile, TileNumber},
};

/// The snapshot format written by this version of the library.
pub const SNAPSHOT_VERSION: u32 = 1;

/// A saved plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanSnapshot {
    /// The format version, see [`SNAPSHOT_VERSION`].
    pub version: u32,
    /// Whether placements were limited by ownership.
    pub placement_mode: PlacementMode,
    /// Owned copies of each pack.
    #[serde(default)]
    pub pack_counts: IndexMap<PackId, u32>,
    /// Owned standalone sets of each biome.
    #[serde(default)]
    pub standalone_counts: IndexMap<BiomeId, u32>,
    /// Every tile on the board, in placement order.
    #[serde(default)]
    pub tiles: Vec<SavedTile>,
}

impl Default for PlanSnapshot {
    fn default() -> Self {
        PlanSnapshot {
            version: SNAPSHOT_VERSION,
            placement_mode: PlacementMode::default(),
            pack_counts: IndexMap::default(),
            standalone_counts: IndexMap::default(),
            tiles: Vec::new(),
        }
    }
}

impl PlanSnapshot {
    /// Writes the snapshot as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, SnapshotError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reads a snapshot from JSON.
    ///
    /// The version is not checked until the snapshot is loaded.
    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Fails unless this snapshot uses the current format.
    pub fn check_version(&self) -> Result<(), SnapshotError> {
        if self.version == SNAPSHOT_VERSION {
            Ok(())
        } else {
            Err(SnapshotError::UnsupportedVersion {
                found: self.version,
                expected: SNAPSHOT_VERSION,
            })
        }
    }
}

/// One tile of a saved plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedTile {
    /// The axial `q` coordinate.
    pub q: i32,
    /// The axial `r` coordinate.
    pub r: i32,
    /// The layer.
    pub layer: u32,
    /// The biome of the tile.
    pub biome: BiomeId,
    /// The tile within its biome set.
    pub number: TileNumber,
    /// The orientation.
    #[serde(default)]
    pub rotation: TileRotation,
}

impl SavedTile {
    /// Records a tile on the board.
    #[must_use]
    pub fn new(cell: CellKey, tile: &PlacedTile) -> Self {
        SavedTile {
            q: cell.hex.x,
            r: cell.hex.y,
            layer: cell.layer,
            biome: tile.biome.clone(),
            number: tile.number,
            rotation: tile.rotation,
        }
    }

    /// The cell the tile sat in.
    #[must_use]
    pub fn cell(&self) -> CellKey {
        CellKey::from_axial(self.q, self.r, self.layer)
    }

    /// The tile as it sat on the board.
    #[must_use]
    pub fn tile(&self) -> PlacedTile {
        PlacedTile {
            biome: self.biome.clone(),
            number: self.number,
            rotation: self.rotation,
            layer: self.layer,
        }
    }
}

/// A saved tile that could not be put back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedTile {
    /// The tile as saved.
    pub tile: SavedTile,
    /// Why it could not be placed.
    pub error: PlannerError,
}

/// The outcome of loading a snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// The number of tiles put on the board.
    pub placed: usize,
    /// The tiles that could not be put back, in saved order.
    pub skipped: Vec<SkippedTile>,
}

impl LoadReport {
    /// Did every saved tile make it back onto the board?
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.skipped.is_empty()
    }
}

/// A snapshot could not be read or loaded.
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// The data was not valid snapshot JSON.
    #[error("could not parse the saved plan: {0}")]
    Json(#[from] serde_json::Error),
    /// The snapshot was written by an incompatible version.
    #[error("saved plan has format version {found}, but only version {expected} is supported")]
    UnsupportedVersion {
        /// The version in the snapshot.
        found: u32,
        /// The version this library reads.
        expected: u32,
    },
}
