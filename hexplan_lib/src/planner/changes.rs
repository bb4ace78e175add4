//! Notifications of successful mutations, for whoever draws the board or the shop.

use bevy::prelude::*;

use crate::{
    catalog::{BiomeId, PackId},
    geometry::CellKey,
    inventory::PlacementMode,
    tiles::PlacedTile,
};

/// Something the player can own copies of.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum OwnedItem {
    /// An environment pack.
    Pack(PackId),
    /// Standalone sets of a biome.
    Standalone(BiomeId),
}

/// A successful change to the board or the inventory.
///
/// Every mutation of a [`TilePlanner`](super::TilePlanner) appends one of these,
/// in the order the changes happened.
#[derive(Debug, Clone, PartialEq, Eq, Event)]
pub enum PlannerChange {
    /// A tile was put on the board, by a placement, an undo or a redo.
    TilePlaced {
        /// The cell that was filled.
        cell: CellKey,
        /// The tile now at `cell`.
        tile: PlacedTile,
    },
    /// A tile was taken off the board, by a removal, an undo or a redo.
    TileRemoved {
        /// The cell that was emptied.
        cell: CellKey,
        /// The tile that was at `cell`.
        tile: PlacedTile,
    },
    /// The whole board was emptied.
    Cleared {
        /// The number of tiles removed.
        removed: usize,
    },
    /// A cleared board was put back by an undo.
    Restored {
        /// The number of tiles put back.
        restored: usize,
    },
    /// The owned count of a pack or standalone set changed.
    OwnershipChanged {
        /// What is owned.
        item: OwnedItem,
        /// The count before the change.
        previous: u32,
        /// The count after the change.
        count: u32,
    },
    /// The placement mode was switched.
    ModeChanged {
        /// The new mode.
        mode: PlacementMode,
    },
    /// A saved plan replaced everything.
    Loaded {
        /// The number of tiles placed.
        placed: usize,
        /// The number of saved tiles that could not be placed.
        skipped: usize,
    },
}
