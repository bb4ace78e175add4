//! Errors returned by planner transactions.
//!
//! All of them are recoverable: a failed transaction leaves every piece of state untouched,
//! and the caller decides whether to tell the player.

use thiserror::Error;

use crate::{catalog::BiomeId, geometry::CellKey, tiles::InstanceId};

/// A transaction on the [`TilePlanner`](crate::planner::TilePlanner) was refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlannerError {
    /// A tile already sits in the target cell.
    #[error("cell {cell} is already occupied")]
    CellOccupied {
        /// The target cell.
        cell: CellKey,
    },
    /// There is no tile in the target cell.
    #[error("there is no tile at cell {cell}")]
    NotFound {
        /// The target cell.
        cell: CellKey,
    },
    /// Every owned copy of this tile is already on the map.
    #[error("every owned copy of {instance} is already placed")]
    InstanceExhausted {
        /// The tile that ran out.
        instance: InstanceId,
    },
    /// Owning fewer sets would leave placed tiles without a set to come from.
    #[error(
        "cannot own {requested_total} sets of {biome} (currently {current_total}): placed tiles need {minimum_required}"
    )]
    OwnershipReductionBlocked {
        /// The biome that would be under-owned.
        biome: BiomeId,
        /// The sets of `biome` owned now.
        current_total: u32,
        /// The sets of `biome` that would be owned after the change.
        requested_total: u32,
        /// The fewest sets that cover the tiles of `biome` already placed.
        minimum_required: u32,
    },
    /// Nothing below the target cell or beside it on the same layer holds the tile up.
    #[error("cell {cell} has no tile below it and no neighbor on its layer")]
    Unsupported {
        /// The target cell.
        cell: CellKey,
    },
    /// The target layer is above the configured maximum.
    #[error("layer {layer} is above the highest allowed layer {max_layer}")]
    LayerOutOfRange {
        /// The requested layer.
        layer: u32,
        /// The configured maximum.
        max_layer: u32,
    },
}
