//! Requests to mutate a [`TilePlanner`], as plain data.

use bevy::prelude::*;

use super::TilePlanner;
use crate::{
    catalog::{BiomeId, PackId},
    errors::PlannerError,
    geometry::{CellKey, TileRotation},
    inventory::PlacementMode,
    tiles::TileNumber,
};

/// A player interaction that changes the plan.
#[derive(Debug, Clone, PartialEq, Eq, Event)]
pub enum PlannerCommand {
    /// See [`TilePlanner::place`].
    Place {
        /// The target cell.
        cell: CellKey,
        /// The biome of the tile.
        biome: BiomeId,
        /// The tile within the biome set.
        number: TileNumber,
        /// The orientation of the tile.
        rotation: TileRotation,
    },
    /// See [`TilePlanner::remove`].
    Remove {
        /// The cell to empty.
        cell: CellKey,
    },
    /// See [`TilePlanner::clear`].
    Clear,
    /// See [`TilePlanner::undo`].
    Undo,
    /// See [`TilePlanner::redo`].
    Redo,
    /// See [`TilePlanner::set_pack_count`].
    SetPackCount {
        /// The pack.
        pack: PackId,
        /// The new owned count.
        count: u32,
    },
    /// See [`TilePlanner::set_standalone_count`].
    SetStandaloneCount {
        /// The biome.
        biome: BiomeId,
        /// The new owned count.
        count: u32,
    },
    /// See [`TilePlanner::adjust_pack_count`].
    AdjustPackCount {
        /// The pack.
        pack: PackId,
        /// The change in owned count.
        delta: i32,
    },
    /// See [`TilePlanner::adjust_standalone_count`].
    AdjustStandaloneCount {
        /// The biome.
        biome: BiomeId,
        /// The change in owned count.
        delta: i32,
    },
    /// See [`TilePlanner::set_placement_mode`].
    SetPlacementMode(PlacementMode),
}

impl TilePlanner {
    /// Runs a single command.
    ///
    /// Undo and redo with nothing on their stack succeed without doing anything.
    pub fn execute(&mut self, command: &PlannerCommand) -> Result<(), PlannerError> {
        match command {
            PlannerCommand::Place {
                cell,
                biome,
                number,
                rotation,
            } => self.place(*cell, biome.clone(), *number, *rotation),
            PlannerCommand::Remove { cell } => self.remove(*cell).map(drop),
            PlannerCommand::Clear => {
                self.clear();
                Ok(())
            }
            PlannerCommand::Undo => self.undo().map(drop),
            PlannerCommand::Redo => self.redo().map(drop),
            PlannerCommand::SetPackCount { pack, count } => {
                self.set_pack_count(pack, *count).map(drop)
            }
            PlannerCommand::SetStandaloneCount { biome, count } => {
                self.set_standalone_count(biome, *count).map(drop)
            }
            PlannerCommand::AdjustPackCount { pack, delta } => {
                self.adjust_pack_count(pack, *delta).map(drop)
            }
            PlannerCommand::AdjustStandaloneCount { biome, delta } => {
                self.adjust_standalone_count(biome, *delta).map(drop)
            }
            PlannerCommand::SetPlacementMode(mode) => self.set_placement_mode(*mode),
        }
    }
}
