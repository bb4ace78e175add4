//! The transaction engine: the only place where the board and the inventory change.
//!
//! Every transaction either succeeds completely or leaves all state untouched.
//! Successful transactions are recorded for undo, and announced through [`PlannerChange`].

use std::collections::HashMap;

use bevy::prelude::*;
use hexx::Hex;
use indexmap::IndexMap;
use itertools::Itertools;

use crate::{
    analytics::{self, Shortfall},
    catalog::{BiomeId, PackId, TileCatalog},
    config::PlannerConfig,
    errors::PlannerError,
    geometry::{layer_from_world_height, CellKey, TileRotation},
    history::{ActionHistory, UndoAction},
    inventory::{InventoryLedger, PlacementMode},
    map::OccupancyIndex,
    persistence::{LoadReport, PlanSnapshot, SavedTile, SkippedTile, SnapshotError},
    tiles::{InstanceId, PlacedTile, TileNumber},
};

mod changes;
pub use changes::{OwnedItem, PlannerChange};

mod commands;
pub use commands::PlannerCommand;

/// Owns the board, the inventory and the history of a plan.
#[derive(Debug, Clone, Resource)]
pub struct TilePlanner {
    /// The biome sets and packs that exist.
    catalog: TileCatalog,
    /// The settings this planner was created with.
    config: PlannerConfig,
    /// The tiles on the board.
    occupancy: OccupancyIndex,
    /// What is owned, and how much of it is free.
    ledger: InventoryLedger,
    /// Transactions that can be undone or redone.
    history: ActionHistory,
    /// Changes that have not been drained yet.
    changes: Vec<PlannerChange>,
}

impl Default for TilePlanner {
    fn default() -> Self {
        TilePlanner::new(TileCatalog::default(), PlannerConfig::default())
    }
}

impl TilePlanner {
    /// Creates a planner with an empty board that owns nothing.
    #[must_use]
    pub fn new(catalog: TileCatalog, config: PlannerConfig) -> Self {
        TilePlanner {
            occupancy: OccupancyIndex::new(config.max_layer),
            ledger: InventoryLedger::new(config.placement_mode),
            history: ActionHistory::new(config.undo_capacity),
            catalog,
            config,
            changes: Vec::new(),
        }
    }

    /// The biome sets and packs that exist.
    pub fn catalog(&self) -> &TileCatalog {
        &self.catalog
    }

    /// The settings this planner was created with.
    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// The tiles on the board.
    pub fn occupancy(&self) -> &OccupancyIndex {
        &self.occupancy
    }

    /// What is owned, and how much of it is free.
    pub fn ledger(&self) -> &InventoryLedger {
        &self.ledger
    }

    /// Transactions that can be undone or redone.
    pub fn history(&self) -> &ActionHistory {
        &self.history
    }

    /// Takes every change announced since the last call, oldest first.
    pub fn drain_changes(&mut self) -> std::vec::Drain<'_, PlannerChange> {
        self.changes.drain(..)
    }

    /// Are there changes waiting to be drained?
    #[must_use]
    pub fn has_pending_changes(&self) -> bool {
        !self.changes.is_empty()
    }

    /// Places a tile at `cell`.
    ///
    /// Fails if:
    /// - the layer is above the maximum layer
    /// - the cell is occupied
    /// - nothing below or beside the cell holds it up
    /// - in [`PlacementMode::Limited`], every owned copy of the tile is already placed
    pub fn place(
        &mut self,
        cell: CellKey,
        biome: BiomeId,
        number: TileNumber,
        rotation: TileRotation,
    ) -> Result<(), PlannerError> {
        let tile = PlacedTile {
            biome,
            number,
            rotation,
            layer: cell.layer,
        };

        self.check_vacant(cell)?;
        if !self.occupancy.is_supported(cell) {
            return Err(PlannerError::Unsupported { cell });
        }

        self.commit_place(cell, tile.clone(), None)?;
        self.history.record(UndoAction::Place { cell, tile });
        Ok(())
    }

    /// Removes the tile at `cell`, returning it.
    ///
    /// Tiles resting on the removed one stay where they are.
    pub fn remove(&mut self, cell: CellKey) -> Result<PlacedTile, PlannerError> {
        let (position, tile) = self.commit_remove(cell)?;
        self.history.record(UndoAction::Remove {
            cell,
            tile: tile.clone(),
            position,
        });
        Ok(tile)
    }

    /// Removes every tile from the board as a single undoable transaction.
    ///
    /// Clearing an empty board does nothing and is not recorded.
    pub fn clear(&mut self) {
        if self.occupancy.is_empty() {
            return;
        }

        let (tiles, limits) = self.commit_clear();
        self.history.record(UndoAction::Clear { tiles, limits });
    }

    /// Inverts the most recent transaction.
    ///
    /// Returns `Ok(false)` if there was nothing to undo.
    /// If the inverse cannot be applied, nothing changes and the transaction stays undoable.
    pub fn undo(&mut self) -> Result<bool, PlannerError> {
        let Some(action) = self.history.pop_undo() else {
            return Ok(false);
        };

        let result = match &action {
            UndoAction::Place { cell, .. } => self.commit_remove(*cell).map(drop),
            UndoAction::Remove {
                cell,
                tile,
                position,
            } => self.commit_place(*cell, tile.clone(), Some(*position)),
            UndoAction::Clear { tiles, limits } => self.restore_cleared(tiles, limits),
        };

        match result {
            Ok(()) => {
                debug!("Undid {}", action.label());
                self.history.push_redo(action);
                Ok(true)
            }
            Err(error) => {
                self.history.return_undo(action);
                Err(error)
            }
        }
    }

    /// Applies the most recently undone transaction again.
    ///
    /// Returns `Ok(false)` if there was nothing to redo.
    /// If it cannot be applied, nothing changes and the transaction stays redoable.
    pub fn redo(&mut self) -> Result<bool, PlannerError> {
        let Some(action) = self.history.pop_redo() else {
            return Ok(false);
        };

        let result = match &action {
            UndoAction::Place { cell, tile } => self.commit_place(*cell, tile.clone(), None),
            UndoAction::Remove { cell, .. } => self.commit_remove(*cell).map(drop),
            UndoAction::Clear { .. } => {
                self.commit_clear();
                Ok(())
            }
        };

        match result {
            Ok(()) => {
                debug!("Redid {}", action.label());
                self.history.push_undo(action);
                Ok(true)
            }
            Err(error) => {
                self.history.push_redo(action);
                Err(error)
            }
        }
    }

    /// Sets the owned copies of `pack`, returning the previous count.
    ///
    /// See [`InventoryLedger::set_pack_count`] for when this is refused.
    pub fn set_pack_count(&mut self, pack: &PackId, count: u32) -> Result<u32, PlannerError> {
        let previous = self
            .ledger
            .set_pack_count(&self.catalog, &self.occupancy, pack, count)?;

        if previous != count {
            self.changes.push(PlannerChange::OwnershipChanged {
                item: OwnedItem::Pack(pack.clone()),
                previous,
                count,
            });
        }
        Ok(previous)
    }

    /// Sets the owned standalone sets of `biome`, returning the previous count.
    ///
    /// See [`InventoryLedger::set_standalone_count`] for when this is refused.
    pub fn set_standalone_count(
        &mut self,
        biome: &BiomeId,
        count: u32,
    ) -> Result<u32, PlannerError> {
        let previous =
            self.ledger
                .set_standalone_count(&self.catalog, &self.occupancy, biome, count)?;

        if previous != count {
            self.changes.push(PlannerChange::OwnershipChanged {
                item: OwnedItem::Standalone(biome.clone()),
                previous,
                count,
            });
        }
        Ok(previous)
    }

    /// Changes the owned copies of `pack` by `delta`, stopping at zero.
    ///
    /// Returns the previous count.
    pub fn adjust_pack_count(&mut self, pack: &PackId, delta: i32) -> Result<u32, PlannerError> {
        let count = self.ledger.pack_count(pack).saturating_add_signed(delta);
        self.set_pack_count(pack, count)
    }

    /// Changes the owned standalone sets of `biome` by `delta`, stopping at zero.
    ///
    /// Returns the previous count.
    pub fn adjust_standalone_count(
        &mut self,
        biome: &BiomeId,
        delta: i32,
    ) -> Result<u32, PlannerError> {
        let count = self.ledger.standalone_count(biome).saturating_add_signed(delta);
        self.set_standalone_count(biome, count)
    }

    /// Switches between limited and unlimited placement.
    ///
    /// Switching to [`PlacementMode::Limited`] counts the tiles already placed against ownership,
    /// and is refused if any biome on the board needs more sets than are owned.
    pub fn set_placement_mode(&mut self, mode: PlacementMode) -> Result<(), PlannerError> {
        if mode == self.ledger.mode() {
            return Ok(());
        }

        self.ledger
            .check_mode_switch(&self.catalog, &self.occupancy, mode)?;
        self.ledger.set_mode(&self.catalog, &self.occupancy, mode);

        info!("Placement mode is now {mode:?}");
        self.changes.push(PlannerChange::ModeChanged { mode });
        Ok(())
    }

    /// Captures everything needed to rebuild this plan.
    #[must_use]
    pub fn snapshot(&self) -> PlanSnapshot {
        PlanSnapshot {
            placement_mode: self.ledger.mode(),
            pack_counts: self.ledger.pack_counts().clone(),
            standalone_counts: self.ledger.standalone_counts().clone(),
            tiles: self
                .occupancy
                .iter()
                .map(|(&cell, tile)| SavedTile::new(cell, tile))
                .collect(),
            ..Default::default()
        }
    }

    /// Replaces the whole plan with a saved one.
    ///
    /// Ownership and mode are restored first, then every saved tile is placed in saved order.
    /// Tiles that cannot be placed are reported rather than failing the load.
    /// Both history stacks are emptied.
    pub fn load_snapshot(&mut self, snapshot: &PlanSnapshot) -> Result<LoadReport, SnapshotError> {
        snapshot.check_version()?;

        self.occupancy = OccupancyIndex::new(self.config.max_layer);
        self.ledger.reset(snapshot.placement_mode);
        self.history.clear();

        let ownership = snapshot
            .pack_counts
            .iter()
            .map(|(pack, &count)| (OwnedItem::Pack(pack.clone()), count))
            .chain(
                snapshot
                    .standalone_counts
                    .iter()
                    .map(|(biome, &count)| (OwnedItem::Standalone(biome.clone()), count)),
            );

        // Counts only grow from zero here, so no reduction check can fire
        for (item, count) in ownership {
            let result = match &item {
                OwnedItem::Pack(pack) => {
                    self.ledger
                        .set_pack_count(&self.catalog, &self.occupancy, pack, count)
                }
                OwnedItem::Standalone(biome) => {
                    self.ledger
                        .set_standalone_count(&self.catalog, &self.occupancy, biome, count)
                }
            };

            if let Err(error) = result {
                warn!("Could not restore ownership of {item:?}: {error}");
            }
        }

        let changes_before = self.changes.len();
        let mut report = LoadReport::default();
        for saved in &snapshot.tiles {
            match self.commit_place(saved.cell(), saved.tile(), None) {
                Ok(()) => report.placed += 1,
                Err(error) => {
                    warn!("Skipping saved tile at {}: {error}", saved.cell());
                    report.skipped.push(SkippedTile {
                        tile: saved.clone(),
                        error,
                    });
                }
            }
        }
        self.changes.truncate(changes_before);

        info!(
            "Loaded plan with {} tiles ({} skipped)",
            report.placed,
            report.skipped.len()
        );
        self.changes.push(PlannerChange::Loaded {
            placed: report.placed,
            skipped: report.skipped.len(),
        });

        Ok(report)
    }

    /// Could a tile legally be placed at `cell`?
    ///
    /// This only checks the board; see [`TilePlanner::remaining`] for inventory.
    #[must_use]
    pub fn can_place(&self, cell: CellKey) -> bool {
        self.occupancy.can_place(cell)
    }

    /// The tile at `cell`, if any.
    #[must_use]
    pub fn tile_at(&self, cell: CellKey) -> Option<&PlacedTile> {
        self.occupancy.get(&cell)
    }

    /// See [`OccupancyIndex::max_allowed_height`].
    #[must_use]
    pub fn max_allowed_height(&self, hex: Hex) -> u32 {
        self.occupancy.max_allowed_height(hex)
    }

    /// See [`OccupancyIndex::lowest_possible_level`].
    #[must_use]
    pub fn lowest_possible_level(&self, hex: Hex) -> u32 {
        self.occupancy.lowest_possible_level(hex)
    }

    /// The layer a placement at `hex` should default to, for a cursor at `cursor_height` world units.
    #[must_use]
    pub fn smart_level(&self, hex: Hex, cursor_height: f32) -> u32 {
        let cursor_layer =
            layer_from_world_height(cursor_height, self.config.layer_height, self.config.max_layer);
        self.occupancy.smart_level(hex, cursor_layer)
    }

    /// The remaining placements of a tile, or `None` if placements are unlimited.
    #[must_use]
    pub fn remaining(&self, biome: &BiomeId, number: TileNumber) -> Option<u32> {
        self.ledger
            .remaining(&InstanceId::new(biome.clone(), number))
    }

    /// See [`analytics::min_required_sets`].
    #[must_use]
    pub fn min_required_sets(&self, biome: &BiomeId) -> u32 {
        analytics::min_required_sets(&self.occupancy, biome)
    }

    /// See [`analytics::required_sets`].
    #[must_use]
    pub fn required_sets(&self) -> IndexMap<BiomeId, u32> {
        analytics::required_sets(&self.occupancy)
    }

    /// A short list of packs that together contain every biome on the board.
    ///
    /// See [`analytics::minimum_pack_cover`].
    #[must_use]
    pub fn minimum_pack_cover(&self) -> Vec<PackId> {
        analytics::minimum_pack_cover(&self.catalog, &analytics::used_biomes(&self.occupancy))
    }

    /// See [`analytics::ownership_shortfall`].
    #[must_use]
    pub fn ownership_shortfall(&self) -> Vec<Shortfall> {
        analytics::ownership_shortfall(&self.occupancy, &self.ledger)
    }

    /// Fails unless `cell` is within the layer limit and empty.
    fn check_vacant(&self, cell: CellKey) -> Result<(), PlannerError> {
        let max_layer = self.occupancy.max_layer();
        if cell.layer > max_layer {
            return Err(PlannerError::LayerOutOfRange {
                layer: cell.layer,
                max_layer,
            });
        }

        if self.occupancy.is_occupied(&cell) {
            return Err(PlannerError::CellOccupied { cell });
        }

        Ok(())
    }

    /// Puts `tile` at `cell` and takes a copy from the inventory, without checking support.
    ///
    /// The tile goes last in placement order, or at `position` if one is given.
    fn commit_place(
        &mut self,
        cell: CellKey,
        tile: PlacedTile,
        position: Option<usize>,
    ) -> Result<(), PlannerError> {
        self.check_vacant(cell)?;

        let instance = tile.instance_id();
        self.ledger.try_consume(&self.catalog, &instance)?;

        let inserted = match position {
            Some(position) => self.occupancy.insert_at(position, cell, tile.clone()),
            None => self.occupancy.insert(cell, tile.clone()),
        };
        if inserted.is_err() {
            self.ledger.release(&self.occupancy, &instance);
            return Err(PlannerError::CellOccupied { cell });
        }

        debug!("Placed {instance} at {cell}");
        self.changes.push(PlannerChange::TilePlaced { cell, tile });
        Ok(())
    }

    /// Takes the tile off `cell` and returns its copy to the inventory.
    ///
    /// Returns the tile with the position it held in placement order.
    fn commit_remove(&mut self, cell: CellKey) -> Result<(usize, PlacedTile), PlannerError> {
        let (position, tile) = self
            .occupancy
            .remove(&cell)
            .ok_or(PlannerError::NotFound { cell })?;
        self.ledger
            .release(&self.occupancy, &tile.instance_id());

        debug!("Removed {} from {cell}", tile.instance_id());
        self.changes.push(PlannerChange::TileRemoved {
            cell,
            tile: tile.clone(),
        });
        Ok((position, tile))
    }

    /// Empties the board, returning what it held and the limits before clearing.
    fn commit_clear(&mut self) -> (IndexMap<CellKey, PlacedTile>, HashMap<InstanceId, u32>) {
        let limits = self.ledger.instance_limits().clone();
        let tiles = self.occupancy.take_all();
        self.ledger.reconcile(&self.catalog, &self.occupancy);

        debug!("Cleared {} tiles", tiles.len());
        self.changes.push(PlannerChange::Cleared {
            removed: tiles.len(),
        });
        (tiles, limits)
    }

    /// Puts a cleared board back, checking it against current ownership.
    fn restore_cleared(
        &mut self,
        tiles: &IndexMap<CellKey, PlacedTile>,
        limits: &HashMap<InstanceId, u32>,
    ) -> Result<(), PlannerError> {
        if let Some(&cell) = tiles.keys().find(|cell| self.occupancy.is_occupied(cell)) {
            return Err(PlannerError::CellOccupied { cell });
        }

        if self.ledger.mode().is_limited() {
            let placed = self
                .occupancy
                .iter()
                .chain(tiles.iter())
                .map(|(_, tile)| tile.instance_id())
                .counts();

            // Sorted so the reported instance does not depend on hash order
            for (instance, count) in placed.into_iter().sorted() {
                if count as u32 > self.ledger.total_sets(&self.catalog, &instance.biome) {
                    return Err(PlannerError::InstanceExhausted { instance });
                }
            }
        }

        for (&cell, tile) in tiles {
            // Every cell was checked to be empty above
            let _ = self.occupancy.insert(cell, tile.clone());
        }
        self.ledger.restore_instance_limits(limits.clone());
        self.ledger.reconcile(&self.catalog, &self.occupancy);

        debug!("Restored {} tiles", tiles.len());
        self.changes.push(PlannerChange::Restored {
            restored: tiles.len(),
        });
        Ok(())
    }
}
