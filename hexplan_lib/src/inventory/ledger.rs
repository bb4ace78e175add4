//! Tracks owned packs and standalone sets, and turns them into placement limits.
//!
//! Every owned set of a biome provides one copy of each of its numbered tiles.
//! In [`PlacementMode::Limited`], each [`InstanceId`] has a remaining count:
//! the sets owned of its biome, minus the copies already on the map.

use std::collections::{HashMap, HashSet};

use bevy::prelude::*;
use indexmap::IndexMap;
use itertools::Itertools;

use super::PlacementMode;
use crate::{
    analytics::{min_required_sets, used_biomes},
    catalog::{BiomeId, PackId, TileCatalog},
    errors::PlannerError,
    map::OccupancyIndex,
    tiles::{InstanceId, TileNumber},
};

/// The tiles the player owns, and how many of each are still free to place.
///
/// Counts of zero are never stored.
/// Biomes that are neither owned nor on the board are forgotten again,
/// so the ledger only depends on the mode, the counts and the tiles placed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Resource)]
pub struct InventoryLedger {
    /// Whether placements are limited by ownership.
    mode: PlacementMode,
    /// Owned copies of each environment pack, in order of first purchase.
    pack_counts: IndexMap<PackId, u32>,
    /// Owned standalone sets of each biome, in order of first purchase.
    standalone_counts: IndexMap<BiomeId, u32>,
    /// The total sets owned of each initialized biome.
    owned_sets: HashMap<BiomeId, u32>,
    /// The remaining placements of each tracked tile.
    ///
    /// Only populated in [`PlacementMode::Limited`].
    /// For every entry, `remaining <= owned_sets[biome]`.
    instance_limits: HashMap<InstanceId, u32>,
}

impl InventoryLedger {
    /// Creates an empty ledger that owns nothing.
    #[must_use]
    pub fn new(mode: PlacementMode) -> Self {
        InventoryLedger {
            mode,
            ..Default::default()
        }
    }

    /// Whether placements are limited by ownership.
    #[inline]
    #[must_use]
    pub fn mode(&self) -> PlacementMode {
        self.mode
    }

    /// The owned copies of `pack`.
    #[must_use]
    pub fn pack_count(&self, pack: &PackId) -> u32 {
        self.pack_counts.get(pack).copied().unwrap_or_default()
    }

    /// The owned standalone sets of `biome`.
    #[must_use]
    pub fn standalone_count(&self, biome: &BiomeId) -> u32 {
        self.standalone_counts.get(biome).copied().unwrap_or_default()
    }

    /// Every owned pack with its count, in order of first purchase.
    pub fn pack_counts(&self) -> &IndexMap<PackId, u32> {
        &self.pack_counts
    }

    /// Every biome owned as standalone sets with its count, in order of first purchase.
    pub fn standalone_counts(&self) -> &IndexMap<BiomeId, u32> {
        &self.standalone_counts
    }

    /// The total sets of `biome` owned, as of the last time the biome was initialized.
    #[must_use]
    pub fn owned_sets(&self, biome: &BiomeId) -> u32 {
        self.owned_sets.get(biome).copied().unwrap_or_default()
    }

    /// The remaining placements of `instance`.
    ///
    /// Returns `None` in [`PlacementMode::Unlimited`], where there is no limit.
    #[must_use]
    pub fn remaining(&self, instance: &InstanceId) -> Option<u32> {
        match self.mode {
            PlacementMode::Unlimited => None,
            PlacementMode::Limited => Some(
                self.instance_limits
                    .get(instance)
                    .copied()
                    .unwrap_or_else(|| self.owned_sets(&instance.biome)),
            ),
        }
    }

    /// The next tile number of `biome` after `after` that can still be placed, wrapping after the last.
    ///
    /// `after` itself is checked last.
    /// Returns `None` if every tile of the biome is used up.
    #[must_use]
    pub fn next_available_instance(&self, biome: &BiomeId, after: TileNumber) -> Option<TileNumber> {
        let mut number = after;
        for _ in 0..TileNumber::all().len() {
            number = number.next_wrapping();
            let instance = InstanceId::new(biome.clone(), number);
            if self.remaining(&instance) != Some(0) {
                return Some(number);
            }
        }

        None
    }

    /// The sets of `biome` provided by the current counts: packs times their quantity, plus standalone sets.
    ///
    /// Packs missing from `catalog` contribute nothing.
    #[must_use]
    pub fn total_sets(&self, catalog: &TileCatalog, biome: &BiomeId) -> u32 {
        let from_packs: u32 = self
            .pack_counts
            .iter()
            .filter_map(|(pack_id, &count)| {
                catalog
                    .pack(pack_id)
                    .map(|pack| pack.quantity_of(biome).saturating_mul(count))
            })
            .fold(0, u32::saturating_add);

        from_packs.saturating_add(self.standalone_count(biome))
    }

    /// Recomputes the sets owned of `biome` and brings its placement limits up to date.
    ///
    /// Untracked tiles start with every owned copy free.
    /// If the total changed, copies already used stay used:
    /// `remaining = new_total - (old_total - old_remaining)`, never below zero.
    ///
    /// Must run before placing a tile of `biome`, and after any change of ownership.
    pub fn ensure_biome_initialized(&mut self, catalog: &TileCatalog, biome: &BiomeId) {
        let new_total = self.total_sets(catalog, biome);
        let old_total = self.owned_sets.insert(biome.clone(), new_total);

        if !self.mode.is_limited() {
            return;
        }

        for instance in InstanceId::all_of(biome) {
            match self.instance_limits.get_mut(&instance) {
                None => {
                    self.instance_limits.insert(instance, new_total);
                }
                Some(remaining) => {
                    if let Some(old_total) = old_total.filter(|&old_total| old_total != new_total) {
                        let used = old_total.saturating_sub(*remaining);
                        *remaining = new_total.saturating_sub(used);
                    }
                }
            }
        }
    }

    /// Sets the owned copies of `pack`, returning the previous count.
    ///
    /// In [`PlacementMode::Limited`], a decrease is refused if any biome in the pack
    /// would end up with fewer sets than the tiles already placed need.
    pub fn set_pack_count(
        &mut self,
        catalog: &TileCatalog,
        index: &OccupancyIndex,
        pack_id: &PackId,
        count: u32,
    ) -> Result<u32, PlannerError> {
        let previous = self.pack_count(pack_id);
        if count == previous {
            return Ok(previous);
        }

        let affected: Vec<(BiomeId, u32)> = match catalog.pack(pack_id) {
            Some(pack) => pack
                .biomes()
                .unique()
                .map(|biome| (biome.clone(), pack.quantity_of(biome)))
                .collect(),
            None => {
                warn!("Pack {pack_id} is not in the catalog; owning it provides no sets.");
                Vec::new()
            }
        };

        if count < previous && self.mode.is_limited() {
            let removed = previous - count;
            for (biome, quantity) in &affected {
                let current_total = self.total_sets(catalog, biome);
                let requested_total =
                    current_total.saturating_sub(quantity.saturating_mul(removed));
                check_reduction(index, biome, current_total, requested_total)?;
            }
        }

        store_count(&mut self.pack_counts, pack_id, count);
        for (biome, _) in &affected {
            self.ensure_biome_initialized(catalog, biome);
            self.forget_if_unused(index, biome);
        }

        debug!("Pack {pack_id}: {previous} -> {count}");
        Ok(previous)
    }

    /// Sets the owned standalone sets of `biome`, returning the previous count.
    ///
    /// In [`PlacementMode::Limited`], a decrease is refused if the biome would end up
    /// with fewer sets than the tiles already placed need.
    pub fn set_standalone_count(
        &mut self,
        catalog: &TileCatalog,
        index: &OccupancyIndex,
        biome: &BiomeId,
        count: u32,
    ) -> Result<u32, PlannerError> {
        let previous = self.standalone_count(biome);
        if count == previous {
            return Ok(previous);
        }

        if catalog.biome(biome).is_none() {
            warn!("Biome {biome} is not in the catalog.");
        }

        if count < previous && self.mode.is_limited() {
            let current_total = self.total_sets(catalog, biome);
            let requested_total = current_total.saturating_sub(previous - count);
            check_reduction(index, biome, current_total, requested_total)?;
        }

        store_count(&mut self.standalone_counts, biome, count);
        self.ensure_biome_initialized(catalog, biome);
        self.forget_if_unused(index, biome);

        debug!("Standalone {biome}: {previous} -> {count}");
        Ok(previous)
    }

    /// Initializes the biome of `instance` and takes one copy of it.
    ///
    /// If every owned copy is already placed, this fails without changing anything.
    /// In [`PlacementMode::Unlimited`] this always succeeds.
    pub(crate) fn try_consume(
        &mut self,
        catalog: &TileCatalog,
        instance: &InstanceId,
    ) -> Result<(), PlannerError> {
        if self.mode.is_limited() {
            let available = self
                .instance_limits
                .get(instance)
                .copied()
                .unwrap_or_else(|| self.total_sets(catalog, &instance.biome));
            if available == 0 {
                return Err(PlannerError::InstanceExhausted {
                    instance: instance.clone(),
                });
            }
        }

        self.ensure_biome_initialized(catalog, &instance.biome);
        if let Some(remaining) = self.instance_limits.get_mut(instance) {
            *remaining = remaining.saturating_sub(1);
        }

        Ok(())
    }

    /// Returns one copy of `instance` to the pool, never exceeding the sets owned.
    ///
    /// `index` must no longer hold the released tile.
    pub(crate) fn release(&mut self, index: &OccupancyIndex, instance: &InstanceId) {
        let owned = self.owned_sets(&instance.biome);
        if let Some(remaining) = self.instance_limits.get_mut(instance) {
            *remaining = (*remaining + 1).min(owned);
        }

        self.forget_if_unused(index, &instance.biome);
    }

    /// Drops the tracking of `biome` if none of it is owned or placed.
    fn forget_if_unused(&mut self, index: &OccupancyIndex, biome: &BiomeId) {
        if self.owned_sets(biome) > 0 || index.tiles_of_biome(biome).next().is_some() {
            return;
        }

        self.owned_sets.remove(biome);
        self.instance_limits
            .retain(|instance, _| &instance.biome != biome);
    }

    /// The remaining placements of every tracked tile.
    pub(crate) fn instance_limits(&self) -> &HashMap<InstanceId, u32> {
        &self.instance_limits
    }

    /// Replaces the tracked placement limits wholesale.
    ///
    /// Follow with [`InventoryLedger::reconcile`] if ownership may have changed since `limits` was taken.
    pub(crate) fn restore_instance_limits(&mut self, limits: HashMap<InstanceId, u32>) {
        if self.mode.is_limited() {
            self.instance_limits = limits;
        }
    }

    /// Recomputes every placement limit from ownership and the tiles on the map.
    ///
    /// Every biome that is owned or in use ends up with `remaining = total - placed`.
    /// All other biomes are forgotten.
    pub(crate) fn reconcile(&mut self, catalog: &TileCatalog, index: &OccupancyIndex) {
        let placed = index.iter().map(|(_, tile)| tile.instance_id()).counts();
        let on_board: HashSet<&BiomeId> = index.iter().map(|(_, tile)| &tile.biome).collect();

        let owned_packs = self
            .pack_counts
            .keys()
            .filter_map(|pack_id| catalog.pack(pack_id))
            .flat_map(|pack| pack.biomes());
        let biomes: Vec<BiomeId> = on_board
            .iter()
            .copied()
            .chain(self.standalone_counts.keys())
            .chain(owned_packs)
            .unique()
            .cloned()
            .collect();

        self.owned_sets.clear();
        self.instance_limits.clear();
        for biome in biomes {
            let total = self.total_sets(catalog, &biome);
            if total == 0 && !on_board.contains(&biome) {
                continue;
            }
            self.owned_sets.insert(biome.clone(), total);

            if self.mode.is_limited() {
                for instance in InstanceId::all_of(&biome) {
                    let used = placed.get(&instance).copied().unwrap_or_default() as u32;
                    self.instance_limits
                        .insert(instance, total.saturating_sub(used));
                }
            }
        }
    }

    /// Checks that switching to `mode` would leave every placed tile backed by an owned set.
    pub(crate) fn check_mode_switch(
        &self,
        catalog: &TileCatalog,
        index: &OccupancyIndex,
        mode: PlacementMode,
    ) -> Result<(), PlannerError> {
        if !mode.is_limited() {
            return Ok(());
        }

        for biome in used_biomes(index) {
            let total = self.total_sets(catalog, &biome);
            check_reduction(index, &biome, total, total)?;
        }

        Ok(())
    }

    /// Switches placement mode without any checks, then recomputes every limit.
    pub(crate) fn set_mode(
        &mut self,
        catalog: &TileCatalog,
        index: &OccupancyIndex,
        mode: PlacementMode,
    ) {
        self.mode = mode;
        self.reconcile(catalog, index);
    }

    /// Forgets all ownership.
    pub(crate) fn reset(&mut self, mode: PlacementMode) {
        *self = InventoryLedger::new(mode);
    }
}

/// Stores `count` under `key`, pruning the entry when it reaches zero.
fn store_count<K: std::hash::Hash + Eq + Clone>(counts: &mut IndexMap<K, u32>, key: &K, count: u32) {
    if count == 0 {
        counts.shift_remove(key);
    } else {
        counts.insert(key.clone(), count);
    }
}

/// Refuses to own `requested_total` sets of `biome` if the tiles placed need more.
fn check_reduction(
    index: &OccupancyIndex,
    biome: &BiomeId,
    current_total: u32,
    requested_total: u32,
) -> Result<(), PlannerError> {
    let minimum_required = min_required_sets(index, biome);
    if requested_total < minimum_required {
        warn!(
            "Refusing to own {requested_total} sets of {biome}: placed tiles need {minimum_required}."
        );
        return Err(PlannerError::OwnershipReductionBlocked {
            biome: biome.clone(),
            current_total,
            requested_total,
            minimum_required,
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        catalog::tests::test_catalog,
        geometry::{CellKey, TileRotation},
        tiles::PlacedTile,
    };

    fn grass() -> BiomeId {
        BiomeId::new("gs_grass")
    }

    fn instance(biome: &str, number: u8) -> InstanceId {
        InstanceId::new(BiomeId::new(biome), TileNumber::new(number).unwrap())
    }

    /// Places a tile in the index and consumes it, like a committed placement.
    fn place(ledger: &mut InventoryLedger, index: &mut OccupancyIndex, q: i32, number: u8) {
        let catalog = test_catalog();
        let tile = PlacedTile {
            biome: grass(),
            number: TileNumber::new(number).unwrap(),
            rotation: TileRotation::Deg0,
            layer: 0,
        };
        ledger.try_consume(&catalog, &tile.instance_id()).unwrap();
        index.insert(CellKey::from_axial(q, 0, 0), tile).unwrap();
    }

    #[test]
    fn totals_combine_packs_and_standalone_sets() {
        let catalog = test_catalog();
        let index = OccupancyIndex::default();
        let mut ledger = InventoryLedger::default();

        ledger
            .set_pack_count(&catalog, &index, &PackId::new("starter"), 1)
            .unwrap();
        ledger
            .set_pack_count(&catalog, &index, &PackId::new("deluxe"), 2)
            .unwrap();
        ledger
            .set_standalone_count(&catalog, &index, &grass(), 3)
            .unwrap();

        // 1 * 1 + 2 * 2 + 3
        assert_eq!(ledger.owned_sets(&grass()), 8);
        assert_eq!(ledger.owned_sets(&BiomeId::new("gs_rock")), 2);
        assert_eq!(ledger.owned_sets(&BiomeId::new("gs_water")), 1);
        assert_eq!(ledger.remaining(&instance("gs_grass", 17)), Some(8));
    }

    #[test]
    fn unowned_biomes_have_nothing_to_place() {
        let catalog = test_catalog();
        let mut ledger = InventoryLedger::default();

        assert_eq!(ledger.remaining(&instance("gs_lava", 1)), Some(0));
        assert_eq!(
            ledger.try_consume(&catalog, &instance("gs_lava", 1)),
            Err(PlannerError::InstanceExhausted {
                instance: instance("gs_lava", 1)
            })
        );
    }

    #[test]
    fn refused_consumption_leaves_no_trace() {
        let catalog = test_catalog();
        let index = OccupancyIndex::default();
        let mut ledger = InventoryLedger::default();
        ledger.set_standalone_count(&catalog, &index, &grass(), 1).unwrap();
        let before = ledger.clone();

        assert!(ledger
            .try_consume(&catalog, &instance("gs_lava", 1))
            .is_err());
        assert_eq!(ledger, before);
        assert!(ledger
            .instance_limits()
            .keys()
            .all(|instance| instance.biome == grass()));
    }

    #[test]
    fn biomes_no_longer_owned_or_placed_are_forgotten() {
        let catalog = test_catalog();
        let mut index = OccupancyIndex::default();
        let empty = InventoryLedger::default();
        let mut ledger = empty.clone();

        ledger.set_standalone_count(&catalog, &index, &grass(), 2).unwrap();
        ledger.set_standalone_count(&catalog, &index, &grass(), 0).unwrap();
        assert_eq!(ledger, empty);

        ledger
            .set_pack_count(&catalog, &index, &PackId::new("volcano"), 1)
            .unwrap();
        ledger
            .set_pack_count(&catalog, &index, &PackId::new("volcano"), 0)
            .unwrap();
        assert_eq!(ledger, empty);

        // Placed tiles keep an unowned biome tracked until they are gone
        let mut unlimited = InventoryLedger::new(PlacementMode::Unlimited);
        let before = unlimited.clone();
        place(&mut unlimited, &mut index, 0, 5);
        assert_eq!(unlimited.owned_sets, HashMap::from([(grass(), 0)]));

        index.remove(&CellKey::from_axial(0, 0, 0)).unwrap();
        unlimited.release(&index, &instance("gs_grass", 5));
        assert_eq!(unlimited, before);
    }

    #[test]
    fn reconciling_matches_incremental_tracking() {
        let catalog = test_catalog();
        let mut index = OccupancyIndex::default();
        let mut ledger = InventoryLedger::default();
        ledger
            .set_pack_count(&catalog, &index, &PackId::new("deluxe"), 1)
            .unwrap();
        ledger.set_standalone_count(&catalog, &index, &grass(), 1).unwrap();
        place(&mut ledger, &mut index, 0, 3);
        place(&mut ledger, &mut index, 1, 3);

        let mut reconciled = ledger.clone();
        reconciled.reconcile(&catalog, &index);
        assert_eq!(reconciled, ledger);
    }

    #[test]
    fn unlimited_mode_has_no_limits() {
        let catalog = test_catalog();
        let mut ledger = InventoryLedger::new(PlacementMode::Unlimited);

        for _ in 0..10 {
            ledger.try_consume(&catalog, &instance("gs_lava", 1)).unwrap();
        }
        assert_eq!(ledger.remaining(&instance("gs_lava", 1)), None);
        assert!(ledger.instance_limits().is_empty());
    }

    #[test]
    fn consuming_and_releasing_tracks_remaining() {
        let catalog = test_catalog();
        let index = OccupancyIndex::default();
        let mut ledger = InventoryLedger::default();
        ledger.set_standalone_count(&catalog, &index, &grass(), 2).unwrap();
        let three = instance("gs_grass", 3);

        ledger.try_consume(&catalog, &three).unwrap();
        ledger.try_consume(&catalog, &three).unwrap();
        assert_eq!(ledger.remaining(&three), Some(0));
        assert!(ledger.try_consume(&catalog, &three).is_err());
        assert_eq!(ledger.remaining(&three), Some(0));

        ledger.release(&index, &three);
        ledger.release(&index, &three);
        ledger.release(&index, &three);
        assert_eq!(ledger.remaining(&three), Some(2));
    }

    #[test]
    fn growing_ownership_keeps_used_copies_used() {
        let catalog = test_catalog();
        let mut index = OccupancyIndex::default();
        let mut ledger = InventoryLedger::default();
        ledger.set_standalone_count(&catalog, &index, &grass(), 1).unwrap();

        place(&mut ledger, &mut index, 0, 3);
        assert_eq!(ledger.remaining(&instance("gs_grass", 3)), Some(0));

        ledger
            .set_pack_count(&catalog, &index, &PackId::new("deluxe"), 1)
            .unwrap();
        assert_eq!(ledger.owned_sets(&grass()), 3);
        assert_eq!(ledger.remaining(&instance("gs_grass", 3)), Some(2));
        assert_eq!(ledger.remaining(&instance("gs_grass", 4)), Some(3));
    }

    #[test]
    fn reductions_below_placed_tiles_are_refused() {
        let catalog = test_catalog();
        let mut index = OccupancyIndex::default();
        let mut ledger = InventoryLedger::default();
        ledger.set_standalone_count(&catalog, &index, &grass(), 2).unwrap();

        place(&mut ledger, &mut index, 0, 3);
        place(&mut ledger, &mut index, 1, 3);
        let before = ledger.clone();

        for count in [0, 1] {
            assert_eq!(
                ledger.set_standalone_count(&catalog, &index, &grass(), count),
                Err(PlannerError::OwnershipReductionBlocked {
                    biome: grass(),
                    current_total: 2,
                    requested_total: count,
                    minimum_required: 2,
                })
            );
        }

        assert_eq!(ledger, before);
        assert_eq!(ledger.standalone_count(&grass()), 2);
    }

    #[test]
    fn reducing_to_exactly_the_minimum_succeeds() {
        let catalog = test_catalog();
        let mut index = OccupancyIndex::default();
        let mut ledger = InventoryLedger::default();
        ledger
            .set_pack_count(&catalog, &index, &PackId::new("deluxe"), 2)
            .unwrap();

        place(&mut ledger, &mut index, 0, 9);
        place(&mut ledger, &mut index, 1, 9);

        // Dropping one deluxe pack would leave 2 grass sets: exactly enough
        assert_eq!(
            ledger.set_pack_count(&catalog, &index, &PackId::new("deluxe"), 1),
            Ok(2)
        );
        assert_eq!(ledger.remaining(&instance("gs_grass", 9)), Some(0));

        assert!(matches!(
            ledger.set_pack_count(&catalog, &index, &PackId::new("deluxe"), 0),
            Err(PlannerError::OwnershipReductionBlocked {
                current_total: 2,
                requested_total: 0,
                ..
            })
        ));
    }

    #[test]
    fn reductions_are_unchecked_in_unlimited_mode() {
        let catalog = test_catalog();
        let mut index = OccupancyIndex::default();
        let mut ledger = InventoryLedger::new(PlacementMode::Unlimited);
        place(&mut ledger, &mut index, 0, 1);

        ledger.set_standalone_count(&catalog, &index, &grass(), 1).unwrap();
        assert_eq!(
            ledger.set_standalone_count(&catalog, &index, &grass(), 0),
            Ok(1)
        );
    }

    #[test]
    fn zero_counts_are_pruned() {
        let catalog = test_catalog();
        let index = OccupancyIndex::default();
        let mut ledger = InventoryLedger::default();

        ledger
            .set_pack_count(&catalog, &index, &PackId::new("volcano"), 2)
            .unwrap();
        ledger
            .set_pack_count(&catalog, &index, &PackId::new("volcano"), 0)
            .unwrap();

        assert!(ledger.pack_counts().is_empty());
        assert_eq!(ledger.owned_sets(&BiomeId::new("gs_lava")), 0);
    }

    #[test]
    fn unknown_packs_are_stored_but_provide_nothing() {
        let catalog = test_catalog();
        let index = OccupancyIndex::default();
        let mut ledger = InventoryLedger::default();
        let mystery = PackId::new("mystery");

        assert_eq!(ledger.set_pack_count(&catalog, &index, &mystery, 4), Ok(0));
        assert_eq!(ledger.pack_count(&mystery), 4);
        assert_eq!(ledger.total_sets(&catalog, &grass()), 0);
    }

    #[test]
    fn next_available_instance_skips_used_up_tiles() {
        let catalog = test_catalog();
        let mut index = OccupancyIndex::default();
        let mut ledger = InventoryLedger::default();
        ledger.set_standalone_count(&catalog, &index, &grass(), 1).unwrap();

        place(&mut ledger, &mut index, 0, 4);
        place(&mut ledger, &mut index, 1, 50);

        let three = TileNumber::new(3).unwrap();
        assert_eq!(
            ledger.next_available_instance(&grass(), three),
            TileNumber::new(5)
        );
        assert_eq!(
            ledger.next_available_instance(&grass(), TileNumber::new(49).unwrap()),
            Some(TileNumber::FIRST)
        );
        assert_eq!(
            ledger.next_available_instance(&BiomeId::new("gs_lava"), three),
            None
        );
    }

    #[test]
    fn reconcile_counts_placed_tiles() {
        let catalog = test_catalog();
        let mut index = OccupancyIndex::default();
        let mut ledger = InventoryLedger::new(PlacementMode::Unlimited);
        ledger.set_standalone_count(&catalog, &index, &grass(), 3).unwrap();
        place(&mut ledger, &mut index, 0, 7);
        place(&mut ledger, &mut index, 1, 7);

        assert!(ledger
            .check_mode_switch(&catalog, &index, PlacementMode::Limited)
            .is_ok());
        ledger.set_mode(&catalog, &index, PlacementMode::Limited);

        assert_eq!(ledger.remaining(&instance("gs_grass", 7)), Some(1));
        assert_eq!(ledger.remaining(&instance("gs_grass", 8)), Some(3));
    }

    #[test]
    fn switching_to_limited_needs_enough_sets() {
        let catalog = test_catalog();
        let mut index = OccupancyIndex::default();
        let mut ledger = InventoryLedger::new(PlacementMode::Unlimited);
        place(&mut ledger, &mut index, 0, 7);

        assert!(matches!(
            ledger.check_mode_switch(&catalog, &index, PlacementMode::Limited),
            Err(PlannerError::OwnershipReductionBlocked {
                minimum_required: 1,
                ..
            })
        ));
        assert!(ledger
            .check_mode_switch(&catalog, &index, PlacementMode::Unlimited)
            .is_ok());
    }
}
