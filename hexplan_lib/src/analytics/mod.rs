//! Read-only analysis of what the current layout needs.
//!
//! Each owned set of a biome holds exactly one copy of every tile number,
//! so a layout that uses tile `k` of a biome `n` times needs at least `n` sets of that biome.

use indexmap::IndexMap;
use itertools::Itertools;

use crate::{
    catalog::{BiomeId, TILES_PER_BIOME},
    inventory::InventoryLedger,
    map::OccupancyIndex,
    tiles::TileNumber,
};

mod cover;
pub use cover::minimum_pack_cover;

/// The fewest sets of `biome` that could supply every placed tile of that biome.
///
/// This is the largest number of times any single tile number of the biome is used.
#[must_use]
pub fn min_required_sets(index: &OccupancyIndex, biome: &BiomeId) -> u32 {
    index
        .tiles_of_biome(biome)
        .map(|(_, tile)| tile.number)
        .counts()
        .into_values()
        .max()
        .unwrap_or(0) as u32
}

/// The biomes with at least one placed tile, in order of first placement.
#[must_use]
pub fn used_biomes(index: &OccupancyIndex) -> Vec<BiomeId> {
    index
        .iter()
        .map(|(_, tile)| &tile.biome)
        .unique()
        .cloned()
        .collect()
}

/// [`min_required_sets`] for every biome in use, in order of first placement.
#[must_use]
pub fn required_sets(index: &OccupancyIndex) -> IndexMap<BiomeId, u32> {
    used_biomes(index)
        .into_iter()
        .map(|biome| {
            let required = min_required_sets(index, &biome);
            (biome, required)
        })
        .collect()
}

/// How often each tile number of `biome` is used, indexed by `number - 1`.
#[must_use]
pub fn tile_usage(index: &OccupancyIndex, biome: &BiomeId) -> [u32; TILES_PER_BIOME as usize] {
    let mut usage = [0; TILES_PER_BIOME as usize];
    for (_, tile) in index.tiles_of_biome(biome) {
        usage[usize::from(tile.number.get()) - 1] += 1;
    }

    usage
}

/// The number of placements of one specific tile.
#[must_use]
pub fn placements_of(index: &OccupancyIndex, biome: &BiomeId, number: TileNumber) -> u32 {
    index
        .tiles_of_biome(biome)
        .filter(|(_, tile)| tile.number == number)
        .count() as u32
}

/// A biome whose placed tiles need more sets than are owned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shortfall {
    /// The under-owned biome.
    pub biome: BiomeId,
    /// Sets currently owned.
    pub owned: u32,
    /// Sets needed by the layout.
    pub required: u32,
}

impl Shortfall {
    /// How many more sets would need to be acquired.
    #[inline]
    #[must_use]
    pub fn missing(&self) -> u32 {
        self.required - self.owned
    }
}

/// Every biome whose placed tiles need more sets than the ledger owns.
///
/// In limited mode this is always empty; in unlimited mode it is the shopping list.
#[must_use]
pub fn ownership_shortfall(index: &OccupancyIndex, ledger: &InventoryLedger) -> Vec<Shortfall> {
    required_sets(index)
        .into_iter()
        .filter_map(|(biome, required)| {
            let owned = ledger.owned_sets(&biome);
            (required > owned).then_some(Shortfall {
                biome,
                owned,
                required,
            })
        })
        .collect()
}
