//! The index of placed tiles by cell.

use bevy::prelude::*;
use hexx::Hex;
use indexmap::IndexMap;

use crate::{catalog::BiomeId, config::DEFAULT_MAX_LAYER, geometry::CellKey, tiles::PlacedTile};

/// The single source of truth for what is where.
///
/// Tiles are kept in the order they were placed, which is the order they are saved and reloaded in.
/// Only [`TilePlanner`](crate::planner::TilePlanner) writes to this index.
#[derive(Debug, Clone, PartialEq, Eq, Resource)]
pub struct OccupancyIndex {
    /// The tile stored at each occupied cell.
    ///
    /// The set of keys is the set of all occupied cells.
    tiles: IndexMap<CellKey, PlacedTile>,
    /// The highest layer any tile can sit on.
    ///
    /// Every height probe stops here: cells above are treated as empty.
    max_layer: u32,
}

impl Default for OccupancyIndex {
    fn default() -> Self {
        OccupancyIndex::new(DEFAULT_MAX_LAYER)
    }
}

impl OccupancyIndex {
    /// Creates an empty index whose height probes stop at `max_layer`.
    #[must_use]
    pub fn new(max_layer: u32) -> Self {
        OccupancyIndex {
            tiles: IndexMap::new(),
            max_layer,
        }
    }

    /// The highest layer any tile can sit on.
    #[inline]
    #[must_use]
    pub fn max_layer(&self) -> u32 {
        self.max_layer
    }

    /// The tile at `cell`, if any.
    #[inline]
    #[must_use]
    pub fn get(&self, cell: &CellKey) -> Option<&PlacedTile> {
        self.tiles.get(cell)
    }

    /// Is there a tile at `cell`?
    #[inline]
    #[must_use]
    pub fn is_occupied(&self, cell: &CellKey) -> bool {
        self.tiles.contains_key(cell)
    }

    /// The number of placed tiles.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// Are there no tiles at all?
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Every placed tile, in placement order.
    pub fn iter(&self) -> impl Iterator<Item = (&CellKey, &PlacedTile)> {
        self.tiles.iter()
    }

    /// Every placed tile of `biome`, in placement order.
    pub fn tiles_of_biome<'a>(
        &'a self,
        biome: &'a BiomeId,
    ) -> impl Iterator<Item = (&'a CellKey, &'a PlacedTile)> + 'a {
        self.tiles.iter().filter(move |(_, tile)| &tile.biome == biome)
    }

    /// The occupied layers of the column at `hex`, lowest first.
    #[must_use]
    pub fn layers_at(&self, hex: Hex) -> Vec<u32> {
        (0..=self.max_layer)
            .filter(|&layer| self.is_occupied(&CellKey::new(hex, layer)))
            .collect()
    }

    /// The highest occupied layer of the column at `hex`, or `None` if the column is empty.
    #[must_use]
    pub fn highest_layer(&self, hex: Hex) -> Option<u32> {
        (0..=self.max_layer)
            .rev()
            .find(|&layer| self.is_occupied(&CellKey::new(hex, layer)))
    }

    /// Stores `tile` at `cell`.
    ///
    /// Returns the tile back without storing it if the cell was already occupied.
    pub(crate) fn insert(&mut self, cell: CellKey, tile: PlacedTile) -> Result<(), PlacedTile> {
        if self.tiles.contains_key(&cell) {
            return Err(tile);
        }

        self.tiles.insert(cell, tile);
        Ok(())
    }

    /// Stores `tile` at `cell`, at `position` in placement order.
    ///
    /// Positions past the end store the tile last.
    /// Returns the tile back without storing it if the cell was already occupied.
    pub(crate) fn insert_at(
        &mut self,
        position: usize,
        cell: CellKey,
        tile: PlacedTile,
    ) -> Result<(), PlacedTile> {
        self.insert(cell, tile)?;

        let last = self.tiles.len() - 1;
        self.tiles.move_index(last, position.min(last));
        Ok(())
    }

    /// Removes the tile at `cell`, keeping the order of the remaining tiles.
    ///
    /// Returns the tile with the position it held in placement order.
    pub(crate) fn remove(&mut self, cell: &CellKey) -> Option<(usize, PlacedTile)> {
        self.tiles
            .shift_remove_full(cell)
            .map(|(position, _, tile)| (position, tile))
    }

    /// Removes every tile, returning them in placement order.
    pub(crate) fn take_all(&mut self) -> IndexMap<CellKey, PlacedTile> {
        std::mem::take(&mut self.tiles)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::{geometry::TileRotation, tiles::TileNumber};

    /// A grass tile for tests that only care about positions.
    pub(crate) fn grass_tile(number: u8, layer: u32) -> PlacedTile {
        PlacedTile {
            biome: BiomeId::new("gs_grass"),
            number: TileNumber::new(number).unwrap(),
            rotation: TileRotation::Deg0,
            layer,
        }
    }

    /// Stores a grass tile at `(q, r, layer)`, ignoring support rules.
    pub(crate) fn stack(index: &mut OccupancyIndex, q: i32, r: i32, layer: u32) {
        index
            .insert(CellKey::from_axial(q, r, layer), grass_tile(1, layer))
            .unwrap();
    }

    #[test]
    fn cells_hold_at_most_one_tile() {
        let mut index = OccupancyIndex::default();
        let cell = CellKey::from_axial(0, 0, 0);

        assert!(index.insert(cell, grass_tile(1, 0)).is_ok());
        assert_eq!(index.insert(cell, grass_tile(2, 0)), Err(grass_tile(2, 0)));
        assert_eq!(index.get(&cell), Some(&grass_tile(1, 0)));
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn removal_keeps_placement_order() {
        let mut index = OccupancyIndex::default();
        stack(&mut index, 0, 0, 0);
        stack(&mut index, 1, 0, 0);
        stack(&mut index, 2, 0, 0);

        let removed = index.remove(&CellKey::from_axial(1, 0, 0));
        assert_eq!(removed, Some((1, grass_tile(1, 0))));

        let order: Vec<i32> = index.iter().map(|(cell, _)| cell.hex.x).collect();
        assert_eq!(order, vec![0, 2]);
    }

    #[test]
    fn tiles_can_be_put_back_in_their_old_position() {
        let mut index = OccupancyIndex::default();
        stack(&mut index, 0, 0, 0);
        stack(&mut index, 1, 0, 0);
        stack(&mut index, 2, 0, 0);
        let before = index.clone();
        let order = |index: &OccupancyIndex| -> Vec<i32> {
            index.iter().map(|(cell, _)| cell.hex.x).collect()
        };

        let cell = CellKey::from_axial(0, 0, 0);
        let (position, tile) = index.remove(&cell).unwrap();
        assert_eq!(position, 0);

        index.insert_at(position, cell, tile.clone()).unwrap();
        assert_eq!(order(&index), vec![0, 1, 2]);
        assert_eq!(index, before);

        // Occupied cells are refused wherever they would go
        assert_eq!(index.insert_at(1, cell, tile.clone()), Err(tile.clone()));

        index.remove(&cell).unwrap();
        index.insert_at(99, cell, tile).unwrap();
        assert_eq!(order(&index), vec![1, 2, 0]);
    }

    #[test]
    fn layers_are_reported_lowest_first() {
        let mut index = OccupancyIndex::default();
        stack(&mut index, 0, 0, 3);
        stack(&mut index, 0, 0, 0);
        stack(&mut index, 0, 0, 1);
        stack(&mut index, 1, 0, 7);

        let hex = Hex { x: 0, y: 0 };
        assert_eq!(index.layers_at(hex), vec![0, 1, 3]);
        assert_eq!(index.highest_layer(hex), Some(3));
        assert_eq!(index.highest_layer(Hex { x: 5, y: 5 }), None);
    }

    #[test]
    fn probes_ignore_layers_above_the_maximum() {
        let mut index = OccupancyIndex::new(4);
        stack(&mut index, 0, 0, 2);
        stack(&mut index, 0, 0, 9);

        assert_eq!(index.highest_layer(Hex { x: 0, y: 0 }), Some(2));
    }
}
