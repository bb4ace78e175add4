//! Local legality rules for placing tiles, and the default layer choice for a cursor.
//!
//! Every rule only looks at a cell's column and its six same-layer neighbors:
//! no global re-validation happens when the map changes.

use hexx::Hex;

use crate::geometry::{neighbors, CellKey};

use super::OccupancyIndex;

impl OccupancyIndex {
    /// Is a tile at `cell` braced, either by a tile directly below or by a neighbor on the same layer?
    ///
    /// Ground cells are always supported.
    #[must_use]
    pub fn is_supported(&self, cell: CellKey) -> bool {
        match cell.below() {
            None => true,
            Some(below) => {
                self.is_occupied(&below)
                    || cell
                        .same_layer_neighbors()
                        .iter()
                        .any(|neighbor| self.is_occupied(neighbor))
            }
        }
    }

    /// Could a tile legally be placed at `cell`?
    ///
    /// This checks that:
    /// - the layer is no higher than the maximum layer
    /// - the cell is empty
    /// - the cell is supported, see [`OccupancyIndex::is_supported`]
    #[must_use]
    pub fn can_place(&self, cell: CellKey) -> bool {
        cell.layer <= self.max_layer() && !self.is_occupied(&cell) && self.is_supported(cell)
    }

    /// The highest layer worth offering at `hex`.
    ///
    /// This is one above the tallest of the column and its neighbors,
    /// but never more than one above an existing column at `hex`.
    #[must_use]
    pub fn max_allowed_height(&self, hex: Hex) -> u32 {
        let here = self.highest_layer(hex);
        let tallest_neighbor = neighbors(hex)
            .into_iter()
            .filter_map(|neighbor| self.highest_layer(neighbor))
            .max();

        let height = match here.max(tallest_neighbor) {
            Some(tallest) => tallest + 1,
            None => 0,
        };

        let height = match here {
            Some(top) => height.min(top + 1),
            None => height,
        };

        height.min(self.max_layer())
    }

    /// The lowest layer in the column at `hex` where a tile could go right now.
    ///
    /// On an empty map this is the ground.
    #[must_use]
    pub fn lowest_legal_layer(&self, hex: Hex) -> u32 {
        if self.is_empty() {
            return 0;
        }

        (0..=self.max_layer())
            .find(|&layer| self.can_place(CellKey::new(hex, layer)))
            .unwrap_or(0)
    }

    /// The layer directly above the top of the column at `hex`,
    /// or [`OccupancyIndex::lowest_legal_layer`] if the column is empty.
    ///
    /// Used to keep stacking upwards when several tiles are placed on the same hex in a row.
    ///
    /// Saturates at the maximum layer: for a column that already reaches it,
    /// the suggested layer is occupied and [`OccupancyIndex::can_place`] is false.
    #[must_use]
    pub fn lowest_possible_level(&self, hex: Hex) -> u32 {
        match self.highest_layer(hex) {
            Some(top) => (top + 1).min(self.max_layer()),
            None => self.lowest_legal_layer(hex),
        }
    }

    /// Picks the layer a tile should go on at `hex` when the player points at `cursor_layer`,
    /// unless they have chosen a layer by hand.
    ///
    /// - An empty column gets its lowest legal layer.
    /// - A cursor at or above the top of the column stacks on top.
    /// - A cursor inside the column picks the lowest legal layer in the gap between the
    ///   occupied layers directly below and above it, falling back to stacking on top when
    ///   that gap has no legal cell.
    ///
    /// Like [`OccupancyIndex::lowest_possible_level`], this saturates at the maximum layer,
    /// so the suggestion for a full column is not placeable.
    #[must_use]
    pub fn smart_level(&self, hex: Hex, cursor_layer: u32) -> u32 {
        let layers = self.layers_at(hex);
        let Some(&top) = layers.last() else {
            return self.lowest_legal_layer(hex);
        };

        let cursor_layer = cursor_layer.min(self.max_layer());
        if cursor_layer >= top {
            return self.lowest_possible_level(hex);
        }

        let gap_start = layers
            .iter()
            .rev()
            .find(|&&layer| layer < cursor_layer)
            .map_or(0, |&below| below + 1);
        // The cursor is below the top, so some occupied layer lies above it
        let gap_end = layers
            .iter()
            .find(|&&layer| layer > cursor_layer)
            .copied()
            .unwrap_or(top);

        (gap_start..gap_end)
            .find(|&layer| self.can_place(CellKey::new(hex, layer)))
            .unwrap_or_else(|| self.lowest_possible_level(hex))
    }
}
