//! Types for addressing a single cell of the layered grid.

use bevy::prelude::*;
use core::fmt::Display;
use hexx::Hex;
use serde::{Deserialize, Serialize};

use super::neighbors;

/// A single cell of the map: a hex column and a vertical layer within it.
///
/// At most one tile can occupy each cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct CellKey {
    /// The axial coordinate of the hex column.
    pub hex: Hex,
    /// The layer within the column, starting at 0 on the ground.
    pub layer: u32,
}

impl CellKey {
    /// Creates a new [`CellKey`] from a hex and a layer.
    #[inline]
    #[must_use]
    pub const fn new(hex: Hex, layer: u32) -> Self {
        CellKey { hex, layer }
    }

    /// Creates a new [`CellKey`] from raw axial coordinates.
    #[inline]
    #[must_use]
    pub const fn from_axial(q: i32, r: i32, layer: u32) -> Self {
        CellKey {
            hex: Hex { x: q, y: r },
            layer,
        }
    }

    /// The cell directly above this one.
    #[inline]
    #[must_use]
    pub fn above(&self) -> Self {
        CellKey {
            hex: self.hex,
            layer: self.layer + 1,
        }
    }

    /// The cell directly below this one, if this cell is not on the ground.
    #[inline]
    #[must_use]
    pub fn below(&self) -> Option<Self> {
        self.layer.checked_sub(1).map(|layer| CellKey {
            hex: self.hex,
            layer,
        })
    }

    /// The six cells that share this cell's layer and border it horizontally.
    #[inline]
    #[must_use]
    pub fn same_layer_neighbors(&self) -> [CellKey; 6] {
        let layer = self.layer;
        neighbors(self.hex).map(|hex| CellKey { hex, layer })
    }
}

impl Display for CellKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "q:{},r:{},y:{}", self.hex.x, self.hex.y, self.layer)
    }
}

/// Converts a world-space height (such as the point under the cursor) into a layer.
///
/// Each layer is `layer_height` world units tall; heights are rounded to the nearest layer.
/// Values outside of `0..=max_layer` are clamped.
#[must_use]
pub fn layer_from_world_height(world_y: f32, layer_height: f32, max_layer: u32) -> u32 {
    if world_y.is_nan() || layer_height.is_nan() || layer_height <= 0. {
        error!("Invalid cursor height {world_y} (layer height {layer_height}). Treating as ground level.");
        return 0;
    }

    let layer = (world_y / layer_height).round();
    if layer <= 0. {
        0
    } else if layer >= max_layer as f32 {
        max_layer
    } else {
        layer as u32
    }
}
