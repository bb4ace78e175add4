//! Ownership of biome sets, and how many copies of each tile are still free to place.

use serde::{Deserialize, Serialize};

use hexplan_macros::IterableEnum;

mod ledger;
pub use ledger::InventoryLedger;

/// Whether placements are limited by the tiles the player owns.
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, IterableEnum,
)]
pub enum PlacementMode {
    /// Every placement consumes a copy of its tile, and only owned copies can be placed.
    #[default]
    Limited,
    /// Anything can be placed; ownership only feeds the shopping list.
    Unlimited,
}

impl PlacementMode {
    /// Are placements checked against owned tiles?
    #[inline]
    #[must_use]
    pub fn is_limited(self) -> bool {
        self == PlacementMode::Limited
    }
}
