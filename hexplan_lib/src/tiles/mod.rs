//! Numbered tiles, the instances they are counted against, and tiles placed on the map.

use core::fmt::Display;
use derive_more::Display;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    catalog::{BiomeId, TILES_PER_BIOME},
    geometry::TileRotation,
};

/// The position of a tile within its biome set, from 1 to [`TILES_PER_BIOME`].
#[derive(
    Debug, Display, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(try_from = "u8", into = "u8")]
pub struct TileNumber(u8);

/// The number is outside of `1..=TILES_PER_BIOME`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("tile number {0} is outside of 1..=50")]
pub struct InvalidTileNumber(pub u8);

impl TileNumber {
    /// The first tile of every set.
    pub const FIRST: TileNumber = TileNumber(1);

    /// The last tile of every set.
    pub const LAST: TileNumber = TileNumber(TILES_PER_BIOME);

    /// Creates a new tile number, if `number` is in `1..=TILES_PER_BIOME`.
    #[inline]
    #[must_use]
    pub const fn new(number: u8) -> Option<Self> {
        if number >= 1 && number <= TILES_PER_BIOME {
            Some(TileNumber(number))
        } else {
            None
        }
    }

    /// The raw number.
    #[inline]
    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }

    /// Every tile number of a set, in ascending order.
    pub fn all() -> impl DoubleEndedIterator<Item = TileNumber> + ExactSizeIterator {
        (1..=TILES_PER_BIOME).map(TileNumber)
    }

    /// The following tile number, wrapping from the last tile back to the first.
    #[inline]
    #[must_use]
    pub const fn next_wrapping(self) -> Self {
        if self.0 >= TILES_PER_BIOME {
            TileNumber::FIRST
        } else {
            TileNumber(self.0 + 1)
        }
    }
}

impl TryFrom<u8> for TileNumber {
    type Error = InvalidTileNumber;

    fn try_from(number: u8) -> Result<Self, Self::Error> {
        TileNumber::new(number).ok_or(InvalidTileNumber(number))
    }
}

impl From<TileNumber> for u8 {
    fn from(number: TileNumber) -> Self {
        number.0
    }
}

/// One numbered tile slot of a specific biome.
///
/// Every owned set of the biome provides one copy of each instance.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct InstanceId {
    /// The biome the tile belongs to.
    pub biome: BiomeId,
    /// The tile's position within the biome set.
    pub number: TileNumber,
}

impl InstanceId {
    /// Creates a new [`InstanceId`].
    #[inline]
    #[must_use]
    pub fn new(biome: BiomeId, number: TileNumber) -> Self {
        InstanceId { biome, number }
    }

    /// All [`TILES_PER_BIOME`] instances of `biome`.
    pub fn all_of(biome: &BiomeId) -> impl Iterator<Item = InstanceId> + '_ {
        TileNumber::all().map(move |number| InstanceId::new(biome.clone(), number))
    }
}

impl Display for InstanceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}_{}", self.biome, self.number)
    }
}

/// A tile sitting in a cell of the map.
///
/// Placed tiles are never edited: a changed tile is removed and placed again.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlacedTile {
    /// The biome the tile belongs to.
    pub biome: BiomeId,
    /// The tile's position within the biome set.
    pub number: TileNumber,
    /// The orientation of the tile.
    pub rotation: TileRotation,
    /// The layer the tile sits on.
    pub layer: u32,
}

impl PlacedTile {
    /// The instance this tile is counted against.
    #[inline]
    #[must_use]
    pub fn instance_id(&self) -> InstanceId {
        InstanceId::new(self.biome.clone(), self.number)
    }
}
