//! Rotation of tiles in 60 degree steps.

use core::fmt::Display;
use hexplan_macros::IterableEnum;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::enum_iter::IterableEnum;

/// The orientation of a placed tile around its vertical axis.
///
/// Serialized as the angle in degrees.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, IterableEnum, Serialize, Deserialize,
)]
#[serde(try_from = "u16", into = "u16")]
pub enum TileRotation {
    /// Unrotated.
    #[default]
    Deg0,
    /// One step clockwise.
    Deg60,
    /// Two steps clockwise.
    Deg120,
    /// Half a turn.
    Deg180,
    /// Two steps counterclockwise.
    Deg240,
    /// One step counterclockwise.
    Deg300,
}

/// The angle could not be expressed as a whole number of 60 degree steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("{0} degrees is not a multiple of 60")]
pub struct InvalidRotation(pub u16);

impl TileRotation {
    /// The size of a single rotation step, in degrees.
    pub const STEP_DEGREES: u16 = 60;

    /// The angle of this rotation in degrees, in `0..360`.
    #[inline]
    #[must_use]
    pub fn degrees(self) -> u16 {
        self.index() as u16 * Self::STEP_DEGREES
    }

    /// The angle of this rotation in radians.
    #[inline]
    #[must_use]
    pub fn radians(self) -> f32 {
        f32::from(self.degrees()).to_radians()
    }

    /// Looks up the rotation matching `degrees`.
    ///
    /// Angles of a full turn or more wrap around.
    pub fn from_degrees(degrees: u16) -> Result<Self, InvalidRotation> {
        if degrees % Self::STEP_DEGREES != 0 {
            return Err(InvalidRotation(degrees));
        }

        let steps = (degrees % 360) / Self::STEP_DEGREES;
        Self::get_at(steps as usize).ok_or(InvalidRotation(degrees))
    }

    /// Rotates one step clockwise.
    #[inline]
    #[must_use]
    pub fn clockwise(self) -> Self {
        self.cycled(1)
    }

    /// Rotates one step counterclockwise.
    #[inline]
    #[must_use]
    pub fn counter_clockwise(self) -> Self {
        self.cycled(-1)
    }
}

impl TryFrom<u16> for TileRotation {
    type Error = InvalidRotation;

    fn try_from(degrees: u16) -> Result<Self, Self::Error> {
        TileRotation::from_degrees(degrees)
    }
}

impl From<TileRotation> for u16 {
    fn from(rotation: TileRotation) -> Self {
        rotation.degrees()
    }
}

impl Display for TileRotation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}°", self.degrees())
    }
}
