//! Tracks which tile sits in each cell, and decides where new tiles may go.

pub(crate) mod occupancy;
pub use occupancy::OccupancyIndex;

mod rules;
