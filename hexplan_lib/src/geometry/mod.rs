//! Hex-grid coordinates, vertical layers and tile rotations.

mod hex;
pub use hex::{axial_round, neighbors, NEIGHBOR_OFFSETS};

mod position;
pub use position::{layer_from_world_height, CellKey};

mod rotation;
pub use rotation::{InvalidRotation, TileRotation};
