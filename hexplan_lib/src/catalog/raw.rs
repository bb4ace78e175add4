//! The catalog as written in its JSON manifest, before validation.

use serde::{Deserialize, Serialize};

/// A biome set as seen in the catalog file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawBiomeSet {
    /// The string identifier of the biome, e.g. `gs_grass`.
    pub id: String,
    /// The display name.
    pub name: String,
}

/// One entry in the contents of an environment pack.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawPackComponent {
    /// The biome this component contributes sets of.
    pub biome: String,
    /// How many complete sets of that biome one copy of the pack contains.
    #[serde(default = "one")]
    pub quantity: u32,
}

/// The serde default for [`RawPackComponent::quantity`].
fn one() -> u32 {
    1
}

/// An environment pack as seen in the catalog file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawEnvironmentPack {
    /// The string identifier of the pack.
    pub id: String,
    /// The display name.
    pub name: String,
    /// The biome sets contained in the pack.
    pub components: Vec<RawPackComponent>,
}

/// The full catalog as seen in the manifest file.
///
/// Packs are kept in file order: it decides ties when choosing packs to cover a layout.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RawCatalog {
    /// Every biome set that can be owned.
    #[serde(default)]
    pub biomes: Vec<RawBiomeSet>,
    /// Every environment pack that can be bought.
    #[serde(default)]
    pub packs: Vec<RawEnvironmentPack>,
}
