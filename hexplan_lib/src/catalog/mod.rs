//! Read-only reference data: biome sets and the environment packs that bundle them.
//!
//! The catalog is loaded once at startup from a JSON manifest.
//! Malformed references are tolerated: a pack component naming an unknown biome
//! contributes nothing.

use bevy::prelude::*;
use indexmap::IndexMap;
use thiserror::Error;

mod identifier;
pub use identifier::{Biome, Id, Pack};

mod raw;
pub use raw::{RawBiomeSet, RawCatalog, RawEnvironmentPack, RawPackComponent};

/// The identifier of a biome set.
pub type BiomeId = Id<Biome>;

/// The identifier of an environment pack.
pub type PackId = Id<Pack>;

/// The number of distinct numbered tiles in every biome set.
pub const TILES_PER_BIOME: u8 = 50;

/// A named category of exactly [`TILES_PER_BIOME`] numbered tiles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BiomeSet {
    /// The unique identifier.
    pub id: BiomeId,
    /// The display name.
    pub name: String,
}

/// A quantity of one biome set contained in a pack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackComponent {
    /// The biome contributed.
    pub biome: BiomeId,
    /// The number of complete sets of `biome` in one copy of the pack.
    pub quantity: u32,
}

/// A purchasable bundle of biome sets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvironmentPack {
    /// The unique identifier.
    pub id: PackId,
    /// The display name.
    pub name: String,
    /// The biome sets contained in one copy of this pack.
    pub components: Vec<PackComponent>,
}

impl EnvironmentPack {
    /// The number of sets of `biome` that one copy of this pack contributes.
    ///
    /// Saturates at [`u32::MAX`].
    #[must_use]
    pub fn quantity_of(&self, biome: &BiomeId) -> u32 {
        self.components
            .iter()
            .filter(|component| &component.biome == biome)
            .map(|component| component.quantity)
            .fold(0, u32::saturating_add)
    }

    /// Does this pack contain at least one set of `biome`?
    #[inline]
    #[must_use]
    pub fn covers(&self, biome: &BiomeId) -> bool {
        self.quantity_of(biome) > 0
    }

    /// The biomes this pack contains at least one set of.
    pub fn biomes(&self) -> impl Iterator<Item = &BiomeId> {
        self.components
            .iter()
            .filter(|component| component.quantity > 0)
            .map(|component| &component.biome)
    }
}

/// The catalog file could not be turned into a [`TileCatalog`].
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The file was not valid catalog JSON.
    #[error("could not parse the tile catalog: {0}")]
    Json(#[from] serde_json::Error),
    /// Two biome sets share an identifier.
    #[error("the biome {0} is defined more than once")]
    DuplicateBiome(BiomeId),
    /// Two packs share an identifier.
    #[error("the pack {0} is defined more than once")]
    DuplicatePack(PackId),
}

/// All biome sets and environment packs that exist.
///
/// Both collections preserve the order of the catalog file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Resource)]
pub struct TileCatalog {
    /// Biome sets, by identifier.
    biomes: IndexMap<BiomeId, BiomeSet>,
    /// Environment packs, by identifier.
    packs: IndexMap<PackId, EnvironmentPack>,
}

impl TileCatalog {
    /// Validates a raw catalog.
    ///
    /// Pack components that reference unknown biomes are dropped with a warning.
    pub fn from_raw(raw: RawCatalog) -> Result<Self, CatalogError> {
        let mut biomes = IndexMap::with_capacity(raw.biomes.len());
        for raw_biome in raw.biomes {
            let id = BiomeId::new(raw_biome.id);
            if biomes.contains_key(&id) {
                return Err(CatalogError::DuplicateBiome(id));
            }

            biomes.insert(
                id.clone(),
                BiomeSet {
                    id,
                    name: raw_biome.name,
                },
            );
        }

        let mut packs = IndexMap::with_capacity(raw.packs.len());
        for raw_pack in raw.packs {
            let id = PackId::new(raw_pack.id);
            if packs.contains_key(&id) {
                return Err(CatalogError::DuplicatePack(id));
            }

            let components = raw_pack
                .components
                .into_iter()
                .filter_map(|raw_component| {
                    let biome = BiomeId::new(raw_component.biome);
                    if biomes.contains_key(&biome) {
                        Some(PackComponent {
                            biome,
                            quantity: raw_component.quantity,
                        })
                    } else {
                        warn!("Pack {id} references unknown biome {biome}; it will contribute no sets.");
                        None
                    }
                })
                .collect();

            packs.insert(
                id.clone(),
                EnvironmentPack {
                    id,
                    name: raw_pack.name,
                    components,
                },
            );
        }

        Ok(TileCatalog { biomes, packs })
    }

    /// Parses and validates a catalog manifest.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let raw: RawCatalog = serde_json::from_str(json)?;
        Self::from_raw(raw)
    }

    /// Looks up a biome set.
    #[inline]
    #[must_use]
    pub fn biome(&self, id: &BiomeId) -> Option<&BiomeSet> {
        self.biomes.get(id)
    }

    /// All biome sets, in catalog order.
    pub fn biomes(&self) -> impl Iterator<Item = &BiomeSet> {
        self.biomes.values()
    }

    /// Looks up an environment pack.
    #[inline]
    #[must_use]
    pub fn pack(&self, id: &PackId) -> Option<&EnvironmentPack> {
        self.packs.get(id)
    }

    /// All environment packs, in catalog order.
    pub fn packs(&self) -> impl Iterator<Item = &EnvironmentPack> {
        self.packs.values()
    }

    /// The packs that contain at least one set of `biome`, in catalog order.
    pub fn packs_containing<'a>(
        &'a self,
        biome: &'a BiomeId,
    ) -> impl Iterator<Item = &'a EnvironmentPack> + 'a {
        self.packs.values().filter(move |pack| pack.covers(biome))
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// A small catalog shared by tests across the crate.
    ///
    /// - `starter` holds one set each of `gs_grass` and `gs_water`
    /// - `deluxe` holds two sets of `gs_grass` and one of `gs_rock`
    /// - `volcano` holds one set of `gs_lava`
    pub(crate) fn test_catalog() -> TileCatalog {
        let json = r#"{
            "biomes": [
                { "id": "gs_grass", "name": "Grassland" },
                { "id": "gs_water", "name": "Water" },
                { "id": "gs_rock", "name": "Rock" },
                { "id": "gs_lava", "name": "Lava" }
            ],
            "packs": [
                { "id": "starter", "name": "Starter", "components": [
                    { "biome": "gs_grass", "quantity": 1 },
                    { "biome": "gs_water", "quantity": 1 }
                ] },
                { "id": "deluxe", "name": "Deluxe", "components": [
                    { "biome": "gs_grass", "quantity": 2 },
                    { "biome": "gs_rock" }
                ] },
                { "id": "volcano", "name": "Volcano", "components": [
                    { "biome": "gs_lava", "quantity": 1 }
                ] }
            ]
        }"#;

        TileCatalog::from_json(json).unwrap()
    }

    #[test]
    fn quantities_sum_per_biome() {
        let catalog = test_catalog();
        let deluxe = catalog.pack(&"deluxe".into()).unwrap();

        assert_eq!(deluxe.quantity_of(&"gs_grass".into()), 2);
        assert_eq!(deluxe.quantity_of(&"gs_rock".into()), 1);
        assert_eq!(deluxe.quantity_of(&"gs_water".into()), 0);
    }

    #[test]
    fn huge_quantities_saturate() {
        let json = r#"{
            "biomes": [{ "id": "gs_grass", "name": "Grassland" }],
            "packs": [
                { "id": "hoard", "name": "Hoard", "components": [
                    { "biome": "gs_grass", "quantity": 4294967295 },
                    { "biome": "gs_grass", "quantity": 4294967295 }
                ] }
            ]
        }"#;
        let catalog = TileCatalog::from_json(json).unwrap();
        let hoard = catalog.pack(&"hoard".into()).unwrap();

        assert_eq!(hoard.quantity_of(&"gs_grass".into()), u32::MAX);
    }

    #[test]
    fn packs_keep_file_order() {
        let catalog = test_catalog();
        let names: Vec<&str> = catalog.packs().map(|pack| pack.id.name()).collect();
        assert_eq!(names, vec!["starter", "deluxe", "volcano"]);

        let grass = BiomeId::new("gs_grass");
        let containing: Vec<&str> = catalog
            .packs_containing(&grass)
            .map(|pack| pack.id.name())
            .collect();
        assert_eq!(containing, vec!["starter", "deluxe"]);
    }

    #[test]
    fn unknown_biomes_are_dropped_from_packs() {
        let json = r#"{
            "biomes": [{ "id": "gs_grass", "name": "Grassland" }],
            "packs": [{ "id": "odd", "name": "Odd", "components": [
                { "biome": "gs_grass", "quantity": 1 },
                { "biome": "gs_missing", "quantity": 3 }
            ] }]
        }"#;

        let catalog = TileCatalog::from_json(json).unwrap();
        let odd = catalog.pack(&"odd".into()).unwrap();
        assert_eq!(odd.components.len(), 1);
        assert!(!odd.covers(&"gs_missing".into()));
    }

    #[test]
    fn duplicates_are_rejected() {
        let json = r#"{
            "biomes": [
                { "id": "gs_grass", "name": "Grassland" },
                { "id": "gs_grass", "name": "Grassland again" }
            ]
        }"#;

        assert!(matches!(
            TileCatalog::from_json(json),
            Err(CatalogError::DuplicateBiome(_))
        ));
    }
}
