//! Choosing packs that together contain every biome in use.

use bevy::prelude::*;
use indexmap::IndexSet;

use crate::catalog::{BiomeId, EnvironmentPack, PackId, TileCatalog};

/// Picks a small list of packs that together contain every biome in `used_biomes`.
///
/// This is the greedy approximation of set cover: repeatedly take the pack containing the most
/// biomes not yet covered, until everything is covered.
/// It is not guaranteed to find the smallest possible list.
///
/// Ties go to the pack listed first in the catalog.
/// Biomes that no pack contains are left uncovered.
#[must_use]
pub fn minimum_pack_cover(catalog: &TileCatalog, used_biomes: &[BiomeId]) -> Vec<PackId> {
    let mut uncovered: IndexSet<&BiomeId> = used_biomes.iter().collect();
    let mut chosen = Vec::new();

    while !uncovered.is_empty() {
        let mut best: Option<(&EnvironmentPack, usize)> = None;

        for pack in catalog.packs() {
            let newly_covered = uncovered.iter().filter(|biome| pack.covers(biome)).count();
            let best_so_far = best.map_or(0, |(_, covered)| covered);

            if newly_covered > best_so_far {
                best = Some((pack, newly_covered));
            }
        }

        let Some((pack, _)) = best else {
            warn!(
                "No pack contains {}; leaving them uncovered.",
                itertools::join(uncovered.iter(), ", ")
            );
            break;
        };

        uncovered.retain(|biome| !pack.covers(biome));
        chosen.push(pack.id.clone());
    }

    chosen
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::tests::test_catalog;

    fn triangle_catalog() -> TileCatalog {
        let json = r#"{
            "biomes": [
                { "id": "a", "name": "A" },
                { "id": "b", "name": "B" },
                { "id": "c", "name": "C" }
            ],
            "packs": [
                { "id": "p1", "name": "P1", "components": [{ "biome": "a" }, { "biome": "b" }] },
                { "id": "p2", "name": "P2", "components": [{ "biome": "b" }, { "biome": "c" }] },
                { "id": "p3", "name": "P3", "components": [{ "biome": "a" }, { "biome": "c" }] }
            ]
        }"#;

        TileCatalog::from_json(json).unwrap()
    }

    fn biomes(names: &[&str]) -> Vec<BiomeId> {
        names.iter().map(|&name| BiomeId::new(name)).collect()
    }

    #[test]
    fn nothing_to_cover_needs_no_packs() {
        assert!(minimum_pack_cover(&test_catalog(), &[]).is_empty());
    }

    #[test]
    fn any_pair_of_triangle_packs_covers_everything() {
        let cover = minimum_pack_cover(&triangle_catalog(), &biomes(&["a", "b", "c"]));
        assert_eq!(cover.len(), 2);

        // Ties are broken by catalog order
        assert_eq!(cover, vec![PackId::new("p1"), PackId::new("p2")]);
    }

    #[test]
    fn the_pack_covering_most_biomes_goes_first() {
        let catalog = test_catalog();
        let cover = minimum_pack_cover(&catalog, &biomes(&["gs_rock", "gs_grass", "gs_lava"]));

        assert_eq!(
            cover,
            vec![PackId::new("deluxe"), PackId::new("volcano")]
        );
    }

    #[test]
    fn uncoverable_biomes_stop_the_search() {
        let catalog = test_catalog();
        let cover = minimum_pack_cover(&catalog, &biomes(&["gs_water", "gs_unknown"]));

        assert_eq!(cover, vec![PackId::new("starter")]);
    }
}
