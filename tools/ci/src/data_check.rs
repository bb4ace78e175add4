//! Parses the bundled data files with the library's own loaders.

use std::{fs, path::Path};

use hexplan_lib::prelude::*;

const ASSET_FOLDER: &str = "hexplan_app/assets";

/// Reads a file under the asset folder, exiting the check on failure.
fn read(relative: &str) -> Result<String, String> {
    let path = Path::new(ASSET_FOLDER).join(relative);
    fs::read_to_string(&path).map_err(|error| format!("{}: {error}", path.display()))
}

/// Checks that the catalog, config and every layout load without errors or skipped tiles.
pub(super) fn verify_data_files() -> Result<(), String> {
    let catalog = TileCatalog::from_json(&read("catalog.json")?)
        .map_err(|error| format!("catalog.json: {error}"))?;
    let config = PlannerConfig::from_json(&read("config.json")?)
        .map_err(|error| format!("config.json: {error}"))?;
    println!(
        "Catalog has {} biomes and {} packs.",
        catalog.biomes().count(),
        catalog.packs().count()
    );

    let layout_folder = Path::new(ASSET_FOLDER).join("layouts");
    let entries = fs::read_dir(&layout_folder)
        .map_err(|error| format!("{}: {error}", layout_folder.display()))?;

    for entry in entries {
        let path = entry.map_err(|error| error.to_string())?.path();
        if path.extension().map_or(true, |extension| extension != "json") {
            continue;
        }

        let json = fs::read_to_string(&path).map_err(|error| format!("{}: {error}", path.display()))?;
        let snapshot =
            PlanSnapshot::from_json(&json).map_err(|error| format!("{}: {error}", path.display()))?;

        let mut planner = TilePlanner::new(catalog.clone(), config.clone());
        let report = planner
            .load_snapshot(&snapshot)
            .map_err(|error| format!("{}: {error}", path.display()))?;

        if let Some(skipped) = report.skipped.first() {
            return Err(format!(
                "{}: {} of {} tiles could not be placed, first at {}: {}",
                path.display(),
                report.skipped.len(),
                snapshot.tiles.len(),
                skipped.tile.cell(),
                skipped.error
            ));
        }
        println!("{}: {} tiles placed.", path.display(), report.placed);
    }

    Ok(())
}
