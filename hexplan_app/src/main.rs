//! Loads a saved tile plan and reports what it takes to build it.
//!
//! Usage: `hexplan_app [LAYOUT] [CATALOG] [CONFIG]`.
//! Missing paths fall back to the files under `hexplan_app/assets`.

use std::{fs, path::PathBuf};

use anyhow::Context;
use bevy::{log::LogPlugin, prelude::*};
use hexplan_lib::{plugin::ManagePlanner, prelude::*};

const ASSET_FOLDER: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/assets");

/// Where to read each input file from.
struct Paths {
    layout: PathBuf,
    catalog: PathBuf,
    config: PathBuf,
}

impl Paths {
    fn from_args() -> Self {
        let mut args = std::env::args().skip(1);
        let mut next_or = |default: &str| {
            args.next()
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(ASSET_FOLDER).join(default))
        };

        Paths {
            layout: next_or("layouts/demo.json"),
            catalog: next_or("catalog.json"),
            config: next_or("config.json"),
        }
    }
}

fn read(path: &PathBuf) -> anyhow::Result<String> {
    fs::read_to_string(path).with_context(|| format!("could not read {}", path.display()))
}

fn main() -> anyhow::Result<()> {
    let paths = Paths::from_args();

    let catalog = TileCatalog::from_json(&read(&paths.catalog)?)
        .with_context(|| format!("invalid catalog {}", paths.catalog.display()))?;
    let config = PlannerConfig::from_json(&read(&paths.config)?)
        .with_context(|| format!("invalid config {}", paths.config.display()))?;
    let snapshot = PlanSnapshot::from_json(&read(&paths.layout)?)
        .with_context(|| format!("invalid layout {}", paths.layout.display()))?;

    let mut app = App::new();
    app.add_plugins(MinimalPlugins)
        .add_plugins(LogPlugin::default())
        .add_plugins(PlannerPlugin { catalog, config })
        .add_systems(Update, log_changes.after(ManagePlanner));

    let report = app
        .world
        .resource_mut::<TilePlanner>()
        .load_snapshot(&snapshot)?;
    for skipped in &report.skipped {
        warn!("Could not place {:?}: {}", skipped.tile, skipped.error);
    }

    app.update();
    log_requirements(app.world.resource::<TilePlanner>());

    Ok(())
}

/// Echoes every planner change to the log.
fn log_changes(mut changes: EventReader<PlannerChange>) {
    for change in changes.read() {
        info!("{change:?}");
    }
}

/// Logs what the plan needs in order to be built.
fn log_requirements(planner: &TilePlanner) {
    info!("{} tiles on the board", planner.occupancy().len());

    for (biome, required) in planner.required_sets() {
        let name = planner
            .catalog()
            .biome(&biome)
            .map_or(biome.name(), |set| set.name.as_str());
        info!(
            "{name}: {required} sets needed, {} owned",
            planner.ledger().owned_sets(&biome)
        );
    }

    for shortfall in planner.ownership_shortfall() {
        warn!(
            "{} is short by {} sets",
            shortfall.biome,
            shortfall.missing()
        );
    }

    let packs = planner.minimum_pack_cover();
    if !packs.is_empty() {
        let names: Vec<&str> = packs
            .iter()
            .map(|id| {
                planner
                    .catalog()
                    .pack(id)
                    .map_or(id.name(), |pack| pack.name.as_str())
            })
            .collect();
        info!("Packs covering every biome used: {}", names.join(", "));
    }
}
