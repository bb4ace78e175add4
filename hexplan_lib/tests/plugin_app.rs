//! Drives the planner through a Bevy app, the way an interactive front end would.

use bevy::prelude::*;
use hexplan_lib::prelude::*;

fn app() -> App {
    let catalog = TileCatalog::from_json(include_str!("../../hexplan_app/assets/catalog.json"))
        .unwrap();

    let mut app = App::new();
    app.add_plugins(MinimalPlugins).add_plugins(PlannerPlugin {
        catalog,
        config: PlannerConfig::default(),
    });
    app
}

fn send(app: &mut App, commands: impl IntoIterator<Item = PlannerCommand>) {
    let mut events = app.world.resource_mut::<Events<PlannerCommand>>();
    for command in commands {
        events.send(command);
    }
}

fn rejections(app: &App) -> Vec<PlannerCommandRejected> {
    let events = app.world.resource::<Events<PlannerCommandRejected>>();
    events.get_reader().read(events).cloned().collect()
}

fn place(q: i32, layer: u32) -> PlannerCommand {
    PlannerCommand::Place {
        cell: CellKey::from_axial(q, 0, layer),
        biome: BiomeId::new("gs_grass"),
        number: TileNumber::new(3).unwrap(),
        rotation: TileRotation::Deg0,
    }
}

#[test]
fn buying_a_pack_allows_placing() {
    let mut app = app();
    send(&mut app, [place(0, 0)]);
    app.update();

    assert!(app.world.resource::<TilePlanner>().occupancy().is_empty());
    assert!(matches!(
        rejections(&app)[0].error,
        PlannerError::InstanceExhausted { .. }
    ));

    send(
        &mut app,
        [
            PlannerCommand::AdjustPackCount {
                pack: PackId::new("starter_pack"),
                delta: 1,
            },
            place(0, 0),
            place(1, 0),
        ],
    );
    app.update();

    let planner = app.world.resource::<TilePlanner>();
    // Starter pack holds two grass sets
    assert_eq!(planner.occupancy().len(), 2);
    assert_eq!(planner.min_required_sets(&BiomeId::new("gs_grass")), 2);
}

#[test]
fn undo_and_redo_commands() {
    let mut app = app();
    send(
        &mut app,
        [
            PlannerCommand::SetPlacementMode(PlacementMode::Unlimited),
            place(0, 0),
            place(0, 1),
            PlannerCommand::Undo,
        ],
    );
    app.update();
    assert_eq!(app.world.resource::<TilePlanner>().occupancy().len(), 1);

    send(&mut app, [PlannerCommand::Redo, PlannerCommand::Clear]);
    app.update();
    assert!(app.world.resource::<TilePlanner>().occupancy().is_empty());

    send(&mut app, [PlannerCommand::Undo]);
    app.update();
    assert_eq!(app.world.resource::<TilePlanner>().occupancy().len(), 2);
    assert!(rejections(&app).is_empty());
}

#[test]
fn refused_reductions_are_reported() {
    let mut app = app();
    let grass = BiomeId::new("gs_grass");
    send(
        &mut app,
        [
            PlannerCommand::SetStandaloneCount {
                biome: grass.clone(),
                count: 1,
            },
            place(0, 0),
            PlannerCommand::SetStandaloneCount {
                biome: grass.clone(),
                count: 0,
            },
        ],
    );
    app.update();

    let rejected = rejections(&app);
    assert_eq!(rejected.len(), 1);
    assert_eq!(
        rejected[0].error,
        PlannerError::OwnershipReductionBlocked {
            biome: grass.clone(),
            current_total: 1,
            requested_total: 0,
            minimum_required: 1,
        }
    );
    assert_eq!(
        app.world
            .resource::<TilePlanner>()
            .ledger()
            .standalone_count(&grass),
        1
    );
}
