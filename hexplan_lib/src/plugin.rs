//! Runs a [`TilePlanner`] inside a Bevy [`App`].
//!
//! Interactions arrive as [`PlannerCommand`] events and are applied in the order they were sent.
//! Every resulting change is republished as a [`PlannerChange`] event in the same frame.

use bevy::prelude::*;

use crate::{
    catalog::TileCatalog,
    config::PlannerConfig,
    errors::PlannerError,
    planner::{PlannerChange, PlannerCommand, TilePlanner},
};

/// Adds a [`TilePlanner`] resource and the systems that drive it.
#[derive(Debug, Clone, Default)]
pub struct PlannerPlugin {
    /// The biome sets and packs that exist.
    pub catalog: TileCatalog,
    /// The planner settings.
    pub config: PlannerConfig,
}

impl Plugin for PlannerPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(TilePlanner::new(self.catalog.clone(), self.config.clone()))
            .add_event::<PlannerCommand>()
            .add_event::<PlannerCommandRejected>()
            .add_event::<PlannerChange>()
            .add_systems(
                Update,
                (apply_planner_commands, publish_planner_changes)
                    .chain()
                    .in_set(ManagePlanner),
            );
    }
}

/// The systems that apply commands and publish changes.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct ManagePlanner;

/// A command that the planner refused.
///
/// Nothing changed; whether to tell the player is up to the receiver.
#[derive(Debug, Clone, PartialEq, Eq, Event)]
pub struct PlannerCommandRejected {
    /// The command as sent.
    pub command: PlannerCommand,
    /// Why it was refused.
    pub error: PlannerError,
}

/// Applies every pending [`PlannerCommand`] in order.
fn apply_planner_commands(
    mut commands: EventReader<PlannerCommand>,
    mut planner: ResMut<TilePlanner>,
    mut rejections: EventWriter<PlannerCommandRejected>,
) {
    for command in commands.read() {
        if let Err(error) = planner.execute(command) {
            debug!("Rejected {command:?}: {error}");
            rejections.send(PlannerCommandRejected {
                command: command.clone(),
                error,
            });
        }
    }
}

/// Sends out every change the planner has recorded.
fn publish_planner_changes(
    mut planner: ResMut<TilePlanner>,
    mut changes: EventWriter<PlannerChange>,
) {
    // Skip the mutable deref when nothing happened, so change detection stays quiet
    if planner.bypass_change_detection().has_pending_changes() {
        changes.send_batch(planner.drain_changes());
    }
}
