//! UI module that visualizes the simulation state using Bevy
//!
//! This module is purely for visualization - all simulation logic is in the `simulation` module.
//! The UI reads state from `SimWorld` and renders it using Bevy's 3D graphics.

mod components;
mod input;
pub mod spawner;
mod sync;
mod world;

use bevy::prelude::*;

pub use components::{EntityMappings, SimWorldResource};

use components::*;
use input::{handle_input, read_driver_input};
use spawner::spawn_scenery_visuals;
use sync::{follow_player, sync_obstacles, sync_player, sync_scenery, tick_simulation, update_hud};
use world::{setup_hud, setup_world};

/// Plugin to register all UI systems
pub struct RoadRageUIPlugin;

impl Plugin for RoadRageUIPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SimWorldResource>()
            .init_resource::<EntityMappings>()
            .init_resource::<DriverInput>()
            .init_resource::<FlashMessage>()
            .init_resource::<FlavorRng>()
            .insert_resource(ClearColor(Color::srgb(0.62, 0.72, 0.82)))
            .add_systems(
                Startup,
                (
                    setup_world,
                    spawn_scenery_visuals.after(setup_world),
                    setup_hud,
                ),
            )
            .add_systems(FixedUpdate, tick_simulation)
            .add_systems(
                Update,
                (
                    handle_input,
                    read_driver_input,
                    sync_player,
                    sync_obstacles,
                    sync_scenery,
                    follow_player,
                    update_hud,
                ),
            );
    }
}
