//! Input handling systems

use bevy::prelude::*;

use super::components::{DriverInput, SimWorldResource};
use crate::simulation::{InputSnapshot, RunState, VehicleProfile};

/// Handle menu and run control keys
pub fn handle_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut sim_world: ResMut<SimWorldResource>,
    mut exit: MessageWriter<AppExit>,
) {
    if keyboard.just_pressed(KeyCode::Escape) {
        exit.write(AppExit::Success);
    }

    let world = &mut sim_world.0;
    if keyboard.just_pressed(KeyCode::Digit1) {
        world.start_run(VehicleProfile::AutoRickshaw);
    } else if keyboard.just_pressed(KeyCode::Digit2) {
        world.start_run(VehicleProfile::Scooter);
    } else if keyboard.just_pressed(KeyCode::KeyR) && world.state() != RunState::Menu {
        world.restart();
    } else if keyboard.just_pressed(KeyCode::KeyM) {
        world.back_to_menu();
    }
}

/// Turn held keys into an input snapshot for the next simulation tick
///
/// The horn is latched until a tick consumes it so a quick tap is not lost
/// between fixed steps.
pub fn read_driver_input(keyboard: Res<ButtonInput<KeyCode>>, mut input: ResMut<DriverInput>) {
    let any = |keys: &[KeyCode]| keyboard.any_pressed(keys.iter().copied());
    let honk = input.snapshot.honk || keyboard.just_pressed(KeyCode::Space);

    input.snapshot = InputSnapshot {
        accelerate: any(&[KeyCode::ArrowUp, KeyCode::KeyW]),
        brake: any(&[KeyCode::ArrowDown, KeyCode::KeyS]),
        steer_left: any(&[KeyCode::ArrowLeft, KeyCode::KeyA]),
        steer_right: any(&[KeyCode::ArrowRight, KeyCode::KeyD]),
        honk,
    };
}
