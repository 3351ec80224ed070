//! Systems for syncing Bevy entities with simulation state

use bevy::prelude::*;

use super::components::{
    DriverInput, EntityMappings, FlashMessage, FlavorRng, Ground, HudText, MainCamera,
    ObstacleLink, PlayerVisual, SceneryLink, SimWorldResource,
};
use super::spawner::{obstacle_look, spawn_obstacle_visual};
use crate::flavor::{crash_headline, crash_message, format_distance, speech_line, HONK_TEXTS};
use crate::simulation::{choose, InputSnapshot, RunState, SimEvent};

/// System to run simulation tick
pub fn tick_simulation(
    time: Res<Time>,
    mut sim_world: ResMut<SimWorldResource>,
    mut input: ResMut<DriverInput>,
    mut flash: ResMut<FlashMessage>,
    mut flavor: ResMut<FlavorRng>,
) {
    let snapshot = input.snapshot;
    sim_world.0.tick(time.delta_secs(), &snapshot);
    input.snapshot = InputSnapshot {
        honk: false,
        ..snapshot
    };

    for event in sim_world.0.drain_events() {
        match event {
            SimEvent::Honk { .. } => {
                let text = choose(flavor.0.as_mut(), HONK_TEXTS).copied().unwrap_or("HONK!");
                flash.show(text, 0.6);
            }
            SimEvent::Speech { obstacle_type, .. } => {
                if let Some(line) = speech_line(obstacle_type, flavor.0.as_mut()) {
                    flash.show(format!("{}: {}", obstacle_type.name(), line), 1.2);
                }
            }
            SimEvent::CrashEffect { .. } => flash.show("CRASH!", 0.8),
            SimEvent::RunEnded(report) => {
                let quip = crash_message(report.cause, flavor.0.as_mut());
                flash.show(format!("{}\n{}", crash_headline(report.cause), quip), f32::MAX);
            }
            SimEvent::RunStarted { .. } => flash.show("", 0.0),
        }
    }
}

/// System to place the player's vehicle
pub fn sync_player(
    sim_world: Res<SimWorldResource>,
    mut player_query: Query<(&mut Transform, &mut Visibility), With<PlayerVisual>>,
) {
    let Ok((mut transform, mut visibility)) = player_query.single_mut() else {
        return;
    };

    match &sim_world.0.player {
        Some(player) => {
            *visibility = Visibility::Visible;
            let height = 1.2;
            transform.translation = Vec3::new(player.x, height / 2.0 + player.bob, player.z);
            transform.scale = Vec3::new(player.hitbox.width, height, player.hitbox.length);
            transform.rotation =
                Quat::from_rotation_z(player.tilt) * Quat::from_rotation_x(player.pitch);
        }
        // Leave the crashed vehicle where it stopped
        None if sim_world.0.state() == RunState::GameOver => {}
        None => *visibility = Visibility::Hidden,
    }
}

/// System to sync obstacle visuals from simulation state
pub fn sync_obstacles(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    sim_world: Res<SimWorldResource>,
    mut mappings: ResMut<EntityMappings>,
    mut obstacle_query: Query<(Entity, &ObstacleLink, &mut Transform)>,
) {
    let world = &sim_world.0;

    for (entity, link, mut transform) in obstacle_query.iter_mut() {
        match world.obstacle(link.0) {
            Some(obstacle) => {
                let (height, _) = obstacle_look(obstacle.obstacle_type);
                transform.translation = Vec3::new(
                    obstacle.position.x,
                    height / 2.0 + obstacle.position.y,
                    obstacle.position.z,
                );
                transform.rotation = Quat::from_rotation_y(obstacle.heading)
                    * Quat::from_rotation_z(obstacle.tilt);
            }
            None => {
                // Obstacle no longer exists in simulation, despawn
                commands.entity(entity).despawn();
                mappings.obstacles.remove(&link.0);
            }
        }
    }

    for obstacle in &world.obstacles {
        if !mappings.obstacles.contains_key(&obstacle.id) {
            spawn_obstacle_visual(
                &mut commands,
                &mut meshes,
                &mut materials,
                obstacle,
                &mut mappings,
            );
        }
    }
}

/// System to move recycled scenery elements
pub fn sync_scenery(
    sim_world: Res<SimWorldResource>,
    mut scenery_query: Query<(&SceneryLink, &mut Transform)>,
) {
    let pools = &sim_world.0.scenery.pools;
    for (link, mut transform) in scenery_query.iter_mut() {
        if let Some(element) = pools
            .get(link.pool)
            .and_then(|pool| pool.elements.get(link.index))
        {
            transform.translation.z = element.z;
        }
    }
}

/// System to keep the camera and road behind and under the player
pub fn follow_player(
    sim_world: Res<SimWorldResource>,
    mut camera_query: Query<&mut Transform, (With<MainCamera>, Without<Ground>)>,
    mut ground_query: Query<&mut Transform, (With<Ground>, Without<MainCamera>)>,
) {
    let world = &sim_world.0;
    let (focus_x, focus_z) = match &world.player {
        Some(player) => (player.x * 0.5, player.z),
        None if world.state() == RunState::GameOver => {
            let Ok(camera) = camera_query.single() else {
                return;
            };
            (camera.translation.x, camera.translation.z + 9.0)
        }
        None => (0.0, 0.0),
    };

    if let Ok(mut camera) = camera_query.single_mut() {
        camera.translation = Vec3::new(focus_x, 4.5, focus_z - 9.0);
        camera.look_at(Vec3::new(focus_x, 1.0, focus_z + 10.0), Vec3::Y);
    }
    if let Ok(mut ground) = ground_query.single_mut() {
        ground.translation.z = focus_z + 150.0;
    }
}

/// System to update the heads-up display
pub fn update_hud(
    time: Res<Time>,
    sim_world: Res<SimWorldResource>,
    mut flash: ResMut<FlashMessage>,
    mut text_query: Query<(&HudText, &mut Text)>,
) {
    let world = &sim_world.0;
    flash.remaining -= time.delta_secs();
    if flash.remaining <= 0.0 {
        flash.text.clear();
    }

    for (kind, mut text) in text_query.iter_mut() {
        match kind {
            HudText::Distance => {
                **text = format_distance(world.distance());
            }
            HudText::Speed => {
                let kmh = world.player.as_ref().map(|p| p.speed_kmh()).unwrap_or(0);
                **text = format!("{} km/h", kmh);
            }
            HudText::Best => {
                **text = if world.best_distance() > 0.0 {
                    format!("Best: {}", format_distance(world.best_distance()))
                } else {
                    "Best: ---".to_string()
                };
            }
            HudText::Status => {
                **text = match world.state() {
                    RunState::Menu => {
                        "ROAD RAGE\n1 - Auto rickshaw    2 - Scooty".to_string()
                    }
                    RunState::Playing => String::new(),
                    RunState::GameOver => match world.last_report() {
                        Some(report) => format!(
                            "Distance: {}{}\nR - Restart    M - Menu",
                            format_distance(report.final_distance),
                            if report.is_new_best { "  NEW BEST!" } else { "" }
                        ),
                        None => "R - Restart    M - Menu".to_string(),
                    },
                };
            }
            HudText::Flash => {
                **text = flash.text.clone();
            }
        }
    }
}
