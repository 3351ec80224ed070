//! Systems for spawning visual entities from simulation state

use bevy::prelude::*;

use super::components::{EntityMappings, ObstacleLink, SceneryLink, SimWorldResource};
use crate::simulation::{ObstacleType, SceneryKind, SimObstacle};

/// Height and color of an obstacle box
pub fn obstacle_look(obstacle_type: ObstacleType) -> (f32, Color) {
    match obstacle_type {
        ObstacleType::Pothole => (0.05, Color::srgb(0.08, 0.08, 0.08)),
        ObstacleType::RoughPatch => (0.02, Color::srgb(0.45, 0.38, 0.3)),
        ObstacleType::Cow => (1.4, Color::srgb(0.95, 0.95, 0.9)),
        ObstacleType::Dog => (0.5, Color::srgb(0.6, 0.45, 0.25)),
        ObstacleType::Police => (1.8, Color::srgb(0.2, 0.3, 0.8)),
        ObstacleType::Car => (1.2, Color::srgb(0.8, 0.2, 0.2)),
        ObstacleType::Truck => (2.6, Color::srgb(0.9, 0.5, 0.1)),
        ObstacleType::Bus => (2.8, Color::srgb(0.2, 0.6, 0.3)),
        ObstacleType::Rickshaw => (1.6, Color::srgb(0.1, 0.5, 0.2)),
        ObstacleType::WrongWay => (1.4, Color::srgb(0.7, 0.1, 0.5)),
    }
}

/// Spawn a single obstacle visual
pub fn spawn_obstacle_visual(
    commands: &mut Commands,
    meshes: &mut ResMut<Assets<Mesh>>,
    materials: &mut ResMut<Assets<StandardMaterial>>,
    obstacle: &SimObstacle,
    mappings: &mut ResMut<EntityMappings>,
) {
    let (height, color) = obstacle_look(obstacle.obstacle_type);
    let entity = commands
        .spawn((
            ObstacleLink(obstacle.id),
            Mesh3d(meshes.add(Cuboid::new(
                obstacle.hitbox.width,
                height,
                obstacle.hitbox.length,
            ))),
            MeshMaterial3d(materials.add(color)),
            Transform::from_translation(Vec3::new(
                obstacle.position.x,
                height / 2.0 + obstacle.position.y,
                obstacle.position.z,
            ))
            .with_rotation(Quat::from_rotation_y(obstacle.heading)),
        ))
        .id();
    mappings.obstacles.insert(obstacle.id, entity);
}

/// Box size and color of one scenery element
fn scenery_look(kind: SceneryKind, index: usize) -> (Vec3, Color) {
    match kind {
        SceneryKind::LaneMarking => (Vec3::new(0.12, 0.01, 1.8), Color::srgb(0.8, 0.8, 0.8)),
        SceneryKind::EdgeLine => (Vec3::new(0.1, 0.01, 8.0), Color::srgb(0.6, 0.6, 0.6)),
        SceneryKind::Building => {
            let height = 3.0 + (index % 5) as f32 * 1.2;
            let shade = 0.35 + (index % 3) as f32 * 0.15;
            (Vec3::new(2.4, height, 3.2), Color::srgb(shade, shade * 0.8, 0.4))
        }
        SceneryKind::Pole => (Vec3::new(0.15, 6.0, 0.15), Color::srgb(0.3, 0.3, 0.3)),
        SceneryKind::Skyline => {
            let height = 14.0 + (index % 7) as f32 * 4.0;
            (Vec3::new(6.0, height, 10.0), Color::srgb(0.45, 0.5, 0.6))
        }
    }
}

/// System to create the scenery visuals; pools never grow so this runs once
pub fn spawn_scenery_visuals(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    sim_world: Res<SimWorldResource>,
) {
    for (pool_index, pool) in sim_world.0.scenery.pools.iter().enumerate() {
        for element in &pool.elements {
            let (size, color) = scenery_look(pool.kind, element.index);
            commands.spawn((
                SceneryLink {
                    pool: pool_index,
                    index: element.index,
                },
                Mesh3d(meshes.add(Cuboid::new(size.x, size.y, size.z))),
                MeshMaterial3d(materials.add(color)),
                Transform::from_xyz(pool.lateral_x, size.y / 2.0, element.z),
            ));
        }
    }
}
