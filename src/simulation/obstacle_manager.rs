//! Obstacle construction and registry management for the driving simulation
//!
//! This module contains functions for spawning, updating and despawning
//! obstacles. It separates registry bookkeeping from the world's tick
//! coordination.

use std::f32::consts::{PI, TAU};

use log::{debug, warn};

use super::config::{SimConfig, CROSSING_START_X, CROSSING_TARGET_X};
use super::obstacle::{
    CrossingBehavior, DespawnReason, ObstacleBehavior, OncomingBody, SimObstacle,
    TrafficBehavior,
};
use super::random::{choose, RandomSource};
use super::types::{Lane, ObstacleId, ObstacleType, Position};

/// Build an obstacle of the given type in `lane` at longitudinal position `z`
///
/// # Arguments
/// * `id` - The pre-generated obstacle ID
/// * `obstacle_type` - Which obstacle to create
/// * `lane` - Lane to place it in (crossing actors start off the road instead)
/// * `z` - Longitudinal position
/// * `config` - Supplies the spawn grace
/// * `rng` - Source for speeds, flags and timers
pub fn spawn_obstacle(
    id: ObstacleId,
    obstacle_type: ObstacleType,
    lane: Lane,
    z: f32,
    config: &SimConfig,
    rng: &mut dyn RandomSource,
) -> SimObstacle {
    let lane_position = Position::new(lane.offset(), 0.0, z);

    let obstacle = match obstacle_type {
        ObstacleType::Pothole | ObstacleType::RoughPatch | ObstacleType::Cow => SimObstacle::new(
            id,
            obstacle_type,
            lane_position,
            lane,
            0.0,
            ObstacleBehavior::Stationary,
        ),
        ObstacleType::Police => SimObstacle::new(
            id,
            obstacle_type,
            lane_position,
            lane,
            0.0,
            ObstacleBehavior::Stationary,
        )
        .with_heading(PI),
        ObstacleType::Dog => {
            // Dogs start just off one edge of the road and run to beyond the other
            let from_left = rng.chance(0.5);
            let (start_x, target_x) = if from_left {
                (CROSSING_START_X, -CROSSING_TARGET_X)
            } else {
                (-CROSSING_START_X, CROSSING_TARGET_X)
            };
            let heading = rng.range(0.0, TAU);
            SimObstacle::new(
                id,
                obstacle_type,
                Position::new(start_x, 0.0, z),
                Lane::nearest(start_x),
                0.0,
                ObstacleBehavior::Crossing(CrossingBehavior {
                    target_x,
                    has_crossed: false,
                }),
            )
            .with_heading(heading)
        }
        ObstacleType::Car | ObstacleType::Truck | ObstacleType::Bus | ObstacleType::Rickshaw => {
            let (speed, can_change_lane) = match obstacle_type {
                ObstacleType::Truck => (rng.range(8.0, 18.0), rng.chance(0.3)),
                ObstacleType::Car => (rng.range(10.0, 22.0), rng.chance(0.4)),
                ObstacleType::Bus => (rng.range(7.0, 15.0), rng.chance(0.15)),
                _ => (rng.range(14.0, 28.0), true),
            };
            let aggressive = obstacle_type == ObstacleType::Rickshaw;
            let lane_change_timer = if aggressive {
                rng.range(0.5, 2.0)
            } else {
                rng.range(2.0, 6.0)
            };
            let speed_change_timer = rng.range(3.0, 8.0);
            let erratic = aggressive || rng.chance(0.3);
            SimObstacle::new(
                id,
                obstacle_type,
                lane_position,
                lane,
                speed,
                ObstacleBehavior::Traffic(TrafficBehavior {
                    can_change_lane,
                    erratic,
                    aggressive,
                    lane_change_timer,
                    speed_change_timer,
                }),
            )
        }
        ObstacleType::WrongWay => {
            let body = if rng.chance(0.5) {
                OncomingBody::Car
            } else {
                OncomingBody::Truck
            };
            let speed = -rng.range(25.0, 40.0);
            SimObstacle::new(
                id,
                obstacle_type,
                lane_position,
                lane,
                speed,
                ObstacleBehavior::Oncoming { body },
            )
            .with_heading(PI)
        }
    };

    debug_assert!(obstacle.speed_consistent());
    obstacle.with_grace(config.spawn_grace)
}

/// Run the movement and behavior phase for every obstacle
pub fn update_obstacles(
    delta_secs: f32,
    obstacles: &mut [SimObstacle],
    rng: &mut dyn RandomSource,
) {
    for obstacle in obstacles.iter_mut() {
        obstacle.update(delta_secs, rng);
    }
}

/// Collect the obstacles that should leave the registry this tick
pub fn collect_despawns(
    obstacles: &[SimObstacle],
    player_z: f32,
    config: &SimConfig,
) -> Vec<(ObstacleId, DespawnReason)> {
    obstacles
        .iter()
        .filter_map(|o| o.despawn_reason(player_z, config).map(|reason| (o.id, reason)))
        .collect()
}

/// Remove obstacles from the registry
///
/// Returns the number of obstacles removed
pub fn despawn_obstacles(
    obstacles: &mut Vec<SimObstacle>,
    to_remove: &[(ObstacleId, DespawnReason)],
) -> usize {
    if to_remove.is_empty() {
        return 0;
    }

    let before = obstacles.len();
    obstacles.retain(|o| {
        match to_remove.iter().find(|(id, _)| *id == o.id) {
            Some((_, DespawnReason::Malformed)) => {
                warn!(
                    "Dropping malformed {:?} {:?} at {:?}",
                    o.obstacle_type, o.id, o.position
                );
                false
            }
            Some((_, reason)) => {
                debug!("Despawning {:?} {:?}: {:?}", o.obstacle_type, o.id, reason);
                false
            }
            None => true,
        }
    });
    before - obstacles.len()
}

/// Let nearby lane-changing traffic react to a honk
///
/// Returns the number of vehicles that swerved
pub fn honk_nearby(
    obstacles: &mut [SimObstacle],
    player_z: f32,
    config: &SimConfig,
    rng: &mut dyn RandomSource,
) -> usize {
    let mut swerved = 0;
    for obstacle in obstacles.iter_mut() {
        if obstacle.startle(player_z, config, rng) {
            swerved += 1;
        }
    }
    swerved
}

/// Decorative traffic shown behind the title screen
pub fn menu_traffic(
    mut next_id: impl FnMut() -> ObstacleId,
    config: &SimConfig,
    rng: &mut dyn RandomSource,
) -> Vec<SimObstacle> {
    const MENU_TYPES: [ObstacleType; 6] = [
        ObstacleType::Truck,
        ObstacleType::Car,
        ObstacleType::Bus,
        ObstacleType::Rickshaw,
        ObstacleType::Cow,
        ObstacleType::Dog,
    ];

    fn random_lane(rng: &mut dyn RandomSource) -> Lane {
        if rng.chance(0.5) {
            Lane::Left
        } else {
            Lane::Right
        }
    }

    let mut obstacles = Vec::new();

    for i in 0..8 {
        let obstacle_type = choose(rng, &MENU_TYPES)
            .copied()
            .unwrap_or(ObstacleType::Car);
        let lane = random_lane(rng);
        let z = 10.0 + i as f32 * 20.0 + rng.range(0.0, 10.0);
        obstacles.push(spawn_obstacle(next_id(), obstacle_type, lane, z, config, rng));
    }
    for i in 0..2 {
        let lane = random_lane(rng);
        let z = 15.0 + i as f32 * 30.0;
        obstacles.push(spawn_obstacle(next_id(), ObstacleType::Pothole, lane, z, config, rng));
    }
    for i in 0..2 {
        let lane = random_lane(rng);
        let z = 25.0 + i as f32 * 35.0;
        obstacles.push(spawn_obstacle(
            next_id(),
            ObstacleType::RoughPatch,
            lane,
            z,
            config,
            rng,
        ));
    }
    let lane = random_lane(rng);
    obstacles.push(spawn_obstacle(next_id(), ObstacleType::Dog, lane, 50.0, config, rng));

    obstacles
}
