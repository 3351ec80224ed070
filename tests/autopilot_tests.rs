//! Heuristic driver tests

use road_rage::autopilot::Autopilot;
use road_rage::simulation::{
    spawn_obstacle, Lane, ObstacleId, ObstacleType, ScriptedRandom, SimConfig, SimObstacle,
    SimPlayer, VehicleProfile,
};

fn place(id: usize, obstacle_type: ObstacleType, lane: Lane, z: f32) -> SimObstacle {
    let config = SimConfig::default();
    let mut rng = ScriptedRandom::constant(0.5);
    spawn_obstacle(ObstacleId(id), obstacle_type, lane, z, &config, &mut rng)
}

#[test]
fn test_steers_around_blocked_lane() {
    let autopilot = Autopilot::default();
    let player = SimPlayer::new(VehicleProfile::AutoRickshaw);
    let obstacles = vec![place(1, ObstacleType::Truck, Lane::Right, 20.0)];

    let gap = autopilot.gap_in_lane(&player, &obstacles, Lane::Right, 40.0);
    assert!((gap.unwrap_or(f32::MAX) - 16.25).abs() < 1e-4);

    let input = autopilot.decide(&player, &obstacles);
    assert!(input.steer_left);
    assert!(!input.steer_right);
    assert!(!input.brake);
}

#[test]
fn test_brakes_when_both_lanes_blocked() {
    let autopilot = Autopilot::default();
    let player = SimPlayer::new(VehicleProfile::AutoRickshaw);
    let obstacles = vec![
        place(1, ObstacleType::Truck, Lane::Right, 20.0),
        place(2, ObstacleType::Bus, Lane::Left, 21.0),
    ];

    let input = autopilot.decide(&player, &obstacles);
    assert!(input.brake);
    assert!(!input.steer_left && !input.steer_right);
}

#[test]
fn test_prefers_much_longer_gap() {
    let autopilot = Autopilot::default();
    let player = SimPlayer::new(VehicleProfile::AutoRickshaw);
    let obstacles = vec![
        place(1, ObstacleType::Truck, Lane::Right, 20.0),
        place(2, ObstacleType::Cow, Lane::Left, 34.0),
    ];

    let input = autopilot.decide(&player, &obstacles);
    assert!(input.steer_left);
}

#[test]
fn test_accelerates_on_clear_road() {
    let autopilot = Autopilot::default();
    let player = SimPlayer::new(VehicleProfile::AutoRickshaw);
    let obstacles = vec![
        // Driven over, never in the way
        place(1, ObstacleType::RoughPatch, Lane::Right, 10.0),
        // Behind the player
        place(2, ObstacleType::Truck, Lane::Right, -10.0),
        // Beyond the look-ahead
        place(3, ObstacleType::Cow, Lane::Right, 120.0),
    ];

    let input = autopilot.decide(&player, &obstacles);
    assert!(input.accelerate);
    assert!(!input.brake && !input.steer_left && !input.steer_right);

    let mut fast = player.clone();
    fast.speed = fast.physics.max_speed;
    assert!(!autopilot.decide(&fast, &obstacles).accelerate);
}

#[test]
fn test_honks_at_slow_traffic_ahead() {
    let autopilot = Autopilot::default();
    let player = SimPlayer::new(VehicleProfile::AutoRickshaw);

    let traffic = vec![place(1, ObstacleType::Car, Lane::Right, 10.0)];
    assert!(autopilot.decide(&player, &traffic).honk);

    let cows = vec![place(1, ObstacleType::Cow, Lane::Right, 10.0)];
    assert!(!autopilot.decide(&player, &cows).honk);

    let other_lane = vec![place(1, ObstacleType::Car, Lane::Left, 10.0)];
    assert!(!autopilot.decide(&player, &other_lane).honk);
}
