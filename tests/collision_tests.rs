//! Collision detection validation tests

use road_rage::simulation::{
    check_player_collision, find_npc_collisions, is_on_surface, spawn_obstacle, Aabb, Hitbox,
    Lane, ObstacleId, ObstacleType, ScriptedRandom, SimConfig, SimObstacle, SimPlayer,
    VehicleProfile,
};

fn place(id: usize, obstacle_type: ObstacleType, lane: Lane, z: f32) -> SimObstacle {
    let config = SimConfig::default();
    let mut rng = ScriptedRandom::constant(0.5);
    spawn_obstacle(ObstacleId(id), obstacle_type, lane, z, &config, &mut rng).with_grace(0.0)
}

#[test]
fn test_aabb_overlap_is_strict() {
    let unit = Hitbox::new(2.0, 2.0);
    let a = Aabb::new(0.0, 0.0, unit, 1.0);

    assert!(a.overlaps(&Aabb::new(1.9, 0.0, unit, 1.0)));
    assert!(!a.overlaps(&Aabb::new(2.0, 0.0, unit, 1.0)), "touching edges");
    assert!(!a.overlaps(&Aabb::new(0.0, 2.0, unit, 1.0)), "touching ends");
    assert!(a.overlaps(&Aabb::new(1.0, 1.0, unit, 1.0)));

    // Shrinking turns an overlap into a miss
    let shrunk = Aabb::new(0.0, 0.0, unit, 0.7);
    assert!(a.overlaps(&Aabb::new(1.5, 0.0, unit, 1.0)));
    assert!(!shrunk.overlaps(&Aabb::new(1.5, 0.0, unit, 0.7)));
}

#[test]
fn test_player_hits_obstacle_in_same_lane() {
    let config = SimConfig::default();
    let player = SimPlayer::new(VehicleProfile::AutoRickshaw);
    let obstacles = vec![place(7, ObstacleType::Cow, Lane::Right, 1.0)];

    let hit = check_player_collision(&player, &obstacles, &config);
    assert_eq!(hit.map(|o| o.id), Some(ObstacleId(7)));
}

#[test]
fn test_obstacle_in_spawn_grace_is_ignored() {
    let config = SimConfig::default();
    let player = SimPlayer::new(VehicleProfile::AutoRickshaw);
    let obstacles = vec![place(1, ObstacleType::Cow, Lane::Right, 0.5).with_grace(0.2)];

    assert!(check_player_collision(&player, &obstacles, &config).is_none());
}

#[test]
fn test_rough_patch_is_driven_over() {
    let config = SimConfig::default();
    let player = SimPlayer::new(VehicleProfile::AutoRickshaw);
    let obstacles = vec![place(1, ObstacleType::RoughPatch, Lane::Right, 5.0)];

    assert!(check_player_collision(&player, &obstacles, &config).is_none());
    assert!(is_on_surface(&player, &obstacles));

    let elsewhere = vec![place(2, ObstacleType::RoughPatch, Lane::Right, 40.0)];
    assert!(!is_on_surface(&player, &elsewhere));
}

#[test]
fn test_other_lane_is_a_miss() {
    let config = SimConfig::default();
    let player = SimPlayer::new(VehicleProfile::AutoRickshaw);
    let obstacles = vec![
        place(1, ObstacleType::Truck, Lane::Left, 0.0),
        place(2, ObstacleType::Bus, Lane::Left, 2.0),
    ];

    assert!(check_player_collision(&player, &obstacles, &config).is_none());
}

#[test]
fn test_fairness_turns_near_miss_into_miss() {
    let config = SimConfig::default();
    let player = SimPlayer::new(VehicleProfile::AutoRickshaw);

    // Summed half lengths are (1.0 + 0.4) * 0.85 = 1.19
    let near = vec![place(1, ObstacleType::Police, Lane::Right, 1.3)];
    assert!(check_player_collision(&player, &near, &config).is_none());

    let close = vec![place(1, ObstacleType::Police, Lane::Right, 1.1)];
    assert!(check_player_collision(&player, &close, &config).is_some());

    // Without the shrink the near miss would have been a hit
    let strict = SimConfig {
        player_fairness: 1.0,
        ..SimConfig::default()
    };
    assert!(check_player_collision(&player, &near, &strict).is_some());
}

#[test]
fn test_npc_pair_crash() {
    let config = SimConfig::default();
    let obstacles = vec![
        place(1, ObstacleType::Car, Lane::Left, 30.0),
        place(2, ObstacleType::Truck, Lane::Left, 30.5),
        place(3, ObstacleType::Cow, Lane::Right, 30.0),
    ];

    let crashes = find_npc_collisions(&obstacles, 0.0, &config);
    assert_eq!(crashes.len(), 1);
    assert_eq!(crashes[0].first, ObstacleId(1));
    assert_eq!(crashes[0].second, ObstacleId(2));
    assert!((crashes[0].midpoint.z - 30.25).abs() < 1e-4);
    assert!((crashes[0].midpoint.x - Lane::Left.offset()).abs() < 1e-4);
}

#[test]
fn test_stationary_pair_never_crashes() {
    let config = SimConfig::default();
    let obstacles = vec![
        place(1, ObstacleType::Cow, Lane::Left, 30.0),
        place(2, ObstacleType::Pothole, Lane::Left, 30.2),
        place(3, ObstacleType::Police, Lane::Left, 30.4),
    ];

    assert!(find_npc_collisions(&obstacles, 0.0, &config).is_empty());
}

#[test]
fn test_crossing_dog_passes_parked_obstacles() {
    let config = SimConfig::default();
    let mut dog = place(1, ObstacleType::Dog, Lane::Right, 30.0);
    assert!(dog.is_crossing());
    // Mid-crossing, right on top of them
    dog.position.x = Lane::Right.offset();

    for parked in [ObstacleType::Cow, ObstacleType::Pothole, ObstacleType::Police] {
        let obstacles = vec![dog.clone(), place(2, parked, Lane::Right, 30.0)];
        assert!(
            find_npc_collisions(&obstacles, 0.0, &config).is_empty(),
            "dog crashed into {:?}",
            parked
        );
    }

    // Moving traffic still runs the dog down
    let obstacles = vec![dog, place(2, ObstacleType::Car, Lane::Right, 30.0)];
    assert_eq!(find_npc_collisions(&obstacles, 0.0, &config).len(), 1);
}

#[test]
fn test_npc_crashes_only_near_player() {
    let config = SimConfig::default();
    let obstacles = vec![
        place(1, ObstacleType::Car, Lane::Left, 230.0),
        place(2, ObstacleType::Truck, Lane::Left, 230.5),
    ];

    assert!(find_npc_collisions(&obstacles, 0.0, &config).is_empty());
    assert_eq!(find_npc_collisions(&obstacles, 200.0, &config).len(), 1);
}

#[test]
fn test_grace_obstacles_skip_npc_crashes() {
    let config = SimConfig::default();
    let obstacles = vec![
        place(1, ObstacleType::Car, Lane::Left, 30.0),
        place(2, ObstacleType::Truck, Lane::Left, 30.5).with_grace(0.3),
    ];

    assert!(find_npc_collisions(&obstacles, 0.0, &config).is_empty());
}

#[test]
fn test_obstacle_crashes_at_most_once() {
    let config = SimConfig::default();
    let obstacles = vec![
        place(1, ObstacleType::Car, Lane::Left, 30.0),
        place(2, ObstacleType::Car, Lane::Left, 30.5),
        place(3, ObstacleType::Car, Lane::Left, 31.0),
    ];

    let crashes = find_npc_collisions(&obstacles, 0.0, &config);
    assert_eq!(crashes.len(), 1);
    assert_eq!((crashes[0].first, crashes[0].second), (ObstacleId(1), ObstacleId(2)));
}

#[test]
fn test_npc_crashes_ignore_registry_order() {
    let config = SimConfig::default();
    let mut obstacles = vec![
        place(1, ObstacleType::Car, Lane::Left, 30.0),
        place(2, ObstacleType::Truck, Lane::Left, 30.5),
        place(3, ObstacleType::Rickshaw, Lane::Right, 60.0),
        place(4, ObstacleType::Bus, Lane::Right, 61.0),
        place(5, ObstacleType::Car, Lane::Left, 90.0),
    ];

    let forward = find_npc_collisions(&obstacles, 0.0, &config);
    obstacles.reverse();
    let reversed = find_npc_collisions(&obstacles, 0.0, &config);
    obstacles.swap(0, 3);
    let shuffled = find_npc_collisions(&obstacles, 0.0, &config);

    assert_eq!(forward.len(), 2);
    assert_eq!(forward, reversed);
    assert_eq!(forward, shuffled);
}
