//! Game flow validation test
//!
//! This test validates the run lifecycle of the world: menu, playing and game over

use road_rage::autopilot::Autopilot;
use road_rage::flavor::{crash_headline, format_distance, speech_line, speech_lines};
use road_rage::simulation::{
    seeded_source, CrashCause, GameState, InputSnapshot, Lane, ObstacleType, RunState,
    SimConfig, SimEvent, SimWorld, VehicleProfile,
};

const DT: f32 = 1.0 / 60.0;

/// A seeded world without crossing dogs so scenarios stay predictable
fn quiet_world(seed: u64) -> SimWorld {
    let config = SimConfig {
        crossing_probability: 0.0,
        ..SimConfig::default()
    };
    SimWorld::new_with_seed(seed)
        .with_config(config)
        .expect("default config with no crossings is valid")
}

fn playing_world(seed: u64) -> SimWorld {
    let mut world = quiet_world(seed);
    world.start_run(VehicleProfile::AutoRickshaw);
    world.drain_events();
    world
}

#[test]
fn test_world_starts_on_menu() {
    let world = SimWorld::new_with_seed(1);
    assert_eq!(world.state(), RunState::Menu);
    assert!(world.player.is_none());
    assert_eq!(world.obstacles.len(), 13);
    assert_eq!(world.distance(), 0.0);
    assert_eq!(world.best_distance(), 0.0);
}

#[test]
fn test_game_state_transitions() {
    let mut game_state = GameState::new(120.0);
    assert_eq!(game_state.state, RunState::Menu);

    game_state.begin_run();
    assert!(game_state.is_playing());
    game_state.update(1.5);
    assert_eq!(game_state.run_time, 1.5);

    let report = game_state.end_run(ObstacleType::Cow, 80.0);
    assert_eq!(game_state.state, RunState::GameOver);
    assert!(!report.is_new_best);
    assert_eq!(report.best_distance, 120.0);
    assert_eq!(report.cause, CrashCause::Cow);

    game_state.begin_run();
    let report = game_state.end_run(ObstacleType::Truck, 200.0);
    assert!(report.is_new_best);
    assert_eq!(report.cause, CrashCause::Traffic);
    assert_eq!(game_state.best_distance, 200.0);
    assert_eq!(game_state.runs_started, 2);
    assert_eq!(game_state.runs_finished, 2);
}

#[test]
fn test_start_run() {
    let mut world = quiet_world(2);
    world.start_run(VehicleProfile::Scooter);

    assert_eq!(world.state(), RunState::Playing);
    assert!(world.obstacles.is_empty(), "menu traffic is cleared");
    let player = world.player.as_ref().expect("player exists while playing");
    assert_eq!(player.profile, VehicleProfile::Scooter);
    assert_eq!(player.lane, Lane::Right);
    assert_eq!(world.spawner.next_spawn_z, 50.0);

    let events = world.drain_events();
    assert_eq!(
        events,
        vec![SimEvent::RunStarted {
            profile: VehicleProfile::Scooter
        }]
    );
    assert!(world.drain_events().is_empty());
}

#[test]
fn test_menu_traffic_drifts() {
    let mut world = quiet_world(3);
    let car = world.insert_obstacle(ObstacleType::Car, Lane::Left, 20.0);
    let speed = world.obstacle(car).map(|o| o.speed).unwrap_or(0.0);
    let before = world.obstacles.len();

    world.tick(0.5, &InputSnapshot::default());

    // Ticks are clamped to 0.05 s, and menu traffic moves at 40%
    let z = world.obstacle(car).map(|o| o.position.z).unwrap_or(0.0);
    assert!((z - (20.0 + speed * 0.05 * 0.4)).abs() < 1e-4);
    assert_eq!(world.obstacles.len(), before, "nothing spawns on the menu");
    assert!(world.player.is_none());
}

#[test]
fn test_degenerate_delta_is_a_noop() {
    let mut world = playing_world(4);
    world.tick(DT, &InputSnapshot::default());
    let z = world.distance();
    let time = world.time;

    for delta in [0.0, -0.5, f32::NAN] {
        world.tick(delta, &InputSnapshot::default());
        assert_eq!(world.distance(), z);
        assert_eq!(world.time, time);
    }
}

#[test]
fn test_distance_resets_between_runs() {
    let mut world = playing_world(5);
    for _ in 0..30 {
        world.tick(DT, &InputSnapshot::default());
    }
    assert!(world.distance() > 0.0);

    world.start_run(VehicleProfile::AutoRickshaw);
    assert_eq!(world.distance(), 0.0);
    assert_eq!(world.game_state.runs_started, 2);
}

#[test]
fn test_blocking_obstacle_ends_run() {
    let mut world = playing_world(6);
    let police = world.insert_obstacle(ObstacleType::Police, Lane::Right, 1.0);
    if let Some(obstacle) = world.obstacle_mut(police) {
        obstacle.spawn_grace = 0.0;
    }

    world.tick(DT, &InputSnapshot::default());

    assert_eq!(world.state(), RunState::GameOver);
    assert!(world.player.is_none());

    let report = *world.last_report().expect("crash produces a report");
    assert_eq!(report.obstacle_type, ObstacleType::Police);
    assert_eq!(report.cause, CrashCause::Police);
    assert!(report.final_distance > 0.0);
    assert!(report.is_new_best);
    assert_eq!(world.best_distance(), report.final_distance);

    let events = world.drain_events();
    assert!(events.contains(&SimEvent::RunEnded(report)));
    assert_eq!(crash_headline(report.cause), "Caught by Traffic Police!");
}

#[test]
fn test_obstacle_in_grace_does_not_end_run() {
    let mut world = playing_world(7);
    world.insert_obstacle(ObstacleType::Cow, Lane::Right, 1.0);

    world.tick(DT, &InputSnapshot::default());
    assert_eq!(world.state(), RunState::Playing);
}

#[test]
fn test_first_tick_crash_leaves_scenery_in_window() {
    let mut world = playing_world(9);
    let cow = world.insert_obstacle(ObstacleType::Cow, Lane::Right, 1.0);
    if let Some(obstacle) = world.obstacle_mut(cow) {
        obstacle.spawn_grace = 0.0;
    }

    world.tick(DT, &InputSnapshot::default());
    assert_eq!(world.state(), RunState::GameOver);

    let report = *world.last_report().expect("crash produces a report");
    for pool in &world.scenery.pools {
        assert!(pool.in_window(0.0), "{:?} {:?}", pool.kind, pool.side);
        assert!(pool.in_window(report.final_distance), "{:?} {:?}", pool.kind, pool.side);
    }
}

#[test]
fn test_game_over_is_frozen() {
    let mut world = playing_world(8);
    let cow = world.insert_obstacle(ObstacleType::Cow, Lane::Right, 1.0);
    if let Some(obstacle) = world.obstacle_mut(cow) {
        obstacle.spawn_grace = 0.0;
    }
    world.tick(DT, &InputSnapshot::default());
    assert_eq!(world.state(), RunState::GameOver);
    world.drain_events();

    let positions: Vec<_> = world.obstacles.iter().map(|o| o.position).collect();
    let time = world.time;
    for _ in 0..30 {
        world.tick(DT, &InputSnapshot::default());
    }
    let after: Vec<_> = world.obstacles.iter().map(|o| o.position).collect();

    assert_eq!(positions, after);
    assert_eq!(world.state(), RunState::GameOver);
    assert!(world.drain_events().is_empty());
    assert!(world.time > time, "the clock keeps running");
}

#[test]
fn test_restart_and_menu() {
    let mut world = playing_world(9);
    world.start_run(VehicleProfile::Scooter);
    let cow = world.insert_obstacle(ObstacleType::Cow, Lane::Right, 1.0);
    if let Some(obstacle) = world.obstacle_mut(cow) {
        obstacle.spawn_grace = 0.0;
    }
    world.tick(DT, &InputSnapshot::default());
    assert_eq!(world.state(), RunState::GameOver);
    world.drain_events();

    world.restart();
    assert_eq!(world.state(), RunState::Playing);
    assert_eq!(
        world.player.as_ref().map(|p| p.profile),
        Some(VehicleProfile::Scooter)
    );
    assert_eq!(
        world.drain_events(),
        vec![SimEvent::RunStarted {
            profile: VehicleProfile::Scooter
        }]
    );

    world.back_to_menu();
    assert_eq!(world.state(), RunState::Menu);
    assert!(world.player.is_none());
    assert_eq!(world.obstacles.len(), 13);
    // The best distance survives the trip to the menu
    assert!(world.best_distance() > 0.0);
}

#[test]
fn test_npc_crash_removes_both_obstacles() {
    let mut world = playing_world(10);
    let car = world.insert_obstacle(ObstacleType::Car, Lane::Left, 30.0);
    let truck = world.insert_obstacle(ObstacleType::Truck, Lane::Left, 30.5);
    for id in [car, truck] {
        if let Some(obstacle) = world.obstacle_mut(id) {
            obstacle.spawn_grace = 0.0;
        }
    }

    world.tick(DT, &InputSnapshot::default());

    assert!(world.obstacle(car).is_none());
    assert!(world.obstacle(truck).is_none());
    let effects: Vec<_> = world
        .drain_events()
        .into_iter()
        .filter(|e| matches!(e, SimEvent::CrashEffect { .. }))
        .collect();
    assert_eq!(effects.len(), 1);
    if let SimEvent::CrashEffect { position } = effects[0] {
        assert!(position.z > 30.0 && position.z < 31.0);
    }
    assert_eq!(world.state(), RunState::Playing);
}

#[test]
fn test_obstacles_behind_are_despawned() {
    let mut world = playing_world(11);
    let cow = world.insert_obstacle(ObstacleType::Cow, Lane::Left, -50.0);
    let ahead = world.insert_obstacle(ObstacleType::Cow, Lane::Left, 100.0);

    world.tick(DT, &InputSnapshot::default());

    assert!(world.obstacle(cow).is_none());
    assert!(world.obstacle(ahead).is_some());
}

#[test]
fn test_spawner_fills_road_ahead() {
    let mut world = playing_world(12);
    world.tick(DT, &InputSnapshot::default());

    assert!(world.spawner.next_spawn_z >= world.distance() + world.config.spawn_ahead);
    assert!(world.obstacles.len() > 5);
    assert!(world.obstacles.iter().all(|o| o.position.z >= 50.0 - 1.5));
}

#[test]
fn test_obstacles_speak_once() {
    let mut world = playing_world(13);
    let cow = world.insert_obstacle(ObstacleType::Cow, Lane::Left, 8.0);

    let mut speeches = 0;
    for _ in 0..10 {
        world.tick(DT, &InputSnapshot::default());
        speeches += world
            .drain_events()
            .iter()
            .filter(|e| matches!(e, SimEvent::Speech { obstacle, .. } if *obstacle == cow))
            .count();
    }
    assert_eq!(speeches, 1);

    let mut rng = seeded_source(0);
    let line = speech_line(ObstacleType::Cow, rng.as_mut()).unwrap_or_default();
    assert!(speech_lines(ObstacleType::Cow).contains(&line));
    assert!(speech_line(ObstacleType::Pothole, rng.as_mut()).is_none());
}

#[test]
fn test_honk_emits_event() {
    let mut world = playing_world(14);
    let honk = InputSnapshot {
        honk: true,
        ..Default::default()
    };

    world.tick(DT, &honk);
    let honks: Vec<_> = world
        .drain_events()
        .into_iter()
        .filter(|e| matches!(e, SimEvent::Honk { .. }))
        .collect();
    assert_eq!(honks.len(), 1);

    // Still cooling down
    world.tick(DT, &honk);
    assert!(world
        .drain_events()
        .iter()
        .all(|e| !matches!(e, SimEvent::Honk { .. })));
}

#[test]
fn test_start_while_playing_abandons_run() {
    let mut world = playing_world(15);
    for _ in 0..60 {
        world.tick(DT, &InputSnapshot::default());
    }
    world.start_run(VehicleProfile::Scooter);

    assert_eq!(world.state(), RunState::Playing);
    assert_eq!(world.distance(), 0.0);
    assert_eq!(world.game_state.runs_finished, 0);
    assert_eq!(world.best_distance(), 0.0);
}

#[test]
fn test_unknown_profile_falls_back() {
    assert_eq!(
        VehicleProfile::from_name("hovercraft"),
        VehicleProfile::AutoRickshaw
    );
    assert_eq!(VehicleProfile::from_name(" Scooty "), VehicleProfile::Scooter);
    assert_eq!(VehicleProfile::from_name("auto"), VehicleProfile::AutoRickshaw);
}

#[test]
fn test_invalid_config_is_rejected() {
    let config = SimConfig {
        player_fairness: 0.0,
        ..SimConfig::default()
    };
    assert!(config.validate().is_err());

    let err = match SimWorld::new_with_seed(0).with_config(config) {
        Ok(_) => panic!("invalid config accepted"),
        Err(e) => e,
    };
    let message = format!("{:#}", err);
    assert!(message.contains("Invalid simulation config"));
    assert!(message.contains("player_fairness"));

    let mut heavy = SimConfig::default();
    heavy.spawn_table.fixed[1].weight = 0.9;
    assert!(heavy.validate().is_err());

    assert!(SimConfig::default().validate().is_ok());
}

#[test]
fn test_seeded_runs_are_reproducible() {
    let autopilot = Autopilot::default();
    let drive = |seed: u64| {
        let mut world = SimWorld::new_with_seed(seed);
        world.start_run(VehicleProfile::AutoRickshaw);
        let mut ticks = 0;
        while ticks < 1200 && world.state() == RunState::Playing {
            let input = world
                .player
                .as_ref()
                .map(|p| autopilot.decide(p, &world.obstacles))
                .unwrap_or_default();
            world.tick(DT, &input);
            ticks += 1;
        }
        let ids: Vec<_> = world.obstacles.iter().map(|o| o.id).collect();
        (ticks, world.distance(), world.best_distance(), ids)
    };

    assert_eq!(drive(42), drive(42));
}

#[test]
fn test_format_distance() {
    assert_eq!(format_distance(0.0), "0 m");
    assert_eq!(format_distance(999.9), "999 m");
    assert_eq!(format_distance(1000.0), "1.0 km");
    assert_eq!(format_distance(2500.0), "2.5 km");
}
