//! Main simulation world that ties everything together
//!
//! This is the entry point for running the driving simulation
//! without any Bevy dependencies.

use std::collections::HashSet;

use anyhow::{Context, Result};
use log::{debug, info, warn};

use crate::persistence::BestDistanceStore;

use super::collision::{check_player_collision, find_npc_collisions, is_on_surface};
use super::config::{
    SimConfig, MENU_TRAFFIC_SPEED_FACTOR, RUN_START_SPAWN_Z, SPEECH_FAR, SPEECH_FORGET_BEHIND,
    SPEECH_NEAR,
};
use super::events::{GameOverReport, SimEvent};
use super::game_state::{GameState, RunState};
use super::obstacle::{DespawnReason, SimObstacle};
use super::obstacle_manager::{
    collect_despawns, despawn_obstacles, honk_nearby, menu_traffic, spawn_obstacle,
    update_obstacles,
};
use super::player::{clamp_delta, InputSnapshot, PlayerUpdateResult, SimPlayer};
use super::random::{seeded_source, thread_source, RandomSource};
use super::scenery::SimScenery;
use super::spawner::{SimSpawner, SpawnRequest};
use super::types::{Lane, ObstacleId, ObstacleType, VehicleProfile};

/// The main simulation world
pub struct SimWorld {
    /// Tunables used by every phase of the tick
    pub config: SimConfig,

    /// Menu / playing / game over, plus best distance
    pub game_state: GameState,

    /// The player's vehicle; present only while a run is in progress
    pub player: Option<SimPlayer>,

    /// Live obstacles in spawn order
    pub obstacles: Vec<SimObstacle>,

    /// Row cursor for procedural spawning
    pub spawner: SimSpawner,

    /// Recycled roadside decorations
    pub scenery: SimScenery,

    /// Profile of the most recent run, reused by restart
    pub last_profile: VehicleProfile,

    /// Whether the player was on a rough patch during the last tick
    pub on_surface: bool,

    /// Simulation time
    pub time: f32,

    /// Next ID to assign
    next_id: usize,

    rng: Box<dyn RandomSource>,

    /// Events waiting for the presentation layer
    events: Vec<SimEvent>,

    /// Obstacles that already spoke to the player
    spoken: HashSet<ObstacleId>,

    store: Option<Box<dyn BestDistanceStore>>,
}

impl Default for SimWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl SimWorld {
    fn new_internal(rng: Box<dyn RandomSource>) -> Self {
        let mut world = Self {
            config: SimConfig::default(),
            game_state: GameState::default(),
            player: None,
            obstacles: Vec::new(),
            spawner: SimSpawner::new(),
            scenery: SimScenery::new(),
            last_profile: VehicleProfile::default(),
            on_surface: false,
            time: 0.0,
            next_id: 0,
            rng,
            events: Vec::new(),
            spoken: HashSet::new(),
            store: None,
        };
        world.populate_menu();
        world
    }

    pub fn new() -> Self {
        Self::new_internal(thread_source())
    }

    /// Create a new SimWorld with a seeded RNG for reproducible simulations
    pub fn new_with_seed(seed: u64) -> Self {
        Self::new_internal(seeded_source(seed))
    }

    /// Create a new SimWorld drawing from the given random source
    pub fn new_with_rng(rng: Box<dyn RandomSource>) -> Self {
        Self::new_internal(rng)
    }

    /// Replace the configuration after validating it
    pub fn with_config(mut self, config: SimConfig) -> Result<Self> {
        config.validate().context("Invalid simulation config")?;
        self.config = config;
        Ok(self)
    }

    /// Attach a best-distance store and load the stored best from it
    pub fn with_store(mut self, store: Box<dyn BestDistanceStore>) -> Self {
        match store.load() {
            Ok(best) => {
                let best = best as f32;
                if best > self.game_state.best_distance {
                    self.game_state.best_distance = best;
                }
                debug!("Loaded best distance {}", best);
            }
            Err(e) => warn!("Could not load best distance: {:#}", e),
        }
        self.store = Some(store);
        self
    }

    fn next_obstacle_id(&mut self) -> ObstacleId {
        let id = ObstacleId(self.next_id);
        self.next_id += 1;
        id
    }

    pub fn state(&self) -> RunState {
        self.game_state.state
    }

    pub fn best_distance(&self) -> f32 {
        self.game_state.best_distance
    }

    /// Distance driven in the current run, 0 outside a run
    pub fn distance(&self) -> f32 {
        self.player.as_ref().map(|p| p.distance).unwrap_or(0.0)
    }

    pub fn last_report(&self) -> Option<&GameOverReport> {
        self.game_state.last_report.as_ref()
    }

    pub fn obstacle(&self, id: ObstacleId) -> Option<&SimObstacle> {
        self.obstacles.iter().find(|o| o.id == id)
    }

    pub fn obstacle_mut(&mut self, id: ObstacleId) -> Option<&mut SimObstacle> {
        self.obstacles.iter_mut().find(|o| o.id == id)
    }

    /// Take every event produced since the last call
    pub fn drain_events(&mut self) -> Vec<SimEvent> {
        std::mem::take(&mut self.events)
    }

    /// Place an obstacle directly, bypassing the spawner
    pub fn insert_obstacle(&mut self, obstacle_type: ObstacleType, lane: Lane, z: f32) -> ObstacleId {
        let id = self.next_obstacle_id();
        let obstacle = spawn_obstacle(id, obstacle_type, lane, z, &self.config, self.rng.as_mut());
        self.obstacles.push(obstacle);
        id
    }

    fn materialize(&mut self, request: SpawnRequest) {
        let id = self.insert_obstacle(request.obstacle_type, request.lane, request.z);
        debug!(
            "Spawned {} {:?} in {:?} at z={:.1} ({:?})",
            request.obstacle_type.name(),
            id,
            request.lane,
            request.z,
            request.origin
        );
    }

    fn populate_menu(&mut self) {
        let mut next_id = self.next_id;
        let traffic = menu_traffic(
            || {
                let id = ObstacleId(next_id);
                next_id += 1;
                id
            },
            &self.config,
            self.rng.as_mut(),
        );
        self.next_id = next_id;
        self.obstacles = traffic;
    }

    fn reset_scene(&mut self) {
        self.obstacles.clear();
        self.spoken.clear();
        self.on_surface = false;
        self.scenery = SimScenery::new();
    }

    /// Begin a fresh run with the given vehicle
    ///
    /// Allowed from any state; starting while playing abandons the current run.
    pub fn start_run(&mut self, profile: VehicleProfile) {
        self.reset_scene();
        self.player = Some(SimPlayer::new(profile));
        self.last_profile = profile;
        self.spawner.reset(RUN_START_SPAWN_Z);
        self.game_state.begin_run();

        info!("Run started with the {}", profile.name());
        self.events.push(SimEvent::RunStarted { profile });
    }

    /// Start another run with the vehicle of the previous one
    pub fn restart(&mut self) {
        self.start_run(self.last_profile);
    }

    /// Return to the title screen
    pub fn back_to_menu(&mut self) {
        self.player = None;
        self.reset_scene();
        self.populate_menu();
        self.game_state.enter_menu();
        debug!("Back to menu");
    }

    /// Advance the world by one frame
    ///
    /// `raw_delta` is clamped first; zero-length ticks do nothing.
    pub fn tick(&mut self, raw_delta: f32, input: &InputSnapshot) {
        let delta_secs = clamp_delta(raw_delta, self.config.max_tick_seconds);
        if delta_secs <= 0.0 {
            return;
        }
        self.time += delta_secs;

        match self.game_state.state {
            RunState::Menu => {
                for obstacle in self.obstacles.iter_mut() {
                    obstacle.drift(delta_secs, MENU_TRAFFIC_SPEED_FACTOR);
                }
            }
            RunState::Playing => self.tick_playing(delta_secs, input),
            RunState::GameOver => {}
        }
    }

    fn tick_playing(&mut self, delta_secs: f32, input: &InputSnapshot) {
        self.game_state.update(delta_secs);

        if self.player.is_none() {
            warn!("Playing without a player, returning to menu");
            self.back_to_menu();
            return;
        }

        // Physics
        let Some(player) = self.player.as_mut() else {
            return;
        };
        let result = player.update(delta_secs, input, self.config.honk_cooldown);
        let on_surface = is_on_surface(player, &self.obstacles);
        player.apply_road_feel(on_surface);
        let player_z = player.z;
        let distance = player.distance;
        self.on_surface = on_surface;

        if result == PlayerUpdateResult::Honked {
            let swerved = honk_nearby(
                &mut self.obstacles,
                player_z,
                &self.config,
                self.rng.as_mut(),
            );
            self.events.push(SimEvent::Honk {
                z: player_z,
                swerved,
            });
        }

        // Spawning
        let ambient = self
            .obstacles
            .iter()
            .filter(|o| o.obstacle_type == ObstacleType::Cow)
            .count();
        let requests = self.spawner.plan(
            player_z,
            distance,
            ambient,
            &self.config,
            self.rng.as_mut(),
        );
        for request in requests {
            self.materialize(request);
        }

        // Movement and behavior
        update_obstacles(delta_secs, &mut self.obstacles, self.rng.as_mut());

        // Obstacles running into each other
        let crashes = find_npc_collisions(&self.obstacles, player_z, &self.config);
        if !crashes.is_empty() {
            let mut removed = Vec::with_capacity(crashes.len() * 2);
            for crash in &crashes {
                debug!(
                    "NPC crash between {:?} and {:?} at z={:.1}",
                    crash.first, crash.second, crash.midpoint.z
                );
                removed.push((crash.first, DespawnReason::NpcCrash));
                removed.push((crash.second, DespawnReason::NpcCrash));
                self.events.push(SimEvent::CrashEffect {
                    position: crash.midpoint,
                });
            }
            despawn_obstacles(&mut self.obstacles, &removed);
        }

        // Despawn sweep
        let expired = collect_despawns(&self.obstacles, player_z, &self.config);
        despawn_obstacles(&mut self.obstacles, &expired);

        // Player collision ends the run
        let hit = self.player.as_ref().and_then(|player| {
            check_player_collision(player, &self.obstacles, &self.config).map(|o| o.obstacle_type)
        });
        if let Some(obstacle_type) = hit {
            self.end_run(obstacle_type, distance);
            return;
        }

        self.emit_speech(player_z);
        self.scenery.update(player_z);
    }

    fn emit_speech(&mut self, player_z: f32) {
        for obstacle in &self.obstacles {
            if !obstacle.obstacle_type.has_speech() {
                continue;
            }
            let ahead = obstacle.position.z - player_z;
            if ahead > SPEECH_NEAR && ahead < SPEECH_FAR && self.spoken.insert(obstacle.id) {
                self.events.push(SimEvent::Speech {
                    obstacle: obstacle.id,
                    obstacle_type: obstacle.obstacle_type,
                });
            }
        }

        let obstacles = &self.obstacles;
        self.spoken.retain(|id| {
            obstacles
                .iter()
                .any(|o| o.id == *id && o.position.z > player_z - SPEECH_FORGET_BEHIND)
        });
    }

    fn end_run(&mut self, obstacle_type: ObstacleType, distance: f32) {
        self.player = None;
        let report = self.game_state.end_run(obstacle_type, distance);
        info!(
            "Run ended: hit a {} after {:.0}m",
            obstacle_type.name(),
            report.final_distance
        );

        if report.is_new_best {
            info!("New best distance: {:.0}m", report.best_distance);
            self.save_best(report.best_distance);
        }
        self.events.push(SimEvent::RunEnded(report));
    }

    fn save_best(&mut self, best: f32) {
        if let Some(store) = self.store.as_mut() {
            if let Err(e) = store.save(best.floor() as u64) {
                warn!("Could not save best distance: {:#}", e);
            }
        }
    }

    /// Log a summary of the world state
    pub fn log_summary(&self) {
        info!("=== Road Rage Summary ===");
        info!("Time: {:.2}s", self.time);
        info!("{}", self.game_state.summary());
        match &self.player {
            Some(player) => info!(
                "Player: {} at z={:.1}, {} km/h, lane {:?}",
                player.profile.name(),
                player.z,
                player.speed_kmh(),
                player.lane
            ),
            None => info!("Player: none"),
        }
        info!("Obstacles: {}", self.obstacles.len());
        info!("Scenery elements: {}", self.scenery.element_count());
    }
}
