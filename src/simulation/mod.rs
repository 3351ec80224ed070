//! Standalone driving simulation module
//!
//! This module contains all the core game logic that can run
//! independently of the Bevy game engine. It can be tested via console
//! without needing to boot up the full game.

mod collision;
mod config;
mod events;
mod game_state;
mod obstacle;
mod obstacle_manager;
mod player;
mod random;
mod scenery;
mod spawner;
mod types;
mod world;

// Re-export public types for external use
// These may not be used within this crate but are part of the public API
#[allow(unused_imports)]
pub use collision::{check_player_collision, find_npc_collisions, is_on_surface, Aabb, NpcCrash};
#[allow(unused_imports)]
pub use config::{
    RampedWeight, SimConfig, SpawnTable, SpawnWeight, VehiclePhysics, DESPAWN_BEHIND,
    HONK_COOLDOWN, LANE_LEFT_X, LANE_RIGHT_X, MAX_TICK_SECONDS, MIN_SPEED, ROAD_WIDTH,
    RUN_START_SPAWN_Z, SPAWN_AHEAD, SPAWN_GRACE, START_SPEED,
};
#[allow(unused_imports)]
pub use events::{GameOverReport, SimEvent};
#[allow(unused_imports)]
pub use game_state::{GameState, RunState};
#[allow(unused_imports)]
pub use obstacle::{
    CrossingBehavior, DespawnReason, ObstacleBehavior, OncomingBody, SimObstacle,
    TrafficBehavior,
};
#[allow(unused_imports)]
pub use obstacle_manager::{
    collect_despawns, despawn_obstacles, honk_nearby, menu_traffic, spawn_obstacle,
    update_obstacles,
};
#[allow(unused_imports)]
pub use player::{clamp_delta, InputSnapshot, PlayerUpdateResult, SimPlayer};
#[allow(unused_imports)]
pub use random::{choose, seeded_source, thread_source, RandomSource, ScriptedRandom};
#[allow(unused_imports)]
pub use scenery::{RoadSide, SceneryElement, SceneryKind, SceneryPool, SimScenery};
#[allow(unused_imports)]
pub use spawner::{SimSpawner, SpawnOrigin, SpawnRequest};
#[allow(unused_imports)]
pub use types::{
    CrashCause, Hitbox, Lane, ObstacleClass, ObstacleId, ObstacleType, Position, VehicleProfile,
};
pub use world::SimWorld;
