//! Tunables for the driving simulation
//!
//! Fixed geometry and physics live here as constants. Everything that was
//! tuned by feel (fairness factors, spawn tables, probabilities) is also
//! collected into [`SimConfig`] so it can be adjusted per world.

use anyhow::{ensure, Result};

use super::types::{Hitbox, ObstacleType, VehicleProfile};

/// Lateral centre of lane 0
pub const LANE_RIGHT_X: f32 = -1.3;
/// Lateral centre of lane 1
pub const LANE_LEFT_X: f32 = 1.3;
/// Full width of the asphalt
pub const ROAD_WIDTH: f32 = 6.5;

/// Minimum cruising speed; braking floors at half of this
pub const MIN_SPEED: f32 = 12.0;
/// Speed the player starts every run with (capped by the vehicle maximum)
pub const START_SPEED: f32 = 22.0;
/// Fraction of the (max - min) band the vehicle settles at with no input
pub const CRUISE_FRACTION: f32 = 0.3;
/// Largest tick the integrator will accept
pub const MAX_TICK_SECONDS: f32 = 0.05;

/// Seconds between honks
pub const HONK_COOLDOWN: f32 = 0.5;
/// How far ahead a honk startles traffic
pub const HONK_WINDOW: f32 = 25.0;
/// Chance each startled vehicle swerves
pub const HONK_SWERVE_CHANCE: f32 = 0.35;
/// Lane-change timer after a startled swerve
pub const HONK_SWERVE_TIMER: f32 = 2.0;

/// Rows are kept populated this far ahead of the player
pub const SPAWN_AHEAD: f32 = 200.0;
/// Obstacles this far behind the player are removed
pub const DESPAWN_BEHIND: f32 = 40.0;
/// Secondary despawn distance for wrong-way traffic
pub const ONCOMING_DESPAWN_BEHIND: f32 = 50.0;
/// Row cursor of a freshly created spawner
pub const INITIAL_SPAWN_Z: f32 = 60.0;
/// Row cursor after a run starts
pub const RUN_START_SPAWN_Z: f32 = 50.0;
/// Seconds after spawning during which an obstacle cannot collide
pub const SPAWN_GRACE: f32 = 0.3;

/// Player collision shrink applied to summed half-extents
pub const PLAYER_FAIRNESS: f32 = 0.85;
/// NPC collision shrink applied to summed full extents
pub const NPC_FAIRNESS: f32 = 0.35;
/// NPC collisions are only checked this close to the player
pub const NPC_COLLISION_RANGE: f32 = 100.0;

/// Obstacles start speaking when they are this far ahead...
pub const SPEECH_NEAR: f32 = 4.0;
/// ...and closer than this
pub const SPEECH_FAR: f32 = 12.0;
/// Spoken-to obstacles are forgotten once this far behind
pub const SPEECH_FORGET_BEHIND: f32 = 30.0;

/// Lateral spawn coordinate of a crossing dog (sign picks the side)
pub const CROSSING_START_X: f32 = 3.0;
/// Lateral target of a crossing dog, beyond the far edge of the road
pub const CROSSING_TARGET_X: f32 = 3.5;
/// Lateral easing rate while crossing
pub const CROSSING_LATERAL_RATE: f32 = 4.0;
/// Forward running speed while crossing
pub const CROSSING_RUN_SPEED: f32 = 7.0;
/// Crossing is complete within this lateral distance of the target
pub const CROSSING_TOLERANCE: f32 = 0.1;
/// Lateral easing rate for lane changes
pub const TRAFFIC_LATERAL_RATE: f32 = 3.0;

/// Speed multiplier for background traffic on the menu screen
pub const MENU_TRAFFIC_SPEED_FACTOR: f32 = 0.4;

/// Per-vehicle handling numbers
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VehiclePhysics {
    pub accel: f32,
    pub max_speed: f32,
    pub lane_switch_speed: f32,
    pub brake_decel: f32,
    pub natural_decel: f32,
}

impl VehiclePhysics {
    /// Speed the vehicle drifts to when neither pedal is pressed
    pub fn cruise_speed(&self) -> f32 {
        MIN_SPEED + (self.max_speed - MIN_SPEED) * CRUISE_FRACTION
    }

    /// Lowest speed braking can reach
    pub fn min_speed(&self) -> f32 {
        MIN_SPEED * 0.5
    }
}

impl VehicleProfile {
    pub fn physics(self) -> VehiclePhysics {
        match self {
            VehicleProfile::AutoRickshaw => VehiclePhysics {
                accel: 20.0,
                max_speed: 30.0,
                lane_switch_speed: 5.0,
                brake_decel: 22.0,
                natural_decel: 2.5,
            },
            VehicleProfile::Scooter => VehiclePhysics {
                accel: 9.0,
                max_speed: 68.0,
                lane_switch_speed: 22.0,
                brake_decel: 30.0,
                natural_decel: 1.5,
            },
        }
    }

    pub fn hitbox(self) -> Hitbox {
        match self {
            VehicleProfile::AutoRickshaw => Hitbox::new(1.3, 2.0),
            VehicleProfile::Scooter => Hitbox::new(0.5, 1.4),
        }
    }
}

/// Hitbox of the wrong-way car body
pub const WRONG_WAY_CAR_HITBOX: Hitbox = Hitbox::new(1.6, 3.2);
/// Hitbox of the wrong-way truck body
pub const WRONG_WAY_TRUCK_HITBOX: Hitbox = Hitbox::new(2.0, 5.5);

impl ObstacleType {
    /// Default footprint of the obstacle type. Wrong-way traffic picks a body
    /// at spawn time; this returns the car body.
    pub fn hitbox(self) -> Hitbox {
        match self {
            ObstacleType::Rickshaw => Hitbox::new(1.3, 2.0),
            ObstacleType::Truck => Hitbox::new(2.0, 5.5),
            ObstacleType::Car => Hitbox::new(1.6, 3.2),
            ObstacleType::Bus => Hitbox::new(2.1, 5.5),
            ObstacleType::Cow => Hitbox::new(1.8, 2.0),
            ObstacleType::Dog => Hitbox::new(0.5, 0.8),
            ObstacleType::Pothole => Hitbox::new(1.2, 1.2),
            ObstacleType::Police => Hitbox::new(1.2, 0.8),
            ObstacleType::WrongWay => WRONG_WAY_CAR_HITBOX,
            ObstacleType::RoughPatch => Hitbox::new(2.5, 15.0),
        }
    }
}

/// Fixed share of the row draw
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnWeight {
    pub obstacle_type: ObstacleType,
    pub weight: f32,
    /// Whether a row of this type may get a second obstacle in the other lane
    pub allows_pair: bool,
}

/// Share of the row draw that grows with distance travelled
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RampedWeight {
    pub obstacle_type: ObstacleType,
    pub base: f32,
    /// Added weight at full difficulty
    pub ramp: f32,
    /// Never drawn before this distance
    pub min_distance: f32,
}

impl RampedWeight {
    pub fn weight_at(&self, distance: f32, difficulty: f32) -> f32 {
        if distance > self.min_distance {
            self.base + self.ramp * difficulty
        } else {
            0.0
        }
    }
}

/// Weighted probability table used for every spawner row
#[derive(Debug, Clone, PartialEq)]
pub struct SpawnTable {
    pub fixed: Vec<SpawnWeight>,
    pub ramped: Vec<RampedWeight>,
    /// Uniform draw used for the probability mass left over by the weights
    pub fill: Vec<ObstacleType>,
    /// Uniform draw for a non-surface second obstacle next to a passable row
    pub pair_traffic: Vec<ObstacleType>,
    /// Distance at which the ramped weights reach full strength
    pub difficulty_distance: f32,
}

impl Default for SpawnTable {
    fn default() -> Self {
        let fixed = |obstacle_type, weight| SpawnWeight {
            obstacle_type,
            weight,
            allows_pair: true,
        };
        Self {
            fixed: vec![
                SpawnWeight {
                    obstacle_type: ObstacleType::Pothole,
                    weight: 0.04,
                    allows_pair: false,
                },
                fixed(ObstacleType::RoughPatch, 0.36),
                fixed(ObstacleType::Rickshaw, 0.08),
                fixed(ObstacleType::Car, 0.10),
                fixed(ObstacleType::Truck, 0.10),
                fixed(ObstacleType::Bus, 0.06),
                fixed(ObstacleType::Cow, 0.07),
            ],
            ramped: vec![
                RampedWeight {
                    obstacle_type: ObstacleType::Police,
                    base: 0.0,
                    ramp: 0.08,
                    min_distance: 150.0,
                },
                RampedWeight {
                    obstacle_type: ObstacleType::WrongWay,
                    base: 0.03,
                    ramp: 0.06,
                    min_distance: 400.0,
                },
            ],
            fill: vec![
                ObstacleType::Rickshaw,
                ObstacleType::Rickshaw,
                ObstacleType::Car,
                ObstacleType::Truck,
                ObstacleType::Rickshaw,
            ],
            pair_traffic: vec![
                ObstacleType::Rickshaw,
                ObstacleType::Car,
                ObstacleType::Truck,
                ObstacleType::Rickshaw,
                ObstacleType::Rickshaw,
                ObstacleType::Bus,
            ],
            difficulty_distance: 1000.0,
        }
    }
}

impl SpawnTable {
    /// Total weight at full difficulty
    pub fn max_total_weight(&self) -> f32 {
        let fixed: f32 = self.fixed.iter().map(|w| w.weight).sum();
        let ramped: f32 = self.ramped.iter().map(|w| w.base + w.ramp).sum();
        fixed + ramped
    }
}

/// Runtime configuration for a simulation world
#[derive(Debug, Clone, PartialEq)]
pub struct SimConfig {
    pub max_tick_seconds: f32,
    pub player_fairness: f32,
    pub npc_fairness: f32,
    pub npc_collision_range: f32,
    pub spawn_ahead: f32,
    pub despawn_behind: f32,
    pub oncoming_despawn_behind: f32,
    pub spawn_grace: f32,
    /// Chance a row gets a second obstacle in the other lane
    pub pair_probability: f32,
    /// Per-tick chance of a crossing dog appearing close ahead
    pub crossing_probability: f32,
    /// Minimum live cows kept ahead of the player
    pub ambient_floor: usize,
    pub honk_cooldown: f32,
    pub honk_window: f32,
    pub honk_swerve_chance: f32,
    pub spawn_table: SpawnTable,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            max_tick_seconds: MAX_TICK_SECONDS,
            player_fairness: PLAYER_FAIRNESS,
            npc_fairness: NPC_FAIRNESS,
            npc_collision_range: NPC_COLLISION_RANGE,
            spawn_ahead: SPAWN_AHEAD,
            despawn_behind: DESPAWN_BEHIND,
            oncoming_despawn_behind: ONCOMING_DESPAWN_BEHIND,
            spawn_grace: SPAWN_GRACE,
            pair_probability: 0.35,
            crossing_probability: 0.003,
            ambient_floor: 1,
            honk_cooldown: HONK_COOLDOWN,
            honk_window: HONK_WINDOW,
            honk_swerve_chance: HONK_SWERVE_CHANCE,
            spawn_table: SpawnTable::default(),
        }
    }
}

impl SimConfig {
    /// Check the configuration for values the simulation cannot work with
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.max_tick_seconds > 0.0 && self.max_tick_seconds.is_finite(),
            "max_tick_seconds must be positive, got {}",
            self.max_tick_seconds
        );
        ensure!(
            self.player_fairness > 0.0 && self.player_fairness <= 1.0,
            "player_fairness must be in (0, 1], got {}",
            self.player_fairness
        );
        ensure!(
            self.npc_fairness > 0.0 && self.npc_fairness <= 1.0,
            "npc_fairness must be in (0, 1], got {}",
            self.npc_fairness
        );
        ensure!(
            self.spawn_ahead > 0.0,
            "spawn_ahead must be positive, got {}",
            self.spawn_ahead
        );
        ensure!(
            self.despawn_behind > 0.0 && self.oncoming_despawn_behind > 0.0,
            "despawn distances must be positive"
        );
        for (name, p) in [
            ("pair_probability", self.pair_probability),
            ("crossing_probability", self.crossing_probability),
            ("honk_swerve_chance", self.honk_swerve_chance),
        ] {
            ensure!((0.0..=1.0).contains(&p), "{} must be in [0, 1], got {}", name, p);
        }

        let table = &self.spawn_table;
        ensure!(
            table.fixed.iter().all(|w| w.weight >= 0.0)
                && table.ramped.iter().all(|w| w.base >= 0.0 && w.ramp >= 0.0),
            "spawn weights must be non-negative"
        );
        ensure!(
            table.max_total_weight() <= 1.0 + f32::EPSILON,
            "spawn weights sum to {} at full difficulty, more than 1",
            table.max_total_weight()
        );
        ensure!(!table.fill.is_empty(), "spawn fill table is empty");
        ensure!(
            !table.pair_traffic.is_empty(),
            "pair traffic table is empty"
        );
        ensure!(
            table.difficulty_distance > 0.0,
            "difficulty_distance must be positive"
        );
        Ok(())
    }
}
