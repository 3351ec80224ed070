//! Player vehicle physics
//!
//! Standalone implementation that doesn't depend on Bevy.

use super::config::VehiclePhysics;
use super::types::{Hitbox, Lane, Position, VehicleProfile};

/// Boolean intents for one tick, however they were produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InputSnapshot {
    pub accelerate: bool,
    pub brake: bool,
    pub steer_left: bool,
    pub steer_right: bool,
    pub honk: bool,
}

impl InputSnapshot {
    /// Lane requested this tick; conflicting steering requests nothing
    pub fn requested_lane(&self) -> Option<Lane> {
        match (self.steer_left, self.steer_right) {
            (true, false) => Some(Lane::Left),
            (false, true) => Some(Lane::Right),
            _ => None,
        }
    }
}

/// Result of a player update indicating what the world should react to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerUpdateResult {
    Continue,
    /// The horn sounded this tick
    Honked,
}

/// Clamp a raw frame delta into `[0, max_tick]`; NaN and negative deltas become 0
pub fn clamp_delta(raw_delta: f32, max_tick: f32) -> f32 {
    if raw_delta.is_finite() && raw_delta > 0.0 {
        raw_delta.min(max_tick)
    } else {
        0.0
    }
}

/// The player's vehicle for one run
#[derive(Debug, Clone)]
pub struct SimPlayer {
    pub profile: VehicleProfile,
    pub physics: VehiclePhysics,
    pub hitbox: Hitbox,
    /// Longitudinal position, never decreases
    pub z: f32,
    /// Discrete lane the driver asked for
    pub lane: Lane,
    /// Eased lateral coordinate used for collisions and AI proximity
    pub x: f32,
    pub speed: f32,
    /// Distance driven this run
    pub distance: f32,
    pub honk_cooldown: f32,
    /// Roll while switching lanes
    pub tilt: f32,
    /// Vertical offset from road vibration
    pub bob: f32,
    /// Forward pitch wobble
    pub pitch: f32,
}

impl SimPlayer {
    pub fn new(profile: VehicleProfile) -> Self {
        let physics = profile.physics();
        let lane = Lane::default();
        Self {
            profile,
            physics,
            hitbox: profile.hitbox(),
            z: 0.0,
            lane,
            x: lane.offset(),
            speed: super::config::START_SPEED.min(physics.max_speed),
            distance: 0.0,
            honk_cooldown: 0.0,
            tilt: 0.0,
            bob: 0.0,
            pitch: 0.0,
        }
    }

    pub fn position(&self) -> Position {
        Position::new(self.x, self.bob, self.z)
    }

    /// Speed as shown on the gauge
    pub fn speed_kmh(&self) -> u32 {
        (self.speed * 3.6).floor() as u32
    }

    /// Speed as a fraction of the vehicle's top speed
    pub fn speed_fraction(&self) -> f32 {
        self.speed / self.physics.max_speed
    }

    /// Advance speed, forward travel, lane tracking and the horn by one tick.
    /// `delta_secs` must already be clamped.
    pub fn update(
        &mut self,
        delta_secs: f32,
        input: &InputSnapshot,
        honk_cooldown: f32,
    ) -> PlayerUpdateResult {
        self.update_speed(delta_secs, input);

        let dz = self.speed * delta_secs;
        self.z += dz;
        self.distance += dz;

        if let Some(lane) = input.requested_lane() {
            self.lane = lane;
        }

        let prev_x = self.x;
        let ease = (self.physics.lane_switch_speed * delta_secs).min(1.0);
        self.x += (self.lane.offset() - prev_x) * ease;
        self.tilt = -(self.x - prev_x) * 2.5;

        let mut result = PlayerUpdateResult::Continue;
        if input.honk && self.honk_cooldown <= 0.0 {
            self.honk_cooldown = honk_cooldown;
            result = PlayerUpdateResult::Honked;
        }
        self.honk_cooldown = (self.honk_cooldown - delta_secs).max(0.0);

        result
    }

    fn update_speed(&mut self, delta_secs: f32, input: &InputSnapshot) {
        let physics = &self.physics;
        if input.accelerate {
            self.speed = (self.speed + physics.accel * delta_secs).min(physics.max_speed);
        } else if input.brake {
            self.speed = (self.speed - physics.brake_decel * delta_secs).max(physics.min_speed());
        } else {
            let cruise = physics.cruise_speed();
            if self.speed > cruise {
                self.speed = (self.speed - physics.natural_decel * delta_secs).max(cruise);
            } else if self.speed < super::config::MIN_SPEED {
                self.speed = (self.speed + physics.accel * 0.5 * delta_secs)
                    .min(super::config::MIN_SPEED);
            }
        }
        self.speed = self.speed.clamp(physics.min_speed(), physics.max_speed);
    }

    /// Recompute the cosmetic vibration; rough surfaces shake harder
    pub fn apply_road_feel(&mut self, on_surface: bool) {
        let speed_norm = self.speed_fraction();
        let z = self.z;
        let mut amp = 0.02 + speed_norm * 0.04;
        if on_surface {
            amp *= 2.5;
        }

        let mut bob = (z * 2.3).sin() * amp
            + (z * 5.7).sin() * amp * 0.35
            + (z * 0.7).sin() * amp * 0.6;
        if on_surface {
            bob += (z * 12.5).sin() * amp * 0.5;
        }
        self.bob = bob;
        self.pitch = (z * 3.1).sin() * 0.02 * speed_norm * if on_surface { 1.8 } else { 1.0 };
    }
}
