//! Obstacle state and per-tick AI for the driving simulation
//!
//! Standalone implementation that doesn't depend on Bevy.

use std::f32::consts::FRAC_PI_4;

use super::config::{
    SimConfig, CROSSING_LATERAL_RATE, CROSSING_RUN_SPEED, CROSSING_TOLERANCE,
    HONK_SWERVE_TIMER, TRAFFIC_LATERAL_RATE,
};
use super::random::RandomSource;
use super::types::{Hitbox, Lane, ObstacleClass, ObstacleId, ObstacleType, Position};

/// Body used by a wrong-way vehicle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OncomingBody {
    Car,
    Truck,
}

/// Timers and flags of same-direction traffic
#[derive(Debug, Clone, PartialEq)]
pub struct TrafficBehavior {
    pub can_change_lane: bool,
    /// Erratic drivers change lanes more often and vary speed more
    pub erratic: bool,
    /// Rickshaws: constant weaving and large speed swings
    pub aggressive: bool,
    pub lane_change_timer: f32,
    pub speed_change_timer: f32,
}

/// Progress of an actor running across the road
#[derive(Debug, Clone, PartialEq)]
pub struct CrossingBehavior {
    /// Lateral coordinate beyond the far edge of the road
    pub target_x: f32,
    pub has_crossed: bool,
}

/// Type-specific behavior payload
#[derive(Debug, Clone, PartialEq)]
pub enum ObstacleBehavior {
    /// Never moves
    Stationary,
    Traffic(TrafficBehavior),
    Oncoming { body: OncomingBody },
    Crossing(CrossingBehavior),
}

/// Why an obstacle is being removed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DespawnReason {
    FellBehind,
    OncomingPassed,
    Crossed,
    NpcCrash,
    Malformed,
}

/// An obstacle in the driving simulation
#[derive(Debug, Clone)]
pub struct SimObstacle {
    pub id: ObstacleId,
    pub obstacle_type: ObstacleType,
    pub position: Position,
    pub hitbox: Hitbox,
    /// Lane whose centre is nearest to the current lateral coordinate
    pub lane: Lane,
    pub target_lane: Lane,
    /// Signed longitudinal speed; negative for oncoming traffic
    pub speed: f32,
    /// Seconds left before this obstacle can take part in collisions
    pub spawn_grace: f32,
    /// Roll while changing lanes
    pub tilt: f32,
    /// Yaw, only used for presentation
    pub heading: f32,
    pub behavior: ObstacleBehavior,
}

impl SimObstacle {
    pub fn new(
        id: ObstacleId,
        obstacle_type: ObstacleType,
        position: Position,
        lane: Lane,
        speed: f32,
        behavior: ObstacleBehavior,
    ) -> Self {
        let hitbox = match &behavior {
            ObstacleBehavior::Oncoming {
                body: OncomingBody::Truck,
            } => super::config::WRONG_WAY_TRUCK_HITBOX,
            _ => obstacle_type.hitbox(),
        };
        Self {
            id,
            obstacle_type,
            position,
            hitbox,
            lane,
            target_lane: lane,
            speed,
            spawn_grace: 0.0,
            tilt: 0.0,
            heading: 0.0,
            behavior,
        }
    }

    pub fn with_grace(mut self, spawn_grace: f32) -> Self {
        self.spawn_grace = spawn_grace;
        self
    }

    pub fn with_heading(mut self, heading: f32) -> Self {
        self.heading = heading;
        self
    }

    pub fn in_grace(&self) -> bool {
        self.spawn_grace > 0.0
    }

    pub fn is_crossing(&self) -> bool {
        matches!(
            &self.behavior,
            ObstacleBehavior::Crossing(CrossingBehavior {
                has_crossed: false,
                ..
            })
        )
    }

    /// Obstacles with longitudinal speed can cause NPC crashes; a crossing
    /// dog has none and walks through parked obstacles
    pub fn is_moving(&self) -> bool {
        self.speed != 0.0
    }

    pub fn can_change_lane(&self) -> bool {
        matches!(
            &self.behavior,
            ObstacleBehavior::Traffic(TrafficBehavior {
                can_change_lane: true,
                ..
            })
        )
    }

    /// Check that the speed sign agrees with the obstacle's class
    pub fn speed_consistent(&self) -> bool {
        match self.obstacle_type.class() {
            ObstacleClass::StaticHazard | ObstacleClass::StaticActor => self.speed == 0.0,
            ObstacleClass::MobileTraffic => self.speed >= 0.0,
            ObstacleClass::Oncoming => self.speed < 0.0,
        }
    }

    /// Advance movement and behavior timers by one tick
    pub fn update(&mut self, delta_secs: f32, rng: &mut dyn RandomSource) {
        if self.spawn_grace > 0.0 {
            self.spawn_grace = (self.spawn_grace - delta_secs).max(0.0);
        }

        if self.speed != 0.0 {
            self.position.z += self.speed * delta_secs;
        }

        match &mut self.behavior {
            ObstacleBehavior::Traffic(traffic) => {
                if traffic.can_change_lane {
                    traffic.lane_change_timer -= delta_secs;
                    if traffic.lane_change_timer <= 0.0 {
                        if traffic.aggressive || traffic.erratic || rng.chance(0.4) {
                            self.target_lane = self.target_lane.other();
                        }
                        traffic.lane_change_timer = if traffic.aggressive {
                            rng.range(0.5, 2.0)
                        } else if traffic.erratic {
                            rng.range(1.5, 4.5)
                        } else {
                            rng.range(3.0, 6.0)
                        };
                    }
                }

                if self.speed > 0.0 {
                    traffic.speed_change_timer -= delta_secs;
                    if traffic.speed_change_timer <= 0.0 {
                        let spread = if traffic.erratic || traffic.aggressive {
                            12.0
                        } else {
                            5.0
                        };
                        let nudge = (rng.next_unit() - 0.5) * spread;
                        let floor = if traffic.erratic { 3.0 } else { 5.0 };
                        self.speed = (self.speed + nudge).max(floor);
                        traffic.speed_change_timer = if traffic.aggressive {
                            rng.range(1.0, 3.0)
                        } else {
                            rng.range(2.0, 6.0)
                        };
                    }
                }
            }
            ObstacleBehavior::Crossing(crossing) => {
                if !crossing.has_crossed {
                    let ease = (CROSSING_LATERAL_RATE * delta_secs).min(1.0);
                    self.position.x += (crossing.target_x - self.position.x) * ease;

                    let remaining = crossing.target_x - self.position.x;
                    if remaining.abs() > CROSSING_TOLERANCE {
                        self.position.z += CROSSING_RUN_SPEED * delta_secs;
                        self.heading = if remaining > 0.0 { -FRAC_PI_4 } else { FRAC_PI_4 };
                        self.position.y =
                            ((self.position.z + self.position.x) * 16.0).sin().abs() * 0.08;
                    } else {
                        crossing.has_crossed = true;
                        self.position.y = 0.0;
                    }
                }
            }
            ObstacleBehavior::Stationary | ObstacleBehavior::Oncoming { .. } => {}
        }

        if !matches!(self.behavior, ObstacleBehavior::Crossing(_)) {
            let target_x = self.target_lane.offset();
            let ease = (TRAFFIC_LATERAL_RATE * delta_secs).min(1.0);
            self.position.x += (target_x - self.position.x) * ease;

            let x_diff = target_x - self.position.x;
            if x_diff.abs() > 0.1 && self.speed > 0.0 {
                self.tilt = -x_diff * 0.05;
            } else {
                self.tilt *= 0.9;
            }
        }

        self.lane = Lane::nearest(self.position.x);

        debug_assert!(
            self.speed_consistent(),
            "{:?} {:?} has speed {} inconsistent with its class",
            self.id,
            self.obstacle_type,
            self.speed
        );
    }

    /// Decide whether this obstacle should leave the registry
    pub fn despawn_reason(&self, player_z: f32, config: &SimConfig) -> Option<DespawnReason> {
        if !self.position.is_finite() {
            return Some(DespawnReason::Malformed);
        }
        if self.position.z < player_z - config.despawn_behind {
            return Some(DespawnReason::FellBehind);
        }
        if self.speed < 0.0 && self.position.z < player_z - config.oncoming_despawn_behind {
            return Some(DespawnReason::OncomingPassed);
        }
        if let ObstacleBehavior::Crossing(CrossingBehavior {
            has_crossed: true, ..
        }) = &self.behavior
        {
            return Some(DespawnReason::Crossed);
        }
        None
    }

    /// React to a honk from `player_z`; returns true if the vehicle swerved
    pub fn startle(
        &mut self,
        player_z: f32,
        config: &SimConfig,
        rng: &mut dyn RandomSource,
    ) -> bool {
        if self.speed <= 0.0 {
            return false;
        }
        let ObstacleBehavior::Traffic(traffic) = &mut self.behavior else {
            return false;
        };
        if !traffic.can_change_lane {
            return false;
        }

        let ahead = self.position.z - player_z;
        if ahead > 0.0 && ahead < config.honk_window && rng.chance(config.honk_swerve_chance) {
            self.target_lane = self.target_lane.other();
            traffic.lane_change_timer = HONK_SWERVE_TIMER;
            return true;
        }
        false
    }

    /// Background movement on the menu screen: no AI, just forward drift
    pub fn drift(&mut self, delta_secs: f32, factor: f32) {
        if self.speed > 0.0 {
            self.position.z += self.speed * delta_secs * factor;
        }
    }
}
