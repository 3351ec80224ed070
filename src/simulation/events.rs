//! Events emitted by the world for the presentation layer

use super::types::{CrashCause, ObstacleId, ObstacleType, Position, VehicleProfile};

/// Summary of a finished run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GameOverReport {
    /// What the player hit
    pub obstacle_type: ObstacleType,
    pub cause: CrashCause,
    pub final_distance: f32,
    /// Best distance including this run
    pub best_distance: f32,
    pub is_new_best: bool,
}

impl GameOverReport {
    pub fn new(obstacle_type: ObstacleType, final_distance: f32, previous_best: f32) -> Self {
        let is_new_best = final_distance > previous_best;
        Self {
            obstacle_type,
            cause: CrashCause::from(obstacle_type),
            final_distance,
            best_distance: previous_best.max(final_distance),
            is_new_best,
        }
    }
}

/// Something the presentation layer should react to
#[derive(Debug, Clone, PartialEq)]
pub enum SimEvent {
    RunStarted { profile: VehicleProfile },
    /// The horn sounded at this longitudinal position
    Honk { z: f32, swerved: usize },
    /// Two obstacles crashed into each other
    CrashEffect { position: Position },
    /// An obstacle is close enough ahead to say something
    Speech {
        obstacle: ObstacleId,
        obstacle_type: ObstacleType,
    },
    RunEnded(GameOverReport),
}
