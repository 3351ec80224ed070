//! UI components and resources for linking Bevy entities to simulation state

use bevy::prelude::*;
use std::collections::HashMap;

use crate::simulation::{thread_source, InputSnapshot, ObstacleId, RandomSource, SimWorld};

/// Resource wrapper for the simulation world
#[derive(Resource)]
pub struct SimWorldResource(pub SimWorld);

impl Default for SimWorldResource {
    fn default() -> Self {
        Self(SimWorld::new())
    }
}

/// Marker component for the road surface
#[derive(Component)]
pub struct Ground;

/// Marker component for the main camera
#[derive(Component)]
pub struct MainCamera;

/// Marker for the player's vehicle
#[derive(Component)]
pub struct PlayerVisual;

/// Links a Bevy entity to a simulation obstacle
#[derive(Component)]
pub struct ObstacleLink(pub ObstacleId);

/// Links a Bevy entity to one element of a scenery pool
#[derive(Component)]
pub struct SceneryLink {
    pub pool: usize,
    pub index: usize,
}

/// Bevy entity drawn for each live simulation obstacle
#[derive(Resource, Default)]
pub struct EntityMappings {
    pub obstacles: HashMap<ObstacleId, Entity>,
}

/// Driver intents gathered every frame and consumed by the fixed tick
#[derive(Resource, Default)]
pub struct DriverInput {
    pub snapshot: InputSnapshot,
}

/// Short-lived text shown over the road (honks, speech, crashes)
#[derive(Resource, Default)]
pub struct FlashMessage {
    pub text: String,
    pub remaining: f32,
}

impl FlashMessage {
    pub fn show(&mut self, text: impl Into<String>, seconds: f32) {
        self.text = text.into();
        self.remaining = seconds;
    }
}

/// Randomness for flavor text only
#[derive(Resource)]
pub struct FlavorRng(pub Box<dyn RandomSource>);

impl Default for FlavorRng {
    fn default() -> Self {
        Self(thread_source())
    }
}

/// Marker for HUD text elements
#[derive(Component)]
pub enum HudText {
    Distance,
    Speed,
    Best,
    /// Menu prompt, game over summary, or empty while driving
    Status,
    Flash,
}
