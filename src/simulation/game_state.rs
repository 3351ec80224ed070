//! Run state tracking for the driving game
//!
//! This module tracks which screen the game is on, how the runs went, and
//! the best distance ever driven.

use super::events::GameOverReport;
use super::types::ObstacleType;

/// Which screen the game is on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunState {
    /// Title screen with drifting background traffic
    #[default]
    Menu,
    /// A run is in progress
    Playing,
    /// The last run ended; the world is frozen until restart or menu
    GameOver,
}

/// Game state that tracks runs and the best distance
#[derive(Debug, Clone)]
pub struct GameState {
    pub state: RunState,

    /// Longest distance ever driven
    pub best_distance: f32,

    /// Runs started since the world was created
    pub runs_started: usize,

    /// Runs that ended in a crash
    pub runs_finished: usize,

    /// Seconds spent in the current run
    pub run_time: f32,

    /// Report of the most recent crash
    pub last_report: Option<GameOverReport>,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(0.0)
    }
}

impl GameState {
    /// Create a game state on the menu with a previously stored best distance
    pub fn new(best_distance: f32) -> Self {
        Self {
            state: RunState::Menu,
            best_distance: best_distance.max(0.0),
            runs_started: 0,
            runs_finished: 0,
            run_time: 0.0,
            last_report: None,
        }
    }

    pub fn is_playing(&self) -> bool {
        self.state == RunState::Playing
    }

    /// Enter the playing state
    pub fn begin_run(&mut self) {
        self.state = RunState::Playing;
        self.runs_started += 1;
        self.run_time = 0.0;
        self.last_report = None;
    }

    /// End the current run and record a new best if it was beaten
    pub fn end_run(&mut self, obstacle_type: ObstacleType, distance: f32) -> GameOverReport {
        let report = GameOverReport::new(obstacle_type, distance, self.best_distance);
        self.best_distance = report.best_distance;
        self.state = RunState::GameOver;
        self.runs_finished += 1;
        self.last_report = Some(report);
        report
    }

    pub fn enter_menu(&mut self) {
        self.state = RunState::Menu;
        self.run_time = 0.0;
    }

    /// Advance the run clock
    pub fn update(&mut self, delta_secs: f32) {
        if self.is_playing() {
            self.run_time += delta_secs;
        }
    }

    /// Get a summary string for display
    pub fn summary(&self) -> String {
        format!(
            "State: {:?} | Runs: {} | Crashes: {} | Best: {:.0}m",
            self.state, self.runs_started, self.runs_finished, self.best_distance
        )
    }
}
