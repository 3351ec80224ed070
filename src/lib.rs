//! Road Rage Library
//!
//! A lane-based endless driving simulation that can run headless or with a
//! Bevy UI.

pub mod autopilot;
pub mod flavor;
pub mod persistence;
pub mod simulation;

#[cfg(feature = "ui")]
pub mod ui;
