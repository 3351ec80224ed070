//! Core types for the driving simulation
//!
//! These are standalone types that don't depend on Bevy.
//!
//! Axis convention: `x` is the lateral axis (positive towards the driver's
//! left when looking down the road), `z` is the longitudinal axis (positive is
//! forward) and `y` is up.

use log::warn;

/// A unique identifier for obstacles in the registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObstacleId(pub usize);

/// One of the two lanes of the road
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Lane {
    /// Lane 0, at negative `x`
    #[default]
    Right,
    /// Lane 1, at positive `x`
    Left,
}

impl Lane {
    pub fn index(self) -> usize {
        match self {
            Lane::Right => 0,
            Lane::Left => 1,
        }
    }

    pub fn from_index(index: usize) -> Self {
        if index == 0 {
            Lane::Right
        } else {
            Lane::Left
        }
    }

    pub fn other(self) -> Self {
        match self {
            Lane::Right => Lane::Left,
            Lane::Left => Lane::Right,
        }
    }

    /// Fixed lateral offset of the lane centre
    pub fn offset(self) -> f32 {
        match self {
            Lane::Right => super::config::LANE_RIGHT_X,
            Lane::Left => super::config::LANE_LEFT_X,
        }
    }

    /// The lane whose centre is closest to a lateral coordinate
    pub fn nearest(x: f32) -> Self {
        if (x - Lane::Right.offset()).abs() < (x - Lane::Left.offset()).abs() {
            Lane::Right
        } else {
            Lane::Left
        }
    }
}

/// A 3D position in the simulation
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Position {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Position {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn midpoint(&self, other: &Position) -> Position {
        Position {
            x: (self.x + other.x) * 0.5,
            y: (self.y + other.y) * 0.5,
            z: (self.z + other.z) * 0.5,
        }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

/// Collision footprint in the ground plane
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hitbox {
    /// Extent along `x`
    pub width: f32,
    /// Extent along `z`
    pub length: f32,
}

impl Hitbox {
    pub const fn new(width: f32, length: f32) -> Self {
        Self { width, length }
    }
}

/// The vehicle the player drives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum VehicleProfile {
    /// Light scooter: slow to accelerate, high top speed, very quick lane switches
    Scooter,
    /// Heavy auto-rickshaw: punchy acceleration, low top speed
    #[default]
    AutoRickshaw,
}

impl VehicleProfile {
    /// Resolve a profile by name, falling back to the default profile for
    /// anything unrecognised
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "scooty" | "scooter" | "lightweight" => VehicleProfile::Scooter,
            "auto" | "rickshaw" | "autorickshaw" | "auto-rickshaw" | "heavy" => {
                VehicleProfile::AutoRickshaw
            }
            other => {
                warn!(
                    "Unknown vehicle profile '{}', falling back to {}",
                    other,
                    VehicleProfile::default().name()
                );
                VehicleProfile::default()
            }
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            VehicleProfile::Scooter => "scooty",
            VehicleProfile::AutoRickshaw => "auto",
        }
    }
}

/// Every kind of obstacle that can appear on the road
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObstacleType {
    Pothole,
    RoughPatch,
    Cow,
    Dog,
    Police,
    Car,
    Truck,
    Bus,
    Rickshaw,
    WrongWay,
}

/// Broad movement class of an obstacle type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObstacleClass {
    /// Road surface defects, never move
    StaticHazard,
    /// Animals and police, zero speed (dogs cross laterally)
    StaticActor,
    /// Same-direction traffic, non-negative speed
    MobileTraffic,
    /// Wrong-way traffic, strictly negative speed
    Oncoming,
}

impl ObstacleType {
    pub const ALL: [ObstacleType; 10] = [
        ObstacleType::Pothole,
        ObstacleType::RoughPatch,
        ObstacleType::Cow,
        ObstacleType::Dog,
        ObstacleType::Police,
        ObstacleType::Car,
        ObstacleType::Truck,
        ObstacleType::Bus,
        ObstacleType::Rickshaw,
        ObstacleType::WrongWay,
    ];

    pub fn class(self) -> ObstacleClass {
        match self {
            ObstacleType::Pothole | ObstacleType::RoughPatch => ObstacleClass::StaticHazard,
            ObstacleType::Cow | ObstacleType::Dog | ObstacleType::Police => {
                ObstacleClass::StaticActor
            }
            ObstacleType::Car | ObstacleType::Truck | ObstacleType::Bus | ObstacleType::Rickshaw => {
                ObstacleClass::MobileTraffic
            }
            ObstacleType::WrongWay => ObstacleClass::Oncoming,
        }
    }

    /// Whether hitting this obstacle ends the run
    pub fn is_blocking(self) -> bool {
        !self.is_surface()
    }

    /// Surface types are driven over: they shake the vehicle but never collide
    pub fn is_surface(self) -> bool {
        matches!(self, ObstacleType::RoughPatch)
    }

    /// Whether this obstacle says something when the player drives past
    pub fn has_speech(self) -> bool {
        !matches!(self, ObstacleType::Pothole | ObstacleType::RoughPatch)
    }

    pub fn name(self) -> &'static str {
        match self {
            ObstacleType::Pothole => "pothole",
            ObstacleType::RoughPatch => "roughpatch",
            ObstacleType::Cow => "cow",
            ObstacleType::Dog => "dog",
            ObstacleType::Police => "police",
            ObstacleType::Car => "car",
            ObstacleType::Truck => "truck",
            ObstacleType::Bus => "bus",
            ObstacleType::Rickshaw => "auto",
            ObstacleType::WrongWay => "wrongway",
        }
    }
}

/// Reason a run ended, used by the presentation layer to pick flavor text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CrashCause {
    Pothole,
    Police,
    Cow,
    Dog,
    WrongWay,
    /// Fallback for ordinary traffic and anything without a dedicated message
    Traffic,
}

impl From<ObstacleType> for CrashCause {
    fn from(obstacle_type: ObstacleType) -> Self {
        match obstacle_type {
            ObstacleType::Pothole => CrashCause::Pothole,
            ObstacleType::Police => CrashCause::Police,
            ObstacleType::Cow => CrashCause::Cow,
            ObstacleType::Dog => CrashCause::Dog,
            ObstacleType::WrongWay => CrashCause::WrongWay,
            _ => CrashCause::Traffic,
        }
    }
}
