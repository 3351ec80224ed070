//! Flavor text shown around the simulation
//!
//! Nothing in here affects gameplay; the presentation layer and the headless
//! runner use it to dress up events.

use crate::simulation::{choose, CrashCause, ObstacleType, RandomSource};

const POTHOLE_LINES: &[&str] = &[
    "That pothole has been there since 2019!",
    "Your suspension: 'I resign.'",
    "That's not a pothole, that's a swimming pool!",
    "It will be fixed after the monsoon. Of 2035.",
    "That pothole has survived three elections.",
];

const POLICE_LINES: &[&str] = &[
    "No PUC certificate! Rs 10,000 challan!",
    "License expired three years ago, sir!",
    "Where is your helmet? Rs 1,000 fine!",
    "Overspeeding! Speed limit is 30 km/h here!",
    "Sir, you have 47 pending e-challans!",
];

const COW_LINES: &[&str] = &[
    "The cow is sacred. You are not.",
    "Cow 1, You 0",
    "The cow has right of way. Always.",
    "Moo means 'get out of MY lane'",
];

const DOG_LINES: &[&str] = &[
    "Should've honked! Dogs actually move for horns!",
    "Street dogs: zero traffic rules, full confidence.",
    "Man's best friend. Road's worst enemy.",
];

const WRONG_WAY_LINES: &[&str] = &[
    "Head-on collision! Should've honked louder!",
    "They were on the wrong side. Or were you?",
    "One-way is just a suggestion here!",
];

const TRAFFIC_LINES: &[&str] = &[
    "That truck didn't see you... or care!",
    "Horn OK Please, but you didn't please!",
    "The bus stops for no one. Especially not you.",
    "The auto-wallah sends his regards.",
    "You zigged when you should have zagged!",
];

/// Horn texts flashed when the player honks
pub const HONK_TEXTS: &[&str] = &["HONK!", "BEEP BEEP!", "PEE PEE PEE!", "HORN OK!"];

/// Short headline for a crash cause
pub fn crash_headline(cause: CrashCause) -> &'static str {
    match cause {
        CrashCause::Pothole => "You hit a pothole!",
        CrashCause::Police => "Caught by Traffic Police!",
        CrashCause::Cow => "You hit a cow!",
        CrashCause::Dog => "You hit a street dog!",
        CrashCause::WrongWay => "Head-on collision!",
        CrashCause::Traffic => "Traffic collision!",
    }
}

fn crash_lines(cause: CrashCause) -> &'static [&'static str] {
    match cause {
        CrashCause::Pothole => POTHOLE_LINES,
        CrashCause::Police => POLICE_LINES,
        CrashCause::Cow => COW_LINES,
        CrashCause::Dog => DOG_LINES,
        CrashCause::WrongWay => WRONG_WAY_LINES,
        CrashCause::Traffic => TRAFFIC_LINES,
    }
}

/// A random quip for the game over screen
pub fn crash_message(cause: CrashCause, rng: &mut dyn RandomSource) -> &'static str {
    choose(rng, crash_lines(cause))
        .copied()
        .unwrap_or_else(|| crash_headline(cause))
}

/// What an obstacle shouts as the player goes by
pub fn speech_lines(obstacle_type: ObstacleType) -> &'static [&'static str] {
    match obstacle_type {
        ObstacleType::Cow => &["MOOO!", "Moo moo!", "Moo?"],
        ObstacleType::Dog => &["WOOF!", "Bark bark!", "Bhow bhow!"],
        ObstacleType::Police => &["Mind it!", "Challan!", "License dikhaao!", "Slow down!"],
        ObstacleType::Rickshaw => &["PEEP PEEP!", "PEE PEE PEE!", "Move it!"],
        ObstacleType::Car => &["HONK!", "Beep beep!", "Watch it!"],
        ObstacleType::Truck => &["HORN OK PLEASE!", "Out of my way!", "Side do bhai!"],
        ObstacleType::Bus => &["PEEEEP!", "Bus coming!", "Side please!"],
        ObstacleType::WrongWay => &["Wrong side!", "Arre!", "Bachke!"],
        ObstacleType::Pothole | ObstacleType::RoughPatch => &[],
    }
}

pub fn speech_line(obstacle_type: ObstacleType, rng: &mut dyn RandomSource) -> Option<&'static str> {
    choose(rng, speech_lines(obstacle_type)).copied()
}

/// Whole metres below a kilometre, one decimal of kilometres above
pub fn format_distance(distance: f32) -> String {
    let metres = distance.max(0.0).floor() as u64;
    if metres >= 1000 {
        format!("{:.1} km", metres as f32 / 1000.0)
    } else {
        format!("{} m", metres)
    }
}
