use anyhow::{ensure, Result};
use clap::{Parser, ValueEnum};
use log::{debug, info};

use road_rage::autopilot::Autopilot;
use road_rage::flavor::{crash_headline, crash_message, format_distance, speech_line};
use road_rage::persistence::FileStore;
use road_rage::simulation::{
    seeded_source, thread_source, InputSnapshot, RunState, SimEvent, SimWorld, VehicleProfile,
};

/// Who holds the controls in headless mode
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Driver {
    /// Steer, brake and honk around traffic
    Autopilot,
    /// No input at all: hold the right lane at cruise speed
    Cruise,
}

#[derive(Parser)]
#[command(name = "road_rage")]
#[command(about = "Lane-based endless driving game with optional UI")]
struct Cli {
    /// Run with the Bevy game engine UI
    #[arg(long)]
    ui: bool,

    /// Number of runs to drive in headless mode
    #[arg(long, default_value = "3")]
    runs: u32,

    /// Maximum ticks per run in headless mode
    #[arg(long, default_value = "3600")]
    ticks: u32,

    /// Time delta per tick in seconds
    #[arg(long, default_value = "0.016666668")]
    delta: f32,

    /// Vehicle to drive: "auto" or "scooty"
    #[arg(long, default_value = "auto")]
    vehicle: String,

    /// Driver for headless runs
    #[arg(long, value_enum, default_value = "autopilot")]
    driver: Driver,

    /// Seed for reproducible runs
    #[arg(long)]
    seed: Option<u64>,

    /// File holding the best distance
    #[arg(long)]
    best_file: Option<std::path::PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut world = match cli.seed {
        Some(seed) => SimWorld::new_with_seed(seed),
        None => SimWorld::new(),
    };

    if cli.ui {
        #[cfg(feature = "ui")]
        {
            if let Some(path) = &cli.best_file {
                world = world.with_store(Box::new(FileStore::new(path)));
            }
            run_with_ui(world);
        }
        #[cfg(not(feature = "ui"))]
        {
            eprintln!("Error: UI feature is not enabled. Rebuild with --features ui");
            std::process::exit(1);
        }
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
            .init();
        if let Some(path) = &cli.best_file {
            world = world.with_store(Box::new(FileStore::new(path)));
        }
        run_headless(&cli, world)?;
    }

    Ok(())
}

/// Drive runs with the autopilot (no graphics)
fn run_headless(cli: &Cli, mut world: SimWorld) -> Result<()> {
    ensure!(
        cli.delta.is_finite() && cli.delta > 0.0,
        "--delta must be a positive number of seconds, got {}",
        cli.delta
    );
    ensure!(cli.runs > 0, "--runs must be at least 1");

    let profile = VehicleProfile::from_name(&cli.vehicle);
    let autopilot = Autopilot::default();
    let mut flavor_rng = match cli.seed {
        Some(seed) => seeded_source(seed.wrapping_add(1)),
        None => thread_source(),
    };

    info!("Running Road Rage in headless mode...");
    info!(
        "Vehicle: {}, Driver: {:?}, Runs: {}, Ticks per run: {}, Delta: {}s",
        profile.name(),
        cli.driver,
        cli.runs,
        cli.ticks,
        cli.delta
    );
    info!("Starting best distance: {}", format_distance(world.best_distance()));

    for run in 1..=cli.runs {
        world.start_run(profile);
        let mut ticks_run = 0;
        let mut final_distance = 0.0;
        let mut crash = None;

        while ticks_run < cli.ticks && world.state() == RunState::Playing {
            let input = match cli.driver {
                Driver::Autopilot => world
                    .player
                    .as_ref()
                    .map(|player| autopilot.decide(player, &world.obstacles))
                    .unwrap_or_default(),
                Driver::Cruise => InputSnapshot::default(),
            };
            final_distance = world.distance();
            world.tick(cli.delta, &input);
            ticks_run += 1;

            for event in world.drain_events() {
                match event {
                    SimEvent::Honk { z, swerved } => {
                        debug!("Honk at z={:.1}, {} vehicles swerved", z, swerved)
                    }
                    SimEvent::Speech { obstacle_type, .. } => {
                        if let Some(line) = speech_line(obstacle_type, flavor_rng.as_mut()) {
                            debug!("{}: {}", obstacle_type.name(), line);
                        }
                    }
                    SimEvent::CrashEffect { position } => {
                        debug!("Crash between other vehicles at z={:.1}", position.z)
                    }
                    SimEvent::RunEnded(report) => {
                        final_distance = report.final_distance;
                        crash = Some(report);
                    }
                    SimEvent::RunStarted { .. } => {}
                }
            }
            if world.state() == RunState::Playing {
                final_distance = world.distance();
            }
        }

        info!("=== RUN {} COMPLETE ===", run);
        info!("Ticks: {}", ticks_run);
        info!("Distance: {}", format_distance(final_distance));
        match crash {
            Some(report) => {
                info!("Crash: {}", crash_headline(report.cause));
                info!("\"{}\"", crash_message(report.cause, flavor_rng.as_mut()));
                if report.is_new_best {
                    info!("New best!");
                }
            }
            None => info!("Crash: none, tick limit reached"),
        }
        info!("Best distance: {}", format_distance(world.best_distance()));
    }

    world.log_summary();
    info!("=== SIMULATION COMPLETE ===");
    Ok(())
}

#[cfg(feature = "ui")]
fn run_with_ui(world: SimWorld) {
    use bevy::log::LogPlugin;
    use bevy::prelude::*;

    println!("Starting Road Rage UI...");
    println!();
    println!("Controls:");
    println!("  1 / 2          - Start with the auto / the scooty");
    println!("  Up / W         - Accelerate");
    println!("  Down / S       - Brake");
    println!("  Left / A       - Left lane");
    println!("  Right / D      - Right lane");
    println!("  Space          - Honk");
    println!("  R              - Restart");
    println!("  M              - Back to menu");
    println!("  ESC            - Exit");
    println!();

    App::new()
        .add_plugins(
            DefaultPlugins
                .set(LogPlugin {
                    filter: "warn,road_rage=debug".to_string(),
                    level: bevy::log::Level::DEBUG,
                    ..default()
                })
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: "Road Rage".into(),
                        resolution: (1280, 720).into(),
                        ..default()
                    }),
                    ..default()
                }),
        )
        .insert_resource(road_rage::ui::SimWorldResource(world))
        .add_plugins(road_rage::ui::RoadRageUIPlugin)
        .run();
}
