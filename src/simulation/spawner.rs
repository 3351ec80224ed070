//! Procedural obstacle spawning
//!
//! The spawner decides *what* to place and *where*; the world turns its
//! [`SpawnRequest`]s into live obstacles.

use super::config::{SimConfig, SpawnTable, INITIAL_SPAWN_Z};
use super::random::{choose, RandomSource};
use super::types::{Lane, ObstacleType};

/// Where a spawn request came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpawnOrigin {
    /// Placed on the numbered row of the row cursor
    Row(u64),
    /// Background actor topped up against the floor count
    Ambient,
    /// Sudden crossing actor close ahead of the player
    Crossing,
}

/// A request to place one obstacle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnRequest {
    pub obstacle_type: ObstacleType,
    pub lane: Lane,
    pub z: f32,
    pub origin: SpawnOrigin,
}

/// Row cursor and spawn planning
#[derive(Debug, Clone)]
pub struct SimSpawner {
    /// Longitudinal coordinate of the next row
    pub next_spawn_z: f32,
    /// Rows placed since the last reset
    pub rows_placed: u64,
}

impl Default for SimSpawner {
    fn default() -> Self {
        Self::new()
    }
}

fn random_lane(rng: &mut dyn RandomSource) -> Lane {
    if rng.chance(0.5) {
        Lane::Left
    } else {
        Lane::Right
    }
}

impl SimSpawner {
    pub fn new() -> Self {
        Self {
            next_spawn_z: INITIAL_SPAWN_Z,
            rows_placed: 0,
        }
    }

    /// Move the row cursor, e.g. when a run starts
    pub fn reset(&mut self, z: f32) {
        self.next_spawn_z = z;
        self.rows_placed = 0;
    }

    /// Distance to the next row; shrinks as the run gets longer
    pub fn spawn_gap(distance: f32, rng: &mut dyn RandomSource) -> f32 {
        let density = 1.0 + distance / 400.0;
        (14.0 / density).max(4.0) + rng.next_unit() * (6.0 / density).max(2.0)
    }

    /// Weighted draw for a row's first obstacle
    ///
    /// Returns the obstacle type and whether the row may get a second obstacle
    pub fn draw_row_type(
        table: &SpawnTable,
        distance: f32,
        rng: &mut dyn RandomSource,
    ) -> (ObstacleType, bool) {
        let roll = rng.next_unit();
        let difficulty = (distance / table.difficulty_distance).min(1.0);

        let mut cumulative = 0.0;
        for entry in &table.fixed {
            cumulative += entry.weight;
            if roll < cumulative {
                return (entry.obstacle_type, entry.allows_pair);
            }
        }
        for entry in &table.ramped {
            cumulative += entry.weight_at(distance, difficulty);
            if roll < cumulative {
                return (entry.obstacle_type, true);
            }
        }

        let fill = choose(rng, &table.fill)
            .copied()
            .unwrap_or(ObstacleType::Rickshaw);
        (fill, true)
    }

    /// Plan every obstacle that should appear this tick
    ///
    /// # Arguments
    /// * `player_z` - The player's longitudinal position
    /// * `distance` - Distance driven this run, used as the difficulty proxy
    /// * `ambient_count` - Live background actors (cows)
    /// * `config` - Spawn tunables
    /// * `rng` - Random source for every draw
    pub fn plan(
        &mut self,
        player_z: f32,
        distance: f32,
        ambient_count: usize,
        config: &SimConfig,
        rng: &mut dyn RandomSource,
    ) -> Vec<SpawnRequest> {
        let mut requests = Vec::new();

        // Background cows are placed far enough ahead not to surprise
        for _ in ambient_count..config.ambient_floor {
            let lane = random_lane(rng);
            let z = player_z + rng.range(60.0, 180.0);
            requests.push(SpawnRequest {
                obstacle_type: ObstacleType::Cow,
                lane,
                z,
                origin: SpawnOrigin::Ambient,
            });
        }

        if rng.chance(config.crossing_probability) {
            let lane = random_lane(rng);
            let z = player_z + rng.range(10.0, 25.0);
            requests.push(SpawnRequest {
                obstacle_type: ObstacleType::Dog,
                lane,
                z,
                origin: SpawnOrigin::Crossing,
            });
        }

        while self.next_spawn_z < player_z + config.spawn_ahead {
            let row = self.rows_placed;
            let row_z = self.next_spawn_z;
            let (first, allows_pair) = Self::draw_row_type(&config.spawn_table, distance, rng);
            let lane = random_lane(rng);

            requests.push(SpawnRequest {
                obstacle_type: first,
                lane,
                z: row_z,
                origin: SpawnOrigin::Row(row),
            });

            if allows_pair && rng.chance(config.pair_probability) {
                // A blocking first obstacle always leaves the other lane passable
                let second = if first.is_blocking() || rng.chance(0.5) {
                    ObstacleType::RoughPatch
                } else {
                    choose(rng, &config.spawn_table.pair_traffic)
                        .copied()
                        .unwrap_or(ObstacleType::RoughPatch)
                };
                requests.push(SpawnRequest {
                    obstacle_type: second,
                    lane: lane.other(),
                    z: row_z + rng.range(-1.5, 1.5),
                    origin: SpawnOrigin::Row(row),
                });
            }

            self.next_spawn_z += Self::spawn_gap(distance, rng);
            self.rows_placed += 1;
        }

        requests
    }
}
