//! Overlap queries between the player and obstacles, and between obstacles
//!
//! All tests are axis-aligned boxes in the ground plane (`x`, `z`). Boxes are
//! shrunk by a fairness factor so near misses read as misses.

use ordered_float::OrderedFloat;

use super::config::SimConfig;
use super::obstacle::SimObstacle;
use super::player::SimPlayer;
use super::types::{Hitbox, ObstacleId, Position};

/// An axis-aligned box described by its centre and half extents
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub center_x: f32,
    pub center_z: f32,
    pub half_width: f32,
    pub half_length: f32,
}

impl Aabb {
    /// Box around a centre with the hitbox extents scaled by `scale`
    pub fn new(center_x: f32, center_z: f32, hitbox: Hitbox, scale: f32) -> Self {
        Self {
            center_x,
            center_z,
            half_width: hitbox.width * 0.5 * scale,
            half_length: hitbox.length * 0.5 * scale,
        }
    }

    /// Strict overlap; touching edges do not count
    pub fn overlaps(&self, other: &Aabb) -> bool {
        (self.center_x - other.center_x).abs() < self.half_width + other.half_width
            && (self.center_z - other.center_z).abs() < self.half_length + other.half_length
    }
}

fn player_box(player: &SimPlayer, scale: f32) -> Aabb {
    Aabb::new(player.x, player.z, player.hitbox, scale)
}

fn obstacle_box(obstacle: &SimObstacle, scale: f32) -> Aabb {
    Aabb::new(obstacle.position.x, obstacle.position.z, obstacle.hitbox, scale)
}

/// First obstacle in registry order that the player hits
///
/// Rough patches and obstacles still inside their spawn grace never collide.
pub fn check_player_collision<'a>(
    player: &SimPlayer,
    obstacles: &'a [SimObstacle],
    config: &SimConfig,
) -> Option<&'a SimObstacle> {
    let player_aabb = player_box(player, config.player_fairness);
    obstacles.iter().find(|obstacle| {
        !obstacle.obstacle_type.is_surface()
            && !obstacle.in_grace()
            && player_aabb.overlaps(&obstacle_box(obstacle, config.player_fairness))
    })
}

/// Whether the player is currently driving over a rough surface
pub fn is_on_surface(player: &SimPlayer, obstacles: &[SimObstacle]) -> bool {
    let player_aabb = player_box(player, 1.0);
    obstacles
        .iter()
        .filter(|obstacle| obstacle.obstacle_type.is_surface())
        .any(|obstacle| player_aabb.overlaps(&obstacle_box(obstacle, 1.0)))
}

/// Two obstacles that ran into each other
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NpcCrash {
    pub first: ObstacleId,
    pub second: ObstacleId,
    /// Where the crash effect should appear
    pub midpoint: Position,
}

fn npc_candidate(obstacle: &SimObstacle, player_z: f32, config: &SimConfig) -> bool {
    !obstacle.in_grace()
        && !obstacle.obstacle_type.is_surface()
        && (obstacle.position.z - player_z).abs() <= config.npc_collision_range
}

/// Find obstacle pairs that collided this tick
///
/// Candidates are swept in longitudinal order; once an obstacle has been
/// matched it is not considered again. Ties in position are broken by id so
/// the result only depends on the layout.
pub fn find_npc_collisions(
    obstacles: &[SimObstacle],
    player_z: f32,
    config: &SimConfig,
) -> Vec<NpcCrash> {
    let mut candidates: Vec<&SimObstacle> = obstacles
        .iter()
        .filter(|o| npc_candidate(o, player_z, config))
        .collect();
    if candidates.len() < 2 {
        return Vec::new();
    }

    candidates.sort_by_key(|o| (OrderedFloat(o.position.z), o.id));

    // No pair further apart than this along z can overlap
    let longest = candidates
        .iter()
        .map(|o| OrderedFloat(o.hitbox.length))
        .max()
        .map(|l| l.0)
        .unwrap_or(0.0);
    let reach = 2.0 * longest * config.npc_fairness;

    // Full extents scaled by the fairness factor means half extents at twice that
    let scale = 2.0 * config.npc_fairness;
    let mut matched = vec![false; candidates.len()];
    let mut crashes = Vec::new();

    for i in 0..candidates.len() {
        if matched[i] {
            continue;
        }
        let a = candidates[i];
        let a_box = obstacle_box(a, scale);

        for j in (i + 1)..candidates.len() {
            let b = candidates[j];
            if b.position.z - a.position.z >= reach {
                break;
            }
            if matched[j] || !(a.is_moving() || b.is_moving()) {
                continue;
            }
            if a_box.overlaps(&obstacle_box(b, scale)) {
                matched[i] = true;
                matched[j] = true;
                crashes.push(NpcCrash {
                    first: a.id,
                    second: b.id,
                    midpoint: a.position.midpoint(&b.position),
                });
                break;
            }
        }
    }

    crashes
}
