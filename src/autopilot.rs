//! Heuristic driver used by the headless runner
//!
//! Looks a short time ahead in the current lane, switches lanes when the
//! other one is clearer, and brakes when both are blocked.

use crate::simulation::{InputSnapshot, Lane, SimObstacle, SimPlayer};

/// Tunables for the heuristic driver
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Autopilot {
    /// Seconds of travel to look ahead at the current speed
    pub lookahead_secs: f32,
    /// Minimum look-ahead distance
    pub min_lookahead: f32,
    /// Honk at moving traffic closer than this
    pub honk_range: f32,
    /// Keep accelerating below this fraction of top speed
    pub target_speed_fraction: f32,
}

impl Default for Autopilot {
    fn default() -> Self {
        Self {
            lookahead_secs: 1.6,
            min_lookahead: 18.0,
            honk_range: 20.0,
            target_speed_fraction: 0.75,
        }
    }
}

impl Autopilot {
    /// Gap from the player's front to the nearest blocking obstacle in `lane`
    ///
    /// Obstacles alongside the player count as a gap of zero.
    pub fn gap_in_lane(
        &self,
        player: &SimPlayer,
        obstacles: &[SimObstacle],
        lane: Lane,
        lookahead: f32,
    ) -> Option<f32> {
        let lane_x = lane.offset();
        let front = player.z + player.hitbox.length * 0.5;
        let rear = player.z - player.hitbox.length * 0.5;

        obstacles
            .iter()
            .filter(|o| o.obstacle_type.is_blocking())
            .filter(|o| (o.position.x - lane_x).abs() < (o.hitbox.width + player.hitbox.width) * 0.5)
            .filter_map(|o| {
                let near = o.position.z - o.hitbox.length * 0.5;
                let far = o.position.z + o.hitbox.length * 0.5;
                if far < rear {
                    None
                } else {
                    Some((near - front).max(0.0))
                }
            })
            .filter(|gap| *gap <= lookahead)
            .min_by(|a, b| a.total_cmp(b))
    }

    /// Decide the input for the next tick
    pub fn decide(&self, player: &SimPlayer, obstacles: &[SimObstacle]) -> InputSnapshot {
        let lookahead = (player.speed * self.lookahead_secs).max(self.min_lookahead);
        let lane = player.lane;
        let mut input = InputSnapshot::default();

        match self.gap_in_lane(player, obstacles, lane, lookahead) {
            Some(gap_here) => {
                let other = lane.other();
                let other_clear = match self.gap_in_lane(player, obstacles, other, lookahead) {
                    None => true,
                    Some(gap_other) => gap_other > gap_here + player.hitbox.length * 2.0,
                };
                if other_clear {
                    match other {
                        Lane::Left => input.steer_left = true,
                        Lane::Right => input.steer_right = true,
                    }
                } else {
                    input.brake = true;
                }
            }
            None => {
                input.accelerate = player.speed_fraction() < self.target_speed_fraction;
            }
        }

        input.honk = obstacles.iter().any(|o| {
            let ahead = o.position.z - player.z;
            o.speed > 0.0 && o.lane == lane && ahead > 0.0 && ahead < self.honk_range
        });

        input
    }
}
