//! Roadside scenery recycling
//!
//! Every pool holds a fixed number of elements spread over one span. Elements
//! are wrapped one at a time so the pool always covers a window around the
//! player and memory stays bounded no matter how far the run goes.

use super::config::ROAD_WIDTH;

/// What a pool element represents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SceneryKind {
    LaneMarking,
    EdgeLine,
    Building,
    Pole,
    Skyline,
}

/// Side of the road a pool sits on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoadSide {
    /// Positive `x`
    Left,
    /// Negative `x`
    Right,
    Center,
}

impl RoadSide {
    fn sign(self) -> f32 {
        match self {
            RoadSide::Left => 1.0,
            RoadSide::Right => -1.0,
            RoadSide::Center => 0.0,
        }
    }
}

/// One recyclable decoration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneryElement {
    /// Slot in the pool, stable for the lifetime of the pool
    pub index: usize,
    pub z: f32,
}

/// A fixed-size pool of identical decorations
#[derive(Debug, Clone)]
pub struct SceneryPool {
    pub kind: SceneryKind,
    pub side: RoadSide,
    /// Lateral coordinate shared by every element
    pub lateral_x: f32,
    pub spacing: f32,
    /// How far behind the player an element may trail before it wraps
    pub margin: f32,
    pub elements: Vec<SceneryElement>,
}

impl SceneryPool {
    /// Lay out `count` elements from `start_z`; right-side pools are staggered
    /// by half a spacing
    pub fn new(
        kind: SceneryKind,
        side: RoadSide,
        lateral_distance: f32,
        count: usize,
        spacing: f32,
        margin: f32,
        start_z: f32,
    ) -> Self {
        let stagger = if side == RoadSide::Right {
            spacing * 0.5
        } else {
            0.0
        };
        let elements = (0..count)
            .map(|index| SceneryElement {
                index,
                z: start_z + index as f32 * spacing + stagger,
            })
            .collect();
        Self {
            kind,
            side,
            lateral_x: side.sign() * lateral_distance,
            spacing,
            margin,
            elements,
        }
    }

    pub fn span(&self) -> f32 {
        self.elements.len() as f32 * self.spacing
    }

    /// Wrap elements so each offset from the player lies in `[-margin, span - margin)`
    pub fn recycle(&mut self, player_z: f32) {
        let span = self.span();
        if span <= 0.0 || !player_z.is_finite() {
            return;
        }
        let margin = self.margin;
        for element in &mut self.elements {
            // Teleports after a long jump would otherwise loop for a long time
            let offset = element.z - player_z;
            if offset < -margin - span || offset >= 2.0 * span - margin {
                let wraps = ((offset + margin) / span).floor();
                element.z -= wraps * span;
            }
            while element.z - player_z >= span - margin {
                element.z -= span;
            }
            while element.z - player_z < -margin {
                element.z += span;
            }
        }
    }

    /// Whether every element sits inside the visible window
    pub fn in_window(&self, player_z: f32) -> bool {
        let span = self.span();
        self.elements.iter().all(|e| {
            let offset = e.z - player_z;
            offset >= -self.margin && offset < span - self.margin
        })
    }
}

/// All scenery pools of the road
#[derive(Debug, Clone)]
pub struct SimScenery {
    pub pools: Vec<SceneryPool>,
}

impl Default for SimScenery {
    fn default() -> Self {
        Self::new()
    }
}

impl SimScenery {
    pub fn new() -> Self {
        let half_width = ROAD_WIDTH / 2.0;
        let mut pools = vec![SceneryPool::new(
            SceneryKind::LaneMarking,
            RoadSide::Center,
            0.0,
            60,
            4.0,
            30.0,
            -30.0,
        )];

        for side in [RoadSide::Left, RoadSide::Right] {
            let edge_start = if side == RoadSide::Right {
                // Edge lines line up on both sides
                -30.0 - 4.0
            } else {
                -30.0
            };
            pools.push(SceneryPool::new(
                SceneryKind::EdgeLine,
                side,
                half_width - 0.06,
                30,
                8.0,
                30.0,
                edge_start,
            ));
            pools.push(SceneryPool::new(
                SceneryKind::Building,
                side,
                half_width + 2.25,
                46,
                3.4,
                20.0,
                -15.0,
            ));
            pools.push(SceneryPool::new(
                SceneryKind::Pole,
                side,
                half_width + 0.5,
                12,
                28.0,
                20.0,
                -15.0,
            ));
            pools.push(SceneryPool::new(
                SceneryKind::Skyline,
                side,
                half_width + 9.0,
                18,
                14.0,
                20.0,
                -15.0,
            ));
        }

        // The last building panel starts past the window; wrap it in place
        let mut scenery = Self { pools };
        scenery.update(0.0);
        scenery
    }

    /// Recycle every pool around the player
    pub fn update(&mut self, player_z: f32) {
        for pool in &mut self.pools {
            pool.recycle(player_z);
        }
    }

    /// Total number of elements across all pools
    pub fn element_count(&self) -> usize {
        self.pools.iter().map(|p| p.elements.len()).sum()
    }

    pub fn pools_of(&self, kind: SceneryKind) -> impl Iterator<Item = &SceneryPool> {
        self.pools.iter().filter(move |p| p.kind == kind)
    }
}
