//! Random number sources for spawning and obstacle AI
//!
//! Every probability draw in the simulation goes through [`RandomSource`] so
//! tests can script the exact sequence of values.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// A source of uniform samples in `[0, 1)`
pub trait RandomSource: Send + Sync {
    /// Next uniform sample in `[0, 1)`
    fn next_unit(&mut self) -> f32;

    /// Returns true with probability `p`
    fn chance(&mut self, p: f32) -> bool {
        self.next_unit() < p
    }

    /// Uniform sample in `[min, max)`
    fn range(&mut self, min: f32, max: f32) -> f32 {
        min + self.next_unit() * (max - min)
    }

    /// Uniform index in `0..len`; `len` must be non-zero
    fn index(&mut self, len: usize) -> usize {
        ((self.next_unit() * len as f32) as usize).min(len.saturating_sub(1))
    }
}

/// Choose a random element from a slice
pub fn choose<'a, T>(rng: &mut dyn RandomSource, items: &'a [T]) -> Option<&'a T> {
    if items.is_empty() {
        return None;
    }
    items.get(rng.index(items.len()))
}

impl RandomSource for StdRng {
    fn next_unit(&mut self) -> f32 {
        self.random::<f32>()
    }
}

/// Unseeded randomness, seeded once from the thread-local generator
pub fn thread_source() -> Box<dyn RandomSource> {
    Box::new(StdRng::from_rng(&mut rand::rng()))
}

/// Reproducible randomness from a seed
pub fn seeded_source(seed: u64) -> Box<dyn RandomSource> {
    Box::new(StdRng::seed_from_u64(seed))
}

/// Replays a fixed list of samples, cycling back to the start when exhausted
#[derive(Debug, Clone)]
pub struct ScriptedRandom {
    values: Vec<f32>,
    cursor: usize,
}

impl ScriptedRandom {
    pub fn new(values: Vec<f32>) -> Self {
        let values = if values.is_empty() { vec![0.5] } else { values };
        Self { values, cursor: 0 }
    }

    /// Always returns the same sample
    pub fn constant(value: f32) -> Self {
        Self::new(vec![value])
    }
}

impl RandomSource for ScriptedRandom {
    fn next_unit(&mut self) -> f32 {
        let value = self.values[self.cursor % self.values.len()];
        self.cursor = (self.cursor + 1) % self.values.len();
        value.clamp(0.0, 0.999_999)
    }
}
