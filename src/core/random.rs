// Injectable random provider
//
// Wandering and spawn selection never touch a global generator; the owner
// of the simulation hands one of these in so runs can be seeded or scripted.

use rand::Rng;

/// Source of uniformly distributed integers
pub trait RandomSource {
    /// Random integer in `lo..=hi` (both bounds included)
    fn range_inclusive(&mut self, lo: i32, hi: i32) -> i32;
}

impl<R: Rng + ?Sized> RandomSource for R {
    fn range_inclusive(&mut self, lo: i32, hi: i32) -> i32 {
        if hi <= lo {
            return lo;
        }
        self.gen_range(lo..=hi)
    }
}

/// Replays a fixed list of values, cycling when exhausted.
///
/// Values are clamped into the requested range so a script written for one
/// call site never produces an out-of-range choice at another.
#[derive(Debug, Clone)]
pub struct ScriptedRandom {
    values: Vec<i32>,
    cursor: usize,
}

impl ScriptedRandom {
    pub fn new(values: Vec<i32>) -> Self {
        Self { values, cursor: 0 }
    }

    /// Number of values handed out so far
    pub fn draws(&self) -> usize {
        self.cursor
    }
}

impl RandomSource for ScriptedRandom {
    fn range_inclusive(&mut self, lo: i32, hi: i32) -> i32 {
        if self.values.is_empty() {
            return lo;
        }
        let value = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        value.clamp(lo, hi.max(lo))
    }
}
