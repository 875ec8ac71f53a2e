//! Injectable randomness for generation and play.
//! Every random decision goes through `RandomSource` so tests can pin outcomes.

use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::{Rng, SeedableRng};

pub trait RandomSource {
    /// Returns a value in `0..bound`. `bound` must be at least 1.
    fn next_below(&mut self, bound: usize) -> usize;
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn next_below(&mut self, bound: usize) -> usize {
        (**self).next_below(bound)
    }
}

impl<R: RandomSource + ?Sized> RandomSource for Box<R> {
    fn next_below(&mut self, bound: usize) -> usize {
        (**self).next_below(bound)
    }
}

/// Inclusive roll in `min..=max`.
pub fn roll_inclusive(random: &mut dyn RandomSource, min: usize, max: usize) -> usize {
    debug_assert!(min <= max);
    min + random.next_below(max - min + 1)
}

/// Removes and returns a uniformly chosen element, keeping the order of the rest.
pub fn take_random<T>(random: &mut dyn RandomSource, pool: &mut Vec<T>) -> Option<T> {
    if pool.is_empty() {
        return None;
    }
    let index = random.next_below(pool.len());
    Some(pool.remove(index))
}

#[derive(Clone, Debug)]
pub struct SeededRandom {
    rng: ChaCha8Rng,
    seed: u64,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self { rng: ChaCha8Rng::seed_from_u64(seed), seed }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl RandomSource for SeededRandom {
    fn next_below(&mut self, bound: usize) -> usize {
        debug_assert!(bound > 0);
        (self.rng.next_u64() % bound.max(1) as u64) as usize
    }
}

/// Always yields the same value, clamped into range.
#[derive(Clone, Copy, Debug, Default)]
pub struct FixedRandom(pub usize);

impl RandomSource for FixedRandom {
    fn next_below(&mut self, bound: usize) -> usize {
        self.0.min(bound.saturating_sub(1))
    }
}

/// Cycles through a fixed script of values, each clamped into range.
#[derive(Clone, Debug)]
pub struct ScriptedRandom {
    script: Vec<usize>,
    cursor: usize,
}

impl ScriptedRandom {
    pub fn new(script: Vec<usize>) -> Self {
        Self { script, cursor: 0 }
    }
}

impl RandomSource for ScriptedRandom {
    fn next_below(&mut self, bound: usize) -> usize {
        if self.script.is_empty() {
            return 0;
        }
        let value = self.script[self.cursor % self.script.len()];
        self.cursor += 1;
        value.min(bound.saturating_sub(1))
    }
}
