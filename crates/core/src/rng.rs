//! Injectable randomness shared by map generation, enemy movement, enemy spawning and
//! combat. Nothing in the core reaches for a global generator.

use std::collections::VecDeque;

use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::{Rng, SeedableRng};

pub trait RandomSource {
    /// Uniform value in `0..bound`. A zero bound yields 0.
    fn below(&mut self, bound: u32) -> u32;

    /// Uniform value in `min..=max`.
    fn in_range(&mut self, min: u32, max: u32) -> u32 {
        debug_assert!(min <= max);
        min + self.below(max - min + 1)
    }

    fn coin(&mut self) -> bool {
        self.below(2) == 1
    }

    /// One six-sided die.
    fn roll_die(&mut self) -> u8 {
        self.below(6) as u8 + 1
    }
}

/// Seeded production generator.
#[derive(Clone, Debug)]
pub struct GameRng {
    rng: ChaCha8Rng,
    seed: u64,
}

impl GameRng {
    pub fn new(seed: u64) -> Self {
        Self { rng: ChaCha8Rng::seed_from_u64(seed), seed }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl RandomSource for GameRng {
    fn below(&mut self, bound: u32) -> u32 {
        if bound == 0 {
            return 0;
        }
        (self.rng.next_u64() % u64::from(bound)) as u32
    }
}

/// Replays a fixed script of draws, for tests that need exact outcomes.
///
/// Each call to `below` consumes one scripted value, reduced modulo the bound. Once the
/// script runs out every draw returns 0. Anything that loops until a draw succeeds must
/// bound its attempts, since a run of zeros never changes.
#[derive(Clone, Debug, Default)]
pub struct ScriptedRng {
    values: VecDeque<u32>,
    consumed: usize,
}

impl ScriptedRng {
    pub fn new(values: impl IntoIterator<Item = u32>) -> Self {
        Self { values: values.into_iter().collect(), consumed: 0 }
    }

    /// Scripts die faces (1..=6) directly.
    pub fn dice(faces: impl IntoIterator<Item = u8>) -> Self {
        Self::new(faces.into_iter().map(|face| u32::from(face.saturating_sub(1))))
    }

    pub fn push(&mut self, value: u32) {
        self.values.push_back(value);
    }

    pub fn remaining(&self) -> usize {
        self.values.len()
    }

    pub fn consumed(&self) -> usize {
        self.consumed
    }
}

impl RandomSource for ScriptedRng {
    fn below(&mut self, bound: u32) -> u32 {
        let Some(value) = self.values.pop_front() else {
            return 0;
        };
        self.consumed += 1;
        if bound == 0 { 0 } else { value % bound }
    }
}
