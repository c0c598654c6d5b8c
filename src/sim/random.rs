//! Random draws for scare timing, confirmation rolls and hiding spots
//!
//! Gameplay uses a seeded PCG stream; tests pin draws with [`FixedDice`] or
//! [`SequenceDice`].

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

/// Source of uniform values in `[0, 1)`
pub trait RandomSource {
    fn unit(&mut self) -> f64;

    /// Uniform index in `0..len`. `len` must be non-zero.
    fn index(&mut self, len: usize) -> usize {
        let i = (self.unit() * len as f64).floor() as usize;
        i.min(len.saturating_sub(1))
    }
}

impl RandomSource for Pcg32 {
    fn unit(&mut self) -> f64 {
        self.random::<f64>()
    }
}

/// Seeded PCG generator
pub fn seeded(seed: u64) -> Pcg32 {
    Pcg32::seed_from_u64(seed)
}

/// Returns the same value on every draw
#[derive(Debug, Clone, Copy)]
pub struct FixedDice(pub f64);

impl RandomSource for FixedDice {
    fn unit(&mut self) -> f64 {
        self.0
    }
}

/// Cycles through a fixed list of values
#[derive(Debug, Clone)]
pub struct SequenceDice {
    values: Vec<f64>,
    cursor: usize,
}

impl SequenceDice {
    pub fn new(values: Vec<f64>) -> Self {
        assert!(!values.is_empty(), "SequenceDice needs at least one value");
        Self { values, cursor: 0 }
    }
}

impl RandomSource for SequenceDice {
    fn unit(&mut self) -> f64 {
        let v = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        v
    }
}
