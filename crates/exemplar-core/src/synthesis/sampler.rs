//! Seeded numeric sampling
//!
//! Numbers in synthesized examples come from a [`Sampler`]. The default
//! [`SeededSampler`] starts from [`DEFAULT_SEED`], so running the tool twice
//! over the same document produces identical examples.
//!
//! Copyright (c) 2025 Exemplar Team
//! Licensed under the Apache-2.0 license

use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};

/// Seed used by [`SeededSampler::new`]
pub const DEFAULT_SEED: u64 = 632_808_617;

/// Source of bounded example numbers
pub trait Sampler {
    /// Draw a value for the optional `[min, max)` bounds
    fn sample(&mut self, min: Option<f64>, max: Option<f64>) -> f64;
}

/// Map a unit draw in `[0, 1)` onto the bounds.
///
/// `min > max` is not rejected: the range goes negative and the result lands
/// in `(max, min]`.
pub fn scale_unit(unit: f64, min: Option<f64>, max: Option<f64>) -> f64 {
    match (min, max) {
        (Some(min), Some(max)) => unit * (max - min) + min,
        (Some(min), None) => unit + min,
        (None, Some(max)) => unit * max,
        (None, None) => unit * 10.0,
    }
}

/// Sampler backed by a seeded random number generator
#[derive(Debug, Clone)]
pub struct SeededSampler<R = StdRng> {
    rng: R,
}

impl SeededSampler<StdRng> {
    /// Sampler seeded with [`DEFAULT_SEED`]
    pub fn new() -> Self {
        Self::with_seed(DEFAULT_SEED)
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for SeededSampler<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: RngCore> SeededSampler<R> {
    /// Wrap an arbitrary generator
    pub fn from_rng(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: RngCore> Sampler for SeededSampler<R> {
    fn sample(&mut self, min: Option<f64>, max: Option<f64>) -> f64 {
        let unit: f64 = self.rng.gen();
        scale_unit(unit, min, max)
    }
}

/// Replays a fixed cycle of unit draws, for tests that need exact numbers
#[derive(Debug, Clone)]
pub struct FixedSampler {
    units: Vec<f64>,
    position: usize,
}

impl FixedSampler {
    /// Cycle through `units`; an empty list always draws `0.0`
    pub fn new(units: Vec<f64>) -> Self {
        Self { units, position: 0 }
    }
}

impl Sampler for FixedSampler {
    fn sample(&mut self, min: Option<f64>, max: Option<f64>) -> f64 {
        let unit = if self.units.is_empty() {
            0.0
        } else {
            let unit = self.units[self.position % self.units.len()];
            self.position += 1;
            unit
        };
        scale_unit(unit, min, max)
    }
}
