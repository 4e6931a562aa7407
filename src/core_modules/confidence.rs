// THEORY:
// The confidence score attached to every severity estimate is a placeholder. There
// is no trained classifier behind the estimator, so the value is drawn uniformly from
// [0.5, 0.9] and carries no diagnostic meaning whatsoever. It exists so the report
// shape already matches what a real model would produce.
//
// The draw sits behind the `ConfidenceSource` trait. The estimator is generic over
// it, so a real model can later be plugged in by implementing one method, and tests
// can pin the value with `FixedConfidence` or a seeded `RandomConfidence`.

use crate::core_modules::pixel_grid::PixelGrid;
use crate::core_modules::utils::rounding::round_to;
use rand::rngs::{StdRng, ThreadRng};
use rand::{Rng, SeedableRng};

pub type Confidence = f64;

/// Lower bound of the placeholder confidence range.
pub const MIN_CONFIDENCE: Confidence = 0.5;
/// Upper bound of the placeholder confidence range.
pub const MAX_CONFIDENCE: Confidence = 0.9;
const CONFIDENCE_DECIMALS: i32 = 2;

/// Produces the confidence score for one estimation.
pub trait ConfidenceSource {
    /// Returns a confidence in [`MIN_CONFIDENCE`, `MAX_CONFIDENCE`] for `grid`.
    fn confidence(&mut self, grid: &PixelGrid) -> Confidence;
}

/// Uniform random placeholder confidence, rounded to two decimals.
#[derive(Debug, Clone)]
pub struct RandomConfidence<R: Rng> {
    rng: R,
}

impl RandomConfidence<ThreadRng> {
    /// Draws from the thread-local generator.
    pub fn new() -> Self {
        Self { rng: rand::rng() }
    }
}

impl Default for RandomConfidence<ThreadRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomConfidence<StdRng> {
    /// Reproducible sequence of draws for a given seed.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl<R: Rng> ConfidenceSource for RandomConfidence<R> {
    fn confidence(&mut self, _grid: &PixelGrid) -> Confidence {
        let draw = self.rng.random_range(MIN_CONFIDENCE..=MAX_CONFIDENCE);
        round_to(draw, CONFIDENCE_DECIMALS)
    }
}

/// Always reports the same confidence.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedConfidence(Confidence);

impl FixedConfidence {
    /// Clamps into the valid range and rounds to two decimals.
    pub fn new(value: Confidence) -> Self {
        Self(round_to(
            value.clamp(MIN_CONFIDENCE, MAX_CONFIDENCE),
            CONFIDENCE_DECIMALS,
        ))
    }
}

impl ConfidenceSource for FixedConfidence {
    fn confidence(&mut self, _grid: &PixelGrid) -> Confidence {
        self.0
    }
}
