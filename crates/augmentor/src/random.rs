//! Seedable uniform number generators.
//!
//! A generator owns its engine and advances it on every draw. It is `Send` but
//! holds mutable state: share an instance across threads only behind external
//! synchronization, or give each thread its own generator with its own seed.

use std::time::{SystemTime, UNIX_EPOCH};

use num_traits::{Bounded, Float};
use rand::{
    distr::{uniform::SampleUniform, Distribution, StandardUniform},
    rngs::StdRng,
    Rng, SeedableRng,
};

use crate::error::AugmentError;

/// A seedable source of uniformly distributed values.
pub trait NumberGenerator {
    /// The kind of value produced.
    type Output;

    /// Draw the next value, advancing the generator state.
    fn draw(&mut self) -> Self::Output;

    /// Draw a nonzero seed for a forked generator.
    ///
    /// Consumes generator state like any other draw.
    fn fork_seed(&mut self) -> u64;
}

/// Resolve a user seed: zero derives a seed from the system clock, any other
/// value is returned unchanged.
pub fn resolve_seed(seed: u64) -> u64 {
    if seed != 0 {
        return seed;
    }

    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(1, |d| d.as_nanos() as u64);
    let seed = nanos.max(1);
    log::debug!("seed 0 requested, using time-derived seed {seed}");
    seed
}

/// Derive a reproducible nonzero seed for an auxiliary stream from a parent seed.
pub fn derive_seed(seed: u64, stream: u64) -> u64 {
    StdRng::seed_from_u64(seed ^ stream.wrapping_mul(0x9e37_79b9_7f4a_7c15))
        .random::<u64>()
        .max(1)
}

/// Uniform generator over a continuous range.
///
/// Draws lie in `[0, 1)` by default, or in an explicit `[lower, upper)`.
#[derive(Debug, Clone)]
pub struct ContinuousGenerator<F> {
    rng: StdRng,
    seed: u64,
    range: Option<(F, F)>,
}

impl<F> ContinuousGenerator<F>
where
    F: Float + SampleUniform + std::fmt::Debug,
    StandardUniform: Distribution<F>,
{
    /// Create a generator over `[0, 1)`. A zero seed is replaced by a time-derived one.
    pub fn new(seed: u64) -> Self {
        let seed = resolve_seed(seed);
        Self {
            rng: StdRng::seed_from_u64(seed),
            seed,
            range: None,
        }
    }

    /// Create a generator over `[lower, upper)`.
    ///
    /// # Errors
    ///
    /// Returns [`AugmentError::DegenerateParameter`] unless `lower < upper` and
    /// both the bounds and the width `upper - lower` are finite.
    pub fn with_range(lower: F, upper: F, seed: u64) -> Result<Self, AugmentError> {
        if !(lower.is_finite() && upper.is_finite() && lower < upper) {
            return Err(AugmentError::DegenerateParameter(format!(
                "continuous range [{lower:?}, {upper:?}) is empty"
            )));
        }
        if !(upper - lower).is_finite() {
            return Err(AugmentError::DegenerateParameter(format!(
                "continuous range [{lower:?}, {upper:?}) is too wide"
            )));
        }

        Ok(Self {
            range: Some((lower, upper)),
            ..Self::new(seed)
        })
    }

    /// The seed the engine was started from.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// The configured range, `[0, 1)` unless explicit.
    pub fn range(&self) -> (F, F) {
        self.range.unwrap_or((F::zero(), F::one()))
    }
}

impl<F> NumberGenerator for ContinuousGenerator<F>
where
    F: Float + SampleUniform + std::fmt::Debug,
    StandardUniform: Distribution<F>,
{
    type Output = F;

    fn draw(&mut self) -> F {
        match self.range {
            Some((lower, upper)) => self.rng.random_range(lower..upper),
            None => self.rng.random(),
        }
    }

    fn fork_seed(&mut self) -> u64 {
        self.rng.random::<u64>().max(1)
    }
}

/// Uniform generator over an inclusive integer range.
///
/// Draws cover the whole range of `I` by default.
#[derive(Debug, Clone)]
pub struct DiscreteGenerator<I> {
    rng: StdRng,
    seed: u64,
    lower: I,
    upper: I,
}

impl<I> DiscreteGenerator<I>
where
    I: Bounded + Copy + PartialOrd + SampleUniform + std::fmt::Debug,
{
    /// Create a generator over `[I::MIN, I::MAX]`.
    pub fn new(seed: u64) -> Self {
        let seed = resolve_seed(seed);
        Self {
            rng: StdRng::seed_from_u64(seed),
            seed,
            lower: I::min_value(),
            upper: I::max_value(),
        }
    }

    /// Create a generator over `[lower, upper]`.
    ///
    /// # Errors
    ///
    /// Returns [`AugmentError::DegenerateParameter`] if `lower > upper`.
    pub fn with_range(lower: I, upper: I, seed: u64) -> Result<Self, AugmentError> {
        if lower > upper {
            return Err(AugmentError::DegenerateParameter(format!(
                "discrete range [{lower:?}, {upper:?}] is empty"
            )));
        }

        Ok(Self {
            lower,
            upper,
            ..Self::new(seed)
        })
    }

    /// The seed the engine was started from.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// The configured inclusive range.
    pub fn range(&self) -> (I, I) {
        (self.lower, self.upper)
    }

    /// Draw uniformly from `[lower, upper]` instead of the configured range.
    ///
    /// Every value of the range is equally likely.
    ///
    /// # Errors
    ///
    /// Returns [`AugmentError::DegenerateParameter`] if `lower > upper`.
    pub fn draw_between(&mut self, lower: I, upper: I) -> Result<I, AugmentError> {
        if lower > upper {
            return Err(AugmentError::DegenerateParameter(format!(
                "discrete range [{lower:?}, {upper:?}] is empty"
            )));
        }
        Ok(self.rng.random_range(lower..=upper))
    }
}

impl<I> NumberGenerator for DiscreteGenerator<I>
where
    I: Bounded + Copy + PartialOrd + SampleUniform + std::fmt::Debug,
{
    type Output = I;

    fn draw(&mut self) -> I {
        self.rng.random_range(self.lower..=self.upper)
    }

    fn fork_seed(&mut self) -> u64 {
        self.rng.random::<u64>().max(1)
    }
}
