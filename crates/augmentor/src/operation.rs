use augmentor_image::{Image, PixelValue};
use rayon::prelude::*;

use crate::error::AugmentError;
use crate::random::{ContinuousGenerator, NumberGenerator};

/// The probability gate of an operation.
///
/// Every call to [`Gate::operate_this_time`] consumes exactly one draw, whether
/// the gate fires or not, so the parameter draws that follow depend only on the
/// seed and the number of calls.
#[derive(Debug, Clone)]
pub struct Gate {
    probability: f64,
    generator: ContinuousGenerator<f64>,
}

impl Default for Gate {
    /// A gate that always fires, seeded from the system clock.
    fn default() -> Self {
        Self {
            probability: 1.0,
            generator: ContinuousGenerator::new(0),
        }
    }
}

impl Gate {
    /// Create a gate firing with `probability`.
    ///
    /// # Arguments
    ///
    /// * `probability` - The firing probability in `[0, 1]`.
    /// * `seed` - The generator seed; zero derives one from the system clock.
    ///
    /// # Errors
    ///
    /// Returns [`AugmentError::InvalidArgument`] if `probability` is outside `[0, 1]`.
    pub fn new(probability: f64, seed: u64) -> Result<Self, AugmentError> {
        if !(0.0..=1.0).contains(&probability) {
            return Err(AugmentError::InvalidArgument(format!(
                "probability must be in [0, 1], got {probability}"
            )));
        }

        Ok(Self {
            probability,
            generator: ContinuousGenerator::new(seed),
        })
    }

    /// A gate that always fires with the given seed.
    pub fn always(seed: u64) -> Self {
        Self {
            probability: 1.0,
            generator: ContinuousGenerator::new(seed),
        }
    }

    /// The firing probability.
    pub fn probability(&self) -> f64 {
        self.probability
    }

    /// The resolved generator seed.
    pub fn seed(&self) -> u64 {
        self.generator.seed()
    }

    /// A gate with the same probability and a fresh generator started from `seed`.
    pub fn reseeded(&self, seed: u64) -> Self {
        Self {
            probability: self.probability,
            generator: ContinuousGenerator::new(seed),
        }
    }

    /// Decide whether the transform fires on this invocation.
    ///
    /// Fires iff a unit draw in `[0, 1)` is below the probability, so a probability
    /// of one always fires and zero never does.
    pub fn operate_this_time(&mut self) -> bool {
        self.generator.draw() < self.probability
    }

    /// A raw unit draw in `[0, 1)`.
    pub fn uniform(&mut self) -> f64 {
        self.generator.draw()
    }

    /// `(upper - lower) * u + lower` for a unit draw `u`.
    pub fn uniform_range(&mut self, lower: f64, upper: f64) -> f64 {
        (upper - lower) * self.uniform() + lower
    }

    /// Draw a nonzero seed for a forked operation.
    pub fn fork_seed(&mut self) -> u64 {
        self.generator.fork_seed()
    }
}

/// The result of [`Operation::perform_with_outcome`].
#[derive(Debug, Clone, PartialEq)]
pub struct Performed<T, const C: usize> {
    /// The output image; the input unchanged when the gate did not fire.
    pub image: Image<T, C>,
    /// Whether the gate fired and the transform was applied.
    pub applied: bool,
}

/// The capability shared by every augmentation.
///
/// An operation owns a [`Gate`] and possibly more generators; all of them advance
/// on every call. An instance must therefore be used sequentially; for parallel
/// work use [`Operation::reseeded`] clones or [`Operation::perform_batch_par`].
pub trait Operation {
    /// The name used in log records.
    fn name(&self) -> &'static str;

    /// The probability gate.
    fn gate(&self) -> &Gate;

    /// The probability gate, mutably.
    fn gate_mut(&mut self) -> &mut Gate;

    /// Restart every generator of the operation from `seed`.
    fn reseed(&mut self, seed: u64);

    /// Apply the transform unconditionally, drawing its random parameters.
    fn apply<T: PixelValue, const C: usize>(
        &mut self,
        image: Image<T, C>,
    ) -> Result<Image<T, C>, AugmentError>;

    /// Run the gate and, if it fires, the transform.
    ///
    /// A skipped invocation returns the input unchanged and is never an error.
    fn perform<T: PixelValue, const C: usize>(
        &mut self,
        image: Image<T, C>,
    ) -> Result<Image<T, C>, AugmentError> {
        Ok(self.perform_with_outcome(image)?.image)
    }

    /// Like [`Operation::perform`], also reporting whether the transform fired.
    fn perform_with_outcome<T: PixelValue, const C: usize>(
        &mut self,
        image: Image<T, C>,
    ) -> Result<Performed<T, C>, AugmentError> {
        let applied = self.gate_mut().operate_this_time();
        log::trace!("{}: gate {}", self.name(), if applied { "fired" } else { "skipped" });

        if !applied {
            return Ok(Performed {
                image,
                applied: false,
            });
        }

        Ok(Performed {
            image: self.apply(image)?,
            applied: true,
        })
    }

    /// Perform on every image in order, each with its own gate decision.
    fn perform_batch<T: PixelValue, const C: usize>(
        &mut self,
        images: Vec<Image<T, C>>,
    ) -> Result<Vec<Image<T, C>>, AugmentError> {
        images.into_iter().map(|image| self.perform(image)).collect()
    }

    /// A copy of the operation with every generator restarted from `seed`.
    fn reseeded(&self, seed: u64) -> Self
    where
        Self: Sized + Clone,
    {
        let mut op = self.clone();
        op.reseed(seed);
        op
    }

    /// Perform on every image in parallel.
    ///
    /// One seed per image is drawn sequentially from the gate, and each image is
    /// processed by its own [`Operation::reseeded`] copy. The output is in input
    /// order and depends only on the seed of `self`, not on thread scheduling.
    fn perform_batch_par<T: PixelValue, const C: usize>(
        &mut self,
        images: Vec<Image<T, C>>,
    ) -> Result<Vec<Image<T, C>>, AugmentError>
    where
        Self: Sized + Clone + Send,
    {
        let forks: Vec<Self> = images
            .iter()
            .map(|_| {
                let seed = self.gate_mut().fork_seed();
                self.reseeded(seed)
            })
            .collect();

        images
            .into_par_iter()
            .zip(forks)
            .map(|(image, mut op)| op.perform(image))
            .collect()
    }
}
