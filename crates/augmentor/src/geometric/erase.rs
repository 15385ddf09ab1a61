use augmentor_image::{Image, ImageSize, PixelValue};

use super::interpolate_size;
use crate::error::AugmentError;
use crate::operation::{Gate, Operation};
use crate::random::{derive_seed, resolve_seed, DiscreteGenerator};

const XY_STREAM: u64 = 1;
const NOISE_STREAM: u64 = 2;

/// Overwrite a random rectangle with random noise.
///
/// The rectangle size is drawn between a lower and an upper mask size (both
/// clamped to the image) with one shared factor. Its top-left corner is uniform
/// over every position that keeps it inside the image. Each channel of each
/// covered pixel gets an independent value uniform over the channel range.
///
/// The offsets and the noise come from two generators of their own. Unless
/// seeded explicitly, their seeds are derived from the gate seed.
#[derive(Debug, Clone)]
pub struct RandomErase {
    lower_mask_size: ImageSize,
    upper_mask_size: ImageSize,
    gate: Gate,
    xy_seed: Option<u64>,
    noise_seed: Option<u64>,
    xy_generator: DiscreteGenerator<usize>,
    noise_generator: DiscreteGenerator<u64>,
}

impl RandomErase {
    /// Create a random erase operation.
    ///
    /// # Errors
    ///
    /// Returns [`AugmentError::InvalidArgument`] if `lower_mask_size` is larger
    /// than `upper_mask_size` in either dimension.
    pub fn new(
        lower_mask_size: ImageSize,
        upper_mask_size: ImageSize,
    ) -> Result<Self, AugmentError> {
        if lower_mask_size.width > upper_mask_size.width
            || lower_mask_size.height > upper_mask_size.height
        {
            return Err(AugmentError::InvalidArgument(format!(
                "lower mask size {lower_mask_size} exceeds upper mask size {upper_mask_size}"
            )));
        }

        let gate = Gate::default();
        let (xy_generator, noise_generator) = Self::generators(gate.seed(), None, None);
        Ok(Self {
            lower_mask_size,
            upper_mask_size,
            gate,
            xy_seed: None,
            noise_seed: None,
            xy_generator,
            noise_generator,
        })
    }

    fn generators(
        gate_seed: u64,
        xy_seed: Option<u64>,
        noise_seed: Option<u64>,
    ) -> (DiscreteGenerator<usize>, DiscreteGenerator<u64>) {
        let xy_seed = xy_seed.map_or_else(|| derive_seed(gate_seed, XY_STREAM), resolve_seed);
        let noise_seed =
            noise_seed.map_or_else(|| derive_seed(gate_seed, NOISE_STREAM), resolve_seed);
        (
            DiscreteGenerator::new(xy_seed),
            DiscreteGenerator::new(noise_seed),
        )
    }

    fn restart_generators(&mut self) {
        let (xy_generator, noise_generator) =
            Self::generators(self.gate.seed(), self.xy_seed, self.noise_seed);
        self.xy_generator = xy_generator;
        self.noise_generator = noise_generator;
    }

    /// Replace the probability gate.
    ///
    /// Generators without an explicit seed are re-derived from the new gate seed.
    pub fn with_gate(mut self, gate: Gate) -> Self {
        self.gate = gate;
        self.restart_generators();
        self
    }

    /// Seed the offset generator explicitly. Zero derives a seed from the system clock.
    pub fn with_xy_seed(mut self, seed: u64) -> Self {
        self.xy_seed = Some(seed);
        self.restart_generators();
        self
    }

    /// Seed the noise generator explicitly. Zero derives a seed from the system clock.
    pub fn with_noise_seed(mut self, seed: u64) -> Self {
        self.noise_seed = Some(seed);
        self.restart_generators();
        self
    }

    fn clamp_to(mask: ImageSize, size: ImageSize) -> ImageSize {
        ImageSize {
            width: mask.width.min(size.width),
            height: mask.height.min(size.height),
        }
    }
}

impl Operation for RandomErase {
    fn name(&self) -> &'static str {
        "RandomErase"
    }

    fn gate(&self) -> &Gate {
        &self.gate
    }

    fn gate_mut(&mut self) -> &mut Gate {
        &mut self.gate
    }

    /// Restart the gate from `seed` and derive both auxiliary generators from it.
    fn reseed(&mut self, seed: u64) {
        self.gate = self.gate.reseeded(seed);
        self.xy_seed = None;
        self.noise_seed = None;
        self.restart_generators();
    }

    fn apply<T: PixelValue, const C: usize>(
        &mut self,
        mut image: Image<T, C>,
    ) -> Result<Image<T, C>, AugmentError> {
        let size = image.size();
        let lower = Self::clamp_to(self.lower_mask_size, size);
        let upper = Self::clamp_to(self.upper_mask_size, size);
        if upper != self.upper_mask_size {
            log::debug!("RandomErase: mask {} clamped to {upper}", self.upper_mask_size);
        }

        let factor = self.gate.uniform();
        let erase = interpolate_size(lower, upper, factor);

        let top = self.xy_generator.draw_between(0, size.height - erase.height)?;
        let left = self.xy_generator.draw_between(0, size.width - erase.width)?;
        log::trace!("RandomErase: {erase} at ({left}, {top})");

        let max: u64 = T::max_value().into();
        let mut pixel = [T::zero(); C];
        for y in top..top + erase.height {
            for x in left..left + erase.width {
                for p in pixel.iter_mut() {
                    *p = T::from_u64_saturating(self.noise_generator.draw_between(0, max)?);
                }
                image.set_pixel(x, y, pixel)?;
            }
        }

        Ok(image)
    }
}
