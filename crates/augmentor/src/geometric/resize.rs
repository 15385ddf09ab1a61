use augmentor_image::{Image, ImageSize, PixelValue};
use augmentor_imgproc::{interpolation::InterpolationMode, resize::resize};

use super::interpolate_size;
use crate::error::AugmentError;
use crate::operation::{Gate, Operation};

/// Resize to a size drawn between two bounds.
///
/// A single unit draw `f` sets both dimensions to `lower + f * (upper - lower)`,
/// truncated, so width and height move together.
#[derive(Debug, Clone)]
pub struct Resize {
    lower: ImageSize,
    upper: ImageSize,
    interpolation: InterpolationMode,
    gate: Gate,
}

impl Resize {
    /// Create a resize operation drawing sizes between `lower` and `upper`.
    ///
    /// # Errors
    ///
    /// Returns [`AugmentError::DegenerateParameter`] if a bound has a zero dimension.
    pub fn new(lower: ImageSize, upper: ImageSize) -> Result<Self, AugmentError> {
        if lower.is_empty() || upper.is_empty() {
            return Err(AugmentError::DegenerateParameter(format!(
                "resize bounds must be non-zero, got {lower} and {upper}"
            )));
        }

        Ok(Self {
            lower,
            upper,
            interpolation: InterpolationMode::default(),
            gate: Gate::default(),
        })
    }

    /// Replace the probability gate.
    pub fn with_gate(mut self, gate: Gate) -> Self {
        self.gate = gate;
        self
    }

    /// Set the interpolation mode, nearest neighbor by default.
    pub fn with_interpolation(mut self, interpolation: InterpolationMode) -> Self {
        self.interpolation = interpolation;
        self
    }
}

impl Operation for Resize {
    fn name(&self) -> &'static str {
        "Resize"
    }

    fn gate(&self) -> &Gate {
        &self.gate
    }

    fn gate_mut(&mut self) -> &mut Gate {
        &mut self.gate
    }

    fn reseed(&mut self, seed: u64) {
        self.gate = self.gate.reseeded(seed);
    }

    fn apply<T: PixelValue, const C: usize>(
        &mut self,
        image: Image<T, C>,
    ) -> Result<Image<T, C>, AugmentError> {
        let factor = self.gate.uniform();
        let size = interpolate_size(self.lower, self.upper, factor);
        log::trace!("Resize: {} -> {size}", image.size());

        if size == image.size() {
            return Ok(image);
        }

        let mut dst = Image::from_size_val(size, T::zero())?;
        resize(&image, &mut dst, self.interpolation)?;
        Ok(dst)
    }
}
