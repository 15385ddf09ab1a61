use augmentor_image::{Image, PixelValue};
use augmentor_imgproc::warp::{get_rotation_matrix2d, warp_affine_nearest};

use crate::error::AugmentError;
use crate::operation::{Gate, Operation};

/// Bounds of the rotation angle, in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RotateRange {
    /// Lower bound of the angle.
    pub min_rotate: f64,
    /// Upper bound of the angle.
    pub max_rotate: f64,
}

/// Rotate about the image center by an angle drawn from a range.
///
/// Each destination pixel samples the rounded inverse-rotated source position.
/// Positions outside the source leave the pixel at zero.
#[derive(Debug, Clone)]
pub struct Rotate {
    range: RotateRange,
    gate: Gate,
}

impl Rotate {
    /// Create a rotate operation.
    ///
    /// # Errors
    ///
    /// Returns [`AugmentError::InvalidArgument`] if a bound is not finite.
    pub fn new(range: RotateRange) -> Result<Self, AugmentError> {
        if !(range.min_rotate.is_finite() && range.max_rotate.is_finite()) {
            return Err(AugmentError::InvalidArgument(format!(
                "rotation bounds must be finite, got {range:?}"
            )));
        }

        Ok(Self {
            range,
            gate: Gate::default(),
        })
    }

    /// Replace the probability gate.
    pub fn with_gate(mut self, gate: Gate) -> Self {
        self.gate = gate;
        self
    }
}

impl Operation for Rotate {
    fn name(&self) -> &'static str {
        "Rotate"
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
        let angle = self
            .gate
            .uniform_range(self.range.min_rotate, self.range.max_rotate);
        log::trace!("Rotate: {angle:.3} degrees");

        let center = ((image.width() / 2) as f64, (image.height() / 2) as f64);
        let m = get_rotation_matrix2d(center, angle);

        let mut dst = Image::from_size_val(image.size(), T::default())?;
        warp_affine_nearest(&image, &mut dst, &m)?;
        Ok(dst)
    }
}
