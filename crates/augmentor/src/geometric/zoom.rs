use augmentor_image::{Image, ImageSize, PixelValue};
use augmentor_imgproc::{interpolation::InterpolationMode, resize::resize};

use super::crop::crop_centered;
use crate::error::AugmentError;
use crate::operation::{Gate, Operation};

/// Bounds of the zoom factor.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ZoomFactor {
    /// Lower bound of the factor, at least one.
    pub min_factor: f64,
    /// Upper bound of the factor.
    pub max_factor: f64,
}

/// Enlarge by a drawn factor and center-crop back to the original size.
///
/// The factor is truncated to one decimal place before use. A factor whose
/// enlarged image cannot be addressed fails with
/// [`AugmentError::DegenerateParameter`].
#[derive(Debug, Clone)]
pub struct Zoom {
    factor: ZoomFactor,
    interpolation: InterpolationMode,
    gate: Gate,
}

impl Zoom {
    /// Create a zoom operation.
    ///
    /// # Errors
    ///
    /// Returns [`AugmentError::DegenerateParameter`] unless `1 <= min_factor <= max_factor`.
    pub fn new(factor: ZoomFactor) -> Result<Self, AugmentError> {
        let ZoomFactor {
            min_factor,
            max_factor,
        } = factor;
        if !(min_factor >= 1.0 && min_factor <= max_factor && max_factor.is_finite()) {
            return Err(AugmentError::DegenerateParameter(format!(
                "zoom factors must satisfy 1 <= min <= max, got {factor:?}"
            )));
        }

        Ok(Self {
            factor,
            interpolation: InterpolationMode::default(),
            gate: Gate::default(),
        })
    }

    /// Replace the probability gate.
    pub fn with_gate(mut self, gate: Gate) -> Self {
        self.gate = gate;
        self
    }

    /// Set the interpolation mode of the enlarging resize, nearest neighbor by default.
    pub fn with_interpolation(mut self, interpolation: InterpolationMode) -> Self {
        self.interpolation = interpolation;
        self
    }
}

impl Operation for Zoom {
    fn name(&self) -> &'static str {
        "Zoom"
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
        let factor = self
            .gate
            .uniform_range(self.factor.min_factor, self.factor.max_factor);
        let factor = (factor * 10.0).trunc() / 10.0;
        log::trace!("Zoom: factor {factor}");

        let size = image.size();
        let zoomed_size = ImageSize {
            width: (size.width as f64 * factor) as usize,
            height: (size.height as f64 * factor) as usize,
        };
        if zoomed_size == size {
            return Ok(image);
        }
        if zoomed_size
            .width
            .checked_mul(zoomed_size.height)
            .and_then(|n| n.checked_mul(C))
            .is_none()
        {
            return Err(AugmentError::DegenerateParameter(format!(
                "zoom factor {factor} enlarges {size} beyond addressable memory"
            )));
        }

        let mut zoomed = Image::from_size_val(zoomed_size, T::zero())?;
        resize(&image, &mut zoomed, self.interpolation)?;

        crop_centered(&zoomed, size)
    }
}
