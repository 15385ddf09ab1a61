use augmentor_image::{Image, PixelValue};
use augmentor_imgproc::enhance::invert;

use crate::error::AugmentError;
use crate::operation::{Gate, Operation};

/// Replace every channel value `v` with `max_value - v`.
#[derive(Debug, Clone, Default)]
pub struct Invert {
    gate: Gate,
}

impl Invert {
    /// Create an invert operation.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the probability gate.
    pub fn with_gate(mut self, gate: Gate) -> Self {
        self.gate = gate;
        self
    }
}

impl Operation for Invert {
    fn name(&self) -> &'static str {
        "Invert"
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
        let mut dst = Image::from_size_val(image.size(), T::zero())?;
        invert(&image, &mut dst)?;
        Ok(dst)
    }
}
