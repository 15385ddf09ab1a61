use std::str::FromStr;

use augmentor_image::{Image, PixelValue};
use augmentor_imgproc::flip::{horizontal_flip, vertical_flip};

use crate::error::AugmentError;
use crate::operation::{Gate, Operation};

/// The axis a [`Flip`] mirrors across.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FlipType {
    /// Swap column `x` with column `width - 1 - x`.
    Horizontal,
    /// Swap row `y` with row `height - 1 - y`.
    Vertical,
}

impl FromStr for FlipType {
    type Err = AugmentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Horizontal" => Ok(FlipType::Horizontal),
            "Vertical" => Ok(FlipType::Vertical),
            other => Err(AugmentError::InvalidArgument(format!(
                "unknown flip type {other:?}, expected \"Horizontal\" or \"Vertical\""
            ))),
        }
    }
}

/// Mirror the image horizontally or vertically.
#[derive(Debug, Clone)]
pub struct Flip {
    flip_type: FlipType,
    gate: Gate,
}

impl Flip {
    /// Create a flip operation.
    pub fn new(flip_type: FlipType) -> Self {
        Self {
            flip_type,
            gate: Gate::default(),
        }
    }

    /// Replace the probability gate.
    pub fn with_gate(mut self, gate: Gate) -> Self {
        self.gate = gate;
        self
    }

    /// The flip axis.
    pub fn flip_type(&self) -> FlipType {
        self.flip_type
    }
}

impl Operation for Flip {
    fn name(&self) -> &'static str {
        "Flip"
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
        let flipped = match self.flip_type {
            FlipType::Horizontal => horizontal_flip(&image)?,
            FlipType::Vertical => vertical_flip(&image)?,
        };
        Ok(flipped)
    }
}
