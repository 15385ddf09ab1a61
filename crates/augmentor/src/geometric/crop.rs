use augmentor_image::{Image, ImageSize, PixelValue};
use augmentor_imgproc::crop::crop_image;

use crate::error::AugmentError;
use crate::operation::{Gate, Operation};

/// Where the crop rectangle is placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CropMode {
    /// Centered, with offsets `w/2 - width/2` and `h/2 - height/2`.
    #[default]
    Center,
    /// Uniformly over every offset that keeps the rectangle inside the image.
    Random,
}

/// Crop a fixed-size rectangle.
#[derive(Debug, Clone)]
pub struct Crop {
    size: ImageSize,
    mode: CropMode,
    gate: Gate,
}

fn check_fits(size: ImageSize, image_size: ImageSize) -> Result<(), AugmentError> {
    if size.width > image_size.width || size.height > image_size.height {
        return Err(AugmentError::OutOfBounds(format!(
            "crop of {size} does not fit in {image_size}"
        )));
    }
    Ok(())
}

fn crop_at<T: PixelValue, const C: usize>(
    image: &Image<T, C>,
    size: ImageSize,
    x: usize,
    y: usize,
) -> Result<Image<T, C>, AugmentError> {
    let mut dst = Image::from_size_val(size, T::zero())?;
    crop_image(image, &mut dst, x, y)?;
    Ok(dst)
}

/// Crop the centered `size` rectangle of an image.
///
/// # Errors
///
/// Returns [`AugmentError::OutOfBounds`] if `size` exceeds the image.
pub(crate) fn crop_centered<T: PixelValue, const C: usize>(
    image: &Image<T, C>,
    size: ImageSize,
) -> Result<Image<T, C>, AugmentError> {
    check_fits(size, image.size())?;

    let left = image.width() / 2 - size.width / 2;
    let top = image.height() / 2 - size.height / 2;
    crop_at(image, size, left, top)
}

impl Crop {
    /// Create a crop operation.
    ///
    /// # Errors
    ///
    /// Returns [`AugmentError::DegenerateParameter`] if `size` has a zero dimension.
    pub fn new(size: ImageSize, mode: CropMode) -> Result<Self, AugmentError> {
        if size.is_empty() {
            return Err(AugmentError::DegenerateParameter(format!(
                "crop size must be non-zero, got {size}"
            )));
        }

        Ok(Self {
            size,
            mode,
            gate: Gate::default(),
        })
    }

    /// Replace the probability gate.
    pub fn with_gate(mut self, gate: Gate) -> Self {
        self.gate = gate;
        self
    }

    // Uniform offset in `[0, slack]` from one unit draw.
    fn random_offset(&mut self, slack: usize) -> usize {
        let u = self.gate.uniform();
        ((u * (slack + 1) as f64).floor() as usize).min(slack)
    }
}

impl Operation for Crop {
    fn name(&self) -> &'static str {
        "Crop"
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
        match self.mode {
            CropMode::Center => crop_centered(&image, self.size),
            CropMode::Random => {
                check_fits(self.size, image.size())?;
                let left = self.random_offset(image.width() - self.size.width);
                let top = self.random_offset(image.height() - self.size.height);
                log::trace!("Crop: offset ({left}, {top})");
                crop_at(&image, self.size, left, top)
            }
        }
    }
}
