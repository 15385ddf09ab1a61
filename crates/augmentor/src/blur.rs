//! Blur operations built on the convolution engine of [`augmentor_imgproc::filter`].

use augmentor_image::{Image, PixelValue};
use augmentor_imgproc::{
    filter::{box_blur_fast_in_place, box_blur_in_place, gaussian_blur, kernels},
    parallel::ExecutionStrategy,
};

use crate::error::AugmentError;
use crate::operation::{Gate, Operation};

fn check_sigma(sigma: f64) -> Result<(), AugmentError> {
    if sigma.is_nan() || sigma <= 0.0 {
        return Err(AugmentError::DegenerateParameter(format!(
            "sigma must be positive, got {sigma}"
        )));
    }
    Ok(())
}

fn check_length(name: &str, length: usize) -> Result<(), AugmentError> {
    if length == 0 {
        return Err(AugmentError::DegenerateParameter(format!(
            "{name} must be non-zero"
        )));
    }
    Ok(())
}

/// Gaussian blur by direct separable convolution.
#[derive(Debug, Clone)]
pub struct GaussianBlur {
    sigma: f64,
    kernel_size: usize,
    gate: Gate,
}

impl GaussianBlur {
    /// Create a gaussian blur whose kernel covers three sigmas on each side.
    ///
    /// # Errors
    ///
    /// Returns [`AugmentError::DegenerateParameter`] if `sigma` is not positive.
    pub fn new(sigma: f64) -> Result<Self, AugmentError> {
        check_sigma(sigma)?;
        Self::with_kernel_size(sigma, kernels::gaussian_kernel_size(sigma))
    }

    /// Create a gaussian blur with an explicit kernel length.
    ///
    /// # Errors
    ///
    /// Returns [`AugmentError::DegenerateParameter`] if `sigma` is not positive
    /// or `kernel_size` is zero.
    pub fn with_kernel_size(sigma: f64, kernel_size: usize) -> Result<Self, AugmentError> {
        check_sigma(sigma)?;
        check_length("kernel size", kernel_size)?;

        Ok(Self {
            sigma,
            kernel_size,
            gate: Gate::default(),
        })
    }

    /// Replace the probability gate.
    pub fn with_gate(mut self, gate: Gate) -> Self {
        self.gate = gate;
        self
    }

    /// The kernel length.
    pub fn kernel_size(&self) -> usize {
        self.kernel_size
    }
}

impl Operation for GaussianBlur {
    fn name(&self) -> &'static str {
        "GaussianBlur"
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
        gaussian_blur(&image, &mut dst, self.kernel_size, self.sigma)?;
        Ok(dst)
    }
}

/// Box blur by sliding-window accumulation.
#[derive(Debug, Clone)]
pub struct BoxBlur {
    kernel_size: usize,
    strategy: ExecutionStrategy,
    gate: Gate,
}

impl BoxBlur {
    /// Create a box blur of `kernel_size` taps on each axis.
    ///
    /// # Errors
    ///
    /// Returns [`AugmentError::DegenerateParameter`] if `kernel_size` is zero.
    pub fn new(kernel_size: usize) -> Result<Self, AugmentError> {
        check_length("kernel size", kernel_size)?;

        Ok(Self {
            kernel_size,
            strategy: ExecutionStrategy::default(),
            gate: Gate::default(),
        })
    }

    /// Replace the probability gate.
    pub fn with_gate(mut self, gate: Gate) -> Self {
        self.gate = gate;
        self
    }

    /// Set how rows are scheduled. The output does not depend on it.
    pub fn with_strategy(mut self, strategy: ExecutionStrategy) -> Self {
        self.strategy = strategy;
        self
    }
}

impl Operation for BoxBlur {
    fn name(&self) -> &'static str {
        "BoxBlur"
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
        mut image: Image<T, C>,
    ) -> Result<Image<T, C>, AugmentError> {
        box_blur_in_place(&mut image, self.kernel_size, self.strategy)?;
        Ok(image)
    }
}

/// Gaussian blur approximated by sequential box blur passes.
///
/// The gate is evaluated once per call; when it fires every pass runs, each on
/// the output of the previous one.
#[derive(Debug, Clone)]
pub struct FastGaussianBlur {
    sigma: f64,
    passes: usize,
    strategy: ExecutionStrategy,
    gate: Gate,
}

impl FastGaussianBlur {
    /// Create a fast gaussian blur of `passes` box passes approximating `sigma`.
    ///
    /// # Errors
    ///
    /// Returns [`AugmentError::DegenerateParameter`] if `sigma` is not positive
    /// or `passes` is zero.
    pub fn new(sigma: f64, passes: usize) -> Result<Self, AugmentError> {
        check_sigma(sigma)?;
        check_length("number of passes", passes)?;

        Ok(Self {
            sigma,
            passes,
            strategy: ExecutionStrategy::default(),
            gate: Gate::default(),
        })
    }

    /// Replace the probability gate.
    pub fn with_gate(mut self, gate: Gate) -> Self {
        self.gate = gate;
        self
    }

    /// Set how rows are scheduled. The output does not depend on it.
    pub fn with_strategy(mut self, strategy: ExecutionStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// The box lengths of the passes.
    pub fn pass_lengths(&self) -> Vec<usize> {
        kernels::box_blur_fast_kernels_1d(self.sigma, self.passes)
    }
}

impl Operation for FastGaussianBlur {
    fn name(&self) -> &'static str {
        "FastGaussianBlur"
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
        mut image: Image<T, C>,
    ) -> Result<Image<T, C>, AugmentError> {
        log::trace!("FastGaussianBlur: passes {:?}", self.pass_lengths());
        box_blur_fast_in_place(&mut image, self.sigma, self.passes, self.strategy)?;
        Ok(image)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use augmentor_image::ImageSize;

    #[test]
    fn test_box_blur_flat_field() -> Result<(), AugmentError> {
        let image = Image::<u8, 1>::from_size_val([4, 4].into(), 100)?;
        let mut op = BoxBlur::new(3)?.with_gate(Gate::always(1));

        let out = op.perform(image.clone())?;
        assert_eq!(out, image);
        Ok(())
    }

    #[test]
    fn test_gaussian_blur_kernel_size() -> Result<(), AugmentError> {
        assert_eq!(GaussianBlur::new(1.0)?.kernel_size(), 7);
        assert_eq!(GaussianBlur::with_kernel_size(1.0, 3)?.kernel_size(), 3);

        let image = Image::<u16, 3>::from_size_val([5, 6].into(), 4000)?;
        let out = GaussianBlur::new(0.8)?
            .with_gate(Gate::always(1))
            .perform(image.clone())?;
        assert_eq!(out, image);
        Ok(())
    }

    #[test]
    fn test_fast_gaussian_single_gate() -> Result<(), AugmentError> {
        let size = ImageSize {
            width: 9,
            height: 9,
        };
        let mut image = Image::<u8, 1>::from_size_val(size, 0)?;
        image.set_pixel(4, 4, [255])?;

        // a never-firing gate leaves the image untouched
        let mut op = FastGaussianBlur::new(1.0, 3)?.with_gate(Gate::new(0.0, 1)?);
        let outcome = op.perform_with_outcome(image.clone())?;
        assert!(!outcome.applied);
        assert_eq!(outcome.image, image);

        // a firing gate runs every pass
        let mut op = FastGaussianBlur::new(1.0, 3)?.with_gate(Gate::always(1));
        let outcome = op.perform_with_outcome(image.clone())?;
        assert!(outcome.applied);

        let mut expected = image;
        for length in op.pass_lengths() {
            box_blur_in_place(&mut expected, length, ExecutionStrategy::Serial)?;
        }
        assert_eq!(outcome.image, expected);
        Ok(())
    }

    #[test]
    fn test_blur_parameter_errors() {
        assert!(matches!(
            GaussianBlur::new(0.0),
            Err(AugmentError::DegenerateParameter(_))
        ));
        assert!(GaussianBlur::with_kernel_size(1.0, 0).is_err());
        assert!(matches!(
            BoxBlur::new(0),
            Err(AugmentError::DegenerateParameter(_))
        ));
        assert!(FastGaussianBlur::new(2.0, 0).is_err());
        assert!(FastGaussianBlur::new(-1.0, 3).is_err());
    }
}
