use augmentor_image::{Image, ImageError, PixelValue};

use super::{box_blur_in_place, box_blur_with_strategy, kernels, separable_filter};
use crate::parallel::ExecutionStrategy;

/// Blur an image using a gaussian blur filter
///
/// # Arguments
///
/// * `src` - The source image with shape (H, W, C).
/// * `dst` - The destination image with shape (H, W, C).
/// * `kernel_size` - The number of taps on each axis, see [`kernels::gaussian_kernel_size`].
/// * `sigma` - The sigma of the gaussian kernel.
///
/// PRECONDITION: `src` and `dst` must have the same shape.
pub fn gaussian_blur<T: PixelValue, const C: usize>(
    src: &Image<T, C>,
    dst: &mut Image<T, C>,
    kernel_size: usize,
    sigma: f64,
) -> Result<(), ImageError> {
    if sigma.is_nan() || sigma <= 0.0 {
        return Err(ImageError::InvalidSigma(sigma));
    }

    let kernel = kernels::gaussian_kernel_1d(kernel_size, sigma);
    separable_filter(src, dst, &kernel, &kernel)?;
    Ok(())
}

/// Blur an image using a box blur filter multiple times to achieve a near gaussian blur
///
/// The box lengths follow [`kernels::box_blur_fast_kernels_1d`]. Each pass is a
/// complete horizontal then vertical box blur of the previous pass output.
///
/// # Arguments
///
/// * `src` - The source image with shape (H, W, C).
/// * `dst` - The destination image with shape (H, W, C).
/// * `sigma` - The sigma of the approximated gaussian.
/// * `passes` - The number of box passes.
///
/// PRECONDITION: `src` and `dst` must have the same shape.
pub fn box_blur_fast<T: PixelValue, const C: usize>(
    src: &Image<T, C>,
    dst: &mut Image<T, C>,
    sigma: f64,
    passes: usize,
) -> Result<(), ImageError> {
    let lengths = box_pass_lengths(sigma, passes)?;

    let (first, rest) = match lengths.split_first() {
        Some(split) => split,
        None => return Err(ImageError::InvalidKernelLength(0)),
    };

    box_blur_with_strategy(src, dst, *first, ExecutionStrategy::Auto)?;
    for &length in rest {
        box_blur_in_place(dst, length, ExecutionStrategy::Auto)?;
    }

    Ok(())
}

/// Blur an image in place with the multi-pass box approximation of a gaussian.
///
/// See [`box_blur_fast`].
pub fn box_blur_fast_in_place<T: PixelValue, const C: usize>(
    image: &mut Image<T, C>,
    sigma: f64,
    passes: usize,
    strategy: ExecutionStrategy,
) -> Result<(), ImageError> {
    for length in box_pass_lengths(sigma, passes)? {
        box_blur_in_place(image, length, strategy)?;
    }
    Ok(())
}

fn box_pass_lengths(sigma: f64, passes: usize) -> Result<Vec<usize>, ImageError> {
    if sigma.is_nan() || sigma <= 0.0 {
        return Err(ImageError::InvalidSigma(sigma));
    }
    if passes == 0 {
        return Err(ImageError::InvalidKernelLength(0));
    }
    Ok(kernels::box_blur_fast_kernels_1d(sigma, passes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::box_blur;
    use augmentor_image::ImageSize;

    // vertical step edge, dark on the left half
    fn step_edge(size: ImageSize) -> Result<Image<u8, 1>, ImageError> {
        let data = (0..size.width * size.height)
            .map(|i| if i % size.width < size.width / 2 { 0 } else { 255 })
            .collect();
        Image::new(size, data)
    }

    fn mean_abs_diff(a: &Image<u8, 1>, b: &Image<u8, 1>) -> f64 {
        let total: u64 = a
            .as_slice()
            .iter()
            .zip(b.as_slice())
            .map(|(&x, &y)| (x as i64 - y as i64).unsigned_abs())
            .sum();
        total as f64 / a.as_slice().len() as f64
    }

    #[test]
    fn test_gaussian_blur_flat_field() -> Result<(), ImageError> {
        let src = Image::<u8, 3>::from_size_val([9, 7].into(), 117)?;
        let mut dst = Image::<u8, 3>::from_size_val(src.size(), 0)?;

        for sigma in [0.5, 1.0, 2.5] {
            let kernel_size = kernels::gaussian_kernel_size(sigma);
            gaussian_blur(&src, &mut dst, kernel_size, sigma)?;
            assert!(dst.as_slice().iter().all(|&v| v == 117), "sigma={sigma}");
        }
        Ok(())
    }

    #[test]
    fn test_gaussian_blur_smooths_impulse() -> Result<(), ImageError> {
        let mut src = Image::<u16, 1>::from_size_val([7, 7].into(), 0)?;
        src.set_pixel(3, 3, [60000])?;
        let mut dst = Image::<u16, 1>::from_size_val(src.size(), 0)?;

        gaussian_blur(&src, &mut dst, 5, 1.0)?;

        let center = dst.get_pixel(3, 3)?[0];
        let near = dst.get_pixel(4, 3)?[0];
        let far = dst.get_pixel(5, 3)?[0];
        assert!(center < 60000);
        assert!(center > near && near > far && far > 0);
        assert_eq!(dst.get_pixel(2, 3)?, [near]);
        assert_eq!(dst.get_pixel(0, 0)?, [0]);
        Ok(())
    }

    #[test]
    fn test_box_blur_fast_single_pass_is_box_blur() -> Result<(), ImageError> {
        let size = ImageSize {
            width: 11,
            height: 5,
        };
        let src = step_edge(size)?;

        let mut fast = Image::<u8, 1>::from_size_val(size, 0)?;
        box_blur_fast(&src, &mut fast, 2.0, 1)?;

        let length = kernels::box_blur_fast_kernels_1d(2.0, 1)[0];
        let mut single = Image::<u8, 1>::from_size_val(size, 0)?;
        box_blur(&src, &mut single, length)?;

        assert_eq!(fast.as_slice(), single.as_slice());
        Ok(())
    }

    #[test]
    fn test_box_blur_fast_converges_to_gaussian() -> Result<(), ImageError> {
        let size = ImageSize {
            width: 64,
            height: 64,
        };
        let sigma = 4.0;
        let src = step_edge(size)?;

        let mut reference = Image::<u8, 1>::from_size_val(size, 0)?;
        gaussian_blur(&src, &mut reference, kernels::gaussian_kernel_size(sigma), sigma)?;

        let mut errors = Vec::new();
        for passes in [1, 2, 3, 5] {
            let mut dst = Image::<u8, 1>::from_size_val(size, 0)?;
            box_blur_fast(&src, &mut dst, sigma, passes)?;
            errors.push(mean_abs_diff(&dst, &reference));
        }

        assert!(errors[0] > errors[1], "{errors:?}");
        assert!(errors[0] > errors[2], "{errors:?}");
        assert!(errors[0] > errors[3], "{errors:?}");
        assert!(errors[2] < 2.0, "{errors:?}");
        Ok(())
    }

    #[test]
    fn test_box_blur_fast_in_place() -> Result<(), ImageError> {
        let size = ImageSize {
            width: 20,
            height: 3,
        };
        let src = step_edge(size)?;

        let mut dst = Image::<u8, 1>::from_size_val(size, 0)?;
        box_blur_fast(&src, &mut dst, 1.5, 3)?;

        let mut in_place = src.clone();
        box_blur_fast_in_place(&mut in_place, 1.5, 3, ExecutionStrategy::Serial)?;

        assert_eq!(dst, in_place);
        Ok(())
    }

    #[test]
    fn test_blur_errors() -> Result<(), ImageError> {
        let src = Image::<u8, 1>::from_size_val([3, 3].into(), 0)?;
        let mut dst = src.clone();

        assert_eq!(
            gaussian_blur(&src, &mut dst, 3, 0.0),
            Err(ImageError::InvalidSigma(0.0))
        );
        assert_eq!(
            gaussian_blur(&src, &mut dst, 0, 1.0),
            Err(ImageError::InvalidKernelLength(0))
        );
        assert_eq!(
            box_blur_fast(&src, &mut dst, 1.0, 0),
            Err(ImageError::InvalidKernelLength(0))
        );
        assert!(box_blur_fast(&src, &mut dst, f64::NAN, 3).is_err());
        Ok(())
    }
}
