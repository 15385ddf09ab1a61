use augmentor_image::{Image, ImageError, PixelValue};
use rayon::prelude::*;

use crate::interpolation::{interpolate_pixel, InterpolationMode};

// `len` evenly spaced sample positions from `0` to `src_len - 1`.
fn linspace(src_len: usize, len: usize) -> Vec<f64> {
    if len < 2 {
        return vec![0.0; len];
    }
    let step = (src_len - 1) as f64 / (len - 1) as f64;
    (0..len).map(|i| i as f64 * step).collect()
}

/// Resize an image to a new size.
///
/// The function resizes an image to the size of `dst` using the specified
/// interpolation mode. The corner pixels of the source map onto the corner
/// pixels of the destination.
///
/// # Arguments
///
/// * `src` - The input image container.
/// * `dst` - The output image container.
/// * `interpolation` - The interpolation mode to use.
///
/// # Example
///
/// ```
/// use augmentor_image::{Image, ImageSize};
/// use augmentor_imgproc::resize::resize;
/// use augmentor_imgproc::interpolation::InterpolationMode;
///
/// let image = Image::<u8, 3>::from_size_val([4, 5].into(), 0).unwrap();
///
/// let new_size = ImageSize {
///     width: 2,
///     height: 3,
/// };
///
/// let mut image_resized = Image::<u8, 3>::from_size_val(new_size, 0).unwrap();
///
/// resize(&image, &mut image_resized, InterpolationMode::Nearest).unwrap();
///
/// assert_eq!(image_resized.num_channels(), 3);
/// assert_eq!(image_resized.size().width, 2);
/// assert_eq!(image_resized.size().height, 3);
/// ```
pub fn resize<T: PixelValue, const C: usize>(
    src: &Image<T, C>,
    dst: &mut Image<T, C>,
    interpolation: InterpolationMode,
) -> Result<(), ImageError> {
    if src.size() == dst.size() {
        dst.as_slice_mut().copy_from_slice(src.as_slice());
        return Ok(());
    }

    let xs = linspace(src.cols(), dst.cols());
    let ys = linspace(src.rows(), dst.rows());
    let dst_cols = dst.cols();

    dst.as_slice_mut()
        .par_chunks_exact_mut(dst_cols * C)
        .zip(ys.par_iter())
        .for_each(|(row, &v)| {
            for (out, &u) in row.chunks_exact_mut(C).zip(xs.iter()) {
                out.copy_from_slice(&interpolate_pixel(src, u, v, interpolation));
            }
        });

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use augmentor_image::ImageSize;

    #[test]
    fn test_resize_nearest_downscale() -> Result<(), ImageError> {
        #[rustfmt::skip]
        let image = Image::<u8, 1>::new(
            [3, 3].into(),
            vec![
                1, 2, 3,
                4, 5, 6,
                7, 8, 9,
            ],
        )?;
        let mut resized = Image::<u8, 1>::from_size_val([2, 2].into(), 0)?;
        resize(&image, &mut resized, InterpolationMode::Nearest)?;

        assert_eq!(resized.as_slice(), &[1, 3, 7, 9]);
        Ok(())
    }

    #[test]
    fn test_resize_bilinear_upscale() -> Result<(), ImageError> {
        let image = Image::<u16, 1>::new([2, 1].into(), vec![0, 1000])?;
        let mut resized = Image::<u16, 1>::from_size_val([5, 2].into(), 0)?;
        resize(&image, &mut resized, InterpolationMode::Bilinear)?;

        assert_eq!(
            resized.as_slice(),
            &[0, 250, 500, 750, 1000, 0, 250, 500, 750, 1000]
        );
        Ok(())
    }

    #[test]
    fn test_resize_identity_and_single_pixel() -> Result<(), ImageError> {
        let size = ImageSize {
            width: 3,
            height: 2,
        };
        let image = Image::<u8, 2>::new(size, (0..12).collect())?;

        let mut same = Image::<u8, 2>::from_size_val(size, 0)?;
        resize(&image, &mut same, InterpolationMode::Bilinear)?;
        assert_eq!(same, image);

        let mut single = Image::<u8, 2>::from_size_val([1, 1].into(), 0)?;
        resize(&image, &mut single, InterpolationMode::Nearest)?;
        assert_eq!(single.as_slice(), &[0, 1]);
        Ok(())
    }
}
