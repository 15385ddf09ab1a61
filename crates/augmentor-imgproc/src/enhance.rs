use augmentor_image::{Image, ImageError, PixelValue};

use crate::parallel;

/// Invert the channel values of an image.
///
/// dst(x,y,c) = max_value - src(x,y,c)
///
/// # Arguments
///
/// * `src` - The input image.
/// * `dst` - The output image.
///
/// # Errors
///
/// Returns an error if the size of `dst` does not match the size of `src`.
///
/// # Example
///
/// ```
/// use augmentor_image::Image;
/// use augmentor_imgproc::enhance::invert;
///
/// let src = Image::<u8, 1>::new([3, 1].into(), vec![0, 55, 255]).unwrap();
/// let mut dst = Image::<u8, 1>::from_size_val(src.size(), 0).unwrap();
///
/// invert(&src, &mut dst).unwrap();
///
/// assert_eq!(dst.as_slice(), &[255, 200, 0]);
/// ```
pub fn invert<T: PixelValue, const C: usize>(
    src: &Image<T, C>,
    dst: &mut Image<T, C>,
) -> Result<(), ImageError> {
    if src.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            src.cols(),
            src.rows(),
            dst.cols(),
            dst.rows(),
        ));
    }

    let max = T::max_value();
    parallel::par_iter_rows(src, dst, |src_pixel, dst_pixel| {
        for (d, &s) in dst_pixel.iter_mut().zip(src_pixel) {
            *d = max - s;
        }
    });

    Ok(())
}
