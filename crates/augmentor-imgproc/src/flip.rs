use augmentor_image::{Image, ImageError};
use rayon::{
    iter::{IndexedParallelIterator, ParallelIterator},
    slice::{ParallelSlice, ParallelSliceMut},
};

/// Flip the input image horizontally.
///
/// Column `x` of the output is column `width - 1 - x` of the input.
///
/// # Arguments
///
/// * `src` - The input image with shape (H, W, C).
///
/// # Returns
///
/// The flipped image.
///
/// # Example
///
/// ```
/// use augmentor_image::Image;
/// use augmentor_imgproc::flip::horizontal_flip;
///
/// let image = Image::<u8, 1>::new([2, 2].into(), vec![1, 2, 3, 4]).unwrap();
///
/// let flipped = horizontal_flip(&image).unwrap();
///
/// assert_eq!(flipped.as_slice(), &[2, 1, 4, 3]);
/// ```
pub fn horizontal_flip<T, const C: usize>(src: &Image<T, C>) -> Result<Image<T, C>, ImageError>
where
    T: Clone + Send + Sync,
{
    let mut dst = src.clone();
    let cols = src.cols();

    dst.as_slice_mut()
        .par_chunks_exact_mut(cols * C)
        .for_each(|row| {
            let mut i = 0;
            let mut j = cols - 1;
            while i < j {
                for c in 0..C {
                    row.swap(i * C + c, j * C + c);
                }
                i += 1;
                j -= 1;
            }
        });

    Ok(dst)
}

/// Flip the input image vertically.
///
/// Row `y` of the output is row `height - 1 - y` of the input.
///
/// # Arguments
///
/// * `src` - The input image with shape (H, W, C).
///
/// # Returns
///
/// The flipped image.
pub fn vertical_flip<T, const C: usize>(src: &Image<T, C>) -> Result<Image<T, C>, ImageError>
where
    T: Clone + Send + Sync,
{
    let mut dst = src.clone();
    let row_len = src.cols() * C;

    dst.as_slice_mut()
        .par_chunks_exact_mut(row_len)
        .zip(src.as_slice().par_chunks_exact(row_len).rev())
        .for_each(|(dst_row, src_row)| dst_row.clone_from_slice(src_row));

    Ok(dst)
}
