use augmentor_image::{Image, ImageError};
use rayon::{
    iter::{IndexedParallelIterator, ParallelIterator},
    slice::ParallelSliceMut,
};

/// Crop an image to a specified region.
///
/// The size of the region is the size of `dst`.
///
/// # Arguments
///
/// * `src` - The source image to crop.
/// * `dst` - The destination image to store the cropped image.
/// * `x` - The x-coordinate of the top-left corner of the region to crop.
/// * `y` - The y-coordinate of the top-left corner of the region to crop.
///
/// # Errors
///
/// Returns [`ImageError::CropOutOfBounds`] if the region does not fit inside `src`.
///
/// # Examples
///
/// ```rust
/// use augmentor_image::{Image, ImageSize};
/// use augmentor_imgproc::crop::crop_image;
///
/// let image = Image::<_, 1>::new(ImageSize { width: 4, height: 4 }, vec![
///     0u8, 1, 2, 3,
///     4u8, 5, 6, 7,
///     8u8, 9, 10, 11,
///     12u8, 13, 14, 15
/// ]).unwrap();
///
/// let mut cropped = Image::<_, 1>::from_size_val(ImageSize { width: 2, height: 2 }, 0u8).unwrap();
///
/// crop_image(&image, &mut cropped, 1, 1).unwrap();
///
/// assert_eq!(cropped.as_slice(), &[5u8, 6, 9, 10]);
/// ```
pub fn crop_image<T, const C: usize>(
    src: &Image<T, C>,
    dst: &mut Image<T, C>,
    x: usize,
    y: usize,
) -> Result<(), ImageError>
where
    T: Copy + Send + Sync,
{
    let (dst_cols, dst_rows) = (dst.cols(), dst.rows());

    let fits_x = x.checked_add(dst_cols).is_some_and(|r| r <= src.cols());
    let fits_y = y.checked_add(dst_rows).is_some_and(|b| b <= src.rows());
    if !fits_x || !fits_y {
        return Err(ImageError::CropOutOfBounds {
            x,
            y,
            width: dst_cols,
            height: dst_rows,
            src_width: src.cols(),
            src_height: src.rows(),
        });
    }

    let src_row_len = src.cols() * C;
    let src_data = src.as_slice();

    dst.as_slice_mut()
        .par_chunks_exact_mut(dst_cols * C)
        .enumerate()
        .for_each(|(i, dst_row)| {
            // get the slice at the top left corner
            let offset = (y + i) * src_row_len + x * C;
            dst_row.copy_from_slice(&src_data[offset..offset + dst_cols * C]);
        });

    Ok(())
}

#[cfg(test)]
mod tests {
    use augmentor_image::{Image, ImageError, ImageSize};

    #[test]
    fn test_crop() -> Result<(), ImageError> {
        let image_size = ImageSize {
            width: 2,
            height: 3,
        };

        #[rustfmt::skip]
        let image = Image::<_, 3>::new(
            image_size,
            vec![
                0u8, 1, 2, 3, 4, 5,
                6u8, 7, 8, 9, 10, 11,
                12u8, 13, 14, 15, 16, 17,
            ],
        )?;

        let mut cropped = Image::<_, 3>::from_size_val([1, 2].into(), 0u8)?;
        super::crop_image(&image, &mut cropped, 1, 1)?;

        assert_eq!(cropped.as_slice(), &[9u8, 10, 11, 15, 16, 17]);
        Ok(())
    }

    #[test]
    fn test_crop_whole_image() -> Result<(), ImageError> {
        let image = Image::<u16, 1>::new([2, 2].into(), vec![1, 2, 3, 4])?;
        let mut cropped = Image::<u16, 1>::from_size_val(image.size(), 0)?;
        super::crop_image(&image, &mut cropped, 0, 0)?;
        assert_eq!(cropped, image);
        Ok(())
    }

    #[test]
    fn test_crop_out_of_bounds() -> Result<(), ImageError> {
        let image = Image::<u8, 1>::from_size_val([4, 3].into(), 0)?;
        let mut cropped = Image::<u8, 1>::from_size_val([2, 2].into(), 0)?;

        assert_eq!(
            super::crop_image(&image, &mut cropped, 3, 0),
            Err(ImageError::CropOutOfBounds {
                x: 3,
                y: 0,
                width: 2,
                height: 2,
                src_width: 4,
                src_height: 3,
            })
        );
        assert!(super::crop_image(&image, &mut cropped, 0, 2).is_err());
        assert!(super::crop_image(&image, &mut cropped, 2, 1).is_ok());
        Ok(())
    }
}
