use augmentor_image::{Image, ImageError, PixelValue};

use super::separable_filter::clamp_index;
use crate::parallel::{for_each_row_mut, ExecutionStrategy};

/// Per-channel running sums of a box filter window.
///
/// The sums are kept in `u64` so that any window of fixed-width channel values
/// can be accumulated without overflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Accumulator<const C: usize> {
    sums: [u64; C],
}

impl<const C: usize> Default for Accumulator<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const C: usize> Accumulator<C> {
    /// Create an accumulator with all sums at zero.
    pub fn new() -> Self {
        Self { sums: [0; C] }
    }

    /// The current per-channel sums.
    pub fn sums(&self) -> &[u64; C] {
        &self.sums
    }

    /// Add the channel values of a pixel to the window.
    pub fn add<T: PixelValue>(&mut self, pixel: &[T]) {
        for (sum, &v) in self.sums.iter_mut().zip(pixel) {
            let v: u64 = v.into();
            *sum += v;
        }
    }

    /// Slide the window by one tap: remove `removed` and add `added`.
    ///
    /// `removed` must be a pixel currently in the window.
    pub fn shift<T: PixelValue>(&mut self, removed: &[T], added: &[T]) {
        for ((sum, &r), &a) in self.sums.iter_mut().zip(removed).zip(added) {
            let (r, a): (u64, u64) = (r.into(), a.into());
            *sum = *sum + a - r;
        }
    }

    /// Divide every sum by `length`, truncating, and narrow it to a pixel.
    pub fn divide<T: PixelValue>(&self, length: usize) -> [T; C] {
        let mut pixel = [T::zero(); C];
        for (out, &sum) in pixel.iter_mut().zip(self.sums.iter()) {
            *out = T::from_u64_saturating(sum / length as u64);
        }
        pixel
    }
}

// First and last tap offsets of a window of `kernel_size` taps.
fn window_offsets(kernel_size: usize) -> (isize, isize) {
    let first = -((kernel_size / 2) as isize);
    (first, first + kernel_size as isize - 1)
}

fn check_box_args<T, const C: usize>(
    src: &Image<T, C>,
    dst: &Image<T, C>,
    kernel_size: usize,
) -> Result<(), ImageError> {
    if kernel_size == 0 {
        return Err(ImageError::InvalidKernelLength(kernel_size));
    }

    if src.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            src.cols(),
            src.rows(),
            dst.cols(),
            dst.rows(),
        ));
    }

    Ok(())
}

// Sliding window along one row of `C`-channel pixels.
fn slide_row<T: PixelValue, const C: usize>(src: &[T], dst: &mut [T], kernel_size: usize) {
    let len = src.len() / C;
    let pixel = |i: isize| {
        let i = clamp_index(i, len);
        &src[i * C..(i + 1) * C]
    };
    let (first, last) = window_offsets(kernel_size);

    let mut acc = Accumulator::<C>::new();
    for t in first..=last {
        acc.add(pixel(t));
    }
    dst[..C].copy_from_slice(&acc.divide::<T>(kernel_size));

    for i in 1..len as isize {
        acc.shift(pixel(i - 1 + first), pixel(i + last));
        let i = i as usize;
        dst[i * C..(i + 1) * C].copy_from_slice(&acc.divide::<T>(kernel_size));
    }
}

fn horizontal_pass<T: PixelValue, const C: usize>(
    src: &[T],
    cols: usize,
    kernel_size: usize,
    parallel: bool,
) -> Vec<T> {
    let row_len = cols * C;
    let mut transient = vec![T::zero(); src.len()];
    for_each_row_mut(&mut transient, row_len, parallel, |r, row_out| {
        slide_row::<T, C>(&src[r * row_len..(r + 1) * row_len], row_out, kernel_size);
    });
    transient
}

// Sliding window down the columns, one accumulator per column.
fn vertical_pass<T: PixelValue, const C: usize>(
    src: &[T],
    dst: &mut [T],
    rows: usize,
    cols: usize,
    kernel_size: usize,
) {
    let row_len = cols * C;
    let row = |y: isize| {
        let y = clamp_index(y, rows);
        &src[y * row_len..(y + 1) * row_len]
    };
    let (first, last) = window_offsets(kernel_size);

    let mut accs = vec![Accumulator::<C>::new(); cols];
    for t in first..=last {
        for (acc, px) in accs.iter_mut().zip(row(t).chunks_exact(C)) {
            acc.add(px);
        }
    }

    for (y, row_out) in dst.chunks_exact_mut(row_len).enumerate() {
        if y > 0 {
            let y = y as isize;
            let removed = row(y - 1 + first).chunks_exact(C);
            let added = row(y + last).chunks_exact(C);
            for ((acc, r), a) in accs.iter_mut().zip(removed).zip(added) {
                acc.shift(r, a);
            }
        }
        for (acc, out) in accs.iter().zip(row_out.chunks_exact_mut(C)) {
            out.copy_from_slice(&acc.divide::<T>(kernel_size));
        }
    }
}

// Horizontal then vertical sliding passes from `src` into `dst`.
fn sliding_box_blur<T: PixelValue, const C: usize>(
    src: &[T],
    dst: &mut [T],
    rows: usize,
    cols: usize,
    kernel_size: usize,
    strategy: ExecutionStrategy,
) {
    let parallel = strategy.is_parallel(rows * cols);
    let transient = horizontal_pass::<T, C>(src, cols, kernel_size, parallel);
    vertical_pass::<T, C>(&transient, dst, rows, cols, kernel_size);
}

/// Blur an image in place with a box filter of `kernel_size` taps on each axis.
///
/// See [`box_blur_with_strategy`] for the algorithm.
pub fn box_blur_in_place<T: PixelValue, const C: usize>(
    image: &mut Image<T, C>,
    kernel_size: usize,
    strategy: ExecutionStrategy,
) -> Result<(), ImageError> {
    if kernel_size == 0 {
        return Err(ImageError::InvalidKernelLength(kernel_size));
    }

    let (rows, cols) = (image.rows(), image.cols());
    let src = image.as_slice().to_vec();
    sliding_box_blur::<T, C>(&src, image.as_slice_mut(), rows, cols, kernel_size, strategy);

    Ok(())
}

/// Blur an image using a sliding-window box filter with execution strategy control.
///
/// Each output pixel is the truncated mean of the `kernel_size` taps around it
/// (taps at offsets `-(k/2)..=k-1-k/2`), clamped to the image edges. The image is
/// filtered horizontally into an integer transient buffer, then vertically into `dst`.
/// The window sums are updated with one addition and one subtraction per step,
/// so the cost does not depend on `kernel_size`. The output is identical to
/// [`box_blur_direct`].
///
/// # Arguments
///
/// * `src` - The source image with shape (H, W, C).
/// * `dst` - The destination image with shape (H, W, C).
/// * `kernel_size` - The number of taps on each axis.
/// * `strategy` - Execution strategy for the horizontal pass.
pub fn box_blur_with_strategy<T: PixelValue, const C: usize>(
    src: &Image<T, C>,
    dst: &mut Image<T, C>,
    kernel_size: usize,
    strategy: ExecutionStrategy,
) -> Result<(), ImageError> {
    check_box_args(src, dst, kernel_size)?;

    let (rows, cols) = (src.rows(), src.cols());
    sliding_box_blur::<T, C>(
        src.as_slice(),
        dst.as_slice_mut(),
        rows,
        cols,
        kernel_size,
        strategy,
    );

    Ok(())
}

/// Blur an image using a sliding-window box filter.
///
/// # Arguments
///
/// * `src` - The source image with shape (H, W, C).
/// * `dst` - The destination image with shape (H, W, C).
/// * `kernel_size` - The number of taps on each axis.
///
/// # Example
///
/// ```
/// use augmentor_image::Image;
/// use augmentor_imgproc::filter::box_blur;
///
/// let src = Image::<u8, 1>::new([3, 1].into(), vec![0, 30, 60]).unwrap();
/// let mut dst = Image::<u8, 1>::from_size_val(src.size(), 0).unwrap();
///
/// box_blur(&src, &mut dst, 3).unwrap();
///
/// assert_eq!(dst.as_slice(), &[10, 30, 50]);
/// ```
pub fn box_blur<T: PixelValue, const C: usize>(
    src: &Image<T, C>,
    dst: &mut Image<T, C>,
    kernel_size: usize,
) -> Result<(), ImageError> {
    box_blur_with_strategy(src, dst, kernel_size, ExecutionStrategy::Auto)
}

/// Blur an image with a box filter by re-summing every window.
///
/// Reference implementation of [`box_blur`]: same tap offsets, boundary, axis
/// order and integer transient, but `O(kernel_size)` work per pixel and axis.
pub fn box_blur_direct<T: PixelValue, const C: usize>(
    src: &Image<T, C>,
    dst: &mut Image<T, C>,
    kernel_size: usize,
) -> Result<(), ImageError> {
    check_box_args(src, dst, kernel_size)?;

    let (rows, cols) = (src.rows(), src.cols());
    let row_len = cols * C;
    let (first, _) = window_offsets(kernel_size);
    let src_data = src.as_slice();

    let mut transient = vec![T::zero(); src_data.len()];
    for r in 0..rows {
        for c in 0..cols {
            let mut acc = Accumulator::<C>::new();
            for t in 0..kernel_size as isize {
                let x = clamp_index(c as isize + first + t, cols);
                let idx = r * row_len + x * C;
                acc.add(&src_data[idx..idx + C]);
            }
            let idx = r * row_len + c * C;
            transient[idx..idx + C].copy_from_slice(&acc.divide::<T>(kernel_size));
        }
    }

    let dst_data = dst.as_slice_mut();
    for r in 0..rows {
        for c in 0..cols {
            let mut acc = Accumulator::<C>::new();
            for t in 0..kernel_size as isize {
                let y = clamp_index(r as isize + first + t, rows);
                let idx = y * row_len + c * C;
                acc.add(&transient[idx..idx + C]);
            }
            let idx = r * row_len + c * C;
            dst_data[idx..idx + C].copy_from_slice(&acc.divide::<T>(kernel_size));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use augmentor_image::ImageSize;
    use rand::{rngs::StdRng, Rng, SeedableRng};

    #[test]
    fn test_accumulator() {
        let mut acc = Accumulator::<2>::new();
        acc.add(&[10u8, 200]);
        acc.add(&[20u8, 255]);
        assert_eq!(acc.sums(), &[30, 455]);

        acc.shift(&[10u8, 200], &[255u8, 1]);
        assert_eq!(acc.sums(), &[275, 256]);

        assert_eq!(acc.divide::<u8>(2), [137, 128]);
        assert_eq!(acc.divide::<u8>(1), [255, 255]);
    }

    #[test]
    fn test_box_blur_flat_field() -> Result<(), ImageError> {
        let src = Image::<u8, 1>::from_size_val([4, 4].into(), 100)?;
        for kernel_size in 1..9 {
            let mut dst = Image::<u8, 1>::from_size_val(src.size(), 0)?;
            box_blur(&src, &mut dst, kernel_size)?;
            assert!(dst.as_slice().iter().all(|&v| v == 100), "k={kernel_size}");
        }
        Ok(())
    }

    #[test]
    fn test_box_blur_impulse() -> Result<(), ImageError> {
        #[rustfmt::skip]
        let src = Image::<u8, 1>::new(
            [5, 5].into(),
            vec![
                0, 0, 0, 0, 0,
                0, 0, 0, 0, 0,
                0, 0, 225, 0, 0,
                0, 0, 0, 0, 0,
                0, 0, 0, 0, 0,
            ],
        )?;
        let mut dst = Image::<u8, 1>::from_size_val(src.size(), 0)?;
        box_blur(&src, &mut dst, 3)?;

        #[rustfmt::skip]
        assert_eq!(
            dst.as_slice(),
            &[
                0, 0, 0, 0, 0,
                0, 25, 25, 25, 0,
                0, 25, 25, 25, 0,
                0, 25, 25, 25, 0,
                0, 0, 0, 0, 0,
            ]
        );
        Ok(())
    }

    #[test]
    fn test_box_blur_even_kernel_window() -> Result<(), ImageError> {
        // a window of 2 taps covers the pixel and its left neighbour
        let src = Image::<u8, 1>::new([4, 1].into(), vec![0, 10, 20, 40])?;
        let mut dst = Image::<u8, 1>::from_size_val(src.size(), 0)?;
        box_blur(&src, &mut dst, 2)?;
        assert_eq!(dst.as_slice(), &[0, 5, 15, 30]);
        Ok(())
    }

    #[test]
    fn test_box_blur_matches_direct() -> Result<(), ImageError> {
        let mut rng = StdRng::seed_from_u64(7);

        for (width, height) in [(1, 1), (1, 6), (5, 1), (7, 4), (16, 9)] {
            let size = ImageSize { width, height };
            let data = (0..width * height * 3).map(|_| rng.random::<u8>()).collect();
            let src = Image::<u8, 3>::new(size, data)?;

            for kernel_size in [1, 2, 3, 4, 5, 8, 11, 31] {
                let mut sliding = Image::<u8, 3>::from_size_val(size, 0)?;
                let mut direct = Image::<u8, 3>::from_size_val(size, 0)?;

                box_blur(&src, &mut sliding, kernel_size)?;
                box_blur_direct(&src, &mut direct, kernel_size)?;

                assert_eq!(
                    sliding.as_slice(),
                    direct.as_slice(),
                    "{width}x{height}, k={kernel_size}"
                );
            }
        }
        Ok(())
    }

    #[test]
    fn test_box_blur_in_place_and_strategies() -> Result<(), ImageError> {
        let mut rng = StdRng::seed_from_u64(3);
        let size = ImageSize {
            width: 13,
            height: 8,
        };
        let data = (0..size.width * size.height).map(|_| rng.random::<u16>()).collect();
        let src = Image::<u16, 1>::new(size, data)?;

        let mut serial = Image::<u16, 1>::from_size_val(size, 0)?;
        box_blur_with_strategy(&src, &mut serial, 5, ExecutionStrategy::Serial)?;

        let mut parallel = Image::<u16, 1>::from_size_val(size, 0)?;
        box_blur_with_strategy(&src, &mut parallel, 5, ExecutionStrategy::Parallel)?;

        let mut in_place = src.clone();
        box_blur_in_place(&mut in_place, 5, ExecutionStrategy::Auto)?;

        assert_eq!(serial.as_slice(), parallel.as_slice());
        assert_eq!(serial.as_slice(), in_place.as_slice());
        Ok(())
    }

    #[test]
    fn test_box_blur_errors() -> Result<(), ImageError> {
        let src = Image::<u8, 1>::from_size_val([3, 3].into(), 0)?;
        let mut dst = Image::<u8, 1>::from_size_val([3, 3].into(), 0)?;
        assert_eq!(
            box_blur(&src, &mut dst, 0),
            Err(ImageError::InvalidKernelLength(0))
        );
        assert_eq!(
            box_blur_direct(&src, &mut dst, 0),
            Err(ImageError::InvalidKernelLength(0))
        );

        let mut other = Image::<u8, 1>::from_size_val([3, 2].into(), 0)?;
        assert!(box_blur(&src, &mut other, 3).is_err());
        Ok(())
    }
}
