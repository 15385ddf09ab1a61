use augmentor_image::{Image, ImageError, PixelValue};

use crate::parallel::{for_each_row_mut, ExecutionStrategy};

/// Clamp a possibly out-of-range tap coordinate to `[0, len)`.
pub(crate) fn clamp_index(i: isize, len: usize) -> usize {
    i.clamp(0, len as isize - 1) as usize
}

/// A separable 2D filter that applies horizontal and vertical 1D convolutions sequentially.
///
/// This struct caches the kernel data and precomputed tap offsets.
struct SeparableFilter {
    kernel_x: Vec<f64>,
    kernel_y: Vec<f64>,
    offsets_x: Vec<isize>,
    offsets_y: Vec<isize>,
}

impl SeparableFilter {
    /// Create a new separable filter with the given kernels.
    ///
    /// # Arguments
    ///
    /// * `kernel_x` - The horizontal convolution kernel
    /// * `kernel_y` - The vertical convolution kernel
    fn new(kernel_x: &[f64], kernel_y: &[f64]) -> Self {
        let half_x = kernel_x.len() / 2;
        let half_y = kernel_y.len() / 2;

        let offsets_x = (0..kernel_x.len())
            .map(|i| i as isize - half_x as isize)
            .collect();

        let offsets_y = (0..kernel_y.len())
            .map(|i| i as isize - half_y as isize)
            .collect();

        Self {
            kernel_x: kernel_x.to_vec(),
            kernel_y: kernel_y.to_vec(),
            offsets_x,
            offsets_y,
        }
    }

    /// Apply the filter to an image.
    ///
    /// Performs horizontal filtering into a floating point transient buffer,
    /// followed by vertical filtering from the transient into `dst`. Sums are
    /// accumulated in `f64` and truncated when stored.
    fn apply<T: PixelValue, const C: usize>(
        &self,
        src: &Image<T, C>,
        dst: &mut Image<T, C>,
        strategy: ExecutionStrategy,
    ) {
        let rows = src.rows();
        let cols = src.cols();
        let row_len = cols * C;
        let parallel = strategy.is_parallel(rows * cols);

        let src_data = src.as_slice();
        let mut temp = vec![0.0f64; src_data.len()];

        // Horizontal
        for_each_row_mut(&mut temp, row_len, parallel, |r, row_temp| {
            let row_src = &src_data[r * row_len..(r + 1) * row_len];
            for c in 0..cols {
                let mut acc = [0.0f64; C];
                for (&k, &off) in self.kernel_x.iter().zip(self.offsets_x.iter()) {
                    let x = clamp_index(c as isize + off, cols);
                    for (acc_val, &v) in acc.iter_mut().zip(&row_src[x * C..(x + 1) * C]) {
                        let v: f64 = v.into();
                        *acc_val += v * k;
                    }
                }
                row_temp[c * C..(c + 1) * C].copy_from_slice(&acc);
            }
        });

        // Vertical
        let temp = &temp;
        for_each_row_mut(dst.as_slice_mut(), row_len, parallel, |r, row_dst| {
            for c in 0..cols {
                let mut acc = [0.0f64; C];
                for (&k, &off) in self.kernel_y.iter().zip(self.offsets_y.iter()) {
                    let y = clamp_index(r as isize + off, rows);
                    let idx = y * row_len + c * C;
                    for (acc_val, &v) in acc.iter_mut().zip(&temp[idx..idx + C]) {
                        *acc_val += v * k;
                    }
                }

                for (out, &acc_val) in row_dst[c * C..(c + 1) * C].iter_mut().zip(acc.iter()) {
                    *out = T::from_f64_truncated(acc_val);
                }
            }
        });
    }
}

/// Apply a separable filter with execution strategy control.
///
/// # Arguments
///
/// * `src` - The source image with shape (H, W, C).
/// * `dst` - The destination image with shape (H, W, C).
/// * `kernel_x` - The horizontal kernel.
/// * `kernel_y` - The vertical kernel.
/// * `strategy` - Execution strategy: `Serial`, `Parallel`, or `Auto`.
///
/// # Errors
///
/// Returns an error if a kernel is empty or if the image sizes differ.
pub fn separable_filter_with_strategy<T: PixelValue, const C: usize>(
    src: &Image<T, C>,
    dst: &mut Image<T, C>,
    kernel_x: &[f64],
    kernel_y: &[f64],
    strategy: ExecutionStrategy,
) -> Result<(), ImageError> {
    if kernel_x.is_empty() || kernel_y.is_empty() {
        return Err(ImageError::InvalidKernelLength(0));
    }

    if src.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            src.cols(),
            src.rows(),
            dst.cols(),
            dst.rows(),
        ));
    }

    let filter = SeparableFilter::new(kernel_x, kernel_y);
    filter.apply(src, dst, strategy);

    Ok(())
}

/// Apply a separable filter to an image.
///
/// Out-of-range taps are clamped to the nearest edge pixel.
/// Uses `ExecutionStrategy::Auto`; for explicit control, use [`separable_filter_with_strategy`].
///
/// # Arguments
///
/// * `src` - The source image with shape (H, W, C).
/// * `dst` - The destination image with shape (H, W, C).
/// * `kernel_x` - The horizontal kernel.
/// * `kernel_y` - The vertical kernel.
pub fn separable_filter<T: PixelValue, const C: usize>(
    src: &Image<T, C>,
    dst: &mut Image<T, C>,
    kernel_x: &[f64],
    kernel_y: &[f64],
) -> Result<(), ImageError> {
    separable_filter_with_strategy(src, dst, kernel_x, kernel_y, ExecutionStrategy::Auto)
}
