/// Create a box blur kernel.
///
/// The weights are all one; box filters divide by the kernel length when the
/// window sum is narrowed back to a pixel.
///
/// # Arguments
///
/// * `kernel_size` - The size of the kernel.
///
/// # Returns
///
/// A vector of the kernel.
pub fn box_blur_kernel_1d(kernel_size: usize) -> Vec<f64> {
    vec![1.0; kernel_size]
}

/// Default gaussian kernel length for a sigma, covering three sigmas on each side.
pub fn gaussian_kernel_size(sigma: f64) -> usize {
    2 * (3.0 * sigma).ceil().max(0.0) as usize + 1
}

/// Create a gaussian blur kernel.
///
/// # Arguments
///
/// * `kernel_size` - The size of the kernel.
/// * `sigma` - The sigma of the gaussian kernel.
///
/// # Returns
///
/// A vector of the kernel, normalized to sum to one.
pub fn gaussian_kernel_1d(kernel_size: usize, sigma: f64) -> Vec<f64> {
    let mut kernel = Vec::with_capacity(kernel_size);

    let mean = kernel_size.saturating_sub(1) as f64 / 2.0;
    let sigma_sq = sigma * sigma;

    // compute the kernel
    for i in 0..kernel_size {
        let x = i as f64 - mean;
        kernel.push((-(x * x) / (2.0 * sigma_sq)).exp());
    }

    // normalize the kernel
    let norm = kernel.iter().sum::<f64>();
    kernel.iter_mut().for_each(|k| *k /= norm);
    kernel
}

/// Compute the box lengths of a multi-pass box blur approximating a gaussian.
///
/// Convolving `passes` boxes of odd lengths `w_i` yields a kernel of variance
/// `sum((w_i^2 - 1) / 12)`. The lengths are split between the two odd widths
/// around the ideal width so that this variance is as close as possible to `sigma^2`.
///
/// # Arguments
///
/// * `sigma` - The sigma of the target gaussian.
/// * `passes` - The number of box passes.
///
/// # Returns
///
/// The box lengths, smaller ones first. Empty if `passes` is zero.
pub fn box_blur_fast_kernels_1d(sigma: f64, passes: usize) -> Vec<usize> {
    if passes == 0 {
        return Vec::new();
    }

    let n = passes as f64;
    let variance = 12.0 * sigma * sigma;

    let ideal_width = (variance / n + 1.0).sqrt();
    let mut lower_width = ideal_width.floor().max(1.0) as usize;
    if lower_width % 2 == 0 {
        lower_width -= 1;
    }
    let upper_width = lower_width + 2;

    let wl = lower_width as f64;
    let num_lower = ((variance - n * wl * wl - 4.0 * n * wl - 3.0 * n) / (-4.0 * wl - 4.0))
        .round()
        .clamp(0.0, n) as usize;

    (0..passes)
        .map(|i| {
            if i < num_lower {
                lower_width
            } else {
                upper_width
            }
        })
        .collect()
}
