use augmentor_image::{Image, PixelValue};

/// Kernel for bilinear interpolation
///
/// # Arguments
///
/// * `image` - The input image container.
/// * `u` - The x coordinate of the pixel to interpolate.
/// * `v` - The y coordinate of the pixel to interpolate.
///
/// # Returns
///
/// The interpolated pixel values, truncated to the channel type.
pub(crate) fn bilinear_interpolation<T: PixelValue, const C: usize>(
    image: &Image<T, C>,
    u: f64,
    v: f64,
) -> [T; C] {
    let (rows, cols) = (image.rows(), image.cols());

    let u = u.clamp(0.0, (cols - 1) as f64);
    let v = v.clamp(0.0, (rows - 1) as f64);

    let iu0 = (u.trunc() as usize).min(cols - 1);
    let iv0 = (v.trunc() as usize).min(rows - 1);
    let iu1 = (iu0 + 1).min(cols - 1);
    let iv1 = (iv0 + 1).min(rows - 1);

    let frac_u = u.fract();
    let frac_v = v.fract();

    let w00 = (1.0 - frac_u) * (1.0 - frac_v);
    let w01 = frac_u * (1.0 - frac_v);
    let w10 = (1.0 - frac_u) * frac_v;
    let w11 = frac_u * frac_v;

    let data = image.as_slice();
    let p00 = &data[(iv0 * cols + iu0) * C..][..C];
    let p01 = &data[(iv0 * cols + iu1) * C..][..C];
    let p10 = &data[(iv1 * cols + iu0) * C..][..C];
    let p11 = &data[(iv1 * cols + iu1) * C..][..C];

    let mut pixel = [T::zero(); C];
    for (k, out) in pixel.iter_mut().enumerate() {
        let (a, b, c, d): (f64, f64, f64, f64) =
            (p00[k].into(), p01[k].into(), p10[k].into(), p11[k].into());
        *out = T::from_f64_truncated(a * w00 + b * w01 + c * w10 + d * w11);
    }

    pixel
}
