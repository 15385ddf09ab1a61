use std::f64::consts::PI;

use augmentor_image::{Image, ImageError, PixelValue};
use rayon::prelude::*;

/// Inverts a 2x3 affine transformation matrix.
///
/// Arguments:
///
/// * `m` - The 2x3 affine transformation matrix.
///
/// Returns:
///
/// The inverted 2x3 affine transformation matrix. A singular matrix inverts to zeros.
pub fn invert_affine_transform(m: &[f64; 6]) -> [f64; 6] {
    let (a, b, c, d, e, f) = (m[0], m[1], m[2], m[3], m[4], m[5]);

    let determinant = a * e - b * d;
    let inv_determinant = if determinant != 0.0 {
        1.0 / determinant
    } else {
        0.0
    };

    let new_a = e * inv_determinant;
    let new_b = -b * inv_determinant;
    let new_d = -d * inv_determinant;
    let new_e = a * inv_determinant;
    let new_c = -(new_a * c + new_b * f);
    let new_f = -(new_d * c + new_e * f);

    [new_a, new_b, new_c, new_d, new_e, new_f]
}

/// Returns a 2x3 rotation matrix for a 2D rotation around a center point.
///
/// The rotation matrix is defined as:
///
/// | alpha  beta  tx |
/// | -beta  alpha ty |
///
/// where:
///
/// alpha = cos(angle)
/// beta = sin(angle)
/// tx = (1 - alpha) * center.x - beta * center.y
/// ty = beta * center.x + (1 - alpha) * center.y
///
/// # Arguments
///
/// * `center` - The center point of the rotation.
/// * `angle` - The angle of rotation in degrees.
///
/// # Example
///
/// ```
/// use augmentor_imgproc::warp::get_rotation_matrix2d;
///
/// let m = get_rotation_matrix2d((0.0, 0.0), 0.0);
/// assert_eq!(m, [1.0, 0.0, 0.0, -0.0, 1.0, 0.0]);
/// ```
pub fn get_rotation_matrix2d(center: (f64, f64), angle: f64) -> [f64; 6] {
    let angle = angle * PI / 180.0;
    let alpha = angle.cos();
    let beta = angle.sin();

    let tx = (1.0 - alpha) * center.0 - beta * center.1;
    let ty = beta * center.0 + (1.0 - alpha) * center.1;

    [alpha, beta, tx, -beta, alpha, ty]
}

/// Applies an affine transformation to a point.
fn transform_point(x: f64, y: f64, m: &[f64; 6]) -> (f64, f64) {
    let u = m[0] * x + m[1] * y + m[2];
    let v = m[3] * x + m[4] * y + m[5];
    (u, v)
}

/// Applies an affine transformation to an image with nearest neighbor sampling.
///
/// Every destination pixel is mapped back through the inverse of `m` and takes
/// the value of the source pixel at the rounded position. Destination pixels
/// whose source position falls outside the image are set to `T::default()`.
///
/// # Arguments
///
/// * `src` - The input image with shape (height, width, channels).
/// * `dst` - The output image with shape (height, width, channels).
/// * `m` - The 2x3 affine transformation matrix, mapping source to destination.
///
/// # Example
///
/// ```
/// use augmentor_image::Image;
/// use augmentor_imgproc::warp::warp_affine_nearest;
///
/// let src = Image::<u8, 1>::new([3, 1].into(), vec![1, 2, 3]).unwrap();
/// let mut dst = Image::<u8, 1>::from_size_val(src.size(), 0).unwrap();
///
/// // shift one pixel to the right
/// warp_affine_nearest(&src, &mut dst, &[1.0, 0.0, 1.0, 0.0, 1.0, 0.0]).unwrap();
///
/// assert_eq!(dst.as_slice(), &[0, 1, 2]);
/// ```
pub fn warp_affine_nearest<T: PixelValue, const C: usize>(
    src: &Image<T, C>,
    dst: &mut Image<T, C>,
    m: &[f64; 6],
) -> Result<(), ImageError> {
    let m_inv = invert_affine_transform(m);
    let (src_cols, src_rows) = (src.cols() as f64, src.rows() as f64);
    let src_data = src.as_slice();
    let dst_cols = dst.cols();

    dst.as_slice_mut()
        .par_chunks_exact_mut(dst_cols * C)
        .enumerate()
        .for_each(|(y, row)| {
            for (x, out) in row.chunks_exact_mut(C).enumerate() {
                let (u, v) = transform_point(x as f64, y as f64, &m_inv);
                let (u, v) = (u.round(), v.round());

                if u >= 0.0 && u < src_cols && v >= 0.0 && v < src_rows {
                    let base = (v as usize * src.cols() + u as usize) * C;
                    out.copy_from_slice(&src_data[base..base + C]);
                } else {
                    out.fill(T::default());
                }
            }
        });

    Ok(())
}
