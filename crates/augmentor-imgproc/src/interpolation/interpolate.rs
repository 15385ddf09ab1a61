use super::bilinear::bilinear_interpolation;
use super::nearest::nearest_neighbor_interpolation;
use augmentor_image::{Image, PixelValue};

/// Interpolation mode for the resize operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InterpolationMode {
    /// Nearest neighbor interpolation
    #[default]
    Nearest,
    /// Bilinear interpolation
    Bilinear,
}

/// Kernel for interpolating a pixel value
///
/// # Arguments
///
/// * `image` - The input image container with shape (height, width, C).
/// * `u` - The x coordinate of the pixel to interpolate.
/// * `v` - The y coordinate of the pixel to interpolate.
/// * `interpolation` - The interpolation mode to use.
///
/// # Returns
///
/// The interpolated pixel values.
pub fn interpolate_pixel<T: PixelValue, const C: usize>(
    image: &Image<T, C>,
    u: f64,
    v: f64,
    interpolation: InterpolationMode,
) -> [T; C] {
    match interpolation {
        InterpolationMode::Bilinear => bilinear_interpolation(image, u, v),
        InterpolationMode::Nearest => nearest_neighbor_interpolation(image, u, v),
    }
}
