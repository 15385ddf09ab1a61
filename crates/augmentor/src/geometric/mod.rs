//! Operations that reshape or recolor pixels.

use augmentor_image::ImageSize;

mod crop;
pub use crop::{Crop, CropMode};

mod erase;
pub use erase::RandomErase;

mod flip;
pub use flip::{Flip, FlipType};

mod invert;
pub use invert::Invert;

mod resize;
pub use resize::Resize;

mod rotate;
pub use rotate::{Rotate, RotateRange};

mod zoom;
pub use zoom::{Zoom, ZoomFactor};

// Interpolate both dimensions with the same factor, truncating.
pub(crate) fn interpolate_size(lower: ImageSize, upper: ImageSize, factor: f64) -> ImageSize {
    let lerp = |l: usize, u: usize| (l as f64 + factor * (u as f64 - l as f64)).trunc() as usize;
    ImageSize {
        width: lerp(lower.width, upper.width),
        height: lerp(lower.height, upper.height),
    }
}
