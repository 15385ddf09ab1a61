//! Pixel interpolation methods for image transformations.
//!
//! Sampling coordinates are continuous `(u, v)` positions in source pixels,
//! where integer values are pixel centers. Samples outside the image are
//! clamped to the nearest edge pixel.
//!
//! # Interpolation Modes
//!
//! - **Nearest**: uses the nearest pixel value (no interpolation)
//! - **Bilinear**: linear interpolation between the four adjacent pixels

mod bilinear;
mod nearest;

pub(crate) mod interpolate;

pub use interpolate::{interpolate_pixel, InterpolationMode};
