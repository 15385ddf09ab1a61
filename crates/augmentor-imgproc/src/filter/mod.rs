//! Filter operations
//!
//! All filters use a clamp-to-edge boundary: a kernel tap that falls outside
//! the image samples the nearest pixel inside it.

/// Filter kernels
pub mod kernels;

/// Sliding-window box accumulation
mod box_filter;
pub use box_filter::*;

/// Filter operations
mod ops;
pub use ops::*;

/// Separable filter operations
mod separable_filter;
pub use separable_filter::*;
