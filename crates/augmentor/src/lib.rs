#![deny(missing_docs)]
//! Randomized, composable image augmentation operations.
//!
//! Every operation owns a probability [`Gate`] and draws its random parameters
//! from seeded generators, so a given seed reproduces the same sequence of
//! outcomes. A skipped operation returns its input unchanged.
//!
//! ```
//! use augmentor::image::Image;
//! use augmentor::geometric::{Flip, FlipType};
//! use augmentor::{Gate, Operation};
//!
//! let image = Image::<u8, 1>::new([2, 2].into(), vec![1, 2, 3, 4]).unwrap();
//!
//! let mut flip = Flip::new(FlipType::Horizontal).with_gate(Gate::new(1.0, 42).unwrap());
//! let flipped = flip.perform(image).unwrap();
//!
//! assert_eq!(flipped.as_slice(), &[2, 1, 4, 3]);
//! ```

#[doc(inline)]
pub use augmentor_image as image;

#[doc(inline)]
pub use augmentor_imgproc as imgproc;

/// The closed set of operations and pipelines over it.
pub mod augmentation;

pub mod blur;

/// Error types for the augmentation operations.
pub mod error;

pub mod geometric;

/// The probability gate and the operation contract.
pub mod operation;

pub mod random;

pub use crate::augmentation::{perform_all, Augmentation};
pub use crate::error::AugmentError;
pub use crate::operation::{Gate, Operation, Performed};
