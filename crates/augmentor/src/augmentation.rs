use augmentor_image::{Image, PixelValue};

use crate::blur::{BoxBlur, FastGaussianBlur, GaussianBlur};
use crate::error::AugmentError;
use crate::geometric::{Crop, Flip, Invert, RandomErase, Resize, Rotate, Zoom};
use crate::operation::{Gate, Operation};

/// Any of the augmentation operations.
///
/// A sequence of `Augmentation` values is a pipeline: see [`perform_all`].
#[derive(Debug, Clone)]
pub enum Augmentation {
    /// See [`Resize`].
    Resize(Resize),
    /// See [`Crop`].
    Crop(Crop),
    /// See [`Rotate`].
    Rotate(Rotate),
    /// See [`Zoom`].
    Zoom(Zoom),
    /// See [`Flip`].
    Flip(Flip),
    /// See [`Invert`].
    Invert(Invert),
    /// See [`RandomErase`].
    RandomErase(RandomErase),
    /// See [`GaussianBlur`].
    GaussianBlur(GaussianBlur),
    /// See [`BoxBlur`].
    BoxBlur(BoxBlur),
    /// See [`FastGaussianBlur`].
    FastGaussianBlur(FastGaussianBlur),
}

macro_rules! dispatch {
    ($self:expr, $op:ident => $body:expr) => {
        match $self {
            Augmentation::Resize($op) => $body,
            Augmentation::Crop($op) => $body,
            Augmentation::Rotate($op) => $body,
            Augmentation::Zoom($op) => $body,
            Augmentation::Flip($op) => $body,
            Augmentation::Invert($op) => $body,
            Augmentation::RandomErase($op) => $body,
            Augmentation::GaussianBlur($op) => $body,
            Augmentation::BoxBlur($op) => $body,
            Augmentation::FastGaussianBlur($op) => $body,
        }
    };
}

impl Operation for Augmentation {
    fn name(&self) -> &'static str {
        dispatch!(self, op => op.name())
    }

    fn gate(&self) -> &Gate {
        dispatch!(self, op => op.gate())
    }

    fn gate_mut(&mut self) -> &mut Gate {
        dispatch!(self, op => op.gate_mut())
    }

    fn reseed(&mut self, seed: u64) {
        dispatch!(self, op => op.reseed(seed))
    }

    fn apply<T: PixelValue, const C: usize>(
        &mut self,
        image: Image<T, C>,
    ) -> Result<Image<T, C>, AugmentError> {
        dispatch!(self, op => op.apply(image))
    }
}

macro_rules! impl_from {
    ($($variant:ident),*) => {
        $(
            impl From<$variant> for Augmentation {
                fn from(op: $variant) -> Self {
                    Augmentation::$variant(op)
                }
            }
        )*
    };
}

impl_from!(
    Resize,
    Crop,
    Rotate,
    Zoom,
    Flip,
    Invert,
    RandomErase,
    GaussianBlur,
    BoxBlur,
    FastGaussianBlur
);

/// Run an image through every operation of a pipeline, in order.
///
/// Each operation runs its own gate; a skipped operation passes the image on unchanged.
pub fn perform_all<T: PixelValue, const C: usize>(
    pipeline: &mut [Augmentation],
    image: Image<T, C>,
) -> Result<Image<T, C>, AugmentError> {
    pipeline
        .iter_mut()
        .try_fold(image, |image, op| op.perform(image))
}
