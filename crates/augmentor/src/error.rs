use augmentor_image::ImageError;

/// An error type for the augmentation operations.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum AugmentError {
    /// A parameter outside its documented domain, e.g. a probability above one.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A region that does not fit inside the image.
    #[error("Out of bounds: {0}")]
    OutOfBounds(String),

    /// A parameter that would produce an empty or undefined transform.
    #[error("Degenerate parameter: {0}")]
    DegenerateParameter(String),

    /// Any other error raised by the image layer.
    #[error(transparent)]
    Image(ImageError),
}

impl From<ImageError> for AugmentError {
    fn from(err: ImageError) -> Self {
        match err {
            ImageError::CropOutOfBounds { .. } | ImageError::PixelIndexOutOfBounds(..) => {
                AugmentError::OutOfBounds(err.to_string())
            }
            ImageError::ZeroSizedImage(..)
            | ImageError::ImageTooLarge(..)
            | ImageError::InvalidKernelLength(_)
            | ImageError::InvalidSigma(_) => AugmentError::DegenerateParameter(err.to_string()),
            err => AugmentError::Image(err),
        }
    }
}
