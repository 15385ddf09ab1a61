/// An error type for the image and image processing crates.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ImageError {
    /// Error when channel and shape are not valid.
    #[error("Data length ({0}) does not match the image size ({1})")]
    InvalidChannelShape(usize, usize),

    /// Error when an image has a zero dimension.
    #[error("Image size must be non-zero, got {0}x{1}")]
    ZeroSizedImage(usize, usize),

    /// Error when the number of channel values of an image overflows `usize`.
    #[error("Image size {0}x{1} is too large to address")]
    ImageTooLarge(usize, usize),

    /// Error when two image sizes that must match do not.
    #[error("Image size ({0}x{1}) does not match the expected size ({2}x{3})")]
    InvalidImageSize(usize, usize, usize, usize),

    /// Error when a pixel coordinate lies outside the image.
    #[error("Pixel index ({0}, {1}) is out of bounds ({2}x{3})")]
    PixelIndexOutOfBounds(usize, usize, usize, usize),

    /// Error when a crop rectangle does not fit inside the source image.
    #[error("Crop of {width}x{height} at ({x}, {y}) exceeds the source image ({src_width}x{src_height})")]
    CropOutOfBounds {
        /// Left offset of the crop.
        x: usize,
        /// Top offset of the crop.
        y: usize,
        /// Width of the crop.
        width: usize,
        /// Height of the crop.
        height: usize,
        /// Width of the source image.
        src_width: usize,
        /// Height of the source image.
        src_height: usize,
    },

    /// Error when a filter kernel is empty.
    #[error("Invalid kernel length: {0}")]
    InvalidKernelLength(usize),

    /// Error when a gaussian sigma is not strictly positive.
    #[error("Invalid sigma: {0}")]
    InvalidSigma(f64),
}
