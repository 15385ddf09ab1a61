use num_traits::{Bounded, NumCast};

use crate::error::ImageError;

/// Image size in pixels
///
/// A struct to represent the size of an image in pixels.
///
/// # Examples
///
/// ```
/// use augmentor_image::ImageSize;
///
/// let image_size = ImageSize {
///   width: 10,
///   height: 20,
/// };
///
/// assert_eq!(image_size.width, 10);
/// assert_eq!(image_size.height, 20);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ImageSize {
    /// Width of the image in pixels
    pub width: usize,
    /// Height of the image in pixels
    pub height: usize,
}

impl ImageSize {
    /// Returns true if either dimension is zero.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

impl std::fmt::Display for ImageSize {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "ImageSize {{ width: {}, height: {} }}",
            self.width, self.height
        )
    }
}

impl From<[usize; 2]> for ImageSize {
    fn from(size: [usize; 2]) -> Self {
        ImageSize {
            width: size[0],
            height: size[1],
        }
    }
}

// distance to the nearest integer, in units of `f64::EPSILON * |x|`, under which a
// weighted sum is snapped to it before truncation.
const SNAP_ULPS: f64 = 64.0;

/// Trait for fixed-width unsigned channel values.
///
/// Sums are widened to `u64` for box accumulation and to `f64` for weighted
/// convolution, then narrowed back by truncation.
pub trait PixelValue:
    num_traits::PrimInt
    + num_traits::Unsigned
    + Default
    + Into<u64>
    + Into<f64>
    + std::fmt::Debug
    + Send
    + Sync
    + 'static
{
    /// The largest representable channel value as `f64`.
    fn max_f64() -> f64 {
        <Self as Bounded>::max_value().into()
    }

    /// Narrow a wide integer, saturating at the channel maximum.
    fn from_u64_saturating(x: u64) -> Self {
        <Self as NumCast>::from(x).unwrap_or_else(<Self as Bounded>::max_value)
    }

    /// Narrow a weighted sum by truncation towards zero.
    ///
    /// A sum within a few ulps of an integer is snapped to it first, so a
    /// normalized kernel applied to a constant field reproduces the constant.
    /// Any larger fractional part is dropped, whatever the magnitude of `x`.
    fn from_f64_truncated(x: f64) -> Self {
        let snapped = x.round();
        let tolerance = SNAP_ULPS * f64::EPSILON * x.abs().max(1.0);
        let value = if (x - snapped).abs() <= tolerance {
            snapped
        } else {
            x.trunc()
        };
        <Self as NumCast>::from(value.clamp(0.0, Self::max_f64())).unwrap_or_default()
    }
}

impl PixelValue for u8 {}
impl PixelValue for u16 {}
impl PixelValue for u32 {}

/// Represents an image with pixel data.
///
/// The pixels are stored row-major with interleaved channels, i.e. with shape
/// (H, W, C), where `C` is the pixel width.
#[derive(Clone, Debug, PartialEq)]
pub struct Image<T, const CHANNELS: usize> {
    size: ImageSize,
    data: Vec<T>,
}

impl<T, const CHANNELS: usize> Image<T, CHANNELS> {
    /// Create a new image from pixel data.
    ///
    /// # Arguments
    ///
    /// * `size` - The size of the image in pixels.
    /// * `data` - The pixel data of the image.
    ///
    /// # Returns
    ///
    /// A new image with the given pixel data.
    ///
    /// # Errors
    ///
    /// If the length of the pixel data does not match the image size, or if
    /// the size has a zero dimension, an error is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use augmentor_image::{Image, ImageSize};
    ///
    /// let image = Image::<u8, 3>::new(
    ///     ImageSize {
    ///         width: 10,
    ///         height: 20,
    ///     },
    ///     vec![0u8; 10 * 20 * 3],
    /// )
    /// .unwrap();
    ///
    /// assert_eq!(image.size().width, 10);
    /// assert_eq!(image.size().height, 20);
    /// assert_eq!(image.num_channels(), 3);
    /// ```
    pub fn new(size: ImageSize, data: Vec<T>) -> Result<Self, ImageError> {
        if size.is_empty() {
            return Err(ImageError::ZeroSizedImage(size.width, size.height));
        }

        // check if the data length matches the image size
        let len = Self::checked_len(size)?;
        if data.len() != len {
            return Err(ImageError::InvalidChannelShape(data.len(), len));
        }

        Ok(Self { size, data })
    }

    /// Create a new image with the given size and default pixel data.
    ///
    /// # Arguments
    ///
    /// * `size` - The size of the image in pixels.
    /// * `val` - The default value of the pixel data.
    ///
    /// # Examples
    ///
    /// ```
    /// use augmentor_image::{Image, ImageSize};
    ///
    /// let image = Image::<u8, 3>::from_size_val(
    ///     ImageSize {
    ///         width: 10,
    ///         height: 20,
    ///     },
    ///     0u8,
    /// )
    /// .unwrap();
    ///
    /// assert_eq!(image.size().width, 10);
    /// assert_eq!(image.size().height, 20);
    /// assert_eq!(image.num_channels(), 3);
    /// ```
    pub fn from_size_val(size: ImageSize, val: T) -> Result<Self, ImageError>
    where
        T: Clone,
    {
        if size.is_empty() {
            return Err(ImageError::ZeroSizedImage(size.width, size.height));
        }
        let data = vec![val; Self::checked_len(size)?];
        Image::new(size, data)
    }

    // number of channel values, if it fits in `usize`.
    fn checked_len(size: ImageSize) -> Result<usize, ImageError> {
        size.width
            .checked_mul(size.height)
            .and_then(|n| n.checked_mul(CHANNELS))
            .ok_or(ImageError::ImageTooLarge(size.width, size.height))
    }

    /// Get the size of the image in pixels.
    pub fn size(&self) -> ImageSize {
        self.size
    }

    /// Get the number of columns of the image.
    pub fn cols(&self) -> usize {
        self.width()
    }

    /// Get the number of rows of the image.
    pub fn rows(&self) -> usize {
        self.height()
    }

    /// Get the width of the image in pixels.
    pub fn width(&self) -> usize {
        self.size.width
    }

    /// Get the height of the image in pixels.
    pub fn height(&self) -> usize {
        self.size.height
    }

    /// Get the number of channels in the image.
    pub fn num_channels(&self) -> usize {
        CHANNELS
    }

    /// Get the pixel data as a flat slice.
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Get the pixel data as a flat mutable slice.
    pub fn as_slice_mut(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Consume the image and return its pixel data.
    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    /// Get a reference to a channel value at `[y, x, c]`, if in bounds.
    pub fn get(&self, index: [usize; 3]) -> Option<&T> {
        let [y, x, c] = index;
        if x >= self.width() || y >= self.height() || c >= CHANNELS {
            return None;
        }
        self.data.get((y * self.width() + x) * CHANNELS + c)
    }

    fn pixel_offset(&self, x: usize, y: usize) -> Result<usize, ImageError> {
        if x >= self.width() || y >= self.height() {
            return Err(ImageError::PixelIndexOutOfBounds(
                x,
                y,
                self.width(),
                self.height(),
            ));
        }
        Ok((y * self.width() + x) * CHANNELS)
    }

    /// Get the channel values of the pixel at `(x, y)`.
    ///
    /// # Errors
    ///
    /// If the coordinates are outside the image, an error is returned.
    pub fn get_pixel(&self, x: usize, y: usize) -> Result<[T; CHANNELS], ImageError>
    where
        T: Copy + Default,
    {
        let offset = self.pixel_offset(x, y)?;
        let mut pixel = [T::default(); CHANNELS];
        pixel.copy_from_slice(&self.data[offset..offset + CHANNELS]);
        Ok(pixel)
    }

    /// Set the channel values of the pixel at `(x, y)`.
    ///
    /// # Errors
    ///
    /// If the coordinates are outside the image, an error is returned.
    pub fn set_pixel(&mut self, x: usize, y: usize, pixel: [T; CHANNELS]) -> Result<(), ImageError>
    where
        T: Copy,
    {
        let offset = self.pixel_offset(x, y)?;
        self.data[offset..offset + CHANNELS].copy_from_slice(&pixel);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::image::{Image, ImageError, ImageSize, PixelValue};

    #[test]
    fn image_size() {
        let image_size = ImageSize {
            width: 10,
            height: 20,
        };
        assert_eq!(image_size.width, 10);
        assert_eq!(image_size.height, 20);
        assert!(!image_size.is_empty());
        assert!(ImageSize::from([0, 3]).is_empty());
    }

    #[test]
    fn image_smoke() -> Result<(), ImageError> {
        let image = Image::<u8, 3>::new(
            ImageSize {
                width: 10,
                height: 20,
            },
            vec![0u8; 10 * 20 * 3],
        )?;
        assert_eq!(image.size().width, 10);
        assert_eq!(image.size().height, 20);
        assert_eq!(image.num_channels(), 3);

        Ok(())
    }

    #[test]
    fn image_invalid_shape() {
        let res = Image::<u8, 3>::new([2, 2].into(), vec![0u8; 11]);
        assert_eq!(res, Err(ImageError::InvalidChannelShape(11, 12)));

        let res = Image::<u8, 1>::from_size_val([0, 4].into(), 0);
        assert_eq!(res, Err(ImageError::ZeroSizedImage(0, 4)));

        let res = Image::<u8, 3>::from_size_val([usize::MAX / 2, 2].into(), 0);
        assert_eq!(res, Err(ImageError::ImageTooLarge(usize::MAX / 2, 2)));

        let res = Image::<u8, 1>::new([usize::MAX, 2].into(), vec![0u8; 4]);
        assert_eq!(res, Err(ImageError::ImageTooLarge(usize::MAX, 2)));
    }

    #[test]
    fn image_get_set_pixel() -> Result<(), ImageError> {
        let mut image = Image::<u8, 2>::from_size_val([3, 2].into(), 0)?;
        image.set_pixel(2, 1, [7, 9])?;

        assert_eq!(image.get_pixel(2, 1)?, [7, 9]);
        assert_eq!(image.get([1, 2, 1]), Some(&9));
        assert_eq!(image.get([2, 1, 0]), None);
        assert_eq!(image.as_slice()[10..], [7, 9]);

        assert_eq!(
            image.get_pixel(3, 0),
            Err(ImageError::PixelIndexOutOfBounds(3, 0, 3, 2))
        );
        assert!(image.set_pixel(0, 2, [1, 1]).is_err());

        Ok(())
    }

    #[test]
    fn pixel_value_narrowing() {
        assert_eq!(u8::from_u64_saturating(300), 255);
        assert_eq!(u8::from_u64_saturating(42), 42);
        assert_eq!(u8::from_f64_truncated(41.7), 41);
        assert_eq!(u8::from_f64_truncated(100.0 - 1e-13), 100);
        assert_eq!(u8::from_f64_truncated(99.999_999_99), 99);
        assert_eq!(u8::from_f64_truncated(-3.0), 0);
        assert_eq!(u8::from_f64_truncated(1e9), 255);
        assert_eq!(u16::from_f64_truncated(f64::NAN), 0);
        assert_eq!(u16::max_f64(), 65535.0);
    }

    #[test]
    fn pixel_value_narrowing_wide_channels() {
        assert_eq!(u16::from_f64_truncated(60000.97), 60000);
        assert_eq!(u16::from_f64_truncated(65534.999), 65534);
        assert_eq!(u16::from_f64_truncated(60000.0 * (1.0 - 1e-15)), 60000);
        assert_eq!(u32::from_f64_truncated(3_000_000.6), 3_000_000);
        assert_eq!(u32::from_f64_truncated(4_000_000_000.5), 4_000_000_000);
        assert_eq!(u32::from_f64_truncated(1e12), u32::MAX);
    }
}
