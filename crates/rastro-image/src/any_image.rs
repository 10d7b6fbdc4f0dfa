use crate::error::ImageError;
use crate::image::{Image, ImageSize};

/// An 8-bit image whose channel count is only known at runtime.
///
/// Decoded files and user selections arrive without a compile-time channel
/// count, so callers hold either a single channel gray image or a three
/// channel RGB image.
///
/// # Examples
///
/// ```
/// use rastro_image::{AnyImage, Image};
///
/// let gray = Image::<u8, 1>::from_size_val([4, 3].into(), 128).unwrap();
/// let image = AnyImage::from(gray);
///
/// assert_eq!(image.num_channels(), 1);
/// assert_eq!(image.size().width, 4);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub enum AnyImage {
    /// Single channel image.
    Gray(Image<u8, 1>),
    /// Three channel image in RGB order.
    Rgb(Image<u8, 3>),
}

impl AnyImage {
    /// Build an image from raw decoded data with the given channel count.
    ///
    /// # Errors
    ///
    /// Returns an error if `channels` is not 1 or 3, or if the data length
    /// does not match the size.
    pub fn from_raw(size: ImageSize, channels: usize, data: Vec<u8>) -> Result<Self, ImageError> {
        match channels {
            1 => Ok(AnyImage::Gray(Image::new(size, data)?)),
            3 => Ok(AnyImage::Rgb(Image::new(size, data)?)),
            n => Err(ImageError::UnsupportedChannelCount("from_raw", n)),
        }
    }

    /// Get the size of the image in pixels.
    pub fn size(&self) -> ImageSize {
        match self {
            AnyImage::Gray(img) => img.size(),
            AnyImage::Rgb(img) => img.size(),
        }
    }

    /// Get the number of channels in the image.
    pub fn num_channels(&self) -> usize {
        match self {
            AnyImage::Gray(_) => 1,
            AnyImage::Rgb(_) => 3,
        }
    }

    /// Get the value of a pixel channel.
    pub fn get(&self, x: usize, y: usize, ch: usize) -> Result<u8, ImageError> {
        match self {
            AnyImage::Gray(img) => img.get(x, y, ch),
            AnyImage::Rgb(img) => img.get(x, y, ch),
        }
    }

    /// Get the pixel data as a flat slice.
    pub fn as_slice(&self) -> &[u8] {
        match self {
            AnyImage::Gray(img) => img.as_slice(),
            AnyImage::Rgb(img) => img.as_slice(),
        }
    }
}

impl From<Image<u8, 1>> for AnyImage {
    fn from(image: Image<u8, 1>) -> Self {
        AnyImage::Gray(image)
    }
}

impl From<Image<u8, 3>> for AnyImage {
    fn from(image: Image<u8, 3>) -> Self {
        AnyImage::Rgb(image)
    }
}
