use crate::interpolation::{grid::meshgrid_from_fn, remap, InterpolationMode};
use rastro_image::{Image, ImageDtype, ImageError, ImageSize};

/// Resize an image to a new size.
///
/// The function resizes an image to a new size using the specified interpolation mode.
/// Horizontal and vertical scale factors are independent. Pixel centres are
/// aligned, i.e. the destination pixel `x` samples the source at
/// `(x + 0.5) * width / new_width - 0.5`, clamped to the source extent.
///
/// # Arguments
///
/// * `src` - The input image container.
/// * `new_size` - The size of the output image.
/// * `interpolation` - The interpolation mode to use.
///
/// # Errors
///
/// Returns [`ImageError::InvalidImageDimensions`] if the new size or the source has a zero dimension.
///
/// # Example
///
/// ```
/// use rastro_image::{Image, ImageSize};
/// use rastro_imgproc::interpolation::InterpolationMode;
/// use rastro_imgproc::resize::resize_native;
///
/// let image = Image::<u8, 3>::from_size_val([4, 5].into(), 128).unwrap();
///
/// let resized = resize_native(
///     &image,
///     ImageSize { width: 2, height: 3 },
///     InterpolationMode::Bilinear,
/// )
/// .unwrap();
///
/// assert_eq!(resized.size().width, 2);
/// assert_eq!(resized.size().height, 3);
/// assert!(resized.as_slice().iter().all(|&v| v == 128));
/// ```
pub fn resize_native<T: ImageDtype, const C: usize>(
    src: &Image<T, C>,
    new_size: ImageSize,
    interpolation: InterpolationMode,
) -> Result<Image<T, C>, ImageError> {
    if new_size.width == 0 || new_size.height == 0 {
        return Err(ImageError::InvalidImageDimensions(
            new_size.width as i64,
            new_size.height as i64,
        ));
    }

    if src.width() == 0 || src.height() == 0 {
        return Err(ImageError::InvalidImageDimensions(
            src.width() as i64,
            src.height() as i64,
        ));
    }

    // shortcut: nothing to resample
    if new_size == src.size() {
        return Ok(src.clone());
    }

    let scale_x = src.width() as f32 / new_size.width as f32;
    let scale_y = src.height() as f32 / new_size.height as f32;
    let (max_x, max_y) = ((src.width() - 1) as f32, (src.height() - 1) as f32);

    let (map_x, map_y) = meshgrid_from_fn(new_size.width, new_size.height, |x, y| {
        let u = ((x as f32 + 0.5) * scale_x - 0.5).clamp(0.0, max_x);
        let v = ((y as f32 + 0.5) * scale_y - 0.5).clamp(0.0, max_y);
        (u, v)
    });

    remap(src, &map_x, &map_y, new_size, interpolation)
}
