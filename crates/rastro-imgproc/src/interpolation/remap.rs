use crate::parallel;

use super::interpolate::interpolate_pixel;
use super::InterpolationMode;
use rastro_image::{Image, ImageDtype, ImageError, ImageSize};

// tolerance for coordinates that land just before the first row or column
// because of floating point error in the inverse transform
const BORDER_EPS: f32 = 1e-3;

/// Apply generic geometric transformation to an image.
///
/// Every destination pixel is sampled from the source at the coordinate
/// stored in `map_x` / `map_y`. Coordinates falling outside the source
/// produce zero pixels.
///
/// # Arguments
///
/// * `src` - The input image container with shape (height, width, C).
/// * `map_x` - The x coordinates of the pixels to interpolate.
/// * `map_y` - The y coordinates of the pixels to interpolate.
/// * `dst_size` - The size of the output image.
/// * `interpolation` - The interpolation mode to use.
///
/// # Errors
///
/// * The map_x and map_y must have the same length.
/// * The maps must hold one coordinate per output pixel.
pub fn remap<T: ImageDtype, const C: usize>(
    src: &Image<T, C>,
    map_x: &[f32],
    map_y: &[f32],
    dst_size: ImageSize,
    interpolation: InterpolationMode,
) -> Result<Image<T, C>, ImageError> {
    let num_pixels = dst_size.width * dst_size.height;
    if map_x.len() != num_pixels || map_y.len() != num_pixels {
        return Err(ImageError::InvalidChannelShape(
            map_x.len().max(map_y.len()),
            num_pixels,
        ));
    }

    let mut dst = Image::<T, C>::from_size_val(dst_size, T::default())?;

    if src.cols() == 0 || src.rows() == 0 {
        return Ok(dst);
    }

    let (cols, rows) = (src.cols() as f32, src.rows() as f32);

    // parallelize the remap operation by rows
    parallel::par_iter_rows_resample(&mut dst, map_x, map_y, |&x, &y, dst_pixel| {
        // check if the position is within the bounds of the src image
        if x > -BORDER_EPS && x < cols && y > -BORDER_EPS && y < rows {
            let pixel = interpolate_pixel(src, x.max(0.0), y.max(0.0), interpolation);
            dst_pixel
                .iter_mut()
                .zip(pixel.iter())
                .for_each(|(d, &p)| *d = T::from_f32(p));
        }
    });

    Ok(dst)
}
