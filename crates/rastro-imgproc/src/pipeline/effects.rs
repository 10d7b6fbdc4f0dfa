use rastro_image::{Image, ImageError};

use crate::color::{gray_from_rgb_u8, rgb_from_gray};
use crate::core::bitwise_and;
use crate::enhance::{adjust_brightness_contrast, blend};
use crate::filter::median_blur;
use crate::threshold::adaptive_threshold_mean;

/// Median neighborhood used to flatten colors before extracting edges.
pub const CARTOON_MEDIAN_SIZE: usize = 5;

/// Adaptive threshold block used to extract the cartoon outlines.
pub const CARTOON_BLOCK_SIZE: usize = 9;

/// Adjust brightness and contrast of `src1`, then blend it over `src2`.
///
/// # Arguments
///
/// * `src1` - The image that receives the brightness/contrast adjustment.
/// * `src2` - The image blended underneath.
/// * `brightness` - Offset added to every sample of `src1`.
/// * `contrast` - Contrast of `src1` in percent, greater than -100.
/// * `alpha` - Weight of the adjusted `src1` in the blend, in `[0, 1]`.
///
/// # Errors
///
/// Returns an error if the images differ in size or any parameter is out of range.
pub fn watercolor<const C: usize>(
    src1: &Image<u8, C>,
    src2: &Image<u8, C>,
    brightness: f32,
    contrast: f32,
    alpha: f32,
) -> Result<Image<u8, C>, ImageError> {
    if src1.size() != src2.size() {
        return Err(ImageError::InvalidImageSize(
            src1.cols(),
            src1.rows(),
            src2.cols(),
            src2.rows(),
        ));
    }

    let adjusted = adjust_brightness_contrast(src1, brightness, contrast)?;
    blend(&adjusted, src2, alpha)
}

/// Stylize an RGB image as a cartoon.
///
/// The image is converted to gray, median filtered with a
/// [`CARTOON_MEDIAN_SIZE`] window and binarized with an adaptive mean
/// threshold over [`CARTOON_BLOCK_SIZE`] blocks using `threshold` as the
/// constant. The resulting mask keeps the original colors in flat regions and
/// blacks out the outlines.
///
/// # Errors
///
/// Returns an error if `threshold` is not finite.
pub fn cartoon(src: &Image<u8, 3>, threshold: f32) -> Result<Image<u8, 3>, ImageError> {
    let gray = gray_from_rgb_u8(src)?;
    let smooth = median_blur(&gray, CARTOON_MEDIAN_SIZE)?;
    let edges = adaptive_threshold_mean(&smooth, CARTOON_BLOCK_SIZE, threshold)?;
    let mask = rgb_from_gray(&edges)?;
    bitwise_and(src, &mask)
}

#[cfg(test)]
mod tests {
    use rastro_image::{Image, ImageError};

    #[test]
    fn watercolor_neutral() -> Result<(), ImageError> {
        let a = Image::<u8, 3>::from_size_fn([4, 4].into(), |x, y, c| (x * 60 + y * 3 + c) as u8)?;
        let b = Image::<u8, 3>::from_size_val(a.size(), 9)?;

        // no adjustment and full weight returns the first image
        assert_eq!(super::watercolor(&a, &b, 0.0, 0.0, 1.0)?, a);

        let out = super::watercolor(&a, &b, 10.0, 0.0, 0.5)?;
        // (0 + 10) * 0.5 + 9 * 0.5
        assert_eq!(out.get(0, 0, 0)?, 10);

        Ok(())
    }

    #[test]
    fn watercolor_shape_mismatch() -> Result<(), ImageError> {
        let a = Image::<u8, 3>::from_size_val([4, 4].into(), 0)?;
        let b = Image::<u8, 3>::from_size_val([4, 5].into(), 0)?;
        assert_eq!(
            super::watercolor(&a, &b, 0.0, 0.0, 0.5),
            Err(ImageError::InvalidImageSize(4, 4, 4, 5))
        );
        Ok(())
    }

    #[test]
    fn cartoon_uniform_has_no_edges() -> Result<(), ImageError> {
        let image = Image::<u8, 3>::from_size_fn([20, 16].into(), |_, _, c| [180, 90, 30][c])?;
        let out = super::cartoon(&image, 5.0)?;
        assert_eq!(out, image);
        Ok(())
    }

    #[test]
    fn cartoon_outlines_dark_stroke() -> Result<(), ImageError> {
        // a dark vertical stroke on a bright background
        let image = Image::<u8, 3>::from_size_fn([24, 12].into(), |x, _, _| {
            if (10..14).contains(&x) {
                40
            } else {
                220
            }
        })?;

        let out = super::cartoon(&image, 5.0)?;

        // far from the stroke the colors are kept
        assert_eq!(out.get(0, 6, 0)?, 220);
        assert_eq!(out.get(23, 6, 1)?, 220);
        // inside the stroke the mask is black
        assert_eq!(out.get(11, 6, 0)?, 0);

        Ok(())
    }
}
