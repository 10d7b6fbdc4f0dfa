use rastro_image::{Image, ImageDtype, ImageError};

use crate::parallel;

/// Performs weighted addition of two images `src1` and `src2` with weights `alpha`
/// and `beta`, and an optional scalar `gamma`. The formula used is:
///
/// dst(x,y,c) = (src1(x,y,c) * alpha + src2(x,y,c) * beta + gamma)
///
/// The sum is computed in floating point and converted back with
/// [`ImageDtype::from_f32`], so 8-bit results are rounded and saturated.
///
/// # Arguments
///
/// * `src1` - The first input image.
/// * `alpha` - Weight of the first image elements to be multiplied.
/// * `src2` - The second input image.
/// * `beta` - Weight of the second image elements to be multiplied.
/// * `gamma` - Scalar added to each sum.
///
/// # Returns
///
/// Returns a new `Image` where each element is computed as described above.
///
/// # Errors
///
/// Returns an error if the sizes of `src1` and `src2` do not match.
pub fn add_weighted<T: ImageDtype, const C: usize>(
    src1: &Image<T, C>,
    alpha: f32,
    src2: &Image<T, C>,
    beta: f32,
    gamma: f32,
) -> Result<Image<T, C>, ImageError> {
    if src1.size() != src2.size() {
        return Err(ImageError::InvalidImageSize(
            src1.cols(),
            src1.rows(),
            src2.cols(),
            src2.rows(),
        ));
    }

    let mut dst = Image::<T, C>::from_size_val(src1.size(), T::default())?;

    // compute the weighted sum
    parallel::par_iter_rows_val_two(src1, src2, &mut dst, |&src1_pixel, &src2_pixel, dst_pixel| {
        let src1_pixel: f32 = src1_pixel.into();
        let src2_pixel: f32 = src2_pixel.into();
        *dst_pixel = T::from_f32(src1_pixel * alpha + src2_pixel * beta + gamma);
    });

    Ok(dst)
}

/// Blend two images: `dst = alpha * src1 + (1 - alpha) * src2`.
///
/// # Errors
///
/// * `alpha` must lie in `[0, 1]`.
/// * The sizes of `src1` and `src2` must match.
///
/// # Example
///
/// ```
/// use rastro_image::Image;
/// use rastro_imgproc::enhance::blend;
///
/// let a = Image::<u8, 1>::from_size_val([2, 2].into(), 200).unwrap();
/// let b = Image::<u8, 1>::from_size_val([2, 2].into(), 100).unwrap();
///
/// let out = blend(&a, &b, 0.25).unwrap();
/// assert_eq!(out.as_slice(), &[125, 125, 125, 125]);
/// ```
pub fn blend<T: ImageDtype, const C: usize>(
    src1: &Image<T, C>,
    src2: &Image<T, C>,
    alpha: f32,
) -> Result<Image<T, C>, ImageError> {
    if !(0.0..=1.0).contains(&alpha) {
        return Err(ImageError::InvalidBlendWeight(alpha));
    }
    add_weighted(src1, alpha, src2, 1.0 - alpha, 0.0)
}

/// Adjust brightness and contrast of an 8-bit image.
///
/// Every sample is mapped to `clamp(alpha * x + brightness)` with
/// `alpha = (contrast + 100) / 100`. A contrast of zero keeps the scale,
/// positive values stretch and negative values flatten the histogram.
///
/// # Arguments
///
/// * `src` - The input image.
/// * `brightness` - Offset added to every sample.
/// * `contrast` - Contrast in percent, must be greater than -100.
///
/// # Errors
///
/// Returns [`ImageError::InvalidContrast`] when `contrast <= -100`, where the
/// scale would vanish or invert the image, and
/// [`ImageError::NonFiniteParameter`] for NaN or infinite parameters.
///
/// # Example
///
/// ```
/// use rastro_image::Image;
/// use rastro_imgproc::enhance::adjust_brightness_contrast;
///
/// let image = Image::<u8, 1>::new([3, 1].into(), vec![10, 100, 200]).unwrap();
/// let out = adjust_brightness_contrast(&image, 10.0, 100.0).unwrap();
///
/// assert_eq!(out.as_slice(), &[30, 210, 255]);
/// ```
pub fn adjust_brightness_contrast<const C: usize>(
    src: &Image<u8, C>,
    brightness: f32,
    contrast: f32,
) -> Result<Image<u8, C>, ImageError> {
    if !brightness.is_finite() || !contrast.is_finite() {
        return Err(ImageError::NonFiniteParameter("brightness/contrast"));
    }

    if contrast <= -100.0 {
        return Err(ImageError::InvalidContrast(contrast));
    }

    let alpha = (contrast + 100.0) / 100.0;

    // one lookup table for all 256 input levels
    let lut: [u8; 256] =
        std::array::from_fn(|i| u8::from_f32(alpha * i as f32 + brightness));

    let mut dst = Image::<u8, C>::from_size_val(src.size(), 0)?;

    parallel::par_iter_rows_val(src, &mut dst, |&src_pixel, dst_pixel| {
        *dst_pixel = lut[src_pixel as usize];
    });

    Ok(dst)
}
