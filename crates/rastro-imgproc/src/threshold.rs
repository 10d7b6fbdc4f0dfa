use num_traits::Zero;

use rastro_image::{Image, ImageError};

use crate::filter;
use crate::parallel;

/// Apply a binary threshold to an image.
///
/// # Arguments
///
/// * `src` - The input image of an arbitrary number of channels and type.
/// * `threshold` - The threshold value. Must be the same type as the image.
/// * `max_value` - The value written where the input is greater than the threshold.
///
/// # Returns
///
/// The thresholded image with the same number of channels as the input image.
///
/// # Examples
///
/// ```
/// use rastro_image::{Image, ImageSize};
/// use rastro_imgproc::threshold::threshold_binary;
///
/// let data = vec![100u8, 200, 50, 150, 200, 250];
/// let image = Image::<_, 1>::new(ImageSize { width: 2, height: 3 }, data).unwrap();
///
/// let thresholded = threshold_binary(&image, 100, 255).unwrap();
/// assert_eq!(thresholded.as_slice(), &[0, 255, 0, 255, 255, 255]);
/// ```
pub fn threshold_binary<T, const C: usize>(
    src: &Image<T, C>,
    threshold: T,
    max_value: T,
) -> Result<Image<T, C>, ImageError>
where
    T: Copy + Send + Sync + PartialOrd + Zero,
{
    let mut dst = Image::<T, C>::from_size_val(src.size(), T::zero())?;

    // run the thresholding operation in parallel
    parallel::par_iter_rows_val(src, &mut dst, |src_pixel, dst_pixel| {
        *dst_pixel = if *src_pixel > threshold {
            max_value
        } else {
            T::zero()
        };
    });

    Ok(dst)
}

/// Binarize a grayscale image against the mean of each pixel's neighborhood.
///
/// A pixel becomes 255 when it is greater than `mean - constant`, where
/// `mean` is the rounded average over the `block_size x block_size` window
/// centered on it, and 0 otherwise. The border is replicated.
///
/// A positive `constant` keeps flat regions white and turns pixels darker than
/// their surroundings black, which outlines edges.
///
/// # Arguments
///
/// * `src` - The input grayscale image.
/// * `block_size` - Side of the neighborhood, odd and at least 3.
/// * `constant` - Offset subtracted from the local mean.
///
/// # Errors
///
/// * [`ImageError::InvalidBlockSize`] if `block_size` is even or smaller than 3.
/// * [`ImageError::NonFiniteParameter`] if `constant` is NaN or infinite.
pub fn adaptive_threshold_mean(
    src: &Image<u8, 1>,
    block_size: usize,
    constant: f32,
) -> Result<Image<u8, 1>, ImageError> {
    if block_size < 3 || block_size % 2 == 0 {
        return Err(ImageError::InvalidBlockSize(block_size));
    }

    if !constant.is_finite() {
        return Err(ImageError::NonFiniteParameter("adaptive threshold constant"));
    }

    let mean = filter::box_blur(&src.cast::<f32>()?, block_size)?;

    let mut dst = Image::<u8, 1>::from_size_val(src.size(), 0)?;

    parallel::par_iter_rows_val_two(src, &mean, &mut dst, |&src_pixel, &mean, dst_pixel| {
        *dst_pixel = if src_pixel as f32 > mean.round() - constant {
            255
        } else {
            0
        };
    });

    Ok(dst)
}

#[cfg(test)]
mod tests {
    use rastro_image::{Image, ImageError, ImageSize};

    #[test]
    fn threshold_binary() -> Result<(), ImageError> {
        let data = vec![100u8, 200, 50, 150, 200, 250];
        let data_expected = [0u8, 255, 0, 255, 255, 255];

        let image = Image::<_, 1>::new(
            ImageSize {
                width: 2,
                height: 3,
            },
            data,
        )?;

        let thresholded = super::threshold_binary(&image, 100, 255)?;

        assert_eq!(thresholded.num_channels(), 1);
        assert_eq!(thresholded.size(), image.size());
        assert_eq!(thresholded.as_slice(), &data_expected);

        Ok(())
    }

    #[test]
    fn adaptive_threshold_uniform() -> Result<(), ImageError> {
        let image = Image::<u8, 1>::from_size_val([12, 9].into(), 131)?;

        let mask = super::adaptive_threshold_mean(&image, 9, 2.0)?;
        assert!(mask.as_slice().iter().all(|&v| v == 255));

        let mask = super::adaptive_threshold_mean(&image, 9, 0.0)?;
        assert!(mask.as_slice().iter().all(|&v| v == 0));

        Ok(())
    }

    #[test]
    fn adaptive_threshold_marks_dark_line() -> Result<(), ImageError> {
        let image = Image::<u8, 1>::from_size_fn([9, 9].into(), |x, _, _| if x == 4 { 20 } else { 200 })?;

        let mask = super::adaptive_threshold_mean(&image, 3, 5.0)?;

        for y in 0..9 {
            assert_eq!(mask.get(4, y, 0)?, 0);
            assert_eq!(mask.get(0, y, 0)?, 255);
            assert_eq!(mask.get(8, y, 0)?, 255);
        }

        Ok(())
    }

    #[test]
    fn adaptive_threshold_block_size() -> Result<(), ImageError> {
        let image = Image::<u8, 1>::from_size_val([4, 4].into(), 0)?;
        assert_eq!(
            super::adaptive_threshold_mean(&image, 4, 2.0),
            Err(ImageError::InvalidBlockSize(4))
        );
        assert_eq!(
            super::adaptive_threshold_mean(&image, 1, 2.0),
            Err(ImageError::InvalidBlockSize(1))
        );
        Ok(())
    }
}
