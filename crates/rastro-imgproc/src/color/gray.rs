use crate::parallel;
use rastro_image::{Image, ImageDtype, ImageError};

/// Define the RGB weights for the grayscale conversion.
const RW: f32 = 0.299;
const GW: f32 = 0.587;
const BW: f32 = 0.114;

/// Convert an RGB image to grayscale using the formula:
///
/// Y = 0.299 * R + 0.587 * G + 0.114 * B
///
/// # Arguments
///
/// * `src` - The input RGB image.
///
/// # Returns
///
/// A single channel image of the same size.
///
/// # Example
///
/// ```
/// use rastro_image::{Image, ImageSize};
/// use rastro_imgproc::color::gray_from_rgb;
///
/// let image = Image::<f32, 3>::new(
///     ImageSize {
///         width: 4,
///         height: 5,
///     },
///     vec![0f32; 4 * 5 * 3],
/// )
/// .unwrap();
///
/// let gray = gray_from_rgb(&image).unwrap();
/// assert_eq!(gray.num_channels(), 1);
/// assert_eq!(gray.size().width, 4);
/// assert_eq!(gray.size().height, 5);
/// ```
pub fn gray_from_rgb<T: ImageDtype>(src: &Image<T, 3>) -> Result<Image<T, 1>, ImageError> {
    let mut dst = Image::<T, 1>::from_size_val(src.size(), T::default())?;

    // parallelize the grayscale conversion by rows
    parallel::par_iter_rows(src, &mut dst, |src_pixel, dst_pixel| {
        let r: f32 = src_pixel[0].into();
        let g: f32 = src_pixel[1].into();
        let b: f32 = src_pixel[2].into();
        dst_pixel[0] = T::from_f32(RW * r + GW * g + BW * b);
    });

    Ok(dst)
}

/// Convert an RGB8 image to grayscale using the formula:
///
/// Y = (77 * R + 150 * G + 29 * B) >> 8
///
/// # Arguments
///
/// * `src` - The input RGB8 image.
///
/// # Returns
///
/// A single channel image of the same size.
pub fn gray_from_rgb_u8(src: &Image<u8, 3>) -> Result<Image<u8, 1>, ImageError> {
    let mut dst = Image::<u8, 1>::from_size_val(src.size(), 0)?;

    parallel::par_iter_rows(src, &mut dst, |src_pixel, dst_pixel| {
        let r = src_pixel[0] as u16;
        let g = src_pixel[1] as u16;
        let b = src_pixel[2] as u16;
        dst_pixel[0] = ((r * 77 + g * 150 + b * 29) >> 8) as u8;
    });

    Ok(dst)
}

/// Convert a grayscale image to an RGB image by replicating the grayscale value across all three channels.
///
/// # Arguments
///
/// * `src` - The input grayscale image.
///
/// # Example
///
/// ```
/// use rastro_image::{Image, ImageSize};
/// use rastro_imgproc::color::rgb_from_gray;
///
/// let image = Image::<u8, 1>::new(
///     ImageSize {
///         width: 2,
///         height: 1,
///     },
///     vec![10, 20],
/// )
/// .unwrap();
///
/// let rgb = rgb_from_gray(&image).unwrap();
/// assert_eq!(rgb.as_slice(), &[10, 10, 10, 20, 20, 20]);
/// ```
pub fn rgb_from_gray<T>(src: &Image<T, 1>) -> Result<Image<T, 3>, ImageError>
where
    T: Copy + Default + Send + Sync,
{
    let mut dst = Image::<T, 3>::from_size_val(src.size(), T::default())?;

    parallel::par_iter_rows(src, &mut dst, |src_pixel, dst_pixel| {
        dst_pixel[0] = src_pixel[0];
        dst_pixel[1] = src_pixel[0];
        dst_pixel[2] = src_pixel[0];
    });

    Ok(dst)
}

/// Convert an RGB image to BGR by swapping the red and blue channels.
///
/// The conversion is its own inverse, so it also turns BGR data into RGB.
pub fn bgr_from_rgb<T>(src: &Image<T, 3>) -> Result<Image<T, 3>, ImageError>
where
    T: Copy + Default + Send + Sync,
{
    let mut dst = Image::<T, 3>::from_size_val(src.size(), T::default())?;

    parallel::par_iter_rows(src, &mut dst, |src_pixel, dst_pixel| {
        dst_pixel
            .iter_mut()
            .zip(src_pixel.iter().rev())
            .for_each(|(d, s)| *d = *s);
    });

    Ok(dst)
}

#[cfg(test)]
mod tests {
    use rastro_image::{Image, ImageError, ImageSize};

    #[test]
    fn gray_from_rgb() -> Result<(), ImageError> {
        let image = Image::<f32, 3>::new(
            ImageSize {
                width: 1,
                height: 2,
            },
            vec![1.0, 0.0, 0.0, 0.0, 0.0, 1.0],
        )?;

        let gray = super::gray_from_rgb(&image)?;

        approx::assert_relative_eq!(gray.as_slice()[0], 0.299, epsilon = 1e-6);
        approx::assert_relative_eq!(gray.as_slice()[1], 0.114, epsilon = 1e-6);

        Ok(())
    }

    #[test]
    fn gray_from_rgb_u8() -> Result<(), ImageError> {
        let image = Image::<u8, 3>::new(
            ImageSize {
                width: 3,
                height: 1,
            },
            vec![255, 0, 0, 0, 255, 0, 200, 200, 200],
        )?;

        let gray = super::gray_from_rgb_u8(&image)?;

        assert_eq!(gray.as_slice(), &[76, 149, 200]);

        Ok(())
    }

    #[test]
    fn gray_roundtrip_is_stable() -> Result<(), ImageError> {
        let image = Image::<u8, 3>::from_size_fn([8, 8].into(), |x, y, c| {
            ((x * 31 + y * 17 + c * 97) % 256) as u8
        })?;

        let gray = super::gray_from_rgb_u8(&image)?;
        let gray_again = super::gray_from_rgb_u8(&super::rgb_from_gray(&gray)?)?;
        assert_eq!(gray, gray_again);

        Ok(())
    }

    #[test]
    fn bgr_from_rgb() -> Result<(), ImageError> {
        let image = Image::<u8, 3>::new([2, 1].into(), vec![1, 2, 3, 4, 5, 6])?;
        let bgr = super::bgr_from_rgb(&image)?;
        assert_eq!(bgr.as_slice(), &[3, 2, 1, 6, 5, 4]);
        assert_eq!(super::bgr_from_rgb(&bgr)?, image);
        Ok(())
    }
}
