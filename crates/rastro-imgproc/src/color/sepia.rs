use crate::parallel;
use rastro_image::{Image, ImageDtype, ImageError};

/// The linear color mixing matrix of the sepia tone.
///
/// Rows produce R', G' and B' as weighted sums of the input R, G and B.
#[rustfmt::skip]
pub const SEPIA_MATRIX: [[f32; 3]; 3] = [
    [0.393, 0.769, 0.189],
    [0.349, 0.686, 0.168],
    [0.272, 0.534, 0.131],
];

/// Apply a sepia tone to an RGB image.
///
/// Every pixel is multiplied by [`SEPIA_MATRIX`]; 8-bit outputs saturate at 255.
///
/// # Example
///
/// ```
/// use rastro_image::Image;
/// use rastro_imgproc::color::sepia;
///
/// let image = Image::<u8, 3>::new([1, 1].into(), vec![100, 100, 100]).unwrap();
/// let toned = sepia(&image).unwrap();
///
/// assert_eq!(toned.as_slice(), &[135, 120, 94]);
/// ```
pub fn sepia<T: ImageDtype>(src: &Image<T, 3>) -> Result<Image<T, 3>, ImageError> {
    let mut dst = Image::<T, 3>::from_size_val(src.size(), T::default())?;

    parallel::par_iter_rows(src, &mut dst, |src_pixel, dst_pixel| {
        let rgb: [f32; 3] = [src_pixel[0].into(), src_pixel[1].into(), src_pixel[2].into()];
        for (d, row) in dst_pixel.iter_mut().zip(SEPIA_MATRIX.iter()) {
            *d = T::from_f32(row[0] * rgb[0] + row[1] * rgb[1] + row[2] * rgb[2]);
        }
    });

    Ok(dst)
}
