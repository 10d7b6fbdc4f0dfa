use rastro_image::{Image, ImageDtype, ImageError};

use super::border::replicate_offsets;
use super::kernels::Kernel;
use crate::parallel;

/// Convolve an image with a square kernel.
///
/// For every pixel and channel the weighted sum of the neighborhood covered by
/// the kernel is computed. Samples outside the image replicate the nearest
/// border pixel. The kernel is applied as given, without normalization, and
/// 8-bit results are rounded and saturated.
///
/// # Arguments
///
/// * `src` - The input image.
/// * `kernel` - The convolution kernel.
///
/// # Errors
///
/// Returns an error if the kernel does not hold valid weights.
///
/// # Example
///
/// ```
/// use rastro_image::Image;
/// use rastro_imgproc::filter::{filter2d, Kernel};
///
/// let image = Image::<u8, 1>::new([3, 1].into(), vec![0, 90, 180]).unwrap();
/// let blurred = filter2d(&image, &Kernel::box_filter(3).unwrap()).unwrap();
///
/// assert_eq!(blurred.as_slice(), &[30, 90, 150]);
/// ```
pub fn filter2d<T: ImageDtype, const C: usize>(
    src: &Image<T, C>,
    kernel: &Kernel,
) -> Result<Image<T, C>, ImageError> {
    kernel.validate()?;

    let mut dst = Image::<T, C>::from_size_val(src.size(), T::default())?;

    let (cols, rows) = (src.cols(), src.rows());
    if cols == 0 || rows == 0 {
        return Ok(dst);
    }

    let ksize = kernel.size();
    let radius = kernel.radius();
    let weights = kernel.weights();

    // clamped source columns and rows for every output position
    let x_offsets = replicate_offsets(cols, radius);
    let y_offsets = replicate_offsets(rows, radius);

    let data = src.as_slice();

    parallel::par_iter_rows_indexed(&mut dst, |x, y, dst_pixel| {
        let mut acc = [0f32; C];

        let ys = &y_offsets[y * ksize..(y + 1) * ksize];
        let xs = &x_offsets[x * ksize..(x + 1) * ksize];

        for (ky, &sy) in ys.iter().enumerate() {
            let row = &weights[ky * ksize..(ky + 1) * ksize];
            for (&w, &sx) in row.iter().zip(xs.iter()) {
                if w == 0.0 {
                    continue;
                }
                let base = (sy * cols + sx) * C;
                for (a, &p) in acc.iter_mut().zip(data[base..base + C].iter()) {
                    let p: f32 = p.into();
                    *a += w * p;
                }
            }
        }

        dst_pixel
            .iter_mut()
            .zip(acc.iter())
            .for_each(|(d, &a)| *d = T::from_f32(a));
    });

    Ok(dst)
}

/// Blur an image with a normalized `kernel_size x kernel_size` box kernel.
///
/// # Errors
///
/// Returns an error if `kernel_size` is even or zero.
pub fn box_blur<T: ImageDtype, const C: usize>(
    src: &Image<T, C>,
    kernel_size: usize,
) -> Result<Image<T, C>, ImageError> {
    filter2d(src, &Kernel::box_filter(kernel_size)?)
}
