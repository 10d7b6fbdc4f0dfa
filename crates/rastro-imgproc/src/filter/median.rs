use rayon::prelude::*;

use rastro_image::{Image, ImageError};

use super::border::replicate_offsets;

/// Replace every pixel by the median of its `kernel_size x kernel_size` neighborhood.
///
/// Channels are filtered independently and the border is replicated.
///
/// # Arguments
///
/// * `src` - The input image.
/// * `kernel_size` - Side of the square neighborhood, odd and at least one.
///
/// # Errors
///
/// Returns [`ImageError::InvalidKernelSize`] if `kernel_size` is even or zero.
///
/// # Example
///
/// ```
/// use rastro_image::Image;
/// use rastro_imgproc::filter::median_blur;
///
/// let image = Image::<u8, 1>::new([3, 3].into(), vec![0, 0, 0, 0, 255, 0, 0, 0, 0]).unwrap();
/// let filtered = median_blur(&image, 3).unwrap();
///
/// assert!(filtered.as_slice().iter().all(|&v| v == 0));
/// assert!(median_blur(&image, 4).is_err());
/// ```
pub fn median_blur<const C: usize>(
    src: &Image<u8, C>,
    kernel_size: usize,
) -> Result<Image<u8, C>, ImageError> {
    if kernel_size == 0 || kernel_size % 2 == 0 {
        return Err(ImageError::InvalidKernelSize(kernel_size));
    }

    let (cols, rows) = (src.cols(), src.rows());

    if kernel_size == 1 || cols == 0 || rows == 0 {
        return Ok(src.clone());
    }

    let mut dst = Image::<u8, C>::from_size_val(src.size(), 0)?;

    let radius = kernel_size / 2;
    let x_offsets = replicate_offsets(cols, radius);
    let y_offsets = replicate_offsets(rows, radius);
    let mid = kernel_size * kernel_size / 2;

    let data = src.as_slice();

    dst.as_slice_mut()
        .par_chunks_exact_mut(C * cols)
        .enumerate()
        .for_each(|(y, dst_row)| {
            let ys = &y_offsets[y * kernel_size..(y + 1) * kernel_size];
            let mut window = Vec::with_capacity(kernel_size * kernel_size);

            for (x, dst_pixel) in dst_row.chunks_exact_mut(C).enumerate() {
                let xs = &x_offsets[x * kernel_size..(x + 1) * kernel_size];
                for (c, d) in dst_pixel.iter_mut().enumerate() {
                    window.clear();
                    for &sy in ys {
                        for &sx in xs {
                            window.push(data[(sy * cols + sx) * C + c]);
                        }
                    }
                    *d = *window.select_nth_unstable(mid).1;
                }
            }
        });

    Ok(dst)
}

#[cfg(test)]
mod tests {
    use rastro_image::{Image, ImageError};

    #[test]
    fn median_removes_salt() -> Result<(), ImageError> {
        let mut image = Image::<u8, 3>::from_size_val([5, 5].into(), 40)?;
        image.set(2, 2, 1, 255.0)?;
        image.set(0, 4, 0, 0.0)?;

        let filtered = super::median_blur(&image, 3)?;
        assert!(filtered.as_slice().iter().all(|&v| v == 40));

        Ok(())
    }

    #[test]
    fn median_picks_middle_value() -> Result<(), ImageError> {
        let image = Image::<u8, 1>::new([3, 3].into(), vec![9, 1, 8, 2, 7, 3, 6, 4, 5])?;
        let filtered = super::median_blur(&image, 3)?;
        assert_eq!(filtered.get(1, 1, 0)?, 5);
        Ok(())
    }

    #[test]
    fn median_keeps_step_edge() -> Result<(), ImageError> {
        let image = Image::<u8, 1>::from_size_fn([6, 3].into(), |x, _, _| if x < 3 { 0 } else { 200 })?;
        assert_eq!(super::median_blur(&image, 3)?, image);
        Ok(())
    }

    #[test]
    fn median_kernel_size() -> Result<(), ImageError> {
        let image = Image::<u8, 1>::from_size_val([4, 4].into(), 3)?;
        assert_eq!(
            super::median_blur(&image, 4),
            Err(ImageError::InvalidKernelSize(4))
        );
        assert_eq!(
            super::median_blur(&image, 0),
            Err(ImageError::InvalidKernelSize(0))
        );
        assert_eq!(super::median_blur(&image, 1)?, image);
        Ok(())
    }
}
