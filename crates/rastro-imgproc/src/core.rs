use rastro_image::{Image, ImageDtype, ImageError};

use crate::parallel;

/// Bitwise operation applied per channel by [`logical_combine`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LogicalOp {
    /// Bitwise AND of both images.
    And,
    /// Bitwise OR of both images.
    Or,
    /// Bitwise XOR of both images.
    Xor,
    /// Bitwise NOT of the first image; the second operand is ignored.
    Not,
}

impl LogicalOp {
    /// Whether the operation reads a second image.
    pub fn is_binary(&self) -> bool {
        !matches!(self, LogicalOp::Not)
    }
}

/// Compute the mean and standard deviation of an image.
///
/// The mean and standard deviation are computed for each channel
/// of the image in one pass.
///
/// # Arguments
///
/// * `image` - The input image to compute the mean and standard deviation.
///
/// # Returns
///
/// A tuple containing the mean and standard deviation of the image.
/// The first element of the tuple is the standard deviation and the
/// second element is the mean.
///
/// # Example
///
/// ```
/// use rastro_image::{Image, ImageSize};
/// use rastro_imgproc::core::std_mean;
///
/// let image = Image::<u8, 3>::new(
///    ImageSize {
///      width: 2,
///      height: 2,
///    },
///    vec![0, 1, 2, 253, 254, 255, 128, 129, 130, 64, 65, 66],
/// ).unwrap();
///
/// let (std, mean) = std_mean(&image);
///
/// assert!((std[0] - 93.5183805462862).abs() < 1e-9);
/// assert_eq!(mean, [111.25, 112.25, 113.25]);
/// ```
pub fn std_mean<T: ImageDtype, const C: usize>(image: &Image<T, C>) -> ([f64; C], [f64; C]) {
    let (sum, sq_sum) = image.as_slice().chunks_exact(C).fold(
        ([0f64; C], [0f64; C]),
        |(mut sum, mut sq_sum), pixel| {
            for (c, &val) in pixel.iter().enumerate() {
                let val: f32 = val.into();
                sum[c] += val as f64;
                sq_sum[c] += (val as f64).powi(2);
            }
            (sum, sq_sum)
        },
    );

    let n = (image.width() * image.height()).max(1) as f64;

    let mut mean = [0f64; C];
    let mut std = [0f64; C];
    for c in 0..C {
        mean[c] = sum[c] / n;
        std[c] = (sq_sum[c] / n - mean[c].powi(2)).max(0.0).sqrt();
    }

    (std, mean)
}

fn check_same_size<const C: usize>(
    src1: &Image<u8, C>,
    src2: &Image<u8, C>,
) -> Result<(), ImageError> {
    if src1.size() != src2.size() {
        return Err(ImageError::InvalidImageSize(
            src1.cols(),
            src1.rows(),
            src2.cols(),
            src2.rows(),
        ));
    }
    Ok(())
}

fn bitwise_binary<const C: usize>(
    src1: &Image<u8, C>,
    src2: &Image<u8, C>,
    op: impl Fn(u8, u8) -> u8 + Send + Sync,
) -> Result<Image<u8, C>, ImageError> {
    check_same_size(src1, src2)?;

    let mut dst = Image::<u8, C>::from_size_val(src1.size(), 0)?;

    parallel::par_iter_rows_val_two(src1, src2, &mut dst, |&a, &b, d| {
        *d = op(a, b);
    });

    Ok(dst)
}

/// Perform a bitwise AND operation between two images.
///
/// # Errors
///
/// Returns an error if the sizes of `src1` and `src2` do not match.
///
/// # Example
///
/// ```
/// use rastro_image::{Image, ImageSize};
/// use rastro_imgproc::core::bitwise_and;
///
/// let image = Image::<u8, 3>::new(
///    ImageSize {
///        width: 2,
///        height: 1,
///    },
///    vec![0, 1, 2, 253, 254, 255],
/// ).unwrap();
///
/// let mask = Image::<u8, 3>::new(
///    ImageSize {
///        width: 2,
///        height: 1,
///    },
///    vec![255, 255, 255, 0, 0, 0],
/// ).unwrap();
///
/// let output = bitwise_and(&image, &mask).unwrap();
///
/// assert_eq!(output.as_slice(), &[0, 1, 2, 0, 0, 0]);
/// ```
pub fn bitwise_and<const C: usize>(
    src1: &Image<u8, C>,
    src2: &Image<u8, C>,
) -> Result<Image<u8, C>, ImageError> {
    bitwise_binary(src1, src2, |a, b| a & b)
}

/// Perform a bitwise OR operation between two images.
///
/// # Errors
///
/// Returns an error if the sizes of `src1` and `src2` do not match.
pub fn bitwise_or<const C: usize>(
    src1: &Image<u8, C>,
    src2: &Image<u8, C>,
) -> Result<Image<u8, C>, ImageError> {
    bitwise_binary(src1, src2, |a, b| a | b)
}

/// Perform a bitwise XOR operation between two images.
///
/// # Errors
///
/// Returns an error if the sizes of `src1` and `src2` do not match.
pub fn bitwise_xor<const C: usize>(
    src1: &Image<u8, C>,
    src2: &Image<u8, C>,
) -> Result<Image<u8, C>, ImageError> {
    bitwise_binary(src1, src2, |a, b| a ^ b)
}

/// Invert every bit of the image.
pub fn bitwise_not<const C: usize>(src: &Image<u8, C>) -> Result<Image<u8, C>, ImageError> {
    let mut dst = Image::<u8, C>::from_size_val(src.size(), 0)?;

    parallel::par_iter_rows_val(src, &mut dst, |&a, d| *d = !a);

    Ok(dst)
}

/// Combine two images with a per-channel bitwise operation.
///
/// `LogicalOp::Not` only reads `src1`; `src2` is still required to keep the
/// signature uniform but its shape is not checked.
///
/// # Errors
///
/// Returns an error if the sizes of `src1` and `src2` differ for a binary operation.
pub fn logical_combine<const C: usize>(
    src1: &Image<u8, C>,
    src2: &Image<u8, C>,
    op: LogicalOp,
) -> Result<Image<u8, C>, ImageError> {
    match op {
        LogicalOp::And => bitwise_and(src1, src2),
        LogicalOp::Or => bitwise_or(src1, src2),
        LogicalOp::Xor => bitwise_xor(src1, src2),
        LogicalOp::Not => bitwise_not(src1),
    }
}
