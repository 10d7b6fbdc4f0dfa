/// Coarse classification of an [`ImageError`].
///
/// Callers that only need to tell the user what went wrong can match on this
/// instead of the individual variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A numeric argument is out of range or geometrically degenerate.
    InvalidParameter,
    /// Two images that must agree in size or channel count do not.
    ShapeMismatch,
    /// A pixel or channel index lies outside the image.
    OutOfBounds,
}

/// An error type for the image and image processing crates.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ImageError {
    /// Error when channel and shape are not valid.
    #[error("Data length ({0}) does not match the image size ({1})")]
    InvalidChannelShape(usize, usize),

    /// Error when the image size is not valid.
    #[error("Invalid image size ({0}, {1}) and ({2}, {3})")]
    InvalidImageSize(usize, usize, usize, usize),

    /// Error when the channel count of two images differ.
    #[error("Channel count mismatch: {0} vs {1}")]
    ChannelCountMismatch(usize, usize),

    /// Error when an operator does not support the number of channels given.
    #[error("Operator {0} does not support images with {1} channels")]
    UnsupportedChannelCount(&'static str, usize),

    /// Error when a binary operator is called without its second operand.
    #[error("Operator {0} requires a second image")]
    MissingOperand(&'static str),

    /// Error when the requested output dimensions are not positive or too large to allocate.
    #[error("Invalid image dimensions {0}x{1}")]
    InvalidImageDimensions(i64, i64),

    /// Error when the pixel index is out of bounds.
    #[error("Pixel index ({0}, {1}) is out of bounds ({2}, {3})")]
    PixelIndexOutOfBounds(usize, usize, usize, usize),

    /// Error when the channel index is out of bounds.
    #[error("Channel index {0} is out of bounds {1}")]
    ChannelIndexOutOfBounds(usize, usize),

    /// Error when the kernel size is not odd and positive.
    #[error("Invalid kernel size {0}, expected an odd number >= 1")]
    InvalidKernelSize(usize),

    /// Error when the kernel weights do not fill the kernel.
    #[error("Kernel of size {0} expects {1} weights, got {2}")]
    InvalidKernelWeights(usize, usize, usize),

    /// Error when the adaptive threshold block size is not odd and larger than one.
    #[error("Invalid block size {0}, expected an odd number >= 3")]
    InvalidBlockSize(usize),

    /// Error when the contrast would collapse or invert the image.
    #[error("Invalid contrast {0}, expected a value greater than -100")]
    InvalidContrast(f32),

    /// Error when the blend weight is outside the unit interval.
    #[error("Invalid blend weight {0}, expected a value in [0, 1]")]
    InvalidBlendWeight(f32),

    /// Error when a parameter is NaN or infinite.
    #[error("Parameter {0} must be finite")]
    NonFiniteParameter(&'static str),

    /// Error when the destination quadrilateral is degenerate.
    #[error("Degenerate quadrilateral: three or more points are collinear")]
    DegenerateQuad,

    /// Error when the determinant of a matrix is zero.
    #[error("Cannot compute the determinant of a singular matrix")]
    CannotComputeDeterminant,

    /// Error when a pixel value cannot be represented in the target type.
    #[error("Failed to cast image data")]
    CastError,
}

impl ImageError {
    /// Classify the error into one of the three error kinds.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ImageError::InvalidImageSize(..)
            | ImageError::ChannelCountMismatch(..)
            | ImageError::UnsupportedChannelCount(..)
            | ImageError::MissingOperand(..) => ErrorKind::ShapeMismatch,
            ImageError::PixelIndexOutOfBounds(..) | ImageError::ChannelIndexOutOfBounds(..) => {
                ErrorKind::OutOfBounds
            }
            ImageError::InvalidChannelShape(..)
            | ImageError::InvalidImageDimensions(..)
            | ImageError::InvalidKernelSize(..)
            | ImageError::InvalidKernelWeights(..)
            | ImageError::InvalidBlockSize(..)
            | ImageError::InvalidContrast(..)
            | ImageError::InvalidBlendWeight(..)
            | ImageError::NonFiniteParameter(..)
            | ImageError::DegenerateQuad
            | ImageError::CannotComputeDeterminant
            | ImageError::CastError => ErrorKind::InvalidParameter,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ErrorKind, ImageError};

    #[test]
    fn error_kinds() {
        assert_eq!(
            ImageError::InvalidImageSize(10, 10, 5, 5).kind(),
            ErrorKind::ShapeMismatch
        );
        assert_eq!(
            ImageError::PixelIndexOutOfBounds(3, 0, 2, 2).kind(),
            ErrorKind::OutOfBounds
        );
        assert_eq!(
            ImageError::InvalidKernelSize(4).kind(),
            ErrorKind::InvalidParameter
        );
        assert_eq!(ImageError::DegenerateQuad.kind(), ErrorKind::InvalidParameter);
    }
}
