use rastro_image::ImageError;

/// A square convolution kernel with an odd side length.
///
/// The weights are stored row-major. The engine never normalizes them: a
/// kernel meant to average must sum to one, see [`Kernel::box_filter`].
///
/// # Example
///
/// ```
/// use rastro_imgproc::filter::Kernel;
///
/// let sharpen = Kernel::new(3, vec![0.0, -1.0, 0.0, -1.0, 5.0, -1.0, 0.0, -1.0, 0.0]).unwrap();
/// assert_eq!(sharpen.size(), 3);
/// assert_eq!(sharpen.radius(), 1);
///
/// assert!(Kernel::new(2, vec![0.25; 4]).is_err());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Kernel {
    size: usize,
    weights: Vec<f32>,
}

impl Kernel {
    /// Create a kernel from its side length and row-major weights.
    ///
    /// # Errors
    ///
    /// * `size` must be odd and at least one.
    /// * `weights` must hold exactly `size * size` finite values.
    pub fn new(size: usize, weights: Vec<f32>) -> Result<Self, ImageError> {
        let kernel = Self { size, weights };
        kernel.validate()?;
        Ok(kernel)
    }

    /// A normalized `size x size` averaging kernel.
    pub fn box_filter(size: usize) -> Result<Self, ImageError> {
        let norm = 1.0 / (size * size) as f32;
        Self::new(size, vec![norm; size * size])
    }

    /// The 1x1 kernel that leaves an image unchanged.
    pub fn identity() -> Self {
        Self {
            size: 1,
            weights: vec![1.0],
        }
    }

    /// Check the kernel invariants.
    ///
    /// Kernels built with [`Kernel::new`] always pass; deserialized kernels are
    /// checked again before use.
    pub fn validate(&self) -> Result<(), ImageError> {
        if self.size == 0 || self.size % 2 == 0 {
            return Err(ImageError::InvalidKernelSize(self.size));
        }

        let expected = self.size * self.size;
        if self.weights.len() != expected {
            return Err(ImageError::InvalidKernelWeights(
                self.size,
                expected,
                self.weights.len(),
            ));
        }

        if self.weights.iter().any(|w| !w.is_finite()) {
            return Err(ImageError::NonFiniteParameter("kernel weights"));
        }

        Ok(())
    }

    /// Side length of the kernel.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Half the side length, rounded down.
    pub fn radius(&self) -> usize {
        self.size / 2
    }

    /// The row-major weights.
    pub fn weights(&self) -> &[f32] {
        &self.weights
    }
}
