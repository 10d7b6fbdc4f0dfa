//! Filter operations
//!
//! Neighborhood filters over 8-bit and float images. Every filter replicates
//! the border pixels so that each output pixel is defined.

/// Border handling helpers
pub(crate) mod border;

/// Filter kernels
pub mod kernels;
pub use kernels::Kernel;

mod convolution;
pub use convolution::{box_blur, filter2d};

mod median;
pub use median::median_blur;
