//! Composite effects and the operator catalog.
//!
//! The catalog is the single entry point for callers that pick an operation
//! and its parameters at runtime, e.g. from a user interface or a JSON file.
//!
//! # Example
//!
//! ```
//! use rastro_image::{AnyImage, Image};
//! use rastro_imgproc::pipeline::Operator;
//!
//! let image = AnyImage::from(Image::<u8, 3>::from_size_val([8, 8].into(), 100).unwrap());
//!
//! let op = Operator::BrightnessContrast {
//!     brightness: 20.0,
//!     contrast: 0.0,
//! };
//! let out = op.apply(&image, None).unwrap();
//!
//! assert!(out.as_slice().iter().all(|&v| v == 120));
//! ```

mod effects;
pub use effects::{cartoon, watercolor, CARTOON_BLOCK_SIZE, CARTOON_MEDIAN_SIZE};

mod operator;
pub use operator::Operator;
