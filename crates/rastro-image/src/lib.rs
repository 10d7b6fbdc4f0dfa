#![deny(missing_docs)]
//! Image types and traits for generating and manipulating images

/// image representation for image processing purposes.
pub mod image;

/// runtime-channel image wrapper.
pub mod any_image;

/// Error types for the image module.
pub mod error;

pub use crate::any_image::AnyImage;
pub use crate::error::{ErrorKind, ImageError};
pub use crate::image::{Image, ImageDtype, ImageSize};
