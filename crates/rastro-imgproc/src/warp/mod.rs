//! Geometric image transformations using affine and perspective warps.
//!
//! This module provides functions for applying 2D transformations to images:
//!
//! - Affine transformations (rotation, translation, scaling, shearing)
//! - Perspective transformations (homographies) and quad projection
//! - Rotation and translation matrix generation
//! - Affine transform inversion
//!
//! All warps use inverse mapping: every output pixel is traced back to the
//! source and sampled there, so the output has no holes.
//!
//! # Examples
//!
//! Rotating an image by 45 degrees:
//!
//! ```
//! use rastro_image::Image;
//! use rastro_imgproc::interpolation::InterpolationMode;
//! use rastro_imgproc::warp::rotate;
//!
//! let image = Image::<u8, 3>::from_size_val([256, 256].into(), 0).unwrap();
//! let rotated = rotate(&image, 45.0, (128.0, 128.0), InterpolationMode::Bilinear).unwrap();
//! assert_eq!(rotated.size(), image.size());
//! ```

mod affine;
mod perspective;

pub use affine::{
    get_rotation_matrix2d, get_translation_matrix2d, invert_affine_transform, rotate, translate,
    warp_affine,
};
pub use perspective::{get_perspective_transform, warp_perspective, warp_quad, QuadPoints};
