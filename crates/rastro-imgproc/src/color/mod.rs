//! Color space conversions.
//!
//! Three channel images are expected in RGB order.

mod gray;
mod hsv;
mod sepia;

pub use gray::{bgr_from_rgb, gray_from_rgb, gray_from_rgb_u8, rgb_from_gray};
pub use hsv::{adjust_hsv, hsv_from_rgb_u8, rgb_from_hsv_u8, HUE_RANGE};
pub use sepia::{sepia, SEPIA_MATRIX};
