#![doc = include_str!(concat!("../", env!("CARGO_PKG_README")))]

#[doc(inline)]
pub use rastro_image as image;

#[doc(inline)]
pub use rastro_imgproc as imgproc;
