use crate::parallel;
use rastro_image::{Image, ImageError};

/// Number of hue steps of the 8-bit HSV encoding.
///
/// Hue covers a full turn in 180 steps of two degrees so that it fits a byte.
pub const HUE_RANGE: i32 = 180;

fn hsv_from_rgb_pixel(rgb: &[u8]) -> [u8; 3] {
    let r = rgb[0] as f32;
    let g = rgb[1] as f32;
    let b = rgb[2] as f32;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;

    let h = if delta == 0.0 {
        0.0
    } else if max == r {
        60.0 * (g - b) / delta
    } else if max == g {
        120.0 + 60.0 * (b - r) / delta
    } else {
        240.0 + 60.0 * (r - g) / delta
    };

    // ensure h is in the range [0, 360)
    let h = if h < 0.0 { h + 360.0 } else { h };

    let s = if max == 0.0 { 0.0 } else { 255.0 * delta / max };

    [
        ((h / 2.0).round() as i32).rem_euclid(HUE_RANGE) as u8,
        s.round() as u8,
        max as u8,
    ]
}

fn rgb_from_hsv_pixel(hsv: &[u8]) -> [u8; 3] {
    let h = hsv[0] as f32 * 2.0 / 60.0;
    let s = hsv[1] as f32 / 255.0;
    let v = hsv[2] as f32;

    let sector = h.floor();
    let f = h - sector;

    let p = v * (1.0 - s);
    let q = v * (1.0 - s * f);
    let t = v * (1.0 - s * (1.0 - f));

    let (r, g, b) = match sector as i32 % 6 {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    };

    [
        r.round().clamp(0.0, 255.0) as u8,
        g.round().clamp(0.0, 255.0) as u8,
        b.round().clamp(0.0, 255.0) as u8,
    ]
}

/// Convert an RGB8 image to an 8-bit HSV image.
///
/// The output channels are:
///
/// * H: The hue in the range [0, 180) (two degrees per step).
/// * S: The saturation in the range [0, 255].
/// * V: The value in the range [0, 255].
///
/// # Example
///
/// ```
/// use rastro_image::Image;
/// use rastro_imgproc::color::hsv_from_rgb_u8;
///
/// let image = Image::<u8, 3>::new([2, 1].into(), vec![0, 255, 0, 0, 0, 255]).unwrap();
/// let hsv = hsv_from_rgb_u8(&image).unwrap();
///
/// assert_eq!(hsv.as_slice(), &[60, 255, 255, 120, 255, 255]);
/// ```
pub fn hsv_from_rgb_u8(src: &Image<u8, 3>) -> Result<Image<u8, 3>, ImageError> {
    let mut dst = Image::<u8, 3>::from_size_val(src.size(), 0)?;

    parallel::par_iter_rows(src, &mut dst, |src_pixel, dst_pixel| {
        dst_pixel.copy_from_slice(&hsv_from_rgb_pixel(src_pixel));
    });

    Ok(dst)
}

/// Convert an 8-bit HSV image, as produced by [`hsv_from_rgb_u8`], back to RGB8.
pub fn rgb_from_hsv_u8(src: &Image<u8, 3>) -> Result<Image<u8, 3>, ImageError> {
    let mut dst = Image::<u8, 3>::from_size_val(src.size(), 0)?;

    parallel::par_iter_rows(src, &mut dst, |src_pixel, dst_pixel| {
        dst_pixel.copy_from_slice(&rgb_from_hsv_pixel(src_pixel));
    });

    Ok(dst)
}

/// Shift hue, saturation and value of an RGB8 image.
///
/// The hue wraps around modulo [`HUE_RANGE`]; saturation and value are
/// clamped to [0, 255]. The HSV quantization makes the round trip lossy, so
/// zero deltas reproduce the input only up to a few levels.
///
/// # Arguments
///
/// * `src` - The input RGB image.
/// * `hue_delta` - Hue offset in 8-bit hue steps (two degrees each).
/// * `sat_delta` - Saturation offset.
/// * `val_delta` - Value offset.
pub fn adjust_hsv(
    src: &Image<u8, 3>,
    hue_delta: i32,
    sat_delta: i32,
    val_delta: i32,
) -> Result<Image<u8, 3>, ImageError> {
    let mut dst = Image::<u8, 3>::from_size_val(src.size(), 0)?;

    parallel::par_iter_rows(src, &mut dst, |src_pixel, dst_pixel| {
        let [h, s, v] = hsv_from_rgb_pixel(src_pixel);

        let h = (h as i32 + hue_delta).rem_euclid(HUE_RANGE) as u8;
        let s = (s as i32 + sat_delta).clamp(0, 255) as u8;
        let v = (v as i32 + val_delta).clamp(0, 255) as u8;

        dst_pixel.copy_from_slice(&rgb_from_hsv_pixel(&[h, s, v]));
    });

    Ok(dst)
}
