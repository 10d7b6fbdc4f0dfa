use std::f32::consts::PI;

use rastro_image::{Image, ImageDtype, ImageError, ImageSize};

use crate::interpolation::{grid::meshgrid_from_fn, remap, InterpolationMode};

/// Inverts a 2x3 affine transformation matrix.
///
/// Arguments:
///
/// * `m` - The 2x3 affine transformation matrix.
///
/// Returns:
///
/// The inverted 2x3 affine transformation matrix. A singular matrix inverts to zero.
pub fn invert_affine_transform(m: &[f32; 6]) -> [f32; 6] {
    let (a, b, c, d, e, f) = (m[0], m[1], m[2], m[3], m[4], m[5]);

    // follow OpenCV: check for determinant == 0
    // https://github.com/opencv/opencv/blob/4.9.0/modules/imgproc/src/imgwarp.cpp#L2765
    let determinant = a * e - b * d;
    let inv_determinant = if determinant != 0.0 {
        1.0 / determinant
    } else {
        log::warn!("singular affine matrix {m:?}, inverse collapses to zero");
        0.0
    };

    let new_a = e * inv_determinant;
    let new_b = -b * inv_determinant;
    let new_d = -d * inv_determinant;
    let new_e = a * inv_determinant;
    let new_c = -(new_a * c + new_b * f);
    let new_f = -(new_d * c + new_e * f);

    [new_a, new_b, new_c, new_d, new_e, new_f]
}

/// Returns a 2x3 rotation matrix for a 2D rotation around a center point.
///
/// The rotation matrix is defined as:
///
/// | alpha  beta  tx |
/// | -beta  alpha ty |
///
/// where:
///
/// alpha = scale * cos(angle)
/// beta = scale * sin(angle)
/// tx = (1 - alpha) * center.x - beta * center.y
/// ty = beta * center.x + (1 - alpha) * center.y
///
/// Positive angles rotate counter-clockwise as seen on screen.
///
/// # Arguments
///
/// * `center` - The center point of the rotation.
/// * `angle` - The angle of rotation in degrees.
/// * `scale` - The scale factor.
///
/// # Example
///
/// ```
/// use rastro_imgproc::warp::get_rotation_matrix2d;
///
/// let rotation_matrix = get_rotation_matrix2d((0.0, 0.0), 90.0, 1.0);
/// assert!((rotation_matrix[1] - 1.0).abs() < 1e-6);
/// ```
pub fn get_rotation_matrix2d(center: (f32, f32), angle: f32, scale: f32) -> [f32; 6] {
    let angle = angle * PI / 180.0f32;
    let alpha = scale * angle.cos();
    let beta = scale * angle.sin();

    let tx = (1.0 - alpha) * center.0 - beta * center.1;
    let ty = beta * center.0 + (1.0 - alpha) * center.1;

    [alpha, beta, tx, -beta, alpha, ty]
}

/// Returns a 2x3 matrix moving every point by `(dx, dy)`.
pub fn get_translation_matrix2d(dx: f32, dy: f32) -> [f32; 6] {
    [1.0, 0.0, dx, 0.0, 1.0, dy]
}

/// Applies an affine transformation to a point.
pub(crate) fn transform_point(x: f32, y: f32, m: &[f32; 6]) -> (f32, f32) {
    let u = m[0] * x + m[1] * y + m[2];
    let v = m[3] * x + m[4] * y + m[5];
    (u, v)
}

/// Applies an affine transformation to an image.
///
/// Every destination pixel is mapped back to the source through the inverse
/// of `m`; destination pixels whose source lies outside the image are zero.
///
/// # Arguments
///
/// * `src` - The input image with shape (height, width, channels).
/// * `m` - The 2x3 affine transformation matrix src -> dst.
/// * `new_size` - The size of the output image.
/// * `interpolation` - The interpolation mode to use.
///
/// # Returns
///
/// The output image with shape (new_height, new_width, channels).
///
/// # Errors
///
/// * [`ImageError::NonFiniteParameter`] if `m` holds NaN or infinite values.
/// * [`ImageError::CannotComputeDeterminant`] if `m` is not invertible.
///
/// # Example
///
/// ```
/// use rastro_image::{Image, ImageSize};
/// use rastro_imgproc::interpolation::InterpolationMode;
/// use rastro_imgproc::warp::warp_affine;
///
/// let src = Image::<f32, 3>::from_size_val(
///     ImageSize {
///         width: 4,
///         height: 5,
///     },
///     1f32,
/// ).unwrap();
///
/// let m = [1.0, 0.0, 0.0, 0.0, 1.0, 0.0];
///
/// let dst = warp_affine(&src, &m, src.size(), InterpolationMode::Nearest).unwrap();
///
/// assert_eq!(dst.size().width, 4);
/// assert_eq!(dst.size().height, 5);
/// ```
pub fn warp_affine<T: ImageDtype, const C: usize>(
    src: &Image<T, C>,
    m: &[f32; 6],
    new_size: ImageSize,
    interpolation: InterpolationMode,
) -> Result<Image<T, C>, ImageError> {
    if m.iter().any(|v| !v.is_finite()) {
        return Err(ImageError::NonFiniteParameter("affine matrix"));
    }

    // a singular matrix has no inverse to sample through
    if m[0] * m[4] - m[1] * m[3] == 0.0 {
        return Err(ImageError::CannotComputeDeterminant);
    }

    // invert affine transform matrix to find corresponding positions in src from dst
    let m_inv = invert_affine_transform(m);

    let (map_x, map_y) = meshgrid_from_fn(new_size.width, new_size.height, |x, y| {
        transform_point(x as f32, y as f32, &m_inv)
    });

    remap(src, &map_x, &map_y, new_size, interpolation)
}

/// Rotate an image about an arbitrary pivot.
///
/// The output canvas has the size of the input; pixels rotated outside the
/// frame are clipped and uncovered pixels are zero.
///
/// # Arguments
///
/// * `src` - The input image.
/// * `angle` - The angle of rotation in degrees, counter-clockwise.
/// * `center` - The pivot `(x, y)` of the rotation.
/// * `interpolation` - The interpolation mode to use.
pub fn rotate<T: ImageDtype, const C: usize>(
    src: &Image<T, C>,
    angle: f32,
    center: (f32, f32),
    interpolation: InterpolationMode,
) -> Result<Image<T, C>, ImageError> {
    if !angle.is_finite() || !center.0.is_finite() || !center.1.is_finite() {
        return Err(ImageError::NonFiniteParameter("rotation"));
    }
    let m = get_rotation_matrix2d(center, angle, 1.0);
    warp_affine(src, &m, src.size(), interpolation)
}

/// Shift the image content by `(dx, dy)` pixels.
///
/// Positive offsets move the content right and down: the source pixel at
/// `(x, y)` lands at `(x + dx, y + dy)`. Libraries whose affine call takes the
/// destination to source map, such as PIL's `Image.AFFINE` with
/// `(1, 0, dx, 0, 1, dy)`, move the content the opposite way.
///
/// Offsets may be fractional. Content leaving the frame is lost and newly
/// exposed pixels are zero.
pub fn translate<T: ImageDtype, const C: usize>(
    src: &Image<T, C>,
    dx: f32,
    dy: f32,
    interpolation: InterpolationMode,
) -> Result<Image<T, C>, ImageError> {
    let m = get_translation_matrix2d(dx, dy);
    warp_affine(src, &m, src.size(), interpolation)
}
