use crate::interpolation::{grid::meshgrid_from_fn, remap, InterpolationMode};

use rastro_image::{Image, ImageDtype, ImageError, ImageSize};

/// Four `(x, y)` corners of a destination quadrilateral, in the order
/// top-left, top-right, bottom-right, bottom-left.
pub type QuadPoints = [[i32; 2]; 4];

// below this magnitude a pivot or determinant is treated as zero
const SINGULAR_EPS: f64 = 1e-9;

#[rustfmt::skip]
fn determinant3x3(m: &[f32; 9]) -> f32 {
    m[0] * (m[4] * m[8] - m[5] * m[7]) -
    m[1] * (m[3] * m[8] - m[5] * m[6]) +
    m[2] * (m[3] * m[7] - m[4] * m[6])
}

#[rustfmt::skip]
fn adjugate3x3(m: &[f32; 9]) -> [f32; 9] {
    [
        m[4] * m[8] - m[5] * m[7],  // [0, 0]
        m[2] * m[7] - m[1] * m[8],  // [0, 1]
        m[1] * m[5] - m[2] * m[4],  // [0, 2]
        m[5] * m[6] - m[3] * m[8],  // [1, 0]
        m[0] * m[8] - m[2] * m[6],  // [1, 1]
        m[2] * m[3] - m[0] * m[5],  // [1, 2]
        m[3] * m[7] - m[4] * m[6],  // [2, 0]
        m[1] * m[6] - m[0] * m[7],  // [2, 1]
        m[0] * m[4] - m[1] * m[3],  // [2, 2]
    ]
}

fn inverse_perspective_matrix(m: &[f32; 9]) -> Result<[f32; 9], ImageError> {
    let det = determinant3x3(m);

    if det == 0.0 || !det.is_finite() {
        return Err(ImageError::CannotComputeDeterminant);
    }

    let adj = adjugate3x3(m);
    let inv_det = 1.0 / det;

    let mut inv_m = [0.0; 9];
    for (inv, a) in inv_m.iter_mut().zip(adj.iter()) {
        *inv = a * inv_det;
    }

    Ok(inv_m)
}

fn transform_point(x: f32, y: f32, m: &[f32; 9]) -> (f32, f32) {
    let w = m[6] * x + m[7] * y + m[8];
    let u = (m[0] * x + m[1] * y + m[2]) / w;
    let v = (m[3] * x + m[4] * y + m[5]) / w;
    (u, v)
}

// Dense 8x8 solver using Gaussian elimination with partial pivoting.
fn solve_8x8(a: &mut [f64; 64], b: &mut [f64; 8]) -> Option<[f64; 8]> {
    for i in 0..8 {
        // pivot
        let mut piv = i;
        let mut max_val = a[i * 8 + i].abs();
        for r in (i + 1)..8 {
            let v = a[r * 8 + i].abs();
            if v > max_val {
                max_val = v;
                piv = r;
            }
        }
        if max_val < SINGULAR_EPS {
            return None;
        }
        if piv != i {
            for c in 0..8 {
                a.swap(i * 8 + c, piv * 8 + c);
            }
            b.swap(i, piv);
        }

        // normalize row i
        let diag = a[i * 8 + i];
        for c in i..8 {
            a[i * 8 + c] /= diag;
        }
        b[i] /= diag;

        // eliminate below
        for r in (i + 1)..8 {
            let factor = a[r * 8 + i];
            if factor == 0.0 {
                continue;
            }
            for c in i..8 {
                a[r * 8 + c] -= factor * a[i * 8 + c];
            }
            b[r] -= factor * b[i];
        }
    }

    // back substitution
    let mut x = [0.0; 8];
    for i in (0..8).rev() {
        let mut sum = b[i];
        for c in (i + 1)..8 {
            sum -= a[i * 8 + c] * x[c];
        }
        x[i] = sum;
    }

    Some(x)
}

fn has_collinear_triplet(points: &[[f32; 2]; 4]) -> bool {
    const TRIPLETS: [[usize; 3]; 4] = [[0, 1, 2], [0, 1, 3], [0, 2, 3], [1, 2, 3]];
    TRIPLETS.iter().any(|&[i, j, k]| {
        let (p, q, r) = (points[i], points[j], points[k]);
        let cross = (q[0] - p[0]) as f64 * (r[1] - p[1]) as f64
            - (q[1] - p[1]) as f64 * (r[0] - p[0]) as f64;
        cross.abs() < SINGULAR_EPS
    })
}

/// Compute the perspective transform mapping four source points onto four destination points.
///
/// Solves the 8 equations given by the point correspondences for the 3x3
/// homography with `h[8] = 1`.
///
/// # Arguments
///
/// * `src` - Four points in the source image.
/// * `dst` - The four corresponding points in the destination image.
///
/// # Errors
///
/// Returns [`ImageError::DegenerateQuad`] if three points of either set are
/// collinear or the linear system is singular.
///
/// # Example
///
/// ```
/// use rastro_imgproc::warp::get_perspective_transform;
///
/// let src = [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]];
/// let dst = [[0.0, 0.0], [2.0, 0.0], [2.0, 2.0], [0.0, 2.0]];
///
/// let m = get_perspective_transform(&src, &dst).unwrap();
/// assert!((m[0] - 2.0).abs() < 1e-6);
/// assert!((m[4] - 2.0).abs() < 1e-6);
/// ```
pub fn get_perspective_transform(
    src: &[[f32; 2]; 4],
    dst: &[[f32; 2]; 4],
) -> Result<[f32; 9], ImageError> {
    if src.iter().chain(dst.iter()).flatten().any(|v| !v.is_finite()) {
        return Err(ImageError::NonFiniteParameter("perspective points"));
    }

    if has_collinear_triplet(src) || has_collinear_triplet(dst) {
        return Err(ImageError::DegenerateQuad);
    }

    let mut a = [0.0f64; 64];
    let mut b = [0.0f64; 8];

    for (i, (s, d)) in src.iter().zip(dst.iter()).enumerate() {
        let (x, y) = (s[0] as f64, s[1] as f64);
        let (u, v) = (d[0] as f64, d[1] as f64);

        // u * (h6 x + h7 y + 1) = h0 x + h1 y + h2
        let row_u = [x, y, 1.0, 0.0, 0.0, 0.0, -x * u, -y * u];
        // v * (h6 x + h7 y + 1) = h3 x + h4 y + h5
        let row_v = [0.0, 0.0, 0.0, x, y, 1.0, -x * v, -y * v];

        a[(2 * i) * 8..(2 * i + 1) * 8].copy_from_slice(&row_u);
        a[(2 * i + 1) * 8..(2 * i + 2) * 8].copy_from_slice(&row_v);
        b[2 * i] = u;
        b[2 * i + 1] = v;
    }

    let h = solve_8x8(&mut a, &mut b).ok_or(ImageError::DegenerateQuad)?;

    let m = [
        h[0] as f32,
        h[1] as f32,
        h[2] as f32,
        h[3] as f32,
        h[4] as f32,
        h[5] as f32,
        h[6] as f32,
        h[7] as f32,
        1.0,
    ];
    log::trace!("perspective transform {src:?} -> {dst:?}: {m:?}");

    Ok(m)
}

/// Applies a perspective transformation to an image.
///
/// * `src` - The input image with shape (height, width, channels).
/// * `m` - The 3x3 perspective transformation matrix src -> dst.
/// * `new_size` - The size of the output image.
/// * `interpolation` - The interpolation mode to use.
///
/// # Returns
///
/// The output image with shape (new_height, new_width, channels).
///
/// # Errors
///
/// Returns [`ImageError::CannotComputeDeterminant`] if `m` is not invertible.
///
/// # Example
///
/// ```
/// use rastro_image::{Image, ImageSize};
/// use rastro_imgproc::interpolation::InterpolationMode;
/// use rastro_imgproc::warp::warp_perspective;
///
/// let src = Image::<f32, 1>::new(
///   ImageSize {
///     width: 4,
///     height: 5,
///   },
///   vec![0.0f32; 4 * 5]
/// ).unwrap();
///
/// let m = [1.0, 0.0, -1.0, 0.0, 1.0, 1.0, 0.0, 0.0, 1.0];
///
/// let dst = warp_perspective(
///   &src,
///   &m,
///   ImageSize { width: 2, height: 3 },
///   InterpolationMode::Bilinear,
/// ).unwrap();
///
/// assert_eq!(dst.size().width, 2);
/// assert_eq!(dst.size().height, 3);
/// ```
pub fn warp_perspective<T: ImageDtype, const C: usize>(
    src: &Image<T, C>,
    m: &[f32; 9],
    new_size: ImageSize,
    interpolation: InterpolationMode,
) -> Result<Image<T, C>, ImageError> {
    let inv_m = inverse_perspective_matrix(m)?;

    let (map_x, map_y) = meshgrid_from_fn(new_size.width, new_size.height, |x, y| {
        let (u, v) = transform_point(x as f32, y as f32, &inv_m);
        // points at infinity never land in the source
        if u.is_finite() && v.is_finite() {
            (u, v)
        } else {
            (-1.0, -1.0)
        }
    });

    remap(src, &map_x, &map_y, new_size, interpolation)
}

/// Project the whole source image onto a quadrilateral of an output canvas.
///
/// The source corners `(0, 0)`, `(w, 0)`, `(w, h)` and `(0, h)` are mapped to
/// the four points of `quad`. Output pixels outside the projected area are zero.
///
/// # Arguments
///
/// * `src` - The input image.
/// * `quad` - Destination corners: top-left, top-right, bottom-right, bottom-left.
/// * `new_size` - The size of the output canvas.
/// * `interpolation` - The interpolation mode to use.
///
/// # Errors
///
/// * [`ImageError::InvalidImageDimensions`] if the canvas or the source is empty.
/// * [`ImageError::DegenerateQuad`] if three of the points are collinear.
pub fn warp_quad<T: ImageDtype, const C: usize>(
    src: &Image<T, C>,
    quad: &QuadPoints,
    new_size: ImageSize,
    interpolation: InterpolationMode,
) -> Result<Image<T, C>, ImageError> {
    if new_size.width == 0 || new_size.height == 0 {
        return Err(ImageError::InvalidImageDimensions(
            new_size.width as i64,
            new_size.height as i64,
        ));
    }

    if src.width() == 0 || src.height() == 0 {
        return Err(ImageError::InvalidImageDimensions(
            src.width() as i64,
            src.height() as i64,
        ));
    }

    let (w, h) = (src.width() as f32, src.height() as f32);
    let src_points = [[0.0, 0.0], [w, 0.0], [w, h], [0.0, h]];
    let dst_points = quad.map(|[x, y]| [x as f32, y as f32]);

    let m = get_perspective_transform(&src_points, &dst_points)?;

    warp_perspective(src, &m, new_size, interpolation)
}
