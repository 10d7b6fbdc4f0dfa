/// Create a grid of source coordinates from a function of the destination pixel.
///
/// # Arguments
///
/// * `cols` - The number of columns of the destination grid.
/// * `rows` - The number of rows of the destination grid.
/// * `f` - Maps a destination `(x, y)` to a source `(u, v)`.
///
/// # Returns
///
/// A tuple of row-major vectors of length `rows * cols` holding the u and v coordinates.
pub fn meshgrid_from_fn(
    cols: usize,
    rows: usize,
    f: impl Fn(usize, usize) -> (f32, f32),
) -> (Vec<f32>, Vec<f32>) {
    let mut map_x = Vec::with_capacity(rows * cols);
    let mut map_y = Vec::with_capacity(rows * cols);

    for y in 0..rows {
        for x in 0..cols {
            let (u, v) = f(x, y);
            map_x.push(u);
            map_y.push(v);
        }
    }

    (map_x, map_y)
}
