/// Clamp a possibly out of range index to `[0, len)`.
///
/// Implements border replication: positions before the first sample map to the
/// first one and positions after the last sample map to the last one.
#[inline]
pub(crate) fn replicate_index(idx: isize, len: usize) -> usize {
    idx.clamp(0, len as isize - 1) as usize
}

/// Precompute the replicated source index for every offset of a window.
///
/// Returns, for each output position `i` in `0..len`, the clamped indices
/// `i - radius ..= i + radius`, flattened row by row.
pub(crate) fn replicate_offsets(len: usize, radius: usize) -> Vec<usize> {
    let window = 2 * radius + 1;
    let mut offsets = Vec::with_capacity(len * window);
    for i in 0..len as isize {
        for k in -(radius as isize)..=radius as isize {
            offsets.push(replicate_index(i + k, len));
        }
    }
    offsets
}
