//! Utilities shared by the ribbon generation routines.

use crate::resource::VertexIndex;
use glamx::Vec3;

/// Pushes the two triangles joining the vertex pair of point `j` to the pair of point `j + 1`.
///
/// With `n = 2 * j`, the left/right copies of point `j` are `n`/`n + 1` and those of point
/// `j + 1` are `n + 2`/`n + 3`. The triangles are `(n, n + 1, n + 2)` and `(n + 2, n + 1, n + 3)`.
#[inline]
pub fn push_ribbon_quad_indices(j: VertexIndex, out: &mut Vec<[VertexIndex; 3]>) {
    let n = j * 2;
    out.push([n, n + 1, n + 2]);
    out.push([n + 2, n + 1, n + 3]);
}

/// Is the polyline closed, i.e., are its first and last points exactly equal?
///
/// This is an exact floating-point comparison: nearly-equal endpoints are *not* considered
/// a closed loop.
#[inline]
pub fn is_closed_loop(points: &[Vec3]) -> bool {
    match (points.first(), points.last()) {
        (Some(first), Some(last)) if points.len() > 1 => first == last,
        _ => false,
    }
}

/// The normalized position `j / (n - 1)` of the `j`-th of `n` points.
///
/// Returns `0.0` for a single-point polyline.
#[inline]
pub fn normalized_parameter(j: usize, n: usize) -> f32 {
    if n < 2 {
        0.0
    } else {
        j as f32 / (n - 1) as f32
    }
}
