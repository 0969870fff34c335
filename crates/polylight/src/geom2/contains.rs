//! Point-in-polygon containment via ray casting (even-odd rule).
//!
//! Purpose
//! - Decide containment of one query point against one simple polygon. This
//!   is the accept/reject predicate of the rejection sampler, so it runs
//!   once per candidate draw and has to be exact on the boundary cases the
//!   sampler can actually produce (horizontal rays grazing vertices and
//!   edge-aligned configurations).
//!
//! Conventions
//! - The polygon is an ordered vertex list, closed implicitly (last vertex
//!   connects back to the first). Winding order does not matter here; the
//!   even-odd rule is orientation-independent.
//! - Fewer than 3 vertices is not a polygon: the answer is `false`, not an
//!   error (mirrors the sampler's "candidate rejected" view).

use nalgebra::Vector2;

use super::primitives::{on_segment, orientation, segments_intersect, Orientation};

/// Whether `p` lies inside (or on the boundary of) the polygon.
///
/// Casts a horizontal ray from `p` to `(f32::MAX, p.y)` and counts edge
/// crossings; an odd count means inside. `f32::MAX` stands in for the point
/// at infinity — it is outside any polygon this engine ever sees, and
/// keeping the query's y coordinate makes the ray horizontal so the edge
/// tests stay exact.
pub fn point_in_polygon(vertices: &[Vector2<f32>], p: Vector2<f32>) -> bool {
    let n = vertices.len();
    if n < 3 {
        return false;
    }

    let extreme = Vector2::new(f32::MAX, p.y);

    let mut count = 0usize;
    for i in 0..n {
        let next = (i + 1) % n;
        if segments_intersect(vertices[i], vertices[next], p, extreme) {
            // A query point colinear with the edge is decided by the edge
            // itself; counting crossings here would double-count the ray
            // grazing a vertex or running along the edge.
            if orientation(vertices[i], p, vertices[next]) == Orientation::Colinear {
                return on_segment(vertices[i], p, vertices[next]);
            }
            count += 1;
        }
    }

    count % 2 == 1
}
