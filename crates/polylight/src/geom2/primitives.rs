//! Orientation and segment-intersection predicates.
//!
//! Purpose
//! - Provide the three primitives the ray-casting containment test is built
//!   from: triplet orientation, on-segment containment, and the full
//!   segment-on-segment intersection test with its colinear fallbacks.
//!
//! Numerics
//! - Orientation treats any cross-product magnitude below `f32::EPSILON` as
//!   colinear. Query points and polygon edges both come out of float
//!   arithmetic, so exact colinearity is unreachable and a hard `== 0.0`
//!   test would miss grazing configurations.

use nalgebra::Vector2;

/// Rotational order of an ordered point triplet `(p, q, r)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Orientation {
    Colinear,
    Clockwise,
    CounterClockwise,
}

/// Orientation of the ordered triplet `(p, q, r)`.
///
/// Sign of the cross product `(q - p) × (r - q)`; magnitudes below
/// `f32::EPSILON` count as colinear.
#[inline]
pub fn orientation(p: Vector2<f32>, q: Vector2<f32>, r: Vector2<f32>) -> Orientation {
    let val = (q.y - p.y) * (r.x - q.x) - (q.x - p.x) * (r.y - q.y);
    if val.abs() < f32::EPSILON {
        Orientation::Colinear
    } else if val > 0.0 {
        Orientation::Clockwise
    } else {
        Orientation::CounterClockwise
    }
}

/// Whether `q` lies inside the axis-aligned bounding box of `p` and `r`.
///
/// Callers must already know the three points are colinear; this only checks
/// coordinate containment, not colinearity.
#[inline]
pub fn on_segment(p: Vector2<f32>, q: Vector2<f32>, r: Vector2<f32>) -> bool {
    q.x <= p.x.max(r.x) && q.x >= p.x.min(r.x) && q.y <= p.y.max(r.y) && q.y >= p.y.min(r.y)
}

/// Whether segment `p1q1` intersects segment `p2q2`.
///
/// General case: the endpoints of each segment straddle the other segment
/// (both orientation pairs differ). The four colinear fallbacks catch
/// endpoint-touching and overlapping configurations that the straddle test
/// misses; all five branches are needed for rays running along polygon
/// edges or through vertices.
pub fn segments_intersect(
    p1: Vector2<f32>,
    q1: Vector2<f32>,
    p2: Vector2<f32>,
    q2: Vector2<f32>,
) -> bool {
    let o1 = orientation(p1, q1, p2);
    let o2 = orientation(p1, q1, q2);
    let o3 = orientation(p2, q2, p1);
    let o4 = orientation(p2, q2, q1);

    if o1 != o2 && o3 != o4 {
        return true;
    }

    // p1, q1, p2 colinear and p2 lies on p1q1
    if o1 == Orientation::Colinear && on_segment(p1, p2, q1) {
        return true;
    }
    // p1, q1, q2 colinear and q2 lies on p1q1
    if o2 == Orientation::Colinear && on_segment(p1, q2, q1) {
        return true;
    }
    // p2, q2, p1 colinear and p1 lies on p2q2
    if o3 == Orientation::Colinear && on_segment(p2, p1, q2) {
        return true;
    }
    // p2, q2, q1 colinear and q1 lies on p2q2
    if o4 == Orientation::Colinear && on_segment(p2, q1, q2) {
        return true;
    }

    false
}
