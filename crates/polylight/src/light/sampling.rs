//! Uniform interior samples via rejection against the scaled-bounds box.
//!
//! Purpose
//! - Produce exactly `count` points, each i.i.d. uniform over the polygon's
//!   interior, for ground-truth illumination estimates. Short-changing the
//!   batch would bias the downstream integral, so the loop retries until it
//!   has every sample.
//!
//! Model
//! - Draw `(u, v)` uniform in `[0, 1)²`, map into the polygon's axis-aligned
//!   bounds, keep the candidate iff it passes the ray-casting oracle.
//!   Expected draw count is `count / (area / box_area)`; there is no
//!   iteration cap, so a zero-area polygon does not terminate. Callers hold
//!   the ≥3-vertex, non-self-intersecting contract.

use nalgebra::{Vector2, Vector3};
use rand::Rng;

use crate::geom2::point_in_polygon;

/// One regenerated-wholesale batch of interior points.
///
/// `local` points live in the polygon's (scaled) local plane at z = 0;
/// `world[i]` is `local[i]` pushed through the light's world matrix. The two
/// halves always have equal length.
#[derive(Clone, Debug, Default)]
pub struct SampleBatch {
    pub local: Vec<Vector3<f32>>,
    pub world: Vec<Vector3<f32>>,
}

impl SampleBatch {
    #[inline]
    pub fn len(&self) -> usize {
        self.local.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.local.is_empty()
    }
}

/// Rejection-sample `count` points uniformly inside `vertices`.
///
/// `min`/`max` must be the axis-aligned bounds of `vertices`; a looser box
/// stays correct but wastes draws, a tighter one clips the distribution.
/// Runs until `count` candidates are accepted — unbounded for degenerate
/// (near-zero-area) polygons.
pub fn sample_polygon<R: Rng>(
    vertices: &[Vector2<f32>],
    min: Vector2<f32>,
    max: Vector2<f32>,
    count: usize,
    rng: &mut R,
) -> Vec<Vector2<f32>> {
    let extent = max - min;
    let mut out = Vec::with_capacity(count);
    while out.len() < count {
        let u: f32 = rng.gen();
        let v: f32 = rng.gen();
        let candidate = Vector2::new(min.x + u * extent.x, min.y + v * extent.y);
        if point_in_polygon(vertices, candidate) {
            out.push(candidate);
        }
    }
    out
}
