//! 2D polygon predicates.
//!
//! Purpose
//! - Robust, allocation-free primitives for the polygon sampling engine:
//!   orientation, on-segment, segment-on-segment intersection, and the
//!   ray-casting containment oracle built on top of them.
//!
//! Why this shape
//! - Pure functions over `Vector2<f32>` slices; no polygon struct at this
//!   level. The light entity owns vertex storage and hands scaled slices
//!   down, so the predicates stay reusable against any vertex list.
//!
//! Code cross-refs: `crate::light` (snapshot owner), `crate::light::sampling`
//! (the only hot caller of `point_in_polygon`).

mod contains;
mod primitives;

pub use contains::point_in_polygon;
pub use primitives::{on_segment, orientation, segments_intersect, Orientation};
