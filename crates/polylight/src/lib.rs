//! Polygon geometry and sampling engine for planar area lights.
//!
//! What lives here
//! - `geom2`: orientation / segment-intersection primitives and the
//!   ray-casting point-in-polygon oracle.
//! - `light`: the `AreaLight` entity — polygon + scale + pose in, fully
//!   recomputed derived snapshot (world matrices, signed area, bounds,
//!   world vertices) and a wholesale-regenerated uniform sample batch out.
//! - `table`: packing of precomputed LTC/LTSH coefficient tables into the
//!   padded, tiled binary16 layout the texture-upload side consumes.
//!
//! What deliberately does not live here: shading math, GPU resources,
//! UI/input, model loading, and the numeric-array file decoder. Those
//! collaborators only ever see the descriptor, the sample batch, and the
//! packed tables.

pub mod geom2;
pub mod light;
pub mod table;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// Convenience aliases so caller code reads like the math.
pub use nalgebra::{Matrix4 as Mat4, Point3 as Pt3, Vector2 as Vec2, Vector3 as Vec3};

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::geom2::{
        on_segment, orientation, point_in_polygon, segments_intersect, Orientation,
    };
    pub use crate::light::sampling::{sample_polygon, SampleBatch};
    pub use crate::light::{
        AreaLight, PolygonDescriptor, MAX_VERTICES, NUM_SAMPLES, VERTEX_SENTINEL,
    };
    pub use crate::table::{narrow, pack_tiled, Narrow, PackError, TableShape};
    pub use nalgebra::{Matrix4 as Mat4, Point3 as Pt3, Vector2 as Vec2, Vector3 as Vec3};
}
