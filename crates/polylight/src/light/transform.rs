//! World-transform construction for planar lights.
//!
//! Purpose
//! - Build the light's 4x4 world matrix from a look-at pose plus a 2-axis
//!   local scale, and derive the inverse-transpose used for normal-like
//!   vectors.
//!
//! Conventions
//! - The pose is rigid (position + aim + up); scale composes on the right,
//!   i.e. it is applied in the polygon's local space before the pose.
//! - Scale only has x/y components because the light geometry lives in the
//!   local z = 0 plane.

use nalgebra::{Matrix4, Point3, Vector2, Vector3};

/// Rigid pose matrix aiming a light at `target` from `position`.
///
/// `look_at_rh` produces the view matrix (world-to-eye) pointed the camera
/// way, so we invert it and aim at the reflected target `2·position −
/// target` to get an object-to-world matrix that faces the light towards
/// `target`.
pub fn pose_look_at(
    position: Point3<f32>,
    target: Point3<f32>,
    up: Vector3<f32>,
) -> Matrix4<f32> {
    let flipped = Point3::from(2.0 * position.coords - target.coords);
    let view = Matrix4::look_at_rh(&position, &flipped, &up);
    // A rigid look-at is always invertible; the identity fallback only
    // triggers for degenerate up vectors (up parallel to the aim axis).
    view.try_inverse().unwrap_or_else(Matrix4::identity)
}

/// Full world matrix: pose first, local x/y scale on the right.
#[inline]
pub fn world_matrix(pose: &Matrix4<f32>, scaling: Vector2<f32>) -> Matrix4<f32> {
    pose * Matrix4::new_nonuniform_scaling(&Vector3::new(scaling.x, scaling.y, 1.0))
}

/// Inverse-transpose of a world matrix, for transforming normal-like vectors.
///
/// Falls back to the identity if the matrix is singular (zero scale); the
/// world matrix itself is left untouched so callers still see the
/// degenerate transform they asked for.
#[inline]
pub fn inverse_transpose(m: &Matrix4<f32>) -> Matrix4<f32> {
    m.transpose()
        .try_inverse()
        .unwrap_or_else(Matrix4::identity)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pose_places_origin_at_position() {
        let pos = Point3::new(-0.5, 0.7, -0.5);
        let pose = pose_look_at(pos, Point3::new(-0.3, 0.7, 0.48), Vector3::y());
        let origin = pose.transform_point(&Point3::origin());
        assert!((origin - pos).norm() < 1e-5);
    }

    #[test]
    fn pose_aims_local_z_at_target() {
        // With the reflected-target flip, the light's local +z (its normal
        // in the plane convention) ends up pointing at the target.
        let pos = Point3::new(0.0, 0.0, 0.0);
        let target = Point3::new(0.0, 0.0, 5.0);
        let pose = pose_look_at(pos, target, Vector3::y());
        let z = pose.transform_vector(&Vector3::z());
        assert!((z.z - 1.0).abs() < 1e-5, "local z should aim at target, got {z:?}");
    }

    #[test]
    fn world_applies_scale_before_pose() {
        let pose = Matrix4::new_translation(&Vector3::new(1.0, 2.0, 3.0));
        let w = world_matrix(&pose, Vector2::new(2.0, 0.5));
        let p = w.transform_point(&Point3::new(1.0, 1.0, 0.0));
        assert!((p - Point3::new(3.0, 2.5, 3.0)).norm() < 1e-6);
    }

    #[test]
    fn inverse_transpose_of_rigid_pose_matches_pose() {
        // For pure rotation+translation the inverse-transpose equals the
        // matrix itself on direction vectors.
        let pose = pose_look_at(
            Point3::new(1.0, 2.0, 3.0),
            Point3::new(0.0, 0.0, 0.0),
            Vector3::y(),
        );
        let it = inverse_transpose(&pose);
        let v = Vector3::new(0.3, -0.2, 0.9);
        let a = pose.transform_vector(&v);
        let b = it.transform_vector(&v);
        assert!((a - b).norm() < 1e-4);
    }
}
