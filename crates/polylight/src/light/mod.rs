//! Planar polygonal area light: transform state, derived snapshot, samples.
//!
//! Purpose
//! - Own the light's local polygon, scale, and pose, and keep every derived
//!   field (world matrices, signed area, scaled-space bounds, world-space
//!   vertices, sample batch) consistent with them.
//!
//! Why this design
//! - Every setter runs a full `update()`. Recomputing the whole snapshot is
//!   deliberate: the derived fields cross-reference each other (bounds feed
//!   the sampler, the world matrix feeds the batch), and incremental
//!   patching is exactly where partially-updated state would leak out
//!   between setters.
//!
//! Caller contract
//! - Vertices are counter-clockwise and non-self-intersecting. Clockwise
//!   input flips the area sign; self-intersecting input yields garbage
//!   containment, and neither is detected here.
//!
//! Code cross-refs: `transform` (matrix construction), `sampling`
//! (rejection loop), `crate::geom2` (containment oracle).

pub mod sampling;
pub mod transform;

use nalgebra::{Matrix4, Point3, Vector2, Vector3};
use rand::rngs::StdRng;
use rand::SeedableRng;

use self::sampling::{sample_polygon, SampleBatch};
use self::transform::{inverse_transpose, pose_look_at, world_matrix};

/// Sample batch capacity, shared with the consuming shading stage.
pub const NUM_SAMPLES: usize = 512;

/// Vertex slots in [`PolygonDescriptor`], shared with the shading stage.
pub const MAX_VERTICES: usize = 5;

/// Fill value for unused descriptor vertex slots.
pub const VERTEX_SENTINEL: f32 = f32::MAX;

/// Per-frame polygon descriptor for the edge-reconstructing shading stage.
///
/// Vertices are the light's local (unscaled) 2D polygon; the consumer lifts
/// them to z = 0 and applies `world` per pixel. Slots past `vertex_count`
/// hold [`VERTEX_SENTINEL`] pairs.
#[derive(Clone, Copy, Debug)]
pub struct PolygonDescriptor {
    pub world: Matrix4<f32>,
    pub world_inv_t: Matrix4<f32>,
    pub vertices: [Vector2<f32>; MAX_VERTICES],
    pub vertex_count: usize,
}

/// A planar polygonal light source.
///
/// Defaults to the CCW unit square `(-1,1), (-1,-1), (1,-1), (1,1)` with
/// unit scale, identity pose, and sample generation enabled.
#[derive(Clone, Debug)]
pub struct AreaLight {
    // authoritative state
    vertices: Vec<Vector2<f32>>,
    scaling: Vector2<f32>,
    pose: Matrix4<f32>,
    intensity: Vector3<f32>,
    generate_samples: bool,
    rng: StdRng,

    // derived snapshot, rebuilt wholesale by update()
    scaled_vertices: Vec<Vector2<f32>>,
    transformed_vertices: Vec<Vector3<f32>>,
    world: Matrix4<f32>,
    world_inv_t: Matrix4<f32>,
    area: f32,
    bounds_min: Vector2<f32>,
    bounds_max: Vector2<f32>,
    samples: SampleBatch,
}

impl AreaLight {
    /// New default light with an entropy-seeded sample rng.
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// New default light with a deterministic rng; equal seeds replay equal
    /// sample batches.
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        let mut light = Self {
            vertices: vec![
                Vector2::new(-1.0, 1.0),
                Vector2::new(-1.0, -1.0),
                Vector2::new(1.0, -1.0),
                Vector2::new(1.0, 1.0),
            ],
            scaling: Vector2::new(1.0, 1.0),
            pose: Matrix4::identity(),
            intensity: Vector3::new(1.0, 1.0, 1.0),
            generate_samples: true,
            rng,
            scaled_vertices: Vec::new(),
            transformed_vertices: Vec::new(),
            world: Matrix4::identity(),
            world_inv_t: Matrix4::identity(),
            area: 0.0,
            bounds_min: Vector2::zeros(),
            bounds_max: Vector2::zeros(),
            samples: SampleBatch::default(),
        };
        light.update();
        light
    }

    /// Replace the polygon (local 2D, CCW, non-self-intersecting).
    pub fn set_vertices(&mut self, vertices: Vec<Vector2<f32>>) {
        self.vertices = vertices;
        self.update();
    }

    /// Set the local x/y scale (z is meaningless for a planar polygon).
    pub fn set_scaling(&mut self, scaling: Vector2<f32>) {
        self.scaling = scaling;
        self.update();
    }

    /// Aim the light at `target` from `position`.
    pub fn set_pose(&mut self, position: Point3<f32>, target: Point3<f32>, up: Vector3<f32>) {
        self.pose = pose_look_at(position, target, up);
        self.update();
    }

    /// Override the pose matrix directly.
    pub fn set_transform_matrix(&mut self, pose: Matrix4<f32>) {
        self.pose = pose;
        self.update();
    }

    /// Set the RGB radiant intensity.
    pub fn set_intensity(&mut self, intensity: Vector3<f32>) {
        self.intensity = intensity;
        self.update();
    }

    /// Toggle sample (re)generation. The closed-form approximation paths
    /// never read the batch, so consumers switch this off to skip the
    /// rejection loop on every transform change.
    pub fn set_sample_generation(&mut self, enabled: bool) {
        self.generate_samples = enabled;
        self.update();
    }

    pub fn vertices(&self) -> &[Vector2<f32>] {
        &self.vertices
    }

    pub fn scaled_vertices(&self) -> &[Vector2<f32>] {
        &self.scaled_vertices
    }

    /// World-space polygon vertices (local lifted to z = 0, then `world`).
    pub fn transformed_vertices(&self) -> &[Vector3<f32>] {
        &self.transformed_vertices
    }

    pub fn scaling(&self) -> Vector2<f32> {
        self.scaling
    }

    pub fn intensity(&self) -> Vector3<f32> {
        self.intensity
    }

    /// Signed area of the scaled polygon. Positive iff the winding is CCW.
    pub fn area(&self) -> f32 {
        self.area
    }

    /// Axis-aligned bounds of the scaled local-space vertices — the
    /// rejection-sampling domain.
    pub fn bounds(&self) -> (Vector2<f32>, Vector2<f32>) {
        (self.bounds_min, self.bounds_max)
    }

    pub fn transform_matrix(&self) -> &Matrix4<f32> {
        &self.world
    }

    pub fn inverse_transpose_matrix(&self) -> &Matrix4<f32> {
        &self.world_inv_t
    }

    /// The current sample batch (empty while generation is disabled).
    pub fn samples(&self) -> &SampleBatch {
        &self.samples
    }

    /// Total emitted power, `luminance(intensity) · π · area`. Used by
    /// light-picking heuristics; inherits the area's sign for CW input.
    pub fn power(&self) -> f32 {
        luminance(self.intensity) * std::f32::consts::PI * self.area
    }

    /// Descriptor for the shading stage. Polygons beyond [`MAX_VERTICES`]
    /// are truncated (the shader-side array is the hard limit).
    pub fn descriptor(&self) -> PolygonDescriptor {
        let mut slots = [Vector2::new(VERTEX_SENTINEL, VERTEX_SENTINEL); MAX_VERTICES];
        let count = self.vertices.len().min(MAX_VERTICES);
        slots[..count].copy_from_slice(&self.vertices[..count]);
        PolygonDescriptor {
            world: self.world,
            world_inv_t: self.world_inv_t,
            vertices: slots,
            vertex_count: count,
        }
    }

    /// Rebuild the whole derived snapshot from the authoritative state.
    ///
    /// Order matters: matrices first, then scaled vertices, then area /
    /// bounds / world vertices, and the sample batch last so it always sees
    /// the fresh bounds and transform.
    fn update(&mut self) {
        self.world = world_matrix(&self.pose, self.scaling);
        self.world_inv_t = inverse_transpose(&self.world);

        self.scaled_vertices = self
            .vertices
            .iter()
            .map(|v| v.component_mul(&self.scaling))
            .collect();

        // Shoelace over the scaled vertices: the scale factors are folded
        // into every term, so area == sx·sy·(unscaled shoelace).
        let n = self.scaled_vertices.len();
        let mut area = 0.0f32;
        for i in 0..n {
            let j = (i + 1) % n;
            let p = self.scaled_vertices[i];
            let q = self.scaled_vertices[j];
            area += p.x * q.y - p.y * q.x;
        }
        self.area = area * 0.5;

        let mut min = Vector2::new(f32::INFINITY, f32::INFINITY);
        let mut max = Vector2::new(f32::NEG_INFINITY, f32::NEG_INFINITY);
        for v in &self.scaled_vertices {
            min.x = min.x.min(v.x);
            min.y = min.y.min(v.y);
            max.x = max.x.max(v.x);
            max.y = max.y.max(v.y);
        }
        if n == 0 {
            min = Vector2::zeros();
            max = Vector2::zeros();
        }
        self.bounds_min = min;
        self.bounds_max = max;

        self.transformed_vertices = self
            .vertices
            .iter()
            .map(|v| {
                self.world
                    .transform_point(&Point3::new(v.x, v.y, 0.0))
                    .coords
            })
            .collect();

        self.resample();
    }

    /// Regenerate the sample batch wholesale. Skipped when generation is
    /// disabled or the polygon has fewer than 3 vertices (the oracle would
    /// reject every candidate and the loop would never finish).
    fn resample(&mut self) {
        if !self.generate_samples || self.scaled_vertices.len() < 3 {
            self.samples = SampleBatch::default();
            return;
        }
        let accepted = sample_polygon(
            &self.scaled_vertices,
            self.bounds_min,
            self.bounds_max,
            NUM_SAMPLES,
            &mut self.rng,
        );
        let local: Vec<Vector3<f32>> = accepted
            .iter()
            .map(|p| Vector3::new(p.x, p.y, 0.0))
            .collect();
        let world: Vec<Vector3<f32>> = local
            .iter()
            .map(|p| self.world.transform_point(&Point3::from(*p)).coords)
            .collect();
        self.samples = SampleBatch { local, world };
    }
}

impl Default for AreaLight {
    fn default() -> Self {
        Self::new()
    }
}

/// Rec. 709 luminance of an RGB intensity.
#[inline]
fn luminance(rgb: Vector3<f32>) -> f32 {
    rgb.x * 0.2126 + rgb.y * 0.7152 + rgb.z * 0.0722
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom2::point_in_polygon;

    #[test]
    fn default_square_has_area_four() {
        let light = AreaLight::with_seed(1);
        assert!((light.area() - 4.0).abs() < 1e-6);
        let (min, max) = light.bounds();
        assert_eq!(min, Vector2::new(-1.0, -1.0));
        assert_eq!(max, Vector2::new(1.0, 1.0));
    }

    #[test]
    fn area_scales_by_sx_sy() {
        let mut light = AreaLight::with_seed(1);
        light.set_scaling(Vector2::new(0.25, 0.25));
        assert!((light.area() - 0.25).abs() < 1e-6);
        light.set_scaling(Vector2::new(2.0, 3.0));
        assert!((light.area() - 24.0).abs() < 1e-5);
        let (min, max) = light.bounds();
        assert!((min - Vector2::new(-2.0, -3.0)).norm() < 1e-6);
        assert!((max - Vector2::new(2.0, 3.0)).norm() < 1e-6);
    }

    #[test]
    fn clockwise_winding_negates_area_but_not_containment() {
        let mut light = AreaLight::with_seed(1);
        let mut reversed = light.vertices().to_vec();
        reversed.reverse();
        light.set_vertices(reversed.clone());
        assert!((light.area() + 4.0).abs() < 1e-6);
        assert!(point_in_polygon(&reversed, Vector2::new(0.3, -0.4)));
        assert!(!point_in_polygon(&reversed, Vector2::new(1.5, 0.0)));
    }

    #[test]
    fn batch_has_capacity_samples_all_inside_scaled_polygon() {
        let mut light = AreaLight::with_seed(9);
        light.set_scaling(Vector2::new(0.5, 2.0));
        let batch = light.samples();
        assert_eq!(batch.len(), NUM_SAMPLES);
        for p in &batch.local {
            assert!(point_in_polygon(
                light.scaled_vertices(),
                Vector2::new(p.x, p.y)
            ));
        }
    }

    #[test]
    fn equal_seeds_replay_equal_batches() {
        let a = AreaLight::with_seed(123);
        let b = AreaLight::with_seed(123);
        assert_eq!(a.samples().len(), b.samples().len());
        for (p, q) in a.samples().local.iter().zip(b.samples().local.iter()) {
            assert_eq!(p, q);
        }
    }

    #[test]
    fn setters_regenerate_the_batch_wholesale() {
        let mut light = AreaLight::with_seed(5);
        let before = light.samples().local.clone();
        light.set_scaling(Vector2::new(1.0, 1.0)); // no-op value, still resamples
        let after = light.samples().local.clone();
        assert_eq!(before.len(), after.len());
        assert!(
            before.iter().zip(after.iter()).any(|(p, q)| p != q),
            "batch should be redrawn on every update"
        );
    }

    #[test]
    fn disabling_sample_generation_empties_the_batch() {
        let mut light = AreaLight::with_seed(5);
        assert_eq!(light.samples().len(), NUM_SAMPLES);
        light.set_sample_generation(false);
        assert!(light.samples().is_empty());
        light.set_sample_generation(true);
        assert_eq!(light.samples().len(), NUM_SAMPLES);
    }

    #[test]
    fn world_samples_follow_the_transform() {
        let mut light = AreaLight::with_seed(2);
        light.set_transform_matrix(Matrix4::new_translation(&Vector3::new(0.0, 0.0, 10.0)));
        let batch = light.samples();
        for (l, w) in batch.local.iter().zip(batch.world.iter()) {
            assert!((w.x - l.x).abs() < 1e-5);
            assert!((w.y - l.y).abs() < 1e-5);
            assert!((w.z - 10.0).abs() < 1e-5);
        }
    }

    #[test]
    fn transformed_vertices_sit_on_the_posed_plane() {
        let mut light = AreaLight::with_seed(3);
        light.set_pose(
            Point3::new(0.0, 2.0, 0.0),
            Point3::new(0.0, 0.0, 0.0),
            Vector3::z(),
        );
        // The polygon centroid (local origin) must land at the pose position.
        let c = light
            .transformed_vertices()
            .iter()
            .fold(Vector3::zeros(), |acc, v| acc + v)
            / light.transformed_vertices().len() as f32;
        assert!((c - Vector3::new(0.0, 2.0, 0.0)).norm() < 1e-4);
    }

    #[test]
    fn descriptor_pads_with_sentinel() {
        let mut light = AreaLight::with_seed(4);
        light.set_vertices(vec![
            Vector2::new(0.0, 0.0),
            Vector2::new(1.0, 0.0),
            Vector2::new(0.0, 1.0),
        ]);
        let d = light.descriptor();
        assert_eq!(d.vertex_count, 3);
        for slot in &d.vertices[3..] {
            assert_eq!(slot.x, VERTEX_SENTINEL);
            assert_eq!(slot.y, VERTEX_SENTINEL);
        }
        assert_eq!(d.vertices[1], Vector2::new(1.0, 0.0));
    }

    #[test]
    fn power_is_luminance_pi_area() {
        let mut light = AreaLight::with_seed(6);
        light.set_intensity(Vector3::new(1.0, 1.0, 1.0));
        // Rec. 709 weights sum to 1, area is 4.
        assert!((light.power() - 4.0 * std::f32::consts::PI).abs() < 1e-4);
    }

    #[test]
    fn undersized_polygon_yields_no_samples() {
        let mut light = AreaLight::with_seed(8);
        light.set_vertices(vec![Vector2::new(0.0, 0.0), Vector2::new(1.0, 0.0)]);
        assert!(light.samples().is_empty());
        assert!(light.area().abs() < 1e-6);
    }
}
