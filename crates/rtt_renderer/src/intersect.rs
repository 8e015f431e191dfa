//! Ray-shape intersection entry point.
//!
//! Every shape implements [`Intersect`]; `Geometry` dispatches to the shape it
//! wraps. Degenerate cases (parallel rays, zero-area triangles, zero-length
//! directions) are reported as misses, never as errors.

use rtt_core::Geometry;
use rtt_math::{Ray, Vec3};

/// Global intersection tolerance.
///
/// Hits closer than this to the ray origin are rejected so that secondary
/// rays leaving a surface do not re-hit it.
pub const EPSILON: f32 = 1e-4;

/// Record of a ray-object intersection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Intersection {
    /// Point of intersection
    pub point: Vec3,
    /// Unit surface normal at the intersection
    pub normal: Vec3,
    /// Distance along the ray
    pub t: f32,
}

impl Intersection {
    pub fn new(ray: &Ray, t: f32, normal: Vec3) -> Self {
        Self {
            point: ray.at(t),
            normal,
            t,
        }
    }
}

/// Trait for shapes that can be hit by rays.
pub trait Intersect {
    /// Nearest intersection along `ray`, if any.
    fn intersect(&self, ray: &Ray) -> Option<Intersection>;
}

impl Intersect for Geometry {
    fn intersect(&self, ray: &Ray) -> Option<Intersection> {
        if ray.is_degenerate() {
            return None;
        }
        match self {
            Geometry::Sphere(sphere) => sphere.intersect(ray),
            Geometry::Plane(plane) => plane.intersect(ray),
            Geometry::Mesh(mesh) => mesh.intersect(ray),
        }
    }
}
