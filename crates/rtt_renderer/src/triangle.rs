//! Triangle mesh intersection.
//!
//! Uses the Möller-Trumbore algorithm for ray-triangle intersection, behind a
//! bounding sphere and bounding box cull.

use rtt_core::{Mesh, Vertex};
use rtt_math::{Interval, Ray};

use crate::intersect::{Intersect, Intersection, EPSILON};
use crate::sphere::test_ray_sphere;

/// Möller-Trumbore test against one triangle. Returns the ray parameter.
///
/// Near-parallel and degenerate triangles are skipped.
pub fn intersect_triangle(ray: &Ray, v0: &Vertex, v1: &Vertex, v2: &Vertex) -> Option<f32> {
    let edge1 = v1.position - v0.position;
    let edge2 = v2.position - v0.position;

    let h = ray.direction.cross(edge2);
    let a = edge1.dot(h);
    if a.abs() <= EPSILON {
        return None;
    }

    let f = 1.0 / a;
    let s = ray.origin - v0.position;
    let u = f * s.dot(h);
    if !(0.0..=1.0).contains(&u) {
        return None;
    }

    let q = s.cross(edge1);
    let v = f * ray.direction.dot(q);
    if v < 0.0 || u + v > 1.0 {
        return None;
    }

    let t = f * edge2.dot(q);
    (t > EPSILON).then_some(t)
}

impl Intersect for Mesh {
    fn intersect(&self, ray: &Ray) -> Option<Intersection> {
        if !test_ray_sphere(ray, &self.bounding_sphere())
            || !self.aabb().hit(ray, Interval::from_min(0.0))
        {
            return None;
        }

        // Any triangle can be the closest one, so test them all
        let mut nearest: Option<(f32, &Vertex)> = None;
        for tri in self.triangles() {
            if let Some(t) = intersect_triangle(ray, &tri[0], &tri[1], &tri[2]) {
                if nearest.map_or(true, |(best, _)| t < best) {
                    nearest = Some((t, &tri[0]));
                }
            }
        }

        nearest.map(|(t, v0)| Intersection::new(ray, t, v0.normal))
    }
}
