//! Ray-sphere intersection.
//!
//! Geometric method (Real-Time Rendering, 3rd ed., p. 741): project the
//! centre onto the ray, then compare the perpendicular distance against the
//! radius.

use rtt_core::Sphere;
use rtt_math::Ray;

use crate::intersect::{Intersect, Intersection, EPSILON};

/// Hit/miss test without computing the hit record.
///
/// Used as a cheap bounding-volume cull, so it also accepts rays that start
/// inside the sphere.
pub fn test_ray_sphere(ray: &Ray, sphere: &Sphere) -> bool {
    let l = sphere.center - ray.origin;
    let s = l.dot(ray.direction);
    let ll = l.dot(l);
    let rr = sphere.radius * sphere.radius;

    // Origin outside, pointing away
    if s < 0.0 && ll > rr {
        return false;
    }

    ll - s * s <= rr
}

impl Intersect for Sphere {
    fn intersect(&self, ray: &Ray) -> Option<Intersection> {
        let l = self.center - ray.origin;
        let s = l.dot(ray.direction);
        let ll = l.dot(l);
        let rr = self.radius * self.radius;

        if s < 0.0 && ll > rr {
            return None;
        }

        let mm = ll - s * s;
        if mm > rr {
            return None;
        }

        let q = (rr - mm).sqrt();
        let t = [s - q, s + q].into_iter().find(|&t| t > EPSILON)?;

        let point = ray.at(t);
        let normal = (point - self.center).normalize_or_zero();
        Some(Intersection { point, normal, t })
    }
}
