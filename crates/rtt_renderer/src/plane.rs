//! Ray-plane intersection.

use rtt_core::Plane;
use rtt_math::Ray;

use crate::intersect::{Intersect, Intersection, EPSILON};

impl Intersect for Plane {
    /// Only the front face is hit; rays travelling along or away from the
    /// normal's facing side miss.
    fn intersect(&self, ray: &Ray) -> Option<Intersection> {
        let denom = ray.direction.dot(-self.normal);
        if denom <= EPSILON {
            return None;
        }

        let t = (self.point - ray.origin).dot(-self.normal) / denom;
        if t < 0.0 {
            return None;
        }

        Some(Intersection::new(ray, t, self.normal))
    }
}
