use crate::{Interval, Ray, Vec3};

/// Axis-aligned bounding box, one interval per axis.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Aabb {
    pub x: Interval,
    pub y: Interval,
    pub z: Interval,
}

impl Aabb {
    pub const EMPTY: Aabb = Aabb {
        x: Interval::EMPTY,
        y: Interval::EMPTY,
        z: Interval::EMPTY,
    };

    /// Create an AABB from two corner points, in any order.
    pub fn from_points(a: Vec3, b: Vec3) -> Self {
        let mut aabb = Self {
            x: Interval::new(a.x.min(b.x), a.x.max(b.x)),
            y: Interval::new(a.y.min(b.y), a.y.max(b.y)),
            z: Interval::new(a.z.min(b.z), a.z.max(b.z)),
        };
        aabb.pad_to_minimums();
        aabb
    }

    /// Smallest box containing every point in `points`.
    ///
    /// Returns `Aabb::EMPTY` for an empty iterator.
    pub fn enclosing<I: IntoIterator<Item = Vec3>>(points: I) -> Self {
        let mut aabb = points.into_iter().fold(Aabb::EMPTY, |acc, p| Aabb {
            x: acc.x.include(p.x),
            y: acc.y.include(p.y),
            z: acc.z.include(p.z),
        });
        if !aabb.is_empty() {
            aabb.pad_to_minimums();
        }
        aabb
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty() || self.y.is_empty() || self.z.is_empty()
    }

    pub fn min(&self) -> Vec3 {
        Vec3::new(self.x.min, self.y.min, self.z.min)
    }

    pub fn max(&self) -> Vec3 {
        Vec3::new(self.x.max, self.y.max, self.z.max)
    }

    pub fn centroid(&self) -> Vec3 {
        (self.min() + self.max()) * 0.5
    }

    /// Half the length of the box diagonal.
    pub fn half_diagonal(&self) -> f32 {
        ((self.max() - self.min()) * 0.5).length()
    }

    /// Slab test: does the ray pass through the box within `ray_t`?
    pub fn hit(&self, ray: &Ray, mut ray_t: Interval) -> bool {
        for axis in 0..3 {
            let slab = self.axis_interval(axis);
            let inv_d = 1.0 / ray.direction[axis];
            let origin = ray.origin[axis];

            let mut t0 = (slab.min - origin) * inv_d;
            let mut t1 = (slab.max - origin) * inv_d;
            if inv_d < 0.0 {
                std::mem::swap(&mut t0, &mut t1);
            }

            ray_t = ray_t.intersect(&Interval::new(t0, t1));
            if ray_t.max <= ray_t.min {
                return false;
            }
        }
        true
    }

    fn axis_interval(&self, n: usize) -> Interval {
        match n {
            0 => self.x,
            1 => self.y,
            _ => self.z,
        }
    }

    /// Flat meshes (e.g. an axis-aligned quad) would otherwise produce a
    /// zero-width slab that the ray test can miss.
    fn pad_to_minimums(&mut self) {
        let delta = 0.0001;
        if self.x.size() < delta {
            self.x = self.x.expand(delta);
        }
        if self.y.size() < delta {
            self.y = self.y.expand(delta);
        }
        if self.z.size() < delta {
            self.z = self.z.expand(delta);
        }
    }
}
