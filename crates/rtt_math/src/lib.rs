// Re-export glam for convenience
pub use glam::*;

mod aabb;
mod interval;
mod ray;

pub use aabb::Aabb;
pub use interval::Interval;
pub use ray::Ray;

/// Reflect `v` about the normal `n`.
#[inline]
pub fn reflect(v: Vec3, n: Vec3) -> Vec3 {
    v - 2.0 * v.dot(n) * n
}

/// Build two unit vectors that complete `axis` to an orthonormal basis.
///
/// `axis` must be unit length.
#[inline]
pub fn orthonormal_basis(axis: Vec3) -> (Vec3, Vec3) {
    axis.any_orthonormal_pair()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reflect() {
        let v = Vec3::new(1.0, -1.0, 0.0);
        assert_eq!(reflect(v, Vec3::Y), Vec3::new(1.0, 1.0, 0.0));
    }

    #[test]
    fn test_orthonormal_basis() {
        for axis in [
            Vec3::X,
            Vec3::Y,
            Vec3::Z,
            -Vec3::X,
            -Vec3::Y,
            -Vec3::Z,
            Vec3::new(1.0, 2.0, 3.0).normalize(),
            Vec3::new(-0.3, 0.1, -0.9).normalize(),
        ] {
            let (t, b) = orthonormal_basis(axis);
            assert!((t.length() - 1.0).abs() < 1e-5);
            assert!((b.length() - 1.0).abs() < 1e-5);
            assert!(t.dot(axis).abs() < 1e-5);
            assert!(b.dot(axis).abs() < 1e-5);
            assert!(t.dot(b).abs() < 1e-5);
        }
    }

    #[test]
    fn test_orthonormal_basis_is_finite_on_ties() {
        // Axes whose two smallest components are equal
        for axis in [Vec3::Z, -Vec3::Z, Vec3::new(0.0, 0.6, 0.8), Vec3::new(0.8, 0.0, -0.6)] {
            let (t, b) = orthonormal_basis(axis);
            assert!(t.is_finite() && b.is_finite());
            assert!((t.cross(b).dot(axis).abs() - 1.0).abs() < 1e-5);
        }
    }
}
