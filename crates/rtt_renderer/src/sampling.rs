//! Direction and point samplers.
//!
//! The integrator's production path uses [`random_direction_on_hemisphere`].
//! The grid-based uniform and jittered samplers, together with the
//! Shirley-Chiu square-to-disk map, back the stratified hemisphere modes.
//!
//! All randomness comes from the caller's generator, which the scheduler
//! seeds per tile.

use std::f32::consts::FRAC_PI_4;

use rand::{Rng, RngCore};
use rtt_math::{orthonormal_basis, Vec2, Vec3};

/// Uniform random direction on the hemisphere around `n`.
///
/// Rejection-samples a point in the unit ball, normalizes it and flips it to
/// the side of `n`. Not cosine weighted.
pub fn random_direction_on_hemisphere(n: Vec3, rng: &mut dyn RngCore) -> Vec3 {
    let direction = loop {
        let p = random_in_unit_cube(rng);
        let len_sq = p.length_squared();
        // Tiny vectors would not survive normalization
        if len_sq <= 1.0 && len_sq > 1e-8 {
            break p / len_sq.sqrt();
        }
    };

    if direction.dot(n) < 0.0 {
        -direction
    } else {
        direction
    }
}

fn random_in_unit_cube(rng: &mut dyn RngCore) -> Vec3 {
    Vec3::new(
        rng.gen_range(-1.0..1.0),
        rng.gen_range(-1.0..1.0),
        rng.gen_range(-1.0..1.0),
    )
}

/// Random points in `[-1, 1]³`.
pub fn random_samples_in_unit_cube(count: usize, rng: &mut dyn RngCore) -> Vec<Vec3> {
    (0..count).map(|_| random_in_unit_cube(rng)).collect()
}

/// Random points on the surface of `[-1, 1]³`, cycling through the six faces.
pub fn random_samples_on_unit_cube_surface(count: usize, rng: &mut dyn RngCore) -> Vec<Vec3> {
    (0..count)
        .map(|i| {
            let mut p = random_in_unit_cube(rng);
            let axis = i % 3;
            p[axis] = if (i % 6) < 3 { 1.0 } else { -1.0 };
            p
        })
        .collect()
}

/// Random directions on the hemisphere around +Z.
pub fn random_samples_on_hemisphere(count: usize, rng: &mut dyn RngCore) -> Vec<Vec3> {
    (0..count)
        .map(|_| random_direction_on_hemisphere(Vec3::Z, rng))
        .collect()
}

/// Random point in the unit disk, by rejection.
pub fn random_sample_on_disk(rng: &mut dyn RngCore) -> Vec2 {
    loop {
        let p = Vec2::new(rng.gen_range(-1.0..1.0), rng.gen_range(-1.0..1.0));
        if p.length_squared() <= 1.0 {
            return p;
        }
    }
}

/// Random points in the unit disk (z = 0).
pub fn random_samples_on_disk(count: usize, rng: &mut dyn RngCore) -> Vec<Vec3> {
    (0..count)
        .map(|_| random_sample_on_disk(rng).extend(0.0))
        .collect()
}

/// Side length of the largest square grid with at most `requested` cells.
fn grid_size(requested: usize) -> usize {
    (requested as f64).sqrt().floor() as usize
}

/// Cell centres of a square grid over `[-1, 1]²`.
///
/// Returns `floor(sqrt(requested))²` samples.
pub fn uniform_samples_on_square(requested: usize) -> Vec<Vec2> {
    square_grid(requested, |_| Vec2::ZERO)
}

/// One random point per cell of a square grid over `[-1, 1]²`.
pub fn jittered_samples_on_square(requested: usize, rng: &mut dyn RngCore) -> Vec<Vec2> {
    square_grid(requested, |_| {
        Vec2::new(rng.gen_range(-0.5..0.5), rng.gen_range(-0.5..0.5))
    })
}

fn square_grid(requested: usize, mut jitter: impl FnMut(usize) -> Vec2) -> Vec<Vec2> {
    let n = grid_size(requested);
    if n == 0 {
        return Vec::new();
    }
    let cell = 2.0 / n as f32;
    let mut samples = Vec::with_capacity(n * n);
    for y in 0..n {
        for x in 0..n {
            let offset = jitter(y * n + x);
            samples.push(Vec2::new(
                -1.0 + (x as f32 + 0.5 + offset.x) * cell,
                -1.0 + (y as f32 + 0.5 + offset.y) * cell,
            ));
        }
    }
    samples
}

/// Area-preserving map from `[-1, 1]²` to the unit disk.
///
/// See "A Low Distortion Map Between Disk and Square", Shirley and Chiu.
pub fn square_to_disk(s: Vec2) -> Vec2 {
    let (a, b) = (s.x, s.y);
    let (r, phi) = if a > -b {
        if a > b {
            (a, FRAC_PI_4 * (b / a))
        } else {
            (b, FRAC_PI_4 * (2.0 - a / b))
        }
    } else if a < b {
        (-a, FRAC_PI_4 * (4.0 + b / a))
    } else if b != 0.0 {
        (-b, FRAC_PI_4 * (6.0 - a / b))
    } else {
        (-b, 0.0)
    };
    Vec2::new(r * phi.cos(), r * phi.sin())
}

/// Lift disk samples onto the +Z hemisphere, preserving area.
fn disk_to_hemisphere(d: Vec2) -> Vec3 {
    let rr = d.length_squared();
    let scale = (2.0 - rr).max(0.0).sqrt();
    Vec3::new(d.x * scale, d.y * scale, 1.0 - rr)
}

pub fn uniform_samples_on_disk(requested: usize) -> Vec<Vec2> {
    uniform_samples_on_square(requested)
        .into_iter()
        .map(square_to_disk)
        .collect()
}

pub fn jittered_samples_on_disk(requested: usize, rng: &mut dyn RngCore) -> Vec<Vec2> {
    jittered_samples_on_square(requested, rng)
        .into_iter()
        .map(square_to_disk)
        .collect()
}

/// Stratified directions on the +Z hemisphere (uniform grid).
pub fn uniform_samples_on_hemisphere(requested: usize) -> Vec<Vec3> {
    uniform_samples_on_disk(requested)
        .into_iter()
        .map(disk_to_hemisphere)
        .collect()
}

/// Stratified directions on the +Z hemisphere (jittered grid).
pub fn jittered_samples_on_hemisphere(requested: usize, rng: &mut dyn RngCore) -> Vec<Vec3> {
    jittered_samples_on_disk(requested, rng)
        .into_iter()
        .map(disk_to_hemisphere)
        .collect()
}

/// Rotate a sample from the +Z frame into the frame around `n`.
pub fn rotate_to_normal(sample: Vec3, n: Vec3) -> Vec3 {
    let (u, v) = orthonormal_basis(n);
    (sample.x * u + sample.y * v + sample.z * n).normalize_or_zero()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn normals() -> Vec<Vec3> {
        vec![
            Vec3::X,
            -Vec3::Y,
            Vec3::Z,
            -Vec3::Z,
            Vec3::new(1.0, 1.0, 1.0).normalize(),
            Vec3::new(-0.2, 0.7, -0.4).normalize(),
        ]
    }

    #[test]
    fn test_hemisphere_samples_face_the_normal() {
        let mut rng = StdRng::seed_from_u64(42);
        for n in normals() {
            for _ in 0..1000 {
                let d = random_direction_on_hemisphere(n, &mut rng);
                assert!(d.dot(n) >= 0.0);
                assert!((d.length() - 1.0).abs() < 1e-4);
            }
        }
    }

    #[test]
    fn test_hemisphere_sampling_is_reproducible() {
        let mut a = StdRng::seed_from_u64(3);
        let mut b = StdRng::seed_from_u64(3);
        for _ in 0..16 {
            assert_eq!(
                random_direction_on_hemisphere(Vec3::Y, &mut a),
                random_direction_on_hemisphere(Vec3::Y, &mut b)
            );
        }
    }

    #[test]
    fn test_hemisphere_mean_points_along_normal() {
        // Uniform over the hemisphere: E[cos] = 1/2
        let mut rng = StdRng::seed_from_u64(5);
        let n = Vec3::new(0.0, 0.6, 0.8);
        let count = 20_000;
        let mean_cos: f32 = (0..count)
            .map(|_| random_direction_on_hemisphere(n, &mut rng).dot(n))
            .sum::<f32>()
            / count as f32;
        assert!((mean_cos - 0.5).abs() < 0.02, "mean cos = {}", mean_cos);
    }

    #[test]
    fn test_unit_cube_samples() {
        let mut rng = StdRng::seed_from_u64(1);
        let inside = random_samples_in_unit_cube(100, &mut rng);
        assert_eq!(inside.len(), 100);
        assert!(inside.iter().all(|p| p.abs().max_element() <= 1.0));

        let surface = random_samples_on_unit_cube_surface(60, &mut rng);
        assert!(surface
            .iter()
            .all(|p| (p.abs().max_element() - 1.0).abs() < 1e-6));
    }

    #[test]
    fn test_disk_samples() {
        let mut rng = StdRng::seed_from_u64(9);
        let disk = random_samples_on_disk(200, &mut rng);
        assert!(disk.iter().all(|p| p.z == 0.0 && p.truncate().length() <= 1.0));

        let hemi = random_samples_on_hemisphere(200, &mut rng);
        assert!(hemi.iter().all(|d| d.z >= 0.0));
    }

    #[test]
    fn test_uniform_square_grid() {
        let samples = uniform_samples_on_square(10);
        assert_eq!(samples.len(), 9);
        assert!((samples[0] - Vec2::splat(-2.0 / 3.0)).length() < 1e-6);
        assert!(samples[4].length() < 1e-6);

        assert!(uniform_samples_on_square(0).is_empty());
    }

    #[test]
    fn test_jittered_samples_stay_in_their_cells() {
        let mut rng = StdRng::seed_from_u64(13);
        let samples = jittered_samples_on_square(16, &mut rng);
        assert_eq!(samples.len(), 16);
        let cell = 0.5;
        for (i, s) in samples.iter().enumerate() {
            let (x, y) = ((i % 4) as f32, (i / 4) as f32);
            assert!(s.x >= -1.0 + x * cell - 1e-6 && s.x <= -1.0 + (x + 1.0) * cell + 1e-6);
            assert!(s.y >= -1.0 + y * cell - 1e-6 && s.y <= -1.0 + (y + 1.0) * cell + 1e-6);
        }
    }

    #[test]
    fn test_square_to_disk() {
        assert_eq!(square_to_disk(Vec2::ZERO), Vec2::ZERO);

        // Square corners land on the unit circle
        for corner in [
            Vec2::new(1.0, 1.0),
            Vec2::new(-1.0, 1.0),
            Vec2::new(-1.0, -1.0),
            Vec2::new(1.0, -1.0),
        ] {
            assert!((square_to_disk(corner).length() - 1.0).abs() < 1e-5);
        }

        // Edge midpoints map to the axes
        assert!((square_to_disk(Vec2::new(1.0, 0.0)) - Vec2::X).length() < 1e-5);
        assert!((square_to_disk(Vec2::new(0.0, 1.0)) - Vec2::Y).length() < 1e-5);
        assert!((square_to_disk(Vec2::new(-1.0, 0.0)) + Vec2::X).length() < 1e-5);
        assert!((square_to_disk(Vec2::new(0.0, -1.0)) + Vec2::Y).length() < 1e-5);
    }

    #[test]
    fn test_stratified_hemisphere_samples_are_unit_and_upper() {
        let mut rng = StdRng::seed_from_u64(17);
        let uniform = uniform_samples_on_hemisphere(32);
        let jittered = jittered_samples_on_hemisphere(32, &mut rng);
        assert_eq!(uniform.len(), 25);
        assert_eq!(jittered.len(), 25);
        for d in uniform.iter().chain(jittered.iter()) {
            assert!(d.z >= 0.0);
            assert!((d.length() - 1.0).abs() < 1e-4);
        }
    }

    #[test]
    fn test_rotate_to_normal() {
        for n in normals() {
            assert_ne!(rotate_to_normal(Vec3::X, n), Vec3::ZERO);
            assert!((rotate_to_normal(Vec3::Z, n) - n).length() < 1e-5);
            for s in uniform_samples_on_hemisphere(16) {
                let d = rotate_to_normal(s, n);
                assert!(d.dot(n) >= -1e-6);
                assert!((d.length() - 1.0).abs() < 1e-4);
            }
        }
    }
}
