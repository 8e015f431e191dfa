//! Pinhole camera for primary ray generation.

use rtt_math::{Ray, Vec2, Vec3};

/// Pinhole camera described by a film plane in front of the eye.
///
/// The film is `film_width` wide and sits `focal_length` along the view
/// direction. Pixels are square, so the film height follows from the image
/// aspect ratio.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    position: Vec3,
    direction: Vec3,
    up: Vec3,
    focal_length: f32,
    film_width: f32,
}

impl Camera {
    /// Create a camera at the origin looking down +X with +Z up.
    pub fn new() -> Self {
        Self {
            position: Vec3::ZERO,
            direction: Vec3::X,
            up: Vec3::Z,
            focal_length: 0.28,
            film_width: 0.35,
        }
    }

    /// Set the eye position, view direction and up vector.
    pub fn with_position(mut self, position: Vec3, direction: Vec3, up: Vec3) -> Self {
        self.position = position;
        self.direction = direction.normalize_or_zero();
        self.up = up.normalize_or_zero();
        self
    }

    /// Set focal length and film width (same units as the scene).
    pub fn with_film(mut self, focal_length: f32, film_width: f32) -> Self {
        self.focal_length = focal_length;
        self.film_width = film_width;
        self
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Right vector of the film plane.
    pub fn right(&self) -> Vec3 {
        -self.direction.cross(self.up)
    }

    /// Generate the primary ray through pixel `(x, y)` of a `width × height`
    /// image, offset by `offset` (in pixels, from the pixel's corner).
    pub fn primary_ray(&self, x: u32, y: u32, offset: Vec2, width: u32, height: u32) -> Ray {
        let meters_per_pixel = self.film_width / width as f32;
        let fx = (x as i64 - (width / 2) as i64) as f32 + offset.x;
        let fy = (y as i64 - (height / 2) as i64) as f32 + offset.y;

        let target = self.position
            + self.direction * self.focal_length
            + self.right() * fx * meters_per_pixel
            - self.up * fy * meters_per_pixel;

        Ray::between(self.position, target)
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centre_ray_follows_view_direction() {
        let camera = Camera::new().with_position(Vec3::new(-10.0, 0.0, 3.0), Vec3::X, Vec3::Z);

        let ray = camera.primary_ray(50, 50, Vec2::ZERO, 100, 100);
        assert_eq!(ray.origin, Vec3::new(-10.0, 0.0, 3.0));
        assert!((ray.direction - Vec3::X).length() < 1e-6);
    }

    #[test]
    fn test_film_orientation() {
        let camera = Camera::new().with_position(Vec3::ZERO, Vec3::X, Vec3::Z);
        assert!((camera.right() - Vec3::Y).length() < 1e-6);

        // Top-left pixel looks up and to the left
        let ray = camera.primary_ray(0, 0, Vec2::splat(0.5), 100, 100);
        assert!(ray.direction.x > 0.0);
        assert!(ray.direction.y < 0.0);
        assert!(ray.direction.z > 0.0);

        // Bottom-right pixel looks down and to the right
        let ray = camera.primary_ray(99, 99, Vec2::splat(0.5), 100, 100);
        assert!(ray.direction.y > 0.0);
        assert!(ray.direction.z < 0.0);
    }

    #[test]
    fn test_film_width_sets_field_of_view() {
        let camera = Camera::new()
            .with_position(Vec3::ZERO, Vec3::X, Vec3::Z)
            .with_film(1.0, 2.0);

        // Left film edge sits at 45 degrees for focal 1, width 2
        let ray = camera.primary_ray(0, 50, Vec2::new(0.0, 0.0), 100, 100);
        let expected = Vec3::new(1.0, -1.0, 0.0).normalize();
        assert!((ray.direction - expected).length() < 1e-5);
    }
}
