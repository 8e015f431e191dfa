//! Recursive radiance integrator.
//!
//! Computes the radiance arriving along a ray as
//!
//! ```text
//! emission + (1 - F) * (direct + indirect diffuse) + F * reflected
//! ```
//!
//! where `F` is the Schlick Fresnel reflectance. Specular reflections and
//! diffuse bounces each have their own depth counter; both are bounded by the
//! render configuration, which is what terminates the recursion.

use std::f32::consts::PI;

use rand::RngCore;
use rtt_core::{Color, Material, Object, Scene};
use rtt_math::{reflect, Ray, Vec3};

use crate::config::{HemisphereSampler, RenderConfig};
use crate::intersect::{Intersect, Intersection};
use crate::sampling::{
    jittered_samples_on_hemisphere, random_direction_on_hemisphere, rotate_to_normal,
    uniform_samples_on_hemisphere,
};

/// Schlick's approximation of Fresnel reflectance.
#[inline]
pub fn schlick(rf0: Color, cos_theta: f32) -> Color {
    rf0 + (Color::ONE - rf0) * (1.0 - cos_theta.max(0.0)).powi(5)
}

/// Read-only view over a scene plus the depth and sampling settings.
pub struct Integrator<'a> {
    scene: &'a Scene,
    config: &'a RenderConfig,
}

impl<'a> Integrator<'a> {
    pub fn new(scene: &'a Scene, config: &'a RenderConfig) -> Self {
        Self { scene, config }
    }

    /// Nearest intersection along `ray` and the object that owns it.
    pub fn trace_ray(&self, ray: &Ray) -> Option<(Intersection, &'a Object)> {
        let mut nearest: Option<(Intersection, &'a Object)> = None;
        for object in self.scene.objects() {
            if let Some(hit) = object.geometry.intersect(ray) {
                if nearest.as_ref().map_or(true, |(best, _)| hit.t < best.t) {
                    nearest = Some((hit, object));
                }
            }
        }
        nearest
    }

    /// True if anything blocks the segment from `point` to `target`.
    pub fn is_occluded(&self, point: Vec3, target: Vec3) -> bool {
        let distance_sq = point.distance_squared(target);
        let shadow_ray = Ray::between(point, target);
        self.trace_ray(&shadow_ray)
            .map_or(false, |(hit, _)| hit.t * hit.t < distance_sq)
    }

    /// Radiance arriving at the ray origin from along `ray`.
    ///
    /// `depth` counts specular reflections so far, `bounce` counts diffuse
    /// bounces. Primary rays start both at zero.
    pub fn compute_radiance(
        &self,
        ray: &Ray,
        depth: u32,
        bounce: u32,
        rng: &mut dyn RngCore,
    ) -> Color {
        let Some((hit, object)) = self.trace_ray(ray) else {
            return Color::ZERO;
        };
        let material = &object.material;

        let mut diffuse = Color::ZERO;
        if !material.is_conductor {
            if bounce < self.config.max_diffuse_bounces {
                diffuse += self.indirect_diffuse(&hit, material, depth, bounce, rng);
            }
            diffuse += self.direct_lighting(&hit, material);
        }

        let mut specular = Color::ZERO;
        let mut reflected = Color::ZERO;
        if depth < self.config.max_reflection_depth {
            let direction = reflect(ray.direction, hit.normal).normalize_or_zero();
            let cos_theta = hit.normal.dot(direction).max(0.0);
            specular = schlick(material.rf0, cos_theta);
            if cos_theta > 0.0 {
                let reflection_ray = Ray::new(hit.point, direction);
                reflected = cos_theta * self.compute_radiance(&reflection_ray, depth + 1, bounce, rng);
            }
        }

        material.emission() + (Color::ONE - specular) * diffuse + specular * reflected
    }

    /// Point-light contribution with hard shadows.
    fn direct_lighting(&self, hit: &Intersection, material: &Material) -> Color {
        let brdf = material.diffuse / PI;
        let mut radiance = Color::ZERO;

        for light in self.scene.lights() {
            let to_light = light.position - hit.point;
            let distance_sq = to_light.length_squared();
            let n_dot_l = hit.normal.dot(to_light.normalize_or_zero()).max(0.0);
            if n_dot_l <= 0.0 || self.is_occluded(hit.point, light.position) {
                continue;
            }
            radiance += brdf * (light.power() / distance_sq) * n_dot_l;
        }

        radiance
    }

    /// Hemisphere-sampled indirect diffuse light.
    fn indirect_diffuse(
        &self,
        hit: &Intersection,
        material: &Material,
        depth: u32,
        bounce: u32,
        rng: &mut dyn RngCore,
    ) -> Color {
        let directions = self.secondary_directions(hit.normal, rng);
        if directions.is_empty() {
            return Color::ZERO;
        }

        let mut gathered = Color::ZERO;
        for direction in &directions {
            let secondary = Ray::new(hit.point, *direction);
            let cos_theta = hit.normal.dot(*direction).max(0.0);
            gathered += self.compute_radiance(&secondary, depth, bounce + 1, rng) * cos_theta;
        }

        let scale = self.config.diffuse_normalization.scale() / directions.len() as f32;
        material.diffuse / PI * gathered * scale
    }

    fn secondary_directions(&self, normal: Vec3, rng: &mut dyn RngCore) -> Vec<Vec3> {
        let count = self.config.secondary_rays as usize;
        match self.config.hemisphere_sampler {
            HemisphereSampler::Rejection => (0..count)
                .map(|_| random_direction_on_hemisphere(normal, rng))
                .collect(),
            HemisphereSampler::Uniform => uniform_samples_on_hemisphere(count)
                .into_iter()
                .map(|s| rotate_to_normal(s, normal))
                .collect(),
            HemisphereSampler::Jittered => jittered_samples_on_hemisphere(count, rng)
                .into_iter()
                .map(|s| rotate_to_normal(s, normal))
                .collect(),
        }
    }
}
