//! Render configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{RenderError, RenderResult};

/// Default tile edge length in pixels.
pub const DEFAULT_BUCKET_SIZE: u32 = 128;

/// Default job queue capacity.
pub const DEFAULT_MAX_JOBS: usize = 240;

/// How secondary diffuse directions are generated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum HemisphereSampler {
    /// Rejection-sampled uniform directions (production path)
    #[default]
    Rejection,
    /// Fixed stratified grid mapped onto the hemisphere
    Uniform,
    /// Jittered stratified grid mapped onto the hemisphere
    Jittered,
}

/// Normalization of the indirect diffuse estimate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DiffuseNormalization {
    /// `albedo / π * Σ L cosθ / N`, without the uniform pdf. Matches the
    /// reference images.
    #[default]
    Legacy,
    /// Proper Monte Carlo estimator for uniform hemisphere sampling
    /// (the legacy value times 2π).
    MonteCarlo,
}

impl DiffuseNormalization {
    /// Factor applied on top of the legacy estimate.
    pub fn scale(self) -> f32 {
        match self {
            DiffuseNormalization::Legacy => 1.0,
            DiffuseNormalization::MonteCarlo => std::f32::consts::TAU,
        }
    }
}

/// Render configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Output width in pixels
    pub width: u32,
    /// Output height in pixels
    pub height: u32,
    /// Tile edge length in pixels
    pub bucket_size: u32,
    /// Samples per pixel
    pub samples_per_pixel: u32,
    /// Maximum specular reflection depth
    pub max_reflection_depth: u32,
    /// Maximum number of indirect diffuse bounces
    pub max_diffuse_bounces: u32,
    /// Secondary rays per diffuse bounce
    pub secondary_rays: u32,
    /// Number of worker threads
    pub threads: usize,
    /// Job queue capacity
    pub max_jobs: usize,
    /// Claim tiles from the image centre outward
    pub spiral_order: bool,
    /// Shuffle the pixel order within each tile
    pub shuffle_pixels: bool,
    pub hemisphere_sampler: HemisphereSampler,
    pub diffuse_normalization: DiffuseNormalization,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 768,
            bucket_size: DEFAULT_BUCKET_SIZE,
            samples_per_pixel: 1,
            max_reflection_depth: 1,
            max_diffuse_bounces: 1,
            secondary_rays: 32,
            threads: num_cpus::get(),
            max_jobs: DEFAULT_MAX_JOBS,
            spiral_order: true,
            shuffle_pixels: true,
            hemisphere_sampler: HemisphereSampler::default(),
            diffuse_normalization: DiffuseNormalization::default(),
        }
    }
}

impl RenderConfig {
    /// Load a configuration from a JSON file. Missing fields take defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> RenderResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn from_json_str(text: &str) -> RenderResult<Self> {
        let config: RenderConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Number of tiles this configuration produces.
    pub fn bucket_count(&self) -> usize {
        let across = self.width.div_ceil(self.bucket_size.max(1));
        let down = self.height.div_ceil(self.bucket_size.max(1));
        (across * down) as usize
    }

    /// Reject configurations the renderer cannot run.
    pub fn validate(&self) -> RenderResult<()> {
        let invalid = |msg: &str| Err(RenderError::InvalidConfig(msg.to_string()));

        if self.width == 0 || self.height == 0 {
            return invalid("image dimensions must be non-zero");
        }
        if self.bucket_size == 0 {
            return invalid("bucket_size must be non-zero");
        }
        if self.samples_per_pixel == 0 {
            return invalid("samples_per_pixel must be non-zero");
        }
        if self.secondary_rays == 0 {
            return invalid("secondary_rays must be non-zero");
        }
        if self.threads == 0 {
            return invalid("threads must be non-zero");
        }
        if self.bucket_count() > self.max_jobs {
            return Err(RenderError::QueueCapacityExceeded {
                capacity: self.max_jobs,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = RenderConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.bucket_count(), 10 * 6);
        assert!(config.threads >= 1);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = RenderConfig::from_json_str(
            r#"{ "width": 64, "height": 32, "samples_per_pixel": 4,
                 "hemisphere_sampler": "jittered",
                 "diffuse_normalization": "monte_carlo" }"#,
        )
        .unwrap();
        assert_eq!(config.width, 64);
        assert_eq!(config.samples_per_pixel, 4);
        assert_eq!(config.secondary_rays, 32);
        assert_eq!(config.hemisphere_sampler, HemisphereSampler::Jittered);
        assert_eq!(config.diffuse_normalization, DiffuseNormalization::MonteCarlo);
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        for json in [
            r#"{ "width": 0 }"#,
            r#"{ "bucket_size": 0 }"#,
            r#"{ "samples_per_pixel": 0 }"#,
            r#"{ "threads": 0 }"#,
            r#"{ "secondary_rays": 0 }"#,
        ] {
            assert!(matches!(
                RenderConfig::from_json_str(json),
                Err(RenderError::InvalidConfig(_))
            ));
        }
        assert!(matches!(
            RenderConfig::from_json_str("not json"),
            Err(RenderError::Config(_))
        ));
    }

    #[test]
    fn test_queue_capacity_is_checked() {
        let config = RenderConfig {
            bucket_size: 16,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(RenderError::QueueCapacityExceeded { capacity: 240 })
        ));
    }

    #[test]
    fn test_normalization_scale() {
        assert_eq!(DiffuseNormalization::Legacy.scale(), 1.0);
        assert!((DiffuseNormalization::MonteCarlo.scale() - 2.0 * std::f32::consts::PI).abs() < 1e-6);
    }
}
