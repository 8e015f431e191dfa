//! Bucket-based tile rendering.
//!
//! Divides the image into tiles (buckets) that are rendered independently.
//! Each tile seeds its own generator from its coordinates, so a tile renders
//! to the same pixels no matter which worker picks it up.

use std::sync::Arc;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{RngCore, SeedableRng};
use rtt_core::{Color, Scene};
use rtt_math::Vec2;

use crate::camera::Camera;
use crate::config::RenderConfig;
use crate::integrator::Integrator;

/// A rectangular region of the image to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bucket {
    /// X coordinate of bucket's top-left corner
    pub x: u32,
    /// Y coordinate of bucket's top-left corner
    pub y: u32,
    /// Width of the bucket in pixels
    pub width: u32,
    /// Height of the bucket in pixels
    pub height: u32,
    /// Index of this bucket in the render order
    pub index: usize,
}

impl Bucket {
    pub fn new(x: u32, y: u32, width: u32, height: u32, index: usize) -> Self {
        Self {
            x,
            y,
            width,
            height,
            index,
        }
    }

    pub fn pixel_count(&self) -> u32 {
        self.width * self.height
    }

    /// Generator seed derived from the tile's top-left corner.
    pub fn seed(&self) -> u64 {
        self.y as u64 * 11239 + self.x as u64
    }

    pub fn contains(&self, x: u32, y: u32) -> bool {
        x >= self.x && x < self.x + self.width && y >= self.y && y < self.y + self.height
    }
}

/// Split an image into a row-major grid of buckets.
///
/// Edge buckets are truncated to the image bounds.
pub fn generate_buckets(width: u32, height: u32, bucket_size: u32) -> Vec<Bucket> {
    let bucket_size = bucket_size.max(1);
    let mut buckets = Vec::new();

    let mut y = 0;
    while y < height {
        let mut x = 0;
        while x < width {
            let bw = bucket_size.min(width - x);
            let bh = bucket_size.min(height - y);
            buckets.push(Bucket::new(x, y, bw, bh, buckets.len()));
            x += bucket_size;
        }
        y += bucket_size;
    }

    buckets
}

/// Sort buckets by distance from the image centre and renumber them.
///
/// Only changes the order tiles appear in; the rendered image is identical.
pub fn sort_spiral(buckets: &mut [Bucket], width: u32, height: u32) {
    let center_x = width as f32 / 2.0;
    let center_y = height as f32 / 2.0;
    let distance = |b: &Bucket| {
        let bx = b.x as f32 + b.width as f32 / 2.0;
        let by = b.y as f32 + b.height as f32 / 2.0;
        (bx - center_x).powi(2) + (by - center_y).powi(2)
    };

    buckets.sort_by(|a, b| {
        distance(a)
            .partial_cmp(&distance(b))
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    for (i, bucket) in buckets.iter_mut().enumerate() {
        bucket.index = i;
    }
}

/// Sub-pixel sample positions for a given sample count.
///
/// One sample sits at the pixel centre and four use a rotated grid. Any other
/// count takes the first `spp` cell centres of the smallest square grid that
/// holds them. The pattern is fixed, not random.
pub fn sample_offsets(samples_per_pixel: u32) -> Vec<Vec2> {
    match samples_per_pixel {
        0 => Vec::new(),
        1 => vec![Vec2::splat(0.5)],
        4 => vec![
            Vec2::new(0.375, 0.125),
            Vec2::new(0.875, 0.375),
            Vec2::new(0.625, 0.875),
            Vec2::new(0.125, 0.625),
        ],
        n => {
            let k = (n as f64).sqrt().ceil() as u32;
            (0..n)
                .map(|i| {
                    Vec2::new(
                        ((i % k) as f32 + 0.5) / k as f32,
                        ((i / k) as f32 + 0.5) / k as f32,
                    )
                })
                .collect()
        }
    }
}

/// One unit of work: a tile plus everything needed to render it.
///
/// Immutable once queued; consumed by exactly one worker.
#[derive(Clone)]
pub struct RenderJob {
    pub bucket: Bucket,
    pub scene: Arc<Scene>,
    pub camera: Arc<Camera>,
    pub image_width: u32,
    pub image_height: u32,
    pub samples_per_pixel: u32,
}

/// Result of rendering a bucket.
#[derive(Debug, Clone, PartialEq)]
pub struct BucketResult {
    /// The bucket that was rendered
    pub bucket: Bucket,
    /// Pixel colors in row-major order
    pub pixels: Vec<Color>,
}

impl BucketResult {
    pub fn new(bucket: Bucket, pixels: Vec<Color>) -> Self {
        Self { bucket, pixels }
    }
}

/// Render a pixel by averaging one primary ray per sample offset.
pub fn render_pixel(
    integrator: &Integrator,
    camera: &Camera,
    (x, y): (u32, u32),
    (width, height): (u32, u32),
    offsets: &[Vec2],
    rng: &mut dyn RngCore,
) -> Color {
    if offsets.is_empty() {
        return Color::ZERO;
    }

    let mut pixel_color = Color::ZERO;
    for offset in offsets {
        let ray = camera.primary_ray(x, y, *offset, width, height);
        pixel_color += integrator.compute_radiance(&ray, 0, 0, rng);
    }

    pixel_color / offsets.len() as f32
}

/// Render every pixel of a job's bucket.
///
/// The generator is re-seeded from the bucket, so rendering the same job
/// twice gives bit-identical pixels.
pub fn render_bucket(job: &RenderJob, config: &RenderConfig) -> BucketResult {
    let bucket = job.bucket;
    let mut rng = StdRng::seed_from_u64(bucket.seed());
    let integrator = Integrator::new(&job.scene, config);
    let offsets = sample_offsets(job.samples_per_pixel);

    let mut order: Vec<(u32, u32)> = (0..bucket.height)
        .flat_map(|ly| (0..bucket.width).map(move |lx| (lx, ly)))
        .collect();
    if config.shuffle_pixels {
        order.shuffle(&mut rng);
    }

    let mut pixels = vec![Color::ZERO; bucket.pixel_count() as usize];
    for (lx, ly) in order {
        pixels[(ly * bucket.width + lx) as usize] = render_pixel(
            &integrator,
            &job.camera,
            (bucket.x + lx, bucket.y + ly),
            (job.image_width, job.image_height),
            &offsets,
            &mut rng,
        );
    }

    BucketResult::new(bucket, pixels)
}
