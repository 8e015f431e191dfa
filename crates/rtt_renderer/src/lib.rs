//! RTT Renderer - CPU Path Tracing
//!
//! A bucket-based path tracer. Rays are intersected against spheres, planes
//! and triangle meshes; radiance combines point-light direct lighting,
//! Monte Carlo indirect diffuse and Fresnel-weighted specular reflection.
//! Buckets are distributed to worker threads through a lock-free job queue.

mod bucket;
mod camera;
mod config;
mod error;
mod image;
mod integrator;
mod intersect;
mod job_queue;
mod plane;
mod renderer;
pub mod sampling;
mod sphere;
mod triangle;

pub use bucket::{
    generate_buckets, render_bucket, render_pixel, sample_offsets, sort_spiral, Bucket,
    BucketResult, RenderJob,
};
pub use camera::Camera;
pub use config::{
    DiffuseNormalization, HemisphereSampler, RenderConfig, DEFAULT_BUCKET_SIZE, DEFAULT_MAX_JOBS,
};
pub use error::{RenderError, RenderResult};
pub use image::{ImageBuffer, ToneMap};
pub use integrator::{schlick, Integrator};
pub use intersect::{Intersect, Intersection, EPSILON};
pub use job_queue::JobQueue;
pub use renderer::{RenderOutput, RenderStats, Renderer, WorkerStats};
pub use sphere::test_ray_sphere;
pub use triangle::intersect_triangle;

/// Re-export common math types from rtt_math
pub use rtt_math::{Aabb, Interval, Ray, Vec3};
