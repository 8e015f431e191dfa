//! Multi-threaded bucket renderer.
//!
//! The image is split into buckets which are queued up front. A fixed pool of
//! worker threads claims buckets from a lock-free [`JobQueue`], renders them,
//! and streams the finished tiles back to the calling thread. The caller owns
//! the [`ImageBuffer`] and is the only writer, so every pixel is written
//! exactly once.
//!
//! Workers never hold a reference to the output buffer and do not write
//! pixels themselves; a [`RenderJob`] carries only its bucket and the shared
//! scene and camera. Tile completion is visible to the caller through
//! [`Renderer::render_with`], which runs on the calling thread after each
//! tile has been copied into the image. [`Renderer::render`] is the same
//! path with no callback.

use std::sync::mpsc::{self, Sender};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use rtt_core::Scene;

use crate::bucket::{generate_buckets, render_bucket, sort_spiral, BucketResult, RenderJob};
use crate::camera::Camera;
use crate::config::RenderConfig;
use crate::error::{RenderError, RenderResult};
use crate::image::ImageBuffer;
use crate::job_queue::JobQueue;

/// Buckets rendered by a single worker, in the order it finished them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkerStats {
    pub worker: usize,
    pub buckets: Vec<usize>,
}

/// Summary of a finished render.
#[derive(Debug, Clone)]
pub struct RenderStats {
    pub bucket_count: usize,
    pub workers: Vec<WorkerStats>,
    pub elapsed: Duration,
}

pub struct RenderOutput {
    pub image: ImageBuffer,
    pub stats: RenderStats,
}

/// Renders a scene through a camera with a fixed configuration.
pub struct Renderer {
    scene: Arc<Scene>,
    camera: Arc<Camera>,
    config: Arc<RenderConfig>,
}

impl Renderer {
    pub fn new(scene: Arc<Scene>, camera: Camera, config: RenderConfig) -> RenderResult<Self> {
        config.validate()?;
        Ok(Self {
            scene,
            camera: Arc::new(camera),
            config: Arc::new(config),
        })
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Build the job queue for this render.
    ///
    /// Jobs are claimed from the back, so they are pushed in reverse render
    /// order; with spiral ordering the centre bucket is claimed first.
    pub fn build_queue(&self) -> RenderResult<JobQueue<RenderJob>> {
        let config = &self.config;
        let mut buckets = generate_buckets(config.width, config.height, config.bucket_size);
        if config.spiral_order {
            sort_spiral(&mut buckets, config.width, config.height);
        }

        let mut queue = JobQueue::new(config.max_jobs);
        for bucket in buckets.into_iter().rev() {
            queue.push(RenderJob {
                bucket,
                scene: Arc::clone(&self.scene),
                camera: Arc::clone(&self.camera),
                image_width: config.width,
                image_height: config.height,
                samples_per_pixel: config.samples_per_pixel,
            })?;
        }
        Ok(queue)
    }

    /// Render the full image.
    pub fn render(&self) -> RenderResult<RenderOutput> {
        self.render_with(|_| {})
    }

    /// Render the full image, calling `on_bucket` as each bucket lands.
    ///
    /// Returns once every worker has exited.
    pub fn render_with<F>(&self, mut on_bucket: F) -> RenderResult<RenderOutput>
    where
        F: FnMut(&BucketResult),
    {
        let start = Instant::now();
        let queue = Arc::new(self.build_queue()?);
        let bucket_count = queue.len();
        let thread_count = self.config.threads;

        log::info!(
            "Rendering '{}' at {}x{}, {} spp: {} buckets on {} threads",
            self.scene.name,
            self.config.width,
            self.config.height,
            self.config.samples_per_pixel,
            bucket_count,
            thread_count
        );

        let (tx, rx) = mpsc::channel();
        let mut handles = Vec::with_capacity(thread_count);
        for worker in 0..thread_count {
            let queue = Arc::clone(&queue);
            let config = Arc::clone(&self.config);
            let tx = tx.clone();
            let handle = thread::Builder::new()
                .name(format!("rtt-worker-{worker}"))
                .spawn(move || run_worker(worker, &queue, &config, tx))
                .map_err(RenderError::Spawn)?;
            handles.push(handle);
        }
        drop(tx);

        let mut image = ImageBuffer::new(self.config.width, self.config.height);
        for result in rx {
            image.write_bucket(&result);
            on_bucket(&result);
        }

        let mut workers = Vec::with_capacity(handles.len());
        for (worker, handle) in handles.into_iter().enumerate() {
            let stats = handle
                .join()
                .map_err(|_| RenderError::WorkerPanicked { worker })?;
            workers.push(stats);
        }

        let elapsed = start.elapsed();
        log::info!("Rendered {} buckets in {:.2?}", bucket_count, elapsed);

        Ok(RenderOutput {
            image,
            stats: RenderStats {
                bucket_count,
                workers,
                elapsed,
            },
        })
    }
}

/// Claim and render buckets until the queue is drained.
fn run_worker(
    worker: usize,
    queue: &JobQueue<RenderJob>,
    config: &RenderConfig,
    tx: Sender<BucketResult>,
) -> WorkerStats {
    let mut stats = WorkerStats {
        worker,
        buckets: Vec::new(),
    };

    log::debug!("worker {} started", worker);
    while let Some((job_index, job)) = queue.claim() {
        log::debug!(
            "worker {} claimed job {} (bucket {})",
            worker,
            job_index,
            job.bucket.index
        );
        let result = render_bucket(job, config);
        stats.buckets.push(result.bucket.index);
        if tx.send(result).is_err() {
            // Receiver is gone; nobody wants the rest
            break;
        }
    }

    log::debug!("worker {} finished {} buckets", worker, stats.buckets.len());
    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use rtt_core::{Color, Light, Material, Object, Plane, Sphere};
    use rtt_math::Vec3;

    fn test_scene() -> Arc<Scene> {
        let mut scene = Scene::new("renderer");
        scene
            .add_object(Object::new(Plane::new(Vec3::ZERO, Vec3::Z), Material::default()))
            .unwrap();
        scene
            .add_object(Object::new(
                Sphere::new(Vec3::new(0.0, 0.0, 1.0), 1.0),
                Material::conductor(rtt_core::GOLD_RF0),
            ))
            .unwrap();
        scene
            .add_object(Object::new(
                Sphere::new(Vec3::new(0.0, 2.0, 3.0), 0.5),
                Material::emitter(Color::ONE, 20.0),
            ))
            .unwrap();
        scene
            .add_light(Light::new(Vec3::new(-2.0, -1.0, 4.0), Color::ONE, 30.0))
            .unwrap();
        Arc::new(scene)
    }

    fn test_camera() -> Camera {
        Camera::new().with_position(Vec3::new(-6.0, 0.0, 1.5), Vec3::X, Vec3::Z)
    }

    fn test_config(threads: usize) -> RenderConfig {
        RenderConfig {
            width: 37,
            height: 23,
            bucket_size: 8,
            secondary_rays: 4,
            threads,
            ..Default::default()
        }
    }

    #[test]
    fn test_every_pixel_written_once() {
        let _ = env_logger::builder().is_test(true).try_init();
        let config = test_config(4);
        let renderer = Renderer::new(test_scene(), test_camera(), config).unwrap();

        let mut writes = vec![0u32; 37 * 23];
        let mut seen = Vec::new();
        let output = renderer
            .render_with(|result| {
                seen.push(result.bucket.index);
                let b = result.bucket;
                for y in b.y..b.y + b.height {
                    for x in b.x..b.x + b.width {
                        writes[(y * 37 + x) as usize] += 1;
                    }
                }
            })
            .unwrap();

        assert!(writes.iter().all(|&n| n == 1));
        assert_eq!(output.stats.bucket_count, 15);
        assert_eq!(output.stats.workers.len(), 4);

        let mut claimed: Vec<usize> = output
            .stats
            .workers
            .iter()
            .flat_map(|w| w.buckets.iter().copied())
            .collect();
        claimed.sort_unstable();
        assert_eq!(claimed, (0..15).collect::<Vec<_>>());

        seen.sort_unstable();
        assert_eq!(seen, claimed);
        assert!(output.image.pixels().iter().all(|p| p.w == 1.0));
    }

    #[test]
    fn test_more_threads_than_buckets() {
        let config = RenderConfig {
            width: 16,
            height: 8,
            ..test_config(6)
        };
        let renderer = Renderer::new(test_scene(), test_camera(), config).unwrap();
        let output = renderer.render().unwrap();

        assert_eq!(output.stats.bucket_count, 2);
        let total: usize = output.stats.workers.iter().map(|w| w.buckets.len()).sum();
        assert_eq!(total, 2);
    }

    #[test]
    fn test_single_thread_starts_at_centre() {
        let config = RenderConfig {
            width: 24,
            height: 24,
            ..test_config(1)
        };
        let renderer = Renderer::new(test_scene(), test_camera(), config).unwrap();

        let mut first = None;
        renderer
            .render_with(|result| {
                first.get_or_insert(result.bucket);
            })
            .unwrap();

        let first = first.unwrap();
        assert_eq!((first.x, first.y, first.index), (8, 8, 0));
    }

    #[test]
    fn test_render_independent_of_thread_count() {
        let one = Renderer::new(test_scene(), test_camera(), test_config(1))
            .unwrap()
            .render()
            .unwrap();
        let many = Renderer::new(test_scene(), test_camera(), test_config(5))
            .unwrap()
            .render()
            .unwrap();

        assert_eq!(one.image.pixels(), many.image.pixels());
    }

    #[test]
    fn test_queue_capacity_exceeded() {
        let config = RenderConfig {
            max_jobs: 4,
            ..test_config(2)
        };
        assert!(matches!(
            Renderer::new(test_scene(), test_camera(), config),
            Err(RenderError::QueueCapacityExceeded { capacity: 4 })
        ));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = RenderConfig {
            threads: 0,
            ..test_config(1)
        };
        assert!(matches!(
            Renderer::new(test_scene(), test_camera(), config),
            Err(RenderError::InvalidConfig(_))
        ));
    }
}
