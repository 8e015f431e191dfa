use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use rtt_renderer::{RenderConfig, Renderer, ToneMap};

mod scene_setup;

#[derive(Parser)]
#[command(version, about = "Render the demo box with the RTT path tracer")]
struct Args {
    /// JSON render configuration; command-line values override it
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,

    /// Width of the rendered image
    #[arg(long = "width")]
    width: Option<u32>,

    /// Height of the rendered image
    #[arg(long = "height")]
    height: Option<u32>,

    /// Samples per pixel
    #[arg(short = 's', long = "samples")]
    samples: Option<u32>,

    /// Worker thread count
    #[arg(short = 't', long = "threads")]
    threads: Option<usize>,

    /// Bucket edge length in pixels
    #[arg(short = 'b', long = "bucket-size")]
    bucket_size: Option<u32>,

    /// Add the two point lights to the demo scene
    #[arg(long = "point-lights")]
    point_lights: bool,

    /// Output PNG path
    #[arg(short = 'o', long = "output", default_value = "render.png")]
    output: PathBuf,
}

impl Args {
    fn render_config(&self) -> Result<RenderConfig> {
        let mut config = match &self.config {
            Some(path) => RenderConfig::from_json_file(path)
                .with_context(|| format!("loading config {}", path.display()))?,
            None => RenderConfig::default(),
        };

        if let Some(width) = self.width {
            config.width = width;
        }
        if let Some(height) = self.height {
            config.height = height;
        }
        if let Some(samples) = self.samples {
            config.samples_per_pixel = samples;
        }
        if let Some(threads) = self.threads {
            config.threads = threads;
        }
        if let Some(bucket_size) = self.bucket_size {
            config.bucket_size = bucket_size;
        }
        Ok(config)
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let args = Args::parse();
    let config = args.render_config()?;
    let (width, height) = (config.width, config.height);

    let scene = Arc::new(scene_setup::demo_scene(args.point_lights)?);
    log::info!(
        "Scene '{}': {} objects, {} lights",
        scene.name,
        scene.object_count(),
        scene.light_count()
    );

    let renderer = Renderer::new(scene, scene_setup::demo_camera(), config)?;
    let total = renderer.config().bucket_count();
    let mut done = 0;
    let output = renderer.render_with(|result| {
        done += 1;
        log::debug!(
            "bucket {} at ({}, {}) done [{}/{}]",
            result.bucket.index,
            result.bucket.x,
            result.bucket.y,
            done,
            total
        );
    })?;

    for worker in &output.stats.workers {
        log::info!("worker {}: {} buckets", worker.worker, worker.buckets.len());
    }

    let bytes = output.image.to_rgba8(&ToneMap::default());
    image::save_buffer(&args.output, &bytes, width, height, image::ColorType::Rgba8)
        .with_context(|| format!("writing {}", args.output.display()))?;
    log::info!("Saved {}", args.output.display());

    Ok(())
}
