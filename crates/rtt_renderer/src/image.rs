//! Output image and tone mapping.

use rayon::prelude::*;
use rtt_core::Color;
use rtt_math::Vec4;

use crate::bucket::BucketResult;

/// Filmic-style curve applied before gamma when converting to 8-bit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToneMap {
    pub whitepoint: f32,
    pub gamma: f32,
}

impl Default for ToneMap {
    fn default() -> Self {
        Self {
            whitepoint: 0.6,
            gamma: 0.45,
        }
    }
}

impl ToneMap {
    /// Map one linear channel value to [0, 1].
    #[inline]
    pub fn map_channel(&self, c: f32) -> f32 {
        let c = c.max(0.0);
        let wp = self.whitepoint;
        let mapped = c / ((c + 1.0) * wp) / (wp + 1.0);
        mapped.clamp(0.0, 1.0).powf(self.gamma)
    }

    /// Convert a color to 8-bit RGBA.
    pub fn to_rgba(&self, color: Color) -> [u8; 4] {
        let r = (255.0 * self.map_channel(color.x)) as u8;
        let g = (255.0 * self.map_channel(color.y)) as u8;
        let b = (255.0 * self.map_channel(color.z)) as u8;
        [r, g, b, 255]
    }
}

/// Row-major RGBA float image that finished buckets are written into.
pub struct ImageBuffer {
    width: u32,
    height: u32,
    pixels: Vec<Vec4>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with transparent black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Vec4::ZERO; (width * height) as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[Vec4] {
        &self.pixels
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> Vec4 {
        self.pixels[(y * self.width + x) as usize]
    }

    /// Set the pixel at (x, y); alpha is always 1.
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        self.pixels[(y * self.width + x) as usize] = color.extend(1.0);
    }

    /// Copy a finished bucket into place.
    pub fn write_bucket(&mut self, result: &BucketResult) {
        let bucket = result.bucket;
        for ly in 0..bucket.height {
            for lx in 0..bucket.width {
                let color = result.pixels[(ly * bucket.width + lx) as usize];
                self.set(bucket.x + lx, bucket.y + ly, color);
            }
        }
    }

    /// Tone map to RGBA bytes (for display or saving).
    pub fn to_rgba8(&self, tone_map: &ToneMap) -> Vec<u8> {
        self.pixels
            .par_iter()
            .flat_map_iter(|p| tone_map.to_rgba(p.truncate()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bucket::Bucket;

    #[test]
    fn test_tone_map_black_and_bright() {
        let tm = ToneMap::default();
        assert_eq!(tm.map_channel(0.0), 0.0);
        assert_eq!(tm.map_channel(-3.0), 0.0);
        assert_eq!(tm.map_channel(1.0e6), 1.0);
        assert_eq!(tm.to_rgba(Color::ZERO), [0, 0, 0, 255]);
    }

    #[test]
    fn test_tone_map_is_monotonic() {
        let tm = ToneMap::default();
        let mut last = 0.0;
        for i in 1..100 {
            let v = tm.map_channel(i as f32 * 0.05);
            assert!(v >= last);
            last = v;
        }
    }

    #[test]
    fn test_write_bucket() {
        let mut image = ImageBuffer::new(4, 3);
        let bucket = Bucket::new(2, 1, 2, 2, 0);
        let pixels = vec![
            Color::new(1.0, 0.0, 0.0),
            Color::new(0.0, 1.0, 0.0),
            Color::new(0.0, 0.0, 1.0),
            Color::ONE,
        ];
        image.write_bucket(&BucketResult::new(bucket, pixels));

        assert_eq!(image.get(2, 1), Vec4::new(1.0, 0.0, 0.0, 1.0));
        assert_eq!(image.get(3, 1), Vec4::new(0.0, 1.0, 0.0, 1.0));
        assert_eq!(image.get(2, 2), Vec4::new(0.0, 0.0, 1.0, 1.0));
        assert_eq!(image.get(3, 2), Vec4::ONE);
        assert_eq!(image.get(0, 0), Vec4::ZERO);
    }

    #[test]
    fn test_to_rgba8_layout() {
        let mut image = ImageBuffer::new(2, 1);
        image.set(1, 0, Color::splat(1.0e6));
        let bytes = image.to_rgba8(&ToneMap::default());
        assert_eq!(bytes, vec![0, 0, 0, 255, 255, 255, 255, 255]);
    }
}
