//! The rendering integrator.
//!
//! Per pixel, averages stochastic camera-ray samples; each sample follows
//! the ray through scatter bounces until it is absorbed, escapes to the sky,
//! or reaches the depth cap. Produces a linear f32 HDR buffer.

use glam::Vec3A;
use image::{ImageBuffer, Rgb};
use indicatif::{ProgressBar, ProgressStyle};
use log::info;
use rand::Rng;
use rayon::prelude::*;

use crate::camera::Camera;
use crate::hittable::{HitRecord, Hittable};
use crate::interval::Interval;
use crate::random;
use crate::ray::Ray;

/// RGB color type using Vec3A for SIMD optimization.
type Color = Vec3A;

/// Maximum number of scatter bounces before a sample contributes black.
pub const MAX_DEPTH: u32 = 50;

/// Lower bound of every scene query; suppresses self-intersection at
/// scatter origins.
pub const T_MIN: f32 = 1e-4;

/// Render settings: image size, sampling rate, and the base PRNG seed.
#[derive(Debug, Clone, Copy)]
pub struct Renderer {
    /// Rendered image width in pixel count
    pub image_width: u32,
    /// Rendered image height in pixel count
    pub image_height: u32,
    /// Number of random samples for each pixel (for anti-aliasing)
    pub samples_per_pixel: u32,
    /// Base seed; each pixel derives its own stream from it.
    pub seed: u64,
}

impl Renderer {
    /// Renders the scene with CPU path tracing.
    ///
    /// Pixels are processed in parallel; each owns a deterministic PRNG
    /// stream derived from the seed, so the output is independent of thread
    /// scheduling.
    ///
    /// Returns an HDR image buffer with linear f32 RGB values.
    pub fn render(
        &self,
        world: &dyn Hittable,
        camera: &Camera,
    ) -> ImageBuffer<Rgb<f32>, Vec<f32>> {
        let mut image: ImageBuffer<Rgb<f32>, Vec<f32>> =
            ImageBuffer::new(self.image_width, self.image_height);
        let scale = 1.0 / self.samples_per_pixel as f32;

        info!(
            "Generating image using {} CPU cores...",
            rayon::current_num_threads()
        );
        let generation_start = std::time::Instant::now();
        let pb = ProgressBar::new((self.image_width * self.image_height) as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{bar:40} {pos}/{len} ETA: {eta}")
                .unwrap(),
        );

        image.enumerate_pixels_mut().par_bridge().for_each(|(i, row, pixel)| {
            // Rows count down so v grows upward from the lower-left corner.
            let j = self.image_height - 1 - row;
            let pixel_index = (row * self.image_width + i) as u64;
            let mut rng = random::pixel_rng(self.seed, pixel_index);

            let mut pixel_color = Color::ZERO;
            for _sample in 0..self.samples_per_pixel {
                let u = (i as f32 + random::random_f32(&mut rng)) / self.image_width as f32;
                let v = (j as f32 + random::random_f32(&mut rng)) / self.image_height as f32;
                let r = camera.get_ray(u, v, &mut rng);
                pixel_color += ray_color(&r, world, 0, &mut rng);
            }

            pixel_color *= scale;
            *pixel = Rgb([pixel_color.x, pixel_color.y, pixel_color.z]);
            pb.inc(1);
        });

        pb.finish();
        info!("Image generated in {:.2?}", generation_start.elapsed());

        image
    }
}

/// Trace a ray and compute its radiance.
///
/// Follows scatter bounces recursively, multiplying the attenuation in per
/// bounce. An absorbed ray or one past the depth cap contributes black; a
/// miss returns the sky gradient.
fn ray_color(r: &Ray, world: &dyn Hittable, depth: u32, rng: &mut impl Rng) -> Color {
    if depth >= MAX_DEPTH {
        return Color::ZERO;
    }

    let mut rec = HitRecord::default();
    if world.hit(r, Interval::new(T_MIN, f32::INFINITY), &mut rec) {
        return match rec.material.scatter(r, &rec, rng) {
            Some((scattered, attenuation)) => {
                attenuation * ray_color(&scattered, world, depth + 1, rng)
            }
            None => Color::ZERO,
        };
    }

    sky(r)
}

/// The background: a vertical white-to-blue gradient.
pub fn sky(r: &Ray) -> Color {
    let unit_direction = r.direction.normalize();
    let t = 0.5 * (unit_direction.y + 1.0);
    (1.0 - t) * Color::new(1.0, 1.0, 1.0) + t * Color::new(0.5, 0.7, 1.0)
}
