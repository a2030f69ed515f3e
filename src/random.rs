//! Random sampling for ray tracing.
//!
//! All helpers draw from a caller-supplied generator so each render worker
//! can own an independent, deterministically seeded ChaCha20 stream.

use glam::Vec3A;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

/// Derive the PRNG stream for one pixel from the render seed.
///
/// Every pixel gets its own generator, so the image is identical no matter
/// how rayon schedules the work.
pub fn pixel_rng(seed: u64, pixel_index: u64) -> ChaCha20Rng {
    ChaCha20Rng::seed_from_u64(seed.wrapping_add(pixel_index))
}

/// Generate a random f32 in [0.0, 1.0)
pub fn random_f32(rng: &mut impl Rng) -> f32 {
    rng.random()
}

/// Generate a random f32 in [min, max)
pub fn random_f32_range(rng: &mut impl Rng, min: f32, max: f32) -> f32 {
    min + (max - min) * random_f32(rng)
}

/// Generate random RGB color with components in [0.0, 1.0).
pub fn random_color(rng: &mut impl Rng) -> Vec3A {
    Vec3A::new(random_f32(rng), random_f32(rng), random_f32(rng))
}

/// Generate random RGB color with components in [min, max).
pub fn random_color_range(rng: &mut impl Rng, min: f32, max: f32) -> Vec3A {
    Vec3A::new(
        random_f32_range(rng, min, max),
        random_f32_range(rng, min, max),
        random_f32_range(rng, min, max),
    )
}

/// Uniform random point inside the unit sphere, by rejection sampling.
pub fn random_in_unit_sphere(rng: &mut impl Rng) -> Vec3A {
    loop {
        let y = 2.0 * Vec3A::new(random_f32(rng), random_f32(rng), random_f32(rng)) - Vec3A::ONE;
        if y.length_squared() < 1.0 {
            return y;
        }
    }
}

/// Uniform random point inside the unit disk in the XY plane.
///
/// Rejection tests the remapped point, so accepted samples fill the disk
/// uniformly.
pub fn random_in_unit_disk(rng: &mut impl Rng) -> Vec3A {
    loop {
        let y = Vec3A::new(
            2.0 * random_f32(rng) - 1.0,
            2.0 * random_f32(rng) - 1.0,
            0.0,
        );
        if y.length_squared() < 1.0 {
            return y;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_sphere_samples_inside() {
        let mut rng = ChaCha20Rng::seed_from_u64(1);
        for _ in 0..10_000 {
            let p = random_in_unit_sphere(&mut rng);
            assert!(p.length_squared() < 1.0);
        }
    }

    #[test]
    fn unit_disk_samples_inside_and_flat() {
        let mut rng = ChaCha20Rng::seed_from_u64(2);
        for _ in 0..10_000 {
            let p = random_in_unit_disk(&mut rng);
            assert!(p.length_squared() < 1.0);
            assert_eq!(p.z, 0.0);
        }
    }

    #[test]
    fn disk_sampler_covers_all_quadrants() {
        // A sampler that rejected on the unmapped draw would starve the
        // negative quadrants.
        let mut rng = ChaCha20Rng::seed_from_u64(3);
        let mut quadrants = [0u32; 4];
        for _ in 0..4_000 {
            let p = random_in_unit_disk(&mut rng);
            let q = ((p.x >= 0.0) as usize) | (((p.y >= 0.0) as usize) << 1);
            quadrants[q] += 1;
        }
        for &count in &quadrants {
            assert!(count > 700, "quadrants {quadrants:?}");
        }
    }

    #[test]
    fn pixel_streams_are_deterministic_and_distinct() {
        let a: f32 = pixel_rng(1, 42).random();
        let b: f32 = pixel_rng(1, 42).random();
        let c: f32 = pixel_rng(1, 43).random();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
