//! Ray-object intersection system.
//!
//! Defines the Hittable trait for geometric primitives and HitRecord for
//! storing intersection data.

use glam::Vec3A;

use crate::interval::Interval;
use crate::material::Material;
use crate::ray::Ray;

/// Ray-object intersection information.
///
/// Contains intersection point, surface normal, distance, and material data
/// needed for shading calculations.
///
/// The normal is geometric: unit length, outward-facing for spheres and the
/// stored plane normal for planes. It is never flipped against the incident
/// ray; the dielectric scatter derives the entering/exiting case from the
/// sign of the incident direction against it.
#[derive(Debug, Clone, Copy)]
pub struct HitRecord {
    /// Point where the ray intersects the object
    pub p: Vec3A,
    /// Surface normal at the intersection point (unit vector)
    pub normal: Vec3A,
    /// Parameter along the ray at the intersection point
    pub t: f32,
    /// Material of the object at the hit point
    pub material: Material,
}

impl Default for HitRecord {
    fn default() -> Self {
        Self {
            p: Vec3A::ZERO,
            normal: Vec3A::ZERO,
            t: 0.0,
            material: Material::PureDiffuse { albedo: Vec3A::ZERO },
        }
    }
}

/// Trait for objects that can be intersected by rays.
///
/// Core abstraction for geometric primitives and primitive collections. Must
/// be thread-safe (Sync + Send) for parallel rendering.
pub trait Hittable: Sync + Send {
    /// Test for ray intersection within the given parameter range.
    ///
    /// Returns true if hit, updating the hit record with intersection details.
    fn hit(&self, r: &Ray, ray_t: Interval, rec: &mut HitRecord) -> bool;
}
