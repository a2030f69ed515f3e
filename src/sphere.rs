//! Sphere primitive for ray tracing.
//!
//! Implements efficient ray-sphere intersection using an optimized quadratic formula.

use glam::Vec3A;

use crate::aabb::Aabb;
use crate::hittable::{HitRecord, Hittable};
use crate::interval::Interval;
use crate::material::Material;
use crate::ray::Ray;

/// Sphere primitive defined by center, radius, and material.
#[derive(Debug, Clone, Copy)]
pub struct Sphere {
    /// Center point of the sphere in world coordinates.
    pub center: Vec3A,

    /// Radius of the sphere (always non-negative).
    ///
    /// Negative radius values are clamped to 0.0 in the constructor.
    pub radius: f32,

    /// Material properties determining light interaction.
    pub material: Material,
}

impl Sphere {
    /// Create a new sphere.
    ///
    /// Negative radius values are clamped to 0.0.
    pub fn new(center: Vec3A, radius: f32, material: Material) -> Self {
        Self {
            center,
            radius: radius.max(0.0),
            material,
        }
    }

    /// The tight bounding box `center ± radius`.
    pub fn bounding_box(&self) -> Aabb {
        let r = Vec3A::splat(self.radius);
        Aabb::new(self.center - r, self.center + r)
    }
}

impl Hittable for Sphere {
    fn hit(&self, r: &Ray, ray_t: Interval, rec: &mut HitRecord) -> bool {
        // Vector from ray origin to sphere center
        let oc = self.center - r.origin;

        // Optimized quadratic equation coefficients
        let a = r.direction.length_squared();
        let h = r.direction.dot(oc);
        let c = oc.length_squared() - self.radius * self.radius;

        // Tangent rays (zero discriminant) count as misses.
        let discriminant = h * h - a * c;
        if discriminant <= 0.0 {
            return false;
        }

        let sqrtd = discriminant.sqrt();

        // Find the nearest root that lies in the acceptable range
        let mut root = (h - sqrtd) / a;
        if !ray_t.surrounds(root) {
            root = (h + sqrtd) / a;
            if !ray_t.surrounds(root) {
                return false;
            }
        }

        rec.t = root;
        rec.p = r.at(rec.t);
        // Normalization keeps the normal unit length under numerical drift.
        rec.normal = (rec.p - self.center).normalize();
        rec.material = self.material;

        true
    }
}
