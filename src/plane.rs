//! Infinite plane primitive.

use glam::Vec3A;

use crate::hittable::{HitRecord, Hittable};
use crate::interval::Interval;
use crate::material::Material;
use crate::ray::Ray;

/// Rays closer to parallel than this against the plane are treated as misses.
const PARALLEL_TOLERANCE: f32 = 1e-6;

/// Infinite plane given by a point on it and its unit normal.
///
/// Planes have no finite bounding box and are therefore kept out of the BVH;
/// the scene tests them by linear scan after traversal.
#[derive(Debug, Clone, Copy)]
pub struct Plane {
    /// Any point on the plane.
    pub point: Vec3A,
    /// Unit normal; reported unchanged for hits from either side.
    pub normal: Vec3A,
    /// Material properties determining light interaction.
    pub material: Material,
}

impl Plane {
    /// Create a new plane through `point` with unit normal `normal`.
    pub fn new(point: Vec3A, normal: Vec3A, material: Material) -> Self {
        Self {
            point,
            normal,
            material,
        }
    }
}

impl Hittable for Plane {
    fn hit(&self, r: &Ray, ray_t: Interval, rec: &mut HitRecord) -> bool {
        let denom = r.direction.dot(self.normal);
        if denom.abs() < PARALLEL_TOLERANCE {
            return false;
        }

        let t = (self.point - r.origin).dot(self.normal) / denom;
        if !ray_t.surrounds(t) {
            return false;
        }

        rec.t = t;
        rec.p = r.at(t);
        rec.normal = self.normal;
        rec.material = self.material;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn floor() -> Plane {
        Plane::new(
            Vec3A::new(0.0, -0.5, 0.0),
            Vec3A::Y,
            Material::PureDiffuse {
                albedo: Vec3A::splat(0.5),
            },
        )
    }

    #[test]
    fn downward_ray_hits() {
        let p = floor();
        let r = Ray::new(Vec3A::new(0.0, 1.5, 0.0), Vec3A::NEG_Y);
        let mut rec = HitRecord::default();
        assert!(p.hit(&r, Interval::new(0.001, f32::INFINITY), &mut rec));
        assert!((rec.t - 2.0).abs() < 1e-6);
        assert_eq!(rec.normal, Vec3A::Y);
    }

    #[test]
    fn parallel_ray_misses() {
        let p = floor();
        let r = Ray::new(Vec3A::new(0.0, 1.0, 0.0), Vec3A::X);
        let mut rec = HitRecord::default();
        assert!(!p.hit(&r, Interval::new(0.001, f32::INFINITY), &mut rec));
    }

    #[test]
    fn normal_not_flipped_from_below() {
        let p = floor();
        let r = Ray::new(Vec3A::new(0.0, -2.0, 0.0), Vec3A::Y);
        let mut rec = HitRecord::default();
        assert!(p.hit(&r, Interval::new(0.001, f32::INFINITY), &mut rec));
        // The stored normal is reported even when hit from the back side.
        assert_eq!(rec.normal, Vec3A::Y);
    }

    #[test]
    fn hit_behind_origin_rejected() {
        let p = floor();
        let r = Ray::new(Vec3A::new(0.0, 1.0, 0.0), Vec3A::Y);
        let mut rec = HitRecord::default();
        assert!(!p.hit(&r, Interval::new(0.001, f32::INFINITY), &mut rec));
    }
}
