//! Axis-aligned bounding boxes.
//!
//! The box is stored as a lower/upper corner pair and intersected with rays
//! using the slab method. Boxes bound BVH subtrees and individual primitives.

use glam::Vec3A;

use crate::interval::Interval;
use crate::ray::Ray;

/// Axis-aligned bounding box given by its lower and upper corners.
///
/// A default-constructed box is empty (lower at +inf, upper at -inf) and acts
/// as the identity for unions. Any non-empty box satisfies `min[a] <= max[a]`
/// on every axis.
#[derive(Debug, Clone, Copy)]
pub struct Aabb {
    /// Lower corner.
    pub min: Vec3A,
    /// Upper corner.
    pub max: Vec3A,
}

impl Aabb {
    /// The empty box; union with it returns the other operand unchanged.
    pub const EMPTY: Aabb = Aabb {
        min: Vec3A::INFINITY,
        max: Vec3A::NEG_INFINITY,
    };

    /// Box spanning two points, in any corner order.
    pub fn new(p0: Vec3A, p1: Vec3A) -> Self {
        Self {
            min: p0.min(p1),
            max: p0.max(p1),
        }
    }

    /// Smallest box containing `self` and the point `p`.
    pub fn union_point(&self, p: Vec3A) -> Self {
        Self {
            min: self.min.min(p),
            max: self.max.max(p),
        }
    }

    /// Smallest box containing both operands.
    pub fn union(&self, other: &Aabb) -> Self {
        Self {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    /// Midpoint of the box, used as the splitting coordinate during BVH build.
    pub fn centroid(&self) -> Vec3A {
        0.5 * (self.min + self.max)
    }

    /// Axis with the largest extent; ties break toward X, then Y.
    pub fn longest_axis(&self) -> usize {
        let d = self.max - self.min;
        if d.x >= d.y && d.x >= d.z {
            0
        } else if d.y >= d.z {
            1
        } else {
            2
        }
    }

    /// Corner selected by index: 0 for the lower corner, 1 for the upper.
    #[inline]
    fn corner(&self, i: usize) -> Vec3A {
        if i == 0 {
            self.min
        } else {
            self.max
        }
    }

    /// Returns true when `self` fully contains `other` on every axis.
    pub fn encloses(&self, other: &Aabb) -> bool {
        (0..3).all(|a| self.min[a] <= other.min[a] && self.max[a] >= other.max[a])
    }

    /// Slab test against the query interval `ray_t`.
    ///
    /// The ray's sign array selects the near/far corner per axis, so negative
    /// directions need no per-axis min/max. The three per-axis intervals are
    /// intersected with an early exit as soon as the running interval becomes
    /// empty; the hit is accepted iff the final interval strictly overlaps
    /// `ray_t`.
    pub fn hit(&self, ray: &Ray, ray_t: Interval) -> bool {
        let mut t_near = (self.corner(ray.sign[0]).x - ray.origin.x) * ray.inv_dir.x;
        let mut t_far = (self.corner(1 - ray.sign[0]).x - ray.origin.x) * ray.inv_dir.x;

        for axis in 1..3 {
            let near = (self.corner(ray.sign[axis])[axis] - ray.origin[axis]) * ray.inv_dir[axis];
            let far =
                (self.corner(1 - ray.sign[axis])[axis] - ray.origin[axis]) * ray.inv_dir[axis];

            if near > t_far || t_near > far {
                return false;
            }
            if near > t_near {
                t_near = near;
            }
            if far < t_far {
                t_far = far;
            }
        }

        t_near < ray_t.max && t_far > ray_t.min
    }
}

impl Default for Aabb {
    fn default() -> Self {
        Self::EMPTY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_box() -> Aabb {
        Aabb::new(Vec3A::new(-1.0, -1.0, -1.0), Vec3A::new(1.0, 1.0, 1.0))
    }

    #[test]
    fn empty_union_is_identity() {
        let b = unit_box();
        let u = Aabb::EMPTY.union(&b);
        assert_eq!(u.min, b.min);
        assert_eq!(u.max, b.max);
    }

    #[test]
    fn union_point_grows_box() {
        let b = unit_box().union_point(Vec3A::new(3.0, 0.0, -2.0));
        assert_eq!(b.max.x, 3.0);
        assert_eq!(b.min.z, -2.0);
        assert!(b.encloses(&unit_box()));
    }

    #[test]
    fn longest_axis_tie_break() {
        let b = Aabb::new(Vec3A::ZERO, Vec3A::new(2.0, 2.0, 2.0));
        assert_eq!(b.longest_axis(), 0);
        let b = Aabb::new(Vec3A::ZERO, Vec3A::new(1.0, 2.0, 2.0));
        assert_eq!(b.longest_axis(), 1);
        let b = Aabb::new(Vec3A::ZERO, Vec3A::new(1.0, 1.0, 2.0));
        assert_eq!(b.longest_axis(), 2);
    }

    #[test]
    fn ray_starting_inside_hits() {
        let b = unit_box();
        for dir in [
            Vec3A::X,
            Vec3A::NEG_X,
            Vec3A::Y,
            Vec3A::NEG_Y,
            Vec3A::Z,
            Vec3A::NEG_Z,
        ] {
            let r = Ray::new(Vec3A::ZERO, dir);
            assert!(b.hit(&r, Interval::new(0.0, f32::INFINITY)), "dir {dir}");
            assert!(b.hit(&r, Interval::new(-0.5, 0.5)), "dir {dir}");
        }
    }

    #[test]
    fn negative_direction_hits() {
        let b = unit_box();
        let r = Ray::new(Vec3A::new(5.0, 0.5, -0.5), Vec3A::new(-1.0, 0.0, 0.0));
        assert!(b.hit(&r, Interval::new(0.0, f32::INFINITY)));
    }

    #[test]
    fn axis_aligned_miss() {
        // Box union entirely below x = 10; a +X ray from (10,10,10) must miss.
        let b = Aabb::new(Vec3A::new(-4.0, -4.0, -4.0), Vec3A::new(6.0, 6.0, 6.0));
        let r = Ray::new(Vec3A::new(10.0, 10.0, 10.0), Vec3A::X);
        assert!(!b.hit(&r, Interval::new(0.0, f32::INFINITY)));
    }

    #[test]
    fn query_interval_limits_hit() {
        let b = unit_box();
        let r = Ray::new(Vec3A::new(-5.0, 0.0, 0.0), Vec3A::X);
        assert!(b.hit(&r, Interval::new(0.0, f32::INFINITY)));
        // Box spans t in [4, 6]; a query capped at t=2 cannot overlap it.
        assert!(!b.hit(&r, Interval::new(0.0, 2.0)));
    }
}
