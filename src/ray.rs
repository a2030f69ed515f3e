//! Ray representation for 3D ray tracing.
//!
//! A ray is defined as r(t) = origin + t * direction, representing a semi-infinite
//! line in 3D space used for intersection testing.

use glam::Vec3A;

/// Ray in 3D space defined by origin and direction.
///
/// Mathematical representation: r(t) = origin + t * direction
///
/// The per-axis inverse direction and sign array are precomputed at
/// construction so the bounding-box slab test can pick box corners without
/// branching on the direction. Rays are immutable once built.
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    /// Starting point of the ray in world coordinates.
    pub origin: Vec3A,

    /// Direction vector of the ray.
    ///
    /// Not required to be normalized; primary rays point from the lens to
    /// the focus plane and keep their raw length.
    pub direction: Vec3A,

    /// Componentwise reciprocal of `direction`.
    pub inv_dir: Vec3A,

    /// `sign[axis]` is 1 when `direction[axis]` is negative, 0 otherwise.
    pub sign: [usize; 3],
}

impl Ray {
    /// Create a new ray with origin and direction.
    pub fn new(origin: Vec3A, direction: Vec3A) -> Self {
        Self {
            origin,
            direction,
            inv_dir: direction.recip(),
            sign: [
                (direction.x < 0.0) as usize,
                (direction.y < 0.0) as usize,
                (direction.z < 0.0) as usize,
            ],
        }
    }

    /// Compute a point at parameter t along the ray.
    ///
    /// Returns r(t) = origin + t * direction.
    pub fn at(&self, t: f32) -> Vec3A {
        self.origin + t * self.direction
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn point_at_parameter() {
        let r = Ray::new(Vec3A::new(1.0, 2.0, 3.0), Vec3A::new(0.0, 0.0, -2.0));
        assert_eq!(r.at(0.0), Vec3A::new(1.0, 2.0, 3.0));
        assert_eq!(r.at(1.5), Vec3A::new(1.0, 2.0, 0.0));
    }

    #[test]
    fn inverse_and_sign_match_direction() {
        let r = Ray::new(Vec3A::ZERO, Vec3A::new(2.0, -4.0, 0.5));
        assert_eq!(r.sign, [0, 1, 0]);
        assert_eq!(r.inv_dir.x, 0.5);
        assert_eq!(r.inv_dir.y, -0.25);
        assert_eq!(r.inv_dir.z, 2.0);
    }
}
