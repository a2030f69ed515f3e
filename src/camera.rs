//! Thin-lens camera for primary ray generation.

use glam::Vec3A;
use rand::Rng;

use crate::random;
use crate::ray::Ray;

/// Thin-lens camera with configurable field of view, aspect ratio, aperture,
/// and focus distance.
///
/// The screen spans and the lower-left corner are pre-scaled by the focus
/// distance at construction, so ray generation is a few fused multiply-adds.
/// Depth of field comes from jittering the ray origin across a disk of
/// radius `aperture / 2` while the focus-plane target stays fixed.
#[derive(Debug, Clone, Copy)]
pub struct Camera {
    /// Camera position in world space.
    pub origin: Vec3A,
    /// Lower-left corner of the focus plane.
    pub lower_left: Vec3A,
    /// Full horizontal span of the focus plane.
    pub horizontal: Vec3A,
    /// Full vertical span of the focus plane.
    pub vertical: Vec3A,
    /// Basis vector pointing opposite the view direction.
    pub front: Vec3A,
    /// Basis vector pointing to camera right.
    pub right: Vec3A,
    /// Basis vector pointing to camera up.
    pub up: Vec3A,
    /// Radius of the lens disk (aperture / 2).
    pub lens_radius: f32,
}

impl Camera {
    /// Build a camera looking from `look_from` toward `look_at`.
    ///
    /// `vfov` is the vertical field of view in degrees, `aperture` the lens
    /// diameter, `focus_dist` the distance to the plane of perfect focus.
    pub fn new(
        look_from: Vec3A,
        look_at: Vec3A,
        vfov: f32,
        aspect_ratio: f32,
        aperture: f32,
        focus_dist: f32,
    ) -> Self {
        let half_height = (vfov.to_radians() / 2.0).tan();
        let half_width = aspect_ratio * half_height;

        let front = (look_from - look_at).normalize();
        let right = Vec3A::Y.cross(front).normalize();
        let up = front.cross(right);

        Self {
            origin: look_from,
            lower_left: look_from
                - focus_dist * front
                - (half_width * focus_dist) * right
                - (half_height * focus_dist) * up,
            horizontal: 2.0 * half_width * focus_dist * right,
            vertical: 2.0 * half_height * focus_dist * up,
            front,
            right,
            up,
            lens_radius: aperture / 2.0,
        }
    }

    /// Generate the primary ray for screen coordinates `(u, v)` in [0,1]².
    ///
    /// The origin is jittered on the lens disk; the direction targets the
    /// focus plane and is left unnormalized.
    pub fn get_ray(&self, u: f32, v: f32, rng: &mut impl Rng) -> Ray {
        let d = self.lens_radius * random::random_in_unit_disk(rng);
        let offset = d.x * self.right + d.y * self.up;
        let start = self.origin + offset;
        Ray::new(
            start,
            self.lower_left + u * self.horizontal + v * self.vertical - start,
        )
    }
}
