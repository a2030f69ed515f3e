//! Scene storage and preset scenes.
//!
//! A [`World`] owns the primitive lists; a [`Scene`] pairs it with the BVH
//! built over its spheres. Planes have no finite bounding box, so the scene
//! tests them by linear scan after tree traversal.

use glam::Vec3A;
use log::info;
use rand::Rng;

use crate::bvh::Bvh;
use crate::camera::Camera;
use crate::hittable::{HitRecord, Hittable};
use crate::interval::Interval;
use crate::material::Material;
use crate::plane::Plane;
use crate::random;
use crate::ray::Ray;
use crate::sphere::Sphere;

/// Primitive storage for a scene.
///
/// Primitives and their materials live here for the full render; the BVH
/// refers to them by index.
#[derive(Default)]
pub struct World {
    /// Sphere primitives; indexed by the BVH's ordered list.
    pub spheres: Vec<Sphere>,
    /// Plane primitives; tested outside the BVH.
    pub planes: Vec<Plane>,
}

impl World {
    /// Create an empty world.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a sphere to the world.
    pub fn add_sphere(&mut self, sphere: Sphere) {
        self.spheres.push(sphere);
    }

    /// Add a plane to the world.
    pub fn add_plane(&mut self, plane: Plane) {
        self.planes.push(plane);
    }
}

impl Hittable for World {
    /// Brute-force nearest hit over every primitive.
    ///
    /// The render path goes through [`Scene`]; this scan is the reference
    /// the BVH is checked against.
    fn hit(&self, r: &Ray, ray_t: Interval, rec: &mut HitRecord) -> bool {
        let mut hit_anything = false;
        let mut closest_so_far = ray_t.max;

        for sphere in &self.spheres {
            if sphere.hit(r, Interval::new(ray_t.min, closest_so_far), rec) {
                hit_anything = true;
                closest_so_far = rec.t;
            }
        }
        for plane in &self.planes {
            if plane.hit(r, Interval::new(ray_t.min, closest_so_far), rec) {
                hit_anything = true;
                closest_so_far = rec.t;
            }
        }

        hit_anything
    }
}

/// A world plus the acceleration structure over its spheres.
pub struct Scene {
    /// The primitive storage the BVH indexes into.
    pub world: World,
    bvh: Bvh,
}

impl Scene {
    /// Build the BVH for `world` and wrap both for rendering.
    pub fn new(world: World) -> Self {
        let bvh = Bvh::build(&world.spheres);
        info!(
            "Scene: {} spheres in {} BVH nodes, {} planes outside the tree",
            world.spheres.len(),
            bvh.node_count(),
            world.planes.len()
        );
        Self { world, bvh }
    }
}

impl Hittable for Scene {
    fn hit(&self, r: &Ray, ray_t: Interval, rec: &mut HitRecord) -> bool {
        let mut hit_anything =
            self.bvh
                .hit(&self.world.spheres, &self.world.planes, r, ray_t, rec);
        let mut closest_so_far = if hit_anything { rec.t } else { ray_t.max };

        // Planes are unbounded and live outside the tree.
        for plane in &self.world.planes {
            if plane.hit(r, Interval::new(ray_t.min, closest_so_far), rec) {
                hit_anything = true;
                closest_so_far = rec.t;
            }
        }

        hit_anything
    }
}

/// The default scene: two blue diffuse spheres flanking a glass sphere over
/// a large ground sphere.
pub fn three_spheres(aspect_ratio: f32) -> (World, Camera) {
    let blue = Material::PureDiffuse {
        albedo: Vec3A::new(0.1, 0.2, 0.5),
    };
    let ground = Material::PureDiffuse {
        albedo: Vec3A::new(0.8, 0.8, 0.0),
    };
    let glass = Material::Dielectric {
        albedo: Vec3A::ONE,
        ri: 1.5,
    };

    let mut world = World::new();
    world.add_sphere(Sphere::new(Vec3A::new(-1.5, 0.0, -1.5), 0.5, blue));
    world.add_sphere(Sphere::new(Vec3A::new(0.0, 0.0, -1.0), 0.5, glass));
    world.add_sphere(Sphere::new(Vec3A::new(1.5, 0.0, -1.5), 0.5, blue));
    world.add_sphere(Sphere::new(Vec3A::new(0.0, -100.5, -1.0), 100.0, ground));

    let look_from = Vec3A::new(0.0, 0.0, 1.0);
    let look_at = Vec3A::new(0.0, 0.0, -1.0);
    let camera = Camera::new(
        look_from,
        look_at,
        90.0,
        aspect_ratio,
        0.0,
        (look_at - look_from).length(),
    );

    (world, camera)
}

/// The book-cover scene: a 22x22 field of random small spheres around three
/// large feature spheres, on a gray ground sphere.
pub fn cover(aspect_ratio: f32, rng: &mut impl Rng) -> (World, Camera) {
    let mut world = World::new();

    let ground = Material::PureDiffuse {
        albedo: Vec3A::splat(0.5),
    };
    world.add_sphere(Sphere::new(Vec3A::new(0.0, -1000.0, 0.0), 1000.0, ground));

    for a in -11..11 {
        for b in -11..11 {
            let choose_mat = random::random_f32(rng);
            let center = Vec3A::new(
                a as f32 + 0.9 * random::random_f32(rng),
                0.2,
                b as f32 + 0.9 * random::random_f32(rng),
            );

            // Keep clear of the large feature spheres.
            if (center - Vec3A::new(4.0, 0.2, 0.0)).length() <= 0.9 {
                continue;
            }

            let material = if choose_mat < 0.8 {
                Material::PureDiffuse {
                    albedo: random::random_color(rng) * random::random_color(rng),
                }
            } else if choose_mat < 0.95 {
                Material::Metallic {
                    albedo: random::random_color_range(rng, 0.5, 1.0),
                    fuzz: random::random_f32_range(rng, 0.0, 0.5),
                }
            } else {
                Material::Dielectric {
                    albedo: Vec3A::ONE,
                    ri: 1.5,
                }
            };
            world.add_sphere(Sphere::new(center, 0.2, material));
        }
    }

    world.add_sphere(Sphere::new(
        Vec3A::new(0.0, 1.0, 0.0),
        1.0,
        Material::Dielectric {
            albedo: Vec3A::ONE,
            ri: 1.5,
        },
    ));
    world.add_sphere(Sphere::new(
        Vec3A::new(-4.0, 1.0, 0.0),
        1.0,
        Material::PureDiffuse {
            albedo: Vec3A::new(0.4, 0.2, 0.1),
        },
    ));
    world.add_sphere(Sphere::new(
        Vec3A::new(4.0, 1.0, 0.0),
        1.0,
        Material::Metallic {
            albedo: Vec3A::new(0.7, 0.6, 0.5),
            fuzz: 0.0,
        },
    ));

    let camera = Camera::new(
        Vec3A::new(13.0, 2.0, 3.0),
        Vec3A::ZERO,
        20.0,
        aspect_ratio,
        0.1,
        10.0,
    );

    (world, camera)
}
