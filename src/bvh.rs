//! Bounding-volume hierarchy over scene primitives.
//!
//! The tree is built by recursive midpoint partitioning along the widest
//! centroid axis and stored in a flat node arena addressed by index. Leaves
//! reference contiguous slices of an ordered primitive list produced during
//! the build, so traversal never touches the input ordering again.

use glam::Vec3A;
use log::debug;

use crate::aabb::Aabb;
use crate::hittable::{HitRecord, Hittable};
use crate::interval::Interval;
use crate::plane::Plane;
use crate::ray::Ray;
use crate::sphere::Sphere;

/// Traversal stack capacity; midpoint trees stay far shallower in practice.
const MAX_TREE_DEPTH: usize = 64;

/// Handle to a primitive in caller-owned storage.
///
/// Planes carry no finite bounding box and are never inserted into the tree
/// today; the variant exists so the ordered list can hold them if a bounded
/// representation (a clipped half-space) is added.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimId {
    /// Index into the scene's sphere list.
    Sphere(usize),
    /// Index into the scene's plane list.
    Plane(usize),
}

/// Per-primitive build record: handle, bounds, and splitting centroid.
#[derive(Debug, Clone, Copy)]
pub struct PrimInfo {
    /// Handle to the concrete primitive.
    pub id: PrimId,
    /// The primitive's bounding box.
    pub bounds: Aabb,
    /// Midpoint of `bounds`, the coordinate the build partitions on.
    pub centroid: Vec3A,
}

impl PrimInfo {
    fn for_sphere(index: usize, sphere: &Sphere) -> Self {
        let bounds = sphere.bounding_box();
        Self {
            id: PrimId::Sphere(index),
            bounds,
            centroid: bounds.centroid(),
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum NodeKind {
    Interior {
        left: u32,
        right: u32,
        /// Axis the children were partitioned on; orders traversal.
        axis: usize,
    },
    Leaf {
        /// Start of this leaf's slice in the ordered primitive list.
        first: u32,
        /// Number of primitives in the slice; always > 0 for a leaf.
        count: u32,
    },
}

#[derive(Debug, Clone, Copy)]
struct BvhNode {
    bounds: Aabb,
    kind: NodeKind,
}

/// The acceleration structure: a node arena plus the ordered primitive list.
///
/// Nodes are bump-pushed during the build and freed as one allocation with
/// the tree. The root is the last node pushed.
pub struct Bvh {
    nodes: Vec<BvhNode>,
    ordered: Vec<PrimInfo>,
}

impl Bvh {
    /// Build the hierarchy over a sphere list.
    ///
    /// The build is single-threaded and deterministic for a given input
    /// order. An empty input produces an empty tree that misses every ray.
    pub fn build(spheres: &[Sphere]) -> Self {
        let mut info: Vec<PrimInfo> = spheres
            .iter()
            .enumerate()
            .map(|(i, s)| PrimInfo::for_sphere(i, s))
            .collect();

        let mut bvh = Bvh {
            nodes: Vec::with_capacity(2 * info.len()),
            ordered: Vec::with_capacity(info.len()),
        };
        if !info.is_empty() {
            bvh.build_range(&mut info);
        }

        debug!(
            "BVH built: {} primitives, {} nodes",
            bvh.ordered.len(),
            bvh.nodes.len()
        );
        bvh
    }

    /// Recursively build the subtree for `info`, returning its node index.
    ///
    /// Children are emitted before their parent, so a subtree root is always
    /// the highest index in its subtree and the tree root the last node.
    fn build_range(&mut self, info: &mut [PrimInfo]) -> u32 {
        let total_bounds = info
            .iter()
            .fold(Aabb::EMPTY, |b, p| b.union(&p.bounds));

        if info.len() == 1 {
            return self.push_leaf(total_bounds, info);
        }

        let centroid_bounds = info
            .iter()
            .fold(Aabb::EMPTY, |b, p| b.union_point(p.centroid));
        let dim = centroid_bounds.longest_axis();

        // All centroids coincident on the split axis: nothing to partition.
        if centroid_bounds.min[dim] == centroid_bounds.max[dim] {
            return self.push_leaf(total_bounds, info);
        }

        let pmid = 0.5 * (centroid_bounds.min[dim] + centroid_bounds.max[dim]);
        let mid = partition_stable(info, |p| p.centroid[dim] < pmid);

        let (left_info, right_info) = info.split_at_mut(mid);
        let left = self.build_range(left_info);
        let right = self.build_range(right_info);

        self.nodes.push(BvhNode {
            bounds: total_bounds,
            kind: NodeKind::Interior {
                left,
                right,
                axis: dim,
            },
        });
        (self.nodes.len() - 1) as u32
    }

    fn push_leaf(&mut self, bounds: Aabb, prims: &[PrimInfo]) -> u32 {
        let first = self.ordered.len() as u32;
        self.ordered.extend_from_slice(prims);
        self.nodes.push(BvhNode {
            bounds,
            kind: NodeKind::Leaf {
                first,
                count: prims.len() as u32,
            },
        });
        (self.nodes.len() - 1) as u32
    }

    /// Number of primitives referenced by the tree.
    pub fn primitive_count(&self) -> usize {
        self.ordered.len()
    }

    /// Number of nodes in the arena.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Bounding box of the whole tree; empty for an empty tree.
    pub fn bounds(&self) -> Aabb {
        self.nodes.last().map_or(Aabb::EMPTY, |n| n.bounds)
    }

    /// Find the nearest hit in `ray_t`, reading primitives from the caller's
    /// storage (the same lists the tree was built over).
    ///
    /// Traversal is iterative over an explicit stack. Interior nodes descend
    /// the near child first, chosen by the ray's sign on the split axis, and
    /// the query maximum shrinks to the best hit found so far. Every
    /// primitive of a leaf is tested; the closest hit wins.
    pub fn hit(
        &self,
        spheres: &[Sphere],
        planes: &[Plane],
        ray: &Ray,
        ray_t: Interval,
        rec: &mut HitRecord,
    ) -> bool {
        let Some(root) = self.nodes.len().checked_sub(1) else {
            return false;
        };

        let mut stack = [0u32; MAX_TREE_DEPTH];
        let mut top = 0;
        stack[top] = root as u32;
        top += 1;

        let mut closest = ray_t.max;
        let mut hit_anything = false;

        while top > 0 {
            top -= 1;
            let node = &self.nodes[stack[top] as usize];

            if !node.bounds.hit(ray, Interval::new(ray_t.min, closest)) {
                continue;
            }

            match node.kind {
                NodeKind::Leaf { first, count } => {
                    let slice = &self.ordered[first as usize..(first + count) as usize];
                    for prim in slice {
                        let t = Interval::new(ray_t.min, closest);
                        let was_hit = match prim.id {
                            PrimId::Sphere(i) => spheres[i].hit(ray, t, rec),
                            PrimId::Plane(i) => planes[i].hit(ray, t, rec),
                        };
                        if was_hit {
                            hit_anything = true;
                            closest = rec.t;
                        }
                    }
                }
                NodeKind::Interior { left, right, axis } => {
                    // Far child below the near one so the near pops first.
                    let (near, far) = if ray.sign[axis] == 0 {
                        (left, right)
                    } else {
                        (right, left)
                    };
                    debug_assert!(top + 2 <= MAX_TREE_DEPTH);
                    stack[top] = far;
                    stack[top + 1] = near;
                    top += 2;
                }
            }
        }

        hit_anything
    }
}

/// Partition `items` in place so entries satisfying `pred` come first,
/// preserving relative order within each side. Returns the split index.
fn partition_stable<T: Copy>(items: &mut [T], pred: impl Fn(&T) -> bool) -> usize {
    let (left, right): (Vec<T>, Vec<T>) = items.iter().copied().partition(|p| pred(p));
    let mid = left.len();
    items[..mid].copy_from_slice(&left);
    items[mid..].copy_from_slice(&right);
    mid
}
