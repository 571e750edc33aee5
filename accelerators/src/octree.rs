//! Octree aggregate

use octray_core::base::{Float, INFINITY, RAY_EPSILON};
use octray_core::geometry::{Bounds3f, Point3f, Ray, Vector3f};
use octray_core::primitive::{Aggregate, ArcPrimitive, Hit};

/// Default maximum subdivision depth.
pub const DEFAULT_MAX_DEPTH: usize = 7;

/// Stop subdividing once a node holds this many primitives or fewer.
const MAX_PRIMS_PER_LEAF: usize = 1;

/// Face indices for octant bounding boxes and their neighbor links.
///
/// 0: +x, 1: +z, 2: -y, 3: -x, 4: -z, 5: +y. A face and its opposite are
/// three apart, so `(f + 3) % 6` flips direction.
const FACE_AXIS: [(usize, bool); 6] = [
    (0, true),
    (2, true),
    (1, false),
    (0, false),
    (2, false),
    (1, true),
];

/// Octant child index bits: bit 0 set means the x-high half, bit 1 the
/// y-high half, bit 2 the z-high half.
const X_BIT: usize = 1;
const Y_BIT: usize = 2;
const Z_BIT: usize = 4;

/// A node in the octree arena. Interior nodes carry child handles; leaves
/// carry primitives. Every node carries neighbor ropes so traversal can walk
/// from leaf to adjacent leaf without revisiting the root.
struct Node {
    /// Spatial extent.
    bounds: Bounds3f,

    /// Child node handles for interior nodes.
    children: Option<[usize; 8]>,

    /// Primitives overlapping this node; only populated on leaves.
    prims: Vec<ArcPrimitive>,

    /// Handle of the adjacent node sharing each face, `None` on the hull.
    ropes: [Option<usize>; 6],
}

impl Node {
    fn new(bounds: Bounds3f) -> Self {
        Self {
            bounds,
            children: None,
            prims: Vec::new(),
            ropes: [None; 6],
        }
    }

    fn is_leaf(&self) -> bool {
        self.children.is_none()
    }
}

/// An octree over bounded primitives with rope-linked leaves.
///
/// A ray is located in its starting leaf once; after that, each leaf either
/// yields a hit inside the leaf or the traversal steps through the exit face
/// rope into the adjacent leaf. Primitives overlapping several octants are
/// stored in each, and a hit only counts when it lies inside the current
/// leaf's parametric interval, so duplicated primitives cannot produce a hit
/// out of order.
pub struct Octree {
    nodes: Vec<Node>,
    max_depth: usize,
}

impl Octree {
    /// Builds an octree over the given primitives with the default maximum
    /// depth.
    ///
    /// * `prims` - Bounded primitives.
    pub fn new(prims: Vec<ArcPrimitive>) -> Self {
        Self::with_max_depth(prims, DEFAULT_MAX_DEPTH)
    }

    /// Builds an octree with an explicit maximum subdivision depth.
    ///
    /// * `prims`     - Bounded primitives.
    /// * `max_depth` - Maximum subdivision depth.
    pub fn with_max_depth(prims: Vec<ArcPrimitive>, max_depth: usize) -> Self {
        let mut bounds = Bounds3f::empty();
        for prim in prims.iter() {
            bounds = bounds.union(&prim.bounds());
        }

        let mut tree = Self {
            nodes: vec![Node::new(bounds)],
            max_depth,
        };
        if !prims.is_empty() {
            let n = prims.len();
            tree.build(0, prims, 0);
            debug!(
                "octree over {} primitives: {} nodes, max depth {}",
                n,
                tree.nodes.len(),
                max_depth
            );
        }
        tree
    }

    /// Subdivides `node` until the leaf threshold or the depth limit is
    /// reached. Children are allocated before recursing so sibling ropes can
    /// reference their handles.
    fn build(&mut self, node: usize, prims: Vec<ArcPrimitive>, depth: usize) {
        if prims.len() <= MAX_PRIMS_PER_LEAF || depth >= self.max_depth {
            self.nodes[node].prims = prims;
            return;
        }

        let bounds = self.nodes[node].bounds;
        let center = bounds.centroid();

        let mut child_bounds = [Bounds3f::empty(); 8];
        for (i, cb) in child_bounds.iter_mut().enumerate() {
            let lo = Point3f::new(
                if i & X_BIT != 0 { center.x } else { bounds.p_min.x },
                if i & Y_BIT != 0 { center.y } else { bounds.p_min.y },
                if i & Z_BIT != 0 { center.z } else { bounds.p_min.z },
            );
            let hi = Point3f::new(
                if i & X_BIT != 0 { bounds.p_max.x } else { center.x },
                if i & Y_BIT != 0 { bounds.p_max.y } else { center.y },
                if i & Z_BIT != 0 { bounds.p_max.z } else { center.z },
            );
            *cb = Bounds3f::new(lo, hi);
        }

        let mut child_prims: Vec<Vec<ArcPrimitive>> = vec![Vec::new(); 8];
        for prim in prims.iter() {
            let pb = prim.bounds();
            for (i, cb) in child_bounds.iter().enumerate() {
                if cb.overlaps(&pb) {
                    child_prims[i].push(prim.clone());
                }
            }
        }

        let base = self.nodes.len();
        let mut children = [0usize; 8];
        for (i, cb) in child_bounds.iter().enumerate() {
            children[i] = base + i;
            self.nodes.push(Node::new(*cb));
        }

        // Each child inherits the parent rope on its outward side of every
        // axis and ropes to its sibling on the inward side.
        let parent_ropes = self.nodes[node].ropes;
        for (i, &child) in children.iter().enumerate() {
            let mut ropes = [None; 6];

            if i & X_BIT != 0 {
                ropes[0] = parent_ropes[0];
                ropes[3] = Some(children[i & !X_BIT]);
            } else {
                ropes[3] = parent_ropes[3];
                ropes[0] = Some(children[i | X_BIT]);
            }

            if i & Y_BIT != 0 {
                ropes[5] = parent_ropes[5];
                ropes[2] = Some(children[i & !Y_BIT]);
            } else {
                ropes[2] = parent_ropes[2];
                ropes[5] = Some(children[i | Y_BIT]);
            }

            if i & Z_BIT != 0 {
                ropes[1] = parent_ropes[1];
                ropes[4] = Some(children[i & !Z_BIT]);
            } else {
                ropes[4] = parent_ropes[4];
                ropes[1] = Some(children[i | Z_BIT]);
            }

            self.nodes[child].ropes = ropes;
        }

        self.nodes[node].children = Some(children);

        for (i, ps) in child_prims.into_iter().enumerate() {
            self.build(children[i], ps, depth + 1);
        }
    }

    /// Descends to the leaf containing `p`. Points within `RAY_EPSILON` of a
    /// split plane are pushed toward the half the ray is heading into, so a
    /// point sitting exactly on a boundary lands in the leaf the ray is
    /// about to traverse.
    fn locate(&self, p: &Point3f, d: &Vector3f) -> usize {
        let mut node = 0;
        while let Some(children) = self.nodes[node].children {
            let center = self.nodes[node].bounds.centroid();
            let mut idx = 0;
            for (axis, bit) in [(0, X_BIT), (1, Y_BIT), (2, Z_BIT)] {
                let delta = p[axis] - center[axis];
                let high = if delta.abs() < RAY_EPSILON {
                    d[axis] > 0.0
                } else {
                    delta > 0.0
                };
                if high {
                    idx |= bit;
                }
            }
            node = children[idx];
        }
        node
    }

    /// Descends to the leaf containing `p` inside the subtree at `start`,
    /// entered through the face opposite to exit face `face`. On the entry
    /// axis the point lies exactly on the subtree boundary, so that axis is
    /// forced to the entry side instead of being compared.
    fn locate_from_face(&self, start: usize, p: &Point3f, d: &Vector3f, face: usize) -> usize {
        let (entry_axis, exited_high) = FACE_AXIS[face];
        // Exiting through the high face enters the neighbor on its low side.
        let force_high = !exited_high;

        let mut node = start;
        while let Some(children) = self.nodes[node].children {
            let center = self.nodes[node].bounds.centroid();
            let mut idx = 0;
            for (axis, bit) in [(0, X_BIT), (1, Y_BIT), (2, Z_BIT)] {
                let high = if axis == entry_axis {
                    force_high
                } else {
                    let delta = p[axis] - center[axis];
                    if delta.abs() < RAY_EPSILON {
                        d[axis] > 0.0
                    } else {
                        delta > 0.0
                    }
                };
                if high {
                    idx |= bit;
                }
            }
            node = children[idx];
        }
        node
    }

    /// Returns the nearest intersection inside the current leaf's interval,
    /// or `None` if every candidate lies beyond the leaf.
    fn leaf_intersect(&self, leaf: usize, ray: &Ray, leaf_tmax: Float) -> Option<Hit> {
        let mut best: Option<Hit> = None;

        for prim in self.nodes[leaf].prims.iter() {
            if let Some(mut hit) = prim.intersect(ray) {
                if hit.t < leaf_tmax && best.as_ref().map_or(true, |b| hit.t < b.t) {
                    hit.prim = Some(prim.clone());
                    best = Some(hit);
                }
            }
        }

        best
    }
}

impl Aggregate for Octree {
    fn intersect(&self, ray: &Ray) -> Option<Hit> {
        if ray.d.is_zero() {
            return None;
        }

        let root = &self.nodes[0];
        if root.is_leaf() && root.prims.is_empty() {
            return None;
        }

        let (tmin, tmax) = root.bounds.intersect_p(ray)?;
        if tmax < RAY_EPSILON {
            return None;
        }

        // Advance an origin outside the tree onto the hull; hit distances
        // get the offset added back at the end.
        let mut rr = *ray;
        let mut t_offset = 0.0;
        if tmin > RAY_EPSILON {
            rr.o = ray.at(tmin);
            t_offset = tmin;
        }

        let mut leaf = self.locate(&rr.o, &rr.d);
        loop {
            let bounds = self.nodes[leaf].bounds;
            let leaf_tmax = match bounds.intersect_p(&rr) {
                Some((_, t1)) => t1,
                None => return None,
            };

            if let Some(mut hit) = self.leaf_intersect(leaf, &rr, leaf_tmax + RAY_EPSILON) {
                hit.t += t_offset;
                return Some(hit);
            }

            // Step through the exit face: probe every rope from the exit
            // point and take the neighbor the ray enters first.
            let exit_p = rr.at(leaf_tmax);
            let probe = Ray::new(exit_p, rr.d);

            let mut next: Option<(usize, usize)> = None;
            let mut best_entry = INFINITY;
            for (face, rope) in self.nodes[leaf].ropes.iter().enumerate() {
                if let Some(target) = rope {
                    if let Some((t0, t1)) = self.nodes[*target].bounds.intersect_p(&probe) {
                        if t1 >= -RAY_EPSILON && t0 >= -RAY_EPSILON && t0 < best_entry {
                            best_entry = t0;
                            next = Some((face, *target));
                        }
                    }
                }
            }

            match next {
                Some((face, target)) => {
                    leaf = self.locate_from_face(target, &exit_p, &rr.d, face);
                }
                // No rope ahead: the ray left the tree.
                None => return None,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::approx_eq;
    use octray_core::material::Material;
    use octray_core::primitive::same_primitive;
    use octray_shapes::Sphere;
    use rand::rngs::SmallRng;
    use rand::{Rng, SeedableRng};
    use std::sync::Arc;

    use crate::LinearList;

    fn sphere(x: Float, y: Float, z: Float, r: Float) -> ArcPrimitive {
        Arc::new(Sphere::new(
            Point3f::new(x, y, z),
            r,
            Arc::new(Material::default()),
        ))
    }

    #[test]
    fn empty_tree_misses() {
        let tree = Octree::new(vec![]);
        let r = Ray::new(Point3f::zero(), Vector3f::new(0.0, 0.0, -1.0));
        assert!(tree.intersect(&r).is_none());
    }

    #[test]
    fn nearest_of_row() {
        // Spheres along x; a ray down the row must hit the nearest one even
        // though they span many leaves.
        let prims: Vec<ArcPrimitive> =
            (0..16).map(|i| sphere(i as Float * 2.0, 0.0, 0.0, 0.5)).collect();
        let tree = Octree::new(prims);

        let r = Ray::new(Point3f::new(-5.0, 0.0, 0.0), Vector3f::new(1.0, 0.0, 0.0));
        let hit = tree.intersect(&r).unwrap();
        assert!(approx_eq!(Float, hit.t, 4.5, epsilon = 1e-9));
    }

    #[test]
    fn origin_inside_tree() {
        let prims = vec![sphere(0.0, 0.0, -4.0, 1.0), sphere(0.0, 0.0, 4.0, 1.0)];
        let tree = Octree::new(prims);

        let r = Ray::new(Point3f::zero(), Vector3f::new(0.0, 0.0, -1.0));
        let hit = tree.intersect(&r).unwrap();
        assert!(approx_eq!(Float, hit.t, 3.0, epsilon = 1e-9));
    }

    #[test]
    fn matches_linear_reference() {
        let mut rng = SmallRng::seed_from_u64(0x0c7_ee);

        let prims: Vec<ArcPrimitive> = (0..64)
            .map(|_| {
                sphere(
                    rng.gen_range(-10.0..10.0),
                    rng.gen_range(-10.0..10.0),
                    rng.gen_range(-10.0..10.0),
                    rng.gen_range(0.2..1.0),
                )
            })
            .collect();

        let tree = Octree::new(prims.clone());
        let linear = LinearList::new(prims);

        for _ in 0..10_000 {
            let o = Point3f::new(
                rng.gen_range(-15.0..15.0),
                rng.gen_range(-15.0..15.0),
                rng.gen_range(-15.0..15.0),
            );
            let d = Vector3f::new(
                rng.gen_range(-1.0..1.0),
                rng.gen_range(-1.0..1.0),
                rng.gen_range(-1.0..1.0),
            );
            if d.is_zero() {
                continue;
            }
            let ray = Ray::new(o, d.normalize());

            let a = tree.intersect(&ray);
            let b = linear.intersect(&ray);

            match (&a, &b) {
                (Some(a), Some(b)) => {
                    assert!(
                        approx_eq!(Float, a.t, b.t, epsilon = 1e-6),
                        "t mismatch: {} vs {}",
                        a.t,
                        b.t
                    );
                    assert!(same_primitive(&a.prim, &b.prim));
                }
                (None, None) => {}
                _ => panic!("hit/miss disagreement at {:?} -> {:?}", ray.o, ray.d),
            }
        }
    }

    #[test]
    fn axis_aligned_ray_through_split_planes() {
        // Sphere centered on the root split point; axis rays graze the
        // octant boundaries where the tie-break logic decides the leaf.
        let prims = vec![
            sphere(0.0, 0.0, 0.0, 1.0),
            sphere(5.0, 5.0, 5.0, 1.0),
            sphere(-5.0, -5.0, -5.0, 1.0),
            sphere(5.0, -5.0, 5.0, 1.0),
        ];
        let tree = Octree::new(prims);

        for d in [
            Vector3f::new(1.0, 0.0, 0.0),
            Vector3f::new(0.0, 1.0, 0.0),
            Vector3f::new(0.0, 0.0, 1.0),
        ] {
            let r = Ray::new(Point3f::zero() - d * 10.0, d);
            let hit = tree.intersect(&r).unwrap();
            assert!(approx_eq!(Float, hit.t, 9.0, epsilon = 1e-6));
        }
    }
}
