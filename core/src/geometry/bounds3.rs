//! Axis-aligned bounding boxes

use super::{Point3f, Ray, Vector3f};
use crate::base::Float;

/// An axis-aligned bounding box stored as minimum and maximum corners.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Bounds3f {
    /// Minimum corner.
    pub p_min: Point3f,

    /// Maximum corner.
    pub p_max: Point3f,
}

impl Bounds3f {
    /// Creates a new bounding box from two corner points.
    ///
    /// * `p1` - First corner.
    /// * `p2` - Second corner.
    pub fn new(p1: Point3f, p2: Point3f) -> Self {
        Self {
            p_min: Point3f::new(p1.x.min(p2.x), p1.y.min(p2.y), p1.z.min(p2.z)),
            p_max: Point3f::new(p1.x.max(p2.x), p1.y.max(p2.y), p1.z.max(p2.z)),
        }
    }

    /// Creates an empty bounding box where min > max on every axis, so any
    /// union with a real box or point replaces it.
    pub fn empty() -> Self {
        Self {
            p_min: Point3f::new(Float::INFINITY, Float::INFINITY, Float::INFINITY),
            p_max: Point3f::new(-Float::INFINITY, -Float::INFINITY, -Float::INFINITY),
        }
    }

    /// Returns the union of this box and a point.
    ///
    /// * `p` - The point.
    pub fn union_point(&self, p: &Point3f) -> Self {
        Self {
            p_min: Point3f::new(
                self.p_min.x.min(p.x),
                self.p_min.y.min(p.y),
                self.p_min.z.min(p.z),
            ),
            p_max: Point3f::new(
                self.p_max.x.max(p.x),
                self.p_max.y.max(p.y),
                self.p_max.z.max(p.z),
            ),
        }
    }

    /// Returns the union of this box and another.
    ///
    /// * `other` - The other box.
    pub fn union(&self, other: &Self) -> Self {
        self.union_point(&other.p_min).union_point(&other.p_max)
    }

    /// Returns true if the two boxes overlap (boundaries included).
    ///
    /// * `other` - The other box.
    pub fn overlaps(&self, other: &Self) -> bool {
        self.p_min.x <= other.p_max.x
            && self.p_max.x >= other.p_min.x
            && self.p_min.y <= other.p_max.y
            && self.p_max.y >= other.p_min.y
            && self.p_min.z <= other.p_max.z
            && self.p_max.z >= other.p_min.z
    }

    /// Returns true if the point lies inside or on the boundary.
    ///
    /// * `p` - The point.
    pub fn contains(&self, p: &Point3f) -> bool {
        p.x >= self.p_min.x
            && p.x <= self.p_max.x
            && p.y >= self.p_min.y
            && p.y <= self.p_max.y
            && p.z >= self.p_min.z
            && p.z <= self.p_max.z
    }

    /// Returns the vector from the minimum to the maximum corner.
    pub fn diagonal(&self) -> Vector3f {
        self.p_max - self.p_min
    }

    /// Returns the center of the box.
    pub fn centroid(&self) -> Point3f {
        self.p_min + self.diagonal() * 0.5
    }

    /// Intersects a ray against the box using the slab test. Returns the
    /// parametric interval `(tmin, tmax)` where the ray overlaps the box, or
    /// `None` when it misses. Zero direction components produce infinities
    /// which the interval arithmetic handles; NaN from 0 * ∞ is avoided by
    /// `f64::min`/`f64::max` preferring the non-NaN operand.
    ///
    /// * `ray` - The ray.
    pub fn intersect_p(&self, ray: &Ray) -> Option<(Float, Float)> {
        let mut t0 = -Float::INFINITY;
        let mut t1 = Float::INFINITY;

        for axis in 0..3 {
            let inv = 1.0 / ray.d[axis];
            let mut t_near = (self.p_min[axis] - ray.o[axis]) * inv;
            let mut t_far = (self.p_max[axis] - ray.o[axis]) * inv;
            if t_near > t_far {
                std::mem::swap(&mut t_near, &mut t_far);
            }
            t0 = t0.max(t_near);
            t1 = t1.min(t_far);
            if t0 > t1 {
                return None;
            }
        }

        Some((t0, t1))
    }
}

impl Default for Bounds3f {
    fn default() -> Self {
        Self::empty()
    }
}
