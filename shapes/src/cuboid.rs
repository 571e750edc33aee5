//! Axis-aligned boxes

use octray_core::base::{Float, RAY_EPSILON};
use octray_core::geometry::{Bounds3f, Point3f, Ray, Vector3f};
use octray_core::material::ArcMaterial;
use octray_core::primitive::{Hit, Primitive};

/// An axis-aligned box.
pub struct Cuboid {
    /// Extent.
    bounds: Bounds3f,

    /// Material.
    material: ArcMaterial,
}

impl Cuboid {
    /// Creates a new box from two opposite corners.
    ///
    /// * `p1`       - First corner.
    /// * `p2`       - Second corner.
    /// * `material` - Material.
    pub fn new(p1: Point3f, p2: Point3f, material: ArcMaterial) -> Self {
        Self {
            bounds: Bounds3f::new(p1, p2),
            material,
        }
    }
}

impl Primitive for Cuboid {
    /// Slab test that tracks which axis bounded the interval, so the hit
    /// normal is the outward normal of the face crossed.
    fn intersect(&self, ray: &Ray) -> Option<Hit> {
        if ray.d.is_zero() {
            return None;
        }
        let mut t0 = -Float::INFINITY;
        let mut t1 = Float::INFINITY;
        let mut axis0 = 0;
        let mut axis1 = 0;

        for axis in 0..3 {
            let inv = 1.0 / ray.d[axis];
            let mut t_near = (self.bounds.p_min[axis] - ray.o[axis]) * inv;
            let mut t_far = (self.bounds.p_max[axis] - ray.o[axis]) * inv;
            if t_near > t_far {
                std::mem::swap(&mut t_near, &mut t_far);
            }
            if t_near > t0 {
                t0 = t_near;
                axis0 = axis;
            }
            if t_far < t1 {
                t1 = t_far;
                axis1 = axis;
            }
            if t0 > t1 {
                return None;
            }
        }

        let (t, axis, sign) = if t0 > RAY_EPSILON {
            // Entering: outward normal opposes the ray on the entry axis.
            (t0, axis0, -ray.d[axis0].signum())
        } else if t1 > RAY_EPSILON {
            // Origin inside: exit face, outward normal along the ray.
            (t1, axis1, ray.d[axis1].signum())
        } else {
            return None;
        };

        let mut n = Vector3f::zero();
        n[axis] = sign;
        Some(Hit::new(t, n))
    }

    fn bounds(&self) -> Bounds3f {
        self.bounds
    }

    fn has_interior(&self) -> bool {
        true
    }

    fn material(&self) -> ArcMaterial {
        self.material.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::approx_eq;
    use octray_core::material::Material;
    use std::sync::Arc;

    fn unit_cuboid() -> Cuboid {
        Cuboid::new(
            Point3f::new(-1.0, -1.0, -1.0),
            Point3f::new(1.0, 1.0, 1.0),
            Arc::new(Material::default()),
        )
    }

    #[test]
    fn entry_face_normal() {
        let c = unit_cuboid();
        let r = Ray::new(Point3f::new(0.0, 0.0, 5.0), Vector3f::new(0.0, 0.0, -1.0));
        let hit = c.intersect(&r).unwrap();
        assert!(approx_eq!(Float, hit.t, 4.0, epsilon = 1e-9));
        assert_eq!(hit.n, Vector3f::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn exit_face_normal_from_inside() {
        let c = unit_cuboid();
        let r = Ray::new(Point3f::zero(), Vector3f::new(1.0, 0.0, 0.0));
        let hit = c.intersect(&r).unwrap();
        assert!(approx_eq!(Float, hit.t, 1.0, epsilon = 1e-9));
        assert_eq!(hit.n, Vector3f::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn miss() {
        let c = unit_cuboid();
        let r = Ray::new(Point3f::new(3.0, 3.0, 5.0), Vector3f::new(0.0, 0.0, -1.0));
        assert!(c.intersect(&r).is_none());
    }
}
