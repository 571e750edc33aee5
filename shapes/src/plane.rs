//! Planes

use octray_core::base::RAY_EPSILON;
use octray_core::geometry::{Bounds3f, Point3f, Ray, Vector3f};
use octray_core::material::ArcMaterial;
use octray_core::primitive::{Hit, Primitive};

/// An infinite plane through a point with a given normal. Planes are
/// two-sided and have no interior, so the reported normal is flipped to
/// face the incoming ray.
pub struct Plane {
    /// A point on the plane.
    point: Point3f,

    /// Unit plane normal.
    normal: Vector3f,

    /// Material.
    material: ArcMaterial,
}

impl Plane {
    /// Creates a new plane.
    ///
    /// * `point`    - A point on the plane.
    /// * `normal`   - Plane normal; normalized here.
    /// * `material` - Material.
    pub fn new(point: Point3f, normal: Vector3f, material: ArcMaterial) -> Self {
        Self {
            point,
            normal: normal.normalize(),
            material,
        }
    }
}

impl Primitive for Plane {
    fn intersect(&self, ray: &Ray) -> Option<Hit> {
        let denom = self.normal.dot(&ray.d);
        if denom.abs() < RAY_EPSILON {
            return None;
        }

        let t = (self.point - ray.o).dot(&self.normal) / denom;
        if t <= RAY_EPSILON {
            return None;
        }

        let n = if denom < 0.0 { self.normal } else { -self.normal };
        Some(Hit::new(t, n))
    }

    /// Not meaningful; planes never enter the spatial index.
    fn bounds(&self) -> Bounds3f {
        Bounds3f::empty()
    }

    fn has_finite_bound(&self) -> bool {
        false
    }

    fn has_interior(&self) -> bool {
        false
    }

    fn material(&self) -> ArcMaterial {
        self.material.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::approx_eq;
    use octray_core::base::Float;
    use octray_core::material::Material;
    use std::sync::Arc;

    fn floor() -> Plane {
        Plane::new(
            Point3f::zero(),
            Vector3f::new(0.0, 1.0, 0.0),
            Arc::new(Material::default()),
        )
    }

    #[test]
    fn hit_from_above_and_below() {
        let p = floor();

        let from_above = Ray::new(Point3f::new(0.0, 2.0, 0.0), Vector3f::new(0.0, -1.0, 0.0));
        let hit = p.intersect(&from_above).unwrap();
        assert!(approx_eq!(Float, hit.t, 2.0, epsilon = 1e-9));
        assert_eq!(hit.n, Vector3f::new(0.0, 1.0, 0.0));

        let from_below = Ray::new(Point3f::new(0.0, -2.0, 0.0), Vector3f::new(0.0, 1.0, 0.0));
        let hit = p.intersect(&from_below).unwrap();
        assert_eq!(hit.n, Vector3f::new(0.0, -1.0, 0.0));
    }

    #[test]
    fn parallel_ray_misses() {
        let p = floor();
        let r = Ray::new(Point3f::new(0.0, 1.0, 0.0), Vector3f::new(1.0, 0.0, 0.0));
        assert!(p.intersect(&r).is_none());
    }
}
