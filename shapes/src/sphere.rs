//! Spheres

use octray_core::base::{Float, RAY_EPSILON};
use octray_core::geometry::{Bounds3f, Point3f, Ray, Vector3f};
use octray_core::material::ArcMaterial;
use octray_core::primitive::{Hit, Primitive};

/// A sphere given by center and radius.
pub struct Sphere {
    /// Center.
    center: Point3f,

    /// Radius.
    radius: Float,

    /// Material.
    material: ArcMaterial,
}

impl Sphere {
    /// Creates a new sphere.
    ///
    /// * `center`   - Center.
    /// * `radius`   - Radius.
    /// * `material` - Material.
    pub fn new(center: Point3f, radius: Float, material: ArcMaterial) -> Self {
        Self {
            center,
            radius,
            material,
        }
    }
}

impl Primitive for Sphere {
    /// Solves the quadratic for the ray-sphere intersection and returns the
    /// nearest root beyond `RAY_EPSILON`. The normal always points outward,
    /// also for hits from inside.
    fn intersect(&self, ray: &Ray) -> Option<Hit> {
        let oc = ray.o - self.center;
        let a = ray.d.length_squared();
        if a == 0.0 {
            return None;
        }
        let half_b = oc.dot(&ray.d);
        let c = oc.length_squared() - self.radius * self.radius;

        let disc = half_b * half_b - a * c;
        if disc < 0.0 {
            return None;
        }
        let sqrt_disc = disc.sqrt();

        let mut t = (-half_b - sqrt_disc) / a;
        if t <= RAY_EPSILON {
            t = (-half_b + sqrt_disc) / a;
            if t <= RAY_EPSILON {
                return None;
            }
        }

        let n = (ray.at(t) - self.center) / self.radius;
        Some(Hit::new(t, n))
    }

    fn bounds(&self) -> Bounds3f {
        let r = Vector3f::new(self.radius, self.radius, self.radius);
        Bounds3f::new(self.center - r, self.center + r)
    }

    fn has_interior(&self) -> bool {
        true
    }

    fn material(&self) -> ArcMaterial {
        self.material.clone()
    }
}
