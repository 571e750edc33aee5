//! Primitives

use crate::base::Float;
use crate::geometry::{Bounds3f, Ray, Vector3f};
use crate::material::ArcMaterial;
use std::sync::Arc;

/// Atomic reference counted `Primitive`.
pub type ArcPrimitive = Arc<dyn Primitive + Send + Sync>;

/// An intersection between a ray and a primitive.
#[derive(Clone)]
pub struct Hit {
    /// Parametric distance along the ray.
    pub t: Float,

    /// Unit surface normal at the intersection.
    pub n: Vector3f,

    /// The primitive that was hit. Shapes leave this empty; aggregates and
    /// the scene fill it in so shading can look up the material.
    pub prim: Option<ArcPrimitive>,
}

impl Hit {
    /// Creates a new hit with no primitive attached.
    ///
    /// * `t` - Parametric distance along the ray.
    /// * `n` - Unit surface normal.
    pub fn new(t: Float, n: Vector3f) -> Self {
        Self { t, n, prim: None }
    }
}

/// Interface for geometric primitives. Primitives own their material and
/// report whether they enclose a volume, which drives the refraction medium
/// bookkeeping.
pub trait Primitive {
    /// Intersects a ray with the primitive. Intersections closer to the ray
    /// origin than `RAY_EPSILON` are skipped.
    ///
    /// * `ray` - The ray.
    fn intersect(&self, ray: &Ray) -> Option<Hit>;

    /// Returns a bounding box for the primitive. Only meaningful when
    /// `has_finite_bound()` is true.
    fn bounds(&self) -> Bounds3f;

    /// Returns true if the primitive can be enclosed in a finite bounding
    /// box. Unbounded primitives bypass the spatial index.
    fn has_finite_bound(&self) -> bool {
        true
    }

    /// Returns true if the primitive encloses a volume a ray can travel
    /// through.
    fn has_interior(&self) -> bool;

    /// Returns the material.
    fn material(&self) -> ArcMaterial;
}

/// Interface for primitive aggregates that accelerate ray intersection over
/// a collection of bounded primitives.
pub trait Aggregate: Send + Sync {
    /// Returns the nearest intersection across all stored primitives, with
    /// `Hit::prim` filled in.
    ///
    /// * `ray` - The ray.
    fn intersect(&self, ray: &Ray) -> Option<Hit>;
}

/// Returns true if both hits refer to the same primitive instance. Compares
/// by pointer identity since primitives are shared through `Arc`.
///
/// * `a` - First primitive.
/// * `b` - Second primitive.
pub fn same_primitive(a: &Option<ArcPrimitive>, b: &Option<ArcPrimitive>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => Arc::ptr_eq(a, b),
        (None, None) => true,
        _ => false,
    }
}
