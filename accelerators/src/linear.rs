//! Linear aggregate

use octray_core::geometry::Ray;
use octray_core::primitive::{Aggregate, ArcPrimitive, Hit};

/// An aggregate that tests every primitive in turn. Useful for tiny scenes
/// and as a reference to validate spatial indexes against.
pub struct LinearList {
    prims: Vec<ArcPrimitive>,
}

impl LinearList {
    /// Creates a new linear aggregate.
    ///
    /// * `prims` - The primitives.
    pub fn new(prims: Vec<ArcPrimitive>) -> Self {
        Self { prims }
    }
}

impl Aggregate for LinearList {
    fn intersect(&self, ray: &Ray) -> Option<Hit> {
        let mut best: Option<Hit> = None;

        for prim in self.prims.iter() {
            if let Some(mut hit) = prim.intersect(ray) {
                if best.as_ref().map_or(true, |b| hit.t < b.t) {
                    hit.prim = Some(prim.clone());
                    best = Some(hit);
                }
            }
        }

        best
    }
}
