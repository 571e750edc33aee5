//! Scenes

use crate::base::Float;
use crate::camera::ArcCamera;
use crate::color::Color;
use crate::environment::EnvironmentMap;
use crate::geometry::{Ray, Vector3f};
use crate::light::ArcLight;
use crate::primitive::{Aggregate, ArcPrimitive, Hit};

/// A complete scene: camera, primitives, lights and background.
///
/// Bounded primitives live inside the aggregate; primitives without a finite
/// bounding box (planes) are tested linearly alongside it.
pub struct Scene {
    /// The camera.
    pub camera: ArcCamera,

    /// Spatial index over all bounded primitives.
    pub aggregate: Box<dyn Aggregate>,

    /// Primitives with no finite bounding box.
    pub unbounded: Vec<ArcPrimitive>,

    /// Direct light sources.
    pub lights: Vec<ArcLight>,

    /// Accumulated ambient illumination.
    pub ambient: Color,

    /// Flat background color returned on ray misses.
    pub background: Color,

    /// Environment map; when present it replaces the flat background for
    /// primary and secondary ray misses.
    pub environment: Option<EnvironmentMap>,

    /// Log10 scale applied to point light distance attenuation.
    pub distance_scale: Float,
}

impl Scene {
    /// Returns the nearest intersection across the aggregate and the
    /// unbounded primitives.
    ///
    /// * `ray` - The ray.
    pub fn intersect(&self, ray: &Ray) -> Option<Hit> {
        let mut best = self.aggregate.intersect(ray);

        for prim in self.unbounded.iter() {
            if let Some(mut hit) = prim.intersect(ray) {
                if best.as_ref().map_or(true, |b| hit.t < b.t) {
                    hit.prim = Some(prim.clone());
                    best = Some(hit);
                }
            }
        }

        best
    }

    /// Returns the background radiance for a ray that escaped the scene.
    ///
    /// * `d` - Ray direction.
    pub fn background_radiance(&self, d: &Vector3f) -> Color {
        match &self.environment {
            Some(env) => env.sample(d),
            None => self.background,
        }
    }
}
