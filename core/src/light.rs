//! Light sources

use crate::base::{Float, RAY_EPSILON};
use crate::color::Color;
use crate::geometry::{Point3f, Ray, Vector3f};
use crate::scene::Scene;
use std::sync::Arc;

/// Atomic reference counted `Light`.
pub type ArcLight = Arc<dyn Light + Send + Sync>;

/// Interface for light sources that illuminate surfaces directly. Ambient
/// illumination is accumulated separately on the scene.
pub trait Light {
    /// Returns the light's color.
    fn color(&self) -> Color;

    /// Returns the unit direction from a surface point toward the light.
    ///
    /// * `p` - The surface point.
    fn direction_from(&self, p: &Point3f) -> Vector3f;

    /// Returns the scalar attenuation due to distance, in `[0, 1]`.
    ///
    /// * `scene` - The scene (provides the distance scale).
    /// * `p`     - The surface point.
    fn distance_attenuation(&self, scene: &Scene, p: &Point3f) -> Float;

    /// Returns the light color as seen from a surface point, attenuated by
    /// any transmissive occluders between the point and the light.
    ///
    /// * `scene` - The scene.
    /// * `p`     - The surface point.
    fn shadow_attenuation(&self, scene: &Scene, p: &Point3f) -> Color;
}

/// Marches a shadow ray from `p` in direction `dir`, multiplying in the
/// clamped transmittance of every occluder within `dis` of the start point.
/// Opaque occluders zero the result; transparent ones tint it. Pass
/// `INFINITY` for lights at infinity.
///
/// * `scene` - The scene.
/// * `p`     - Start point.
/// * `dir`   - Unit direction toward the light.
/// * `dis`   - Distance to the light along `dir`.
pub fn transmittance(scene: &Scene, p: &Point3f, dir: &Vector3f, mut dis: Float) -> Color {
    let mut atten = Color::white();
    let mut ray = Ray::new(*p + *dir * RAY_EPSILON, *dir);

    while let Some(hit) = scene.intersect(&ray) {
        if hit.t > dis {
            break;
        }
        if let Some(prim) = &hit.prim {
            atten = atten * prim.material().kt.clamp();
            if atten.is_black() {
                return atten;
            }
        }
        dis -= hit.t;
        ray.o = ray.at(hit.t) + *dir * RAY_EPSILON;
    }

    atten
}
