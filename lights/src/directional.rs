//! Directional lights

use octray_core::base::{Float, INFINITY};
use octray_core::color::Color;
use octray_core::geometry::{Point3f, Vector3f};
use octray_core::light::{transmittance, Light};
use octray_core::scene::Scene;

/// A light at infinity shining in a fixed direction, like the sun.
pub struct DirectionalLight {
    /// Direction the light travels in.
    direction: Vector3f,

    /// Color.
    color: Color,
}

impl DirectionalLight {
    /// Creates a new directional light.
    ///
    /// * `direction` - Direction the light travels in; normalized here.
    /// * `color`     - Color.
    pub fn new(direction: Vector3f, color: Color) -> Self {
        Self {
            direction: direction.normalize(),
            color,
        }
    }
}

impl Light for DirectionalLight {
    fn color(&self) -> Color {
        self.color
    }

    fn direction_from(&self, _p: &Point3f) -> Vector3f {
        -self.direction
    }

    /// Lights at infinity do not attenuate with distance.
    fn distance_attenuation(&self, _scene: &Scene, _p: &Point3f) -> Float {
        1.0
    }

    fn shadow_attenuation(&self, scene: &Scene, p: &Point3f) -> Color {
        self.color * transmittance(scene, p, &-self.direction, INFINITY)
    }
}
