//! Spot lights

use octray_core::base::{min, Float};
use octray_core::color::Color;
use octray_core::geometry::{Point3f, Vector3f};
use octray_core::light::{transmittance, Light};
use octray_core::scene::Scene;

/// A cone-limited point light. Outside the cutoff angle the light
/// contributes nothing; inside, its intensity falls off with the cosine of
/// the angle to the axis raised to the spot exponent.
pub struct SpotLight {
    /// Position.
    position: Point3f,

    /// Unit cone axis, pointing away from the light.
    axis: Vector3f,

    /// Color.
    color: Color,

    /// Cosine of the cutoff half-angle.
    cos_cutoff: Float,

    /// Angular falloff exponent.
    exponent: Float,

    /// Constant attenuation coefficient.
    constant_atten: Float,

    /// Linear attenuation coefficient.
    linear_atten: Float,

    /// Quadratic attenuation coefficient.
    quadratic_atten: Float,
}

impl SpotLight {
    /// Creates a new spot light.
    ///
    /// * `position`  - Position.
    /// * `axis`      - Cone axis pointing away from the light; normalized here.
    /// * `color`     - Color.
    /// * `cutoff`    - Cutoff half-angle in degrees.
    /// * `exponent`  - Angular falloff exponent.
    /// * `constant`  - Constant attenuation coefficient.
    /// * `linear`    - Linear attenuation coefficient.
    /// * `quadratic` - Quadratic attenuation coefficient.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        position: Point3f,
        axis: Vector3f,
        color: Color,
        cutoff: Float,
        exponent: Float,
        constant: Float,
        linear: Float,
        quadratic: Float,
    ) -> Self {
        Self {
            position,
            axis: axis.normalize(),
            color,
            cos_cutoff: cutoff.to_radians().cos(),
            exponent,
            constant_atten: constant,
            linear_atten: linear,
            quadratic_atten: quadratic,
        }
    }

    /// Cosine of the angle between the cone axis and the direction to `p`.
    fn cos_angle(&self, p: &Point3f) -> Float {
        self.axis.dot(&(*p - self.position).normalize())
    }
}

impl Light for SpotLight {
    fn color(&self) -> Color {
        self.color
    }

    fn direction_from(&self, p: &Point3f) -> Vector3f {
        (self.position - *p).normalize()
    }

    /// Distance attenuation as for a point light, scaled by the angular
    /// falloff; zero outside the cone. Cones wider than 90 degrees admit
    /// points with a negative cosine, which a fractional exponent would turn
    /// into NaN, so the cosine is clamped before exponentiation.
    fn distance_attenuation(&self, scene: &Scene, p: &Point3f) -> Float {
        let cos_angle = self.cos_angle(p);
        if cos_angle < self.cos_cutoff {
            return 0.0;
        }

        let d = self.position.distance(p);
        let scale = (10.0 as Float).powf(scene.distance_scale);
        let dist = min(
            1.0,
            scale / (self.constant_atten + self.linear_atten * d + self.quadratic_atten * d * d),
        );
        dist * cos_angle.max(0.0).powf(self.exponent)
    }

    fn shadow_attenuation(&self, scene: &Scene, p: &Point3f) -> Color {
        let dis = self.position.distance(p);
        self.color * transmittance(scene, p, &self.direction_from(p), dis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::approx_eq;
    use octray_accelerators::LinearList;
    use octray_core::camera::PinholeCamera;
    use octray_core::scene::Scene as CoreScene;
    use std::sync::Arc;

    fn empty_scene() -> CoreScene {
        CoreScene {
            camera: Arc::new(PinholeCamera::new(
                Point3f::new(0.0, 0.0, 5.0),
                Point3f::zero(),
                Vector3f::new(0.0, 1.0, 0.0),
                45.0,
            )),
            aggregate: Box::new(LinearList::new(vec![])),
            unbounded: vec![],
            lights: vec![],
            ambient: Color::black(),
            background: Color::black(),
            environment: None,
            distance_scale: 0.0,
        }
    }

    #[test]
    fn hard_cutoff() {
        let scene = empty_scene();
        let light = SpotLight::new(
            Point3f::new(0.0, 5.0, 0.0),
            Vector3f::new(0.0, -1.0, 0.0),
            Color::white(),
            20.0,
            1.0,
            1.0,
            0.0,
            0.0,
        );

        // Directly below the light, on axis.
        let on_axis = light.distance_attenuation(&scene, &Point3f::zero());
        assert!(approx_eq!(Float, on_axis, 1.0, epsilon = 1e-9));

        // Well outside the 20 degree cone.
        let outside = light.distance_attenuation(&scene, &Point3f::new(10.0, 0.0, 0.0));
        assert_eq!(outside, 0.0);
    }

    #[test]
    fn angular_falloff() {
        let scene = empty_scene();
        let light = SpotLight::new(
            Point3f::new(0.0, 1.0, 0.0),
            Vector3f::new(0.0, -1.0, 0.0),
            Color::white(),
            60.0,
            2.0,
            1.0,
            0.0,
            0.0,
        );

        // 45 degrees off axis: cos(45)^2 = 0.5.
        let off = light.distance_attenuation(&scene, &Point3f::new(1.0, 0.0, 0.0));
        assert!(approx_eq!(Float, off, 0.5, epsilon = 1e-9));
    }

    #[test]
    fn wide_cone_with_fractional_exponent_stays_finite() {
        let scene = empty_scene();
        let light = SpotLight::new(
            Point3f::zero(),
            Vector3f::new(0.0, -1.0, 0.0),
            Color::white(),
            120.0,
            0.5,
            1.0,
            0.0,
            0.0,
        );

        // 100 degrees off axis is inside the cone but past the plane of the
        // light, where the cosine goes negative.
        let deg100 = (100.0 as Float).to_radians();
        let behind = Point3f::new(deg100.sin(), -deg100.cos(), 0.0);
        let atten = light.distance_attenuation(&scene, &behind);
        assert!(atten.is_finite());
        assert_eq!(atten, 0.0);

        // 60 degrees off axis still attenuates normally: sqrt(cos(60)).
        let deg60 = (60.0 as Float).to_radians();
        let inside = Point3f::new(deg60.sin(), -deg60.cos(), 0.0);
        let atten = light.distance_attenuation(&scene, &inside);
        assert!(approx_eq!(Float, atten, (0.5 as Float).sqrt(), epsilon = 1e-9));
    }
}
