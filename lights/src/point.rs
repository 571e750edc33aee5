//! Point lights

use octray_core::base::{min, Float};
use octray_core::color::Color;
use octray_core::geometry::{Point3f, Vector3f};
use octray_core::light::{transmittance, Light};
use octray_core::scene::Scene;

/// An omnidirectional point light with quadratic distance attenuation.
pub struct PointLight {
    /// Position.
    position: Point3f,

    /// Color.
    color: Color,

    /// Constant attenuation coefficient.
    constant_atten: Float,

    /// Linear attenuation coefficient.
    linear_atten: Float,

    /// Quadratic attenuation coefficient.
    quadratic_atten: Float,
}

impl PointLight {
    /// Creates a new point light.
    ///
    /// * `position`  - Position.
    /// * `color`     - Color.
    /// * `constant`  - Constant attenuation coefficient.
    /// * `linear`    - Linear attenuation coefficient.
    /// * `quadratic` - Quadratic attenuation coefficient.
    pub fn new(
        position: Point3f,
        color: Color,
        constant: Float,
        linear: Float,
        quadratic: Float,
    ) -> Self {
        Self {
            position,
            color,
            constant_atten: constant,
            linear_atten: linear,
            quadratic_atten: quadratic,
        }
    }
}

impl Light for PointLight {
    fn color(&self) -> Color {
        self.color
    }

    fn direction_from(&self, p: &Point3f) -> Vector3f {
        (self.position - *p).normalize()
    }

    /// Attenuation `min(1, 10^s / (a + b·d + c·d²))` where `s` is the
    /// scene's distance scale, capped so a light never brightens a surface
    /// beyond its color.
    fn distance_attenuation(&self, scene: &Scene, p: &Point3f) -> Float {
        let d = self.position.distance(p);
        let scale = (10.0 as Float).powf(scene.distance_scale);
        min(
            1.0,
            scale / (self.constant_atten + self.linear_atten * d + self.quadratic_atten * d * d),
        )
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
    use octray_core::material::Material;
    use octray_core::primitive::ArcPrimitive;
    use octray_core::scene::Scene as CoreScene;
    use octray_shapes::Sphere;
    use std::sync::Arc;

    fn scene_with(prims: Vec<ArcPrimitive>) -> CoreScene {
        CoreScene {
            camera: Arc::new(PinholeCamera::new(
                Point3f::new(0.0, 0.0, 5.0),
                Point3f::zero(),
                Vector3f::new(0.0, 1.0, 0.0),
                45.0,
            )),
            aggregate: Box::new(LinearList::new(prims)),
            unbounded: vec![],
            lights: vec![],
            ambient: Color::black(),
            background: Color::black(),
            environment: None,
            distance_scale: 0.0,
        }
    }

    fn occluder(kt: Color) -> ArcPrimitive {
        let material = Material {
            kt,
            ..Material::default()
        };
        Arc::new(Sphere::new(
            Point3f::new(0.0, 2.0, 0.0),
            1.0,
            Arc::new(material),
        ))
    }

    #[test]
    fn quadratic_falloff_capped_at_one() {
        let scene = scene_with(vec![]);
        let light = PointLight::new(Point3f::new(0.0, 2.0, 0.0), Color::white(), 0.0, 0.0, 1.0);

        // d = 2 -> 1/4.
        let far = light.distance_attenuation(&scene, &Point3f::zero());
        assert!(approx_eq!(Float, far, 0.25, epsilon = 1e-9));

        // d = 0.5 -> 1/0.25 = 4, capped.
        let near = light.distance_attenuation(&scene, &Point3f::new(0.0, 1.5, 0.0));
        assert_eq!(near, 1.0);
    }

    #[test]
    fn distance_scale_brightens() {
        let mut scene = scene_with(vec![]);
        scene.distance_scale = 1.0;
        let light = PointLight::new(Point3f::new(0.0, 10.0, 0.0), Color::white(), 0.0, 0.0, 1.0);

        // d = 10 -> 10^1 / 100 = 0.1.
        let atten = light.distance_attenuation(&scene, &Point3f::zero());
        assert!(approx_eq!(Float, atten, 0.1, epsilon = 1e-9));
    }

    #[test]
    fn opaque_occluder_blocks() {
        let scene = scene_with(vec![occluder(Color::black())]);
        let light = PointLight::new(Point3f::new(0.0, 5.0, 0.0), Color::white(), 1.0, 0.0, 0.0);
        let atten = light.shadow_attenuation(&scene, &Point3f::zero());
        assert!(atten.is_black());
    }

    #[test]
    fn transmissive_occluder_tints() {
        // Two surface crossings multiply kt twice: 0.5^2 in red only.
        let scene = scene_with(vec![occluder(Color::new(0.5, 0.0, 0.0))]);
        let light = PointLight::new(Point3f::new(0.0, 5.0, 0.0), Color::white(), 1.0, 0.0, 0.0);
        let atten = light.shadow_attenuation(&scene, &Point3f::zero());
        assert!(approx_eq!(Float, atten.r, 0.25, epsilon = 1e-9));
        assert_eq!(atten.g, 0.0);
        assert_eq!(atten.b, 0.0);
    }

    #[test]
    fn occluder_beyond_light_ignored() {
        let scene = scene_with(vec![occluder(Color::black())]);
        // Light sits between the surface and the occluder.
        let light = PointLight::new(Point3f::new(0.0, 0.5, 0.0), Color::white(), 1.0, 0.0, 0.0);
        let atten = light.shadow_attenuation(&scene, &Point3f::zero());
        assert_eq!(atten, Color::white());
    }
}
