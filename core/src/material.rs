//! Materials

use crate::base::{max, Float};
use crate::color::Color;
use crate::geometry::Ray;
use crate::primitive::Hit;
use crate::scene::Scene;
use std::sync::Arc;

/// Atomic reference counted `Material`.
pub type ArcMaterial = Arc<Material>;

/// A Phong material. Reflective and transmissive coefficients are colors so
/// that mirrors and glass can tint what they bounce or transmit.
#[derive(Clone, Debug)]
pub struct Material {
    /// Emissive color.
    pub ke: Color,

    /// Ambient reflectance.
    pub ka: Color,

    /// Diffuse reflectance.
    pub kd: Color,

    /// Specular reflectance.
    pub ks: Color,

    /// Mirror reflectance.
    pub kr: Color,

    /// Transmittance.
    pub kt: Color,

    /// Index of refraction of the enclosed volume.
    pub index: Float,

    /// Phong specular exponent.
    pub shininess: Float,
}

impl Default for Material {
    /// Matte mid-grey with unit refraction index.
    fn default() -> Self {
        Self {
            ke: Color::black(),
            ka: Color::black(),
            kd: Color::splat(0.5),
            ks: Color::black(),
            kr: Color::black(),
            kt: Color::black(),
            index: 1.0,
            shininess: 0.0,
        }
    }
}

impl Material {
    /// Returns true if any transmittance channel is non-zero.
    pub fn is_transmissive(&self) -> bool {
        !self.kt.is_black()
    }

    /// Returns true if any mirror reflectance channel is non-zero.
    pub fn is_reflective(&self) -> bool {
        !self.kr.is_black()
    }

    /// Computes the direct Phong illumination at a hit point.
    ///
    /// Diffuse and ambient terms are scaled by `1 - kt` per channel so that
    /// transparent surfaces contribute less local shading; each term is
    /// clamped on its own before accumulation.
    ///
    /// * `scene` - The scene providing lights and ambient illumination.
    /// * `ray`   - The incident ray.
    /// * `hit`   - The intersection being shaded.
    pub fn shade(&self, scene: &Scene, ray: &Ray, hit: &Hit) -> Color {
        let p = ray.at(hit.t);
        let trans_loss = Color::white() - self.kt;
        let v = -ray.d.normalize();

        let mut intensity = self.ke + (self.ka * scene.ambient * trans_loss).clamp();

        for light in scene.lights.iter() {
            let dir = light.direction_from(&p);
            let atten =
                light.shadow_attenuation(scene, &p) * light.distance_attenuation(scene, &p);

            let nl = max(hit.n.dot(&dir), 0.0);
            intensity += (atten * nl * self.kd * trans_loss).clamp();

            if !self.ks.is_black() {
                let refl = hit.n * (2.0 * hit.n.dot(&dir)) - dir;
                let rv = max(refl.dot(&v), 0.0);
                intensity += (atten * rv.powf(self.shininess) * self.ks).clamp();
            }
        }

        intensity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_opaque() {
        let m = Material::default();
        assert!(!m.is_transmissive());
        assert!(!m.is_reflective());
        assert_eq!(m.index, 1.0);
    }
}
