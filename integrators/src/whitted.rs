//! Whitted integrator

use crate::medium::MediumStack;
use octray_core::base::{Float, RAY_EPSILON};
use octray_core::color::Color;
use octray_core::geometry::{Ray, Vector3f};
use octray_core::primitive::{ArcPrimitive, Hit};
use octray_core::scene::Scene;

/// Recursive Whitted-style ray tracer: direct Phong illumination at every
/// hit plus mirror reflection and refraction rays, spawned while the
/// recursion depth lasts and the accumulated path weight stays above the
/// termination threshold.
pub struct WhittedIntegrator {
    /// Maximum recursion depth; 0 disables secondary rays.
    max_depth: i32,

    /// Paths whose weight drops below this in every channel are cut off.
    threshold: Float,
}

impl WhittedIntegrator {
    /// Creates a new integrator.
    ///
    /// * `max_depth` - Maximum recursion depth.
    /// * `threshold` - Path weight termination threshold.
    pub fn new(max_depth: i32, threshold: Float) -> Self {
        Self {
            max_depth,
            threshold,
        }
    }

    /// Traces a primary ray. Returns the unclamped radiance and the
    /// primitive the ray struck, if any. A negative depth exhausts the
    /// recursion before the primary hit and yields the flat background.
    ///
    /// * `scene` - The scene.
    /// * `ray`   - Primary ray.
    pub fn trace(&self, scene: &Scene, ray: &Ray) -> (Color, Option<ArcPrimitive>) {
        if self.max_depth < 0 {
            return (scene.background, None);
        }

        let mut media = MediumStack::new();
        match scene.intersect(ray) {
            Some(hit) => {
                let prim = hit.prim.clone();
                let color = self.li(scene, ray, &hit, self.max_depth, Color::white(), &mut media);
                debug_assert!(media.is_empty());
                (color, prim)
            }
            None => (scene.background_radiance(&ray.d), None),
        }
    }

    /// Spawns a secondary ray. Exhausted depth or a negligible path weight
    /// terminates with the flat background; a genuine miss consults the
    /// environment map.
    fn shoot(
        &self,
        scene: &Scene,
        ray: &Ray,
        depth: i32,
        weight: Color,
        media: &mut MediumStack,
    ) -> Color {
        if depth < 0 || weight.max_component() < self.threshold {
            return scene.background;
        }
        match scene.intersect(ray) {
            Some(hit) => self.li(scene, ray, &hit, depth, weight, media),
            None => scene.background_radiance(&ray.d),
        }
    }

    /// Radiance leaving a hit point back along the ray. Child contributions
    /// are clamped before being weighted by `kr`/`kt`; the sum itself stays
    /// unclamped so the caller can still blend.
    fn li(
        &self,
        scene: &Scene,
        ray: &Ray,
        hit: &Hit,
        depth: i32,
        weight: Color,
        media: &mut MediumStack,
    ) -> Color {
        let prim = match &hit.prim {
            Some(prim) => prim.clone(),
            None => return Color::black(),
        };
        let material = prim.material();

        let mut color = material.shade(scene, ray, hit);

        let d = ray.d.normalize();
        let n = hit.n;
        let p = ray.at(hit.t);

        if material.is_reflective() {
            let rd = reflect_direction(&d, &n);
            let rray = Ray::new(p + rd * RAY_EPSILON, rd);
            let child = self
                .shoot(scene, &rray, depth - 1, weight * material.kr, media)
                .clamp();
            color += material.kr * child;
        }

        if material.is_transmissive() {
            let nd = n.dot(&d);

            if nd <= -RAY_EPSILON && prim.has_interior() {
                // Entering the volume.
                let transition = media.enter(prim.clone());
                if let Some(td) = refract_direction(&d, &n, transition.ratio()) {
                    let tray = Ray::new(p + td * RAY_EPSILON, td);
                    let child = self
                        .shoot(scene, &tray, depth - 1, weight * material.kt, media)
                        .clamp();
                    color += material.kt * child;
                }
                transition.undo(media);
            } else if nd >= RAY_EPSILON && prim.has_interior() {
                // Leaving the volume; the refraction normal faces the ray.
                let transition = media.exit(&prim);
                if let Some(td) = refract_direction(&d, &-n, transition.ratio()) {
                    let tray = Ray::new(p + td * RAY_EPSILON, td);
                    let child = self
                        .shoot(scene, &tray, depth - 1, weight * material.kt, media)
                        .clamp();
                    color += material.kt * child;
                }
                // Total internal reflection spawns no transmitted ray.
                transition.undo(media);
            } else {
                // Grazing incidence or a thin surface without an interior:
                // the ray passes straight through.
                let tray = Ray::new(p + d * RAY_EPSILON, d);
                let child = self
                    .shoot(scene, &tray, depth - 1, weight * material.kt, media)
                    .clamp();
                color += material.kt * child;
            }
        }

        color
    }
}

/// Mirror reflection of `d` about the normal `n`.
///
/// * `d` - Unit incident direction.
/// * `n` - Unit surface normal.
pub fn reflect_direction(d: &Vector3f, n: &Vector3f) -> Vector3f {
    *d - *n * (2.0 * n.dot(d))
}

/// Refraction of `d` across a boundary with normal `n` opposing the ray,
/// for the given ratio of refraction indices (leaving over entered).
/// Returns `None` on total internal reflection. A slightly negative
/// discriminant within `RAY_EPSILON` of zero still refracts, tangent to the
/// surface.
///
/// * `d`     - Unit incident direction.
/// * `n`     - Unit normal with `n · d < 0`.
/// * `ratio` - Refraction index ratio.
pub fn refract_direction(d: &Vector3f, n: &Vector3f, ratio: Float) -> Option<Vector3f> {
    let c = -n.dot(d);
    let disc = 1.0 - ratio * ratio * (1.0 - c * c);
    if disc < -RAY_EPSILON {
        return None;
    }
    Some(*n * (ratio * c - disc.max(0.0).sqrt()) + *d * ratio)
}
