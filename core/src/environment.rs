//! Environment maps

use crate::base::{clamp, Float, PI, TWO_PI};
use crate::color::Color;
use crate::geometry::Vector3f;
use image::RgbImage;
use std::path::Path;

/// A latitude-longitude environment map sampled by ray direction on misses.
pub struct EnvironmentMap {
    image: RgbImage,
}

impl EnvironmentMap {
    /// Loads an environment map from an image file.
    ///
    /// * `path` - Path to the image.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, image::ImageError> {
        let image = image::open(path)?.to_rgb8();
        info!(
            "loaded {}x{} environment map",
            image.width(),
            image.height()
        );
        Ok(Self { image })
    }

    /// Wraps an already decoded image.
    ///
    /// * `image` - The image.
    pub fn new(image: RgbImage) -> Self {
        Self { image }
    }

    /// Samples the map in the given direction using the spherical mapping
    /// `u = (φ + π) / 2π`, `v = θ / π` with `φ = atan2(z, x)` and
    /// `θ = acos(y)`.
    ///
    /// * `d` - Direction, not necessarily normalized.
    pub fn sample(&self, d: &Vector3f) -> Color {
        let d = d.normalize();
        let phi = d.z.atan2(d.x);
        let theta = clamp(d.y, -1.0, 1.0).acos();

        let u = (phi + PI) / TWO_PI;
        let v = theta / PI;

        let (w, h) = (self.image.width(), self.image.height());
        let x = ((u * w as Float) as u32).min(w - 1);
        let y = ((v * h as Float) as u32).min(h - 1);

        let p = self.image.get_pixel(x, y);
        Color::new(
            p[0] as Float / 255.0,
            p[1] as Float / 255.0,
            p[2] as Float / 255.0,
        )
    }
}
