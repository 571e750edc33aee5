//! Jittered supersampling

use crate::RadianceSource;
use octray_core::base::Float;
use octray_core::color::Color;
use rand::Rng;

/// Averages an `n × n` grid of samples with one random offset per cell.
/// Jitter trades the regular grid's aliasing for noise.
pub struct JitterSampler {
    /// Grid resolution per axis.
    n: usize,
}

impl JitterSampler {
    /// Creates a new jittered sampler.
    ///
    /// * `n` - Grid resolution per axis; clamped to at least 1.
    pub fn new(n: usize) -> Self {
        Self { n: n.max(1) }
    }

    /// Samples the pixel centered at `(x, y)` with extents `(sx, sy)` in
    /// normalized image coordinates.
    pub fn sample_pixel(
        &self,
        src: &dyn RadianceSource,
        x: Float,
        y: Float,
        sx: Float,
        sy: Float,
    ) -> Color {
        let n = self.n;
        let mut rng = rand::thread_rng();

        let mut acc = Color::black();
        for j in 0..n {
            for i in 0..n {
                let u = (i as Float + rng.gen_range(0.0..1.0)) / n as Float - 0.5;
                let v = (j as Float + rng.gen_range(0.0..1.0)) / n as Float - 0.5;
                acc += src.sample(x + u * sx, y + v * sy).color;
            }
        }
        acc * (1.0 / (n * n) as Float)
    }
}
