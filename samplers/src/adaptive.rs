//! Adaptive supersampling

use crate::{PixelSample, RadianceSource, SAMPLE_DELTA};
use octray_core::base::Float;
use octray_core::color::Color;
use octray_core::primitive::same_primitive;

/// An adaptive sampler that refines by corner agreement. The pixel's four
/// corners are sampled first; when they all struck the same primitive and
/// their colors agree within `SAMPLE_DELTA`, their average is the pixel.
/// Otherwise the center and the four edge midpoints are sampled and each
/// sub-quadrant is refined recursively, reusing the samples on its corners.
/// Uniform pixel interiors cost four rays; only silhouette and
/// high-contrast edges pay for more.
pub struct AdaptiveSampler {
    /// Maximum refinement depth.
    max_depth: usize,
}

impl AdaptiveSampler {
    /// Creates a new adaptive sampler.
    ///
    /// * `max_depth` - Maximum refinement depth.
    pub fn new(max_depth: usize) -> Self {
        Self { max_depth }
    }

    /// Samples the pixel centered at `(x, y)` with extents `(sx, sy)` in
    /// normalized image coordinates.
    ///
    /// * `src` - Radiance source.
    /// * `x`   - Pixel center, horizontal.
    /// * `y`   - Pixel center, vertical.
    /// * `sx`  - Pixel width.
    /// * `sy`  - Pixel height.
    pub fn sample_pixel(
        &self,
        src: &dyn RadianceSource,
        x: Float,
        y: Float,
        sx: Float,
        sy: Float,
    ) -> Color {
        let hx = sx * 0.5;
        let hy = sy * 0.5;
        // Corner order: bottom-left, bottom-right, top-left, top-right.
        let corners = [
            src.sample(x - hx, y - hy),
            src.sample(x + hx, y - hy),
            src.sample(x - hx, y + hy),
            src.sample(x + hx, y + hy),
        ];
        refine(src, corners, x, y, sx, sy, self.max_depth)
    }
}

fn refine(
    src: &dyn RadianceSource,
    corners: [PixelSample; 4],
    x: Float,
    y: Float,
    sx: Float,
    sy: Float,
    depth: usize,
) -> Color {
    if depth == 0 || agree(&corners) {
        return average(&corners);
    }

    let hx = sx * 0.5;
    let hy = sy * 0.5;
    let qx = sx * 0.25;
    let qy = sy * 0.25;

    let center = src.sample(x, y);
    let left = src.sample(x - hx, y);
    let right = src.sample(x + hx, y);
    let bottom = src.sample(x, y - hy);
    let top = src.sample(x, y + hy);

    let [bl, br, tl, tr] = corners;

    // Each sub-quadrant reuses one pixel corner, two edge midpoints and the
    // center as its own corners.
    let q0 = refine(
        src,
        [bl, bottom.clone(), left.clone(), center.clone()],
        x - qx,
        y - qy,
        hx,
        hy,
        depth - 1,
    );
    let q1 = refine(
        src,
        [bottom, br, center.clone(), right.clone()],
        x + qx,
        y - qy,
        hx,
        hy,
        depth - 1,
    );
    let q2 = refine(
        src,
        [left, center.clone(), tl, top.clone()],
        x - qx,
        y + qy,
        hx,
        hy,
        depth - 1,
    );
    let q3 = refine(src, [center, right, top, tr], x + qx, y + qy, hx, hy, depth - 1);

    (q0 + q1 + q2 + q3) * 0.25
}

/// True when all four samples struck the same primitive and no pair of
/// colors differs by more than `SAMPLE_DELTA` in any channel.
fn agree(samples: &[PixelSample; 4]) -> bool {
    for s in &samples[1..] {
        if !same_primitive(&s.object, &samples[0].object) {
            return false;
        }
    }

    let mut lo = samples[0].color;
    let mut hi = samples[0].color;
    for s in &samples[1..] {
        lo = Color::new(lo.r.min(s.color.r), lo.g.min(s.color.g), lo.b.min(s.color.b));
        hi = Color::new(hi.r.max(s.color.r), hi.g.max(s.color.g), hi.b.max(s.color.b));
    }
    let d = hi - lo;
    d.r <= SAMPLE_DELTA && d.g <= SAMPLE_DELTA && d.b <= SAMPLE_DELTA
}

fn average(samples: &[PixelSample; 4]) -> Color {
    (samples[0].color + samples[1].color + samples[2].color + samples[3].color) * 0.25
}
