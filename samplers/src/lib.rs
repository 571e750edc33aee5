//! Samplers

use octray_core::base::Float;
use octray_core::color::Color;
use octray_core::primitive::ArcPrimitive;

mod adaptive;
mod jitter;
mod uniform;

// Re-export.
pub use adaptive::*;
pub use jitter::*;
pub use uniform::*;

/// Color difference below which two samples count as equal during adaptive
/// refinement.
pub const SAMPLE_DELTA: Float = 0.01;

/// The result of evaluating radiance at one image plane position: the color
/// plus the primitive the primary ray struck, if any. The object identity
/// lets the adaptive sampler refine across silhouette edges even when two
/// surfaces shade to similar colors.
#[derive(Clone)]
pub struct PixelSample {
    /// Radiance.
    pub color: Color,

    /// Primitive hit by the primary ray.
    pub object: Option<ArcPrimitive>,
}

/// A source of radiance over normalized image coordinates in `[0, 1]²`.
pub trait RadianceSource {
    /// Evaluates the radiance at `(x, y)`.
    ///
    /// * `x` - Horizontal coordinate.
    /// * `y` - Vertical coordinate.
    fn sample(&self, x: Float, y: Float) -> PixelSample;
}
