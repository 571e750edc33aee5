//! Renderer

use crate::whitted::WhittedIntegrator;
use octray_core::base::Float;
use octray_core::color::Color;
use octray_core::framebuffer::Framebuffer;
use octray_core::scene::Scene;
use octray_samplers::{
    AdaptiveSampler, JitterSampler, PixelSample, RadianceSource, UniformSampler,
};
use rayon::iter::{ParallelBridge, ParallelIterator};
use std::sync::atomic::{AtomicBool, Ordering};

/// Per-pixel sampling strategy.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SamplingMode {
    /// One ray through the pixel center.
    Single,

    /// Regular grid supersampling.
    Uniform,

    /// Jittered grid supersampling.
    Jitter,

    /// Adaptive quadrant refinement.
    Adaptive,
}

/// Render settings.
#[derive(Copy, Clone, Debug)]
pub struct RenderOptions {
    /// Image width in pixels.
    pub width: usize,

    /// Image height in pixels.
    pub height: usize,

    /// Maximum recursion depth.
    pub max_depth: i32,

    /// Path weight termination threshold.
    pub threshold: Float,

    /// Sampling strategy.
    pub mode: SamplingMode,

    /// Grid resolution for uniform and jittered sampling, refinement depth
    /// for adaptive sampling.
    pub sample_size: usize,

    /// Log10 scale applied to point light distance attenuation.
    pub distance_scale: Float,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            width: 512,
            height: 512,
            max_depth: 5,
            threshold: 0.00001,
            mode: SamplingMode::Single,
            sample_size: 3,
            distance_scale: 0.0,
        }
    }
}

/// Evaluates scene radiance at normalized image coordinates by generating a
/// camera ray and tracing it.
pub struct SceneRadiance<'a> {
    scene: &'a Scene,
    integrator: &'a WhittedIntegrator,
    aspect: Float,
}

impl RadianceSource for SceneRadiance<'_> {
    fn sample(&self, x: Float, y: Float) -> PixelSample {
        let ray = self.scene.camera.generate_ray(x, y, self.aspect);
        let (color, object) = self.integrator.trace(self.scene, &ray);
        PixelSample { color, object }
    }
}

/// Renders a scene into a framebuffer, one scanline per parallel work item.
pub struct Renderer {
    options: RenderOptions,
    scene: Option<Scene>,
    framebuffer: Framebuffer,
}

impl Renderer {
    /// Creates a new renderer with a black framebuffer.
    ///
    /// * `options` - Render settings.
    pub fn new(options: RenderOptions) -> Self {
        Self {
            options,
            scene: None,
            framebuffer: Framebuffer::new(options.width, options.height),
        }
    }

    /// Installs the scene to render, applying the configured distance scale.
    ///
    /// * `scene` - The scene.
    pub fn setup(&mut self, mut scene: Scene) {
        scene.distance_scale = self.options.distance_scale;
        self.scene = Some(scene);
    }

    /// Image width over height.
    pub fn aspect_ratio(&self) -> Float {
        self.options.width as Float / self.options.height as Float
    }

    /// The framebuffer with whatever has been rendered so far.
    pub fn framebuffer(&self) -> &Framebuffer {
        &self.framebuffer
    }

    /// Renders the whole image.
    pub fn render(&mut self) {
        let cancel = AtomicBool::new(false);
        self.render_with(&cancel, |_| {});
    }

    /// Renders a single pixel into the framebuffer. No-op without a scene.
    ///
    /// * `x` - Pixel column.
    /// * `y` - Pixel row, 0 at the bottom.
    pub fn render_pixel(&mut self, x: usize, y: usize) {
        let scene = match self.scene.as_ref() {
            Some(scene) => scene,
            None => {
                warn!("render called with no scene loaded");
                return;
            }
        };

        let options = self.options;
        let integrator = WhittedIntegrator::new(options.max_depth, options.threshold);
        let source = SceneRadiance {
            scene,
            integrator: &integrator,
            aspect: options.width as Float / options.height as Float,
        };

        let sx = 1.0 / options.width as Float;
        let sy = 1.0 / options.height as Float;
        let color = sample_pixel(&source, &options, (x as Float + 0.5) * sx, (y as Float + 0.5) * sy, sx, sy);
        self.framebuffer.set_pixel(x, y, color);
    }

    /// Renders the scanlines in `[start, stop)` sequentially, clamping the
    /// range to the image height. No-op without a scene.
    ///
    /// * `start` - First scanline.
    /// * `stop`  - One past the last scanline.
    pub fn render_scanline_range(&mut self, start: usize, stop: usize) {
        let scene = match self.scene.as_ref() {
            Some(scene) => scene,
            None => {
                warn!("render called with no scene loaded");
                return;
            }
        };

        let options = self.options;
        let integrator = WhittedIntegrator::new(options.max_depth, options.threshold);
        let source = SceneRadiance {
            scene,
            integrator: &integrator,
            aspect: options.width as Float / options.height as Float,
        };

        let sx = 1.0 / options.width as Float;
        let sy = 1.0 / options.height as Float;
        let stop = stop.min(options.height);

        for (y, row) in self.framebuffer.rows_mut().enumerate() {
            if y >= start && y < stop {
                render_scanline(&source, &options, y, row, sx, sy);
            }
        }
    }

    /// Renders the whole image, checking `cancel` before each scanline and
    /// reporting each finished scanline through `row_done`. Scanlines not
    /// started before cancellation stay black.
    ///
    /// * `cancel`   - Cooperative cancellation flag.
    /// * `row_done` - Called with the scanline index after it completes.
    pub fn render_with<F>(&mut self, cancel: &AtomicBool, row_done: F)
    where
        F: Fn(usize) + Sync,
    {
        let scene = match self.scene.as_ref() {
            Some(scene) => scene,
            None => {
                warn!("render called with no scene loaded");
                return;
            }
        };

        let options = self.options;
        let aspect = options.width as Float / options.height as Float;
        let integrator = WhittedIntegrator::new(options.max_depth, options.threshold);
        let source = SceneRadiance {
            scene,
            integrator: &integrator,
            aspect,
        };

        info!(
            "rendering {}x{} with {:?} sampling, depth {}",
            options.width, options.height, options.mode, options.max_depth
        );

        let sx = 1.0 / options.width as Float;
        let sy = 1.0 / options.height as Float;

        self.framebuffer
            .rows_mut()
            .enumerate()
            .par_bridge()
            .for_each(|(y, row)| {
                if cancel.load(Ordering::Relaxed) {
                    return;
                }
                render_scanline(&source, &options, y, row, sx, sy);
                row_done(y);
            });
    }
}

/// Renders one scanline of pixels.
fn render_scanline(
    source: &SceneRadiance<'_>,
    options: &RenderOptions,
    y: usize,
    row: &mut [Color],
    sx: Float,
    sy: Float,
) {
    let fy = (y as Float + 0.5) * sy;

    for (x, pixel) in row.iter_mut().enumerate() {
        let fx = (x as Float + 0.5) * sx;
        *pixel = sample_pixel(source, options, fx, fy, sx, sy);
    }
}

/// Samples one pixel with the configured strategy, clamping the result.
fn sample_pixel(
    source: &SceneRadiance<'_>,
    options: &RenderOptions,
    fx: Float,
    fy: Float,
    sx: Float,
    sy: Float,
) -> Color {
    match options.mode {
        SamplingMode::Single => source.sample(fx, fy).color.clamp(),
        SamplingMode::Uniform => UniformSampler::new(options.sample_size)
            .sample_pixel(source, fx, fy, sx, sy)
            .clamp(),
        SamplingMode::Jitter => JitterSampler::new(options.sample_size)
            .sample_pixel(source, fx, fy, sx, sy)
            .clamp(),
        SamplingMode::Adaptive => AdaptiveSampler::new(options.sample_size)
            .sample_pixel(source, fx, fy, sx, sy)
            .clamp(),
    }
}
