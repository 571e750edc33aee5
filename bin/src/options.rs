//! Command line options

use clap::{Parser, ValueEnum};
use octray_integrators::{RenderOptions, SamplingMode};
use octray_scene::AggregateKind;
use std::path::PathBuf;

/// Per-pixel sampling strategy.
#[derive(Copy, Clone, Debug, ValueEnum)]
pub enum Mode {
    /// One ray through the pixel center.
    Single,

    /// Regular grid supersampling.
    Uniform,

    /// Jittered grid supersampling.
    Jitter,

    /// Adaptive quadrant refinement.
    Adaptive,
}

impl From<Mode> for SamplingMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Single => SamplingMode::Single,
            Mode::Uniform => SamplingMode::Uniform,
            Mode::Jitter => SamplingMode::Jitter,
            Mode::Adaptive => SamplingMode::Adaptive,
        }
    }
}

/// Command line options.
#[derive(Parser)]
#[command(name = "octray", about = "Recursive ray tracer", version)]
pub struct Options {
    /// Scene description file.
    pub scene: PathBuf,

    /// Output image path; the format follows the extension.
    #[arg(short, long, default_value = "out.png")]
    pub output: PathBuf,

    /// Image width in pixels.
    #[arg(long, default_value_t = 512)]
    pub width: usize,

    /// Image height in pixels.
    #[arg(long, default_value_t = 512)]
    pub height: usize,

    /// Maximum recursion depth for reflection and refraction rays.
    #[arg(short = 'd', long, default_value_t = 5)]
    pub depth: i32,

    /// Terminate paths whose weight falls below this in every channel.
    #[arg(long, default_value_t = 0.00001)]
    pub threshold: f64,

    /// Per-pixel sampling strategy.
    #[arg(long, value_enum, default_value_t = Mode::Single)]
    pub mode: Mode,

    /// Samples per axis for the grid modes, refinement depth for adaptive.
    #[arg(long, default_value_t = 3)]
    pub sample_size: usize,

    /// Log10 scale applied to point light distance attenuation.
    #[arg(long, default_value_t = 0.0)]
    pub distance_scale: f64,

    /// Scan primitives linearly instead of building the octree.
    #[arg(long)]
    pub linear: bool,

    /// Worker threads; 0 uses every core.
    #[arg(short = 't', long, default_value_t = 0)]
    pub threads: usize,
}

impl Options {
    /// Renderer settings derived from the command line.
    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            width: self.width,
            height: self.height,
            max_depth: self.depth,
            threshold: self.threshold,
            mode: self.mode.into(),
            sample_size: self.sample_size,
            distance_scale: self.distance_scale,
        }
    }

    /// Aggregate choice derived from the command line.
    pub fn aggregate_kind(&self) -> AggregateKind {
        if self.linear {
            AggregateKind::Linear
        } else {
            AggregateKind::Octree
        }
    }
}
