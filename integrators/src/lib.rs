//! Integrators

#[macro_use]
extern crate log;

mod medium;
mod renderer;
mod whitted;

// Re-export.
pub use medium::*;
pub use renderer::*;
pub use whitted::*;
