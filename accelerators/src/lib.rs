//! Accelerators

#[macro_use]
extern crate log;

mod linear;
mod octree;

// Re-export.
pub use linear::*;
pub use octree::*;
