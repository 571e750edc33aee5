//! Shapes

mod cuboid;
mod plane;
mod sphere;

// Re-export.
pub use cuboid::*;
pub use plane::*;
pub use sphere::*;
