//! Geometry

mod bounds3;
mod point3;
mod ray;
mod vector3;

// Re-export.
pub use bounds3::*;
pub use point3::*;
pub use ray::*;
pub use vector3::*;
