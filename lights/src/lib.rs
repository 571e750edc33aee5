//! Lights

mod directional;
mod point;
mod spot;

// Re-export.
pub use directional::*;
pub use point::*;
pub use spot::*;
