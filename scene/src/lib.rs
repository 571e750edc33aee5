//! Scene description

#[macro_use]
extern crate log;

mod builder;
mod error;
mod parser;

// Re-export.
pub use builder::*;
pub use error::*;
pub use parser::*;
