//! Errors

use crate::parser::Rule;
use thiserror::Error;

/// Errors raised while loading a scene description.
#[derive(Error, Debug)]
pub enum SceneError {
    /// The scene file could not be read.
    #[error("failed to read scene file: {0}")]
    Io(#[from] std::io::Error),

    /// The scene text does not match the grammar.
    #[error("parse error:\n{0}")]
    Parse(Box<pest::error::Error<Rule>>),

    /// A primitive references a material that was never declared.
    #[error("unknown material {0:?}")]
    UnknownMaterial(String),

    /// A block type the builder does not recognize.
    #[error("unknown block type {0:?}")]
    UnknownBlock(String),

    /// A block lacks a property it cannot default.
    #[error("block '{0}' is missing required property '{1}'")]
    MissingProperty(String, String),

    /// The scene declares no camera.
    #[error("scene has no camera")]
    MissingCamera,

    /// The environment map image could not be loaded.
    #[error("failed to load environment map: {0}")]
    Environment(#[from] image::ImageError),
}
