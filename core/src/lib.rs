//! Core

#[macro_use]
extern crate log;

pub mod base;
pub mod camera;
pub mod color;
pub mod environment;
pub mod framebuffer;
pub mod geometry;
pub mod light;
pub mod material;
pub mod primitive;
pub mod scene;
