//! softgl: retro-style engine core
//!
//! The software 3D pipeline of the engine:
//! - Math primitives (vectors, quaternion, 4x4 matrix, color)
//! - Transform hierarchy and camera model
//! - CPU rasterizer with depth testing and Blinn-Phong shading
//! - RON configuration for the viewer

pub mod config;
pub mod math;
pub mod rasterizer;
pub mod scene;

/// Version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
