//! Scene data consumed by the rasterizer
//!
//! - Transform hierarchy (arena + parent indices)
//! - Camera, lights, materials
//! - Meshes as flat vertex/index arrays
//! - `Scene`: everything above bundled for rendering

mod camera;
mod instance;
mod light;
mod material;
mod mesh;
mod transform;

pub use camera::*;
pub use instance::*;
pub use light::*;
pub use material::*;
pub use mesh::*;
pub use transform::*;
