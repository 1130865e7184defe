//! CPU software rasterizer
//!
//! Features:
//! - Perspective and orthographic projection through a camera
//! - Frustum rejection and back-face culling per triangle
//! - Barycentric rasterization with a depth buffer
//! - Blinn-Phong shading with nearest/bilinear texture sampling

mod error;
mod render;
mod render_target;
mod renderer;
mod shading;
mod texture;

pub use error::*;
pub use render::*;
pub use render_target::*;
pub use renderer::*;
pub use shading::*;
pub use texture::*;

/// Default internal resolution (authentic low-res look)
pub const WIDTH: usize = 320;
pub const HEIGHT: usize = 240;
