//! Error types for drawing and texture loading

use std::fmt;

/// Why a draw call was refused. Nothing is written when one is returned.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderError {
    NoCamera,
    NoRenderTarget,
    MalformedMesh(String),
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderError::NoCamera => write!(f, "no camera bound"),
            RenderError::NoRenderTarget => write!(f, "no render target bound"),
            RenderError::MalformedMesh(msg) => write!(f, "malformed mesh: {}", msg),
        }
    }
}

impl std::error::Error for RenderError {}

/// Error type for texture loading
#[derive(Debug)]
pub enum TextureError {
    IoError(std::io::Error),
    DecodeError(image::ImageError),
}

impl From<std::io::Error> for TextureError {
    fn from(e: std::io::Error) -> Self {
        TextureError::IoError(e)
    }
}

impl From<image::ImageError> for TextureError {
    fn from(e: image::ImageError) -> Self {
        TextureError::DecodeError(e)
    }
}

impl fmt::Display for TextureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TextureError::IoError(e) => write!(f, "IO error: {}", e),
            TextureError::DecodeError(e) => write!(f, "Decode error: {}", e),
        }
    }
}

impl std::error::Error for TextureError {}
