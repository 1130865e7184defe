//! Render target: a frame buffer and a depth buffer of matching size
//!
//! Both buffers are textures. Depth lives in the red channel of the depth
//! texture; smaller values are nearer. Pixel `(x, y)` in texel space (y up)
//! is stored at `x + (height - 1 - y) * width`, so memory row 0 is the
//! visual top row.

use super::texture::{Texture, TextureFilter};
use crate::math::Color;

/// Depth value of an empty pixel
pub const DEPTH_CLEAR: f32 = f32::MAX;

pub struct RenderTarget {
    width: usize,
    height: usize,
    frame_buffer: Texture,
    depth_buffer: Texture,
}

impl RenderTarget {
    pub fn new(width: usize, height: usize) -> Self {
        let mut target = Self {
            width,
            height,
            frame_buffer: Texture::create(width, height, TextureFilter::Nearest),
            depth_buffer: Texture::create(width, height, TextureFilter::Nearest),
        };
        target.clear(Color::BLACK);
        target.clear_depth();
        target
    }

    /// Free and reallocate both buffers at the new size
    pub fn resize(&mut self, width: usize, height: usize) {
        if width == self.width && height == self.height {
            return;
        }
        log::debug!("Render target resized {}x{} -> {}x{}", self.width, self.height, width, height);
        *self = Self::new(width, height);
    }

    pub fn get_width(&self) -> usize {
        self.width
    }

    pub fn get_height(&self) -> usize {
        self.height
    }

    /// Width / height
    pub fn aspect(&self) -> f32 {
        if self.height == 0 {
            return 1.0;
        }
        self.width as f32 / self.height as f32
    }

    pub fn clear(&mut self, color: Color) {
        self.frame_buffer.fill(color);
    }

    pub fn clear_depth(&mut self) {
        self.depth_buffer.fill(Color::with_alpha(DEPTH_CLEAR, 0.0, 0.0, 0.0));
    }

    pub fn frame_buffer(&self) -> &Texture {
        &self.frame_buffer
    }

    pub fn depth_buffer(&self) -> &Texture {
        &self.depth_buffer
    }

    /// Mutable color and depth pixels at once (both always on CPU)
    pub fn buffers_mut(&mut self) -> (&mut [Color], &mut [Color]) {
        let color = self.frame_buffer.data_mut().unwrap_or_default();
        let depth = self.depth_buffer.data_mut().unwrap_or_default();
        (color, depth)
    }

    /// Buffer index for texel-space coordinates (y up), `None` outside the target
    pub fn index(&self, x: usize, y: usize) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(x + (self.height - 1 - y) * self.width)
    }

    /// Color at texel-space coordinates (y up). Black outside the target.
    pub fn color_at(&self, x: usize, y: usize) -> Color {
        self.index(x, y)
            .and_then(|i| self.frame_buffer.data().and_then(|d| d.get(i)))
            .copied()
            .unwrap_or(Color::BLACK)
    }

    /// Depth at texel-space coordinates (y up). `DEPTH_CLEAR` outside the target.
    pub fn depth_at(&self, x: usize, y: usize) -> f32 {
        self.index(x, y)
            .and_then(|i| self.depth_buffer.data().and_then(|d| d.get(i)))
            .map_or(DEPTH_CLEAR, |c| c.r)
    }

    /// RGBA bytes, first row = visual top
    pub fn to_rgba8(&self) -> Vec<u8> {
        let mut pixels = Vec::with_capacity(self.width * self.height * 4);
        if let Some(data) = self.frame_buffer.data() {
            for c in data {
                pixels.extend_from_slice(&c.to_rgba8());
            }
        }
        pixels
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_cleared() {
        let target = RenderTarget::new(4, 3);
        assert_eq!(target.color_at(0, 0), Color::BLACK);
        assert_eq!(target.depth_at(3, 2), DEPTH_CLEAR);
        assert_eq!(target.frame_buffer().get_width(), target.depth_buffer().get_width());
    }

    #[test]
    fn test_index_flips_rows() {
        let target = RenderTarget::new(4, 3);
        assert_eq!(target.index(0, 2), Some(0));
        assert_eq!(target.index(1, 0), Some(9));
        assert_eq!(target.index(4, 0), None);
        assert_eq!(target.index(0, 3), None);
    }

    #[test]
    fn test_out_of_range_reads() {
        let mut target = RenderTarget::new(4, 3);
        target.clear(Color::RED);
        assert_eq!(target.color_at(0, 3), Color::BLACK);
        assert_eq!(target.color_at(4, 0), Color::BLACK);
        assert_eq!(target.depth_at(0, 3), DEPTH_CLEAR);

        let empty = RenderTarget::new(4, 0);
        assert_eq!(empty.index(0, 0), None);
        assert_eq!(empty.color_at(0, 0), Color::BLACK);
        assert_eq!(empty.depth_at(0, 0), DEPTH_CLEAR);
    }

    #[test]
    fn test_resize_reallocates() {
        let mut target = RenderTarget::new(2, 2);
        target.clear(Color::RED);
        target.resize(8, 4);
        assert_eq!((target.get_width(), target.get_height()), (8, 4));
        assert_eq!(target.frame_buffer().data().map(|d| d.len()), Some(32));
        assert_eq!(target.depth_buffer().data().map(|d| d.len()), Some(32));
        assert_eq!(target.color_at(7, 3), Color::BLACK);
        assert!((target.aspect() - 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_to_rgba8_size() {
        let mut target = RenderTarget::new(3, 2);
        target.clear(Color::WHITE);
        let bytes = target.to_rgba8();
        assert_eq!(bytes.len(), 24);
        assert!(bytes.iter().all(|&b| b == 255));
    }
}
