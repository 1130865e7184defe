//! CPU textures with nearest and bilinear sampling

use super::error::TextureError;
use crate::math::{inverse_lerp, Color};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Sampling filter
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextureFilter {
    #[default]
    Nearest,
    Bilinear,
}

/// Texture with an optional CPU pixel buffer (row-major, `width * height`).
/// Dimensions never change after construction.
#[derive(Debug, Clone)]
pub struct Texture {
    width: usize,
    height: usize,
    data: Option<Vec<Color>>,
    pub filter: TextureFilter,
    pub name: String,
}

impl Texture {
    /// Texture without a CPU buffer
    pub fn new(width: usize, height: usize, filter: TextureFilter) -> Self {
        Self {
            width,
            height,
            data: None,
            filter,
            name: String::new(),
        }
    }

    /// Texture with a CPU buffer cleared to transparent black
    pub fn create(width: usize, height: usize, filter: TextureFilter) -> Self {
        let mut tex = Self::new(width, height, filter);
        tex.allocate_cpu();
        tex
    }

    /// Texture filled with one color
    pub fn solid(width: usize, height: usize, color: Color) -> Self {
        Self {
            data: Some(vec![color; width * height]),
            ..Self::new(width, height, TextureFilter::Nearest)
        }
    }

    /// Create a checkerboard test texture
    pub fn checkerboard(width: usize, height: usize, color1: Color, color2: Color) -> Self {
        let mut pixels = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                let checker = ((x / 4) + (y / 4)) % 2 == 0;
                pixels.push(if checker { color1 } else { color2 });
            }
        }
        Self {
            data: Some(pixels),
            name: "checkerboard".to_string(),
            ..Self::new(width, height, TextureFilter::Nearest)
        }
    }

    /// Load texture from an image file
    pub fn from_file<P: AsRef<Path>>(path: P, filter: TextureFilter) -> Result<Self, TextureError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)?;
        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default();

        let tex = Self::from_bytes(&bytes, name, filter)?;
        log::info!("Loaded texture: {} ({}x{})", tex.name, tex.width, tex.height);
        Ok(tex)
    }

    /// Load texture from encoded image bytes
    pub fn from_bytes(bytes: &[u8], name: String, filter: TextureFilter) -> Result<Self, TextureError> {
        let img = image::load_from_memory(bytes)?;
        let rgba = img.to_rgba8();
        let (width, height) = rgba.dimensions();

        let pixels: Vec<Color> = rgba
            .pixels()
            .map(|p| Color::from_rgba8(p[0], p[1], p[2], p[3]))
            .collect();

        Ok(Self {
            width: width as usize,
            height: height as usize,
            data: Some(pixels),
            filter,
            name,
        })
    }

    pub fn get_width(&self) -> usize {
        self.width
    }

    pub fn get_height(&self) -> usize {
        self.height
    }

    pub fn is_on_cpu(&self) -> bool {
        self.data.is_some()
    }

    /// Allocate the CPU buffer if missing
    pub fn allocate_cpu(&mut self) {
        if self.data.is_none() {
            self.data = Some(vec![Color::CLEAR; self.width * self.height]);
        }
    }

    /// Drop the CPU buffer
    pub fn free_cpu(&mut self) {
        self.data = None;
    }

    pub fn data(&self) -> Option<&[Color]> {
        self.data.as_deref()
    }

    pub fn data_mut(&mut self) -> Option<&mut [Color]> {
        self.data.as_deref_mut()
    }

    /// Fill the whole CPU buffer (no-op without one)
    pub fn fill(&mut self, color: Color) {
        if let Some(data) = self.data.as_mut() {
            data.fill(color);
        }
    }

    /// Get pixel at x,y coordinates (black when out of range or not on CPU)
    pub fn get_pixel(&self, x: usize, y: usize) -> Color {
        match &self.data {
            Some(data) if x < self.width && y < self.height => data[y * self.width + x],
            _ => Color::BLACK,
        }
    }

    /// Set pixel at x,y coordinates (ignored when out of range or not on CPU)
    pub fn set_pixel(&mut self, x: usize, y: usize, color: Color) {
        let width = self.width;
        if x >= width || y >= self.height {
            return;
        }
        if let Some(data) = self.data.as_mut() {
            data[y * width + x] = color;
        }
    }

    /// Sample at UV coordinates with the texture's filter.
    /// Black when the texture has no CPU buffer.
    pub fn sample(&self, u: f32, v: f32) -> Color {
        if !self.is_on_cpu() || self.width == 0 || self.height == 0 {
            return Color::BLACK;
        }
        match self.filter {
            TextureFilter::Nearest => self.sample_nearest(u, v),
            TextureFilter::Bilinear => self.sample_bilinear(u, v),
        }
    }

    /// Nearest texel, wrapping in both axes
    fn sample_nearest(&self, u: f32, v: f32) -> Color {
        let w = self.width as i64;
        let h = self.height as i64;

        let mut tx = ((u * self.width as f32).floor() as i64) % w;
        let mut ty = ((v * self.height as f32).floor() as i64) % h;
        if tx < 0 {
            tx += w;
        }
        if ty < 0 {
            ty += h;
        }

        self.get_pixel(tx as usize, ty as usize)
    }

    /// Blend of the 4 surrounding texels, clamped at the edges
    fn sample_bilinear(&self, u: f32, v: f32) -> Color {
        let max_x = (self.width - 1) as f32;
        let max_y = (self.height - 1) as f32;
        let px = u * max_x;
        let py = v * max_y;

        let x0 = px.floor().clamp(0.0, max_x);
        let x1 = px.ceil().clamp(0.0, max_x);
        let y0 = py.floor().clamp(0.0, max_y);
        let y1 = py.ceil().clamp(0.0, max_y);

        let tx = inverse_lerp(x0, x1, px).clamp(0.0, 1.0);
        let ty = inverse_lerp(y0, y1, py).clamp(0.0, 1.0);

        let c00 = self.get_pixel(x0 as usize, y0 as usize);
        let c10 = self.get_pixel(x1 as usize, y0 as usize);
        let c01 = self.get_pixel(x0 as usize, y1 as usize);
        let c11 = self.get_pixel(x1 as usize, y1 as usize);

        let top = Color::lerp(c00, c10, tx);
        let bottom = Color::lerp(c01, c11, tx);
        Color::lerp(top, bottom, ty)
    }
}
