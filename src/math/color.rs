//! RGBA color in linear float space

use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign, Mul, Sub};

/// RGBA color (floats, unclamped)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const CLEAR: Color = Color { r: 0.0, g: 0.0, b: 0.0, a: 0.0 };
    pub const BLACK: Color = Color { r: 0.0, g: 0.0, b: 0.0, a: 1.0 };
    pub const WHITE: Color = Color { r: 1.0, g: 1.0, b: 1.0, a: 1.0 };
    pub const RED: Color = Color { r: 1.0, g: 0.0, b: 0.0, a: 1.0 };
    pub const GREEN: Color = Color { r: 0.0, g: 1.0, b: 0.0, a: 1.0 };
    pub const BLUE: Color = Color { r: 0.0, g: 0.0, b: 1.0, a: 1.0 };

    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn with_alpha(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Build from 8-bit channels
    pub fn from_rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
            a: a as f32 / 255.0,
        }
    }

    /// Convert to 8-bit channels, clamping to [0, 1] first
    pub fn to_rgba8(self) -> [u8; 4] {
        let q = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        [q(self.r), q(self.g), q(self.b), q(self.a)]
    }

    /// Interpolate between two colors; `t` is clamped to [0, 1]
    pub fn lerp(a: Color, b: Color, t: f32) -> Color {
        let t = t.clamp(0.0, 1.0);
        a + (b - a) * t
    }

    /// Same color with a different alpha
    pub fn with_a(self, a: f32) -> Color {
        Color { a, ..self }
    }
}

impl Add for Color {
    type Output = Color;
    fn add(self, o: Color) -> Color {
        Color::with_alpha(self.r + o.r, self.g + o.g, self.b + o.b, self.a + o.a)
    }
}

impl AddAssign for Color {
    fn add_assign(&mut self, o: Color) {
        *self = *self + o;
    }
}

impl Sub for Color {
    type Output = Color;
    fn sub(self, o: Color) -> Color {
        Color::with_alpha(self.r - o.r, self.g - o.g, self.b - o.b, self.a - o.a)
    }
}

impl Mul for Color {
    type Output = Color;
    fn mul(self, o: Color) -> Color {
        Color::with_alpha(self.r * o.r, self.g * o.g, self.b * o.b, self.a * o.a)
    }
}

impl Mul<f32> for Color {
    type Output = Color;
    fn mul(self, s: f32) -> Color {
        Color::with_alpha(self.r * s, self.g * s, self.b * s, self.a * s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lerp_clamps_t() {
        assert_eq!(Color::lerp(Color::BLACK, Color::WHITE, 2.0), Color::WHITE);
        assert_eq!(Color::lerp(Color::BLACK, Color::WHITE, -1.0), Color::BLACK);
        let mid = Color::lerp(Color::BLACK, Color::WHITE, 0.5);
        assert!((mid.g - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_unclamped_arithmetic() {
        let c = Color::WHITE + Color::WHITE;
        assert_eq!(c.r, 2.0);
        assert_eq!(c.to_rgba8(), [255, 255, 255, 255]);
    }

    #[test]
    fn test_rgba8_conversion() {
        let c = Color::from_rgba8(255, 0, 51, 255);
        assert!((c.b - 0.2).abs() < 1e-6);
        assert_eq!(c.to_rgba8(), [255, 0, 51, 255]);
    }
}
