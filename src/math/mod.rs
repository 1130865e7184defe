//! Math primitives for the software pipeline
//!
//! Left-handed coordinates: +X right, +Y up, +Z forward.
//! Matrices are row-major and multiply column vectors (`m * v`).

mod color;
mod mat4;
mod quat;
mod vec;

pub use color::*;
pub use mat4::*;
pub use quat::*;
pub use vec::*;

/// Smallest positive value treated as non-zero by the pipeline
pub const EPSILON: f32 = 1e-4;

/// Linear interpolation between two scalars (t is not clamped)
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Position of `value` between `a` and `b` as a factor.
/// Returns 0 when the range is empty.
pub fn inverse_lerp(a: f32, b: f32, value: f32) -> f32 {
    if (b - a).abs() < f32::EPSILON {
        return 0.0;
    }
    (value - a) / (b - a)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inverse_lerp() {
        assert!((inverse_lerp(2.0, 4.0, 3.0) - 0.5).abs() < 1e-6);
        assert!((inverse_lerp(2.0, 4.0, 5.0) - 1.5).abs() < 1e-6);
    }

    #[test]
    fn test_inverse_lerp_empty_range() {
        assert_eq!(inverse_lerp(3.0, 3.0, 3.0), 0.0);
    }

    #[test]
    fn test_lerp() {
        assert!((lerp(0.0, 10.0, 0.25) - 2.5).abs() < 1e-6);
    }
}
