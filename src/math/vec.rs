//! Vector math for 3D rendering

use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign, Div, Mul, MulAssign, Neg, Sub, SubAssign};

/// 2D Vector (texture coordinates, screen positions)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

/// 3D Vector
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

/// 4D Vector (homogeneous coordinates)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec4 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

/// Componentwise operators shared by every vector type
macro_rules! impl_vec_ops {
    ($t:ident { $($f:ident),+ }) => {
        impl Add for $t {
            type Output = $t;
            fn add(self, o: $t) -> $t {
                $t { $($f: self.$f + o.$f),+ }
            }
        }

        impl Sub for $t {
            type Output = $t;
            fn sub(self, o: $t) -> $t {
                $t { $($f: self.$f - o.$f),+ }
            }
        }

        impl Mul for $t {
            type Output = $t;
            fn mul(self, o: $t) -> $t {
                $t { $($f: self.$f * o.$f),+ }
            }
        }

        impl Div for $t {
            type Output = $t;
            fn div(self, o: $t) -> $t {
                $t { $($f: self.$f / o.$f),+ }
            }
        }

        impl Mul<f32> for $t {
            type Output = $t;
            fn mul(self, s: f32) -> $t {
                $t { $($f: self.$f * s),+ }
            }
        }

        impl Mul<$t> for f32 {
            type Output = $t;
            fn mul(self, v: $t) -> $t {
                v * self
            }
        }

        impl Div<f32> for $t {
            type Output = $t;
            fn div(self, s: f32) -> $t {
                $t { $($f: self.$f / s),+ }
            }
        }

        impl Neg for $t {
            type Output = $t;
            fn neg(self) -> $t {
                $t { $($f: -self.$f),+ }
            }
        }

        impl AddAssign for $t {
            fn add_assign(&mut self, o: $t) {
                $(self.$f += o.$f;)+
            }
        }

        impl SubAssign for $t {
            fn sub_assign(&mut self, o: $t) {
                $(self.$f -= o.$f;)+
            }
        }

        impl MulAssign<f32> for $t {
            fn mul_assign(&mut self, s: f32) {
                $(self.$f *= s;)+
            }
        }

        impl $t {
            pub fn dot(self, o: $t) -> f32 {
                0.0 $(+ self.$f * o.$f)+
            }

            pub fn len_sq(self) -> f32 {
                self.dot(self)
            }

            pub fn len(self) -> f32 {
                self.len_sq().sqrt()
            }

            /// Unit-length copy; the zero vector stays zero
            pub fn normalize(self) -> $t {
                let l = self.len();
                if l == 0.0 {
                    return $t::default();
                }
                self / l
            }

            pub fn scale(self, s: f32) -> $t {
                self * s
            }

            /// Linear interpolation (t is not clamped)
            pub fn lerp(self, o: $t, t: f32) -> $t {
                self + (o - self) * t
            }
        }
    };
}

impl_vec_ops!(Vec2 { x, y });
impl_vec_ops!(Vec3 { x, y, z });
impl_vec_ops!(Vec4 { x, y, z, w });

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };
    pub const ONE: Vec2 = Vec2 { x: 1.0, y: 1.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Z component of the 3D cross product (twice the signed triangle area)
    pub fn perp_dot(self, o: Vec2) -> f32 {
        self.x * o.y - self.y * o.x
    }

    pub fn extend(self, z: f32) -> Vec3 {
        Vec3::new(self.x, self.y, z)
    }
}

impl Vec3 {
    pub const ZERO: Vec3 = Vec3 { x: 0.0, y: 0.0, z: 0.0 };
    pub const ONE: Vec3 = Vec3 { x: 1.0, y: 1.0, z: 1.0 };
    pub const RIGHT: Vec3 = Vec3 { x: 1.0, y: 0.0, z: 0.0 };
    pub const UP: Vec3 = Vec3 { x: 0.0, y: 1.0, z: 0.0 };
    pub const FORWARD: Vec3 = Vec3 { x: 0.0, y: 0.0, z: 1.0 };

    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn cross(self, other: Vec3) -> Vec3 {
        Vec3 {
            x: self.y * other.z - self.z * other.y,
            y: self.z * other.x - self.x * other.z,
            z: self.x * other.y - self.y * other.x,
        }
    }

    pub fn extend(self, w: f32) -> Vec4 {
        Vec4::new(self.x, self.y, self.z, w)
    }

    pub fn truncate(self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    /// Approximate equality within `eps` per component
    pub fn approx_eq(self, other: Vec3, eps: f32) -> bool {
        (self.x - other.x).abs() < eps
            && (self.y - other.y).abs() < eps
            && (self.z - other.z).abs() < eps
    }
}

impl Vec4 {
    pub const ZERO: Vec4 = Vec4 { x: 0.0, y: 0.0, z: 0.0, w: 0.0 };

    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }

    pub fn truncate(self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec3_dot() {
        let a = Vec3::new(1.0, 2.0, 3.0);
        let b = Vec3::new(4.0, 5.0, 6.0);
        assert!((a.dot(b) - 32.0).abs() < 0.001);
    }

    #[test]
    fn test_vec3_cross() {
        let a = Vec3::new(1.0, 0.0, 0.0);
        let b = Vec3::new(0.0, 1.0, 0.0);
        let c = a.cross(b);
        assert!((c.z - 1.0).abs() < 0.001);
    }

    #[test]
    fn test_normalize_zero_stays_zero() {
        assert_eq!(Vec3::ZERO.normalize(), Vec3::ZERO);
        assert_eq!(Vec2::ZERO.normalize(), Vec2::ZERO);
    }

    #[test]
    fn test_normalize_length() {
        let n = Vec4::new(3.0, 0.0, 4.0, 0.0).normalize();
        assert!((n.len() - 1.0).abs() < 1e-6);
        assert!((n.x - 0.6).abs() < 1e-6);
    }

    #[test]
    fn test_componentwise_ops() {
        let a = Vec3::new(2.0, 4.0, 6.0);
        let b = Vec3::new(1.0, 2.0, 3.0);
        assert_eq!(a / b, Vec3::new(2.0, 2.0, 2.0));
        assert_eq!(a * b, Vec3::new(2.0, 8.0, 18.0));
        assert_eq!(a - b, b);
        assert_eq!(2.0 * b, a);
    }

    #[test]
    fn test_perp_dot() {
        let a = Vec2::new(1.0, 0.0);
        let b = Vec2::new(0.0, 1.0);
        assert_eq!(a.perp_dot(b), 1.0);
        assert_eq!(b.perp_dot(a), -1.0);
    }
}
