//! Quaternion rotations

use super::vec::Vec3;
use serde::{Deserialize, Serialize};
use std::ops::Mul;

/// Rotation quaternion (x, y, z, w).
///
/// Rotations are only valid for (approximately) unit-length quaternions.
/// Nothing here renormalizes implicitly; callers supply normalized input.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quat {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl Default for Quat {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Quat {
    pub const IDENTITY: Quat = Quat { x: 0.0, y: 0.0, z: 0.0, w: 1.0 };

    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }

    /// Rotation of `angle` radians about a unit `axis`
    pub fn from_axis_angle(axis: Vec3, angle: f32) -> Self {
        let half = angle * 0.5;
        let s = half.sin();
        Self {
            x: axis.x * s,
            y: axis.y * s,
            z: axis.z * s,
            w: half.cos(),
        }
    }

    /// Yaw about +Y, pitch about +X, roll about +Z (radians).
    /// Roll is applied first, then pitch, then yaw.
    pub fn from_euler(yaw: f32, pitch: f32, roll: f32) -> Self {
        let qy = Self::from_axis_angle(Vec3::UP, yaw);
        let qx = Self::from_axis_angle(Vec3::RIGHT, pitch);
        let qz = Self::from_axis_angle(Vec3::FORWARD, roll);
        qy * qx * qz
    }

    /// Rotation that maps local +Z onto `forward`, keeping local +Y
    /// in the plane spanned by `forward` and `up`.
    pub fn look(forward: Vec3, up: Vec3) -> Self {
        let z = forward.normalize();
        let mut x = up.cross(z).normalize();
        if x.len_sq() == 0.0 {
            // forward is parallel to up: any perpendicular axis will do
            x = Vec3::FORWARD.cross(z).normalize();
            if x.len_sq() == 0.0 {
                x = Vec3::RIGHT;
            }
        }
        let y = z.cross(x);

        Self::from_basis(x, y, z)
    }

    /// Build from an orthonormal basis (the columns of a rotation matrix)
    pub fn from_basis(x: Vec3, y: Vec3, z: Vec3) -> Self {
        let (m00, m01, m02) = (x.x, y.x, z.x);
        let (m10, m11, m12) = (x.y, y.y, z.y);
        let (m20, m21, m22) = (x.z, y.z, z.z);

        let trace = m00 + m11 + m22;
        if trace > 0.0 {
            let s = 0.5 / (trace + 1.0).sqrt();
            Self {
                w: 0.25 / s,
                x: (m21 - m12) * s,
                y: (m02 - m20) * s,
                z: (m10 - m01) * s,
            }
        } else if m00 > m11 && m00 > m22 {
            let s = 2.0 * (1.0 + m00 - m11 - m22).sqrt();
            Self {
                w: (m21 - m12) / s,
                x: 0.25 * s,
                y: (m01 + m10) / s,
                z: (m02 + m20) / s,
            }
        } else if m11 > m22 {
            let s = 2.0 * (1.0 + m11 - m00 - m22).sqrt();
            Self {
                w: (m02 - m20) / s,
                x: (m01 + m10) / s,
                y: 0.25 * s,
                z: (m12 + m21) / s,
            }
        } else {
            let s = 2.0 * (1.0 + m22 - m00 - m11).sqrt();
            Self {
                w: (m10 - m01) / s,
                x: (m02 + m20) / s,
                y: (m12 + m21) / s,
                z: 0.25 * s,
            }
        }
    }

    pub fn dot(self, o: Quat) -> f32 {
        self.x * o.x + self.y * o.y + self.z * o.z + self.w * o.w
    }

    pub fn len(self) -> f32 {
        self.dot(self).sqrt()
    }

    pub fn normalize(self) -> Quat {
        let l = self.len();
        if l == 0.0 {
            return Quat::IDENTITY;
        }
        Quat::new(self.x / l, self.y / l, self.z / l, self.w / l)
    }

    pub fn conjugate(self) -> Quat {
        Quat::new(-self.x, -self.y, -self.z, self.w)
    }

    pub fn inverse(self) -> Quat {
        let l2 = self.dot(self);
        if l2 == 0.0 {
            return Quat::IDENTITY;
        }
        let c = self.conjugate();
        Quat::new(c.x / l2, c.y / l2, c.z / l2, c.w / l2)
    }

    /// Rotate a vector by this quaternion
    pub fn rotate(self, v: Vec3) -> Vec3 {
        let q = Vec3::new(self.x, self.y, self.z);
        let t = q.cross(v) * 2.0;
        v + t * self.w + q.cross(t)
    }

    /// Same rotation check, accounting for q and -q describing one rotation
    pub fn approx_eq(self, other: Quat, eps: f32) -> bool {
        (self.dot(other).abs() - 1.0).abs() < eps
    }
}

/// Hamilton product: `a * b` applies `b` first, then `a`
impl Mul for Quat {
    type Output = Quat;
    fn mul(self, b: Quat) -> Quat {
        let a = self;
        Quat {
            x: a.w * b.x + a.x * b.w + a.y * b.z - a.z * b.y,
            y: a.w * b.y - a.x * b.z + a.y * b.w + a.z * b.x,
            z: a.w * b.z + a.x * b.y - a.y * b.x + a.z * b.w,
            w: a.w * b.w - a.x * b.x - a.y * b.y - a.z * b.z,
        }
    }
}

impl Mul<Vec3> for Quat {
    type Output = Vec3;
    fn mul(self, v: Vec3) -> Vec3 {
        self.rotate(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_identity_rotation() {
        let v = Vec3::new(1.0, 2.0, 3.0);
        assert!(Quat::IDENTITY.rotate(v).approx_eq(v, 1e-6));
    }

    #[test]
    fn test_yaw_quarter_turn() {
        // Yaw +90 degrees turns forward (+Z) toward right (+X)
        let q = Quat::from_euler(FRAC_PI_2, 0.0, 0.0);
        let v = q.rotate(Vec3::FORWARD);
        assert!(v.approx_eq(Vec3::RIGHT, 1e-5), "{:?}", v);
    }

    #[test]
    fn test_pitch_quarter_turn() {
        let q = Quat::from_euler(0.0, FRAC_PI_2, 0.0);
        let v = q.rotate(Vec3::UP);
        assert!(v.approx_eq(Vec3::FORWARD, 1e-5), "{:?}", v);
    }

    #[test]
    fn test_look_maps_forward() {
        let dir = Vec3::new(1.0, 0.0, 1.0).normalize();
        let q = Quat::look(dir, Vec3::UP);
        assert!(q.rotate(Vec3::FORWARD).approx_eq(dir, 1e-5));
        assert!(q.rotate(Vec3::UP).approx_eq(Vec3::UP, 1e-5));
    }

    #[test]
    fn test_look_parallel_up_is_finite() {
        let q = Quat::look(Vec3::UP, Vec3::UP);
        let v = q.rotate(Vec3::FORWARD);
        assert!(v.approx_eq(Vec3::UP, 1e-5), "{:?}", v);
    }

    #[test]
    fn test_inverse_undoes_rotation() {
        let q = Quat::from_euler(0.3, -0.7, 1.1);
        let v = Vec3::new(0.5, -2.0, 4.0);
        let back = q.inverse().rotate(q.rotate(v));
        assert!(back.approx_eq(v, 1e-4));
    }

    #[test]
    fn test_mul_composes() {
        let a = Quat::from_axis_angle(Vec3::UP, 0.4);
        let b = Quat::from_axis_angle(Vec3::UP, 0.6);
        assert!((a * b).approx_eq(Quat::from_axis_angle(Vec3::UP, 1.0), 1e-5));
    }
}
