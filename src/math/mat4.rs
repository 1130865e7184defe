//! 4x4 matrices (row-major, column vectors)

use super::quat::Quat;
use super::vec::{Vec3, Vec4};
use serde::{Deserialize, Serialize};
use std::ops::Mul;

/// 4x4 matrix stored as rows. `m[row][col]`; translation lives in column 3.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Mat4 {
    pub m: [[f32; 4]; 4],
}

impl Default for Mat4 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mat4 {
    pub const IDENTITY: Mat4 = Mat4 {
        m: [
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ],
    };

    pub const ZERO: Mat4 = Mat4 { m: [[0.0; 4]; 4] };

    pub const fn from_rows(m: [[f32; 4]; 4]) -> Self {
        Self { m }
    }

    pub fn identity() -> Self {
        Self::IDENTITY
    }

    pub fn translate(t: Vec3) -> Self {
        let mut r = Self::IDENTITY;
        r.m[0][3] = t.x;
        r.m[1][3] = t.y;
        r.m[2][3] = t.z;
        r
    }

    pub fn scale(s: Vec3) -> Self {
        let mut r = Self::IDENTITY;
        r.m[0][0] = s.x;
        r.m[1][1] = s.y;
        r.m[2][2] = s.z;
        r
    }

    pub fn rotate(q: Quat) -> Self {
        let (x, y, z, w) = (q.x, q.y, q.z, q.w);
        let (xx, yy, zz) = (x * x, y * y, z * z);
        let (xy, xz, yz) = (x * y, x * z, y * z);
        let (wx, wy, wz) = (w * x, w * y, w * z);

        Self::from_rows([
            [1.0 - 2.0 * (yy + zz), 2.0 * (xy - wz), 2.0 * (xz + wy), 0.0],
            [2.0 * (xy + wz), 1.0 - 2.0 * (xx + zz), 2.0 * (yz - wx), 0.0],
            [2.0 * (xz - wy), 2.0 * (yz + wx), 1.0 - 2.0 * (xx + yy), 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// `translate * rotate * scale` (scale applied first)
    pub fn trs(position: Vec3, rotation: Quat, scale: Vec3) -> Self {
        Self::translate(position) * Self::rotate(rotation) * Self::scale(scale)
    }

    /// Maps `[left,right] x [bottom,top] x [near,far]` onto the `[-1,1]` cube
    pub fn orthographic(left: f32, right: f32, bottom: f32, top: f32, near: f32, far: f32) -> Self {
        let rl = right - left;
        let tb = top - bottom;
        let fnr = far - near;

        Self::from_rows([
            [2.0 / rl, 0.0, 0.0, -(right + left) / rl],
            [0.0, 2.0 / tb, 0.0, -(top + bottom) / tb],
            [0.0, 0.0, 2.0 / fnr, -(far + near) / fnr],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Perspective projection for a camera looking down +Z.
    /// `aspect` is width / height; clip w equals view-space z.
    /// The near plane lands on NDC z = -1 and the far plane on +1.
    pub fn perspective(fov_y: f32, aspect: f32, near: f32, far: f32) -> Self {
        let f = 1.0 / (fov_y * 0.5).tan();
        let fnr = far - near;

        Self::from_rows([
            [f / aspect, 0.0, 0.0, 0.0],
            [0.0, f, 0.0, 0.0],
            [0.0, 0.0, (far + near) / fnr, -(2.0 * far * near) / fnr],
            [0.0, 0.0, 1.0, 0.0],
        ])
    }

    pub fn transpose(&self) -> Self {
        let mut r = Self::ZERO;
        for (i, row) in self.m.iter().enumerate() {
            for (j, v) in row.iter().enumerate() {
                r.m[j][i] = *v;
            }
        }
        r
    }

    /// The 2x2 sub-determinants shared by `determinant` and `try_inverse`
    fn minors(&self) -> ([f32; 6], [f32; 6]) {
        let a = &self.m;
        let s = [
            a[0][0] * a[1][1] - a[1][0] * a[0][1],
            a[0][0] * a[1][2] - a[1][0] * a[0][2],
            a[0][0] * a[1][3] - a[1][0] * a[0][3],
            a[0][1] * a[1][2] - a[1][1] * a[0][2],
            a[0][1] * a[1][3] - a[1][1] * a[0][3],
            a[0][2] * a[1][3] - a[1][2] * a[0][3],
        ];
        let c = [
            a[2][0] * a[3][1] - a[3][0] * a[2][1],
            a[2][0] * a[3][2] - a[3][0] * a[2][2],
            a[2][0] * a[3][3] - a[3][0] * a[2][3],
            a[2][1] * a[3][2] - a[3][1] * a[2][2],
            a[2][1] * a[3][3] - a[3][1] * a[2][3],
            a[2][2] * a[3][3] - a[3][2] * a[2][3],
        ];
        (s, c)
    }

    pub fn determinant(&self) -> f32 {
        let (s, c) = self.minors();
        s[0] * c[5] - s[1] * c[4] + s[2] * c[3] + s[3] * c[2] - s[4] * c[1] + s[5] * c[0]
    }

    /// Inverse via the adjugate (transposed cofactor matrix) over the determinant.
    /// Returns `None` for singular matrices.
    pub fn try_inverse(&self) -> Option<Self> {
        let (s, c) = self.minors();
        let det = s[0] * c[5] - s[1] * c[4] + s[2] * c[3] + s[3] * c[2] - s[4] * c[1] + s[5] * c[0];
        if det.abs() < f32::EPSILON * f32::EPSILON {
            return None;
        }
        let inv = 1.0 / det;
        let a = &self.m;

        let adj = [
            [
                a[1][1] * c[5] - a[1][2] * c[4] + a[1][3] * c[3],
                -a[0][1] * c[5] + a[0][2] * c[4] - a[0][3] * c[3],
                a[3][1] * s[5] - a[3][2] * s[4] + a[3][3] * s[3],
                -a[2][1] * s[5] + a[2][2] * s[4] - a[2][3] * s[3],
            ],
            [
                -a[1][0] * c[5] + a[1][2] * c[2] - a[1][3] * c[1],
                a[0][0] * c[5] - a[0][2] * c[2] + a[0][3] * c[1],
                -a[3][0] * s[5] + a[3][2] * s[2] - a[3][3] * s[1],
                a[2][0] * s[5] - a[2][2] * s[2] + a[2][3] * s[1],
            ],
            [
                a[1][0] * c[4] - a[1][1] * c[2] + a[1][3] * c[0],
                -a[0][0] * c[4] + a[0][1] * c[2] - a[0][3] * c[0],
                a[3][0] * s[4] - a[3][1] * s[2] + a[3][3] * s[0],
                -a[2][0] * s[4] + a[2][1] * s[2] - a[2][3] * s[0],
            ],
            [
                -a[1][0] * c[3] + a[1][1] * c[1] - a[1][2] * c[0],
                a[0][0] * c[3] - a[0][1] * c[1] + a[0][2] * c[0],
                -a[3][0] * s[3] + a[3][1] * s[1] - a[3][2] * s[0],
                a[2][0] * s[3] - a[2][1] * s[1] + a[2][2] * s[0],
            ],
        ];

        let mut r = Self::ZERO;
        for i in 0..4 {
            for j in 0..4 {
                r.m[i][j] = adj[i][j] * inv;
            }
        }
        Some(r)
    }

    /// Inverse, or identity when the matrix is singular
    pub fn inverse(&self) -> Self {
        self.try_inverse().unwrap_or(Self::IDENTITY)
    }

    pub fn mul_vec4(&self, v: Vec4) -> Vec4 {
        let m = &self.m;
        Vec4 {
            x: m[0][0] * v.x + m[0][1] * v.y + m[0][2] * v.z + m[0][3] * v.w,
            y: m[1][0] * v.x + m[1][1] * v.y + m[1][2] * v.z + m[1][3] * v.w,
            z: m[2][0] * v.x + m[2][1] * v.y + m[2][2] * v.z + m[2][3] * v.w,
            w: m[3][0] * v.x + m[3][1] * v.y + m[3][2] * v.z + m[3][3] * v.w,
        }
    }

    /// Transform a point (w = 1, result w dropped)
    pub fn transform_point(&self, p: Vec3) -> Vec3 {
        self.mul_vec4(p.extend(1.0)).truncate()
    }

    /// Transform a direction (w = 0, translation ignored)
    pub fn transform_vector(&self, v: Vec3) -> Vec3 {
        self.mul_vec4(v.extend(0.0)).truncate()
    }

    pub fn extract_translation(&self) -> Vec3 {
        Vec3::new(self.m[0][3], self.m[1][3], self.m[2][3])
    }

    pub fn extract_axis_x(&self) -> Vec3 {
        Vec3::new(self.m[0][0], self.m[1][0], self.m[2][0])
    }

    pub fn extract_axis_y(&self) -> Vec3 {
        Vec3::new(self.m[0][1], self.m[1][1], self.m[2][1])
    }

    pub fn extract_axis_z(&self) -> Vec3 {
        Vec3::new(self.m[0][2], self.m[1][2], self.m[2][2])
    }

    pub fn extract_scale(&self) -> Vec3 {
        Vec3::new(
            self.extract_axis_x().len(),
            self.extract_axis_y().len(),
            self.extract_axis_z().len(),
        )
    }

    /// Rotation part with scale divided out
    pub fn extract_rotation(&self) -> Quat {
        Quat::from_basis(
            self.extract_axis_x().normalize(),
            self.extract_axis_y().normalize(),
            self.extract_axis_z().normalize(),
        )
    }

    pub fn approx_eq(&self, other: &Mat4, eps: f32) -> bool {
        self.m
            .iter()
            .flatten()
            .zip(other.m.iter().flatten())
            .all(|(a, b)| (a - b).abs() < eps)
    }
}

impl Mul for Mat4 {
    type Output = Mat4;
    fn mul(self, o: Mat4) -> Mat4 {
        let mut r = Mat4::ZERO;
        for i in 0..4 {
            for j in 0..4 {
                r.m[i][j] = (0..4).map(|k| self.m[i][k] * o.m[k][j]).sum();
            }
        }
        r
    }
}

impl Mul<Vec4> for Mat4 {
    type Output = Vec4;
    fn mul(self, v: Vec4) -> Vec4 {
        self.mul_vec4(v)
    }
}
