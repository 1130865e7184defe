//! Camera: view and projection matrices
//!
//! The camera looks down its local +Z. The view matrix is the inverse of
//! the camera transform's global matrix.

use super::transform::{TransformArena, TransformId};
use crate::math::{Mat4, Vec3, EPSILON};
use serde::{Deserialize, Serialize};

/// Projection kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Projection {
    Perspective,
    Orthographic,
}

/// Camera state
#[derive(Debug, Clone)]
pub struct Camera {
    pub transform: Option<TransformId>,
    pub projection: Projection,
    pub near: f32,
    pub far: f32,
    /// Vertical field of view in radians (perspective)
    pub fov: f32,
    // Orthographic planes
    pub left: f32,
    pub right: f32,
    pub bottom: f32,
    pub top: f32,
    /// Width / height used when `auto_width` is off
    pub aspect: f32,
    /// Derive horizontal extent from the render target every frame
    pub auto_width: bool,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            transform: None,
            projection: Projection::Perspective,
            near: 0.1,
            far: 100.0,
            fov: 60.0_f32.to_radians(),
            left: -1.0,
            right: 1.0,
            bottom: -1.0,
            top: 1.0,
            aspect: 1.0,
            auto_width: true,
        }
    }
}

impl Camera {
    pub fn new(transform: TransformId) -> Self {
        Self {
            transform: Some(transform),
            ..Default::default()
        }
    }

    /// Switch to perspective. A non-positive near plane is clamped to `EPSILON`.
    pub fn set_perspective(&mut self, fov: f32, near: f32, far: f32) {
        self.projection = Projection::Perspective;
        self.fov = fov;
        self.near = if near <= 0.0 { EPSILON } else { near };
        self.far = far;
    }

    /// Switch to orthographic with explicit planes (disables `auto_width`)
    pub fn set_orthographic(&mut self, left: f32, right: f32, bottom: f32, top: f32, near: f32, far: f32) {
        self.projection = Projection::Orthographic;
        self.left = left;
        self.right = right;
        self.bottom = bottom;
        self.top = top;
        self.near = near;
        self.far = far;
        self.auto_width = false;
    }

    /// Symmetric orthographic volume of the given half height; width follows the target
    pub fn set_orthographic_size(&mut self, half_height: f32, near: f32, far: f32) {
        self.projection = Projection::Orthographic;
        self.bottom = -half_height;
        self.top = half_height;
        self.near = near;
        self.far = far;
        self.auto_width = true;
    }

    /// Fix the aspect ratio (width / height) instead of following the target
    pub fn set_aspect(&mut self, aspect: f32) {
        self.aspect = aspect;
        self.auto_width = false;
    }

    pub fn set_auto_width(&mut self, auto_width: bool) {
        self.auto_width = auto_width;
    }

    /// Projection matrix for a render target of aspect `target_aspect`
    /// (width / height). The target aspect is only used with `auto_width`.
    pub fn calculate_projection_matrix(&self, target_aspect: f32) -> Mat4 {
        let aspect = if self.auto_width { target_aspect } else { self.aspect };

        match self.projection {
            Projection::Perspective => {
                let near = if self.near <= 0.0 { EPSILON } else { self.near };
                Mat4::perspective(self.fov, aspect, near, self.far)
            }
            Projection::Orthographic => {
                let (left, right) = if self.auto_width {
                    let half_w = (self.top - self.bottom) * 0.5 * aspect;
                    (-half_w, half_w)
                } else {
                    (self.left, self.right)
                };
                Mat4::orthographic(left, right, self.bottom, self.top, self.near, self.far)
            }
        }
    }

    /// World-to-view matrix; identity without a transform
    pub fn get_view_matrix(&self, transforms: &TransformArena) -> Mat4 {
        match self.transform {
            Some(id) => transforms.global_matrix(id).inverse(),
            None => Mat4::IDENTITY,
        }
    }

    /// World position of the camera (origin without a transform)
    pub fn position(&self, transforms: &TransformArena) -> Vec3 {
        match self.transform {
            Some(id) => transforms.global_position(id),
            None => Vec3::ZERO,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::{Quat, Vec4};
    use crate::scene::Transform;

    #[test]
    fn test_orthographic_corners_map_to_cube() {
        let mut cam = Camera::default();
        cam.set_orthographic(-3.0, 5.0, -1.0, 2.0, 0.5, 30.0);
        let proj = cam.calculate_projection_matrix(16.0 / 9.0);

        let lbn = proj.transform_point(Vec3::new(-3.0, -1.0, 0.5));
        let rtf = proj.transform_point(Vec3::new(5.0, 2.0, 30.0));
        assert!(lbn.approx_eq(Vec3::new(-1.0, -1.0, -1.0), 1e-5), "{:?}", lbn);
        assert!(rtf.approx_eq(Vec3::new(1.0, 1.0, 1.0), 1e-5), "{:?}", rtf);
    }

    #[test]
    fn test_orthographic_auto_width() {
        let mut cam = Camera::default();
        cam.set_orthographic_size(2.0, 0.1, 10.0);
        let proj = cam.calculate_projection_matrix(2.0);
        // half width = 2 * 2 = 4
        let p = proj.transform_point(Vec3::new(4.0, 2.0, 0.1));
        assert!(p.approx_eq(Vec3::new(1.0, 1.0, -1.0), 1e-5), "{:?}", p);
    }

    #[test]
    fn test_perspective_clamps_near() {
        let mut cam = Camera::default();
        cam.set_perspective(1.0, -2.0, 10.0);
        assert_eq!(cam.near, EPSILON);
        cam.set_perspective(1.0, 0.0, 10.0);
        assert_eq!(cam.near, EPSILON);
    }

    #[test]
    fn test_perspective_aspect_scales_x() {
        let cam = Camera::default();
        let wide = cam.calculate_projection_matrix(2.0);
        let square = cam.calculate_projection_matrix(1.0);
        assert!((wide.m[0][0] * 2.0 - square.m[0][0]).abs() < 1e-5);
        assert_eq!(wide.m[3][2], 1.0);
    }

    #[test]
    fn test_fixed_aspect_ignores_target() {
        let mut cam = Camera::default();
        cam.set_aspect(1.0);
        let a = cam.calculate_projection_matrix(3.0);
        let b = cam.calculate_projection_matrix(0.5);
        assert!(a.approx_eq(&b, 1e-6));
    }

    #[test]
    fn test_view_matrix_inverse_of_transform() {
        let mut arena = TransformArena::new();
        let id = arena.insert(Transform::new(
            Vec3::new(0.0, 2.0, -5.0),
            Quat::from_euler(0.3, 0.1, 0.0),
            Vec3::ONE,
        ));
        let cam = Camera::new(id);
        let view = cam.get_view_matrix(&arena);
        let origin = view.mul_vec4(Vec4::new(0.0, 2.0, -5.0, 1.0));
        assert!(origin.truncate().approx_eq(Vec3::ZERO, 1e-5));
        assert!(cam.position(&arena).approx_eq(Vec3::new(0.0, 2.0, -5.0), 1e-6));
    }

    #[test]
    fn test_view_without_transform_is_identity() {
        let cam = Camera::default();
        assert_eq!(cam.get_view_matrix(&TransformArena::new()), Mat4::IDENTITY);
    }
}
