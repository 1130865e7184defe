//! Triangle meshes as flat parallel arrays
//!
//! `triangles` holds index triples into `vertices`, `normals` and `uvs`.
//! Front faces are the ones where `cross(v2 - v1, v3 - v1)` points out of
//! the surface.

use crate::math::{Vec2, Vec3};
use crate::rasterizer::RenderError;

#[derive(Debug, Clone, Default)]
pub struct Mesh {
    pub vertices: Vec<Vec3>,
    pub triangles: Vec<usize>,
    pub normals: Vec<Vec3>,
    pub uvs: Vec<Vec2>,
}

impl Mesh {
    pub fn new(vertices: Vec<Vec3>, triangles: Vec<usize>, normals: Vec<Vec3>, uvs: Vec<Vec2>) -> Self {
        Self { vertices, triangles, normals, uvs }
    }

    pub fn triangle_count(&self) -> usize {
        self.triangles.len() / 3
    }

    /// Check that the arrays can be rasterized without out-of-range reads
    pub fn validate(&self) -> Result<(), RenderError> {
        validate_arrays(&self.vertices, &self.triangles, &self.normals, &self.uvs)
    }

    /// Single triangle in the XY plane, facing -Z (toward a default camera behind it)
    pub fn triangle() -> Self {
        let n = Vec3::new(0.0, 0.0, -1.0);
        Self {
            vertices: vec![
                Vec3::new(-1.0, -1.0, 0.0),
                Vec3::new(0.0, 1.0, 0.0),
                Vec3::new(1.0, -1.0, 0.0),
            ],
            triangles: vec![0, 1, 2],
            normals: vec![n; 3],
            uvs: vec![Vec2::new(0.0, 0.0), Vec2::new(0.5, 1.0), Vec2::new(1.0, 0.0)],
        }
    }

    /// Square of side `size` in the XY plane, facing -Z
    pub fn quad(size: f32) -> Self {
        let mut mesh = Self::default();
        mesh.push_face(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0), Vec3::UP, Vec3::RIGHT, size * 0.5);
        mesh
    }

    /// Axis-aligned cube of side `size` centered at the origin
    pub fn cube(size: f32) -> Self {
        let h = size * 0.5;
        // (normal, u axis, v axis) with u x v == normal
        let faces = [
            (Vec3::RIGHT, Vec3::UP, Vec3::FORWARD),
            (-Vec3::RIGHT, Vec3::FORWARD, Vec3::UP),
            (Vec3::UP, Vec3::FORWARD, Vec3::RIGHT),
            (-Vec3::UP, Vec3::RIGHT, Vec3::FORWARD),
            (Vec3::FORWARD, Vec3::RIGHT, Vec3::UP),
            (-Vec3::FORWARD, Vec3::UP, Vec3::RIGHT),
        ];

        let mut mesh = Self::default();
        for (normal, u, v) in faces {
            mesh.push_face(normal * h, normal, u, v, h);
        }
        mesh
    }

    /// Append a square face centered at `center`; requires `u x v == normal`
    fn push_face(&mut self, center: Vec3, normal: Vec3, u: Vec3, v: Vec3, half: f32) {
        let base = self.vertices.len();
        let (u, v) = (u * half, v * half);

        self.vertices.extend_from_slice(&[
            center - u - v,
            center + u - v,
            center + u + v,
            center - u + v,
        ]);
        self.normals.extend_from_slice(&[normal; 4]);
        self.uvs.extend_from_slice(&[
            Vec2::new(0.0, 0.0),
            Vec2::new(1.0, 0.0),
            Vec2::new(1.0, 1.0),
            Vec2::new(0.0, 1.0),
        ]);

        // Two triangles per face
        self.triangles.extend_from_slice(&[base, base + 1, base + 2]);
        self.triangles.extend_from_slice(&[base, base + 2, base + 3]);
    }
}

/// Bounds-check raw mesh arrays before drawing
pub fn validate_arrays(vertices: &[Vec3], triangles: &[usize], normals: &[Vec3], uvs: &[Vec2]) -> Result<(), RenderError> {
    if triangles.len() % 3 != 0 {
        return Err(RenderError::MalformedMesh(format!(
            "index count {} is not a multiple of 3",
            triangles.len()
        )));
    }

    let limit = vertices.len().min(normals.len()).min(uvs.len());
    if let Some(&bad) = triangles.iter().find(|&&i| i >= limit) {
        return Err(RenderError::MalformedMesh(format!(
            "index {} out of range ({} vertices, {} normals, {} uvs)",
            bad,
            vertices.len(),
            normals.len(),
            uvs.len()
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Every triangle's winding normal must agree with its vertex normals
    fn assert_outward(mesh: &Mesh) {
        for tri in mesh.triangles.chunks(3) {
            let (a, b, c) = (mesh.vertices[tri[0]], mesh.vertices[tri[1]], mesh.vertices[tri[2]]);
            let face = (b - a).cross(c - a);
            assert!(face.dot(mesh.normals[tri[0]]) > 0.0, "inward face {:?}", tri);
        }
    }

    #[test]
    fn test_cube_shape() {
        let cube = Mesh::cube(2.0);
        assert_eq!(cube.vertices.len(), 24);
        assert_eq!(cube.triangle_count(), 12);
        assert!(cube.validate().is_ok());
        assert!(cube.vertices.iter().all(|v| v.x.abs() == 1.0 && v.y.abs() == 1.0 && v.z.abs() == 1.0));
        assert_outward(&cube);
    }

    #[test]
    fn test_quad_and_triangle_winding() {
        assert_outward(&Mesh::quad(1.0));
        assert_outward(&Mesh::triangle());
    }

    #[test]
    fn test_validate_rejects_partial_triangle() {
        let mut mesh = Mesh::triangle();
        mesh.triangles.push(0);
        assert!(matches!(mesh.validate(), Err(RenderError::MalformedMesh(_))));
    }

    #[test]
    fn test_validate_rejects_short_normals() {
        let mut mesh = Mesh::triangle();
        mesh.normals.pop();
        assert!(matches!(mesh.validate(), Err(RenderError::MalformedMesh(_))));
    }
}
