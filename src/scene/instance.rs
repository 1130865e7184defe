//! A renderable scene: transforms, camera, lights and mesh instances

use super::camera::Camera;
use super::light::Light;
use super::material::Material;
use super::mesh::Mesh;
use super::transform::{TransformArena, TransformId};
use crate::math::{Color, Quat, Vec3};
use crate::rasterizer::{DrawStats, RenderError, Renderer};

/// A mesh drawn with a material at a transform
#[derive(Debug, Clone)]
pub struct SceneObject {
    pub name: String,
    pub transform: TransformId,
    pub mesh: Mesh,
    pub material: Material,
    /// Rotation speed (yaw, pitch, roll) in radians per second
    pub spin: Vec3,
}

#[derive(Debug, Clone, Default)]
pub struct Scene {
    pub transforms: TransformArena,
    pub camera: Camera,
    pub lights: Vec<Light>,
    pub objects: Vec<SceneObject>,
    pub ambient: Color,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance object spin by `dt` seconds
    pub fn update(&mut self, dt: f32) {
        for obj in &self.objects {
            if obj.spin == Vec3::ZERO {
                continue;
            }
            if let Some(t) = self.transforms.get_mut(obj.transform) {
                let step = Quat::from_euler(obj.spin.x * dt, obj.spin.y * dt, obj.spin.z * dt);
                t.rotation = (t.rotation * step).normalize();
            }
        }
    }

    /// Push camera, lights and ambient into the renderer, then draw every object.
    /// Stops at the first refused draw.
    pub fn render<R: Renderer>(&self, renderer: &mut R) -> Result<DrawStats, RenderError> {
        renderer.bind_camera(Some(self.camera.clone()));
        renderer.set_lights(self.lights.clone());
        renderer.set_ambient(self.ambient);

        let mut total = DrawStats::default();
        for obj in &self.objects {
            let model = self.transforms.global_matrix(obj.transform);
            let stats = renderer.draw_mesh(&self.transforms, &model, &obj.mesh, &obj.material)?;
            total.triangles_drawn += stats.triangles_drawn;
            total.triangles_culled += stats.triangles_culled;
            total.pixels_written += stats.pixels_written;
        }
        Ok(total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rasterizer::{RenderSettings, RenderTarget, SoftwareRenderer};
    use crate::scene::Transform;

    fn scene() -> Scene {
        let mut scene = Scene::new();
        let cam = scene.transforms.insert(Transform::from_position(Vec3::new(0.0, 0.0, -5.0)));
        scene.camera = Camera::new(cam);
        let sun = scene.transforms.insert(Transform::default());
        scene.lights.push(Light::directional(sun, Color::WHITE, 1.0));

        let t = scene.transforms.insert(Transform::default());
        scene.objects.push(SceneObject {
            name: "cube".to_string(),
            transform: t,
            mesh: Mesh::cube(1.0),
            material: Material::default(),
            spin: Vec3::new(1.0, 0.0, 0.0),
        });
        scene
    }

    #[test]
    fn test_update_spins_objects() {
        let mut scene = scene();
        let id = scene.objects[0].transform;
        scene.update(0.5);
        let rot = scene.transforms.get(id).map(|t| t.rotation).unwrap();
        assert!(rot.approx_eq(Quat::from_euler(0.5, 0.0, 0.0), 1e-5));
    }

    #[test]
    fn test_render_into_software_renderer() {
        let scene = scene();
        let mut renderer = SoftwareRenderer::new(RenderSettings::default());
        renderer.bind_target(Some(RenderTarget::new(40, 30)));
        renderer.clear(Color::BLACK);

        let stats = scene.render(&mut renderer).unwrap();
        assert!(stats.pixels_written > 0);
        assert_eq!(stats.triangles_drawn + stats.triangles_culled, 12);
    }

    #[test]
    fn test_render_without_target_fails() {
        let scene = scene();
        let mut renderer = SoftwareRenderer::default();
        assert_eq!(scene.render(&mut renderer), Err(RenderError::NoRenderTarget));
    }
}
