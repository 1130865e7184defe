//! Renderer capability interface and the CPU backend

use super::error::RenderError;
use super::render::{draw, draw_mesh, DrawContext, DrawStats, RenderSettings};
use super::render_target::RenderTarget;
use super::texture::{Texture, TextureFilter};
use crate::math::{Color, Mat4, Vec2, Vec3};
use crate::scene::{Camera, Light, Material, Mesh, TransformArena};

/// What the engine needs from a rendering backend
pub trait Renderer {
    fn bind_camera(&mut self, camera: Option<Camera>);
    fn bind_target(&mut self, target: Option<RenderTarget>);
    fn set_ambient(&mut self, ambient: Color);
    fn set_lights(&mut self, lights: Vec<Light>);

    /// Clear the bound target's color buffer
    fn clear(&mut self, color: Color);
    /// Reset the bound target's depth buffer
    fn clear_depth(&mut self);

    fn create_texture(&mut self, width: usize, height: usize, filter: TextureFilter) -> Texture;

    fn draw_mesh(
        &mut self,
        transforms: &TransformArena,
        local_to_world: &Mat4,
        mesh: &Mesh,
        material: &Material,
    ) -> Result<DrawStats, RenderError>;
}

/// Software rasterizer backend. Owns the bound camera, target and lights
/// and builds a `DrawContext` for every call.
#[derive(Default)]
pub struct SoftwareRenderer {
    camera: Option<Camera>,
    target: Option<RenderTarget>,
    lights: Vec<Light>,
    ambient: Color,
    pub settings: RenderSettings,
}

impl SoftwareRenderer {
    pub fn new(settings: RenderSettings) -> Self {
        Self {
            settings,
            ..Default::default()
        }
    }

    pub fn camera(&self) -> Option<&Camera> {
        self.camera.as_ref()
    }

    pub fn camera_mut(&mut self) -> Option<&mut Camera> {
        self.camera.as_mut()
    }

    pub fn target(&self) -> Option<&RenderTarget> {
        self.target.as_ref()
    }

    pub fn target_mut(&mut self) -> Option<&mut RenderTarget> {
        self.target.as_mut()
    }

    pub fn lights(&self) -> &[Light] {
        &self.lights
    }

    fn context<'a>(&'a mut self, transforms: &'a TransformArena) -> DrawContext<'a> {
        DrawContext {
            camera: self.camera.as_ref(),
            transforms,
            target: self.target.as_mut(),
            lights: &self.lights,
            ambient: self.ambient,
            settings: &self.settings,
        }
    }

    /// Draw raw arrays with the bound state
    #[allow(clippy::too_many_arguments)]
    pub fn draw(
        &mut self,
        transforms: &TransformArena,
        local_to_world: &Mat4,
        vertices: &[Vec3],
        triangles: &[usize],
        normals: &[Vec3],
        uvs: &[Vec2],
        material: &Material,
    ) -> Result<DrawStats, RenderError> {
        let mut ctx = self.context(transforms);
        draw(&mut ctx, local_to_world, vertices, triangles, normals, uvs, material)
    }
}

impl Renderer for SoftwareRenderer {
    fn bind_camera(&mut self, camera: Option<Camera>) {
        self.camera = camera;
    }

    fn bind_target(&mut self, target: Option<RenderTarget>) {
        self.target = target;
    }

    fn set_ambient(&mut self, ambient: Color) {
        self.ambient = ambient;
    }

    fn set_lights(&mut self, lights: Vec<Light>) {
        self.lights = lights;
    }

    fn clear(&mut self, color: Color) {
        if let Some(target) = self.target.as_mut() {
            target.clear(color);
        }
    }

    fn clear_depth(&mut self) {
        if let Some(target) = self.target.as_mut() {
            target.clear_depth();
        }
    }

    fn create_texture(&mut self, width: usize, height: usize, filter: TextureFilter) -> Texture {
        Texture::create(width, height, filter)
    }

    fn draw_mesh(
        &mut self,
        transforms: &TransformArena,
        local_to_world: &Mat4,
        mesh: &Mesh,
        material: &Material,
    ) -> Result<DrawStats, RenderError> {
        let mut ctx = self.context(transforms);
        draw_mesh(&mut ctx, local_to_world, mesh, material)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::Transform;

    fn setup() -> (SoftwareRenderer, TransformArena) {
        let mut arena = TransformArena::new();
        let cam = arena.insert(Transform::from_position(Vec3::new(0.0, 0.0, -4.0)));
        let sun = arena.insert(Transform::default());

        let mut renderer = SoftwareRenderer::new(RenderSettings::default());
        renderer.bind_camera(Some(Camera::new(cam)));
        renderer.bind_target(Some(RenderTarget::new(32, 24)));
        renderer.set_lights(vec![Light::directional(sun, Color::WHITE, 1.0)]);
        renderer.set_ambient(Color::new(0.1, 0.1, 0.1));
        (renderer, arena)
    }

    #[test]
    fn test_frame_cycle() {
        let (mut renderer, arena) = setup();
        renderer.clear(Color::BLUE);
        renderer.clear_depth();

        let stats = renderer
            .draw_mesh(&arena, &Mat4::IDENTITY, &Mesh::cube(1.0), &Material::default())
            .unwrap();
        assert!(stats.triangles_drawn > 0);

        let target = renderer.target().unwrap();
        assert_eq!(target.color_at(0, 0), Color::BLUE);
        assert_ne!(target.color_at(16, 12), Color::BLUE);
    }

    #[test]
    fn test_unbound_state_fails() {
        let arena = TransformArena::new();
        let mut renderer = SoftwareRenderer::default();
        let res = renderer.draw_mesh(&arena, &Mat4::IDENTITY, &Mesh::triangle(), &Material::default());
        assert_eq!(res, Err(RenderError::NoCamera));

        renderer.bind_camera(Some(Camera::default()));
        let res = renderer.draw_mesh(&arena, &Mat4::IDENTITY, &Mesh::triangle(), &Material::default());
        assert_eq!(res, Err(RenderError::NoRenderTarget));
    }

    #[test]
    fn test_raw_arrays_draw() {
        let (mut renderer, arena) = setup();
        let mesh = Mesh::triangle();
        let stats = renderer
            .draw(&arena, &Mat4::IDENTITY, &mesh.vertices, &mesh.triangles, &mesh.normals, &mesh.uvs, &Material::default())
            .unwrap();
        assert_eq!(stats.triangles_drawn, 1);
    }

    #[test]
    fn test_create_texture_on_cpu() {
        let mut renderer = SoftwareRenderer::default();
        let tex = renderer.create_texture(8, 4, TextureFilter::Bilinear);
        assert!(tex.is_on_cpu());
        assert_eq!((tex.get_width(), tex.get_height()), (8, 4));
        assert_eq!(tex.filter, TextureFilter::Bilinear);
    }
}
