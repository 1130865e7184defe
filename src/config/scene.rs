//! Scene descriptions
//!
//! Pure data loaded from RON and turned into a runtime `Scene`.
//! Angles are in degrees.

use crate::math::{Color, Quat, Vec3};
use crate::rasterizer::{Texture, TextureFilter};
use crate::scene::{Camera, Light, LightKind, Material, Mesh, Projection, Scene, SceneObject, Transform};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::rc::Rc;

fn rotation_from_degrees(r: Vec3) -> Quat {
    Quat::from_euler(r.x.to_radians(), r.y.to_radians(), r.z.to_radians())
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraDesc {
    pub position: Vec3,
    /// (yaw, pitch, roll)
    pub rotation: Vec3,
    pub projection: Projection,
    pub fov: f32,
    pub near: f32,
    pub far: f32,
    /// Half height of the orthographic volume
    pub ortho_size: f32,
}

impl Default for CameraDesc {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 1.5, -5.0),
            rotation: Vec3::new(0.0, 15.0, 0.0),
            projection: Projection::Perspective,
            fov: 60.0,
            near: 0.1,
            far: 100.0,
            ortho_size: 3.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LightDesc {
    pub kind: LightKind,
    pub tint: Color,
    pub intensity: f32,
    pub range: f32,
    pub position: Vec3,
    /// (yaw, pitch, roll); directional lights shine along the rotated +Z
    pub rotation: Vec3,
}

impl Default for LightDesc {
    fn default() -> Self {
        Self {
            kind: LightKind::Directional,
            tint: Color::WHITE,
            intensity: 1.0,
            range: 10.0,
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Primitive {
    Triangle,
    Quad,
    Cube,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ObjectDesc {
    pub name: String,
    pub primitive: Primitive,
    pub size: f32,
    pub position: Vec3,
    /// (yaw, pitch, roll)
    pub rotation: Vec3,
    pub scale: Vec3,
    /// Index of another object in the scene to parent to
    pub parent: Option<usize>,
    pub diffuse: Color,
    pub specular: Color,
    pub emission: Color,
    pub shininess: f32,
    /// Image path, relative to the scene file
    pub texture: Option<String>,
    /// Built-in checkerboard when no texture path is given
    pub checkerboard: bool,
    pub filter: TextureFilter,
    /// Degrees per second (yaw, pitch, roll)
    pub spin: Vec3,
}

impl Default for ObjectDesc {
    fn default() -> Self {
        Self {
            name: String::new(),
            primitive: Primitive::Cube,
            size: 1.0,
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
            parent: None,
            diffuse: Color::WHITE,
            specular: Color::BLACK,
            emission: Color::BLACK,
            shininess: 0.5,
            texture: None,
            checkerboard: false,
            filter: TextureFilter::Nearest,
            spin: Vec3::ZERO,
        }
    }
}

/// A complete scene file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneDesc {
    pub ambient: Color,
    pub camera: CameraDesc,
    pub lights: Vec<LightDesc>,
    pub objects: Vec<ObjectDesc>,
}

impl SceneDesc {
    /// The viewer's built-in scene: a spinning checkered cube over a floor
    pub fn demo() -> Self {
        Self {
            ambient: Color::new(0.15, 0.15, 0.2),
            camera: CameraDesc::default(),
            lights: vec![
                LightDesc {
                    rotation: Vec3::new(30.0, 50.0, 0.0),
                    ..Default::default()
                },
                LightDesc {
                    kind: LightKind::Point,
                    tint: Color::new(1.0, 0.6, 0.3),
                    intensity: 2.0,
                    range: 8.0,
                    position: Vec3::new(-2.0, 2.0, -1.0),
                    ..Default::default()
                },
            ],
            objects: vec![
                ObjectDesc {
                    name: "floor".to_string(),
                    primitive: Primitive::Quad,
                    size: 8.0,
                    position: Vec3::new(0.0, -1.0, 0.0),
                    rotation: Vec3::new(0.0, 90.0, 0.0),
                    diffuse: Color::new(0.5, 0.55, 0.5),
                    ..Default::default()
                },
                ObjectDesc {
                    name: "cube".to_string(),
                    primitive: Primitive::Cube,
                    size: 1.5,
                    checkerboard: true,
                    specular: Color::new(0.6, 0.6, 0.6),
                    shininess: 0.25,
                    spin: Vec3::new(40.0, 25.0, 0.0),
                    ..Default::default()
                },
                ObjectDesc {
                    name: "moon".to_string(),
                    primitive: Primitive::Cube,
                    size: 0.4,
                    position: Vec3::new(1.8, 0.5, 0.0),
                    parent: Some(1),
                    diffuse: Color::new(0.4, 0.6, 1.0),
                    emission: Color::new(0.05, 0.05, 0.15),
                    ..Default::default()
                },
            ],
        }
    }

    /// Build a runtime scene. Texture paths resolve against `base_dir`;
    /// textures that fail to load are replaced by a checkerboard.
    pub fn instantiate(&self, base_dir: &Path) -> Scene {
        let mut scene = Scene::new();
        scene.ambient = self.ambient;

        let cam = &self.camera;
        let cam_id = scene.transforms.insert(Transform::new(
            cam.position,
            rotation_from_degrees(cam.rotation),
            Vec3::ONE,
        ));
        scene.camera = Camera::new(cam_id);
        match cam.projection {
            Projection::Perspective => scene.camera.set_perspective(cam.fov.to_radians(), cam.near, cam.far),
            Projection::Orthographic => scene.camera.set_orthographic_size(cam.ortho_size, cam.near, cam.far),
        }

        for l in &self.lights {
            let id = scene.transforms.insert(Transform::new(l.position, rotation_from_degrees(l.rotation), Vec3::ONE));
            let light = match l.kind {
                LightKind::Directional => Light::directional(id, l.tint, l.intensity),
                LightKind::Point => Light::point(id, l.tint, l.intensity, l.range),
                LightKind::Spot => Light::spot(id, l.tint, l.intensity, l.range),
            };
            scene.lights.push(light);
        }

        let checker = Rc::new(Texture::checkerboard(32, 32, Color::WHITE, Color::new(0.8, 0.2, 0.2)));

        for obj in &self.objects {
            let id = scene.transforms.insert(Transform::new(obj.position, rotation_from_degrees(obj.rotation), obj.scale));

            let mesh = match obj.primitive {
                Primitive::Triangle => Mesh::triangle(),
                Primitive::Quad => Mesh::quad(obj.size),
                Primitive::Cube => Mesh::cube(obj.size),
            };

            let mut material = Material::new(obj.diffuse)
                .with_specular(obj.specular, obj.shininess)
                .with_emission(obj.emission);
            if let Some(path) = &obj.texture {
                match Texture::from_file(base_dir.join(path), obj.filter) {
                    Ok(tex) => material = material.with_texture(Rc::new(tex)),
                    Err(e) => {
                        log::warn!("Failed to load texture {}: {}", path, e);
                        material = material.with_texture(checker.clone());
                    }
                }
            } else if obj.checkerboard {
                let mut tex = (*checker).clone();
                tex.filter = obj.filter;
                material = material.with_texture(Rc::new(tex));
            }

            scene.objects.push(SceneObject {
                name: obj.name.clone(),
                transform: id,
                mesh,
                material,
                spin: Vec3::new(obj.spin.x.to_radians(), obj.spin.y.to_radians(), obj.spin.z.to_radians()),
            });
        }

        // Parent links refer to object indices; resolve once every object exists
        for (i, obj) in self.objects.iter().enumerate() {
            let Some(parent) = obj.parent else { continue };
            match scene.objects.get(parent) {
                Some(p) if parent != i => {
                    let parent_id = p.transform;
                    scene.transforms.set_parent(scene.objects[i].transform, Some(parent_id));
                }
                _ => log::warn!("Object {} has invalid parent {}", i, parent),
            }
        }

        log::info!(
            "Scene ready: {} objects, {} lights",
            scene.objects.len(),
            scene.lights.len()
        );
        scene
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rasterizer::{blinn_phong, DiffuseTerm, PreparedLight, ShadingInput};

    #[test]
    fn test_demo_instantiates() {
        let scene = SceneDesc::demo().instantiate(Path::new("."));
        assert_eq!(scene.objects.len(), 3);
        assert_eq!(scene.lights.len(), 2);
        assert!(scene.objects[1].material.texture.is_some());

        // Moon is parented to the cube
        let moon = scene.transforms.get(scene.objects[2].transform).unwrap();
        assert_eq!(moon.parent, Some(scene.objects[1].transform));
    }

    #[test]
    fn test_demo_sun_lights_from_above() {
        let scene = SceneDesc::demo().instantiate(Path::new("."));
        let sun = PreparedLight::new(&scene.lights[0], &scene.transforms);
        assert!(sun.direction.y > 0.0, "toward-light direction {:?}", sun.direction);

        // An up-facing floor point gets more than ambient under Lambert diffuse
        let input = ShadingInput {
            position: Vec3::new(0.0, -1.0, 0.0),
            normal: Vec3::UP,
            diffuse: Color::WHITE,
            specular: Color::BLACK,
            ambient: scene.ambient,
            shininess: 0.5,
            camera_position: scene.camera.position(&scene.transforms),
        };
        let lit = blinn_phong(&input, &[sun], DiffuseTerm::Lambert);
        assert!(lit.r > scene.ambient.r + 0.1);
    }

    #[test]
    fn test_missing_texture_falls_back() {
        let desc = SceneDesc {
            objects: vec![ObjectDesc {
                texture: Some("does/not/exist.png".to_string()),
                ..Default::default()
            }],
            ..Default::default()
        };
        let scene = desc.instantiate(Path::new("."));
        let tex = scene.objects[0].material.texture.as_ref().unwrap();
        assert_eq!(tex.name, "checkerboard");
    }

    #[test]
    fn test_self_parent_ignored() {
        let desc = SceneDesc {
            objects: vec![ObjectDesc { parent: Some(0), ..Default::default() }],
            ..Default::default()
        };
        let scene = desc.instantiate(Path::new("."));
        assert_eq!(scene.transforms.get(scene.objects[0].transform).unwrap().parent, None);
    }

    #[test]
    fn test_orthographic_camera_desc() {
        let desc = SceneDesc {
            camera: CameraDesc {
                projection: Projection::Orthographic,
                ortho_size: 4.0,
                ..Default::default()
            },
            ..Default::default()
        };
        let scene = desc.instantiate(Path::new("."));
        assert_eq!(scene.camera.projection, Projection::Orthographic);
        assert_eq!(scene.camera.top, 4.0);
        assert!(scene.camera.auto_width);
    }
}
