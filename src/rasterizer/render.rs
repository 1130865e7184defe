//! Core rendering functions
//! Triangle projection, culling, rasterization and shading

use super::error::RenderError;
use super::render_target::RenderTarget;
use super::shading::{blinn_phong, DiffuseTerm, PreparedLight, ShadingInput};
use crate::math::{Color, Mat4, Vec2, Vec3, EPSILON};
use crate::scene::{validate_arrays, Camera, Light, Material, Mesh, TransformArena};
use serde::{Deserialize, Serialize};

/// Rasterizer settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    /// Skip triangles facing away from the camera
    pub backface_culling: bool,
    /// Use the depth buffer (false = last write wins)
    pub depth_test: bool,
    /// Diffuse from `dot(normal, light_dir)` instead of `dot(normal, view_dir)`
    pub lambert_diffuse: bool,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            backface_culling: true,
            depth_test: true,
            lambert_diffuse: false,
        }
    }
}

/// Everything a draw call reads besides the mesh itself
pub struct DrawContext<'a> {
    pub camera: Option<&'a Camera>,
    pub transforms: &'a TransformArena,
    pub target: Option<&'a mut RenderTarget>,
    pub lights: &'a [Light],
    pub ambient: Color,
    pub settings: &'a RenderSettings,
}

/// Counters for one draw call
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DrawStats {
    pub triangles_drawn: usize,
    pub triangles_culled: usize,
    pub pixels_written: usize,
}

/// Draw a mesh with a material
pub fn draw_mesh(
    ctx: &mut DrawContext<'_>,
    local_to_world: &Mat4,
    mesh: &Mesh,
    material: &Material,
) -> Result<DrawStats, RenderError> {
    draw(
        ctx,
        local_to_world,
        &mesh.vertices,
        &mesh.triangles,
        &mesh.normals,
        &mesh.uvs,
        material,
    )
}

/// Projected triangle ready for rasterization
struct Surface {
    /// Texel-space positions
    screen: [Vec2; 3],
    /// Remapped depth (0 = near plane)
    depth: [f32; 3],
    world: [Vec3; 3],
    normals: [Vec3; 3],
    uvs: [Vec2; 3],
}

/// Draw raw mesh arrays.
///
/// Fails without touching the target when there is no camera, no target,
/// or the arrays index out of range. Culled triangles and rejected pixels
/// are skipped silently.
pub fn draw(
    ctx: &mut DrawContext<'_>,
    local_to_world: &Mat4,
    vertices: &[Vec3],
    triangles: &[usize],
    normals: &[Vec3],
    uvs: &[Vec2],
    material: &Material,
) -> Result<DrawStats, RenderError> {
    let result = draw_checked(ctx, local_to_world, vertices, triangles, normals, uvs, material);
    match &result {
        Ok(stats) => log::debug!(
            "draw: {} drawn, {} culled, {} pixels",
            stats.triangles_drawn,
            stats.triangles_culled,
            stats.pixels_written
        ),
        Err(e) => log::warn!("draw rejected: {}", e),
    }
    result
}

fn draw_checked(
    ctx: &mut DrawContext<'_>,
    local_to_world: &Mat4,
    vertices: &[Vec3],
    triangles: &[usize],
    normals: &[Vec3],
    uvs: &[Vec2],
    material: &Material,
) -> Result<DrawStats, RenderError> {
    let camera = ctx.camera.ok_or(RenderError::NoCamera)?;
    let target = ctx.target.as_deref_mut().ok_or(RenderError::NoRenderTarget)?;
    validate_arrays(vertices, triangles, normals, uvs)?;

    let mut stats = DrawStats::default();
    let width = target.get_width();
    let height = target.get_height();
    if width == 0 || height == 0 {
        return Ok(stats);
    }

    let transforms = ctx.transforms;
    let settings = ctx.settings;
    let camera_position = camera.position(transforms);
    let view_projection = camera.calculate_projection_matrix(target.aspect()) * camera.get_view_matrix(transforms);
    let lights: Vec<PreparedLight> = ctx.lights.iter().map(|l| PreparedLight::new(l, transforms)).collect();
    let diffuse_term = if settings.lambert_diffuse { DiffuseTerm::Lambert } else { DiffuseTerm::ViewFacing };
    let ambient = ctx.ambient;

    let shade = |position: Vec3, normal: Vec3, uv: Vec2| -> Color {
        let mut diffuse = material.diffuse;
        if let Some(tex) = &material.texture {
            diffuse = diffuse * tex.sample(uv.x, uv.y);
        }
        let input = ShadingInput {
            position,
            normal,
            diffuse,
            specular: material.specular,
            ambient,
            shininess: material.shininess,
            camera_position,
        };
        (blinn_phong(&input, &lights, diffuse_term) + material.emission).with_a(diffuse.a)
    };

    let (frame, depth) = target.buffers_mut();
    let viewport = Vec2::new(width as f32, height as f32);

    for tri in triangles.chunks_exact(3) {
        let idx = [tri[0], tri[1], tri[2]];

        // World transform (three distinct normals)
        let world = idx.map(|i| local_to_world.transform_point(vertices[i]));
        let world_normals = idx.map(|i| local_to_world.transform_vector(normals[i]));

        // Projection; reject anything at or behind the camera plane
        let clip = world.map(|p| view_projection.mul_vec4(p.extend(1.0)));
        if clip.iter().any(|c| c.w <= EPSILON) {
            stats.triangles_culled += 1;
            continue;
        }
        let ndc = clip.map(|c| Vec3::new(c.x / c.w, c.y / c.w, c.z / c.w));

        // Cheap frustum test: at least one vertex inside the viewport
        let inside = |p: &Vec3| (-1.0..=1.0).contains(&p.x) && (-1.0..=1.0).contains(&p.y);
        if !ndc.iter().any(inside) {
            stats.triangles_culled += 1;
            continue;
        }

        // Back-face cull in world space
        if settings.backface_culling {
            let face_normal = (world[1] - world[0]).cross(world[2] - world[0]);
            let centroid = (world[0] + world[1] + world[2]) / 3.0;
            if face_normal.dot(centroid - camera_position) > 0.0 {
                stats.triangles_culled += 1;
                continue;
            }
        }

        let surface = Surface {
            screen: ndc.map(|p| (Vec2::new(p.x, p.y) + Vec2::ONE) * 0.5 * viewport),
            depth: ndc.map(|p| p.z * 0.5 + 0.5),
            world,
            normals: world_normals,
            uvs: idx.map(|i| uvs[i]),
        };

        match rasterize_triangle(frame, depth, width, height, &surface, settings.depth_test, &shade) {
            Some(written) => {
                stats.triangles_drawn += 1;
                stats.pixels_written += written;
            }
            None => stats.triangles_culled += 1,
        }
    }

    Ok(stats)
}

/// Barycentric weights of `p` from twice-area ratios.
/// `area` is the signed double area of the whole triangle.
fn barycentric(p: Vec2, s: &[Vec2; 3], area: f32) -> [f32; 3] {
    [
        (s[1] - p).perp_dot(s[2] - p) / area,
        (s[2] - p).perp_dot(s[0] - p) / area,
        (s[0] - p).perp_dot(s[1] - p) / area,
    ]
}

/// Rasterize a single triangle. Returns the number of pixels written,
/// or `None` for a degenerate (zero-area) triangle.
fn rasterize_triangle<F>(
    frame: &mut [Color],
    depth: &mut [Color],
    width: usize,
    height: usize,
    surface: &Surface,
    depth_test: bool,
    shade: &F,
) -> Option<usize>
where
    F: Fn(Vec3, Vec3, Vec2) -> Color,
{
    let s = &surface.screen;
    let area = (s[1] - s[0]).perp_dot(s[2] - s[0]);
    if area.abs() < f32::EPSILON {
        return None;
    }

    // Bounding box, clamped to the target
    let min_x = s[0].x.min(s[1].x).min(s[2].x).floor().max(0.0) as i64;
    let min_y = s[0].y.min(s[1].y).min(s[2].y).floor().max(0.0) as i64;
    let max_x = (s[0].x.max(s[1].x).max(s[2].x).floor() as i64).min(width as i64 - 1);
    let max_y = (s[0].y.max(s[1].y).max(s[2].y).floor() as i64).min(height as i64 - 1);

    let mut written = 0;
    for y in min_y..=max_y {
        for x in min_x..=max_x {
            let p = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
            let bc = barycentric(p, s, area);
            if bc.iter().any(|&w| w < 0.0) {
                continue;
            }

            let z = bc[0] * surface.depth[0] + bc[1] * surface.depth[1] + bc[2] * surface.depth[2];
            let idx = x as usize + (height - 1 - y as usize) * width;
            if depth_test && z >= depth[idx].r {
                continue;
            }

            let position = surface.world[0] * bc[0] + surface.world[1] * bc[1] + surface.world[2] * bc[2];
            let normal = surface.normals[0] * bc[0] + surface.normals[1] * bc[1] + surface.normals[2] * bc[2];
            let uv = surface.uvs[0] * bc[0] + surface.uvs[1] * bc[1] + surface.uvs[2] * bc[2];

            frame[idx] = shade(position, normal, uv);
            depth[idx].r = z;
            written += 1;
        }
    }

    Some(written)
}
