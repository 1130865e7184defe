//! softgl viewer
//!
//! Renders a scene with the CPU rasterizer at a low internal resolution
//! and blits the result to a macroquad window.
//!
//! Usage: softgl-viewer [scene.ron]
//! Settings are read from `softgl.ron` in the working directory.

use macroquad::prelude::*;
use softgl::config::{load_config, load_scene, EngineConfig, SceneDesc};
use softgl::rasterizer::{RenderTarget, Renderer, SoftwareRenderer};
use softgl::VERSION;
use std::path::{Path, PathBuf};

const CONFIG_PATH: &str = "softgl.ron";
const ORBIT_SPEED: f32 = 1.5;
const ZOOM_STEP: f32 = 0.1;

/// Minimal stdout logger for the `log` facade
struct StdoutLogger;

impl log::Log for StdoutLogger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &log::Record) {
        if self.enabled(record.metadata()) {
            println!("[{}] {}: {}", record.level(), record.target(), record.args());
        }
    }

    fn flush(&self) {}
}

static LOGGER: StdoutLogger = StdoutLogger;

fn engine_config() -> EngineConfig {
    if Path::new(CONFIG_PATH).exists() {
        match load_config(CONFIG_PATH) {
            Ok(config) => return config,
            Err(e) => println!("Failed to load {}: {}, using defaults", CONFIG_PATH, e),
        }
    }
    EngineConfig::default()
}

fn window_conf() -> Conf {
    let config = engine_config();
    Conf {
        window_title: format!("softgl viewer v{}", VERSION),
        window_width: config.window_width,
        window_height: config.window_height,
        window_resizable: true,
        high_dpi: true,
        ..Default::default()
    }
}

fn scene_desc() -> (SceneDesc, PathBuf) {
    let Some(arg) = std::env::args().nth(1) else {
        return (SceneDesc::demo(), PathBuf::from("."));
    };
    let path = PathBuf::from(arg);
    let base_dir = path.parent().map(Path::to_path_buf).unwrap_or_else(|| PathBuf::from("."));
    match load_scene(&path) {
        Ok(desc) => {
            log::info!("Loaded scene {}", path.display());
            (desc, base_dir)
        }
        Err(e) => {
            log::warn!("Failed to load scene {}: {}, using demo scene", path.display(), e);
            (SceneDesc::demo(), base_dir)
        }
    }
}

/// Orbit state around the world origin, derived from the scene camera.
/// Triangles with a vertex behind the camera plane are dropped whole, so
/// large ground planes lose triangles once the orbit passes over them.
struct Orbit {
    yaw: f32,
    pitch: f32,
    distance: f32,
}

impl Orbit {
    fn from_camera(position: softgl::math::Vec3, forward: softgl::math::Vec3) -> Self {
        Self {
            yaw: forward.x.atan2(forward.z),
            pitch: (-forward.y).clamp(-1.0, 1.0).asin(),
            distance: position.len().max(0.5),
        }
    }

    fn rotation(&self) -> softgl::math::Quat {
        softgl::math::Quat::from_euler(self.yaw, self.pitch, 0.0)
    }

    fn position(&self) -> softgl::math::Vec3 {
        -(self.rotation().rotate(softgl::math::Vec3::FORWARD) * self.distance)
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    let config = engine_config();
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(config.log_level_filter());
    }
    log::info!("=== softgl viewer v{} ===", VERSION);

    let (desc, base_dir) = scene_desc();
    let mut scene = desc.instantiate(&base_dir);
    if let Some(ambient) = config.ambient {
        scene.ambient = ambient;
    }

    let mut renderer = SoftwareRenderer::new(config.settings.clone());
    renderer.bind_target(Some(RenderTarget::new(config.render_width, config.render_height)));

    let cam_id = scene.camera.transform;
    let mut orbit = cam_id.map(|id| {
        Orbit::from_camera(scene.transforms.global_position(id), scene.transforms.global_forward(id))
    });

    loop {
        let dt = get_frame_time();

        if is_key_pressed(KeyCode::Tab) {
            renderer.settings.lambert_diffuse = !renderer.settings.lambert_diffuse;
            log::info!("Lambert diffuse: {}", renderer.settings.lambert_diffuse);
        }
        if is_key_pressed(KeyCode::B) {
            renderer.settings.backface_culling = !renderer.settings.backface_culling;
            log::info!("Back-face culling: {}", renderer.settings.backface_culling);
        }

        if let (Some(id), Some(orbit)) = (cam_id, orbit.as_mut()) {
            let mut moved = false;
            if is_key_down(KeyCode::Left) {
                orbit.yaw += ORBIT_SPEED * dt;
                moved = true;
            }
            if is_key_down(KeyCode::Right) {
                orbit.yaw -= ORBIT_SPEED * dt;
                moved = true;
            }
            if is_key_down(KeyCode::Up) {
                orbit.pitch = (orbit.pitch + ORBIT_SPEED * dt).min(1.5);
                moved = true;
            }
            if is_key_down(KeyCode::Down) {
                orbit.pitch = (orbit.pitch - ORBIT_SPEED * dt).max(-1.5);
                moved = true;
            }
            let wheel = mouse_wheel().1;
            if wheel != 0.0 {
                orbit.distance = (orbit.distance * (1.0 - wheel.signum() * ZOOM_STEP)).max(0.5);
                moved = true;
            }
            if moved {
                if let Some(t) = scene.transforms.get_mut(id) {
                    t.position = orbit.position();
                    t.rotation = orbit.rotation();
                }
            }
        }

        scene.update(dt);

        renderer.clear(config.clear_color);
        renderer.clear_depth();
        let stats = scene.render(&mut renderer).unwrap_or_default();

        clear_background(Color::from_rgba(20, 20, 24, 255));

        if let Some(target) = renderer.target() {
            let w = target.get_width();
            let h = target.get_height();
            let pixels = target.to_rgba8();
            let texture = Texture2D::from_rgba8(w as u16, h as u16, &pixels);
            texture.set_filter(FilterMode::Nearest);

            // Fit the framebuffer to the window, keeping its aspect
            let scale = (screen_width() / w as f32).min(screen_height() / h as f32);
            let draw_w = w as f32 * scale;
            let draw_h = h as f32 * scale;
            let draw_x = (screen_width() - draw_w) * 0.5;
            let draw_y = (screen_height() - draw_h) * 0.5;

            draw_texture_ex(
                &texture,
                draw_x,
                draw_y,
                WHITE,
                DrawTextureParams {
                    dest_size: Some(Vec2::new(draw_w, draw_h)),
                    ..Default::default()
                },
            );
        }

        draw_text(
            &format!(
                "tris {} | culled {} | px {} | lambert {} [Tab] | cull {} [B] | {} fps",
                stats.triangles_drawn,
                stats.triangles_culled,
                stats.pixels_written,
                renderer.settings.lambert_diffuse,
                renderer.settings.backface_culling,
                get_fps(),
            ),
            8.0,
            18.0,
            16.0,
            Color::from_rgba(200, 200, 200, 255),
        );

        next_frame().await;
    }
}
