//! Engine and viewer settings

use crate::math::Color;
use crate::rasterizer::{RenderSettings, HEIGHT, WIDTH};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub window_width: i32,
    pub window_height: i32,
    /// Internal software framebuffer resolution
    pub render_width: usize,
    pub render_height: usize,
    pub clear_color: Color,
    /// Overrides the scene's ambient color when set
    pub ambient: Option<Color>,
    /// One of off/error/warn/info/debug/trace
    pub log_level: String,
    pub settings: RenderSettings,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            window_width: WIDTH as i32 * 3,
            window_height: HEIGHT as i32 * 3,
            render_width: WIDTH,
            render_height: HEIGHT,
            clear_color: Color::new(0.12, 0.12, 0.14),
            ambient: None,
            log_level: "info".to_string(),
            settings: RenderSettings::default(),
        }
    }
}

impl EngineConfig {
    /// Parsed log level (falls back to Info)
    pub fn log_level_filter(&self) -> log::LevelFilter {
        self.log_level.parse().unwrap_or(log::LevelFilter::Info)
    }
}
