//! Config and scene loading and saving

use std::fs;
use std::path::Path;
use serde::Serialize;
use super::{EngineConfig, SceneDesc};

/// Error type for config and scene files
///
/// Missing fields are not errors: `EngineConfig` and `SceneDesc` fill them
/// from their defaults, so only unreadable files, malformed RON and values
/// of the wrong type end up here.
#[derive(Debug)]
pub enum ConfigError {
    /// The file could not be read or written
    IoError(std::io::Error),
    /// Malformed RON, with the position of the first bad token
    ParseError(ron::error::SpannedError),
    /// The value could not be written out as RON
    SerializeError(ron::Error),
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::IoError(e)
    }
}

impl From<ron::error::SpannedError> for ConfigError {
    fn from(e: ron::error::SpannedError) -> Self {
        ConfigError::ParseError(e)
    }
}

impl From<ron::Error> for ConfigError {
    fn from(e: ron::Error) -> Self {
        ConfigError::SerializeError(e)
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::IoError(e) => write!(f, "IO error: {}", e),
            ConfigError::ParseError(e) => write!(f, "Parse error: {}", e),
            ConfigError::SerializeError(e) => write!(f, "Serialize error: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {}

fn write_pretty<T: Serialize, P: AsRef<Path>>(value: &T, path: P) -> Result<(), ConfigError> {
    let pretty = ron::ser::PrettyConfig::new()
        .depth_limit(4)
        .indentor("  ".to_string());

    let contents = ron::ser::to_string_pretty(value, pretty)?;
    fs::write(path, contents)?;
    Ok(())
}

/// Load engine settings from a RON file
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<EngineConfig, ConfigError> {
    let contents = fs::read_to_string(path)?;
    load_config_from_str(&contents)
}

/// Save engine settings to a RON file
pub fn save_config<P: AsRef<Path>>(config: &EngineConfig, path: P) -> Result<(), ConfigError> {
    write_pretty(config, path)
}

/// Load engine settings from a RON string
pub fn load_config_from_str(s: &str) -> Result<EngineConfig, ConfigError> {
    Ok(ron::from_str(s)?)
}

pub fn load_scene<P: AsRef<Path>>(path: P) -> Result<SceneDesc, ConfigError> {
    let contents = fs::read_to_string(path)?;
    load_scene_from_str(&contents)
}

pub fn save_scene<P: AsRef<Path>>(scene: &SceneDesc, path: P) -> Result<(), ConfigError> {
    write_pretty(scene, path)
}

pub fn load_scene_from_str(s: &str) -> Result<SceneDesc, ConfigError> {
    Ok(ron::from_str(s)?)
}
