//! Configuration module
//!
//! Uses RON (Rusty Object Notation) for human-readable files:
//! - Engine/viewer settings
//! - Scene descriptions (camera, lights, mesh instances)

mod io;
mod scene;
mod settings;

pub use io::*;
pub use scene::*;
pub use settings::*;
