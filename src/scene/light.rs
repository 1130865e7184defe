//! Scene lights

use super::transform::TransformId;
use crate::math::Color;
use serde::{Deserialize, Serialize};

/// Light type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LightKind {
    Directional,
    Point,
    /// Shaded exactly like a point light
    Spot,
}

/// A light placed in the scene by its transform.
/// Directional lights shine along the transform's forward axis.
#[derive(Debug, Clone, Copy)]
pub struct Light {
    pub kind: LightKind,
    pub tint: Color,
    pub intensity: f32,
    /// Cutoff distance for point/spot lights
    pub range: f32,
    pub transform: TransformId,
}

impl Light {
    pub fn directional(transform: TransformId, tint: Color, intensity: f32) -> Self {
        Self {
            kind: LightKind::Directional,
            tint,
            intensity,
            range: f32::INFINITY,
            transform,
        }
    }

    pub fn point(transform: TransformId, tint: Color, intensity: f32, range: f32) -> Self {
        Self {
            kind: LightKind::Point,
            tint,
            intensity,
            range,
            transform,
        }
    }

    pub fn spot(transform: TransformId, tint: Color, intensity: f32, range: f32) -> Self {
        Self {
            kind: LightKind::Spot,
            ..Self::point(transform, tint, intensity, range)
        }
    }
}
