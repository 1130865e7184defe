//! Blinn-Phong lighting

use crate::math::{Color, Vec3};
use crate::scene::{Light, LightKind, TransformArena};

/// A light resolved to world space once per draw call
#[derive(Debug, Clone, Copy)]
pub struct PreparedLight {
    pub kind: LightKind,
    pub position: Vec3,
    /// Direction toward the light (directional lights only)
    pub direction: Vec3,
    /// `tint * intensity`
    pub color: Color,
    pub range: f32,
}

impl PreparedLight {
    pub fn new(light: &Light, transforms: &TransformArena) -> Self {
        Self {
            kind: light.kind,
            position: transforms.global_position(light.transform),
            direction: transforms.global_backward(light.transform),
            color: light.tint * light.intensity,
            range: light.range,
        }
    }
}

/// Which direction feeds the diffuse dot product
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiffuseTerm {
    /// `dot(normal, view_dir)`: the engine's classic look, independent of light placement
    ViewFacing,
    /// `dot(normal, light_dir)`
    Lambert,
}

/// Inputs of one Blinn-Phong evaluation
#[derive(Debug, Clone, Copy)]
pub struct ShadingInput {
    pub position: Vec3,
    pub normal: Vec3,
    pub diffuse: Color,
    pub specular: Color,
    pub ambient: Color,
    /// Material shininess (0..1, scaled by 128)
    pub shininess: f32,
    pub camera_position: Vec3,
}

/// `ambient * diffuse + sum(diffuse_term + specular_term)` over all lights
pub fn blinn_phong(input: &ShadingInput, lights: &[PreparedLight], diffuse_term: DiffuseTerm) -> Color {
    let normal_dir = input.normal.normalize();
    let view_dir = (input.camera_position - input.position).normalize();
    let exponent = input.shininess * 128.0;

    let mut result = input.ambient * input.diffuse;

    for light in lights {
        let (light_dir, light_color, attenuation) = match light.kind {
            LightKind::Directional => (light.direction, light.color, 1.0),
            LightKind::Point | LightKind::Spot => {
                let to_light = light.position - input.position;
                let dist = to_light.len();
                let color = if dist < light.range { light.color } else { Color::CLEAR };
                let attenuation = if dist > 0.0 { 1.0 / dist } else { 1.0 };
                (to_light.normalize(), color, attenuation)
            }
        };

        let facing = match diffuse_term {
            DiffuseTerm::ViewFacing => normal_dir.dot(view_dir),
            DiffuseTerm::Lambert => normal_dir.dot(light_dir),
        };
        result += light_color * input.diffuse * facing.max(0.0) * attenuation;

        if normal_dir.dot(light_dir) >= 0.0 {
            let half = (light_dir + view_dir).normalize();
            let spec = normal_dir.dot(half).max(0.0).powf(exponent);
            result += light_color * input.specular * spec * attenuation;
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input() -> ShadingInput {
        ShadingInput {
            position: Vec3::ZERO,
            normal: Vec3::new(0.0, 0.0, -1.0),
            diffuse: Color::new(0.8, 0.4, 0.2),
            specular: Color::WHITE,
            ambient: Color::new(0.1, 0.2, 0.3),
            shininess: 0.25,
            camera_position: Vec3::new(0.0, 0.0, -5.0),
        }
    }

    fn directional(direction: Vec3) -> PreparedLight {
        PreparedLight {
            kind: LightKind::Directional,
            position: Vec3::ZERO,
            direction,
            color: Color::WHITE,
            range: f32::INFINITY,
        }
    }

    #[test]
    fn test_no_lights_is_ambient_times_diffuse() {
        let i = input();
        let c = blinn_phong(&i, &[], DiffuseTerm::ViewFacing);
        assert_eq!(c, i.ambient * i.diffuse);
    }

    #[test]
    fn test_view_facing_diffuse_ignores_light_direction() {
        let i = input();
        let toward = blinn_phong(&i, &[directional(Vec3::new(0.0, 0.0, -1.0))], DiffuseTerm::ViewFacing);
        let behind = blinn_phong(&i, &[directional(Vec3::new(0.0, 0.0, 1.0))], DiffuseTerm::ViewFacing);
        // Light from behind: no specular, but the same diffuse
        let base = i.ambient * i.diffuse;
        assert!((behind.r - (base.r + 0.8)).abs() < 1e-5);
        assert!(toward.r > behind.r);
    }

    #[test]
    fn test_lambert_from_behind_is_ambient_only() {
        let i = input();
        let c = blinn_phong(&i, &[directional(Vec3::new(0.0, 0.0, 1.0))], DiffuseTerm::Lambert);
        assert_eq!(c, i.ambient * i.diffuse);
    }

    #[test]
    fn test_point_light_out_of_range_is_dark() {
        let i = input();
        let light = PreparedLight {
            kind: LightKind::Point,
            position: Vec3::new(0.0, 0.0, -10.0),
            direction: Vec3::ZERO,
            color: Color::WHITE,
            range: 5.0,
        };
        let c = blinn_phong(&i, &[light], DiffuseTerm::ViewFacing);
        assert_eq!(c, i.ambient * i.diffuse);
    }

    #[test]
    fn test_point_light_attenuates_with_distance() {
        let i = ShadingInput { specular: Color::BLACK, ambient: Color::BLACK, ..input() };
        let at = |d: f32| PreparedLight {
            kind: LightKind::Point,
            position: Vec3::new(0.0, 0.0, -d),
            direction: Vec3::ZERO,
            color: Color::WHITE,
            range: 100.0,
        };
        let near = blinn_phong(&i, &[at(2.0)], DiffuseTerm::ViewFacing);
        let far = blinn_phong(&i, &[at(4.0)], DiffuseTerm::ViewFacing);
        assert!((near.r - 0.4).abs() < 1e-5);
        assert!((far.r - 0.2).abs() < 1e-5);
    }
}
