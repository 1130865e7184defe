//! Surface material

use crate::math::Color;
use crate::rasterizer::Texture;
use std::rc::Rc;

/// Material: colors plus an optional shared texture
#[derive(Debug, Clone)]
pub struct Material {
    pub texture: Option<Rc<Texture>>,
    pub diffuse: Color,
    pub specular: Color,
    pub emission: Color,
    /// 0..1, multiplied by 128 for the specular exponent
    pub shininess: f32,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            texture: None,
            diffuse: Color::WHITE,
            specular: Color::BLACK,
            emission: Color::BLACK,
            shininess: 0.5,
        }
    }
}

impl Material {
    pub fn new(diffuse: Color) -> Self {
        Self {
            diffuse,
            ..Default::default()
        }
    }

    pub fn with_texture(mut self, texture: Rc<Texture>) -> Self {
        self.texture = Some(texture);
        self
    }

    pub fn with_specular(mut self, specular: Color, shininess: f32) -> Self {
        self.specular = specular;
        self.shininess = shininess;
        self
    }

    pub fn with_emission(mut self, emission: Color) -> Self {
        self.emission = emission;
        self
    }

    /// Specular exponent used by the lighting model
    pub fn specular_exponent(&self) -> f32 {
        self.shininess * 128.0
    }
}
