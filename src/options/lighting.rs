use glam::{Vec3, Vec4};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::lighting::SceneLightingState;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Lighting", inline)]
#[serde(default)]
/// Directional light and material parameters.
pub struct LightingOptions {
    /// Direction the light travels. Normalized before use.
    #[schemars(title = "Light Direction", range(min = -1.0, max = 1.0), extend("step" = 0.01))]
    pub light_direction: [f32; 3],
    /// Light color (RGBA).
    #[schemars(title = "Light Color", range(min = 0.0, max = 1.0), extend("step" = 0.01))]
    pub light_color: [f32; 4],
    /// Ambient color (RGBA).
    #[schemars(title = "Ambient Color", range(min = 0.0, max = 1.0), extend("step" = 0.01))]
    pub ambient_color: [f32; 4],
    /// Specular exponent.
    #[schemars(title = "Specular Power", range(min = 1.0, max = 128.0), extend("step" = 1.0))]
    pub specular_power: f32,
    /// Specular scale.
    #[schemars(title = "Specular Intensity", range(min = 0.0, max = 1.0), extend("step" = 0.01))]
    pub specular_intensity: f32,
    /// Base / secondary texture mix.
    #[schemars(title = "Texture Blend", range(min = 0.0, max = 1.0), extend("step" = 0.01))]
    pub blend_factor: f32,
}

impl Default for LightingOptions {
    fn default() -> Self {
        Self::from_state(&SceneLightingState::default())
    }
}

fn clamp_each<const N: usize>(v: [f32; N], min: f32, max: f32) -> [f32; N] {
    v.map(|c| c.clamp(min, max))
}

impl LightingOptions {
    /// Snapshot the lighting state.
    #[must_use]
    pub fn from_state(state: &SceneLightingState) -> Self {
        Self {
            light_direction: state.light_direction.to_array(),
            light_color: state.light_color.to_array(),
            ambient_color: state.ambient_color.to_array(),
            specular_power: state.specular_power,
            specular_intensity: state.specular_intensity,
            blend_factor: state.blend_factor,
        }
    }

    /// Clamp every field to its slider range.
    #[must_use]
    pub fn clamped(&self) -> Self {
        Self {
            light_direction: clamp_each(self.light_direction, -1.0, 1.0),
            light_color: clamp_each(self.light_color, 0.0, 1.0),
            ambient_color: clamp_each(self.ambient_color, 0.0, 1.0),
            specular_power: self.specular_power.clamp(1.0, 128.0),
            specular_intensity: self.specular_intensity.clamp(0.0, 1.0),
            blend_factor: self.blend_factor.clamp(0.0, 1.0),
        }
    }

    /// Write the fields into `state`.
    pub fn apply(&self, state: &mut SceneLightingState) {
        state.light_direction = Vec3::from_array(self.light_direction);
        state.light_color = Vec4::from_array(self.light_color);
        state.ambient_color = Vec4::from_array(self.ambient_color);
        state.specular_power = self.specular_power;
        state.specular_intensity = self.specular_intensity;
        state.blend_factor = self.blend_factor;
    }
}
