//! Simplified directional lighting.
//!
//! [`SceneLightingState`] holds the UI-bound light and material scalars.
//! [`LightingStateCalculator`] derives the light-space view-projection each
//! frame. No depth comparison consumes that matrix; it only feeds the
//! shader constants.

use glam::{Mat4, Vec3, Vec4};

/// Distance of the virtual light from the origin along its direction.
pub const LIGHT_DISTANCE: f32 = 30.0;
/// Half-extent of the light's orthographic box.
pub const LIGHT_BOX_SIZE: f32 = 20.0;
/// Light-space near plane.
pub const LIGHT_NEAR: f32 = 0.1;
/// Light-space far plane.
pub const LIGHT_FAR: f32 = 100.0;

/// Light direction used when the configured one has zero length.
const FALLBACK_DIRECTION: Vec3 = Vec3::new(-0.577, -0.577, -0.577);

/// Light and material parameters edited from the UI between frames.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneLightingState {
    /// Direction the light travels (not necessarily normalized).
    pub light_direction: Vec3,
    /// Light color (RGBA).
    pub light_color: Vec4,
    /// Ambient color (RGBA).
    pub ambient_color: Vec4,
    /// Specular exponent.
    pub specular_power: f32,
    /// Specular scale.
    pub specular_intensity: f32,
    /// Mix between the base texture and the instance's secondary texture.
    pub blend_factor: f32,
}

impl Default for SceneLightingState {
    fn default() -> Self {
        Self {
            light_direction: FALLBACK_DIRECTION,
            light_color: Vec4::ONE,
            ambient_color: Vec4::new(0.1, 0.1, 0.1, 1.0),
            specular_power: 32.0,
            specular_intensity: 0.5,
            blend_factor: 0.5,
        }
    }
}

impl SceneLightingState {
    /// Unit-length light direction, falling back to the default diagonal
    /// when the configured vector is degenerate.
    #[must_use]
    pub fn normalized_direction(&self) -> Vec3 {
        self.light_direction
            .normalize_or(FALLBACK_DIRECTION.normalize())
    }
}

/// Orthographic projection for a cube of half-extent `size`.
///
/// Scales X/Y by `1 / size`, maps depth with `2 / (far - near)` and offsets
/// it by `-(far + near) / (far - near)`.
#[must_use]
pub fn orthographic_projection(size: f32, near: f32, far: f32) -> Mat4 {
    let depth = far - near;
    Mat4::from_cols(
        Vec4::new(1.0 / size, 0.0, 0.0, 0.0),
        Vec4::new(0.0, 1.0 / size, 0.0, 0.0),
        Vec4::new(0.0, 0.0, 2.0 / depth, 0.0),
        Vec4::new(0.0, 0.0, -(far + near) / depth, 1.0),
    )
}

/// Derives the light-space matrix from the light direction.
#[derive(Debug, Clone, Copy, Default)]
pub struct LightingStateCalculator;

impl LightingStateCalculator {
    /// Virtual light position: opposite the light direction, at
    /// [`LIGHT_DISTANCE`].
    #[must_use]
    pub fn light_position(direction: Vec3) -> Vec3 {
        -direction * LIGHT_DISTANCE
    }

    /// Light view-projection: translate by the negated light position, then
    /// project orthographically.
    #[must_use]
    pub fn light_view_projection(direction: Vec3) -> Mat4 {
        let view = Mat4::from_translation(-Self::light_position(direction));
        orthographic_projection(LIGHT_BOX_SIZE, LIGHT_NEAR, LIGHT_FAR) * view
    }

    /// Pack the frame's lighting constants.
    #[must_use]
    pub fn uniform(state: &SceneLightingState, eye: Vec3) -> LightingUniform {
        let direction = state.normalized_direction();
        LightingUniform {
            light_view_proj: Self::light_view_projection(direction)
                .to_cols_array_2d(),
            light_dir: direction.extend(0.0).to_array(),
            light_color: state.light_color.to_array(),
            ambient_color: state.ambient_color.to_array(),
            camera_pos: eye.extend(1.0).to_array(),
            blend_factor: state.blend_factor,
            specular_power: state.specular_power,
            specular_intensity: state.specular_intensity,
            _pad: 0.0,
        }
    }
}

/// Per-frame lighting constants shared by the floor and mobile shaders.
/// NOTE: Must match the WGSL `Lighting` struct layout exactly (144 bytes)
///
/// WGSL layout:
///   light_view_proj: mat4x4<f32>  (offset 0)
///   light_dir: vec4<f32>          (offset 64)
///   light_color: vec4<f32>        (offset 80)
///   ambient_color: vec4<f32>      (offset 96)
///   camera_pos: vec4<f32>         (offset 112)
///   blend_factor: f32             (offset 128)
///   specular_power: f32           (offset 132)
///   specular_intensity: f32       (offset 136)
///   _pad: f32                     (offset 140)
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LightingUniform {
    /// Light view-projection, column-major.
    pub light_view_proj: [[f32; 4]; 4],
    /// Normalized light direction, w = 0.
    pub light_dir: [f32; 4],
    /// Light color.
    pub light_color: [f32; 4],
    /// Ambient color.
    pub ambient_color: [f32; 4],
    /// Eye position, w = 1.
    pub camera_pos: [f32; 4],
    /// Texture blend factor.
    pub blend_factor: f32,
    /// Specular exponent.
    pub specular_power: f32,
    /// Specular scale.
    pub specular_intensity: f32,
    pub(crate) _pad: f32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniform_is_144_bytes() {
        assert_eq!(size_of::<LightingUniform>(), 144);
    }

    #[test]
    fn orthographic_matches_manual_form() {
        let m = orthographic_projection(20.0, 0.1, 100.0);
        assert_eq!(m.x_axis.x, 1.0 / 20.0);
        assert_eq!(m.y_axis.y, 1.0 / 20.0);
        assert!((m.z_axis.z - 2.0 / 99.9).abs() < 1e-7);
        assert!((m.w_axis.z + 100.1 / 99.9).abs() < 1e-6);
        assert_eq!(m.w_axis.w, 1.0);
        assert_eq!(m.x_axis.w, 0.0);
    }

    #[test]
    fn orthographic_maps_near_and_far() {
        let m = orthographic_projection(5.0, 1.0, 3.0);
        let near = m.project_point3(Vec3::new(5.0, -5.0, 1.0));
        let far = m.project_point3(Vec3::new(0.0, 0.0, 3.0));
        assert!(near.abs_diff_eq(Vec3::new(1.0, -1.0, -1.0), 1e-6));
        assert!((far.z - 1.0).abs() < 1e-6);
    }

    #[test]
    fn light_sits_opposite_its_direction() {
        let dir = Vec3::new(0.0, -1.0, 0.0);
        assert_eq!(
            LightingStateCalculator::light_position(dir),
            Vec3::new(0.0, 30.0, 0.0)
        );
        // The light position maps to the box center in X/Y.
        let vp = LightingStateCalculator::light_view_projection(dir);
        let p = vp.project_point3(Vec3::new(0.0, 30.0, 0.0));
        assert!(p.x.abs() < 1e-6 && p.y.abs() < 1e-6);
    }

    #[test]
    fn zero_direction_falls_back() {
        let state = SceneLightingState {
            light_direction: Vec3::ZERO,
            ..SceneLightingState::default()
        };
        let dir = state.normalized_direction();
        assert!((dir.length() - 1.0).abs() < 1e-6);
        assert!(dir.x < 0.0 && dir.y < 0.0 && dir.z < 0.0);
    }

    #[test]
    fn uniform_carries_eye_and_material() {
        let state = SceneLightingState::default();
        let u = LightingStateCalculator::uniform(&state, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(u.camera_pos, [1.0, 2.0, 3.0, 1.0]);
        assert_eq!(u.light_dir[3], 0.0);
        assert_eq!(u.specular_power, 32.0);
        assert_eq!(u.blend_factor, 0.5);
    }
}
