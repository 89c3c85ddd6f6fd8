use glam::{Mat4, Vec3};

use super::params::{
    clamp_to, CameraParams, DISTANCE_PER_WHEEL_STEP, DRAG_SENSITIVITY,
    FREE_ZOOM_IN_FACTOR, FREE_ZOOM_OUT_FACTOR, FREE_ZOOM_WHEEL_RANGE,
    ORBIT_DISTANCE_RANGE, PAN_ZOOM_RANGE, ZOOM_PER_WHEEL_STEP,
};

/// Fixed tilt of the pan-zoom camera (radians about X).
const PAN_ZOOM_TILT: f32 = -0.8;
/// Pan-zoom camera pull-back along Z.
const PAN_ZOOM_DEPTH: f32 = 20.0;

/// Eye position used when no window holds the pointer.
pub const DEFAULT_EYE: Vec3 = Vec3::new(0.0, 0.0, PAN_ZOOM_DEPTH);

/// Camera behavior bound to a window slot.
///
/// The view formulas are written left to right in the order the transforms
/// apply to a point (pan-zoom: pan, zoom, tilt, pull-back). glam composes
/// right to left, so the products below read reversed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CameraKind {
    /// Screen-plane pan with uniform zoom over a fixed tilted view.
    PanZoom,
    /// Yaw/pitch orbit at a variable distance, Y-flipped.
    Orbital,
    /// Free-look rotation, uniform scale and position.
    Free,
}

impl CameraKind {
    /// Window slot → camera kind mapping.
    pub const SLOTS: [Self; 3] = [Self::PanZoom, Self::Orbital, Self::Free];

    /// Build the view matrix for `params`.
    ///
    /// Pure: the result depends on `params` alone.
    #[must_use]
    pub fn compute(self, params: &CameraParams) -> Mat4 {
        match self {
            Self::PanZoom => {
                Mat4::from_translation(Vec3::new(0.0, 0.0, PAN_ZOOM_DEPTH))
                    * Mat4::from_rotation_x(PAN_ZOOM_TILT)
                    * Mat4::from_scale(Vec3::splat(params.zoom))
                    * Mat4::from_translation(params.pan.extend(0.0))
            }
            Self::Orbital => {
                Mat4::from_scale(Vec3::new(1.0, -1.0, 1.0))
                    * Mat4::from_rotation_y(params.orbit_yaw)
                    * Mat4::from_rotation_x(params.orbit_pitch)
                    * Mat4::from_translation(Vec3::new(
                        0.0,
                        0.0,
                        -params.orbit_distance,
                    ))
            }
            Self::Free => {
                Mat4::from_translation(-params.free_position)
                    * Mat4::from_scale(Vec3::splat(params.free_zoom))
                    * Mat4::from_rotation_x(params.free_pitch)
                    * Mat4::from_rotation_y(params.free_yaw)
                    * Mat4::from_rotation_z(params.free_roll)
            }
        }
    }

    /// World-space eye position used for specular lighting.
    #[must_use]
    pub fn eye_position(self, params: &CameraParams) -> Vec3 {
        match self {
            Self::PanZoom => Vec3::new(
                params.pan.x,
                params.pan.y,
                PAN_ZOOM_DEPTH / params.zoom,
            ),
            Self::Orbital => {
                let (sin_yaw, cos_yaw) = params.orbit_yaw.sin_cos();
                let (sin_pitch, cos_pitch) = params.orbit_pitch.sin_cos();
                let dir = Vec3::new(
                    -sin_yaw * cos_pitch,
                    -sin_pitch,
                    -cos_yaw * cos_pitch,
                );
                -dir * params.orbit_distance
            }
            Self::Free => params.free_position,
        }
    }

    /// Apply a captured pointer drag of `(dx, dy)` pixels.
    pub fn apply_drag(self, params: &mut CameraParams, dx: f32, dy: f32) {
        match self {
            Self::PanZoom => {
                params.pan.x += dx * DRAG_SENSITIVITY;
                // Screen Y grows downward.
                params.pan.y -= dy * DRAG_SENSITIVITY;
            }
            Self::Orbital => {
                params.orbit_yaw += dx * DRAG_SENSITIVITY;
                params.orbit_pitch += dy * DRAG_SENSITIVITY;
            }
            Self::Free => {
                if dx != 0.0 {
                    params.free_yaw += dx * DRAG_SENSITIVITY;
                }
                if dy != 0.0 {
                    params.free_pitch += dy * DRAG_SENSITIVITY;
                }
            }
        }
    }

    /// Apply `steps` wheel notches. Zero steps leave `params` untouched.
    pub fn apply_wheel(self, params: &mut CameraParams, steps: f32) {
        if steps == 0.0 {
            return;
        }
        match self {
            Self::PanZoom => {
                params.zoom = clamp_to(
                    params.zoom + steps * ZOOM_PER_WHEEL_STEP,
                    PAN_ZOOM_RANGE,
                );
            }
            Self::Orbital => {
                params.orbit_distance = clamp_to(
                    params.orbit_distance - steps * DISTANCE_PER_WHEEL_STEP,
                    ORBIT_DISTANCE_RANGE,
                );
            }
            Self::Free => {
                let factor = if steps > 0.0 {
                    FREE_ZOOM_IN_FACTOR
                } else {
                    FREE_ZOOM_OUT_FACTOR
                };
                params.free_zoom =
                    clamp_to(params.free_zoom * factor, FREE_ZOOM_WHEEL_RANGE);
            }
        }
    }

    /// Reset the field group this kind reads.
    pub fn reset(self, params: &mut CameraParams) {
        match self {
            Self::PanZoom => params.reset_pan_zoom(),
            Self::Orbital => params.reset_orbital(),
            Self::Free => params.reset_free(),
        }
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec4;

    use super::*;

    #[test]
    fn compute_is_pure() {
        let params = CameraParams::default();
        for kind in CameraKind::SLOTS {
            let a = kind.compute(&params);
            let b = kind.compute(&params);
            assert_eq!(a.to_cols_array(), b.to_cols_array());
        }
    }

    #[test]
    fn pan_zoom_default_pulls_origin_back() {
        let view = CameraKind::PanZoom.compute(&CameraParams::default());
        let origin = view * Vec4::new(0.0, 0.0, 0.0, 1.0);
        assert!(origin
            .truncate()
            .abs_diff_eq(Vec3::new(0.0, 0.0, 20.0), 1e-5));
    }

    #[test]
    fn pan_applies_before_tilt() {
        let params = CameraParams {
            pan: glam::Vec2::new(1.0, 0.0),
            ..CameraParams::default()
        };
        let view = CameraKind::PanZoom.compute(&params);
        // Pan along X is unaffected by the X-axis tilt.
        let p = view * Vec4::new(0.0, 0.0, 0.0, 1.0);
        assert!(p.truncate().abs_diff_eq(Vec3::new(1.0, 0.0, 20.0), 1e-5));
    }

    #[test]
    fn orbital_flips_y_last() {
        let params = CameraParams {
            orbit_yaw: 0.0,
            orbit_pitch: 0.0,
            orbit_distance: 10.0,
            ..CameraParams::default()
        };
        let view = CameraKind::Orbital.compute(&params);
        let p = view * Vec4::new(0.0, 1.0, 0.0, 1.0);
        assert!(p.truncate().abs_diff_eq(Vec3::new(0.0, -1.0, -10.0), 1e-5));
    }

    #[test]
    fn free_translates_after_scale() {
        let params = CameraParams {
            free_position: Vec3::new(1.0, 2.0, 3.0),
            free_yaw: 0.0,
            free_pitch: 0.0,
            free_roll: 0.0,
            free_zoom: 0.5,
            ..CameraParams::default()
        };
        let view = CameraKind::Free.compute(&params);
        let p = view * Vec4::new(2.0, 2.0, 2.0, 1.0);
        assert!(p.truncate().abs_diff_eq(Vec3::new(0.0, -1.0, -2.0), 1e-5));
    }

    #[test]
    fn wheel_clamps_hold_for_long_sequences() {
        let mut params = CameraParams::default();
        let deltas = [3.0, -7.0, 120.0, -500.0, 1.0, 1.0, -1.0, 64.0];
        for _ in 0..50 {
            for &d in &deltas {
                for kind in CameraKind::SLOTS {
                    kind.apply_wheel(&mut params, d);
                }
                assert!((0.1..=5.0).contains(&params.zoom));
                assert!((5.0..=40.0).contains(&params.orbit_distance));
                assert!((0.001..=0.1).contains(&params.free_zoom));
            }
        }
    }

    #[test]
    fn free_wheel_clamps_initial_scale_into_wheel_range() {
        let mut params = CameraParams::default();
        assert_eq!(params.free_zoom, 0.226);
        CameraKind::Free.apply_wheel(&mut params, -1.0);
        assert_eq!(params.free_zoom, 0.1);
    }

    #[test]
    fn zero_wheel_is_ignored() {
        let mut params = CameraParams::default();
        CameraKind::Free.apply_wheel(&mut params, 0.0);
        assert_eq!(params, CameraParams::default());
    }

    #[test]
    fn pan_drag_inverts_vertical_axis() {
        let mut params = CameraParams::default();
        CameraKind::PanZoom.apply_drag(&mut params, 10.0, 20.0);
        assert!((params.pan.x - 0.1).abs() < 1e-6);
        assert!((params.pan.y + 0.2).abs() < 1e-6);
    }

    #[test]
    fn orbital_eye_sits_at_distance() {
        let params = CameraParams {
            orbit_yaw: 0.7,
            orbit_pitch: -0.3,
            orbit_distance: 12.0,
            ..CameraParams::default()
        };
        let eye = CameraKind::Orbital.eye_position(&params);
        assert!((eye.length() - 12.0).abs() < 1e-4);
    }

    #[test]
    fn reset_touches_only_own_group() {
        let mut params = CameraParams {
            zoom: 3.0,
            orbit_distance: 33.0,
            ..CameraParams::default()
        };
        CameraKind::Orbital.reset(&mut params);
        assert_eq!(params.orbit_distance, 20.0);
        assert_eq!(params.zoom, 3.0);
    }
}
