use glam::{Vec2, Vec3};

/// Wheel-driven zoom range for the pan-zoom camera.
pub const PAN_ZOOM_RANGE: (f32, f32) = (0.1, 5.0);
/// Wheel-driven distance range for the orbital camera.
pub const ORBIT_DISTANCE_RANGE: (f32, f32) = (5.0, 40.0);
/// Wheel-driven view-scale range for the free camera.
///
/// Narrower than the UI slider range (`0.01..=0.5`) for the same field; the
/// two input paths clamp independently.
pub const FREE_ZOOM_WHEEL_RANGE: (f32, f32) = (0.001, 0.1);

/// Pointer motion to parameter scale (pan units or radians per pixel).
pub const DRAG_SENSITIVITY: f32 = 0.01;
/// Pan-zoom zoom change per wheel step.
pub const ZOOM_PER_WHEEL_STEP: f32 = 0.1;
/// Orbital distance change per wheel step.
pub const DISTANCE_PER_WHEEL_STEP: f32 = 1.0;
/// Free-camera scale factor applied on wheel-up.
pub const FREE_ZOOM_IN_FACTOR: f32 = 1.2;
/// Free-camera scale factor applied on wheel-down.
pub const FREE_ZOOM_OUT_FACTOR: f32 = 0.8;

/// View parameters for one camera window.
///
/// Every window carries the full field set; each camera kind only reads the
/// group it owns. Mutated by the controller (pointer input) and by UI
/// writes, read once per frame by [`CameraKind::compute`].
///
/// [`CameraKind::compute`]: super::CameraKind::compute
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraParams {
    /// Pan-zoom: screen-plane offset.
    pub pan: Vec2,
    /// Pan-zoom: uniform scale.
    pub zoom: f32,
    /// Orbital: rotation about Y (radians).
    pub orbit_yaw: f32,
    /// Orbital: rotation about X (radians).
    pub orbit_pitch: f32,
    /// Orbital: distance from the target.
    pub orbit_distance: f32,
    /// Free: camera position in world space.
    pub free_position: Vec3,
    /// Free: rotation about Y (radians).
    pub free_yaw: f32,
    /// Free: rotation about X (radians).
    pub free_pitch: f32,
    /// Free: rotation about Z (radians).
    pub free_roll: f32,
    /// Free: uniform view scale.
    pub free_zoom: f32,
}

impl Default for CameraParams {
    fn default() -> Self {
        Self {
            pan: Vec2::ZERO,
            zoom: 1.0,
            orbit_yaw: 0.0,
            orbit_pitch: 3.0,
            orbit_distance: 20.0,
            free_position: Vec3::new(-0.77, 0.83, -4.57),
            free_yaw: 0.05,
            free_pitch: -1.43,
            free_roll: 0.05,
            free_zoom: 0.226,
        }
    }
}

impl CameraParams {
    /// Restore the pan-zoom field group to its initial pose.
    pub fn reset_pan_zoom(&mut self) {
        let d = Self::default();
        self.pan = d.pan;
        self.zoom = d.zoom;
    }

    /// Restore the orbital field group to its initial pose.
    pub fn reset_orbital(&mut self) {
        let d = Self::default();
        self.orbit_yaw = d.orbit_yaw;
        self.orbit_pitch = d.orbit_pitch;
        self.orbit_distance = d.orbit_distance;
    }

    /// Restore the free-camera field group to its initial pose.
    pub fn reset_free(&mut self) {
        let d = Self::default();
        self.free_position = d.free_position;
        self.free_yaw = d.free_yaw;
        self.free_pitch = d.free_pitch;
        self.free_roll = d.free_roll;
        self.free_zoom = d.free_zoom;
    }
}

/// Clamp `value` into an inclusive `(min, max)` range.
#[must_use]
pub fn clamp_to(value: f32, range: (f32, f32)) -> f32 {
    value.clamp(range.0, range.1)
}
