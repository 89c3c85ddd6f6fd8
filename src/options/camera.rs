use std::f32::consts::PI;

use glam::{Vec2, Vec3};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::camera::CameraParams;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Pan-Zoom Camera", inline)]
#[serde(default)]
/// Left window: top-down pan and zoom.
pub struct PanZoomOptions {
    /// Horizontal pan.
    #[schemars(title = "Pan X", range(min = -10.0, max = 10.0), extend("step" = 0.1))]
    pub pan_x: f32,
    /// Vertical pan.
    #[schemars(title = "Pan Y", range(min = -10.0, max = 10.0), extend("step" = 0.1))]
    pub pan_y: f32,
    /// Uniform scale.
    #[schemars(title = "Zoom", range(min = 0.1, max = 5.0), extend("step" = 0.05))]
    pub zoom: f32,
}

impl Default for PanZoomOptions {
    fn default() -> Self {
        Self::from_params(&CameraParams::default())
    }
}

impl PanZoomOptions {
    /// Snapshot the pan-zoom fields of `params`.
    #[must_use]
    pub fn from_params(params: &CameraParams) -> Self {
        Self {
            pan_x: params.pan.x,
            pan_y: params.pan.y,
            zoom: params.zoom,
        }
    }

    /// Clamp every field to its slider range.
    #[must_use]
    pub fn clamped(&self) -> Self {
        Self {
            pan_x: self.pan_x.clamp(-10.0, 10.0),
            pan_y: self.pan_y.clamp(-10.0, 10.0),
            zoom: self.zoom.clamp(0.1, 5.0),
        }
    }

    /// Write the fields into `params`.
    pub fn apply(&self, params: &mut CameraParams) {
        params.pan = Vec2::new(self.pan_x, self.pan_y);
        params.zoom = self.zoom;
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Orbital Camera", inline)]
#[serde(default)]
/// Center window: orbit around the origin.
pub struct OrbitalOptions {
    /// Rotation about X.
    #[schemars(title = "Pitch", range(min = -3.141_592_7, max = 3.141_592_7), extend("step" = 0.01))]
    pub pitch: f32,
    /// Rotation about Y.
    #[schemars(title = "Yaw", range(min = -3.141_592_7, max = 3.141_592_7), extend("step" = 0.01))]
    pub yaw: f32,
    /// Distance from the origin.
    #[schemars(title = "Distance", range(min = 5.0, max = 40.0), extend("step" = 0.5))]
    pub distance: f32,
}

impl Default for OrbitalOptions {
    fn default() -> Self {
        Self::from_params(&CameraParams::default())
    }
}

impl OrbitalOptions {
    /// Snapshot the orbital fields of `params`.
    #[must_use]
    pub fn from_params(params: &CameraParams) -> Self {
        Self {
            pitch: params.orbit_pitch,
            yaw: params.orbit_yaw,
            distance: params.orbit_distance,
        }
    }

    /// Clamp every field to its slider range.
    #[must_use]
    pub fn clamped(&self) -> Self {
        Self {
            pitch: self.pitch.clamp(-PI, PI),
            yaw: self.yaw.clamp(-PI, PI),
            distance: self.distance.clamp(5.0, 40.0),
        }
    }

    /// Write the fields into `params`.
    pub fn apply(&self, params: &mut CameraParams) {
        params.orbit_pitch = self.pitch;
        params.orbit_yaw = self.yaw;
        params.orbit_distance = self.distance;
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Free Camera", inline)]
#[serde(default)]
/// Right window: free-flying camera.
pub struct FreeOptions {
    /// Position X.
    #[schemars(title = "Position X", range(min = -15.0, max = 15.0), extend("step" = 0.05))]
    pub position_x: f32,
    /// Position Y.
    #[schemars(title = "Position Y", range(min = -15.0, max = 15.0), extend("step" = 0.05))]
    pub position_y: f32,
    /// Position Z.
    #[schemars(title = "Position Z", range(min = -40.0, max = 40.0), extend("step" = 0.05))]
    pub position_z: f32,
    /// Rotation about X.
    #[schemars(title = "Pitch", range(min = -3.141_592_7, max = 3.141_592_7), extend("step" = 0.01))]
    pub pitch: f32,
    /// Rotation about Y.
    #[schemars(title = "Yaw", range(min = -3.141_592_7, max = 3.141_592_7), extend("step" = 0.01))]
    pub yaw: f32,
    /// Rotation about Z.
    #[schemars(title = "Roll", range(min = -3.141_592_7, max = 3.141_592_7), extend("step" = 0.01))]
    pub roll: f32,
    /// Uniform view scale. The slider range is wider than the wheel's.
    #[schemars(title = "View Zoom", range(min = 0.01, max = 0.5), extend("step" = 0.005))]
    pub zoom: f32,
}

impl Default for FreeOptions {
    fn default() -> Self {
        Self::from_params(&CameraParams::default())
    }
}

impl FreeOptions {
    /// Snapshot the free-camera fields of `params`.
    #[must_use]
    pub fn from_params(params: &CameraParams) -> Self {
        Self {
            position_x: params.free_position.x,
            position_y: params.free_position.y,
            position_z: params.free_position.z,
            pitch: params.free_pitch,
            yaw: params.free_yaw,
            roll: params.free_roll,
            zoom: params.free_zoom,
        }
    }

    /// Clamp every field to its slider range.
    #[must_use]
    pub fn clamped(&self) -> Self {
        Self {
            position_x: self.position_x.clamp(-15.0, 15.0),
            position_y: self.position_y.clamp(-15.0, 15.0),
            position_z: self.position_z.clamp(-40.0, 40.0),
            pitch: self.pitch.clamp(-PI, PI),
            yaw: self.yaw.clamp(-PI, PI),
            roll: self.roll.clamp(-PI, PI),
            zoom: self.zoom.clamp(0.01, 0.5),
        }
    }

    /// Write the fields into `params`.
    pub fn apply(&self, params: &mut CameraParams) {
        params.free_position =
            Vec3::new(self.position_x, self.position_y, self.position_z);
        params.free_pitch = self.pitch;
        params.free_yaw = self.yaw;
        params.free_roll = self.roll;
        params.free_zoom = self.zoom;
    }
}
