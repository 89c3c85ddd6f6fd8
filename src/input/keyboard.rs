use serde::{Deserialize, Serialize};

use crate::camera::{CameraController, CameraKind};

/// Actions that can be bound to keys.
///
/// Serde serializes as `snake_case` strings so TOML files stay readable:
/// ```toml
/// [keybindings.bindings]
/// reset_orbital_camera = "KeyO"
/// reset_all_cameras = "KeyR"
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum KeyAction {
    /// Restore the pan-zoom window's initial pose.
    ResetPanZoomCamera,
    /// Restore the orbital window's initial pose.
    ResetOrbitalCamera,
    /// Restore the free window's initial pose.
    ResetFreeCamera,
    /// Restore every window's initial pose.
    ResetAllCameras,
}

impl KeyAction {
    /// Apply the action to the camera windows.
    pub fn execute(self, cameras: &mut CameraController) {
        match self {
            Self::ResetPanZoomCamera => cameras.reset(CameraKind::PanZoom),
            Self::ResetOrbitalCamera => cameras.reset(CameraKind::Orbital),
            Self::ResetFreeCamera => cameras.reset(CameraKind::Free),
            Self::ResetAllCameras => cameras.reset_all(),
        }
    }
}
