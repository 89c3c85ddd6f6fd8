//! Input methods for FrameOrchestrator

use super::FrameOrchestrator;
use crate::input::{KeyAction, PointerEvent};

impl FrameOrchestrator {
    /// Route a pointer event to the camera windows. Coordinates are in
    /// surface pixels. Returns `true` if any camera parameter changed.
    pub fn handle_pointer(&mut self, event: &PointerEvent) -> bool {
        self.cameras.handle_event(event, self.surface_size.0)
    }

    /// Run the action bound to `key` (a key-code string such as `"KeyR"`),
    /// if any. Returns the action that ran.
    pub fn handle_key(&mut self, key: &str) -> Option<KeyAction> {
        let action = self.keybindings.lookup(key)?;
        log::debug!("key {key} -> {action:?}");
        self.execute(action);
        Some(action)
    }

    /// Run an action directly.
    pub fn execute(&mut self, action: KeyAction) {
        action.execute(&mut self.cameras);
    }
}

#[cfg(test)]
mod tests {
    use crate::camera::CameraKind;
    use crate::engine::FrameOrchestrator;
    use crate::gpu::recording::RecordingDevice;
    use crate::input::{KeyAction, PointerEvent};

    fn orchestrator() -> FrameOrchestrator {
        FrameOrchestrator::new(&mut RecordingDevice::new(), (900, 600)).unwrap()
    }

    #[test]
    fn drag_in_center_window_orbits() {
        let mut orch = orchestrator();
        let _ = orch.handle_pointer(&PointerEvent::button_down(450.0, 300.0));
        assert!(orch.handle_pointer(&PointerEvent::moved(550.0, 300.0)));
        let params = orch.cameras().params(CameraKind::Orbital);
        assert!((params.orbit_yaw - 1.0).abs() < 1e-6);
    }

    #[test]
    fn wheel_over_left_window_zooms_pan_zoom() {
        let mut orch = orchestrator();
        assert!(orch.handle_pointer(&PointerEvent::wheel(10.0, 10.0, 2.0)));
        let params = orch.cameras().params(CameraKind::PanZoom);
        assert!((params.zoom - 1.2).abs() < 1e-6);
    }

    #[test]
    fn bound_key_resets_camera() {
        let mut orch = orchestrator();
        orch.cameras_mut().params_mut(CameraKind::Free).free_zoom = 0.05;
        assert_eq!(orch.handle_key("Digit3"), Some(KeyAction::ResetFreeCamera));
        let params = orch.cameras().params(CameraKind::Free);
        assert_eq!(params.free_zoom, 0.226);
    }

    #[test]
    fn unbound_key_does_nothing() {
        let mut orch = orchestrator();
        orch.cameras_mut().params_mut(CameraKind::Orbital).orbit_distance = 7.0;
        assert_eq!(orch.handle_key("KeyZ"), None);
        assert_eq!(
            orch.cameras().params(CameraKind::Orbital).orbit_distance,
            7.0
        );
    }
}
