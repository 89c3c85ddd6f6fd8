//! Options methods for FrameOrchestrator

use super::FrameOrchestrator;
use crate::camera::CameraKind;
use crate::error::TriviewError;
use crate::options::{
    FreeOptions, LightingOptions, Options, OrbitalOptions, PanZoomOptions,
};

/// Top-level option sections, in application order.
const SECTIONS: [&str; 5] =
    ["pan_zoom", "orbital", "free", "lighting", "keybindings"];

impl FrameOrchestrator {
    /// Snapshot the current state as options.
    #[must_use]
    pub fn options(&self) -> Options {
        let cameras = &self.cameras;
        Options {
            pan_zoom: PanZoomOptions::from_params(
                cameras.params(CameraKind::PanZoom),
            ),
            orbital: OrbitalOptions::from_params(
                cameras.params(CameraKind::Orbital),
            ),
            free: FreeOptions::from_params(cameras.params(CameraKind::Free)),
            lighting: LightingOptions::from_state(&self.lighting),
            keybindings: self.keybindings.clone(),
        }
    }

    /// Replace every option, clamping each field to its slider range.
    pub fn set_options(&mut self, new: &Options) {
        let clamped = new.clamped();
        for section in SECTIONS {
            self.apply_section(&clamped, section);
        }
    }

    /// Apply one UI write to `section.field`, clamped to the field's slider
    /// range. Only that field changes, so values that input pushed past a
    /// slider range elsewhere survive, including siblings in the same
    /// section. Takes effect on the next frame.
    ///
    /// # Errors
    ///
    /// [`TriviewError::UnknownOption`] if the field does not exist or the
    /// value has the wrong type; state is left unchanged.
    pub fn set_option(
        &mut self,
        section: &str,
        field: &str,
        value: serde_json::Value,
    ) -> Result<(), TriviewError> {
        match self.options().with_clamped_field(section, field, value) {
            Ok(updated) => {
                self.apply_section(&updated, section);
                Ok(())
            }
            Err(e) => {
                log::warn!("ignoring UI write: {e}");
                Err(e)
            }
        }
    }

    fn apply_section(&mut self, opts: &Options, section: &str) {
        match section {
            "pan_zoom" => opts
                .pan_zoom
                .apply(self.cameras.params_mut(CameraKind::PanZoom)),
            "orbital" => opts
                .orbital
                .apply(self.cameras.params_mut(CameraKind::Orbital)),
            "free" => opts.free.apply(self.cameras.params_mut(CameraKind::Free)),
            "lighting" => opts.lighting.apply(&mut self.lighting),
            "keybindings" => self.keybindings = opts.keybindings.clone(),
            _ => {}
        }
    }

    /// Load options from a TOML preset and apply them.
    ///
    /// # Errors
    ///
    /// Propagates [`Options::load`] failures; state is left unchanged.
    pub fn load_options(
        &mut self,
        path: &std::path::Path,
    ) -> Result<(), TriviewError> {
        let opts = Options::load(path)?;
        self.set_options(&opts);
        log::info!("loaded options from {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::camera::CameraKind;
    use crate::engine::FrameOrchestrator;
    use crate::error::TriviewError;
    use crate::gpu::recording::RecordingDevice;
    use crate::input::PointerEvent;
    use crate::options::Options;

    fn orchestrator() -> FrameOrchestrator {
        FrameOrchestrator::new(&mut RecordingDevice::new(), (900, 600)).unwrap()
    }

    #[test]
    fn default_options_match_initial_state() {
        let orch = orchestrator();
        assert_eq!(orch.options(), Options::default());
    }

    #[test]
    fn ui_write_updates_lighting() {
        let mut orch = orchestrator();
        orch.set_option("lighting", "specular_power", json!(64.0)).unwrap();
        assert_eq!(orch.lighting().specular_power, 64.0);
    }

    #[test]
    fn ui_write_is_clamped_to_slider_range() {
        let mut orch = orchestrator();
        orch.set_option("free", "zoom", json!(2.0)).unwrap();
        assert_eq!(orch.cameras().params(CameraKind::Free).free_zoom, 0.5);
        orch.set_option("orbital", "distance", json!(-3.0)).unwrap();
        assert_eq!(
            orch.cameras().params(CameraKind::Orbital).orbit_distance,
            5.0
        );
    }

    #[test]
    fn ui_write_to_one_window_leaves_others() {
        let mut orch = orchestrator();
        orch.set_option("pan_zoom", "pan_x", json!(3.0)).unwrap();
        let cams = orch.cameras();
        assert_eq!(cams.params(CameraKind::PanZoom).pan.x, 3.0);
        // Other windows keep their own copy of the pan field
        assert_eq!(cams.params(CameraKind::Orbital).pan.x, 0.0);
    }

    #[test]
    fn unknown_field_is_rejected_without_change() {
        let mut orch = orchestrator();
        let before = orch.options();
        let err = orch.set_option("lighting", "fog", json!(1.0)).unwrap_err();
        assert!(matches!(err, TriviewError::UnknownOption { .. }));
        assert_eq!(orch.options(), before);
    }

    #[test]
    fn ui_write_keeps_other_sections_unclamped() {
        let mut orch = orchestrator();
        // Drag the orbital pitch past the slider's upper bound
        let _ = orch.handle_pointer(&PointerEvent::button_down(450.0, 0.0));
        let _ = orch.handle_pointer(&PointerEvent::moved(450.0, 50.0));
        let pitch = orch.cameras().params(CameraKind::Orbital).orbit_pitch;
        assert!(pitch > std::f32::consts::PI);

        orch.set_option("lighting", "blend_factor", json!(0.1)).unwrap();
        assert_eq!(
            orch.cameras().params(CameraKind::Orbital).orbit_pitch,
            pitch
        );
    }

    #[test]
    fn ui_write_keeps_wheel_zoom_below_slider_floor() {
        let mut orch = orchestrator();
        for _ in 0..40 {
            let _ = orch.handle_pointer(&PointerEvent::wheel(800.0, 10.0, -1.0));
        }
        let zoom = orch.cameras().params(CameraKind::Free).free_zoom;
        assert!((zoom - 0.001).abs() < 1e-7);

        orch.set_option("free", "roll", json!(0.3)).unwrap();
        let params = orch.cameras().params(CameraKind::Free);
        assert_eq!(params.free_roll, 0.3);
        assert_eq!(params.free_zoom, zoom);
    }

    #[test]
    fn ui_write_keeps_dragged_yaw_past_slider_range() {
        let mut orch = orchestrator();
        let _ = orch.handle_pointer(&PointerEvent::button_down(400.0, 300.0));
        let _ = orch.handle_pointer(&PointerEvent::moved(900.0, 300.0));
        let _ = orch.handle_pointer(&PointerEvent::button_up(900.0, 300.0));
        let yaw = orch.cameras().params(CameraKind::Orbital).orbit_yaw;
        assert!(yaw > std::f32::consts::PI);

        orch.set_option("orbital", "distance", json!(25.0)).unwrap();
        let params = orch.cameras().params(CameraKind::Orbital);
        assert_eq!(params.orbit_distance, 25.0);
        assert_eq!(params.orbit_yaw, yaw);
    }

    #[test]
    fn loading_options_clamps_whole_sections() {
        let mut orch = orchestrator();
        let mut opts = Options::default();
        opts.free.zoom = 0.001;
        opts.orbital.yaw = 5.0;
        orch.set_options(&opts);
        assert_eq!(orch.cameras().params(CameraKind::Free).free_zoom, 0.01);
        assert_eq!(
            orch.cameras().params(CameraKind::Orbital).orbit_yaw,
            std::f32::consts::PI
        );
    }

    #[test]
    fn light_color_accepts_arrays() {
        let mut orch = orchestrator();
        orch.set_option("lighting", "light_color", json!([1.0, 0.5, 0.25, 1.0]))
            .unwrap();
        assert_eq!(orch.lighting().light_color.y, 0.5);
    }
}
