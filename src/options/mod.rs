//! Runtime options with TOML preset support.
//!
//! Every UI-editable parameter (camera poses for the three windows, light and
//! material scalars) plus the keybindings lives here. Each field declares its
//! slider range through schemars metadata, and [`Options::clamped`] enforces
//! the same ranges when a value arrives from the UI.

mod camera;
mod keybindings;
mod lighting;

use std::path::Path;

pub use camera::{FreeOptions, OrbitalOptions, PanZoomOptions};
pub use keybindings::KeybindingOptions;
pub use lighting::LightingOptions;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::TriviewError;

/// Top-level options container. All sub-structs use `#[serde(default)]` so
/// partial TOML files (e.g. only overriding `[lighting]`) work correctly.
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[serde(default)]
pub struct Options {
    /// Left window camera.
    pub pan_zoom: PanZoomOptions,
    /// Center window camera.
    pub orbital: OrbitalOptions,
    /// Right window camera.
    pub free: FreeOptions,
    /// Lighting and texture blend parameters.
    pub lighting: LightingOptions,
    /// Keyboard binding options.
    #[schemars(skip)]
    pub keybindings: KeybindingOptions,
}

impl Options {
    /// Generate JSON Schema describing the UI-exposed options.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Options)
    }

    /// Load options from a TOML file. Missing fields use defaults.
    ///
    /// # Errors
    ///
    /// [`TriviewError::Io`] if the file cannot be read,
    /// [`TriviewError::OptionsParse`] if it is not valid options TOML.
    pub fn load(path: &Path) -> Result<Self, TriviewError> {
        let content = std::fs::read_to_string(path).map_err(TriviewError::Io)?;
        Self::from_toml(&content)
    }

    /// Parse options from a TOML string.
    ///
    /// # Errors
    ///
    /// [`TriviewError::OptionsParse`] on malformed input.
    pub fn from_toml(content: &str) -> Result<Self, TriviewError> {
        toml::from_str(content)
            .map_err(|e| TriviewError::OptionsParse(e.to_string()))
    }

    /// Save options to a TOML file (pretty-printed).
    ///
    /// # Errors
    ///
    /// [`TriviewError::OptionsParse`] if serialization fails,
    /// [`TriviewError::Io`] if the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), TriviewError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| TriviewError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(TriviewError::Io)?;
        }
        std::fs::write(path, content).map_err(TriviewError::Io)
    }

    /// Every UI-exposed field clamped to its declared slider range.
    #[must_use]
    pub fn clamped(&self) -> Self {
        Self {
            pan_zoom: self.pan_zoom.clamped(),
            orbital: self.orbital.clamped(),
            free: self.free.clamped(),
            lighting: self.lighting.clamped(),
            keybindings: self.keybindings.clone(),
        }
    }

    /// Copy with one `section.field` replaced by `value`, as sent by the UI.
    /// The result is not clamped.
    ///
    /// # Errors
    ///
    /// [`TriviewError::UnknownOption`] if the section or field does not
    /// exist or `value` has the wrong shape for the field.
    pub fn with_field(
        &self,
        section: &str,
        field: &str,
        value: serde_json::Value,
    ) -> Result<Self, TriviewError> {
        let unknown = || TriviewError::UnknownOption {
            section: section.to_owned(),
            field: field.to_owned(),
        };
        let mut root = serde_json::to_value(self)
            .map_err(|e| TriviewError::OptionsParse(e.to_string()))?;
        let slot = root
            .get_mut(section)
            .and_then(|s| s.get_mut(field))
            .ok_or_else(unknown)?;
        *slot = value;
        serde_json::from_value(root).map_err(|_| unknown())
    }

    /// Like [`with_field`](Self::with_field), but the new value is clamped
    /// to that field's slider range. Every other field keeps its current
    /// value, even when it lies outside its own range.
    ///
    /// # Errors
    ///
    /// Same as [`with_field`](Self::with_field).
    pub fn with_clamped_field(
        &self,
        section: &str,
        field: &str,
        value: serde_json::Value,
    ) -> Result<Self, TriviewError> {
        let clamped = serde_json::to_value(
            self.with_field(section, field, value)?.clamped(),
        )
        .map_err(|e| TriviewError::OptionsParse(e.to_string()))?;
        let value = clamped
            .get(section)
            .and_then(|s| s.get(field))
            .cloned()
            .ok_or_else(|| TriviewError::UnknownOption {
                section: section.to_owned(),
                field: field.to_owned(),
            })?;
        self.with_field(section, field, value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::KeyAction;

    #[test]
    fn default_round_trips_through_toml() {
        let opts = Options::default();
        let toml_str = toml::to_string_pretty(&opts).unwrap();
        let parsed = Options::from_toml(&toml_str).unwrap();
        assert_eq!(opts, parsed);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let toml_str = r"
[lighting]
specular_power = 64.0
";
        let opts = Options::from_toml(toml_str).unwrap();
        assert_eq!(opts.lighting.specular_power, 64.0);
        // Everything else should be default
        assert_eq!(opts.lighting.blend_factor, 0.5);
        assert_eq!(opts.orbital.distance, 20.0);
        assert_eq!(opts.free.zoom, 0.226);
    }

    #[test]
    fn keybinding_lookup() {
        let opts = Options::default();
        assert_eq!(
            opts.keybindings.lookup("KeyR"),
            Some(KeyAction::ResetAllCameras)
        );
        assert_eq!(
            opts.keybindings.lookup("Digit2"),
            Some(KeyAction::ResetOrbitalCamera)
        );
        assert_eq!(opts.keybindings.lookup("KeyZ"), None);
    }

    #[test]
    fn custom_keybindings_rebuild_lookup() {
        let toml_str = r#"
[keybindings.bindings]
reset_free_camera = "KeyF"
"#;
        let opts = Options::from_toml(toml_str).unwrap();
        assert_eq!(
            opts.keybindings.lookup("KeyF"),
            Some(KeyAction::ResetFreeCamera)
        );
        assert_eq!(opts.keybindings.lookup("KeyR"), None);
    }

    #[test]
    fn clamped_enforces_slider_ranges() {
        let mut opts = Options::default();
        opts.pan_zoom.zoom = 50.0;
        opts.orbital.distance = 1.0;
        opts.free.zoom = 0.001;
        opts.lighting.specular_power = 0.0;
        opts.lighting.light_color = [2.0, -1.0, 0.5, 1.0];

        let c = opts.clamped();
        assert_eq!(c.pan_zoom.zoom, 5.0);
        assert_eq!(c.orbital.distance, 5.0);
        // UI floor for the free zoom, not the wheel's 0.001
        assert_eq!(c.free.zoom, 0.01);
        assert_eq!(c.lighting.specular_power, 1.0);
        assert_eq!(c.lighting.light_color, [1.0, 0.0, 0.5, 1.0]);
    }

    #[test]
    fn with_field_replaces_one_value() {
        let opts = Options::default()
            .with_field("lighting", "blend_factor", serde_json::json!(0.8))
            .unwrap();
        assert!((opts.lighting.blend_factor - 0.8).abs() < 1e-6);
        assert_eq!(opts.lighting.specular_power, 32.0);
    }

    #[test]
    fn with_field_rejects_unknown_paths() {
        let opts = Options::default();
        assert!(matches!(
            opts.with_field("lighting", "glow", serde_json::json!(1.0)),
            Err(TriviewError::UnknownOption { .. })
        ));
        assert!(matches!(
            opts.with_field("shadows", "bias", serde_json::json!(1.0)),
            Err(TriviewError::UnknownOption { .. })
        ));
        assert!(matches!(
            opts.with_field("orbital", "yaw", serde_json::json!("left")),
            Err(TriviewError::UnknownOption { .. })
        ));
    }

    #[test]
    fn clamped_field_write_leaves_siblings_alone() {
        let mut opts = Options::default();
        opts.free.zoom = 0.001;
        opts.orbital.yaw = 5.0;

        let opts = opts
            .with_clamped_field("free", "roll", serde_json::json!(9.0))
            .unwrap()
            .with_clamped_field("orbital", "distance", serde_json::json!(25.0))
            .unwrap();
        assert_eq!(opts.free.roll, std::f32::consts::PI);
        assert_eq!(opts.free.zoom, 0.001);
        assert_eq!(opts.orbital.distance, 25.0);
        assert_eq!(opts.orbital.yaw, 5.0);
    }

    #[test]
    fn schema_declares_slider_ranges() {
        let schema = serde_json::to_value(Options::json_schema()).unwrap();
        let zoom = &schema["properties"]["free"]["properties"]["zoom"];
        assert_eq!(zoom["minimum"], serde_json::json!(0.01));
        assert_eq!(zoom["maximum"], serde_json::json!(0.5));
        assert!(schema["properties"].get("keybindings").is_none());
    }
}
