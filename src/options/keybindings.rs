use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::input::KeyAction;

/// Key codes bound to camera reset actions.
///
/// Serialized as `[keybindings.bindings]` with one `action = "KeyCode"`
/// entry per action. A table given in TOML replaces the defaults wholesale.
/// The key-code index is derived on every construction path, including
/// deserialization, so lookups always reflect the bindings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "BindingTable", into = "BindingTable")]
pub struct KeybindingOptions {
    bindings: BTreeMap<KeyAction, String>,
    by_key: HashMap<String, KeyAction>,
}

/// On-disk shape of [`KeybindingOptions`].
#[derive(Serialize, Deserialize)]
#[serde(default)]
struct BindingTable {
    bindings: BTreeMap<KeyAction, String>,
}

impl Default for BindingTable {
    fn default() -> Self {
        Self {
            bindings: BTreeMap::from([
                (KeyAction::ResetPanZoomCamera, "Digit1".to_owned()),
                (KeyAction::ResetOrbitalCamera, "Digit2".to_owned()),
                (KeyAction::ResetFreeCamera, "Digit3".to_owned()),
                (KeyAction::ResetAllCameras, "KeyR".to_owned()),
            ]),
        }
    }
}

impl From<BindingTable> for KeybindingOptions {
    fn from(table: BindingTable) -> Self {
        let by_key = table
            .bindings
            .iter()
            .map(|(action, key)| (key.clone(), *action))
            .collect();
        Self {
            bindings: table.bindings,
            by_key,
        }
    }
}

impl From<KeybindingOptions> for BindingTable {
    fn from(opts: KeybindingOptions) -> Self {
        Self {
            bindings: opts.bindings,
        }
    }
}

impl Default for KeybindingOptions {
    fn default() -> Self {
        BindingTable::default().into()
    }
}

impl KeybindingOptions {
    /// Action currently bound to `key`, if any.
    #[must_use]
    pub fn lookup(&self, key: &str) -> Option<KeyAction> {
        self.by_key.get(key).copied()
    }

    /// Key bound to `action`, if any.
    #[must_use]
    pub fn key_for(&self, action: KeyAction) -> Option<&str> {
        self.bindings.get(&action).map(String::as_str)
    }

    /// Bind `action` to `key`. The action's previous key and any other
    /// action holding `key` are unbound.
    pub fn bind(&mut self, action: KeyAction, key: impl Into<String>) {
        let key = key.into();
        if let Some(displaced) = self.by_key.remove(&key) {
            let _ = self.bindings.remove(&displaced);
        }
        if let Some(old) = self.bindings.insert(action, key.clone()) {
            let _ = self.by_key.remove(&old);
        }
        let _ = self.by_key.insert(key, action);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rebinding_moves_the_key() {
        let mut keys = KeybindingOptions::default();
        keys.bind(KeyAction::ResetAllCameras, "Space");
        assert_eq!(keys.lookup("Space"), Some(KeyAction::ResetAllCameras));
        assert_eq!(keys.lookup("KeyR"), None);
        assert_eq!(keys.key_for(KeyAction::ResetAllCameras), Some("Space"));
    }

    #[test]
    fn taking_a_bound_key_unbinds_its_owner() {
        let mut keys = KeybindingOptions::default();
        keys.bind(KeyAction::ResetAllCameras, "Digit1");
        assert_eq!(keys.lookup("Digit1"), Some(KeyAction::ResetAllCameras));
        assert_eq!(keys.key_for(KeyAction::ResetPanZoomCamera), None);
        assert_eq!(keys.lookup("KeyR"), None);
    }

    #[test]
    fn deserialized_table_is_indexed() {
        let keys: KeybindingOptions = serde_json::from_value(
            serde_json::json!({ "bindings": { "reset_free_camera": "KeyF" } }),
        )
        .unwrap();
        assert_eq!(keys.lookup("KeyF"), Some(KeyAction::ResetFreeCamera));
        assert_eq!(keys.lookup("Digit3"), None);
    }
}
