use glam::{Mat4, Vec2, Vec3};

use super::model::{CameraKind, DEFAULT_EYE};
use super::params::CameraParams;
use crate::input::{PointerEvent, PointerEventKind};

/// Number of camera windows (and viewports).
pub const WINDOW_COUNT: usize = 3;

/// Pointer capture state shared by all windows.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PointerState {
    /// Whether a button is held since a button-down.
    pub captured: bool,
    /// Window that received the button-down, `None` when released.
    pub active_window: Option<usize>,
    /// Last pointer position seen while captured, in pixels.
    pub last_position: Vec2,
}

/// Routes pointer events to the camera window they target.
///
/// Drags go to the window that received the button-down for as long as the
/// button is held, even if the pointer leaves it. Wheel steps go to the
/// window under the pointer regardless of capture.
#[derive(Debug, Clone, Default)]
pub struct CameraController {
    windows: [CameraParams; WINDOW_COUNT],
    pointer: PointerState,
}

/// Map a horizontal pixel position to a window slot.
///
/// Positions outside the surface clamp to the nearest edge window.
///
/// Routing uses the exact `floor(3x / W)` split while drawing uses
/// truncated `W / 3` columns, so when `W` is not a multiple of three a
/// pixel next to a column edge can route to the neighbouring window (at
/// `W = 901`, `x = 300` is drawn in column 1 but routes to window 0).
#[must_use]
pub fn window_index(x: f32, surface_width: u32) -> usize {
    if surface_width == 0 {
        return 0;
    }
    let slot = (3.0 * x / surface_width as f32).floor();
    // NaN casts to 0
    (slot as i64).clamp(0, WINDOW_COUNT as i64 - 1) as usize
}

impl CameraController {
    /// Create a controller with every window at its initial pose.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one pointer event. `surface_width` is the full render-target
    /// width in pixels. Returns `true` if any camera parameter changed.
    pub fn handle_event(
        &mut self,
        event: &PointerEvent,
        surface_width: u32,
    ) -> bool {
        let hovered = window_index(event.x, surface_width);
        let position = Vec2::new(event.x, event.y);

        match event.kind {
            PointerEventKind::ButtonDown => {
                self.pointer = PointerState {
                    captured: true,
                    active_window: Some(hovered),
                    last_position: position,
                };
                log::debug!("pointer captured by window {hovered}");
            }
            PointerEventKind::ButtonUp => {
                if self.pointer.captured {
                    log::debug!("pointer released");
                }
                self.pointer.captured = false;
                self.pointer.active_window = None;
            }
            PointerEventKind::Move | PointerEventKind::Wheel => {}
        }

        let mut changed = false;
        if self.pointer.captured {
            let delta = position - self.pointer.last_position;
            if let Some(idx) = self.pointer.active_window {
                if delta != Vec2::ZERO {
                    CameraKind::SLOTS[idx].apply_drag(
                        &mut self.windows[idx],
                        delta.x,
                        delta.y,
                    );
                    changed = true;
                }
            }
            self.pointer.last_position = position;
        }

        if event.kind == PointerEventKind::Wheel && event.wheel_delta != 0.0 {
            CameraKind::SLOTS[hovered]
                .apply_wheel(&mut self.windows[hovered], event.wheel_delta);
            changed = true;
        }
        changed
    }

    /// View matrices for all windows, in slot order.
    #[must_use]
    pub fn view_matrices(&self) -> [Mat4; WINDOW_COUNT] {
        std::array::from_fn(|i| CameraKind::SLOTS[i].compute(&self.windows[i]))
    }

    /// Eye position of the window currently holding the pointer, or the
    /// canonical forward-facing pose when none does.
    #[must_use]
    pub fn eye_position(&self) -> Vec3 {
        self.pointer.active_window.map_or(DEFAULT_EYE, |idx| {
            CameraKind::SLOTS[idx].eye_position(&self.windows[idx])
        })
    }

    /// Pointer capture state.
    #[must_use]
    pub fn pointer(&self) -> &PointerState {
        &self.pointer
    }

    /// Parameters of the window bound to `kind`.
    #[must_use]
    pub fn params(&self, kind: CameraKind) -> &CameraParams {
        &self.windows[slot_of(kind)]
    }

    /// Mutable parameters of the window bound to `kind`.
    pub fn params_mut(&mut self, kind: CameraKind) -> &mut CameraParams {
        &mut self.windows[slot_of(kind)]
    }

    /// Reset the window bound to `kind` to its initial pose.
    pub fn reset(&mut self, kind: CameraKind) {
        kind.reset(&mut self.windows[slot_of(kind)]);
        log::debug!("reset {kind:?} camera");
    }

    /// Reset every window.
    pub fn reset_all(&mut self) {
        for kind in CameraKind::SLOTS {
            self.reset(kind);
        }
    }
}

fn slot_of(kind: CameraKind) -> usize {
    match kind {
        CameraKind::PanZoom => 0,
        CameraKind::Orbital => 1,
        CameraKind::Free => 2,
    }
}
