/// Kind of a normalized pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerEventKind {
    /// Pointer moved.
    Move,
    /// Primary button pressed.
    ButtonDown,
    /// Primary button released.
    ButtonUp,
    /// Wheel turned.
    Wheel,
}

/// Platform-agnostic pointer event in render-target pixel coordinates.
///
/// Every event carries the current pointer position so a single event can
/// both move the pointer and change button or wheel state.
///
/// # Example
///
/// ```
/// use triview::camera::CameraController;
/// use triview::input::PointerEvent;
///
/// let mut cameras = CameraController::new();
/// let _ = cameras.handle_event(&PointerEvent::button_down(450.0, 80.0), 900);
/// let _ = cameras.handle_event(&PointerEvent::moved(550.0, 80.0), 900);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    /// What happened.
    pub kind: PointerEventKind,
    /// Horizontal position in physical pixels.
    pub x: f32,
    /// Vertical position in physical pixels (grows downward).
    pub y: f32,
    /// Wheel notches (positive = away from the user). Zero for non-wheel
    /// events.
    pub wheel_delta: f32,
}

impl PointerEvent {
    /// Pointer moved to `(x, y)`.
    #[must_use]
    pub fn moved(x: f32, y: f32) -> Self {
        Self {
            kind: PointerEventKind::Move,
            x,
            y,
            wheel_delta: 0.0,
        }
    }

    /// Primary button pressed at `(x, y)`.
    #[must_use]
    pub fn button_down(x: f32, y: f32) -> Self {
        Self {
            kind: PointerEventKind::ButtonDown,
            ..Self::moved(x, y)
        }
    }

    /// Primary button released at `(x, y)`.
    #[must_use]
    pub fn button_up(x: f32, y: f32) -> Self {
        Self {
            kind: PointerEventKind::ButtonUp,
            ..Self::moved(x, y)
        }
    }

    /// Wheel turned by `delta` notches with the pointer at `(x, y)`.
    #[must_use]
    pub fn wheel(x: f32, y: f32, delta: f32) -> Self {
        Self {
            kind: PointerEventKind::Wheel,
            x,
            y,
            wheel_delta: delta,
        }
    }
}

/// Convert a winit scroll delta to wheel notches.
#[cfg(feature = "viewer")]
#[must_use]
pub fn wheel_steps(delta: winit::event::MouseScrollDelta) -> f32 {
    match delta {
        winit::event::MouseScrollDelta::LineDelta(_, y) => y,
        winit::event::MouseScrollDelta::PixelDelta(pos) => pos.y as f32 * 0.01,
    }
}
