//! Input handling: normalized pointer events and bindable key actions.

/// Platform-agnostic pointer events.
pub mod event;
/// Key-bindable actions.
pub mod keyboard;

#[cfg(feature = "viewer")]
pub use event::wheel_steps;
pub use event::{PointerEvent, PointerEventKind};
pub use keyboard::KeyAction;
