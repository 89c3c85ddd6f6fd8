//! Camera system for the three viewport windows.
//!
//! Each window slot is bound to one [`CameraKind`] (pan-zoom, orbital,
//! free). [`CameraController`] routes pointer input to the window's
//! [`CameraParams`]; view matrices are recomputed from those parameters
//! every frame.

/// Pointer routing and per-window parameter storage.
pub mod controller;
/// Camera kinds and their view-matrix rules.
pub mod model;
/// Per-window view parameters and clamp ranges.
pub mod params;
/// Shared perspective projection and surface pretransform.
pub mod projection;

pub use controller::{window_index, CameraController, PointerState};
pub use model::CameraKind;
pub use params::CameraParams;
pub use projection::SurfaceTransform;
