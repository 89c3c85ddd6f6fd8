//! Shared utilities.

/// Smoothed FPS tracking.
pub mod frame_timing;
