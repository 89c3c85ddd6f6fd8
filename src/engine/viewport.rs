//! Three-column viewport tiling.

use crate::camera::controller::WINDOW_COUNT;
use crate::gpu::device::Viewport;

/// Split the render target into equal-width vertical columns, left to right.
///
/// Widths use truncating division, so up to two pixels on the right edge
/// belong to no viewport. Columns never overlap.
#[must_use]
pub fn partition(width: u32, height: u32) -> [Viewport; WINDOW_COUNT] {
    let column = width / WINDOW_COUNT as u32;
    std::array::from_fn(|i| Viewport {
        x: column * i as u32,
        y: 0,
        width: column,
        height,
        min_depth: 0.0,
        max_depth: 1.0,
    })
}
