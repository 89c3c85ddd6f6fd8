use std::f32::consts::{FRAC_PI_2, FRAC_PI_4, PI};

use glam::Mat4;

/// Vertical field of view shared by all viewports (45°).
pub const FOV_Y: f32 = FRAC_PI_4;
/// Near clip plane.
pub const Z_NEAR: f32 = 0.1;
/// Far clip plane.
pub const Z_FAR: f32 = 100.0;

/// Orientation of the presentation surface relative to the device's
/// natural orientation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SurfaceTransform {
    /// No rotation (desktop surfaces).
    #[default]
    Identity,
    /// Rotated 90° clockwise.
    Rotate90,
    /// Rotated 180°.
    Rotate180,
    /// Rotated 270° clockwise.
    Rotate270,
}

impl SurfaceTransform {
    /// Rotation about the view axis that compensates the surface
    /// orientation.
    #[must_use]
    pub fn matrix(self) -> Mat4 {
        match self {
            Self::Identity => Mat4::IDENTITY,
            Self::Rotate90 => Mat4::from_rotation_z(-FRAC_PI_2),
            Self::Rotate180 => Mat4::from_rotation_z(PI),
            Self::Rotate270 => Mat4::from_rotation_z(FRAC_PI_2),
        }
    }

    /// Whether the surface is rotated a quarter turn, which swaps the
    /// aspect ratio.
    #[must_use]
    pub fn swaps_axes(self) -> bool {
        matches!(self, Self::Rotate90 | Self::Rotate270)
    }
}

/// Shared left-handed perspective projection with a `[0, 1]` depth range.
///
/// `aspect` is the width / height of a single viewport; it is swapped for
/// quarter-turn surfaces.
#[must_use]
pub fn perspective(aspect: f32, transform: SurfaceTransform) -> Mat4 {
    let aspect = if transform.swaps_axes() {
        1.0 / aspect
    } else {
        aspect
    };
    Mat4::perspective_lh(FOV_Y, aspect, Z_NEAR, Z_FAR)
}

/// Compose a viewport's final view-projection: the view applies first,
/// then the surface pretransform, then the projection.
#[must_use]
pub fn view_projection(
    view: Mat4,
    transform: SurfaceTransform,
    projection: Mat4,
) -> Mat4 {
    projection * transform.matrix() * view
}
