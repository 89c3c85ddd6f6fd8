use glam::Mat4;

/// Per-viewport constants for the mobile's vertex stage.
/// NOTE: Must match the WGSL `ViewConstants` struct (128 bytes)
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ViewConstants {
    /// Final view-projection for the viewport.
    pub view_proj: [[f32; 4]; 4],
    /// Global rotation shared by all viewports.
    pub rotation: [[f32; 4]; 4],
}

impl ViewConstants {
    /// Pack column-major matrices.
    #[must_use]
    pub fn new(view_proj: Mat4, rotation: Mat4) -> Self {
        Self {
            view_proj: view_proj.to_cols_array_2d(),
            rotation: rotation.to_cols_array_2d(),
        }
    }
}

/// Per-viewport constants for the floor's vertex stage.
/// NOTE: Must match the WGSL `FloorConstants` struct (128 bytes)
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct FloorConstants {
    /// Floor model transform.
    pub model: [[f32; 4]; 4],
    /// Final view-projection for the viewport.
    pub view_proj: [[f32; 4]; 4],
}

impl FloorConstants {
    /// Identity model with the viewport's view-projection.
    #[must_use]
    pub fn new(view_proj: Mat4) -> Self {
        Self {
            model: Mat4::IDENTITY.to_cols_array_2d(),
            view_proj: view_proj.to_cols_array_2d(),
        }
    }
}
