//! GPU resource management.
//!
//! Defines the backend-neutral [`device::RenderDevice`] seam, its wgpu
//! implementation, shader composition and the uniform layouts shared with
//! WGSL.

/// Rendering device trait, descriptors and handles.
pub mod device;
/// Shared wgpu boilerplate for scene pipelines.
pub mod pipeline_helpers;
/// wgpu device, surface, and queue initialization.
pub mod render_context;
/// WGSL shader composition with `#import` support via naga-oil.
pub mod shader_composer;
/// Per-viewport uniform layouts.
pub mod uniforms;
/// [`device::RenderDevice`] implementation over wgpu.
pub mod wgpu_device;

#[cfg(test)]
pub(crate) mod recording;
