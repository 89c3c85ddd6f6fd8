//! Backend-neutral rendering device seam.
//!
//! The frame orchestrator only talks to a [`RenderDevice`]: it creates
//! buffers, textures, pipelines and resource bindings once, then writes
//! constants and submits indexed draws every frame. [`WgpuDevice`] is the
//! GPU implementation; tests use a recording double.
//!
//! [`WgpuDevice`]: super::wgpu_device::WgpuDevice

use std::fmt;

use bitflags::bitflags;

/// Update policy of a resource, fixed at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceUsage {
    /// Written once at creation and never again.
    Immutable,
    /// Updated occasionally through [`RenderDevice::update_buffer`].
    Default,
    /// Rewritten wholesale through [`RenderDevice::map_write`], typically
    /// every frame.
    Dynamic,
}

bitflags! {
    /// How a buffer or texture may be bound to the pipeline.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct BindFlags: u32 {
        /// Per-vertex or per-instance stream.
        const VERTEX_BUFFER = 1 << 0;
        /// Index stream.
        const INDEX_BUFFER = 1 << 1;
        /// Shader constants.
        const UNIFORM_BUFFER = 1 << 2;
        /// Sampled from shaders.
        const SHADER_RESOURCE = 1 << 3;
    }
}

bitflags! {
    /// Shader stages a binding is visible to.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ShaderStages: u32 {
        /// Vertex stage.
        const VERTEX = 1 << 0;
        /// Fragment stage.
        const FRAGMENT = 1 << 1;
    }
}

/// Buffer creation parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BufferDesc {
    /// Debug label.
    pub label: &'static str,
    /// Size in bytes.
    pub size: u64,
    /// Update policy.
    pub usage: ResourceUsage,
    /// Allowed bind points.
    pub bind_flags: BindFlags,
}

/// Texel formats accepted by [`RenderDevice::create_texture`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextureFormat {
    /// 8-bit RGBA, sRGB-encoded color.
    Rgba8UnormSrgb,
    /// 8-bit RGBA, linear data (masks, blend maps).
    Rgba8Unorm,
}

/// Immutable 2D texture creation parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextureDesc {
    /// Debug label.
    pub label: &'static str,
    /// Width in texels.
    pub width: u32,
    /// Height in texels.
    pub height: u32,
    /// Texel format.
    pub format: TextureFormat,
}

impl TextureDesc {
    /// Expected length of the initial pixel data.
    #[must_use]
    pub fn byte_len(&self) -> usize {
        self.width as usize * self.height as usize * 4
    }
}

/// Vertex attribute component layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VertexFormat {
    /// One `f32`.
    Float32,
    /// Two `f32`s.
    Float32x2,
    /// Three `f32`s.
    Float32x3,
    /// Four `f32`s.
    Float32x4,
}

impl VertexFormat {
    /// Size in bytes.
    #[must_use]
    pub fn size(self) -> u64 {
        match self {
            Self::Float32 => 4,
            Self::Float32x2 => 8,
            Self::Float32x3 => 12,
            Self::Float32x4 => 16,
        }
    }
}

/// Whether a vertex stream advances per vertex or per instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StepMode {
    /// Advance per vertex.
    Vertex,
    /// Advance per instance.
    Instance,
}

/// One attribute within a vertex stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VertexAttribute {
    /// Shader input location.
    pub location: u32,
    /// Byte offset within the element.
    pub offset: u64,
    /// Component layout.
    pub format: VertexFormat,
}

/// A vertex buffer slot's layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VertexStream {
    /// Bytes between consecutive elements.
    pub stride: u64,
    /// Advance rate.
    pub step: StepMode,
    /// Attributes read from each element.
    pub attributes: Vec<VertexAttribute>,
}

impl VertexStream {
    /// Build a tightly packed stream from formats, assigning consecutive
    /// locations starting at `first_location`.
    #[must_use]
    pub fn packed(
        step: StepMode,
        first_location: u32,
        formats: &[VertexFormat],
    ) -> Self {
        let mut offset = 0;
        let attributes = formats
            .iter()
            .zip(first_location..)
            .map(|(&format, location)| {
                let attr = VertexAttribute {
                    location,
                    offset,
                    format,
                };
                offset += format.size();
                attr
            })
            .collect();
        Self {
            stride: offset,
            step,
            attributes,
        }
    }
}

/// Kind of resource expected at a binding slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BindingKind {
    /// Uniform buffer.
    UniformBuffer,
    /// Filterable 2D float texture.
    Texture,
    /// Filtering sampler.
    Sampler,
}

/// A binding slot declared by a pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BindingSlot {
    /// Binding index within group 0.
    pub binding: u32,
    /// Expected resource kind.
    pub kind: BindingKind,
    /// Visible stages.
    pub stages: ShaderStages,
}

/// Shader source handed to the device for composition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShaderSource {
    /// WGSL source, possibly with `#import` directives.
    pub source: &'static str,
    /// Path used in diagnostics.
    pub file_path: &'static str,
}

/// Pipeline creation parameters. Entry points are `vs_main` / `fs_main`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineDesc {
    /// Debug label.
    pub label: &'static str,
    /// Shader module.
    pub shader: ShaderSource,
    /// Vertex buffer slots in order.
    pub vertex_streams: Vec<VertexStream>,
    /// Binding slots of group 0.
    pub bindings: Vec<BindingSlot>,
    /// Enable depth test and write.
    pub depth_test: bool,
}

/// Resource bound to one slot of a [`BindingDesc`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindingResource {
    /// A uniform buffer.
    Buffer(BufferHandle),
    /// A texture view.
    Texture(TextureHandle),
    /// The device's linear, repeating sampler.
    Sampler,
}

/// Resource binding creation parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindingDesc {
    /// Debug label.
    pub label: &'static str,
    /// Pipeline whose layout the binding must match.
    pub pipeline: PipelineHandle,
    /// `(binding index, resource)` pairs.
    pub resources: Vec<(u32, BindingResource)>,
}

/// Opaque buffer handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BufferHandle(pub u32);

/// Opaque texture handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureHandle(pub u32);

/// Opaque pipeline handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PipelineHandle(pub u32);

/// Opaque resource-binding handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BindingHandle(pub u32);

/// Screen-space rectangle in pixels with a depth range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Left edge.
    pub x: u32,
    /// Top edge.
    pub y: u32,
    /// Width.
    pub width: u32,
    /// Height.
    pub height: u32,
    /// Minimum depth.
    pub min_depth: f32,
    /// Maximum depth.
    pub max_depth: f32,
}

impl Viewport {
    /// Width / height, or 1 for a degenerate rectangle.
    #[must_use]
    pub fn aspect(&self) -> f32 {
        if self.width == 0 || self.height == 0 {
            1.0
        } else {
            self.width as f32 / self.height as f32
        }
    }
}

/// An indexed, instanced draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrawIndexed<'a> {
    /// Pipeline to bind.
    pub pipeline: PipelineHandle,
    /// Resource binding for group 0.
    pub binding: BindingHandle,
    /// Vertex buffers in slot order.
    pub vertex_buffers: &'a [BufferHandle],
    /// 32-bit index buffer.
    pub index_buffer: BufferHandle,
    /// Indices per instance.
    pub index_count: u32,
    /// Instance count.
    pub instance_count: u32,
}

/// Errors reported by a [`RenderDevice`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeviceError {
    /// The descriptor is inconsistent (zero size, wrong data length, ...).
    InvalidDescriptor(String),
    /// A handle does not name a live resource.
    UnknownHandle(&'static str),
    /// The operation is not allowed for the resource's usage class.
    UsageMismatch {
        /// The operation attempted.
        operation: &'static str,
        /// The buffer's usage class.
        usage: ResourceUsage,
    },
    /// A write exceeds the buffer's size.
    OutOfRange {
        /// End of the attempted write.
        end: u64,
        /// Buffer size.
        size: u64,
    },
    /// A frame operation was called outside `begin_frame`/`end_frame`.
    NoFrame,
    /// The presentation surface is lost or outdated and must be
    /// reconfigured.
    SurfaceLost,
    /// Backend-specific failure.
    Backend(String),
}

impl fmt::Display for DeviceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDescriptor(msg) => {
                write!(f, "invalid descriptor: {msg}")
            }
            Self::UnknownHandle(kind) => write!(f, "unknown {kind} handle"),
            Self::UsageMismatch { operation, usage } => {
                write!(f, "{operation} not allowed on {usage:?} resource")
            }
            Self::OutOfRange { end, size } => {
                write!(f, "write up to byte {end} exceeds buffer size {size}")
            }
            Self::NoFrame => write!(f, "no frame in progress"),
            Self::SurfaceLost => write!(f, "surface lost or outdated"),
            Self::Backend(msg) => write!(f, "backend error: {msg}"),
        }
    }
}

impl std::error::Error for DeviceError {}

/// Rendering device collaborator.
///
/// Creation calls happen once during setup. Per frame the caller brackets
/// its work with [`begin_frame`](Self::begin_frame) and
/// [`end_frame`](Self::end_frame); buffer writes issued between draws are
/// visible to every draw submitted after them.
pub trait RenderDevice {
    /// Create a buffer, optionally filled with `initial` bytes.
    ///
    /// # Errors
    ///
    /// [`DeviceError::InvalidDescriptor`] for zero-sized buffers or an
    /// immutable buffer without initial data.
    fn create_buffer(
        &mut self,
        desc: &BufferDesc,
        initial: Option<&[u8]>,
    ) -> Result<BufferHandle, DeviceError>;

    /// Create an immutable texture from tightly packed RGBA8 `pixels`.
    ///
    /// # Errors
    ///
    /// [`DeviceError::InvalidDescriptor`] if `pixels` does not match the
    /// descriptor's size.
    fn create_texture(
        &mut self,
        desc: &TextureDesc,
        pixels: &[u8],
    ) -> Result<TextureHandle, DeviceError>;

    /// Compile a shader and build a pipeline.
    ///
    /// # Errors
    ///
    /// [`DeviceError::Backend`] if shader composition fails.
    fn create_pipeline(
        &mut self,
        desc: &PipelineDesc,
    ) -> Result<PipelineHandle, DeviceError>;

    /// Bind resources to a pipeline's layout.
    ///
    /// # Errors
    ///
    /// [`DeviceError::UnknownHandle`] if any handle is stale.
    fn create_binding(
        &mut self,
        desc: &BindingDesc,
    ) -> Result<BindingHandle, DeviceError>;

    /// Map the first `size` bytes of a dynamic buffer for writing, discarding
    /// previous contents, call `write`, then unmap.
    ///
    /// # Errors
    ///
    /// [`DeviceError::UsageMismatch`] unless the buffer is
    /// [`ResourceUsage::Dynamic`]; [`DeviceError::OutOfRange`] if `size`
    /// exceeds the buffer.
    fn map_write(
        &mut self,
        buffer: BufferHandle,
        size: u64,
        write: &mut dyn FnMut(&mut [u8]),
    ) -> Result<(), DeviceError>;

    /// Overwrite bytes of a default-usage buffer starting at `offset`.
    ///
    /// # Errors
    ///
    /// [`DeviceError::UsageMismatch`] for immutable buffers;
    /// [`DeviceError::OutOfRange`] if the write overruns.
    fn update_buffer(
        &mut self,
        buffer: BufferHandle,
        offset: u64,
        data: &[u8],
    ) -> Result<(), DeviceError>;

    /// Acquire the frame target and clear color and depth.
    ///
    /// # Errors
    ///
    /// [`DeviceError::SurfaceLost`] when the surface must be reconfigured.
    fn begin_frame(&mut self, clear_color: [f32; 4]) -> Result<(), DeviceError>;

    /// Restrict subsequent draws to `viewport`.
    fn set_viewport(&mut self, viewport: &Viewport);

    /// Submit an indexed, instanced draw.
    ///
    /// # Errors
    ///
    /// [`DeviceError::NoFrame`] outside a frame, or
    /// [`DeviceError::UnknownHandle`] for stale handles.
    fn draw_indexed(&mut self, draw: &DrawIndexed<'_>) -> Result<(), DeviceError>;

    /// Finish and present the frame.
    ///
    /// # Errors
    ///
    /// [`DeviceError::NoFrame`] if no frame is in progress.
    fn end_frame(&mut self) -> Result<(), DeviceError>;
}

/// Map a dynamic buffer and overwrite it with `data`.
///
/// # Errors
///
/// Propagates [`RenderDevice::map_write`] failures.
pub fn write_pod<D, T>(
    device: &mut D,
    buffer: BufferHandle,
    data: &[T],
) -> Result<(), DeviceError>
where
    D: RenderDevice + ?Sized,
    T: bytemuck::Pod,
{
    let bytes: &[u8] = bytemuck::cast_slice(data);
    device.map_write(buffer, bytes.len() as u64, &mut |mapped| {
        mapped[..bytes.len()].copy_from_slice(bytes);
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn packed_stream_offsets_and_stride() {
        let stream = VertexStream::packed(
            StepMode::Instance,
            2,
            &[
                VertexFormat::Float32x4,
                VertexFormat::Float32x4,
                VertexFormat::Float32x4,
                VertexFormat::Float32x4,
                VertexFormat::Float32,
            ],
        );
        assert_eq!(stream.stride, 68);
        let locations: Vec<u32> =
            stream.attributes.iter().map(|a| a.location).collect();
        assert_eq!(locations, vec![2, 3, 4, 5, 6]);
        assert_eq!(stream.attributes[4].offset, 64);
    }

    #[test]
    fn degenerate_viewport_aspect_is_one() {
        let vp = Viewport {
            x: 0,
            y: 0,
            width: 0,
            height: 480,
            min_depth: 0.0,
            max_depth: 1.0,
        };
        assert_eq!(vp.aspect(), 1.0);
    }
}
