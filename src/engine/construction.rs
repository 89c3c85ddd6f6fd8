//! One-time creation of every device resource the frame loop draws with.

use crate::animation::{InstanceRecord, INSTANCE_COUNT};
use crate::error::TriviewError;
use crate::gpu::device::{
    BindFlags, BindingDesc, BindingHandle, BindingKind, BindingResource,
    BindingSlot, BufferDesc, BufferHandle, DeviceError, PipelineDesc,
    PipelineHandle, RenderDevice, ResourceUsage, ShaderStages, TextureDesc,
    TextureHandle,
};
use crate::gpu::shader_composer::{FLOOR_SHADER, MOBILE_SHADER};
use crate::gpu::uniforms::{FloorConstants, ViewConstants};
use crate::lighting::LightingUniform;
use crate::scene::{
    cube_indices, cube_stream, cube_vertices, floor_checker, floor_stream,
    instance_stream, MobileTextures, TextureImage, CUBE_INDEX_COUNT,
    FLOOR_INDICES, FLOOR_VERTICES,
};

/// Handles for everything drawn each frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SceneResources {
    /// Cube vertices (immutable).
    pub cube_vertices: BufferHandle,
    /// Cube indices (immutable).
    pub cube_indices: BufferHandle,
    /// Floor vertices (immutable).
    pub floor_vertices: BufferHandle,
    /// Floor indices (immutable).
    pub floor_indices: BufferHandle,
    /// Per-instance records, rewritten every frame.
    pub instances: BufferHandle,
    /// Mobile per-viewport constants (dynamic).
    pub view_constants: BufferHandle,
    /// Floor per-viewport constants (dynamic).
    pub floor_constants: BufferHandle,
    /// Per-frame lighting constants (dynamic).
    pub lighting: BufferHandle,
    /// Mobile pipeline.
    pub mobile_pipeline: PipelineHandle,
    /// Floor pipeline.
    pub floor_pipeline: PipelineHandle,
    /// Mobile resource binding.
    pub mobile_binding: BindingHandle,
    /// Floor resource binding.
    pub floor_binding: BindingHandle,
}

/// Index count of one mobile part.
pub(super) const MOBILE_INDEX_COUNT: u32 = CUBE_INDEX_COUNT as u32;
/// Index count of the floor quad.
pub(super) const FLOOR_INDEX_COUNT: u32 = FLOOR_INDICES.len() as u32;

/// Attach the failing label so the fatal error names the resource.
fn created<T>(
    label: &'static str,
    result: Result<T, DeviceError>,
) -> Result<T, TriviewError> {
    result.map_err(|source| {
        log::error!("failed to create '{label}': {source}");
        TriviewError::ResourceCreation {
            label: label.to_owned(),
            source,
        }
    })
}

fn immutable_buffer<D: RenderDevice + ?Sized>(
    device: &mut D,
    label: &'static str,
    bind_flags: BindFlags,
    bytes: &[u8],
) -> Result<BufferHandle, TriviewError> {
    let desc = BufferDesc {
        label,
        size: bytes.len() as u64,
        usage: ResourceUsage::Immutable,
        bind_flags,
    };
    created(label, device.create_buffer(&desc, Some(bytes)))
}

fn constant_buffer<D: RenderDevice + ?Sized>(
    device: &mut D,
    label: &'static str,
    size: usize,
) -> Result<BufferHandle, TriviewError> {
    let desc = BufferDesc {
        label,
        size: size as u64,
        usage: ResourceUsage::Dynamic,
        bind_flags: BindFlags::UNIFORM_BUFFER,
    };
    created(label, device.create_buffer(&desc, None))
}

fn texture<D: RenderDevice + ?Sized>(
    device: &mut D,
    image: &TextureImage,
) -> Result<TextureHandle, TriviewError> {
    let desc: &TextureDesc = &image.desc;
    created(desc.label, device.create_texture(desc, &image.pixels))
}

const fn uniform_slot(binding: u32) -> BindingSlot {
    BindingSlot {
        binding,
        kind: BindingKind::UniformBuffer,
        stages: ShaderStages::VERTEX.union(ShaderStages::FRAGMENT),
    }
}

const fn texture_slot(binding: u32) -> BindingSlot {
    BindingSlot {
        binding,
        kind: BindingKind::Texture,
        stages: ShaderStages::FRAGMENT,
    }
}

const fn sampler_slot(binding: u32) -> BindingSlot {
    BindingSlot {
        binding,
        kind: BindingKind::Sampler,
        stages: ShaderStages::FRAGMENT,
    }
}

/// Create buffers, textures, pipelines and bindings, in that order.
///
/// Each resource is attempted once; the first failure aborts with
/// [`TriviewError::ResourceCreation`].
pub(super) fn create_scene_resources<D: RenderDevice + ?Sized>(
    device: &mut D,
) -> Result<SceneResources, TriviewError> {
    let cube_vertices = immutable_buffer(
        device,
        "Cube Vertex Buffer",
        BindFlags::VERTEX_BUFFER,
        bytemuck::cast_slice(&cube_vertices()),
    )?;
    let cube_indices = immutable_buffer(
        device,
        "Cube Index Buffer",
        BindFlags::INDEX_BUFFER,
        bytemuck::cast_slice(&cube_indices()),
    )?;
    let floor_vertices = immutable_buffer(
        device,
        "Floor Vertex Buffer",
        BindFlags::VERTEX_BUFFER,
        bytemuck::cast_slice(&FLOOR_VERTICES),
    )?;
    let floor_indices = immutable_buffer(
        device,
        "Floor Index Buffer",
        BindFlags::INDEX_BUFFER,
        bytemuck::cast_slice(&FLOOR_INDICES),
    )?;

    let instance_desc = BufferDesc {
        label: "Instance Buffer",
        size: (INSTANCE_COUNT * size_of::<InstanceRecord>()) as u64,
        usage: ResourceUsage::Default,
        bind_flags: BindFlags::VERTEX_BUFFER,
    };
    let instances = created(
        instance_desc.label,
        device.create_buffer(&instance_desc, None),
    )?;

    let view_constants = constant_buffer(
        device,
        "View Constants",
        size_of::<ViewConstants>(),
    )?;
    let floor_constants = constant_buffer(
        device,
        "Floor Constants",
        size_of::<FloorConstants>(),
    )?;
    let lighting =
        constant_buffer(device, "Lighting Constants", size_of::<LightingUniform>())?;

    let mobile_textures = MobileTextures::generate();
    let base = texture(device, &mobile_textures.base)?;
    let detail = texture(device, &mobile_textures.detail)?;
    let blend_map = texture(device, &mobile_textures.blend_map)?;
    let alternate = texture(device, &mobile_textures.alternate)?;
    let floor_texture = texture(device, &floor_checker())?;

    let mobile_desc = PipelineDesc {
        label: "Mobile",
        shader: MOBILE_SHADER,
        vertex_streams: vec![cube_stream(), instance_stream()],
        bindings: vec![
            uniform_slot(0),
            uniform_slot(1),
            texture_slot(2),
            texture_slot(3),
            texture_slot(4),
            texture_slot(5),
            sampler_slot(6),
        ],
        depth_test: true,
    };
    let mobile_pipeline =
        created(mobile_desc.label, device.create_pipeline(&mobile_desc))?;

    let floor_desc = PipelineDesc {
        label: "Floor",
        shader: FLOOR_SHADER,
        vertex_streams: vec![floor_stream()],
        bindings: vec![
            uniform_slot(0),
            uniform_slot(1),
            texture_slot(2),
            sampler_slot(3),
        ],
        depth_test: true,
    };
    let floor_pipeline =
        created(floor_desc.label, device.create_pipeline(&floor_desc))?;

    let mobile_binding_desc = BindingDesc {
        label: "Mobile Bindings",
        pipeline: mobile_pipeline,
        resources: vec![
            (0, BindingResource::Buffer(view_constants)),
            (1, BindingResource::Buffer(lighting)),
            (2, BindingResource::Texture(base)),
            (3, BindingResource::Texture(detail)),
            (4, BindingResource::Texture(blend_map)),
            (5, BindingResource::Texture(alternate)),
            (6, BindingResource::Sampler),
        ],
    };
    let mobile_binding = created(
        mobile_binding_desc.label,
        device.create_binding(&mobile_binding_desc),
    )?;

    let floor_binding_desc = BindingDesc {
        label: "Floor Bindings",
        pipeline: floor_pipeline,
        resources: vec![
            (0, BindingResource::Buffer(floor_constants)),
            (1, BindingResource::Buffer(lighting)),
            (2, BindingResource::Texture(floor_texture)),
            (3, BindingResource::Sampler),
        ],
    };
    let floor_binding = created(
        floor_binding_desc.label,
        device.create_binding(&floor_binding_desc),
    )?;

    Ok(SceneResources {
        cube_vertices,
        cube_indices,
        floor_vertices,
        floor_indices,
        instances,
        view_constants,
        floor_constants,
        lighting,
        mobile_pipeline,
        floor_pipeline,
        mobile_binding,
        floor_binding,
    })
}
