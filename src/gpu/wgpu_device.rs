//! [`RenderDevice`] backed by wgpu.
//!
//! Every draw is recorded into its own render pass and submitted
//! immediately. `queue.write_buffer` calls issued between draws are
//! therefore ordered before the next draw, which is what lets a single
//! constant buffer carry different values for each viewport.

use wgpu::util::DeviceExt;

use super::device::{
    BindFlags, BindingDesc, BindingHandle, BindingResource, BufferDesc,
    BufferHandle, DeviceError, DrawIndexed, PipelineDesc, PipelineHandle,
    RenderDevice, ResourceUsage, TextureDesc, TextureFormat, TextureHandle,
    Viewport,
};
use super::pipeline_helpers;
use super::render_context::RenderContext;
use super::shader_composer::ShaderComposer;

struct GpuBuffer {
    buffer: wgpu::Buffer,
    size: u64,
    usage: ResourceUsage,
}

struct GpuPipeline {
    pipeline: wgpu::RenderPipeline,
    layout: wgpu::BindGroupLayout,
}

struct ActiveFrame {
    surface_texture: wgpu::SurfaceTexture,
    view: wgpu::TextureView,
}

/// GPU rendering device over a window surface.
pub struct WgpuDevice {
    context: RenderContext,
    composer: ShaderComposer,
    sampler: wgpu::Sampler,
    buffers: Vec<GpuBuffer>,
    textures: Vec<wgpu::TextureView>,
    pipelines: Vec<GpuPipeline>,
    bindings: Vec<wgpu::BindGroup>,
    frame: Option<ActiveFrame>,
    viewport: Option<Viewport>,
}

impl WgpuDevice {
    /// Wrap an initialized render context.
    ///
    /// # Errors
    ///
    /// [`DeviceError::Backend`] if the shared shader modules fail to parse.
    pub fn new(context: RenderContext) -> Result<Self, DeviceError> {
        let composer = ShaderComposer::new()
            .map_err(|e| DeviceError::Backend(e.to_string()))?;
        let sampler =
            pipeline_helpers::repeat_sampler(&context.device, "Scene Sampler");
        Ok(Self {
            context,
            composer,
            sampler,
            buffers: Vec::new(),
            textures: Vec::new(),
            pipelines: Vec::new(),
            bindings: Vec::new(),
            frame: None,
            viewport: None,
        })
    }

    /// The underlying render context.
    pub fn context(&self) -> &RenderContext {
        &self.context
    }

    /// Reconfigure the surface for a new window size.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.context.resize(width, height);
    }

    fn buffer(&self, handle: BufferHandle) -> Result<&GpuBuffer, DeviceError> {
        self.buffers
            .get(handle.0 as usize)
            .ok_or(DeviceError::UnknownHandle("buffer"))
    }

    fn pipeline(
        &self,
        handle: PipelineHandle,
    ) -> Result<&GpuPipeline, DeviceError> {
        self.pipelines
            .get(handle.0 as usize)
            .ok_or(DeviceError::UnknownHandle("pipeline"))
    }
}

fn buffer_usages(flags: BindFlags) -> wgpu::BufferUsages {
    let mut usages = wgpu::BufferUsages::COPY_DST;
    if flags.contains(BindFlags::VERTEX_BUFFER) {
        usages |= wgpu::BufferUsages::VERTEX;
    }
    if flags.contains(BindFlags::INDEX_BUFFER) {
        usages |= wgpu::BufferUsages::INDEX;
    }
    if flags.contains(BindFlags::UNIFORM_BUFFER) {
        usages |= wgpu::BufferUsages::UNIFORM;
    }
    usages
}

fn texture_format(format: TextureFormat) -> wgpu::TextureFormat {
    match format {
        TextureFormat::Rgba8UnormSrgb => wgpu::TextureFormat::Rgba8UnormSrgb,
        TextureFormat::Rgba8Unorm => wgpu::TextureFormat::Rgba8Unorm,
    }
}

fn handle_index(len: usize) -> u32 {
    len as u32
}

impl RenderDevice for WgpuDevice {
    fn create_buffer(
        &mut self,
        desc: &BufferDesc,
        initial: Option<&[u8]>,
    ) -> Result<BufferHandle, DeviceError> {
        if desc.size == 0 {
            return Err(DeviceError::InvalidDescriptor(format!(
                "{}: zero-sized buffer",
                desc.label
            )));
        }
        let usage = buffer_usages(desc.bind_flags);
        let buffer = match initial {
            Some(data) => {
                if data.len() as u64 != desc.size {
                    return Err(DeviceError::InvalidDescriptor(format!(
                        "{}: {} initial bytes for a {}-byte buffer",
                        desc.label,
                        data.len(),
                        desc.size
                    )));
                }
                self.context.device.create_buffer_init(
                    &wgpu::util::BufferInitDescriptor {
                        label: Some(desc.label),
                        contents: data,
                        usage,
                    },
                )
            }
            None if desc.usage == ResourceUsage::Immutable => {
                return Err(DeviceError::InvalidDescriptor(format!(
                    "{}: immutable buffer needs initial data",
                    desc.label
                )));
            }
            None => self.context.device.create_buffer(&wgpu::BufferDescriptor {
                label: Some(desc.label),
                size: desc.size,
                usage,
                mapped_at_creation: false,
            }),
        };
        log::debug!("created buffer '{}' ({} bytes)", desc.label, desc.size);
        let handle = BufferHandle(handle_index(self.buffers.len()));
        self.buffers.push(GpuBuffer {
            buffer,
            size: desc.size,
            usage: desc.usage,
        });
        Ok(handle)
    }

    fn create_texture(
        &mut self,
        desc: &TextureDesc,
        pixels: &[u8],
    ) -> Result<TextureHandle, DeviceError> {
        if pixels.len() != desc.byte_len() || desc.width == 0 {
            return Err(DeviceError::InvalidDescriptor(format!(
                "{}: {} bytes for {}x{} texture",
                desc.label,
                pixels.len(),
                desc.width,
                desc.height
            )));
        }
        let size = wgpu::Extent3d {
            width: desc.width,
            height: desc.height,
            depth_or_array_layers: 1,
        };
        let texture =
            self.context.device.create_texture(&wgpu::TextureDescriptor {
                label: Some(desc.label),
                size,
                mip_level_count: 1,
                sample_count: 1,
                dimension: wgpu::TextureDimension::D2,
                format: texture_format(desc.format),
                usage: wgpu::TextureUsages::TEXTURE_BINDING
                    | wgpu::TextureUsages::COPY_DST,
                view_formats: &[],
            });
        self.context.queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            pixels,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(desc.width * 4),
                rows_per_image: Some(desc.height),
            },
            size,
        );
        log::debug!(
            "created texture '{}' ({}x{})",
            desc.label,
            desc.width,
            desc.height
        );
        let handle = TextureHandle(handle_index(self.textures.len()));
        self.textures
            .push(texture.create_view(&wgpu::TextureViewDescriptor::default()));
        Ok(handle)
    }

    fn create_pipeline(
        &mut self,
        desc: &PipelineDesc,
    ) -> Result<PipelineHandle, DeviceError> {
        let shader = self
            .composer
            .compose(&self.context.device, desc.label, &desc.shader)
            .map_err(|e| {
                DeviceError::Backend(format!("{}: {e}", desc.shader.file_path))
            })?;

        let entries: Vec<wgpu::BindGroupLayoutEntry> = desc
            .bindings
            .iter()
            .map(pipeline_helpers::layout_entry)
            .collect();
        let layout = self.context.device.create_bind_group_layout(
            &wgpu::BindGroupLayoutDescriptor {
                label: Some(&format!("{} Bind Group Layout", desc.label)),
                entries: &entries,
            },
        );

        let attributes: Vec<Vec<wgpu::VertexAttribute>> = desc
            .vertex_streams
            .iter()
            .map(pipeline_helpers::vertex_attributes)
            .collect();
        let buffers: Vec<wgpu::VertexBufferLayout<'_>> = desc
            .vertex_streams
            .iter()
            .zip(&attributes)
            .map(|(stream, attrs)| {
                pipeline_helpers::vertex_buffer_layout(stream, attrs)
            })
            .collect();

        let pipeline = pipeline_helpers::create_scene_pipeline(
            &self.context.device,
            desc.label,
            &shader,
            self.context.format(),
            &buffers,
            &layout,
            desc.depth_test,
        );
        log::debug!("created pipeline '{}'", desc.label);
        let handle = PipelineHandle(handle_index(self.pipelines.len()));
        self.pipelines.push(GpuPipeline { pipeline, layout });
        Ok(handle)
    }

    fn create_binding(
        &mut self,
        desc: &BindingDesc,
    ) -> Result<BindingHandle, DeviceError> {
        let layout = &self.pipeline(desc.pipeline)?.layout;
        let mut entries = Vec::with_capacity(desc.resources.len());
        for &(binding, resource) in &desc.resources {
            let resource = match resource {
                BindingResource::Buffer(h) => {
                    self.buffer(h)?.buffer.as_entire_binding()
                }
                BindingResource::Texture(h) => wgpu::BindingResource::TextureView(
                    self.textures
                        .get(h.0 as usize)
                        .ok_or(DeviceError::UnknownHandle("texture"))?,
                ),
                BindingResource::Sampler => {
                    wgpu::BindingResource::Sampler(&self.sampler)
                }
            };
            entries.push(wgpu::BindGroupEntry { binding, resource });
        }
        let bind_group =
            self.context
                .device
                .create_bind_group(&wgpu::BindGroupDescriptor {
                    label: Some(desc.label),
                    layout,
                    entries: &entries,
                });
        let handle = BindingHandle(handle_index(self.bindings.len()));
        self.bindings.push(bind_group);
        Ok(handle)
    }

    fn map_write(
        &mut self,
        buffer: BufferHandle,
        size: u64,
        write: &mut dyn FnMut(&mut [u8]),
    ) -> Result<(), DeviceError> {
        let target = self.buffer(buffer)?;
        if target.usage != ResourceUsage::Dynamic {
            return Err(DeviceError::UsageMismatch {
                operation: "map_write",
                usage: target.usage,
            });
        }
        if size > target.size {
            return Err(DeviceError::OutOfRange {
                end: size,
                size: target.size,
            });
        }
        // Discard: the staging block starts zeroed, never with old contents.
        let mut staging = vec![0u8; size as usize];
        write(&mut staging);
        self.context.queue.write_buffer(&target.buffer, 0, &staging);
        Ok(())
    }

    fn update_buffer(
        &mut self,
        buffer: BufferHandle,
        offset: u64,
        data: &[u8],
    ) -> Result<(), DeviceError> {
        let target = self.buffer(buffer)?;
        if target.usage == ResourceUsage::Immutable {
            return Err(DeviceError::UsageMismatch {
                operation: "update_buffer",
                usage: target.usage,
            });
        }
        let end = offset + data.len() as u64;
        if end > target.size {
            return Err(DeviceError::OutOfRange {
                end,
                size: target.size,
            });
        }
        self.context.queue.write_buffer(&target.buffer, offset, data);
        Ok(())
    }

    fn begin_frame(&mut self, clear_color: [f32; 4]) -> Result<(), DeviceError> {
        let surface_texture =
            self.context.get_next_frame().map_err(|e| match e {
                wgpu::SurfaceError::Outdated | wgpu::SurfaceError::Lost => {
                    DeviceError::SurfaceLost
                }
                other => DeviceError::Backend(other.to_string()),
            })?;
        let view = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self.context.create_encoder("Clear Encoder");
        {
            let [r, g, b, a] = clear_color;
            let _pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Clear Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: r as f64,
                            g: g as f64,
                            b: b as f64,
                            a: a as f64,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: Some(
                    wgpu::RenderPassDepthStencilAttachment {
                        view: self.context.depth_view(),
                        depth_ops: Some(wgpu::Operations {
                            load: wgpu::LoadOp::Clear(1.0),
                            store: wgpu::StoreOp::Store,
                        }),
                        stencil_ops: None,
                    },
                ),
                ..Default::default()
            });
        }
        self.context.submit(encoder);

        self.frame = Some(ActiveFrame {
            surface_texture,
            view,
        });
        self.viewport = None;
        Ok(())
    }

    fn set_viewport(&mut self, viewport: &Viewport) {
        self.viewport = Some(*viewport);
    }

    fn draw_indexed(&mut self, draw: &DrawIndexed<'_>) -> Result<(), DeviceError> {
        let frame = self.frame.as_ref().ok_or(DeviceError::NoFrame)?;
        let pipeline = &self.pipeline(draw.pipeline)?.pipeline;
        let bind_group = self
            .bindings
            .get(draw.binding.0 as usize)
            .ok_or(DeviceError::UnknownHandle("binding"))?;
        let index_buffer = &self.buffer(draw.index_buffer)?.buffer;
        let mut vertex_buffers = Vec::with_capacity(draw.vertex_buffers.len());
        for &h in draw.vertex_buffers {
            vertex_buffers.push(&self.buffer(h)?.buffer);
        }

        let mut encoder = self.context.create_encoder("Draw Encoder");
        {
            let mut pass =
                encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("Scene Pass"),
                    color_attachments: &[Some(
                        wgpu::RenderPassColorAttachment {
                            view: &frame.view,
                            resolve_target: None,
                            ops: wgpu::Operations {
                                load: wgpu::LoadOp::Load,
                                store: wgpu::StoreOp::Store,
                            },
                            depth_slice: None,
                        },
                    )],
                    depth_stencil_attachment: Some(
                        wgpu::RenderPassDepthStencilAttachment {
                            view: self.context.depth_view(),
                            depth_ops: Some(wgpu::Operations {
                                load: wgpu::LoadOp::Load,
                                store: wgpu::StoreOp::Store,
                            }),
                            stencil_ops: None,
                        },
                    ),
                    ..Default::default()
                });
            if let Some(vp) = self.viewport {
                pass.set_viewport(
                    vp.x as f32,
                    vp.y as f32,
                    vp.width as f32,
                    vp.height as f32,
                    vp.min_depth,
                    vp.max_depth,
                );
            }
            pass.set_pipeline(pipeline);
            pass.set_bind_group(0, bind_group, &[]);
            for (slot, buffer) in vertex_buffers.iter().enumerate() {
                pass.set_vertex_buffer(slot as u32, buffer.slice(..));
            }
            pass.set_index_buffer(index_buffer.slice(..), wgpu::IndexFormat::Uint32);
            pass.draw_indexed(0..draw.index_count, 0, 0..draw.instance_count);
        }
        self.context.submit(encoder);
        Ok(())
    }

    fn end_frame(&mut self) -> Result<(), DeviceError> {
        let frame = self.frame.take().ok_or(DeviceError::NoFrame)?;
        frame.surface_texture.present();
        Ok(())
    }
}
