//! Recording [`RenderDevice`] for unit tests (no GPU required).
//!
//! Keeps a CPU copy of every buffer and logs each call so tests can assert
//! on ordering and on the exact bytes visible to a draw.

use super::device::{
    BindingDesc, BindingHandle, BufferDesc, BufferHandle, DeviceError,
    DrawIndexed, PipelineDesc, PipelineHandle, RenderDevice, ResourceUsage,
    TextureDesc, TextureHandle, Viewport,
};

/// One logged device call.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Command {
    CreateBuffer(&'static str),
    CreateTexture(&'static str),
    CreatePipeline(&'static str),
    CreateBinding(&'static str),
    MapWrite(BufferHandle),
    UpdateBuffer(BufferHandle),
    BeginFrame([f32; 4]),
    SetViewport(Viewport),
    Draw {
        pipeline: PipelineHandle,
        index_count: u32,
        instance_count: u32,
        /// Snapshot of every dynamic buffer at submission time.
        constants: Vec<(BufferHandle, Vec<u8>)>,
    },
    EndFrame,
}

pub(crate) struct RecordedBuffer {
    pub label: &'static str,
    pub usage: ResourceUsage,
    pub data: Vec<u8>,
}

#[derive(Default)]
pub(crate) struct RecordingDevice {
    pub commands: Vec<Command>,
    pub buffers: Vec<RecordedBuffer>,
    pub textures: Vec<(&'static str, Vec<u8>)>,
    pub pipelines: Vec<&'static str>,
    bindings: usize,
    in_frame: bool,
    /// Creation of any resource with this label fails.
    pub fail_label: Option<&'static str>,
    /// `begin_frame` reports a lost surface once.
    pub lose_surface: bool,
}

impl RecordingDevice {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_on(label: &'static str) -> Self {
        Self {
            fail_label: Some(label),
            ..Self::default()
        }
    }

    pub fn buffer_named(&self, label: &str) -> Option<BufferHandle> {
        self.buffers
            .iter()
            .position(|b| b.label == label)
            .map(|i| BufferHandle(i as u32))
    }

    pub fn data(&self, handle: BufferHandle) -> &[u8] {
        &self.buffers[handle.0 as usize].data
    }

    pub fn draws(&self) -> Vec<&Command> {
        self.commands
            .iter()
            .filter(|c| matches!(c, Command::Draw { .. }))
            .collect()
    }

    pub fn clear_log(&mut self) {
        self.commands.clear();
    }

    fn check_label(&self, label: &'static str) -> Result<(), DeviceError> {
        if self.fail_label == Some(label) {
            Err(DeviceError::Backend(format!("{label}: injected failure")))
        } else {
            Ok(())
        }
    }

    fn buffer_mut(
        &mut self,
        handle: BufferHandle,
    ) -> Result<&mut RecordedBuffer, DeviceError> {
        self.buffers
            .get_mut(handle.0 as usize)
            .ok_or(DeviceError::UnknownHandle("buffer"))
    }
}

impl RenderDevice for RecordingDevice {
    fn create_buffer(
        &mut self,
        desc: &BufferDesc,
        initial: Option<&[u8]>,
    ) -> Result<BufferHandle, DeviceError> {
        self.check_label(desc.label)?;
        if desc.size == 0 {
            return Err(DeviceError::InvalidDescriptor(desc.label.to_owned()));
        }
        let data = match initial {
            Some(bytes) => bytes.to_vec(),
            None if desc.usage == ResourceUsage::Immutable => {
                return Err(DeviceError::InvalidDescriptor(
                    desc.label.to_owned(),
                ));
            }
            None => vec![0; desc.size as usize],
        };
        self.commands.push(Command::CreateBuffer(desc.label));
        self.buffers.push(RecordedBuffer {
            label: desc.label,
            usage: desc.usage,
            data,
        });
        Ok(BufferHandle(self.buffers.len() as u32 - 1))
    }

    fn create_texture(
        &mut self,
        desc: &TextureDesc,
        pixels: &[u8],
    ) -> Result<TextureHandle, DeviceError> {
        self.check_label(desc.label)?;
        if pixels.len() != desc.byte_len() {
            return Err(DeviceError::InvalidDescriptor(desc.label.to_owned()));
        }
        self.commands.push(Command::CreateTexture(desc.label));
        self.textures.push((desc.label, pixels.to_vec()));
        Ok(TextureHandle(self.textures.len() as u32 - 1))
    }

    fn create_pipeline(
        &mut self,
        desc: &PipelineDesc,
    ) -> Result<PipelineHandle, DeviceError> {
        self.check_label(desc.label)?;
        self.commands.push(Command::CreatePipeline(desc.label));
        self.pipelines.push(desc.label);
        Ok(PipelineHandle(self.pipelines.len() as u32 - 1))
    }

    fn create_binding(
        &mut self,
        desc: &BindingDesc,
    ) -> Result<BindingHandle, DeviceError> {
        self.check_label(desc.label)?;
        if desc.pipeline.0 as usize >= self.pipelines.len() {
            return Err(DeviceError::UnknownHandle("pipeline"));
        }
        self.commands.push(Command::CreateBinding(desc.label));
        self.bindings += 1;
        Ok(BindingHandle(self.bindings as u32 - 1))
    }

    fn map_write(
        &mut self,
        buffer: BufferHandle,
        size: u64,
        write: &mut dyn FnMut(&mut [u8]),
    ) -> Result<(), DeviceError> {
        let target = self.buffer_mut(buffer)?;
        if target.usage != ResourceUsage::Dynamic {
            return Err(DeviceError::UsageMismatch {
                operation: "map_write",
                usage: target.usage,
            });
        }
        let len = target.data.len() as u64;
        if size > len {
            return Err(DeviceError::OutOfRange { end: size, size: len });
        }
        target.data.fill(0);
        write(&mut target.data[..size as usize]);
        self.commands.push(Command::MapWrite(buffer));
        Ok(())
    }

    fn update_buffer(
        &mut self,
        buffer: BufferHandle,
        offset: u64,
        data: &[u8],
    ) -> Result<(), DeviceError> {
        let target = self.buffer_mut(buffer)?;
        if target.usage == ResourceUsage::Immutable {
            return Err(DeviceError::UsageMismatch {
                operation: "update_buffer",
                usage: target.usage,
            });
        }
        let end = offset + data.len() as u64;
        let len = target.data.len() as u64;
        if end > len {
            return Err(DeviceError::OutOfRange { end, size: len });
        }
        target.data[offset as usize..end as usize].copy_from_slice(data);
        self.commands.push(Command::UpdateBuffer(buffer));
        Ok(())
    }

    fn begin_frame(&mut self, clear_color: [f32; 4]) -> Result<(), DeviceError> {
        if self.lose_surface {
            self.lose_surface = false;
            return Err(DeviceError::SurfaceLost);
        }
        self.in_frame = true;
        self.commands.push(Command::BeginFrame(clear_color));
        Ok(())
    }

    fn set_viewport(&mut self, viewport: &Viewport) {
        self.commands.push(Command::SetViewport(*viewport));
    }

    fn draw_indexed(&mut self, draw: &DrawIndexed<'_>) -> Result<(), DeviceError> {
        if !self.in_frame {
            return Err(DeviceError::NoFrame);
        }
        let constants = self
            .buffers
            .iter()
            .enumerate()
            .filter(|(_, b)| b.usage == ResourceUsage::Dynamic)
            .map(|(i, b)| (BufferHandle(i as u32), b.data.clone()))
            .collect();
        self.commands.push(Command::Draw {
            pipeline: draw.pipeline,
            index_count: draw.index_count,
            instance_count: draw.instance_count,
            constants,
        });
        Ok(())
    }

    fn end_frame(&mut self) -> Result<(), DeviceError> {
        if !self.in_frame {
            return Err(DeviceError::NoFrame);
        }
        self.in_frame = false;
        self.commands.push(Command::EndFrame);
        Ok(())
    }
}
