//! Per-frame update and draw sequencing.

use glam::Mat4;

use super::construction::{FLOOR_INDEX_COUNT, MOBILE_INDEX_COUNT};
use super::viewport::partition;
use super::{FrameOrchestrator, CLEAR_COLOR};
use crate::animation::INSTANCE_COUNT;
use crate::camera::projection::{perspective, view_projection};
use crate::error::TriviewError;
use crate::gpu::device::{write_pod, DrawIndexed, RenderDevice};
use crate::gpu::uniforms::{FloorConstants, ViewConstants};
use crate::lighting::LightingStateCalculator;

/// Global rotation rates (radians per second) about X and Y.
const ROTATION_RATE_X: f32 = -0.05;
const ROTATION_RATE_Y: f32 = 0.1;

/// Decorative rotation shared by all viewports: Y turn applied after the X
/// tilt.
#[must_use]
pub fn global_rotation(elapsed: f32) -> Mat4 {
    Mat4::from_rotation_y(elapsed * ROTATION_RATE_Y)
        * Mat4::from_rotation_x(elapsed * ROTATION_RATE_X)
}

impl FrameOrchestrator {
    /// Render one frame, measuring the elapsed time since the previous call.
    ///
    /// # Errors
    ///
    /// See [`render_frame`](Self::render_frame).
    pub fn render<D: RenderDevice + ?Sized>(
        &mut self,
        device: &mut D,
    ) -> Result<(), TriviewError> {
        let dt = self.timing.tick();
        self.render_frame(device, dt)
    }

    /// Advance the animation and record one frame:
    ///
    /// 1. generate the 24 instance records and upload them,
    /// 2. compute the three view matrices and the shared projection,
    /// 3. write the frame's lighting constants,
    /// 4. for viewports 0, 1, 2: write the per-view constants, draw the
    ///    floor, then draw the instanced mobile.
    ///
    /// `dt` (seconds) only advances the global rotation; the mobile's
    /// phases advance a fixed step per call. A zero-sized surface skips the
    /// frame entirely.
    ///
    /// # Errors
    ///
    /// [`TriviewError::Frame`] if the device rejects a call. A lost surface
    /// is reported as [`DeviceError::SurfaceLost`] for the host to
    /// reconfigure.
    ///
    /// [`DeviceError::SurfaceLost`]: crate::gpu::device::DeviceError::SurfaceLost
    pub fn render_frame<D: RenderDevice + ?Sized>(
        &mut self,
        device: &mut D,
        dt: f32,
    ) -> Result<(), TriviewError> {
        let (width, height) = self.surface_size;
        let viewports = partition(width, height);
        if viewports[0].width == 0 || height == 0 {
            return Ok(());
        }
        self.elapsed += dt.max(0.0);

        let records = self.generator.next_frame();
        device.update_buffer(
            self.resources.instances,
            0,
            bytemuck::cast_slice(&records),
        )?;

        let views = self.cameras.view_matrices();
        let projection =
            perspective(viewports[0].aspect(), self.surface_transform);
        let rotation = global_rotation(self.elapsed);

        let lighting = LightingStateCalculator::uniform(
            &self.lighting,
            self.cameras.eye_position(),
        );
        write_pod(device, self.resources.lighting, &[lighting])?;

        device.begin_frame(CLEAR_COLOR.to_array())?;
        let r = &self.resources;
        for (viewport, view) in viewports.iter().zip(views) {
            device.set_viewport(viewport);
            let view_proj =
                view_projection(view, self.surface_transform, projection);
            write_pod(
                device,
                r.view_constants,
                &[ViewConstants::new(view_proj, rotation)],
            )?;
            write_pod(
                device,
                r.floor_constants,
                &[FloorConstants::new(view_proj)],
            )?;

            device.draw_indexed(&DrawIndexed {
                pipeline: r.floor_pipeline,
                binding: r.floor_binding,
                vertex_buffers: &[r.floor_vertices],
                index_buffer: r.floor_indices,
                index_count: FLOOR_INDEX_COUNT,
                instance_count: 1,
            })?;
            device.draw_indexed(&DrawIndexed {
                pipeline: r.mobile_pipeline,
                binding: r.mobile_binding,
                vertex_buffers: &[r.cube_vertices, r.instances],
                index_buffer: r.cube_indices,
                index_count: MOBILE_INDEX_COUNT,
                instance_count: INSTANCE_COUNT as u32,
            })?;
        }
        device.end_frame()?;
        Ok(())
    }
}
