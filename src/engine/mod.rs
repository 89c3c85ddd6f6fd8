//! Top-level per-frame driver.
//!
//! [`FrameOrchestrator`] owns all session state (camera windows, animation
//! phase, lighting, bindings) and the handles of the resources it created on
//! the [`RenderDevice`]. The host forwards input and option writes between
//! frames and calls [`FrameOrchestrator::render_frame`] once per frame.

mod construction;
mod frame;
mod input;
mod options;
pub mod viewport;

pub use construction::SceneResources;
use glam::Vec4;

use crate::animation::InstanceTransformGenerator;
use crate::camera::{CameraController, SurfaceTransform};
use crate::error::TriviewError;
use crate::gpu::device::RenderDevice;
use crate::lighting::SceneLightingState;
use crate::options::{KeybindingOptions, Options};
use crate::util::frame_timing::FrameTiming;

/// Background color every frame starts from.
pub const CLEAR_COLOR: Vec4 = Vec4::new(0.35, 0.35, 0.35, 1.0);

/// Owns the scene state and sequences each frame's device calls.
pub struct FrameOrchestrator {
    cameras: CameraController,
    generator: InstanceTransformGenerator,
    lighting: SceneLightingState,
    keybindings: KeybindingOptions,
    surface_transform: SurfaceTransform,
    surface_size: (u32, u32),
    /// Seconds since start, drives the global rotation.
    elapsed: f32,
    timing: FrameTiming,
    resources: SceneResources,
}

impl FrameOrchestrator {
    /// Create every scene resource on `device` and start from default
    /// options.
    ///
    /// # Errors
    ///
    /// [`TriviewError::ResourceCreation`] if any resource cannot be
    /// created. Nothing is retried and no partial orchestrator is returned.
    pub fn new<D: RenderDevice + ?Sized>(
        device: &mut D,
        surface_size: (u32, u32),
    ) -> Result<Self, TriviewError> {
        Self::with_options(device, surface_size, &Options::default())
    }

    /// Like [`new`](Self::new), starting from `options`.
    ///
    /// # Errors
    ///
    /// [`TriviewError::ResourceCreation`] if any resource cannot be
    /// created.
    pub fn with_options<D: RenderDevice + ?Sized>(
        device: &mut D,
        surface_size: (u32, u32),
        options: &Options,
    ) -> Result<Self, TriviewError> {
        let resources = construction::create_scene_resources(device)?;
        log::info!(
            "scene resources ready ({}x{} surface)",
            surface_size.0,
            surface_size.1
        );
        let mut orchestrator = Self {
            cameras: CameraController::new(),
            generator: InstanceTransformGenerator::new(),
            lighting: SceneLightingState::default(),
            keybindings: KeybindingOptions::default(),
            surface_transform: SurfaceTransform::default(),
            surface_size,
            elapsed: 0.0,
            timing: FrameTiming::new(),
            resources,
        };
        orchestrator.set_options(options);
        Ok(orchestrator)
    }

    /// Track a new render-target size. Viewports and the projection aspect
    /// follow on the next frame.
    pub fn resize(&mut self, width: u32, height: u32) {
        if self.surface_size != (width, height) {
            log::info!("surface resized to {width}x{height}");
        }
        self.surface_size = (width, height);
    }

    /// Set the orientation pretransform supplied by the presentation
    /// surface.
    pub fn set_surface_transform(&mut self, transform: SurfaceTransform) {
        self.surface_transform = transform;
    }

    /// Current render-target size.
    #[must_use]
    pub fn surface_size(&self) -> (u32, u32) {
        self.surface_size
    }

    /// Camera windows and pointer state.
    #[must_use]
    pub fn cameras(&self) -> &CameraController {
        &self.cameras
    }

    /// Mutable camera windows (for hosts driving parameters directly).
    pub fn cameras_mut(&mut self) -> &mut CameraController {
        &mut self.cameras
    }

    /// The instance generator and its phase.
    #[must_use]
    pub fn generator(&self) -> &InstanceTransformGenerator {
        &self.generator
    }

    /// UI-bound lighting state.
    #[must_use]
    pub fn lighting(&self) -> &SceneLightingState {
        &self.lighting
    }

    /// Handles of the created scene resources.
    #[must_use]
    pub fn resources(&self) -> &SceneResources {
        &self.resources
    }

    /// Smoothed frames per second.
    #[must_use]
    pub fn fps(&self) -> f32 {
        self.timing.fps()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gpu::recording::{Command, RecordingDevice};

    #[test]
    fn creation_failure_is_fatal_and_named() {
        let mut device = RecordingDevice::failing_on("Floor Constants");
        let result = FrameOrchestrator::new(&mut device, (900, 600));
        match result {
            Err(TriviewError::ResourceCreation { label, .. }) => {
                assert_eq!(label, "Floor Constants");
            }
            Err(other) => panic!("unexpected error: {other}"),
            Ok(_) => panic!("orchestrator built despite failed resource"),
        }
        // Nothing after the failing resource was attempted
        assert!(!device
            .commands
            .iter()
            .any(|c| matches!(c, Command::CreatePipeline(_))));
    }

    #[test]
    fn creates_every_resource_once() {
        let mut device = RecordingDevice::new();
        let _orchestrator =
            FrameOrchestrator::new(&mut device, (900, 600)).unwrap();
        let count = |f: fn(&Command) -> bool| {
            device.commands.iter().filter(|c| f(c)).count()
        };
        assert_eq!(count(|c| matches!(c, Command::CreateBuffer(_))), 8);
        assert_eq!(count(|c| matches!(c, Command::CreateTexture(_))), 5);
        assert_eq!(count(|c| matches!(c, Command::CreatePipeline(_))), 2);
        assert_eq!(count(|c| matches!(c, Command::CreateBinding(_))), 2);
        let instance = device.buffer_named("Instance Buffer").unwrap();
        assert_eq!(device.data(instance).len(), 24 * 68);
    }

    #[test]
    fn floor_texture_reaches_the_device() {
        let mut device = RecordingDevice::new();
        let _orchestrator =
            FrameOrchestrator::new(&mut device, (900, 600)).unwrap();
        let (_, pixels) = device
            .textures
            .iter()
            .find(|(label, _)| *label == "Floor Texture")
            .unwrap();
        assert_eq!(pixels.len(), 256 * 256 * 4);
        assert_eq!(pixels[..4], [128, 128, 128, 255]);
    }
}
