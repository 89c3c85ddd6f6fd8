//! Standalone three-viewport window backed by winit.
//!
//! ```no_run
//! # use triview::Viewer;
//! Viewer::builder()
//!     .with_title("Triview")
//!     .build()
//!     .run()
//!     .unwrap();
//! ```

use std::sync::Arc;

use winit::{
    application::ApplicationHandler,
    event::{ElementState, MouseButton, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::PhysicalKey,
    window::{Window, WindowId},
};

use crate::{
    engine::FrameOrchestrator,
    error::TriviewError,
    gpu::{
        device::DeviceError, render_context::RenderContext,
        wgpu_device::WgpuDevice,
    },
    input::{wheel_steps, PointerEvent},
    options::Options,
};

// ── Builder ──────────────────────────────────────────────────────────────

/// Fluent builder for [`Viewer`].
pub struct ViewerBuilder {
    options: Option<Options>,
    title: String,
}

impl ViewerBuilder {
    /// Create a builder with sensible defaults (title "Triview", default
    /// options).
    fn new() -> Self {
        Self {
            options: None,
            title: "Triview".into(),
        }
    }

    /// Override the default options.
    #[must_use]
    pub fn with_options(mut self, options: Options) -> Self {
        self.options = Some(options);
        self
    }

    /// Set the window title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Build the viewer.
    #[must_use]
    pub fn build(self) -> Viewer {
        Viewer {
            options: self.options,
            title: self.title,
        }
    }
}

// ── Viewer ───────────────────────────────────────────────────────────────

/// A standalone window showing the mobile through three cameras.
///
/// Construct via [`Viewer::builder`], then call [`run`](Self::run) to
/// enter the event loop.
pub struct Viewer {
    options: Option<Options>,
    title: String,
}

impl Viewer {
    /// Start a new builder.
    #[must_use]
    pub fn builder() -> ViewerBuilder {
        ViewerBuilder::new()
    }

    /// Open the window and run the event loop. Blocks until the window is
    /// closed.
    ///
    /// # Errors
    ///
    /// [`TriviewError::Viewer`] if the event loop cannot be created or
    /// exits abnormally.
    pub fn run(self) -> Result<(), TriviewError> {
        let event_loop = EventLoop::new()
            .map_err(|e| TriviewError::Viewer(e.to_string()))?;
        event_loop.set_control_flow(ControlFlow::Poll);

        let mut app = ViewerApp {
            window: None,
            session: None,
            cursor: (0.0, 0.0),
            options: self.options,
            title: self.title,
        };

        event_loop
            .run_app(&mut app)
            .map_err(|e| TriviewError::Viewer(e.to_string()))
    }
}

// ── Winit app ────────────────────────────────────────────────────────────

/// GPU device plus the orchestrator drawing on it.
struct Session {
    device: WgpuDevice,
    orchestrator: FrameOrchestrator,
}

impl Session {
    fn new(
        window: Arc<Window>,
        size: (u32, u32),
        options: &Options,
    ) -> Result<Self, TriviewError> {
        let context = pollster::block_on(RenderContext::new(window, size))?;
        let mut device = WgpuDevice::new(context).map_err(|source| {
            TriviewError::ResourceCreation {
                label: "Shader Composer".to_owned(),
                source,
            }
        })?;
        let orchestrator =
            FrameOrchestrator::with_options(&mut device, size, options)?;
        Ok(Self {
            device,
            orchestrator,
        })
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.device.resize(width, height);
        self.orchestrator.resize(width, height);
    }
}

/// Internal winit application handler.
struct ViewerApp {
    window: Option<Arc<Window>>,
    session: Option<Session>,
    /// Last cursor position in physical pixels.
    cursor: (f32, f32),
    options: Option<Options>,
    title: String,
}

impl ViewerApp {
    fn pointer(&mut self, event: &PointerEvent) {
        if let Some(session) = &mut self.session {
            if session.orchestrator.handle_pointer(event) {
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
        }
    }

    fn redraw(&mut self) {
        let (Some(window), Some(session)) = (&self.window, &mut self.session)
        else {
            return;
        };
        match session.orchestrator.render(&mut session.device) {
            Ok(()) => {}
            Err(TriviewError::Frame(DeviceError::SurfaceLost)) => {
                let inner = window.inner_size();
                session.resize(inner.width, inner.height);
            }
            Err(e) => log::error!("render error: {e}"),
        }
        window.request_redraw();
    }
}

impl ApplicationHandler for ViewerApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attrs = Window::default_attributes()
            .with_title(&self.title)
            .with_inner_size(winit::dpi::LogicalSize::new(1440, 480));
        let window = match event_loop.create_window(attrs) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                log::error!("Failed to create window: {e}");
                event_loop.exit();
                return;
            }
        };

        let inner = window.inner_size();
        let options = self.options.take().unwrap_or_default();
        match Session::new(window.clone(), (inner.width, inner.height), &options)
        {
            Ok(session) => self.session = Some(session),
            Err(e) => {
                log::error!("Failed to initialize renderer: {e}");
                event_loop.exit();
                return;
            }
        }

        window.request_redraw();
        self.window = Some(window);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _id: WindowId,
        event: WindowEvent,
    ) {
        if matches!(event, WindowEvent::CloseRequested) {
            event_loop.exit();
            return;
        }

        match event {
            WindowEvent::Resized(size) => {
                if let Some(session) = &mut self.session {
                    session.resize(size.width, size.height);
                }
            }
            WindowEvent::RedrawRequested => self.redraw(),
            WindowEvent::CursorMoved { position, .. } => {
                self.cursor = (position.x as f32, position.y as f32);
                let (x, y) = self.cursor;
                self.pointer(&PointerEvent::moved(x, y));
            }
            WindowEvent::MouseInput {
                button: MouseButton::Left,
                state,
                ..
            } => {
                let (x, y) = self.cursor;
                let event = match state {
                    ElementState::Pressed => PointerEvent::button_down(x, y),
                    ElementState::Released => PointerEvent::button_up(x, y),
                };
                self.pointer(&event);
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let (x, y) = self.cursor;
                self.pointer(&PointerEvent::wheel(x, y, wheel_steps(delta)));
            }
            WindowEvent::KeyboardInput { event, .. } => {
                if event.state != ElementState::Pressed {
                    return;
                }
                if let (Some(session), PhysicalKey::Code(code)) =
                    (&mut self.session, event.physical_key)
                {
                    let _ = session.orchestrator.handle_key(&format!("{code:?}"));
                }
            }
            _ => (),
        }
    }
}
