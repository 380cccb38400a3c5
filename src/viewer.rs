//! Standalone window backed by winit.
//!
//! ```no_run
//! # use orrery::Viewer;
//! Viewer::builder()
//!     .with_title("Landing")
//!     .build()
//!     .run()
//!     .unwrap();
//! ```

use std::sync::Arc;

use web_time::{Duration, Instant};
use winit::{
    application::ApplicationHandler,
    event::{ElementState, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::PhysicalKey,
    window::{Window, WindowId},
};

use crate::{
    error::OrreryError, gpu::render_context::RenderContext, options::Options,
    renderer::SceneRenderer, util::frame_timing::FrameTiming, Command,
    InputEvent, MouseButton, SceneEngine,
};

/// How often the smoothed frame rate is written to the debug log.
const FPS_LOG_INTERVAL: Duration = Duration::from_secs(5);

// ── Builder ──────────────────────────────────────────────────────────────

/// Fluent builder for [`Viewer`].
pub struct ViewerBuilder {
    options: Option<Options>,
    title: String,
}

impl ViewerBuilder {
    /// Create a builder with sensible defaults (title "Orrery", default
    /// options).
    fn new() -> Self {
        Self {
            options: None,
            title: "Orrery".into(),
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

    /// Consume the builder and produce a [`Viewer`].
    #[must_use]
    pub fn build(self) -> Viewer {
        Viewer {
            options: self.options.unwrap_or_default(),
            title: self.title,
        }
    }
}

// ── Viewer ───────────────────────────────────────────────────────────────

/// A standalone window that displays the landing scene.
///
/// Construct via [`Viewer::builder`], then call [`run`](Self::run) to
/// enter the event loop.
pub struct Viewer {
    options: Options,
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
    /// Returns [`OrreryError::Viewer`] if the event loop cannot be created
    /// or exits abnormally, or the first error hit while building the scene
    /// or the GPU context.
    pub fn run(self) -> Result<(), OrreryError> {
        let event_loop =
            EventLoop::new().map_err(|e| OrreryError::Viewer(e.to_string()))?;
        event_loop.set_control_flow(ControlFlow::Poll);

        let mut app = ViewerApp {
            window: None,
            engine: None,
            renderer: None,
            frame_timing: FrameTiming::new(),
            last_fps_log: Instant::now(),
            options: self.options,
            title: self.title,
            init_error: None,
        };

        event_loop
            .run_app(&mut app)
            .map_err(|e| OrreryError::Viewer(e.to_string()))?;
        app.init_error.map_or(Ok(()), Err)
    }
}

// ── Winit app ────────────────────────────────────────────────────────────

/// Internal winit application handler.
struct ViewerApp {
    window: Option<Arc<Window>>,
    engine: Option<SceneEngine>,
    renderer: Option<SceneRenderer>,
    frame_timing: FrameTiming,
    last_fps_log: Instant,
    options: Options,
    title: String,
    /// First fatal error raised while setting up; reported from `run`.
    init_error: Option<OrreryError>,
}

/// Compute the wgpu surface size (never zero).
fn viewport_size(inner: winit::dpi::PhysicalSize<u32>) -> (u32, u32) {
    (inner.width.max(1), inner.height.max(1))
}

impl ViewerApp {
    fn init(
        &self,
        window: &Arc<Window>,
    ) -> Result<(SceneEngine, SceneRenderer), OrreryError> {
        let viewport = viewport_size(window.inner_size());
        let engine = SceneEngine::new(self.options.clone(), viewport)?;
        let context = pollster::block_on(RenderContext::new(window.clone(), viewport))?;
        let renderer = SceneRenderer::new(context, &engine);
        Ok((engine, renderer))
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, error: OrreryError) {
        log::error!("{error}");
        self.init_error = Some(error);
        event_loop.exit();
    }

    fn redraw(&mut self) {
        let (Some(engine), Some(renderer)) = (&mut self.engine, &mut self.renderer) else {
            return;
        };
        let dt = self.frame_timing.tick();
        let _ = engine.tick(dt);

        match renderer.render(engine) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Outdated | wgpu::SurfaceError::Lost) => {
                log::debug!("surface lost or outdated, reconfiguring");
                renderer.reconfigure();
            }
            Err(e) => {
                log::error!("render error: {e:?}");
            }
        }

        if self.last_fps_log.elapsed() >= FPS_LOG_INTERVAL {
            log::debug!("{:.1} fps", self.frame_timing.fps());
            self.last_fps_log = Instant::now();
        }
    }
}

impl ApplicationHandler for ViewerApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let monitor = event_loop
            .primary_monitor()
            .or_else(|| event_loop.available_monitors().next());
        let attrs = if let Some(mon) = &monitor {
            let mon_size = mon.size();
            let scale = mon.scale_factor();
            let logical_w = (f64::from(mon_size.width) / scale * 0.75) as u32;
            let logical_h = (f64::from(mon_size.height) / scale * 0.75) as u32;
            Window::default_attributes()
                .with_title(&self.title)
                .with_inner_size(winit::dpi::LogicalSize::new(
                    logical_w, logical_h,
                ))
        } else {
            Window::default_attributes().with_title(&self.title)
        };

        let window = match event_loop.create_window(attrs) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                self.fail(event_loop, OrreryError::Viewer(e.to_string()));
                return;
            }
        };

        match self.init(&window) {
            Ok((engine, renderer)) => {
                self.engine = Some(engine);
                self.renderer = Some(renderer);
            }
            Err(e) => {
                self.fail(event_loop, e);
                return;
            }
        }

        self.frame_timing = FrameTiming::new();
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

        let (Some(window), Some(engine)) = (self.window.clone(), self.engine.as_mut()) else {
            return;
        };

        match event {
            WindowEvent::Resized(event_size) => {
                let (width, height) = viewport_size(event_size);
                engine.execute(Command::Resize { width, height });
                if let Some(renderer) = &mut self.renderer {
                    renderer.resize(width, height);
                }
            }

            WindowEvent::RedrawRequested => {
                self.redraw();
                window.request_redraw();
            }

            WindowEvent::MouseInput { button, state, .. } => {
                engine.handle_input(InputEvent::MouseButton {
                    button: MouseButton::from(button),
                    pressed: state == ElementState::Pressed,
                });
            }

            WindowEvent::CursorMoved { position, .. } => {
                engine.handle_input(InputEvent::CursorMoved {
                    x: position.x as f32,
                    y: position.y as f32,
                });
            }

            WindowEvent::MouseWheel { delta, .. } => {
                engine.handle_input(InputEvent::from(delta));
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if event.state != ElementState::Pressed || event.repeat {
                    return;
                }
                let PhysicalKey::Code(code) = event.physical_key else {
                    return;
                };
                let key_str = format!("{code:?}");
                if !engine.handle_key_press(&key_str) {
                    log::trace!("unbound key {key_str}");
                }
            }

            _ => (),
        }
    }
}
