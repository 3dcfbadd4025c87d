// Copyright 2025 the Simscope Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The winit application that owns the window and drives frames.

use std::num::NonZeroUsize;
use std::sync::Arc;
use std::time::{Duration, Instant};

use kurbo::Affine;
use simscope_core::FrameSnapshot;
use simscope_display::DisplayState;
use simscope_layout::{CardStyle, FrameComposer, Size, Theme};
use simscope_text_parley::ParleyTextMeasurer;
use tracing::{debug, error, info, warn};
use vello::util::{RenderContext, RenderSurface};
use vello::{AaConfig, AaSupport, RenderParams, Renderer, RendererOptions, Scene};
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{Key, NamedKey};
use winit::window::{Window, WindowId};

use crate::error::ViewerError;
use crate::painter::paint_marks;

/// When the viewer draws a new frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RedrawPolicy {
    /// Draw every frame the display allows (vsync-paced).
    #[default]
    Continuous,
    /// Draw only after the display state changed, checking every `poll`.
    OnChange {
        /// How often to look for changes while idle.
        poll: Duration,
    },
}

impl RedrawPolicy {
    /// Whether a frame is due, given the generation last drawn and the current one.
    pub fn needs_redraw(&self, drawn: Option<u64>, current: u64) -> bool {
        match self {
            Self::Continuous => true,
            Self::OnChange { .. } => drawn != Some(current),
        }
    }
}

/// Window and rendering configuration.
#[derive(Clone, Debug, PartialEq)]
pub struct ViewerOptions {
    /// Window title.
    pub title: String,
    /// Initial inner size in logical pixels.
    pub initial_size: Size,
    /// Overlay colors and spacing.
    pub theme: Theme,
    /// Measure card metrics.
    pub card_style: CardStyle,
    /// Preferred font family; sans-serif when unset or missing.
    pub font_family: Option<String>,
    /// Frame pacing.
    pub redraw: RedrawPolicy,
}

impl Default for ViewerOptions {
    fn default() -> Self {
        Self {
            title: String::from("simscope"),
            initial_size: Size::new(1280.0, 800.0),
            theme: Theme::default(),
            card_style: CardStyle::default(),
            font_family: None,
            redraw: RedrawPolicy::Continuous,
        }
    }
}

impl ViewerOptions {
    /// Sets the window title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Sets the initial inner size in logical pixels.
    pub fn with_initial_size(mut self, initial_size: Size) -> Self {
        self.initial_size = initial_size;
        self
    }

    /// Sets the theme.
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Sets the measure card metrics.
    pub fn with_card_style(mut self, card_style: CardStyle) -> Self {
        self.card_style = card_style;
        self
    }

    /// Prefers a named font family for all overlay text.
    pub fn with_font_family(mut self, family: impl Into<String>) -> Self {
        self.font_family = Some(family.into());
        self
    }

    /// Sets the redraw policy.
    pub fn with_redraw(mut self, redraw: RedrawPolicy) -> Self {
        self.redraw = redraw;
        self
    }

    fn text_measurer(&self) -> ParleyTextMeasurer {
        match &self.font_family {
            Some(family) => ParleyTextMeasurer::new().with_family(family.clone()),
            None => ParleyTextMeasurer::new(),
        }
    }

    fn composer(&self) -> FrameComposer {
        FrameComposer::new(self.theme).with_card_style(self.card_style)
    }
}

/// A window showing the overlay for one [`DisplayState`].
#[derive(Debug)]
pub struct Viewer {
    state: Arc<DisplayState>,
    options: ViewerOptions,
}

impl Viewer {
    /// Creates a viewer with fresh, empty display state.
    pub fn new(options: ViewerOptions) -> Self {
        Self::with_state(Arc::new(DisplayState::new()), options)
    }

    /// Creates a viewer for existing display state.
    pub fn with_state(state: Arc<DisplayState>, options: ViewerOptions) -> Self {
        Self { state, options }
    }

    /// The display state producers publish to.
    pub fn state(&self) -> &Arc<DisplayState> {
        &self.state
    }

    /// The viewer configuration.
    pub fn options(&self) -> &ViewerOptions {
        &self.options
    }

    /// Opens the window and runs the event loop on the calling thread until the window is
    /// closed or Escape is pressed.
    ///
    /// Some platforms require this to be the main thread. The first error that stops the
    /// loop is returned.
    pub fn run(self) -> Result<(), ViewerError> {
        let event_loop = EventLoop::new()?;
        let mut app = App::new(self.state, self.options);
        event_loop.run_app(&mut app)?;
        app.error.map_or(Ok(()), Err)
    }
}

struct App {
    state: Arc<DisplayState>,
    options: ViewerOptions,
    composer: FrameComposer,
    window: Option<Arc<Window>>,
    render_cx: RenderContext,
    surface: Option<RenderSurface<'static>>,
    renderer: Option<Renderer>,
    scene: Scene,
    text: ParleyTextMeasurer,
    snapshot: FrameSnapshot,
    drawn_generation: Option<u64>,
    error: Option<ViewerError>,
}

impl App {
    fn new(state: Arc<DisplayState>, options: ViewerOptions) -> Self {
        Self {
            state,
            composer: options.composer(),
            text: options.text_measurer(),
            options,
            window: None,
            render_cx: RenderContext::new(),
            surface: None,
            renderer: None,
            scene: Scene::new(),
            snapshot: FrameSnapshot::new(),
            drawn_generation: None,
            error: None,
        }
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: ViewerError) {
        error!(error = %err, "viewer stopped");
        if self.error.is_none() {
            self.error = Some(err);
        }
        event_loop.exit();
    }

    fn create_window(&mut self, event_loop: &ActiveEventLoop) -> Result<(), ViewerError> {
        let size = self.options.initial_size;
        let window = Arc::new(
            event_loop
                .create_window(
                    Window::default_attributes()
                        .with_title(self.options.title.clone())
                        .with_inner_size(LogicalSize::new(size.width, size.height)),
                )
                .map_err(ViewerError::CreateWindow)?,
        );
        let physical = window.inner_size();
        let width = physical.width.max(1);
        let height = physical.height.max(1);

        let surface = pollster::block_on(self.render_cx.create_surface(
            window.clone(),
            width,
            height,
            wgpu::PresentMode::AutoVsync,
        ))
        .map_err(ViewerError::CreateSurface)?;

        let device_handle = &self.render_cx.devices[surface.dev_id];
        let renderer = Renderer::new(
            &device_handle.device,
            RendererOptions {
                antialiasing_support: AaSupport::all(),
                num_init_threads: NonZeroUsize::new(1),
                ..RendererOptions::default()
            },
        )
        .map_err(ViewerError::CreateRenderer)?;

        info!(
            width,
            height,
            scale_factor = window.scale_factor(),
            font = self.text.family().unwrap_or("sans-serif"),
            "created window and render surface"
        );
        window.request_redraw();
        self.window = Some(window);
        self.surface = Some(surface);
        self.renderer = Some(renderer);
        Ok(())
    }

    fn render_frame(&mut self) -> Result<(), ViewerError> {
        let Some(window) = self.window.as_ref() else {
            return Ok(());
        };
        let Some(surface) = self.surface.as_mut() else {
            return Ok(());
        };
        let Some(renderer) = self.renderer.as_mut() else {
            return Ok(());
        };

        self.state.snapshot_into(&mut self.snapshot);

        let scale = window.scale_factor().max(1.0e-6);
        let width = surface.config.width;
        let height = surface.config.height;
        let logical = Size::new(f64::from(width) / scale, f64::from(height) / scale);
        let frame = self
            .composer
            .compose(&self.snapshot, logical, &self.text);

        self.scene.reset();
        paint_marks(
            &mut self.scene,
            &self.text,
            &frame.marks,
            Affine::scale(scale),
        );

        let device_handle = &self.render_cx.devices[surface.dev_id];
        let surface_texture = match surface.surface.get_current_texture() {
            Ok(tex) => tex,
            Err(err) => {
                warn!(error = %err, "surface texture unavailable, reconfiguring");
                self.render_cx.resize_surface(surface, width, height);
                window.request_redraw();
                return Ok(());
            }
        };
        let surface_view = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        renderer
            .render_to_texture(
                &device_handle.device,
                &device_handle.queue,
                &self.scene,
                &surface.target_view,
                &RenderParams {
                    base_color: self.composer.theme.background,
                    width,
                    height,
                    antialiasing_method: AaConfig::Msaa16,
                },
            )
            .map_err(ViewerError::Render)?;

        let mut encoder =
            device_handle
                .device
                .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                    label: Some("blit"),
                });
        surface.blitter.copy(
            &device_handle.device,
            &mut encoder,
            &surface.target_view,
            &surface_view,
        );
        device_handle.queue.submit([encoder.finish()]);
        surface_texture.present();

        self.drawn_generation = Some(self.snapshot.generation);
        if self.options.redraw == RedrawPolicy::Continuous {
            window.request_redraw();
        }
        Ok(())
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        if let Err(err) = self.create_window(event_loop) {
            self.fail(event_loop, err);
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        let RedrawPolicy::OnChange { poll } = self.options.redraw else {
            return;
        };
        if let Some(w) = &self.window
            && self
                .options
                .redraw
                .needs_redraw(self.drawn_generation, self.state.generation())
        {
            w.request_redraw();
        }
        event_loop.set_control_flow(ControlFlow::WaitUntil(Instant::now() + poll));
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, id: WindowId, event: WindowEvent) {
        if self.window.as_ref().map(|w| w.id()) != Some(id) {
            return;
        }

        match event {
            WindowEvent::CloseRequested
            | WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        logical_key: Key::Named(NamedKey::Escape),
                        state: ElementState::Pressed,
                        ..
                    },
                ..
            } => {
                debug!("closing viewer");
                event_loop.exit();
            }
            WindowEvent::Resized(size) => {
                if size.width == 0 || size.height == 0 {
                    return;
                }
                if let Some(surface) = self.surface.as_mut() {
                    self.render_cx
                        .resize_surface(surface, size.width, size.height);
                }
                if let Some(w) = &self.window {
                    w.request_redraw();
                }
            }
            WindowEvent::ScaleFactorChanged { .. } => {
                if let Some(w) = &self.window {
                    w.request_redraw();
                }
            }
            WindowEvent::RedrawRequested => {
                if let Err(err) = self.render_frame() {
                    self.fail(event_loop, err);
                }
            }
            _ => {}
        }
    }
}
