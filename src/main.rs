use anyhow::{Context, Result};
use clap::Parser;
use winit::{
    application::ApplicationHandler,
    event::*,
    event_loop::{ActiveEventLoop, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::WindowId,
};

use shape_viewer::cli::Cli;
use shape_viewer::clock::{FrameStats, SystemClock};
use shape_viewer::config::ViewerConfig;
use shape_viewer::controls::PointerButton;
use shape_viewer::overlay::Overlay;
use shape_viewer::renderer::Renderer;
use shape_viewer::traits::{WindowContext, WindowDimensions};
use shape_viewer::ui::{UiBridge, UiEvent};
use shape_viewer::viewer::Viewer;
use shape_viewer::window::Window;

/// Pixels of trackpad scroll treated as one wheel line
const PIXELS_PER_LINE: f32 = 50.0;

struct App {
    config: ViewerConfig,
    window: Option<Window>,
    renderer: Option<Renderer>,
    overlay: Option<Overlay>,
    viewer: Option<Viewer>,
    bridge: UiBridge,
    stats: FrameStats,
}

impl App {
    fn new(config: ViewerConfig) -> Self {
        let bridge = UiBridge::new(&config);
        Self {
            config,
            window: None,
            renderer: None,
            overlay: None,
            viewer: None,
            bridge,
            stats: FrameStats::new(),
        }
    }

    fn init(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let window = Window::create(event_loop, &self.config.window)?;
        let mut renderer = pollster::block_on(Renderer::new(window.inner().clone(), &self.config))
            .context("Failed to initialize renderer")?;

        let mut viewer = Viewer::new(&self.config, window.dimensions(), Box::new(SystemClock));

        if self.config.skip_title {
            self.bridge
                .dispatch(UiEvent::StartClicked, &mut viewer, &mut renderer);
        }

        self.overlay = (!self.config.no_ui).then(|| Overlay::new(window.inner()));
        self.window = Some(window);
        self.renderer = Some(renderer);
        self.viewer = Some(viewer);
        Ok(())
    }

    fn handle_pointer(&mut self, event: &WindowEvent) {
        let Some(viewer) = &mut self.viewer else {
            return;
        };

        match event {
            WindowEvent::MouseInput { state, button, .. } => {
                let button = match button {
                    MouseButton::Left => PointerButton::Primary,
                    MouseButton::Right => PointerButton::Secondary,
                    MouseButton::Middle => PointerButton::Middle,
                    _ => return,
                };
                match state {
                    ElementState::Pressed => viewer.controls.pointer_down(button),
                    ElementState::Released => viewer.controls.pointer_up(button),
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                viewer
                    .controls
                    .pointer_moved(position.x as f32, position.y as f32, &viewer.camera);
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let lines = match delta {
                    MouseScrollDelta::LineDelta(_, y) => *y,
                    MouseScrollDelta::PixelDelta(pos) => pos.y as f32 / PIXELS_PER_LINE,
                };
                viewer.controls.wheel(lines);
            }
            _ => {}
        }
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        self.stats.tick();

        let (Some(window), Some(renderer), Some(viewer)) =
            (&self.window, &mut self.renderer, &mut self.viewer)
        else {
            return;
        };

        if let Some(overlay) = &mut self.overlay {
            let (events, frame) = overlay.run(window.inner(), self.bridge.state(), self.stats.fps());
            for event in events {
                self.bridge.dispatch(event, viewer, renderer);
            }
            renderer.submit_overlay(frame);
        }

        if let Err(e) = viewer.frame(renderer) {
            log::error!("Render error: {:#}", e);
            event_loop.exit();
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            if let Err(e) = self.init(event_loop) {
                log::error!("{:#}", e);
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        // Let egui see the event first
        let consumed = match (&mut self.overlay, &self.window) {
            (Some(overlay), Some(window)) => overlay.on_window_event(window.inner(), &event),
            _ => false,
        };

        match event {
            WindowEvent::CloseRequested
            | WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        state: ElementState::Pressed,
                        physical_key: PhysicalKey::Code(KeyCode::Escape),
                        ..
                    },
                ..
            } => event_loop.exit(),
            WindowEvent::Resized(size) => {
                if let (Some(renderer), Some(viewer)) = (&mut self.renderer, &mut self.viewer) {
                    self.bridge
                        .dispatch(UiEvent::Resized(WindowDimensions::from(size)), viewer, renderer);
                }
            }
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            WindowEvent::MouseInput {
                state: ElementState::Released,
                ..
            } => self.handle_pointer(&event),
            WindowEvent::MouseInput { .. }
            | WindowEvent::CursorMoved { .. }
            | WindowEvent::MouseWheel { .. } => {
                if !consumed {
                    self.handle_pointer(&event);
                }
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = ViewerConfig::from_cli(&cli)?;

    let event_loop = EventLoop::new().context("Failed to create event loop")?;
    let mut app = App::new(config);

    log::info!("Shape Viewer - drag to orbit, right-drag to pan, scroll to zoom, Escape to quit");
    event_loop.run_app(&mut app).context("Event loop error")?;

    Ok(())
}
