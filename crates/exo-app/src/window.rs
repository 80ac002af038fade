//! Window creation and event handling via winit.
//!
//! [`AppState`] implements winit's [`ApplicationHandler`]: it owns the GPU
//! context, the scene, the planet session and the optional reflection
//! server, and drives one frame per redraw.

use std::sync::Arc;
use std::time::Instant;

use exo_config::Config;
use exo_render::{RenderContext, init_render_context_blocking};
use exo_server::ReflectionServer;
use tracing::{error, info, warn};
use winit::application::ApplicationHandler;
use winit::error::EventLoopError;
use winit::event::{ElementState, KeyEvent, MouseButton, WindowEvent};
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::keyboard::PhysicalKey;
use winit::window::{Fullscreen, Window, WindowAttributes, WindowId};

use crate::controls::{ControlAction, OrbitDrag, action_for_key, scroll_steps};
use crate::frame_clock::FrameClock;
use crate::scene::SceneHost;
use crate::session::PlanetSession;

pub fn window_attributes_from_config(config: &Config) -> WindowAttributes {
    let attributes = WindowAttributes::default()
        .with_title(config.window.title.clone())
        .with_inner_size(winit::dpi::LogicalSize::new(
            config.window.width as f64,
            config.window.height as f64,
        ));
    if config.window.fullscreen {
        attributes.with_fullscreen(Some(Fullscreen::Borderless(None)))
    } else {
        attributes
    }
}

pub struct AppState {
    pub window: Option<Arc<Window>>,
    pub gpu: Option<RenderContext>,
    pub scene: Option<SceneHost>,
    pub session: PlanetSession,
    pub config: Config,
    pub clock: FrameClock,
    /// Local reflection endpoint, present when enabled in config.
    pub server: Option<ReflectionServer>,
    drag: OrbitDrag,
    title: String,
}

impl AppState {
    pub fn new(config: Config, session: PlanetSession) -> Self {
        let server = config
            .server
            .enabled
            .then(|| ReflectionServer::new(config.server.port));
        Self {
            window: None,
            gpu: None,
            scene: None,
            session,
            title: config.window.title.clone(),
            config,
            clock: FrameClock::new(),
            server,
            drag: OrbitDrag::default(),
        }
    }

    /// Apply one control action. Returns `true` when the app should quit.
    pub fn apply_action(&mut self, action: ControlAction) -> bool {
        let now = Instant::now();
        match action {
            ControlAction::Adjust { control, direction } => self.session.adjust(control, direction),
            ControlAction::Select(index) => {
                let previous = self.session.body().name();
                if let Err(e) = self.session.select(index, now) {
                    warn!("Planet selection ignored: {e}");
                } else if self.session.body().name() != previous
                    && let Some(scene) = &mut self.scene
                {
                    scene.remount(self.session.body());
                }
            }
            ControlAction::FocusSlider(offset) => {
                self.session.focus_slider(offset);
            }
            ControlAction::NudgeSlider(steps) => self.session.nudge_slider(steps, now),
            ControlAction::Quit => return true,
        }
        false
    }

    /// Push the readout into the window title when it changes.
    fn refresh_title(&mut self) {
        let title = self.session.title(&self.config.window.title);
        if title == self.title {
            return;
        }
        info!("{}", self.session.readout());
        if let Some(window) = &self.window {
            window.set_title(&title);
        }
        self.title = title;
    }

    /// Per-frame order: spin the body, flicker the stars, then submit.
    fn redraw(&mut self) {
        let now = Instant::now();
        for _ in 0..self.clock.tick(now) {
            self.session.advance();
            if let Some(scene) = &mut self.scene {
                scene.flicker();
            }
        }

        self.session.poll(now);
        self.refresh_title();

        if let (Some(gpu), Some(scene)) = (&self.gpu, &mut self.scene)
            && let Err(e) = scene.render(gpu, self.session.body())
        {
            warn!("Skipping frame: {e}");
        }

        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

impl ApplicationHandler for AppState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window = match event_loop.create_window(window_attributes_from_config(&self.config)) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                error!("Window creation failed: {e}");
                event_loop.exit();
                return;
            }
        };

        match init_render_context_blocking(window.clone(), self.config.window.vsync) {
            Ok(gpu) => {
                self.scene = Some(SceneHost::new(&gpu, &self.config.render, self.session.body()));
                self.gpu = Some(gpu);
            }
            Err(e) => {
                error!("GPU initialization failed: {e}");
                event_loop.exit();
                return;
            }
        }
        self.window = Some(window);

        if let Some(server) = &mut self.server {
            match server.start() {
                Ok(()) => info!("Reflection endpoint on port {}", server.actual_port()),
                Err(e) => warn!("Failed to start reflection endpoint: {e}"),
            }
        }
        self.refresh_title();
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                info!("Close requested, shutting down");
                event_loop.exit();
            }
            WindowEvent::Resized(size) => {
                if let Some(gpu) = &mut self.gpu {
                    gpu.resize(size.width, size.height);
                    if let Some(scene) = &mut self.scene {
                        scene.resize(gpu, size.width, size.height);
                    }
                }
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(code),
                        state: ElementState::Pressed,
                        ..
                    },
                ..
            } => {
                if let Some(action) = action_for_key(code)
                    && self.apply_action(action)
                {
                    event_loop.exit();
                }
            }
            WindowEvent::MouseInput {
                button: MouseButton::Left,
                state,
                ..
            } => match state {
                ElementState::Pressed => self.drag.press(),
                ElementState::Released => self.drag.release(),
            },
            WindowEvent::CursorMoved { position, .. } => {
                if let Some((azimuth, polar)) = self.drag.cursor_moved(position.x, position.y)
                    && let Some(scene) = &mut self.scene
                {
                    scene.camera.rotate(azimuth, polar);
                }
            }
            WindowEvent::MouseWheel { delta, .. } => {
                if let Some(scene) = &mut self.scene {
                    scene.camera.zoom(scroll_steps(delta));
                }
            }
            WindowEvent::RedrawRequested => self.redraw(),
            _ => {}
        }
    }
}

/// Create an event loop and run until the window closes.
pub fn run_with_config(config: Config, session: PlanetSession) -> Result<(), EventLoopError> {
    let event_loop = EventLoop::new()?;
    let mut app = AppState::new(config, session);
    event_loop.run_app(&mut app)
}
