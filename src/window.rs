//! Window, event loop and the per-frame driver.

use std::sync::Arc;

use glam::Vec2;
use rand::rngs::StdRng;
use rand::SeedableRng;
use winit::{
    application::ApplicationHandler,
    event::{ElementState, KeyEvent, WindowEvent},
    event_loop::{ActiveEventLoop, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use crate::animation::{pointer_target, SceneState};
use crate::config::SceneConfig;
use crate::error::RunError;
use crate::gpu::{Camera, Renderer, Viewport};
use crate::input::Pointer;
use crate::scene::Scene;
use crate::time::Clock;

/// Options that do not belong to the scene itself.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub title: String,
    /// Initial window size in logical pixels.
    pub width: u32,
    pub height: u32,
    /// Seed for the starfield. `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            title: "starsphere".to_string(),
            width: 1280,
            height: 720,
            seed: None,
        }
    }
}

/// Open a window and animate the scene until it is closed.
pub fn run(config: SceneConfig, options: RunOptions) -> Result<(), RunError> {
    config.validate()?;

    let mut rng = match options.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let scene = Scene::build(&config, &mut rng);
    tracing::info!(
        "Built {:?} scene: {} objects, {} points",
        config.profile,
        scene.objects.len(),
        scene.total_points()
    );

    let event_loop = EventLoop::new()?;

    let mut app = App::new(config, scene, options);
    event_loop.run_app(&mut app)?;

    match app.error.take() {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

/// Everything that exists once the window is up.
struct Running {
    window: Arc<Window>,
    renderer: Renderer,
    viewport: Viewport,
    camera: Camera,
}

struct App {
    config: SceneConfig,
    options: RunOptions,
    scene: Scene,
    state: SceneState,
    clock: Clock,
    pointer: Pointer,
    running: Option<Running>,
    /// Startup failure to report once the loop exits.
    error: Option<RunError>,
}

impl App {
    fn new(config: SceneConfig, scene: Scene, options: RunOptions) -> Self {
        Self {
            config,
            options,
            scene,
            state: SceneState::new(),
            clock: Clock::new(),
            pointer: Pointer::new(),
            running: None,
            error: None,
        }
    }

    fn start(&mut self, event_loop: &ActiveEventLoop) -> Result<Running, RunError> {
        let window_attrs = Window::default_attributes()
            .with_title(self.options.title.clone())
            .with_inner_size(winit::dpi::LogicalSize::new(
                self.options.width,
                self.options.height,
            ));
        let window = Arc::new(event_loop.create_window(window_attrs)?);

        let size = window.inner_size();
        let viewport = Viewport::from_physical(
            size.width,
            size.height,
            window.scale_factor(),
            self.config.max_pixel_ratio,
        );
        let camera = Camera::new(&self.config.camera, viewport.aspect());
        let renderer = pollster::block_on(Renderer::new(
            window.clone(),
            &self.scene,
            viewport.render_target(),
            self.config.antialias,
        ))?;

        Ok(Running {
            window,
            renderer,
            viewport,
            camera,
        })
    }

    /// One display refresh: advance time, ease the rotations, update the
    /// camera, draw.
    fn frame(&mut self, event_loop: &ActiveEventLoop) {
        let Some(running) = &mut self.running else {
            return;
        };

        if running.viewport.is_empty() {
            // Minimized: stop redrawing until the next resize.
            return;
        }

        self.clock.tick();
        self.state.step(self.clock.delta());

        let drag = self.pointer.take_drag();
        if drag != Vec2::ZERO {
            let height = running.viewport.window_size().y;
            running.camera.controls.rotate_by_pixels(drag, height);
        }
        let scroll = self.pointer.take_scroll();
        if scroll != 0.0 {
            running.camera.controls.zoom(scroll);
        }
        running.camera.controls.update();

        if self.clock.fps_updated() {
            tracing::debug!(
                "{:.1} fps (frame {}, {:.1}s)",
                self.clock.fps(),
                self.clock.frame(),
                self.clock.elapsed()
            );
        }

        match running
            .renderer
            .render(&self.scene, &self.state, &running.camera)
        {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                running.renderer.reconfigure();
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                tracing::error!("GPU out of memory, exiting");
                event_loop.exit();
                return;
            }
            Err(e) => tracing::warn!("Render error: {e:?}"),
        }

        running.window.request_redraw();
    }

    /// Push a changed viewport through to the camera and renderer.
    fn apply_resize(&mut self, width: u32, height: u32, scale_factor: Option<f64>) {
        let Some(running) = &mut self.running else {
            return;
        };
        let viewport = &mut running.viewport;
        if let Some(scale_factor) = scale_factor.filter(|s| *s > 0.0) {
            viewport.set_device_pixel_ratio(scale_factor);
        }
        let scale = viewport.device_pixel_ratio;
        viewport.resize(width as f64 / scale, height as f64 / scale);

        running.camera.projection.set_aspect(viewport.aspect());
        if !viewport.is_empty() {
            running.renderer.resize(viewport.render_target());
            // Restarts the redraw loop after a minimize.
            running.window.request_redraw();
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.running.is_some() {
            return;
        }
        match self.start(event_loop) {
            Ok(running) => {
                running.window.request_redraw();
                self.running = Some(running);
                // Window and GPU setup must not count toward the first frame.
                self.clock.reset();
            }
            Err(err) => {
                tracing::error!("Startup failed: {err}");
                self.error = Some(err);
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        if let Some(position) = self.pointer.handle_event(&event) {
            if let Some(running) = &self.running {
                let window_size = running.viewport.window_size();
                self.state.set_target(pointer_target(position, window_size));
            }
        }

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(KeyCode::Escape),
                        state: ElementState::Pressed,
                        ..
                    },
                ..
            } => {
                event_loop.exit();
            }
            WindowEvent::Resized(size) => {
                self.apply_resize(size.width, size.height, None);
            }
            WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                if let Some(size) = self.running.as_ref().map(|r| r.window.inner_size()) {
                    self.apply_resize(size.width, size.height, Some(scale_factor));
                }
            }
            WindowEvent::RedrawRequested => {
                self.frame(event_loop);
            }
            _ => {}
        }
    }
}
