//! RayDemo - full-screen raytracing demo
//!
//! Opens a window, loads a WGSL shader pair, uploads a randomly generated
//! scene and flies a camera through it.

use std::process::ExitCode;
use winit::{
    application::ApplicationHandler,
    event::{DeviceEvent, DeviceId, MouseScrollDelta, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::PhysicalKey,
    window::WindowId,
};

use raydemo::config::AppConfig;
use raydemo::input::{InputAction, InputMapper};
use raydemo::systems::{
    PerformanceRecorder, RenderSystem, SimulationSystem, TitleStats, WindowSystem,
};
use raydemo_input::CameraController;
use raydemo_render::{camera::FlyCamera, context::RenderError, shader::ShaderSources, RenderableScene};
use raydemo_scene::{SceneError, SceneGenerator};

/// Main application state
///
/// Field order is drop order: GPU objects go before the window.
struct App {
    config: AppConfig,
    render: Option<RenderSystem>,
    window: Option<WindowSystem>,
    simulation: SimulationSystem,
    /// GPU copy of the startup scene, uploaded every frame
    scene: RenderableScene,
    camera: FlyCamera,
    controller: CameraController,
    recorder: PerformanceRecorder,
    failed: bool,
}

impl App {
    fn new(config: AppConfig) -> Result<Self, SceneError> {
        let mut generator = SceneGenerator::new(config.scene.to_settings())?;
        let scene = generator.generate();
        log::info!(
            "Generated scene: {} spheres, {} triangles, {} cubes",
            scene.sphere_count(),
            scene.triangle_count(),
            scene.cube_count()
        );

        let camera = FlyCamera::from_state(
            config.camera.start_position(),
            config.camera.yaw,
            config.camera.pitch,
            config.camera.fov,
        )
        .with_pitch_limit(config.camera.pitch_limit)
        .with_fov_range(config.camera.min_fov, config.camera.max_fov);

        let controller = CameraController::new()
            .with_move_speed(config.input.move_speed)
            .with_mouse_sensitivity(config.input.mouse_sensitivity)
            .with_zoom_speed(config.input.zoom_speed)
            .with_smoothing_half_life(config.input.smoothing_half_life)
            .with_smoothing(config.input.smoothing_enabled);

        let recorder = PerformanceRecorder::from_config(&config.metrics, scene.cube_count())
            .unwrap_or_else(|e| {
                log::warn!("{}. Frame times will not be recorded.", e);
                PerformanceRecorder::disabled(scene.cube_count())
            });

        Ok(Self {
            scene: RenderableScene::from_scene(&scene),
            config,
            render: None,
            window: None,
            simulation: SimulationSystem::new(),
            camera,
            controller,
            recorder,
            failed: false,
        })
    }

    /// Create window and GPU resources
    fn setup(&mut self, event_loop: &ActiveEventLoop) -> Result<(), Box<dyn std::error::Error>> {
        let window = WindowSystem::create(event_loop, &self.config.window)?
            .with_title_stats(self.config.metrics.title_stats);

        let shaders = ShaderSources::load(
            &self.config.shaders.vertex_path,
            &self.config.shaders.fragment_path,
        )?;

        let render = RenderSystem::new(
            window.window().clone(),
            &shaders,
            self.config.rendering.clone(),
            self.config.camera.clone(),
            self.config.window.vsync,
        )?;

        log::info!(
            "Uploading {} bytes of scene data per frame",
            self.scene.byte_size()
        );

        window.request_redraw();
        self.window = Some(window);
        self.render = Some(render);
        self.simulation.reset_clock();
        Ok(())
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, error: &dyn std::error::Error) {
        log::error!("{}", error);
        self.failed = true;
        event_loop.exit();
    }

    fn apply_action(&mut self, action: InputAction, event_loop: &ActiveEventLoop) {
        match action {
            InputAction::Exit => event_loop.exit(),
            InputAction::ReleaseCursor => {
                if let Some(window) = &mut self.window {
                    window.release_cursor();
                }
            }
            InputAction::CaptureCursor => {
                if let Some(window) = &mut self.window {
                    window.capture_cursor();
                }
            }
            InputAction::ResetCamera => {
                self.camera.reset();
                log::info!("Camera reset to starting position");
            }
            InputAction::ToggleFullscreen => {
                if let Some(window) = &self.window {
                    window.toggle_fullscreen();
                }
            }
            InputAction::ToggleSmoothing => {
                let enabled = self.controller.toggle_smoothing();
                log::info!("Input smoothing: {}", if enabled { "ON" } else { "OFF" });
            }
            InputAction::ToggleTitleStats => {
                if let Some(window) = &mut self.window {
                    let shown = window.toggle_title_stats();
                    log::info!("Title statistics: {}", if shown { "ON" } else { "OFF" });
                }
            }
        }
    }

    fn cursor_captured(&self) -> bool {
        self.window.as_ref().map(|w| w.is_cursor_captured()).unwrap_or(false)
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let cursor_captured = self.cursor_captured();
        let timing = self
            .simulation
            .update(&mut self.camera, &mut self.controller, cursor_captured);

        if let Err(e) = self.recorder.record(timing.frame_time) {
            log::warn!("{}. Frame time recording stopped.", e);
            self.recorder = PerformanceRecorder::disabled(self.recorder.cube_count());
        }

        if let Some(window) = &mut self.window {
            window.update_title(&TitleStats {
                position: self.camera.position,
                fov: self.camera.fov(),
                fps: self.recorder.fps(),
            });
        }

        if let Some(render) = &mut self.render {
            match render.render_frame(&self.camera, &self.scene) {
                Ok(()) => {}
                Err(RenderError::SurfaceLost) => {
                    log::debug!("Surface lost, reconfiguring");
                    render.reconfigure();
                }
                Err(e @ RenderError::OutOfMemory) => {
                    self.fail(event_loop, &e);
                    return;
                }
                Err(e) => log::warn!("Skipping frame: {}", e),
            }
        }

        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }

    fn exit_code(&self) -> ExitCode {
        if self.failed {
            ExitCode::FAILURE
        } else {
            ExitCode::SUCCESS
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            if let Err(e) = self.setup(event_loop) {
                self.fail(event_loop, e.as_ref());
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }

            WindowEvent::Resized(physical_size) => {
                if let Some(render) = &mut self.render {
                    render.resize(physical_size.width, physical_size.height);
                }
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(key) = event.physical_key {
                    if let Some(action) =
                        InputMapper::map_keyboard(key, event.state, self.cursor_captured())
                    {
                        self.apply_action(action, event_loop);
                    }
                    self.controller.process_keyboard(key, event.state);
                }
            }

            WindowEvent::MouseInput { state, button, .. } => {
                if let Some(action) =
                    InputMapper::map_mouse_button(button, state, self.cursor_captured())
                {
                    self.apply_action(action, event_loop);
                }
                self.controller.process_mouse_button(button, state);
            }

            WindowEvent::MouseWheel { delta, .. } => {
                let lines = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y,
                    MouseScrollDelta::PixelDelta(pos) => pos.y as f32 / 100.0,
                };
                self.controller.process_scroll(lines);
            }

            WindowEvent::RedrawRequested => self.redraw(event_loop),

            _ => {}
        }
    }

    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _device_id: DeviceId,
        event: DeviceEvent,
    ) {
        if let DeviceEvent::MouseMotion { delta } = event {
            self.controller.process_mouse_motion(delta.0, delta.1);
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        if self.recorder.is_recording() {
            log::info!("Recorded {} frames", self.recorder.frames());
        }
        // Release GPU resources before the window goes away
        self.render = None;
        self.window = None;
        log::info!("Shutting down");
    }
}

fn main() -> ExitCode {
    // Config first so the log level can come from it
    let (config, config_error) = match AppConfig::load() {
        Ok(config) => (config, None),
        Err(e) => (AppConfig::default(), Some(e)),
    };

    raydemo::init_logging(&config.debug.log_level);
    if let Some(e) = config_error {
        log::warn!("Failed to load config: {}. Using defaults.", e);
    }
    log::info!("Starting RayDemo");

    let mut app = match App::new(config) {
        Ok(app) => app,
        Err(e) => {
            log::error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    let event_loop = match EventLoop::new() {
        Ok(event_loop) => event_loop,
        Err(e) => {
            log::error!("Failed to create event loop: {}", e);
            return ExitCode::FAILURE;
        }
    };
    event_loop.set_control_flow(ControlFlow::Poll);

    if let Err(e) = event_loop.run_app(&mut app) {
        log::error!("Event loop error: {}", e);
        return ExitCode::FAILURE;
    }

    app.exit_code()
}
