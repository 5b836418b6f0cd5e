//! Clear window demo
//!
//! Opens an 800x600 window and clears it to a solid color every frame.
//! Escape or closing the window exits.

use std::process::ExitCode;
use winit::{
    application::ApplicationHandler,
    event::{ElementState, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::WindowId,
};

use raydemo::config::{AppConfig, WindowConfig};
use raydemo::systems::WindowSystem;
use raydemo_render::{context::{RenderContext, RenderError}, pipeline::ClearPass};

/// Fixed 800x600 windowed setup; only vsync follows the shared config
fn clear_window_config(shared: &WindowConfig) -> WindowConfig {
    WindowConfig {
        title: "Clear Window".to_string(),
        width: 800,
        height: 600,
        fullscreen: false,
        ..shared.clone()
    }
}

struct ClearApp {
    window_config: WindowConfig,
    pass: ClearPass,
    context: Option<RenderContext>,
    window: Option<WindowSystem>,
    failed: bool,
}

impl ClearApp {
    fn new(config: &AppConfig) -> Self {
        Self {
            window_config: clear_window_config(&config.window),
            pass: ClearPass::from_rgba(config.rendering.clear_color),
            context: None,
            window: None,
            failed: false,
        }
    }

    fn setup(&mut self, event_loop: &ActiveEventLoop) -> Result<(), Box<dyn std::error::Error>> {
        let window = WindowSystem::create(event_loop, &self.window_config)?;
        let context = pollster::block_on(RenderContext::with_vsync(
            window.window().clone(),
            self.window_config.vsync,
        ))?;

        window.request_redraw();
        self.context = Some(context);
        self.window = Some(window);
        Ok(())
    }

    fn draw(&mut self, event_loop: &ActiveEventLoop) {
        let Some(context) = &mut self.context else {
            return;
        };
        if !context.is_drawable() {
            return;
        }

        let output = match context.acquire_frame() {
            Ok(output) => output,
            Err(RenderError::SurfaceLost) => {
                context.reconfigure();
                return;
            }
            Err(e @ RenderError::OutOfMemory) => {
                log::error!("{}", e);
                self.failed = true;
                event_loop.exit();
                return;
            }
            Err(e) => {
                log::warn!("Skipping frame: {}", e);
                return;
            }
        };

        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = context
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Clear Encoder"),
            });
        self.pass.render(&mut encoder, &view);

        context.queue.submit(std::iter::once(encoder.finish()));
        output.present();
    }
}

impl ApplicationHandler for ClearApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            if let Err(e) = self.setup(event_loop) {
                log::error!("{}", e);
                self.failed = true;
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),

            WindowEvent::KeyboardInput { event, .. } => {
                if event.physical_key == PhysicalKey::Code(KeyCode::Escape)
                    && event.state == ElementState::Pressed
                {
                    event_loop.exit();
                }
            }

            WindowEvent::Resized(size) => {
                if let Some(context) = &mut self.context {
                    context.resize(size);
                }
            }

            WindowEvent::RedrawRequested => {
                self.draw(event_loop);
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }

            _ => {}
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        self.context = None;
        self.window = None;
    }
}

fn main() -> ExitCode {
    let (config, config_error) = match AppConfig::load() {
        Ok(config) => (config, None),
        Err(e) => (AppConfig::default(), Some(e)),
    };

    raydemo::init_logging(&config.debug.log_level);
    if let Some(e) = config_error {
        log::warn!("Failed to load config: {}. Using defaults.", e);
    }

    let event_loop = match EventLoop::new() {
        Ok(event_loop) => event_loop,
        Err(e) => {
            log::error!("Failed to create event loop: {}", e);
            return ExitCode::FAILURE;
        }
    };
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = ClearApp::new(&config);
    if let Err(e) = event_loop.run_app(&mut app) {
        log::error!("Event loop error: {}", e);
        return ExitCode::FAILURE;
    }

    if app.failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
