//! GPU rendering system
//!
//! Manages GPU rendering including:
//! - Render context and surface
//! - The full-screen raytracing pipeline and its scene buffers
//! - Frame rendering

use std::sync::Arc;
use winit::window::Window;
use raydemo_math::mat4;
use raydemo_render::{
    camera::FlyCamera,
    context::{ContextError, RenderContext, RenderError},
    pipeline::{FrameUniforms, RaytracePipeline},
    shader::{ShaderError, ShaderSources},
    RenderableScene,
};
use crate::config::{to_wgpu_color, CameraConfig, RenderingConfig};

/// Errors raised while setting up rendering
#[derive(Debug)]
pub enum RenderSetupError {
    Context(ContextError),
    Shader(ShaderError),
}

impl From<ContextError> for RenderSetupError {
    fn from(e: ContextError) -> Self {
        RenderSetupError::Context(e)
    }
}

impl From<ShaderError> for RenderSetupError {
    fn from(e: ShaderError) -> Self {
        RenderSetupError::Shader(e)
    }
}

impl std::fmt::Display for RenderSetupError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RenderSetupError::Context(e) => write!(f, "{}", e),
            RenderSetupError::Shader(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for RenderSetupError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RenderSetupError::Context(e) => Some(e),
            RenderSetupError::Shader(e) => Some(e),
        }
    }
}

/// Build the uniforms for one frame
pub fn frame_uniforms(
    camera: &FlyCamera,
    camera_config: &CameraConfig,
    resolution: (u32, u32),
    scene: &RenderableScene,
) -> FrameUniforms {
    let (width, height) = (resolution.0.max(1), resolution.1.max(1));
    let aspect = width as f32 / height as f32;

    let view = camera.view_matrix();
    let projection = camera.projection_matrix(aspect, camera_config.near, camera_config.far);
    let inverse_view_projection = mat4::inverse(mat4::mul(projection, view)).unwrap_or_else(|| {
        log::warn!("View-projection matrix is singular, using identity");
        mat4::IDENTITY
    });

    FrameUniforms {
        view,
        projection,
        inverse_view_projection,
        camera_position: camera.position.to_array(),
        fov_y: camera.fov().to_radians(),
        resolution: [width as f32, height as f32],
        sphere_count: scene.sphere_count(),
        triangle_count: scene.triangle_count(),
        cube_count: scene.cube_count(),
        _padding: [0; 3],
    }
}

/// Manages GPU rendering
pub struct RenderSystem {
    pipeline: RaytracePipeline,
    context: RenderContext,
    render_config: RenderingConfig,
    camera_config: CameraConfig,
}

impl RenderSystem {
    /// Create the GPU context and compile the shader pair
    pub fn new(
        window: Arc<Window>,
        shaders: &ShaderSources,
        render_config: RenderingConfig,
        camera_config: CameraConfig,
        vsync: bool,
    ) -> Result<Self, RenderSetupError> {
        let context = pollster::block_on(RenderContext::with_vsync(window, vsync))?;
        let pipeline = RaytracePipeline::new(&context.device, context.config.format, shaders)?;

        Ok(Self {
            pipeline,
            context,
            render_config,
            camera_config,
        })
    }

    /// Handle window resize
    pub fn resize(&mut self, width: u32, height: u32) {
        self.context
            .resize(winit::dpi::PhysicalSize::new(width, height));
    }

    /// Reconfigure after the surface was lost or outdated
    pub fn reconfigure(&mut self) {
        self.context.reconfigure();
    }

    /// Render a single frame
    ///
    /// The scene arrays are uploaded every frame before the draw.
    pub fn render_frame(
        &mut self,
        camera: &FlyCamera,
        scene: &RenderableScene,
    ) -> Result<(), RenderError> {
        if !self.context.is_drawable() {
            return Ok(());
        }

        self.pipeline
            .upload_scene(&self.context.device, &self.context.queue, scene);

        let uniforms = frame_uniforms(camera, &self.camera_config, self.size(), scene);
        self.pipeline.update_uniforms(&self.context.queue, &uniforms);

        let output = self.context.acquire_frame()?;

        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .context
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        self.pipeline.render(
            &mut encoder,
            &view,
            to_wgpu_color(self.render_config.background_color),
        );

        self.context.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        log::trace!("Frame drawn ({} bytes of scene data)", scene.byte_size());
        Ok(())
    }

    /// Get current surface size
    pub fn size(&self) -> (u32, u32) {
        (self.context.size.width, self.context.size.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use raydemo_math::Vec3;
    use raydemo_scene::{Scene, SceneGenerator, SceneSettings};

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-3
    }

    #[test]
    fn test_uniform_counts_follow_scene() {
        let settings = SceneSettings {
            sphere_count: 3,
            triangle_count: 2,
            cube_count: 10,
            seed: Some(1),
            ..SceneSettings::default()
        };
        let scene = SceneGenerator::new(settings).unwrap().generate();
        let renderable = RenderableScene::from_scene(&scene);

        let u = frame_uniforms(&FlyCamera::new(), &CameraConfig::default(), (800, 600), &renderable);
        assert_eq!(u.sphere_count, 3);
        assert_eq!(u.triangle_count, 2);
        assert_eq!(u.cube_count, 10);
        assert_eq!(u.resolution, [800.0, 600.0]);
        assert_eq!(u.camera_position, [0.0, 0.0, 3.0]);
        assert!(approx(u.fov_y, 45f32.to_radians()));
    }

    #[test]
    fn test_inverse_view_projection_unprojects_center() {
        let camera = FlyCamera::new();
        let u = frame_uniforms(&camera, &CameraConfig::default(), (800, 600), &RenderableScene::new());

        // Screen center on the near plane lies straight ahead of the camera
        let p = mat4::transform_point(u.inverse_view_projection, Vec3::new(0.0, 0.0, 0.0));
        let dir = (p - camera.position).normalized();
        assert!(approx(dir.x, 0.0) && approx(dir.y, 0.0) && approx(dir.z, -1.0), "dir: {:?}", dir);
    }

    #[test]
    fn test_zero_resolution_is_clamped() {
        let renderable = RenderableScene::from_scene(&Scene::new());
        let u = frame_uniforms(&FlyCamera::new(), &CameraConfig::default(), (0, 0), &renderable);
        assert_eq!(u.resolution, [1.0, 1.0]);
        assert!(u.inverse_view_projection.iter().flatten().all(|v| v.is_finite()));
    }
}
