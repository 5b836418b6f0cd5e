//! Full-screen Raytracing Renderer
//!
//! This crate provides the wgpu-based host side of the ray demo. The
//! intersection and shading math lives in externally supplied WGSL files;
//! this crate only feeds them.
//!
//! ## Key Components
//!
//! - [`context::RenderContext`] - WGPU device, queue, and surface management
//! - [`camera::FlyCamera`] - Free-fly camera with yaw, pitch and zoom
//! - [`shader::ShaderSources`] - Vertex + fragment shader pair loaded from disk
//! - [`pipeline::RaytracePipeline`] - Scene storage buffers, uniforms and the full-screen draw
//! - [`pipeline::ClearPass`] - Plain clear-to-color pass
//! - [`renderable::RenderableScene`] - Converts a `Scene` to GPU layouts

pub mod camera;
pub mod context;
pub mod pipeline;
pub mod renderable;
pub mod shader;

// Re-export scene types for convenience
pub use raydemo_scene::{Scene, Sphere, Triangle, Cube};
pub use raydemo_math::Vec3;

pub use renderable::RenderableScene;
