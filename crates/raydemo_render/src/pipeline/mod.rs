//! Rendering pipeline components
//!
//! This module contains the full-screen raytracing pipeline and the plain
//! clear pass used by the window demo.

pub mod types;
pub mod raytrace_pipeline;
pub mod clear_pass;

// Re-export types
pub use types::{GpuSphere, GpuTriangle, GpuCube, FrameUniforms};

// Re-export pipelines
pub use raytrace_pipeline::{RaytracePipeline, grown_capacity, storage_buffer_size, FULL_SCREEN_VERTEX_COUNT};
pub use clear_pass::ClearPass;
