//! GPU-compatible data types for the raytracing shader
//!
//! These types are designed to match the shader layouts exactly.
//! All types derive Pod and Zeroable for safe GPU buffer operations.
//! `vec3` members in storage arrays are padded to 16 bytes, so triangle
//! vertices are stored as `[f32; 4]` with an unused w.

use bytemuck::{Pod, Zeroable};
use raydemo_math::mat4::IDENTITY;
use raydemo_scene::{Cube, Sphere, Triangle};

/// A sphere as read by the shader
/// Layout: 32 bytes (must match `Sphere` in the fragment shader)
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct GpuSphere {
    pub center: [f32; 3],
    pub radius: f32,
    /// RGBA color
    pub color: [f32; 4],
}

impl From<&Sphere> for GpuSphere {
    fn from(s: &Sphere) -> Self {
        Self {
            center: s.center.to_array(),
            radius: s.radius,
            color: s.color,
        }
    }
}

/// A triangle as read by the shader
/// Layout: 64 bytes
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct GpuTriangle {
    pub v0: [f32; 4],
    pub v1: [f32; 4],
    pub v2: [f32; 4],
    /// RGBA color
    pub color: [f32; 4],
}

impl From<&Triangle> for GpuTriangle {
    fn from(t: &Triangle) -> Self {
        Self {
            v0: t.v0.extend(1.0),
            v1: t.v1.extend(1.0),
            v2: t.v2.extend(1.0),
            color: t.color,
        }
    }
}

/// An axis-aligned cube as read by the shader
/// Layout: 32 bytes
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct GpuCube {
    pub center: [f32; 3],
    /// Full edge length
    pub size: f32,
    /// RGBA color
    pub color: [f32; 4],
}

impl From<&Cube> for GpuCube {
    fn from(c: &Cube) -> Self {
        Self {
            center: c.center.to_array(),
            size: c.size,
            color: c.color,
        }
    }
}

/// Per-frame uniforms
/// Layout: 240 bytes total (must match `FrameUniforms` in both shaders)
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct FrameUniforms {
    /// View matrix (64 bytes)
    pub view: [[f32; 4]; 4],
    /// Projection matrix (64 bytes)
    pub projection: [[f32; 4]; 4],
    /// Inverse of projection * view, used to build primary rays (64 bytes)
    pub inverse_view_projection: [[f32; 4]; 4],
    /// Camera position + vertical fov in radians (16 bytes)
    pub camera_position: [f32; 3],
    pub fov_y: f32,
    /// Framebuffer size in pixels + sphere and triangle counts (16 bytes)
    pub resolution: [f32; 2],
    pub sphere_count: u32,
    pub triangle_count: u32,
    /// Cube count + padding (16 bytes)
    pub cube_count: u32,
    pub _padding: [u32; 3],
}

impl Default for FrameUniforms {
    fn default() -> Self {
        Self {
            view: IDENTITY,
            projection: IDENTITY,
            inverse_view_projection: IDENTITY,
            camera_position: [0.0; 3],
            fov_y: std::f32::consts::FRAC_PI_4,
            resolution: [1.0, 1.0],
            sphere_count: 0,
            triangle_count: 0,
            cube_count: 0,
            _padding: [0; 3],
        }
    }
}
