//! Scene data for the ray demo
//!
//! This crate holds the host-side primitive records that the raytracing
//! shader reads as arrays:
//! - [`Sphere`] - center and radius
//! - [`Triangle`] - three vertices
//! - [`Cube`] - axis-aligned box given by center and edge length
//!
//! A [`Scene`] is built once at startup, usually by [`SceneGenerator`], and
//! is never mutated afterwards.

mod error;
mod generator;
mod primitives;
mod scene;

pub use error::SceneError;
pub use generator::{SceneGenerator, SceneSettings};
pub use primitives::{Cube, Sphere, Triangle};
pub use scene::Scene;

// Re-export math types for convenience
pub use raydemo_math::Vec3;
