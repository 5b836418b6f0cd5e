//! Primitive records
//!
//! Plain host-side records. GPU layouts live in the render crate and are
//! produced from these by value.

use raydemo_math::Vec3;
use serde::{Deserialize, Serialize};

/// A sphere given by center and radius
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Sphere {
    pub center: Vec3,
    pub radius: f32,
    /// RGBA color
    pub color: [f32; 4],
}

impl Sphere {
    pub fn new(center: Vec3, radius: f32, color: [f32; 4]) -> Self {
        Self { center, radius, color }
    }
}

/// A single triangle
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Triangle {
    pub v0: Vec3,
    pub v1: Vec3,
    pub v2: Vec3,
    /// RGBA color
    pub color: [f32; 4],
}

impl Triangle {
    pub fn new(v0: Vec3, v1: Vec3, v2: Vec3, color: [f32; 4]) -> Self {
        Self { v0, v1, v2, color }
    }

    /// Unnormalized face normal (v1 - v0) x (v2 - v0)
    pub fn normal(&self) -> Vec3 {
        (self.v1 - self.v0).cross(self.v2 - self.v0)
    }

    /// Surface area
    pub fn area(&self) -> f32 {
        self.normal().length() * 0.5
    }
}

/// An axis-aligned cube
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Cube {
    pub center: Vec3,
    /// Full edge length
    pub size: f32,
    /// RGBA color
    pub color: [f32; 4],
}

impl Cube {
    pub fn new(center: Vec3, size: f32, color: [f32; 4]) -> Self {
        Self { center, size, color }
    }

    /// Minimum corner
    pub fn min(&self) -> Vec3 {
        let h = self.size * 0.5;
        self.center - Vec3::new(h, h, h)
    }

    /// Maximum corner
    pub fn max(&self) -> Vec3 {
        let h = self.size * 0.5;
        self.center + Vec3::new(h, h, h)
    }
}
