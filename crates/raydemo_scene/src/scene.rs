//! Scene container

use serde::{Deserialize, Serialize};

use crate::primitives::{Cube, Sphere, Triangle};

/// The three primitive arrays handed to the GPU every frame
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    pub spheres: Vec<Sphere>,
    pub triangles: Vec<Triangle>,
    pub cubes: Vec<Cube>,
}

impl Scene {
    /// Create an empty scene
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: add a sphere
    pub fn with_sphere(mut self, sphere: Sphere) -> Self {
        self.spheres.push(sphere);
        self
    }

    /// Builder: add a triangle
    pub fn with_triangle(mut self, triangle: Triangle) -> Self {
        self.triangles.push(triangle);
        self
    }

    /// Builder: add a cube
    pub fn with_cube(mut self, cube: Cube) -> Self {
        self.cubes.push(cube);
        self
    }

    pub fn sphere_count(&self) -> usize {
        self.spheres.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    pub fn cube_count(&self) -> usize {
        self.cubes.len()
    }

    /// Total number of primitives across all arrays
    pub fn primitive_count(&self) -> usize {
        self.spheres.len() + self.triangles.len() + self.cubes.len()
    }

    /// Check if the scene has no primitives at all
    pub fn is_empty(&self) -> bool {
        self.primitive_count() == 0
    }
}
