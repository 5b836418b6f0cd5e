//! Scene to GPU layout conversion
//!
//! A [`RenderableScene`] is the flat, Pod-typed copy of a [`Scene`] that is
//! written into the storage buffers each frame.

use raydemo_scene::Scene;

use crate::pipeline::types::{GpuCube, GpuSphere, GpuTriangle};

/// GPU-ready primitive arrays
#[derive(Clone, Debug, Default)]
pub struct RenderableScene {
    pub spheres: Vec<GpuSphere>,
    pub triangles: Vec<GpuTriangle>,
    pub cubes: Vec<GpuCube>,
}

impl RenderableScene {
    /// Create empty arrays
    pub fn new() -> Self {
        Self::default()
    }

    /// Convert every primitive of a scene
    pub fn from_scene(scene: &Scene) -> Self {
        Self {
            spheres: scene.spheres.iter().map(GpuSphere::from).collect(),
            triangles: scene.triangles.iter().map(GpuTriangle::from).collect(),
            cubes: scene.cubes.iter().map(GpuCube::from).collect(),
        }
    }

    pub fn sphere_count(&self) -> u32 {
        self.spheres.len() as u32
    }

    pub fn triangle_count(&self) -> u32 {
        self.triangles.len() as u32
    }

    pub fn cube_count(&self) -> u32 {
        self.cubes.len() as u32
    }

    /// Bytes uploaded per frame across the three arrays
    pub fn byte_size(&self) -> usize {
        std::mem::size_of_val(self.spheres.as_slice())
            + std::mem::size_of_val(self.triangles.as_slice())
            + std::mem::size_of_val(self.cubes.as_slice())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use raydemo_scene::{Cube, Sphere, Triangle, Vec3};

    #[test]
    fn test_from_scene_preserves_order_and_counts() {
        let scene = Scene::new()
            .with_sphere(Sphere::new(Vec3::new(1.0, 0.0, 0.0), 1.0, [1.0; 4]))
            .with_sphere(Sphere::new(Vec3::new(2.0, 0.0, 0.0), 2.0, [1.0; 4]))
            .with_triangle(Triangle::new(Vec3::ZERO, Vec3::X, Vec3::Y, [1.0; 4]))
            .with_cube(Cube::new(Vec3::Z, 1.0, [1.0; 4]));

        let renderable = RenderableScene::from_scene(&scene);
        assert_eq!(renderable.sphere_count(), 2);
        assert_eq!(renderable.triangle_count(), 1);
        assert_eq!(renderable.cube_count(), 1);
        assert_eq!(renderable.spheres[1].center, [2.0, 0.0, 0.0]);
        assert_eq!(renderable.spheres[1].radius, 2.0);
    }

    #[test]
    fn test_byte_size() {
        let scene = Scene::new()
            .with_sphere(Sphere::new(Vec3::ZERO, 1.0, [1.0; 4]))
            .with_triangle(Triangle::new(Vec3::ZERO, Vec3::X, Vec3::Y, [1.0; 4]))
            .with_cube(Cube::new(Vec3::Z, 1.0, [1.0; 4]));
        // 32 + 64 + 32
        assert_eq!(RenderableScene::from_scene(&scene).byte_size(), 128);
    }

    #[test]
    fn test_empty_scene() {
        let renderable = RenderableScene::from_scene(&Scene::new());
        assert_eq!(renderable.byte_size(), 0);
        assert_eq!(renderable.sphere_count(), 0);
    }
}
