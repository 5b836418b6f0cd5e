//! Random scene generation
//!
//! Builds the startup scene from random values. Primitive centers are placed
//! inside a box spanning `[-extent, extent]` on X and Z and `[0, extent]` on
//! Y so everything sits above the ground plane the shader draws at y = 0.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use raydemo_math::Vec3;
use serde::{Deserialize, Serialize};

use crate::error::SceneError;
use crate::primitives::{Cube, Sphere, Triangle};
use crate::scene::Scene;

/// Attempts at drawing a non-degenerate triangle before using a fixed shape
const MAX_TRIANGLE_ATTEMPTS: usize = 32;

/// Upper bound for `extent` and `max_size`; keeps every sampled range finite
pub const MAX_SCENE_SPAN: f32 = 1.0e6;

/// Settings for [`SceneGenerator`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneSettings {
    /// Number of spheres to generate
    pub sphere_count: usize,
    /// Number of triangles to generate
    pub triangle_count: usize,
    /// Number of cubes to generate
    pub cube_count: usize,
    /// Half-width of the placement box
    pub extent: f32,
    /// Smallest primitive size (sphere diameter, cube edge, triangle span)
    pub min_size: f32,
    /// Largest primitive size
    pub max_size: f32,
    /// Fixed seed for reproducible scenes; `None` seeds from entropy
    pub seed: Option<u64>,
}

impl Default for SceneSettings {
    fn default() -> Self {
        Self {
            sphere_count: 8,
            triangle_count: 4,
            cube_count: 5,
            extent: 10.0,
            min_size: 0.5,
            max_size: 2.0,
            seed: None,
        }
    }
}

impl SceneSettings {
    /// Check that the settings describe a non-empty placement volume and size range
    pub fn validate(&self) -> Result<(), SceneError> {
        if !self.extent.is_finite() || self.extent <= 0.0 {
            return Err(SceneError::InvalidSettings(format!(
                "extent must be positive, got {}",
                self.extent
            )));
        }
        if self.extent > MAX_SCENE_SPAN {
            return Err(SceneError::InvalidSettings(format!(
                "extent must not exceed {}, got {}",
                MAX_SCENE_SPAN, self.extent
            )));
        }
        if !self.min_size.is_finite() || self.min_size <= 0.0 {
            return Err(SceneError::InvalidSettings(format!(
                "min_size must be positive, got {}",
                self.min_size
            )));
        }
        if !self.max_size.is_finite() || self.max_size < self.min_size {
            return Err(SceneError::InvalidSettings(format!(
                "max_size ({}) must not be smaller than min_size ({})",
                self.max_size, self.min_size
            )));
        }
        if self.max_size > MAX_SCENE_SPAN {
            return Err(SceneError::InvalidSettings(format!(
                "max_size must not exceed {}, got {}",
                MAX_SCENE_SPAN, self.max_size
            )));
        }
        Ok(())
    }
}

/// Generates a [`Scene`] of randomly placed primitives
pub struct SceneGenerator {
    settings: SceneSettings,
    rng: StdRng,
}

impl SceneGenerator {
    /// Create a generator, validating the settings
    pub fn new(settings: SceneSettings) -> Result<Self, SceneError> {
        settings.validate()?;
        let rng = match settings.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Ok(Self { settings, rng })
    }

    /// Settings this generator was built with
    pub fn settings(&self) -> &SceneSettings {
        &self.settings
    }

    /// Generate a full scene
    pub fn generate(&mut self) -> Scene {
        let spheres = (0..self.settings.sphere_count)
            .map(|_| self.random_sphere())
            .collect();
        let triangles = (0..self.settings.triangle_count)
            .map(|_| self.random_triangle())
            .collect();
        let cubes = (0..self.settings.cube_count)
            .map(|_| self.random_cube())
            .collect();

        let scene = Scene { spheres, triangles, cubes };
        log::debug!(
            "Generated scene: {} spheres, {} triangles, {} cubes",
            scene.sphere_count(),
            scene.triangle_count(),
            scene.cube_count()
        );
        scene
    }

    fn random_sphere(&mut self) -> Sphere {
        let center = self.random_center();
        let radius = self.random_size() * 0.5;
        let color = self.random_color();
        Sphere::new(center, radius, color)
    }

    fn random_cube(&mut self) -> Cube {
        let center = self.random_center();
        let size = self.random_size();
        let color = self.random_color();
        Cube::new(center, size, color)
    }

    fn random_triangle(&mut self) -> Triangle {
        let center = self.random_center();
        let color = self.random_color();
        let half = self.settings.max_size * 0.5;
        let min_area = 1e-3 * self.settings.min_size * self.settings.min_size;

        for _ in 0..MAX_TRIANGLE_ATTEMPTS {
            let tri = Triangle::new(
                center + self.random_offset(half),
                center + self.random_offset(half),
                center + self.random_offset(half),
                color,
            );
            if tri.area() > min_area {
                return tri;
            }
        }

        log::warn!("Falling back to a fixed triangle after {} degenerate draws", MAX_TRIANGLE_ATTEMPTS);
        Triangle::new(
            center + Vec3::new(-half, 0.0, 0.0),
            center + Vec3::new(half, 0.0, 0.0),
            center + Vec3::new(0.0, half, 0.0),
            color,
        )
    }

    fn random_center(&mut self) -> Vec3 {
        let e = self.settings.extent;
        Vec3::new(
            self.rng.gen_range(-e..=e),
            self.rng.gen_range(0.0..=e),
            self.rng.gen_range(-e..=e),
        )
    }

    fn random_offset(&mut self, half: f32) -> Vec3 {
        Vec3::new(
            self.rng.gen_range(-half..=half),
            self.rng.gen_range(-half..=half),
            self.rng.gen_range(-half..=half),
        )
    }

    fn random_size(&mut self) -> f32 {
        self.rng.gen_range(self.settings.min_size..=self.settings.max_size)
    }

    fn random_color(&mut self) -> [f32; 4] {
        [
            self.rng.gen_range(0.1..=1.0),
            self.rng.gen_range(0.1..=1.0),
            self.rng.gen_range(0.1..=1.0),
            1.0,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded(seed: u64) -> SceneSettings {
        SceneSettings {
            seed: Some(seed),
            ..SceneSettings::default()
        }
    }

    #[test]
    fn test_counts_match_settings() {
        let settings = SceneSettings {
            sphere_count: 3,
            triangle_count: 7,
            cube_count: 11,
            ..seeded(1)
        };
        let scene = SceneGenerator::new(settings).unwrap().generate();
        assert_eq!(scene.sphere_count(), 3);
        assert_eq!(scene.triangle_count(), 7);
        assert_eq!(scene.cube_count(), 11);
    }

    #[test]
    fn test_same_seed_same_scene() {
        let a = SceneGenerator::new(seeded(42)).unwrap().generate();
        let b = SceneGenerator::new(seeded(42)).unwrap().generate();
        assert_eq!(a, b);
    }

    #[test]
    fn test_different_seed_different_scene() {
        let a = SceneGenerator::new(seeded(1)).unwrap().generate();
        let b = SceneGenerator::new(seeded(2)).unwrap().generate();
        assert_ne!(a, b);
    }

    #[test]
    fn test_centers_within_extent() {
        let settings = SceneSettings {
            sphere_count: 50,
            cube_count: 50,
            extent: 4.0,
            ..seeded(7)
        };
        let scene = SceneGenerator::new(settings).unwrap().generate();

        let centers = scene
            .spheres
            .iter()
            .map(|s| s.center)
            .chain(scene.cubes.iter().map(|c| c.center));
        for c in centers {
            assert!(c.x.abs() <= 4.0 && c.z.abs() <= 4.0, "center out of box: {:?}", c);
            assert!((0.0..=4.0).contains(&c.y), "center below ground or too high: {:?}", c);
        }
    }

    #[test]
    fn test_sizes_within_range() {
        let settings = SceneSettings {
            sphere_count: 40,
            cube_count: 40,
            min_size: 0.4,
            max_size: 1.2,
            ..seeded(9)
        };
        let scene = SceneGenerator::new(settings).unwrap().generate();

        for s in &scene.spheres {
            assert!(s.radius >= 0.2 && s.radius <= 0.6, "radius {} out of range", s.radius);
        }
        for c in &scene.cubes {
            assert!(c.size >= 0.4 && c.size <= 1.2, "size {} out of range", c.size);
        }
    }

    #[test]
    fn test_triangles_are_not_degenerate() {
        let settings = SceneSettings {
            triangle_count: 100,
            ..seeded(3)
        };
        let scene = SceneGenerator::new(settings).unwrap().generate();
        for t in &scene.triangles {
            assert!(t.area() > 0.0);
        }
    }

    #[test]
    fn test_colors_opaque_and_bright_enough() {
        let scene = SceneGenerator::new(seeded(5)).unwrap().generate();
        for color in scene.spheres.iter().map(|s| s.color) {
            assert_eq!(color[3], 1.0);
            for channel in &color[..3] {
                assert!((0.1..=1.0).contains(channel));
            }
        }
    }

    #[test]
    fn test_zero_counts_produce_empty_scene() {
        let settings = SceneSettings {
            sphere_count: 0,
            triangle_count: 0,
            cube_count: 0,
            ..seeded(0)
        };
        let scene = SceneGenerator::new(settings).unwrap().generate();
        assert!(scene.is_empty());
    }

    #[test]
    fn test_invalid_extent_rejected() {
        let settings = SceneSettings {
            extent: 0.0,
            ..SceneSettings::default()
        };
        assert!(matches!(
            SceneGenerator::new(settings),
            Err(SceneError::InvalidSettings(_))
        ));
    }

    #[test]
    fn test_inverted_size_range_rejected() {
        let settings = SceneSettings {
            min_size: 2.0,
            max_size: 1.0,
            ..SceneSettings::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_equal_size_bounds_allowed() {
        let settings = SceneSettings {
            min_size: 1.0,
            max_size: 1.0,
            ..seeded(11)
        };
        let scene = SceneGenerator::new(settings).unwrap().generate();
        assert!(scene.cubes.iter().all(|c| c.size == 1.0));
    }

    #[test]
    fn test_huge_extent_rejected() {
        for extent in [f32::MAX, MAX_SCENE_SPAN * 2.0] {
            let settings = SceneSettings {
                extent,
                ..seeded(3)
            };
            assert!(matches!(
                SceneGenerator::new(settings),
                Err(SceneError::InvalidSettings(_))
            ));
        }
    }

    #[test]
    fn test_huge_max_size_rejected() {
        let settings = SceneSettings {
            max_size: f32::MAX,
            ..seeded(3)
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_largest_allowed_span_generates() {
        let settings = SceneSettings {
            extent: MAX_SCENE_SPAN,
            max_size: MAX_SCENE_SPAN,
            ..seeded(5)
        };
        let scene = SceneGenerator::new(settings).unwrap().generate();
        assert!(scene.spheres.iter().all(|s| s.center.x.is_finite()));
    }
}
