//! Application configuration
//!
//! Configuration is loaded from multiple sources with the following priority (lowest to highest):
//! 1. `config/default.toml` (version controlled)
//! 2. `config/user.toml` (gitignored, user overrides)
//! 3. Environment variables (`RAYDEMO_SECTION__KEY`)

use figment::{Figment, providers::{Format, Toml, Env}};
use raydemo_math::Vec3;
use raydemo_scene::SceneSettings;
use serde::{Serialize, Deserialize};
use std::path::{Path, PathBuf};

/// Prefix for environment overrides
pub const ENV_PREFIX: &str = "RAYDEMO_";

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub window: WindowConfig,
    #[serde(default)]
    pub camera: CameraConfig,
    #[serde(default)]
    pub input: InputConfig,
    /// Random scene generation
    #[serde(default)]
    pub scene: SceneConfig,
    /// Shader file locations
    #[serde(default)]
    pub shaders: ShaderConfig,
    #[serde(default)]
    pub rendering: RenderingConfig,
    /// Frame time recording
    #[serde(default)]
    pub metrics: MetricsConfig,
    #[serde(default)]
    pub debug: DebugConfig,
}

impl AppConfig {
    /// Load configuration from the `config` directory
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from a specific config directory
    ///
    /// Missing files are skipped; environment variables always apply.
    pub fn load_from<P: AsRef<Path>>(config_dir: P) -> Result<Self, ConfigError> {
        let config_dir = config_dir.as_ref();
        let default_path = config_dir.join("default.toml");
        let user_path = config_dir.join("user.toml");

        let mut figment = Figment::new();

        if default_path.exists() {
            figment = figment.merge(Toml::file(&default_path));
        }

        if user_path.exists() {
            figment = figment.merge(Toml::file(&user_path));
        }

        // RAYDEMO_WINDOW__TITLE=Test -> window.title = "Test"
        figment = figment.merge(Env::prefixed(ENV_PREFIX).split("__"));

        figment.extract().map_err(ConfigError::from)
    }
}

/// Window configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Window title
    pub title: String,
    /// Window width in logical pixels
    pub width: u32,
    /// Window height in logical pixels
    pub height: u32,
    /// Start in borderless fullscreen
    pub fullscreen: bool,
    /// Enable VSync
    pub vsync: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "RayDemo".to_string(),
            width: 800,
            height: 600,
            fullscreen: false,
            vsync: true,
        }
    }
}

/// Camera configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Starting position [x, y, z]
    pub start_position: [f32; 3],
    /// Starting yaw in degrees (-90 looks down -Z)
    pub yaw: f32,
    /// Starting pitch in degrees
    pub pitch: f32,
    /// Starting vertical field of view in degrees
    pub fov: f32,
    /// Near clipping plane
    pub near: f32,
    /// Far clipping plane
    pub far: f32,
    /// Maximum pitch angle in degrees, capped just below 90
    pub pitch_limit: f32,
    /// Zoom bounds in degrees
    pub min_fov: f32,
    pub max_fov: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            start_position: [0.0, 0.0, 3.0],
            yaw: -90.0,
            pitch: 0.0,
            fov: 45.0,
            near: 0.1,
            far: 100.0,
            pitch_limit: 89.0,
            min_fov: 1.0,
            max_fov: 45.0,
        }
    }
}

impl CameraConfig {
    pub fn start_position(&self) -> Vec3 {
        Vec3::from(self.start_position)
    }
}

/// Input configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Movement speed (units per second)
    pub move_speed: f32,
    /// Degrees of rotation per pixel of mouse motion
    pub mouse_sensitivity: f32,
    /// Degrees of field of view per scroll line
    pub zoom_speed: f32,
    /// Input smoothing half-life in seconds (lower = more responsive)
    pub smoothing_half_life: f32,
    /// Enable input smoothing by default
    pub smoothing_enabled: bool,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            move_speed: 2.5,
            mouse_sensitivity: 0.1,
            zoom_speed: 1.0,
            smoothing_half_life: 0.05,
            smoothing_enabled: false,
        }
    }
}

/// Scene generation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub sphere_count: usize,
    pub triangle_count: usize,
    pub cube_count: usize,
    /// Half-width of the placement box
    pub extent: f32,
    pub min_size: f32,
    pub max_size: f32,
    /// Fixed seed; omit for a different scene every run
    pub seed: Option<u64>,
}

impl Default for SceneConfig {
    fn default() -> Self {
        let settings = SceneSettings::default();
        Self {
            sphere_count: settings.sphere_count,
            triangle_count: settings.triangle_count,
            cube_count: settings.cube_count,
            extent: settings.extent,
            min_size: settings.min_size,
            max_size: settings.max_size,
            seed: settings.seed,
        }
    }
}

impl SceneConfig {
    /// Convert to the generator's settings
    pub fn to_settings(&self) -> SceneSettings {
        SceneSettings {
            sphere_count: self.sphere_count,
            triangle_count: self.triangle_count,
            cube_count: self.cube_count,
            extent: self.extent,
            min_size: self.min_size,
            max_size: self.max_size,
            seed: self.seed,
        }
    }
}

/// Shader file configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ShaderConfig {
    /// WGSL file declaring `vs_main`
    pub vertex_path: PathBuf,
    /// WGSL file declaring `fs_main`
    pub fragment_path: PathBuf,
}

impl Default for ShaderConfig {
    fn default() -> Self {
        Self {
            vertex_path: PathBuf::from("shaders/raytrace_vertex.wgsl"),
            fragment_path: PathBuf::from("shaders/raytrace_fragment.wgsl"),
        }
    }
}

/// Rendering configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderingConfig {
    /// Background color behind the traced image [r, g, b, a]
    pub background_color: [f32; 4],
    /// Color used by the `clear_window` demo [r, g, b, a]
    pub clear_color: [f32; 4],
}

impl Default for RenderingConfig {
    fn default() -> Self {
        Self {
            background_color: [0.02, 0.02, 0.08, 1.0],
            clear_color: [0.72, 0.45, 0.20, 1.0],
        }
    }
}

/// Converts an `[r, g, b, a]` config color for a render pass
pub fn to_wgpu_color(c: [f32; 4]) -> wgpu::Color {
    wgpu::Color {
        r: c[0] as f64,
        g: c[1] as f64,
        b: c[2] as f64,
        a: c[3] as f64,
    }
}

/// Performance metrics configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MetricsConfig {
    /// Write per-frame timings to a CSV file
    pub enabled: bool,
    /// Directory receiving `performance_metrics_<cubes>.csv`
    pub output_dir: PathBuf,
    /// Stop recording after this many frames (0 = unlimited)
    pub max_samples: u64,
    /// Show position, fov and fps in the window title
    pub title_stats: bool,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            output_dir: PathBuf::from("."),
            max_samples: 0,
            title_stats: true,
        }
    }
}

/// Debug configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DebugConfig {
    /// Default log filter (error, warn, info, debug, trace); `RUST_LOG` wins
    pub log_level: String,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// Configuration error
#[derive(Debug)]
pub struct ConfigError {
    message: String,
}

impl From<figment::Error> for ConfigError {
    fn from(e: figment::Error) -> Self {
        ConfigError {
            message: e.to_string(),
        }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Configuration error: {}", self.message)
    }
}

impl std::error::Error for ConfigError {}
