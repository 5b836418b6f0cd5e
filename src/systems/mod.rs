//! Application systems
//!
//! The pieces the event loop drives each frame, kept out of main.rs so they can be tested.

mod metrics;
mod render;
mod simulation;
mod window;

pub use metrics::{csv_path, MetricsError, PerformanceRecorder, CSV_HEADER};
pub use render::{frame_uniforms, RenderSetupError, RenderSystem};
pub use simulation::{FrameTiming, SimulationSystem, MAX_STEP};
pub use window::{format_title, TitleStats, WindowError, WindowSystem, TITLE_REFRESH_INTERVAL};
