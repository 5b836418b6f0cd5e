//! Window management system
//!
//! Handles window creation, cursor capture/release, fullscreen toggle, and title updates.

use std::sync::Arc;
use std::time::{Duration, Instant};
use raydemo_math::Vec3;
use winit::{
    event_loop::ActiveEventLoop,
    window::{CursorGrabMode, Fullscreen, Window},
};
use crate::config::WindowConfig;

/// Minimum time between title bar refreshes
pub const TITLE_REFRESH_INTERVAL: Duration = Duration::from_millis(500);

/// What the title bar shows next to the base title
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TitleStats {
    pub position: Vec3,
    /// Field of view in degrees
    pub fov: f32,
    /// Rolling frames per second, once enough frames were timed
    pub fps: Option<f32>,
}

/// Build the window title
///
/// `None` stats yields just the base title.
pub fn format_title(base: &str, stats: Option<&TitleStats>, cursor_captured: bool) -> String {
    let Some(stats) = stats else {
        return base.to_string();
    };
    let hint = if cursor_captured {
        "[Esc to release]"
    } else {
        "[Click to capture]"
    };
    let p = stats.position;
    match stats.fps {
        Some(fps) => format!(
            "{} - ({:.1}, {:.1}, {:.1}) fov:{:.0} | {:.0} fps {}",
            base, p.x, p.y, p.z, stats.fov, fps, hint
        ),
        None => format!(
            "{} - ({:.1}, {:.1}, {:.1}) fov:{:.0} {}",
            base, p.x, p.y, p.z, stats.fov, hint
        ),
    }
}

/// Manages the application window and cursor state
pub struct WindowSystem {
    window: Arc<Window>,
    cursor_captured: bool,
    base_title: String,
    show_stats: bool,
    last_title_update: Option<Instant>,
}

impl WindowSystem {
    /// Create window from config
    pub fn create(
        event_loop: &ActiveEventLoop,
        config: &WindowConfig,
    ) -> Result<Self, WindowError> {
        let mut attrs = Window::default_attributes()
            .with_title(&config.title)
            .with_inner_size(winit::dpi::LogicalSize::new(
                config.width,
                config.height,
            ));

        if config.fullscreen {
            attrs = attrs.with_fullscreen(Some(Fullscreen::Borderless(None)));
        }

        let window = Arc::new(
            event_loop
                .create_window(attrs)
                .map_err(|e| WindowError::CreationFailed(e.to_string()))?,
        );

        log::info!("Created window '{}' ({}x{})", config.title, config.width, config.height);

        Ok(Self {
            window,
            cursor_captured: false,
            base_title: config.title.clone(),
            show_stats: true,
            last_title_update: None,
        })
    }

    /// Builder: start with title statistics on or off
    pub fn with_title_stats(mut self, enabled: bool) -> Self {
        self.show_stats = enabled;
        self
    }

    /// Get window reference (for RenderContext creation)
    pub fn window(&self) -> &Arc<Window> {
        &self.window
    }

    /// Check if cursor is captured
    pub fn is_cursor_captured(&self) -> bool {
        self.cursor_captured
    }

    /// Capture cursor for mouse look
    pub fn capture_cursor(&mut self) -> bool {
        let grab_result = self.window
            .set_cursor_grab(CursorGrabMode::Locked)
            .or_else(|_| self.window.set_cursor_grab(CursorGrabMode::Confined));

        if grab_result.is_ok() {
            self.window.set_cursor_visible(false);
            self.cursor_captured = true;
            self.last_title_update = None;
            log::info!("Cursor captured - Escape to release");
            true
        } else {
            log::warn!("Failed to capture cursor");
            false
        }
    }

    /// Release cursor
    pub fn release_cursor(&mut self) {
        let _ = self.window.set_cursor_grab(CursorGrabMode::None);
        self.window.set_cursor_visible(true);
        self.cursor_captured = false;
        self.last_title_update = None;
        log::info!("Cursor released - click to capture");
    }

    /// Toggle fullscreen mode
    pub fn toggle_fullscreen(&self) {
        let new_fullscreen = if self.window.fullscreen().is_some() {
            None
        } else {
            Some(Fullscreen::Borderless(None))
        };
        self.window.set_fullscreen(new_fullscreen);
    }

    /// Toggle the statistics shown in the title, returning the new state
    pub fn toggle_title_stats(&mut self) -> bool {
        self.show_stats = !self.show_stats;
        // Force the next update through so the change shows immediately
        self.last_title_update = None;
        self.show_stats
    }

    /// Refresh the title, at most once per [`TITLE_REFRESH_INTERVAL`]
    pub fn update_title(&mut self, stats: &TitleStats) {
        let now = Instant::now();
        if let Some(last) = self.last_title_update {
            if now.duration_since(last) < TITLE_REFRESH_INTERVAL {
                return;
            }
        }
        self.last_title_update = Some(now);

        let stats = self.show_stats.then_some(stats);
        let title = format_title(&self.base_title, stats, self.cursor_captured);
        self.window.set_title(&title);
    }

    /// Request a redraw
    pub fn request_redraw(&self) {
        self.window.request_redraw();
    }
}

#[derive(Debug)]
pub enum WindowError {
    CreationFailed(String),
}

impl std::fmt::Display for WindowError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WindowError::CreationFailed(msg) => write!(f, "Window creation failed: {}", msg),
        }
    }
}

impl std::error::Error for WindowError {}

#[cfg(test)]
mod tests {
    use super::*;

    // Note: Can't test the window itself without an event loop

    fn stats(fps: Option<f32>) -> TitleStats {
        TitleStats {
            position: Vec3::new(1.0, 2.0, -3.0),
            fov: 45.0,
            fps,
        }
    }

    #[test]
    fn test_title_formatting_captured() {
        let title = format_title("RayDemo", Some(&stats(Some(59.7))), true);
        assert_eq!(title, "RayDemo - (1.0, 2.0, -3.0) fov:45 | 60 fps [Esc to release]");
    }

    #[test]
    fn test_title_formatting_released() {
        let title = format_title("RayDemo", Some(&stats(Some(30.0))), false);
        assert!(title.ends_with("[Click to capture]"));
    }

    #[test]
    fn test_title_without_fps() {
        let title = format_title("RayDemo", Some(&stats(None)), true);
        assert!(!title.contains("fps"));
        assert!(title.contains("fov:45"));
    }

    #[test]
    fn test_title_stats_hidden() {
        assert_eq!(format_title("RayDemo", None, true), "RayDemo");
    }

    #[test]
    fn test_window_error_display() {
        let err = WindowError::CreationFailed("no display".to_string());
        assert_eq!(err.to_string(), "Window creation failed: no display");
    }
}
