//! Camera controller for free-fly input handling
//!
//! Controls:
//! - W/S: Forward/backward along the view direction
//! - A/D: Left/right strafe
//! - Space/Shift: Up/down along world up
//! - Mouse: look (while captured or while the left button is held)
//! - Scroll wheel: zoom (field of view)

use raydemo_math::Vec3;
use winit::event::{ElementState, MouseButton};
use winit::keyboard::KeyCode;

/// Camera controller for handling input
pub struct CameraController {
    // Movement state
    forward: bool,
    backward: bool,
    left: bool,
    right: bool,
    up: bool,
    down: bool,

    // Mouse state
    mouse_pressed: bool,
    pending_yaw: f32,
    pending_pitch: f32,
    pending_scroll: f32,

    // Input smoothing state
    smooth_yaw: f32,
    smooth_pitch: f32,

    // Configuration
    pub move_speed: f32,
    /// Degrees of rotation per pixel of mouse motion
    pub mouse_sensitivity: f32,
    /// Degrees of field of view per scroll line
    pub zoom_speed: f32,
    pub smoothing_half_life: f32,  // Exponential smoothing half-life in seconds
    pub smoothing_enabled: bool,
}

impl Default for CameraController {
    fn default() -> Self {
        Self::new()
    }
}

impl CameraController {
    pub fn new() -> Self {
        Self {
            forward: false,
            backward: false,
            left: false,
            right: false,
            up: false,
            down: false,

            mouse_pressed: false,
            pending_yaw: 0.0,
            pending_pitch: 0.0,
            pending_scroll: 0.0,

            smooth_yaw: 0.0,
            smooth_pitch: 0.0,

            move_speed: 2.5,
            mouse_sensitivity: 0.1,
            zoom_speed: 1.0,
            smoothing_half_life: 0.05,
            smoothing_enabled: false,
        }
    }

    /// Process keyboard input
    ///
    /// Returns true if the key is a movement key.
    pub fn process_keyboard(&mut self, key: KeyCode, state: ElementState) -> bool {
        let pressed = state == ElementState::Pressed;

        match key {
            KeyCode::KeyW => { self.forward = pressed; true }
            KeyCode::KeyS => { self.backward = pressed; true }
            KeyCode::KeyA => { self.left = pressed; true }
            KeyCode::KeyD => { self.right = pressed; true }
            KeyCode::Space => { self.up = pressed; true }
            KeyCode::ShiftLeft | KeyCode::ShiftRight => { self.down = pressed; true }
            _ => false,
        }
    }

    /// Process mouse button input
    pub fn process_mouse_button(&mut self, button: MouseButton, state: ElementState) {
        if button == MouseButton::Left {
            self.mouse_pressed = state == ElementState::Pressed;
        }
    }

    /// Process mouse movement (raw device deltas, screen Y grows downward)
    pub fn process_mouse_motion(&mut self, delta_x: f64, delta_y: f64) {
        self.pending_yaw += delta_x as f32;
        self.pending_pitch += delta_y as f32;
    }

    /// Process scroll wheel input in lines (positive = scroll up = zoom in)
    pub fn process_scroll(&mut self, lines: f32) {
        self.pending_scroll += lines;
    }

    /// Update the camera based on accumulated input
    ///
    /// When `cursor_captured` is true, free look is enabled (no click required).
    /// Returns the camera position for debug display.
    pub fn update<C: CameraControl>(&mut self, camera: &mut C, dt: f32, cursor_captured: bool) -> Vec3 {
        let (fwd, rgt, up_down) = self.movement_input();
        let step = self.move_speed * dt;
        camera.move_local(fwd * step, rgt * step, up_down * step);

        // Exponential smoothing: new = old * factor + input * (1 - factor)
        // factor = 2^(-dt / half_life)
        let (yaw_input, pitch_input) = if self.smoothing_enabled && dt > 0.0 {
            let smooth_factor = 2.0f32.powf(-dt / self.smoothing_half_life);
            self.smooth_yaw = self.smooth_yaw * smooth_factor + self.pending_yaw * (1.0 - smooth_factor);
            self.smooth_pitch = self.smooth_pitch * smooth_factor + self.pending_pitch * (1.0 - smooth_factor);
            (self.smooth_yaw, self.smooth_pitch)
        } else {
            (self.pending_yaw, self.pending_pitch)
        };

        if cursor_captured || self.mouse_pressed {
            // Mouse right turns right, mouse down looks down
            camera.rotate(
                yaw_input * self.mouse_sensitivity,
                -pitch_input * self.mouse_sensitivity,
            );
        }

        if self.pending_scroll != 0.0 {
            camera.zoom(self.pending_scroll * self.zoom_speed);
        }

        self.pending_yaw = 0.0;
        self.pending_pitch = 0.0;
        self.pending_scroll = 0.0;

        camera.position()
    }

    /// Raw movement input as (forward, right, up), each in -1.0..=1.0
    pub fn movement_input(&self) -> (f32, f32, f32) {
        let forward = (self.forward as i32 - self.backward as i32) as f32;
        let right = (self.right as i32 - self.left as i32) as f32;
        let up = (self.up as i32 - self.down as i32) as f32;
        (forward, right, up)
    }

    /// Check if any movement keys are pressed
    pub fn is_moving(&self) -> bool {
        self.forward || self.backward || self.left || self.right || self.up || self.down
    }

    /// Toggle input smoothing on/off
    pub fn toggle_smoothing(&mut self) -> bool {
        self.smoothing_enabled = !self.smoothing_enabled;
        self.smooth_yaw = 0.0;
        self.smooth_pitch = 0.0;
        self.smoothing_enabled
    }

    /// Check if smoothing is enabled
    pub fn is_smoothing_enabled(&self) -> bool {
        self.smoothing_enabled
    }

    /// Builder: set movement speed
    pub fn with_move_speed(mut self, speed: f32) -> Self {
        self.move_speed = speed;
        self
    }

    /// Builder: set mouse sensitivity
    pub fn with_mouse_sensitivity(mut self, sensitivity: f32) -> Self {
        self.mouse_sensitivity = sensitivity;
        self
    }

    /// Builder: set zoom speed
    pub fn with_zoom_speed(mut self, speed: f32) -> Self {
        self.zoom_speed = speed;
        self
    }

    /// Builder: set smoothing half-life (lower = more responsive)
    pub fn with_smoothing_half_life(mut self, half_life: f32) -> Self {
        self.smoothing_half_life = half_life;
        self
    }

    /// Builder: enable or disable smoothing
    pub fn with_smoothing(mut self, enabled: bool) -> Self {
        self.smoothing_enabled = enabled;
        self
    }
}

/// Trait for camera control
/// Allows the controller to work with different camera implementations
pub trait CameraControl {
    /// Move relative to the view: along front, along right, along world up
    fn move_local(&mut self, forward: f32, right: f32, up: f32);
    /// Rotate by yaw / pitch deltas in degrees
    fn rotate(&mut self, delta_yaw: f32, delta_pitch: f32);
    /// Zoom in by `delta` degrees of field of view
    fn zoom(&mut self, delta: f32);
    fn position(&self) -> Vec3;
}
