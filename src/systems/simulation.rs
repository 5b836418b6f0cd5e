//! Per-frame camera simulation
//!
//! Measures the frame delta and feeds the accumulated input into the camera.

use std::time::{Duration, Instant};
use raydemo_input::CameraController;
use raydemo_render::camera::FlyCamera;

/// Longest step applied to the camera in one frame (seconds)
pub const MAX_STEP: f32 = 0.1;

/// Timing of one simulated frame
#[derive(Debug, Clone, Copy)]
pub struct FrameTiming {
    /// Measured time since the previous frame
    pub frame_time: Duration,
    /// Step applied to the camera, capped at [`MAX_STEP`]
    pub dt: f32,
}

/// Clamp a measured frame time to a camera step
pub fn step_for(frame_time: Duration) -> f32 {
    frame_time.as_secs_f32().min(MAX_STEP)
}

/// Manages the per-frame camera update
pub struct SimulationSystem {
    last_frame: Instant,
}

impl SimulationSystem {
    pub fn new() -> Self {
        Self {
            last_frame: Instant::now(),
        }
    }

    /// Restart the frame clock (after setup, so the first frame isn't huge)
    pub fn reset_clock(&mut self) {
        self.last_frame = Instant::now();
    }

    /// Run one frame: apply movement, mouse look and zoom
    pub fn update(
        &mut self,
        camera: &mut FlyCamera,
        controller: &mut CameraController,
        cursor_captured: bool,
    ) -> FrameTiming {
        let now = Instant::now();
        let frame_time = now - self.last_frame;
        self.last_frame = now;

        // Cap the step so a stall (window drag, focus loss) doesn't fling the camera
        let dt = step_for(frame_time);
        controller.update(camera, dt, cursor_captured);

        FrameTiming { frame_time, dt }
    }
}

impl Default for SimulationSystem {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use raydemo_math::Vec3;
    use winit::event::ElementState;
    use winit::keyboard::KeyCode;

    #[test]
    fn test_step_is_capped() {
        assert_eq!(step_for(Duration::from_secs(2)), MAX_STEP);
        assert!((step_for(Duration::from_millis(16)) - 0.016).abs() < 1e-6);
    }

    #[test]
    fn test_forward_key_moves_camera() {
        let mut sim = SimulationSystem::new();
        let mut camera = FlyCamera::new();
        let mut controller = CameraController::new();
        controller.process_keyboard(KeyCode::KeyW, ElementState::Pressed);

        std::thread::sleep(Duration::from_millis(20));
        let timing = sim.update(&mut camera, &mut controller, false);

        assert!(timing.frame_time >= Duration::from_millis(20));
        assert!(timing.dt > 0.0 && timing.dt <= MAX_STEP);
        // Default camera looks down -Z
        assert!(camera.position.z < 3.0);
        assert!(camera.position.x.abs() < 1e-4);
    }

    #[test]
    fn test_idle_frame_keeps_camera() {
        let mut sim = SimulationSystem::default();
        let mut camera = FlyCamera::new();
        let mut controller = CameraController::new();
        sim.update(&mut camera, &mut controller, true);
        assert_eq!(camera.position, Vec3::new(0.0, 0.0, 3.0));
    }
}
