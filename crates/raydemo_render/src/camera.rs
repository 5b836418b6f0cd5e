//! Free-fly camera
//!
//! Position plus yaw / pitch Euler angles (degrees). The front vector is
//! rebuilt from the angles after every rotation, and pitch is clamped short
//! of straight up / down so the view never flips over the pole.

use raydemo_input::CameraControl;
use raydemo_math::{mat4, Mat4, Vec3};

/// Hard ceiling for the pitch clamp; at 90 degrees `front` flips over the pole
pub const MAX_PITCH_LIMIT: f32 = 89.9;

/// Free-fly camera with zoom
#[derive(Clone, Debug)]
pub struct FlyCamera {
    /// World-space position
    pub position: Vec3,
    /// Fixed world up direction
    pub world_up: Vec3,
    /// Largest absolute pitch in degrees
    pub pitch_limit: f32,
    /// Smallest field of view in degrees
    pub min_fov: f32,
    /// Largest field of view in degrees
    pub max_fov: f32,

    front: Vec3,
    up: Vec3,
    right: Vec3,
    yaw: f32,
    pitch: f32,
    fov: f32,

    // Starting state restored by `reset`
    start_position: Vec3,
    start_yaw: f32,
    start_pitch: f32,
    start_fov: f32,
}

impl Default for FlyCamera {
    fn default() -> Self {
        Self::new()
    }
}

impl FlyCamera {
    /// Camera at (0, 0, 3) looking down -Z with a 45 degree field of view
    pub fn new() -> Self {
        Self::from_state(Vec3::new(0.0, 0.0, 3.0), -90.0, 0.0, 45.0)
    }

    /// Create a camera from position and angles in degrees
    pub fn from_state(position: Vec3, yaw: f32, pitch: f32, fov: f32) -> Self {
        let mut camera = Self {
            position,
            world_up: Vec3::Y,
            pitch_limit: 89.0,
            min_fov: 1.0,
            max_fov: 45.0,
            front: Vec3::new(0.0, 0.0, -1.0),
            up: Vec3::Y,
            right: Vec3::X,
            yaw,
            pitch,
            fov,
            start_position: position,
            start_yaw: yaw,
            start_pitch: pitch,
            start_fov: fov,
        };
        camera.pitch = camera.pitch.clamp(-camera.pitch_limit, camera.pitch_limit);
        camera.update_vectors();
        camera
    }

    /// Builder: set the pitch clamp in degrees
    pub fn with_pitch_limit(mut self, limit: f32) -> Self {
        self.pitch_limit = limit.abs().min(MAX_PITCH_LIMIT);
        let limit = self.effective_pitch_limit();
        self.pitch = self.pitch.clamp(-limit, limit);
        self.start_pitch = self.start_pitch.clamp(-limit, limit);
        self.update_vectors();
        self
    }

    /// Builder: set the zoom bounds in degrees
    pub fn with_fov_range(mut self, min_fov: f32, max_fov: f32) -> Self {
        self.min_fov = min_fov.min(max_fov);
        self.max_fov = max_fov.max(min_fov);
        self.fov = self.fov.clamp(self.min_fov, self.max_fov);
        self.start_fov = self.start_fov.clamp(self.min_fov, self.max_fov);
        self
    }

    /// Apply yaw / pitch deltas in degrees
    pub fn rotate(&mut self, delta_yaw: f32, delta_pitch: f32) {
        self.yaw += delta_yaw;
        let limit = self.effective_pitch_limit();
        self.pitch = (self.pitch + delta_pitch).clamp(-limit, limit);
        self.update_vectors();
    }

    // `pitch_limit` is public, so bound it again wherever it is applied
    fn effective_pitch_limit(&self) -> f32 {
        self.pitch_limit.abs().min(MAX_PITCH_LIMIT)
    }

    /// Move along front, right and world up
    pub fn move_local(&mut self, forward: f32, right: f32, up: f32) {
        self.position += self.front * forward + self.right * right + self.world_up * up;
    }

    /// Narrow the field of view by `delta` degrees (negative widens)
    pub fn zoom(&mut self, delta: f32) {
        self.fov = (self.fov - delta).clamp(self.min_fov, self.max_fov);
    }

    /// Restore the starting position, angles and zoom
    pub fn reset(&mut self) {
        self.position = self.start_position;
        self.yaw = self.start_yaw;
        self.pitch = self.start_pitch;
        self.fov = self.start_fov;
        self.update_vectors();
    }

    pub fn front(&self) -> Vec3 {
        self.front
    }

    pub fn up(&self) -> Vec3 {
        self.up
    }

    pub fn right(&self) -> Vec3 {
        self.right
    }

    /// Yaw in degrees
    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    /// Pitch in degrees
    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    /// Vertical field of view in degrees
    pub fn fov(&self) -> f32 {
        self.fov
    }

    /// World to view transform
    pub fn view_matrix(&self) -> Mat4 {
        mat4::look_at(self.position, self.position + self.front, self.up)
    }

    /// View to clip transform
    pub fn projection_matrix(&self, aspect: f32, near: f32, far: f32) -> Mat4 {
        mat4::perspective(self.fov.to_radians(), aspect, near, far)
    }

    fn update_vectors(&mut self) {
        let (yaw, pitch) = (self.yaw.to_radians(), self.pitch.to_radians());
        self.front = Vec3::new(
            yaw.cos() * pitch.cos(),
            pitch.sin(),
            yaw.sin() * pitch.cos(),
        )
        .normalized();
        self.right = self.front.cross(self.world_up).normalized();
        self.up = self.right.cross(self.front).normalized();
    }
}

impl CameraControl for FlyCamera {
    fn move_local(&mut self, forward: f32, right: f32, up: f32) {
        FlyCamera::move_local(self, forward, right, up);
    }

    fn rotate(&mut self, delta_yaw: f32, delta_pitch: f32) {
        FlyCamera::rotate(self, delta_yaw, delta_pitch);
    }

    fn zoom(&mut self, delta: f32) {
        FlyCamera::zoom(self, delta);
    }

    fn position(&self) -> Vec3 {
        self.position
    }
}
