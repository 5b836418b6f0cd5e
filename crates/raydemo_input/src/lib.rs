//! Free-fly Input Handling
//!
//! This crate turns raw keyboard, mouse and scroll events into camera
//! movement, look and zoom.

mod camera_controller;

pub use camera_controller::{CameraController, CameraControl};
