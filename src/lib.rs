//! RayDemo
//!
//! Host side of a full-screen raytracing demo: configuration, input mapping
//! and the systems driven by the `raydemo` and `clear_window` binaries.

pub mod config;
pub mod input;
pub mod systems;

/// Initialize `env_logger`, defaulting to `default_level` when `RUST_LOG` is unset
pub fn init_logging(default_level: &str) {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();
}
