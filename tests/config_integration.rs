//! Integration tests for configuration loading
//!
//! Tests that verify config loading from files and environment variables.

use raydemo::config::AppConfig;
use serial_test::serial;

#[test]
#[serial]
fn test_env_override() {
    std::env::set_var("RAYDEMO_WINDOW__TITLE", "Test From Env");
    let config = AppConfig::load().unwrap();
    std::env::remove_var("RAYDEMO_WINDOW__TITLE");
    assert_eq!(config.window.title, "Test From Env");
}

#[test]
#[serial]
fn test_env_override_nested_number() {
    std::env::set_var("RAYDEMO_SCENE__CUBE_COUNT", "50");
    std::env::set_var("RAYDEMO_METRICS__ENABLED", "true");
    let config = AppConfig::load().unwrap();
    std::env::remove_var("RAYDEMO_SCENE__CUBE_COUNT");
    std::env::remove_var("RAYDEMO_METRICS__ENABLED");

    assert_eq!(config.scene.cube_count, 50);
    assert!(config.metrics.enabled);
}

#[test]
#[serial]
fn test_shipped_default_config_loads() {
    let cwd = std::env::current_dir().unwrap();
    assert!(cwd.join("config/default.toml").exists());

    let config = AppConfig::load().unwrap();
    assert_eq!(config.window.width, 800);
    assert_eq!(config.window.height, 600);
    assert!(config.scene.to_settings().validate().is_ok());
    assert!(cwd.join(&config.shaders.vertex_path).exists());
    assert!(cwd.join(&config.shaders.fragment_path).exists());
}

#[test]
#[serial]
fn test_shipped_shaders_declare_entry_points() {
    let config = AppConfig::load().unwrap();
    let sources = raydemo_render::shader::ShaderSources::load(
        &config.shaders.vertex_path,
        &config.shaders.fragment_path,
    )
    .unwrap();
    assert!(sources.vertex.contains("vs_main"));
    assert!(sources.fragment.contains("fs_main"));
}
