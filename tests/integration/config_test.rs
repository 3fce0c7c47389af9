// Config persistence tests

use std::fs;
use std::time::Duration;

use solar_guardian::core::config::{DEFAULT_BASE_URL, DEFAULT_REFRESH_INTERVAL_SECS};
use solar_guardian::core::solar::FailurePolicy;
use solar_guardian::Config;
use tempfile::TempDir;

#[test]
fn test_missing_file_gives_defaults() {
    let dir = TempDir::new().unwrap();
    let config = Config::load_from(&dir.path().join("config.json")).unwrap();
    assert_eq!(config, Config::default());
}

#[test]
fn test_save_and_reload() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("config.json");

    let mut config = Config::default();
    config.set_base_url("https://space-weather.example".to_string());
    config.refresh_interval_secs = 60;
    config.retain_snapshot_on_error = true;
    config.save_to(&path).unwrap();

    let loaded = Config::load_from(&path).unwrap();
    assert_eq!(loaded, config);
    assert_eq!(loaded.refresh_interval(), Duration::from_secs(60));
    assert_eq!(
        loaded.scheduler_config().failure_policy,
        FailurePolicy::RetainLastSnapshot
    );
}

#[test]
fn test_corrupted_file_falls_back_to_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.json");
    fs::write(&path, "{ not json").unwrap();

    let config = Config::load_from(&path).unwrap();
    assert_eq!(config.base_url, DEFAULT_BASE_URL);
    assert_eq!(config.refresh_interval_secs, DEFAULT_REFRESH_INTERVAL_SECS);
}

#[test]
fn test_empty_file_falls_back_to_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.json");
    fs::write(&path, "   \n").unwrap();

    assert_eq!(Config::load_from(&path).unwrap(), Config::default());
}
