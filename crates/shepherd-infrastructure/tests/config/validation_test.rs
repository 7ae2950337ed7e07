//! Configuration Validation Tests

use shepherd_domain::error::Error;
use shepherd_infrastructure::config::loader::validate_app_config;
use shepherd_infrastructure::config::{AppConfig, ConfigLoader};
use tempfile::TempDir;

fn assert_rejected(config: &AppConfig, needle: &str) {
    match validate_app_config(config) {
        Err(Error::Configuration { message, .. }) => {
            assert!(message.contains(needle), "unexpected message: {message}");
        }
        other => panic!("expected configuration error, got {other:?}"),
    }
}

#[test]
fn test_default_config_is_valid() {
    assert!(validate_app_config(&AppConfig::default()).is_ok());
}

#[test]
fn test_zero_port_is_rejected() {
    let mut config = AppConfig::default();
    config.server.port = 0;
    assert_rejected(&config, "port");
}

#[test]
fn test_empty_app_name_is_rejected() {
    let mut config = AppConfig::default();
    config.cluster.app_name = "  ".to_string();
    assert_rejected(&config, "app name");
}

#[test]
fn test_rest_prefix_must_be_absolute() {
    let mut config = AppConfig::default();
    config.server.rest.prefix = "REST".to_string();
    assert_rejected(&config, "REST prefix");
}

#[test]
fn test_enabled_backup_requires_bucket() {
    let mut config = AppConfig::default();
    config.backup.enabled = true;
    assert_rejected(&config, "bucket");

    config.backup.bucket = "backups".to_string();
    assert!(validate_app_config(&config).is_ok());
}

#[test]
fn test_intervals_must_be_positive() {
    let mut config = AppConfig::default();
    config.backup.snapshot_interval_secs = 0;
    assert_rejected(&config, "Snapshot interval");

    let mut config = AppConfig::default();
    config.discovery.refresh_interval_secs = 0;
    assert_rejected(&config, "refresh interval");

    let mut config = AppConfig::default();
    config.discovery.timeout_secs = 0;
    assert_rejected(&config, "timeout");
}

#[test]
fn test_invalid_log_level_is_rejected() {
    let mut config = AppConfig::default();
    config.logging.level = "loud".to_string();
    assert_rejected(&config, "log level");
}

#[test]
fn test_loader_applies_validation() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("shepherd.toml");
    std::fs::write(&config_path, "[server]\nport = 0\n").unwrap();

    let result = ConfigLoader::new()
        .with_config_path(&config_path)
        .with_env_prefix("SHEPHERD_TEST_VALIDATION")
        .load();

    assert!(matches!(result, Err(Error::Configuration { .. })));
}
