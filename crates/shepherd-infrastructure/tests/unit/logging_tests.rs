//! Logging Tests

use shepherd_infrastructure::constants::DEFAULT_LOG_LEVEL;
use shepherd_infrastructure::logging::{LoggingConfig, init_logging, parse_log_level};
use tracing::Level;

#[test]
fn test_parse_log_level() {
    assert_eq!(parse_log_level("trace").unwrap(), Level::TRACE);
    assert_eq!(parse_log_level("debug").unwrap(), Level::DEBUG);
    assert_eq!(parse_log_level("INFO").unwrap(), Level::INFO);
    assert_eq!(parse_log_level("warn").unwrap(), Level::WARN);
    assert_eq!(parse_log_level("warning").unwrap(), Level::WARN);
    assert_eq!(parse_log_level("error").unwrap(), Level::ERROR);

    assert!(parse_log_level("invalid").is_err());
}

#[test]
fn test_logging_config_default() {
    let config = LoggingConfig::default();
    assert_eq!(config.level, DEFAULT_LOG_LEVEL);
    assert!(!config.json_format);
    assert!(config.file_output.is_none());
}

#[test]
fn test_init_logging_rejects_invalid_level() {
    let config = LoggingConfig {
        level: "chatty".to_string(),
        ..LoggingConfig::default()
    };
    assert!(init_logging(&config).is_err());
}

#[test]
fn test_init_logging_installs_subscriber_once() {
    let temp_dir = tempfile::tempdir().unwrap();
    let config = LoggingConfig {
        json_format: true,
        file_output: Some(temp_dir.path().join("shepherd.log")),
        ..LoggingConfig::default()
    };

    assert!(init_logging(&config).is_ok());
    // a global subscriber can only be installed once per process
    assert!(init_logging(&config).is_err());
}
