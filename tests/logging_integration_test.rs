//! Integration tests for logging functionality
//!
//! The global subscriber can be installed once per process, so everything that
//! initializes logging lives in a single test.

use labelfuse::config::LoggingConfig;
use labelfuse::logging::init_logging;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_file_logging_created_when_enabled() {
    std::env::remove_var("RUST_LOG");

    let temp_dir = TempDir::new().unwrap();
    let log_path = temp_dir.path().join("logs");
    let config = LoggingConfig {
        local_enabled: true,
        local_path: log_path.to_string_lossy().to_string(),
        local_rotation: "never".to_string(),
    };
    assert!(!log_path.exists());

    let guard = init_logging("debug", &config).unwrap();
    drop(guard);

    let log_file = log_path.join("labelfuse.log");
    assert!(log_file.exists());
    let contents = fs::read_to_string(&log_file).unwrap();
    assert!(contents.contains("Logging initialized"));
    assert!(contents.lines().all(|line| line.starts_with('{')));

    let second = init_logging("info", &LoggingConfig::default());
    assert!(second.is_err());
}

#[test]
fn test_logging_config_default_is_console_only() {
    let config = LoggingConfig::default();
    assert!(!config.local_enabled);
    assert_eq!(config.local_rotation, "daily");
}
