//! Integration tests for logging functionality
//!
//! The global subscriber can only be installed once per process, so
//! `init_logging` is exercised by a single test.

use medredact::config::LoggingConfig;
use medredact::logging::init_logging;
use tempfile::TempDir;

#[test]
fn test_logging_config_default() {
    let config = LoggingConfig::default();
    assert!(!config.local_enabled);
    assert_eq!(config.local_rotation, "daily");
}

#[test]
fn test_invalid_level_rejected_before_install() {
    let config = LoggingConfig::default();
    assert!(init_logging("chatty", &config).is_err());
}

#[test]
fn test_file_logging_creates_directory() {
    let temp_dir = TempDir::new().unwrap();
    let log_path = temp_dir.path().join("logs");

    let config = LoggingConfig {
        local_enabled: true,
        local_path: log_path.to_string_lossy().to_string(),
        local_rotation: "never".to_string(),
    };

    assert!(!log_path.exists());
    let guard = init_logging("debug", &config).unwrap();
    tracing::info!(document = "scan_001", "logging smoke test");
    drop(guard);

    assert!(log_path.is_dir());
    assert!(log_path.join("medredact.log").exists());
}
