//! Integration tests for configuration loading and validation
//!
//! Tests that touch environment variables hold `ENV_MUTEX` so they don't
//! interfere with each other.

use medredact::config::{load_config, load_config_from_str};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Mutex;
use tempfile::NamedTempFile;

static ENV_MUTEX: Mutex<()> = Mutex::new(());

fn cleanup_env_vars() {
    for var in [
        "MEDREDACT_APPLICATION_DRY_RUN",
        "MEDREDACT_INPUT_IMAGES_DIR",
        "MEDREDACT_INPUT_EXTENSIONS",
        "MEDREDACT_OCR_TIMEOUT_SECONDS",
        "MEDREDACT_REDACTION_MIN_CONFIDENCE",
        "MEDREDACT_REDACTION_AUDIT_ENABLED",
        "TEST_SCANS_DIR",
    ] {
        std::env::remove_var(var);
    }
}

fn write_config(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn test_load_complete_config() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();

    let file = write_config(
        r#"
[application]
log_level = "debug"
dry_run = true

[input]
images_dir = "scans"
extensions = ["jpg", "png", "tiff"]

[output]
output_dir = "redacted"
redacted_format = "png"
write_batch_report = false

[ocr]
command = "/usr/local/bin/tesseract"
engine_mode = 1
page_seg_mode = 4
language = "eng+hin"
timeout_seconds = 45
extra_args = ["--dpi", "300"]

[preprocess]
enabled = false
blur_sigma = 0.0
threshold_block_size = 15
threshold_offset = 10

[redaction]
min_confidence = 65.0

[redaction.audit]
enabled = true
log_path = "/tmp/medredact-audit.log"
json_format = false

[logging]
local_enabled = true
local_path = "/tmp/medredact-logs"
local_rotation = "hourly"
"#,
    );

    let config = load_config(file.path()).unwrap();

    assert_eq!(config.application.log_level, "debug");
    assert!(config.application.dry_run);
    assert_eq!(config.input.images_dir, PathBuf::from("scans"));
    assert_eq!(config.input.extensions, vec!["jpg", "png", "tiff"]);
    assert_eq!(config.output.output_dir, PathBuf::from("redacted"));
    assert_eq!(config.output.redacted_format, "png");
    assert!(!config.output.write_batch_report);
    assert_eq!(config.ocr.command, "/usr/local/bin/tesseract");
    assert_eq!(config.ocr.engine_mode, 1);
    assert_eq!(config.ocr.page_seg_mode, 4);
    assert_eq!(config.ocr.timeout_seconds, 45);
    assert_eq!(config.ocr.extra_args, vec!["--dpi", "300"]);
    assert!(!config.preprocess.enabled);
    assert_eq!(config.preprocess.threshold_block_size, 15);
    assert_eq!(config.redaction.min_confidence, 65.0);
    assert!(config.redaction.audit.enabled);
    assert!(!config.redaction.audit.json_format);
    assert_eq!(config.logging.local_rotation, "hourly");
}

#[test]
fn test_empty_config_uses_defaults() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();

    let config = load_config_from_str("").unwrap();

    assert_eq!(config.input.images_dir, PathBuf::from("images"));
    assert_eq!(config.input.extensions, vec!["jpg", "jpeg", "png"]);
    assert_eq!(config.output.output_dir, PathBuf::from("outputs"));
    assert_eq!(config.output.redacted_format, "jpg");
    assert_eq!(config.ocr.engine_mode, 3);
    assert_eq!(config.ocr.page_seg_mode, 6);
    assert_eq!(config.redaction.min_confidence, 40.0);
    assert!(!config.redaction.audit.enabled);
    assert!(!config.application.dry_run);
}

#[test]
fn test_env_overrides() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();

    std::env::set_var("MEDREDACT_APPLICATION_DRY_RUN", "true");
    std::env::set_var("MEDREDACT_INPUT_IMAGES_DIR", "/data/scans");
    std::env::set_var("MEDREDACT_INPUT_EXTENSIONS", "jpg, tif");
    std::env::set_var("MEDREDACT_OCR_TIMEOUT_SECONDS", "30");
    std::env::set_var("MEDREDACT_REDACTION_MIN_CONFIDENCE", "72.5");
    std::env::set_var("MEDREDACT_REDACTION_AUDIT_ENABLED", "true");

    let config = load_config_from_str("[input]\nimages_dir = \"scans\"\n");
    cleanup_env_vars();
    let config = config.unwrap();

    assert!(config.application.dry_run);
    assert_eq!(config.input.images_dir, PathBuf::from("/data/scans"));
    assert_eq!(config.input.extensions, vec!["jpg", "tif"]);
    assert_eq!(config.ocr.timeout_seconds, 30);
    assert_eq!(config.redaction.min_confidence, 72.5);
    assert!(config.redaction.audit.enabled);
}

#[test]
fn test_invalid_env_override() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();

    std::env::set_var("MEDREDACT_OCR_TIMEOUT_SECONDS", "soon");
    let result = load_config_from_str("");
    cleanup_env_vars();

    let err = result.unwrap_err();
    assert!(err.to_string().contains("MEDREDACT_OCR_TIMEOUT_SECONDS"));
}

#[test]
fn test_env_var_substitution() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();

    std::env::set_var("TEST_SCANS_DIR", "/mnt/ward-7");
    let result = load_config_from_str("[input]\nimages_dir = \"${TEST_SCANS_DIR}\"\n");
    cleanup_env_vars();

    assert_eq!(
        result.unwrap().input.images_dir,
        PathBuf::from("/mnt/ward-7")
    );
}

#[test]
fn test_missing_substitution_variable() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();

    let err = load_config_from_str("[input]\nimages_dir = \"${TEST_SCANS_DIR}\"\n").unwrap_err();
    assert!(err.to_string().contains("TEST_SCANS_DIR"));
}

#[test]
fn test_validation_errors() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();

    let cases = [
        ("[redaction]\nmin_confidence = 101.0\n", "min_confidence"),
        ("[ocr]\npage_seg_mode = 14\n", "page_seg_mode"),
        ("[ocr]\ntimeout_seconds = 0\n", "timeout_seconds"),
        ("[output]\nredacted_format = \"gif\"\n", "redacted_format"),
        ("[input]\nextensions = []\n", "extensions"),
        ("[logging]\nlocal_rotation = \"weekly\"\n", "local_rotation"),
        ("[application]\nlog_level = \"verbose\"\n", "log_level"),
    ];

    for (toml, field) in cases {
        let err = load_config_from_str(toml).unwrap_err();
        assert!(
            err.to_string().contains(field),
            "expected error mentioning {field}, got: {err}"
        );
    }
}

#[test]
fn test_missing_pattern_library() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();

    let err = load_config_from_str("[redaction]\npattern_library = \"missing/rules.toml\"\n")
        .unwrap_err();
    assert!(err.to_string().contains("Pattern library file not found"));
}

#[test]
fn test_missing_config_file() {
    let result = load_config("/nonexistent/medredact.toml");
    assert!(result.is_err());
}
