//! Configuration schema types
//!
//! This module defines the configuration structure for medredact. Every
//! section has defaults, so an empty file is a valid configuration.

use crate::anonymization::config::RedactionConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main medredact configuration
///
/// This is the root configuration structure that maps to the TOML file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MedredactConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Where source images are read from
    #[serde(default)]
    pub input: InputConfig,

    /// Where artifacts are written
    #[serde(default)]
    pub output: OutputConfig,

    /// OCR engine settings
    #[serde(default)]
    pub ocr: OcrConfig,

    /// Image preprocessing applied before OCR
    #[serde(default)]
    pub preprocess: PreprocessConfig,

    /// PII detection and redaction settings
    #[serde(default)]
    pub redaction: RedactionConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl MedredactConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.input.validate()?;
        self.output.validate()?;
        self.ocr.validate()?;
        self.preprocess.validate()?;
        self.redaction.validate().map_err(|e| format!("{e:#}"))?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Dry run mode (detect and report only, write no artifacts)
    #[serde(default)]
    pub dry_run: bool,
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            dry_run: false,
        }
    }
}

/// Source image settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    /// Folder scanned for images (not recursive)
    #[serde(default = "default_images_dir")]
    pub images_dir: PathBuf,

    /// Accepted file extensions, matched case-insensitively
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
}

impl InputConfig {
    fn validate(&self) -> Result<(), String> {
        if self.images_dir.as_os_str().is_empty() {
            return Err("input.images_dir cannot be empty".to_string());
        }
        if self.extensions.is_empty() {
            return Err("input.extensions cannot be empty".to_string());
        }
        if let Some(ext) = self.extensions.iter().find(|e| e.trim().is_empty()) {
            return Err(format!("input.extensions contains an empty entry: '{ext}'"));
        }
        Ok(())
    }
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            images_dir: default_images_dir(),
            extensions: default_extensions(),
        }
    }
}

/// Artifact output settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Folder receiving `<name>_text.txt`, `<name>_pii.txt` and `<name>_redacted.<ext>`
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Extension (and so encoding) of the redacted image
    #[serde(default = "default_redacted_format")]
    pub redacted_format: String,

    /// Write `batch_report.json` after each run
    #[serde(default = "default_true")]
    pub write_batch_report: bool,
}

impl OutputConfig {
    fn validate(&self) -> Result<(), String> {
        if self.output_dir.as_os_str().is_empty() {
            return Err("output.output_dir cannot be empty".to_string());
        }

        let valid_formats = ["jpg", "jpeg", "png", "tif", "tiff"];
        if !valid_formats.contains(&self.redacted_format.to_lowercase().as_str()) {
            return Err(format!(
                "Invalid output.redacted_format '{}'. Must be one of: {}",
                self.redacted_format,
                valid_formats.join(", ")
            ));
        }
        Ok(())
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            redacted_format: default_redacted_format(),
            write_batch_report: true,
        }
    }
}

/// Tesseract OCR settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OcrConfig {
    /// Tesseract executable (name on PATH or full path)
    #[serde(default = "default_ocr_command")]
    pub command: String,

    /// OCR engine mode (`--oem`); 3 selects the default engine
    #[serde(default = "default_engine_mode")]
    pub engine_mode: u8,

    /// Page segmentation mode (`--psm`); 6 assumes a single uniform block of text
    #[serde(default = "default_page_seg_mode")]
    pub page_seg_mode: u8,

    /// Recognition language(s), e.g. `eng` or `eng+hin`
    #[serde(default = "default_language")]
    pub language: String,

    /// Upper bound for a single OCR call
    #[serde(default = "default_ocr_timeout_seconds")]
    pub timeout_seconds: u64,

    /// Extra arguments inserted before the `tsv` output config
    #[serde(default)]
    pub extra_args: Vec<String>,
}

impl OcrConfig {
    fn validate(&self) -> Result<(), String> {
        if self.command.trim().is_empty() {
            return Err("ocr.command cannot be empty".to_string());
        }
        if self.engine_mode > 3 {
            return Err(format!(
                "ocr.engine_mode must be between 0 and 3, got {}",
                self.engine_mode
            ));
        }
        if self.page_seg_mode > 13 {
            return Err(format!(
                "ocr.page_seg_mode must be between 0 and 13, got {}",
                self.page_seg_mode
            ));
        }
        if self.language.trim().is_empty() {
            return Err("ocr.language cannot be empty".to_string());
        }
        if self.timeout_seconds == 0 {
            return Err("ocr.timeout_seconds must be > 0".to_string());
        }
        Ok(())
    }
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            command: default_ocr_command(),
            engine_mode: default_engine_mode(),
            page_seg_mode: default_page_seg_mode(),
            language: default_language(),
            timeout_seconds: default_ocr_timeout_seconds(),
            extra_args: Vec::new(),
        }
    }
}

/// OCR input preprocessing settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreprocessConfig {
    /// Apply blur and threshold; grayscale only when disabled
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Gaussian denoise sigma; 0 disables the blur
    #[serde(default = "default_blur_sigma")]
    pub blur_sigma: f32,

    /// Neighborhood size of the adaptive threshold (odd, >= 3)
    #[serde(default = "default_threshold_block_size")]
    pub threshold_block_size: u32,

    /// Constant subtracted from the local mean
    #[serde(default = "default_threshold_offset")]
    pub threshold_offset: i32,
}

impl PreprocessConfig {
    fn validate(&self) -> Result<(), String> {
        if !self.blur_sigma.is_finite() || self.blur_sigma < 0.0 {
            return Err(format!(
                "preprocess.blur_sigma must be >= 0, got {}",
                self.blur_sigma
            ));
        }
        if self.threshold_block_size < 3 || self.threshold_block_size % 2 == 0 {
            return Err(format!(
                "preprocess.threshold_block_size must be an odd number >= 3, got {}",
                self.threshold_block_size
            ));
        }
        Ok(())
    }
}

impl Default for PreprocessConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            blur_sigma: default_blur_sigma(),
            threshold_block_size: default_threshold_block_size(),
            threshold_offset: default_threshold_offset(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable local file logging
    #[serde(default)]
    pub local_enabled: bool,

    /// Local log directory
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Log rotation strategy
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }

        if self.local_enabled && self.local_path.trim().is_empty() {
            return Err(
                "logging.local_path cannot be empty when local logging is enabled".to_string(),
            );
        }

        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
        }
    }
}

// Default value functions
fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_images_dir() -> PathBuf {
    PathBuf::from("images")
}

fn default_extensions() -> Vec<String> {
    vec!["jpg".to_string(), "jpeg".to_string(), "png".to_string()]
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("outputs")
}

fn default_redacted_format() -> String {
    "jpg".to_string()
}

fn default_ocr_command() -> String {
    "tesseract".to_string()
}

fn default_engine_mode() -> u8 {
    3
}

fn default_page_seg_mode() -> u8 {
    6
}

fn default_language() -> String {
    "eng".to_string()
}

fn default_ocr_timeout_seconds() -> u64 {
    120
}

fn default_blur_sigma() -> f32 {
    1.1
}

fn default_threshold_block_size() -> u32 {
    31
}

fn default_threshold_offset() -> i32 {
    15
}

fn default_local_path() -> String {
    "./logs".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}
