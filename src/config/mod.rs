//! Configuration management for medredact.
//!
//! This module provides TOML-based configuration loading, parsing, and validation.
//!
//! # Overview
//!
//! medredact uses TOML configuration files with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - `MEDREDACT_<SECTION>_<KEY>` environment overrides
//! - Default values for every setting
//! - Validation on load
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use medredact::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("medredact.toml")?;
//!
//! println!("Images: {}", config.input.images_dir.display());
//! println!("Outputs: {}", config.output.output_dir.display());
//! println!("Min confidence: {}", config.redaction.min_confidence);
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration Structure
//!
//! - [`ApplicationConfig`] - Log level and dry-run switch
//! - [`InputConfig`] - Source folder and accepted extensions
//! - [`OutputConfig`] - Artifact folder, redacted image format, batch report
//! - [`OcrConfig`] - Tesseract command, modes, language, timeout
//! - [`PreprocessConfig`] - Blur and adaptive threshold parameters
//! - [`RedactionConfig`] - Confidence threshold, pattern library, audit trail
//! - [`LoggingConfig`] - Local file logging
//!
//! # Example Configuration
//!
//! ```toml
//! [input]
//! images_dir = "${SCAN_DROP}/incoming"
//!
//! [output]
//! output_dir = "outputs"
//! redacted_format = "png"
//!
//! [ocr]
//! language = "eng"
//! timeout_seconds = 60
//!
//! [redaction]
//! min_confidence = 40.0
//!
//! [redaction.audit]
//! enabled = true
//! log_path = "./audit/redaction.log"
//! ```

pub mod loader;
pub mod schema;

// Re-export commonly used types
pub use crate::anonymization::config::{AuditConfig, RedactionConfig};
pub use loader::{load_config, load_config_from_str};
pub use schema::{
    ApplicationConfig, InputConfig, LoggingConfig, MedredactConfig, OcrConfig, OutputConfig,
    PreprocessConfig,
};
