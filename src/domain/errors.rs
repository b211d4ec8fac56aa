//! Domain error types
//!
//! This module defines the error hierarchy for medredact.
//! All errors are domain-specific and don't expose third-party types.

use std::time::Duration;
use thiserror::Error;

/// Main medredact error type
///
/// This is the primary error type used throughout the application.
/// It wraps specific error types and provides context for error handling.
#[derive(Debug, Error)]
pub enum RedactError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// OCR collaborator errors
    #[error("OCR error: {0}")]
    Ocr(#[from] OcrError),

    /// Image decoding or encoding errors
    #[error("Image error: {0}")]
    Image(String),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Generic errors with context
    #[error("{0}")]
    Other(String),
}

/// OCR-specific errors
///
/// Errors that occur while invoking the OCR engine or reading its output.
/// Every variant is a per-image failure; none of them aborts a batch.
#[derive(Debug, Error)]
pub enum OcrError {
    /// The OCR process could not be started
    #[error("Failed to start OCR engine '{command}': {message}")]
    Spawn { command: String, message: String },

    /// The OCR call exceeded its time budget
    #[error("OCR timed out after {0:?}")]
    Timeout(Duration),

    /// The OCR process exited unsuccessfully
    #[error("OCR engine exited with status {status}: {stderr}")]
    ExitStatus { status: String, stderr: String },

    /// The OCR output could not be parsed
    #[error("Invalid OCR output: {0}")]
    InvalidOutput(String),

    /// Per-word columns have different lengths
    #[error("OCR columns are misaligned: {0}")]
    MisalignedColumns(String),

    /// The image could not be encoded for the OCR engine
    #[error("Failed to encode image for OCR: {0}")]
    Encode(String),
}

// Conversion from std::io::Error
impl From<std::io::Error> for RedactError {
    fn from(err: std::io::Error) -> Self {
        RedactError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for RedactError {
    fn from(err: serde_json::Error) -> Self {
        RedactError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for RedactError {
    fn from(err: toml::de::Error) -> Self {
        RedactError::Configuration(format!("TOML parse error: {err}"))
    }
}

// Conversion from image crate errors
impl From<image::ImageError> for RedactError {
    fn from(err: image::ImageError) -> Self {
        RedactError::Image(err.to_string())
    }
}
