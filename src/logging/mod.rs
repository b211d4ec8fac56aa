//! Logging and observability
//!
//! This module provides structured logging with support for:
//! - Configurable log levels, overridable through `RUST_LOG`
//! - Local JSON file logging with rotation
//! - Helper macros for the per-document events of a batch
//!
//! PII values are never logged; counts and categories are.
//!
//! # Example
//!
//! ```no_run
//! use medredact::logging::init_logging;
//! use medredact::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!("Application started");
//! ```

pub mod structured;

// Re-export commonly used items
pub use structured::{init_logging, LoggingGuard};

/// Log the start of processing for one document
///
/// # Example
///
/// ```no_run
/// use medredact::log_document_start;
/// use std::path::Path;
///
/// log_document_start!("scan_001", Path::new("images/scan_001.jpg").display());
/// ```
#[macro_export]
macro_rules! log_document_start {
    ($name:expr, $path:expr) => {
        tracing::info!(
            document = %$name,
            path = %$path,
            "Processing document"
        );
    };
}

/// Log the completion of one document
///
/// # Example
///
/// ```no_run
/// use medredact::log_document_complete;
/// use std::time::Duration;
///
/// log_document_complete!("scan_001", 3, 7, Duration::from_millis(840));
/// ```
#[macro_export]
macro_rules! log_document_complete {
    ($name:expr, $pii_values:expr, $regions:expr, $duration:expr) => {
        tracing::info!(
            document = %$name,
            pii_values = $pii_values,
            redacted_regions = $regions,
            duration_ms = $duration.as_millis(),
            "Document completed"
        );
    };
}

/// Log an error with context
///
/// # Example
///
/// ```no_run
/// use medredact::log_error_with_context;
/// use medredact::domain::RedactError;
///
/// let error = RedactError::Configuration("Invalid config".to_string());
/// log_error_with_context!(&error, "Failed to load configuration");
/// ```
#[macro_export]
macro_rules! log_error_with_context {
    ($error:expr, $context:expr) => {
        tracing::error!(
            error = %$error,
            context = $context,
            "Error occurred"
        );
    };
}

/// Log batch progress
///
/// # Example
///
/// ```no_run
/// use medredact::log_batch_progress;
///
/// log_batch_progress!(3, 12);
/// ```
#[macro_export]
macro_rules! log_batch_progress {
    ($current:expr, $total:expr) => {
        tracing::debug!(
            current = $current,
            total = $total,
            progress_pct = ($current as f64 / $total as f64 * 100.0),
            "Batch progress"
        );
    };
}
