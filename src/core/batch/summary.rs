//! Batch summary and reporting
//!
//! This module defines structures for tracking and reporting batch results.

use crate::anonymization::models::{PiiCategory, ProcessedDocument};
use crate::anonymization::report::{ArtifactPaths, DetectionReport};
use crate::domain::{DocumentName, RunId};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// File name of the batch report written into the output directory
pub const BATCH_REPORT_FILE: &str = "batch_report.json";

/// Per-document entry of a batch summary
#[derive(Debug, Clone, Serialize)]
pub struct DocumentSummary {
    /// Document name (source file stem)
    pub name: DocumentName,

    /// Source image
    pub source: PathBuf,

    /// Categories detected, in rule order
    pub categories: Vec<PiiCategory>,

    /// Number of PII values detected
    pub pii_values: usize,

    /// Number of OCR word records
    pub word_count: usize,

    /// Word boxes filled on the redacted image
    pub redacted_regions: usize,

    /// Processing time in milliseconds
    pub processing_time_ms: u64,

    /// Written artifacts; absent in dry-run mode
    #[serde(skip_serializing_if = "Option::is_none")]
    pub artifacts: Option<ArtifactPaths>,
}

/// Summary of a batch run
#[derive(Debug, Clone, Serialize)]
pub struct BatchSummary {
    /// Run identifier, also stamped on audit entries
    pub run_id: RunId,

    /// When the run started
    pub started_at: DateTime<Utc>,

    /// Dry-run mode (nothing written)
    pub dry_run: bool,

    /// Images found in the input folder
    pub total_images: usize,

    /// Images processed successfully
    pub processed: usize,

    /// Images that failed
    pub failed: usize,

    /// Whether the run was interrupted by a shutdown signal
    pub interrupted: bool,

    /// Duration of the run
    #[serde(rename = "duration_ms", serialize_with = "serialize_duration_ms")]
    pub duration: Duration,

    /// Per-document results
    pub documents: Vec<DocumentSummary>,

    /// Errors encountered during the run
    pub errors: Vec<BatchError>,

    /// Aggregate detection statistics
    pub detection_report: DetectionReport,
}

fn serialize_duration_ms<S: serde::Serializer>(
    duration: &Duration,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_u64(duration.as_millis() as u64)
}

impl BatchSummary {
    /// Create a new empty batch summary
    pub fn new(run_id: RunId, dry_run: bool) -> Self {
        Self {
            run_id,
            started_at: Utc::now(),
            dry_run,
            total_images: 0,
            processed: 0,
            failed: 0,
            interrupted: false,
            duration: Duration::from_secs(0),
            documents: Vec::new(),
            errors: Vec::new(),
            detection_report: DetectionReport::new(),
        }
    }

    /// Record a successfully processed document
    pub fn add_document(&mut self, document: DocumentSummary, processed: &ProcessedDocument) {
        self.processed += 1;
        self.detection_report.add_document(processed);
        self.documents.push(document);
    }

    /// Record a failed document
    pub fn add_error(&mut self, error: BatchError) {
        self.failed += 1;
        self.detection_report.add_warning(error.to_string());
        self.errors.push(error);
    }

    /// Check if the batch was successful (no failures)
    pub fn is_successful(&self) -> bool {
        self.failed == 0 && self.errors.is_empty()
    }

    /// Get success rate as a percentage
    pub fn success_rate(&self) -> f64 {
        let attempted = self.processed + self.failed;
        if attempted == 0 {
            return 100.0;
        }
        (self.processed as f64 / attempted as f64) * 100.0
    }

    /// Write the summary as pretty JSON to `output_dir/batch_report.json`
    pub fn write_report(&self, output_dir: &Path) -> std::io::Result<PathBuf> {
        let path = output_dir.join(BATCH_REPORT_FILE);
        let json = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;
        std::fs::write(&path, json)?;
        Ok(path)
    }

    /// Log the summary
    pub fn log_summary(&self) {
        tracing::info!(
            run_id = %self.run_id,
            total_images = self.total_images,
            processed = self.processed,
            failed = self.failed,
            interrupted = self.interrupted,
            dry_run = self.dry_run,
            duration_secs = self.duration.as_secs(),
            success_rate = format!("{:.2}%", self.success_rate()),
            "Batch completed"
        );

        if !self.errors.is_empty() {
            tracing::warn!(error_count = self.errors.len(), "Batch completed with errors");
            for error in &self.errors {
                tracing::warn!(
                    error_type = ?error.error_type,
                    document = error.document.as_deref().unwrap_or("-"),
                    message = %error.message,
                    "Batch error"
                );
            }
        }
    }
}

/// Pipeline stage at which a document failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BatchErrorType {
    /// The file name could not be turned into a document name
    Input,
    /// The image could not be read or decoded
    Decode,
    /// The OCR engine failed, timed out or returned malformed data
    Ocr,
    /// Detection or redaction failed (audit logging)
    Redaction,
    /// Artifacts could not be written
    Output,
}

/// Batch error with context
#[derive(Debug, Clone, Serialize)]
pub struct BatchError {
    /// Type of error
    pub error_type: BatchErrorType,

    /// Error message
    pub message: String,

    /// Document name, when known
    pub document: Option<String>,

    /// Source image
    pub source: Option<PathBuf>,
}

impl BatchError {
    /// Create a new batch error
    pub fn new(error_type: BatchErrorType, message: impl Into<String>) -> Self {
        Self {
            error_type,
            message: message.into(),
            document: None,
            source: None,
        }
    }

    /// Attach the source image path
    pub fn with_source(mut self, source: &Path) -> Self {
        self.source = Some(source.to_path_buf());
        self
    }

    /// Attach the document name
    pub fn with_document(mut self, document: impl Into<String>) -> Self {
        self.document = Some(document.into());
        self
    }
}

impl std::fmt::Display for BatchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let subject = match (&self.document, &self.source) {
            (Some(document), _) => document.clone(),
            (None, Some(source)) => source.display().to_string(),
            (None, None) => "batch".to_string(),
        };
        write!(f, "{subject}: {:?} error: {}", self.error_type, self.message)
    }
}
