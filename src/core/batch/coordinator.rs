//! Batch coordinator - main orchestrator for a redaction run
//!
//! This module drives every image of the input folder through decoding,
//! preprocessing, OCR, redaction and artifact writing. A failing image is
//! recorded in the summary and the batch moves on to the next one.

use crate::anonymization::models::ProcessedDocument;
use crate::anonymization::report::ReportWriter;
use crate::anonymization::RedactionEngine;
use crate::config::MedredactConfig;
use crate::core::batch::discovery::discover_images;
use crate::core::batch::summary::{BatchError, BatchErrorType, BatchSummary, DocumentSummary};
use crate::domain::{DocumentName, RedactError, Result, RunId};
use crate::ocr::preprocess::preprocess;
use crate::ocr::OcrEngine;
use crate::{log_batch_progress, log_document_complete, log_document_start};
use image::{GrayImage, RgbImage};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::watch;

/// Batch coordinator
pub struct BatchCoordinator {
    config: MedredactConfig,
    engine: RedactionEngine,
    ocr: Arc<dyn OcrEngine>,
    writer: ReportWriter,
    run_id: RunId,
    shutdown_signal: watch::Receiver<bool>,
}

impl BatchCoordinator {
    /// Create a new batch coordinator
    ///
    /// The audit trail is only opened outside dry-run mode.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the redaction engine or the report
    /// writer cannot be built from `config`.
    pub fn new(
        config: MedredactConfig,
        ocr: Arc<dyn OcrEngine>,
        shutdown_signal: watch::Receiver<bool>,
    ) -> Result<Self> {
        let run_id = RunId::generate();

        let engine = if config.application.dry_run {
            RedactionEngine::new(config.redaction.clone())
        } else {
            RedactionEngine::with_audit(config.redaction.clone(), run_id)
        }
        .map_err(|e| RedactError::Configuration(format!("{e:#}")))?;

        let writer = ReportWriter::new(&config.output.output_dir, &config.output.redacted_format)?;

        tracing::debug!(
            run_id = %run_id,
            ocr_engine = ocr.name(),
            dry_run = config.application.dry_run,
            audited = engine.is_audited(),
            "Batch coordinator created"
        );

        Ok(Self {
            config,
            engine,
            ocr,
            writer,
            run_id,
            shutdown_signal,
        })
    }

    pub fn run_id(&self) -> &RunId {
        &self.run_id
    }

    /// List the images this run would process
    pub fn discover(&self) -> Result<Vec<PathBuf>> {
        discover_images(&self.config.input.images_dir, &self.config.input.extensions)
    }

    /// Process every discovered image in order
    ///
    /// Stops before the next image once the shutdown signal is raised and
    /// marks the summary as interrupted.
    ///
    /// # Errors
    ///
    /// Only batch-level failures are returned, such as a missing images
    /// folder. Per-image failures are recorded in the summary.
    pub async fn execute(&self) -> Result<BatchSummary> {
        let start = Instant::now();
        let dry_run = self.config.application.dry_run;
        let mut summary = BatchSummary::new(self.run_id, dry_run);

        let images = self.discover()?;
        summary.total_images = images.len();

        tracing::info!(
            run_id = %self.run_id,
            images_dir = %self.config.input.images_dir.display(),
            output_dir = %self.config.output.output_dir.display(),
            total_images = images.len(),
            dry_run,
            "Starting redaction batch"
        );

        if images.is_empty() {
            tracing::warn!("No images found in the input folder");
        }

        let mut seen = HashSet::new();
        for (index, path) in images.iter().enumerate() {
            if *self.shutdown_signal.borrow() {
                tracing::warn!(
                    remaining = images.len() - index,
                    "Shutdown requested, stopping before next image"
                );
                summary.interrupted = true;
                break;
            }

            log_batch_progress!(index + 1, images.len());

            if let Ok(name) = DocumentName::from_path(path) {
                if !seen.insert(name.clone()) {
                    tracing::warn!(
                        document = %name,
                        path = %path.display(),
                        "Another image shares this file stem, its artifacts will be overwritten"
                    );
                    summary.detection_report.add_warning(format!(
                        "{name}: artifacts overwritten by {}",
                        path.display()
                    ));
                }
            }

            match self.process_image(path).await {
                Ok((document, processed)) => summary.add_document(document, &processed),
                Err(error) => {
                    tracing::error!(
                        path = %path.display(),
                        error_type = ?error.error_type,
                        error = %error.message,
                        "Failed to process image"
                    );
                    summary.add_error(error);
                }
            }
        }

        summary.duration = start.elapsed();

        if !dry_run && self.config.output.write_batch_report {
            self.write_batch_report(&summary);
        }

        summary.log_summary();
        Ok(summary)
    }

    /// Run one image through the whole pipeline
    async fn process_image(
        &self,
        path: &Path,
    ) -> std::result::Result<(DocumentSummary, ProcessedDocument), BatchError> {
        let start = Instant::now();

        let name = DocumentName::from_path(path)
            .map_err(|e| BatchError::new(BatchErrorType::Input, e).with_source(path))?;
        let fail = |error_type: BatchErrorType, message: String| {
            BatchError::new(error_type, message)
                .with_source(path)
                .with_document(name.as_str())
        };

        log_document_start!(name, path.display());

        let (original, prepared) = self
            .load_image(path)
            .await
            .map_err(|e| fail(BatchErrorType::Decode, e.to_string()))?;

        let words = self
            .ocr
            .recognize(&prepared)
            .await
            .and_then(|data| data.into_words())
            .map_err(|e| fail(BatchErrorType::Ocr, e.to_string()))?;

        let outcome = self.engine.redact_document(name.clone(), &original, &words);

        let artifacts = if self.config.application.dry_run {
            None
        } else {
            let paths = self
                .writer
                .write(&outcome.document, &outcome.redaction.image)
                .map_err(|e| fail(BatchErrorType::Output, e.to_string()))?;
            self.engine
                .audit(&outcome.document)
                .map_err(|e| fail(BatchErrorType::Redaction, format!("{e:#}")))?;
            Some(paths)
        };

        let document = &outcome.document;
        log_document_complete!(
            name,
            document.finding.total_values(),
            document.redacted_regions,
            start.elapsed()
        );

        let summary = DocumentSummary {
            categories: document.finding.categories().collect(),
            pii_values: document.finding.total_values(),
            word_count: document.word_count,
            redacted_regions: document.redacted_regions,
            processing_time_ms: start.elapsed().as_millis() as u64,
            name,
            source: path.to_path_buf(),
            artifacts,
        };
        Ok((summary, outcome.document))
    }

    /// Decode `path` and derive the OCR input off the async runtime
    async fn load_image(&self, path: &Path) -> Result<(RgbImage, GrayImage)> {
        let path = path.to_path_buf();
        let preprocess_config = self.config.preprocess.clone();

        tokio::task::spawn_blocking(move || {
            let decoded = image::open(&path).map_err(|e| {
                RedactError::Image(format!("Failed to read image {}: {}", path.display(), e))
            })?;
            let prepared = preprocess(&decoded, &preprocess_config);
            Ok((decoded.to_rgb8(), prepared))
        })
        .await
        .map_err(|e| RedactError::Other(format!("Image task failed: {e}")))?
    }

    fn write_batch_report(&self, summary: &BatchSummary) {
        if let Err(e) = self.writer.ensure_output_dir() {
            tracing::warn!(error = %e, "Skipping batch report");
            return;
        }
        match summary.write_report(self.writer.output_dir()) {
            Ok(path) => tracing::info!(path = %path.display(), "Batch report written"),
            Err(e) => tracing::warn!(error = %e, "Failed to write batch report"),
        }
    }
}
