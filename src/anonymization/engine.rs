//! Main redaction engine
//!
//! This module provides the [`RedactionEngine`] that runs the synchronous
//! part of the pipeline for one document once OCR has produced its words.
//!
//! # Architecture
//!
//! The engine coordinates four steps over two independent derivations that
//! only meet at the per-word test:
//! - **Assembly**: word texts joined into the document text
//! - **Detection**: pattern rules over that text produce a [`PiiFinding`]
//! - **Tokenization**: the finding is broken into a [`TokenSet`]
//! - **Redaction**: word boxes whose text is in the token set are filled
//!
//! Audit logging is optional and records hashed values only.
//!
//! # Examples
//!
//! ```no_run
//! use medredact::anonymization::{config::RedactionConfig, RedactionEngine};
//! use medredact::domain::DocumentName;
//! use medredact::ocr::{BoundingBox, WordRecord};
//! use image::RgbImage;
//!
//! # fn example() -> anyhow::Result<()> {
//! let engine = RedactionEngine::new(RedactionConfig::default())?;
//! let image = RgbImage::new(200, 50);
//! let words = vec![
//!     WordRecord::new("Age:", 91.0, BoundingBox::new(10, 10, 40, 20)),
//!     WordRecord::new("34", 88.0, BoundingBox::new(60, 10, 20, 20)),
//! ];
//!
//! let name = DocumentName::new("scan_001").map_err(anyhow::Error::msg)?;
//! let outcome = engine.redact_document(name, &image, &words);
//! println!("{} boxes redacted", outcome.document.redacted_regions);
//! # Ok(())
//! # }
//! ```
//!
//! [`PiiFinding`]: crate::anonymization::models::PiiFinding
//! [`TokenSet`]: crate::anonymization::tokens::TokenSet

use crate::anonymization::{
    assembler::assemble_text,
    audit::AuditLogger,
    config::RedactionConfig,
    detector::{patterns::PatternRegistry, regex::RegexDetector, PiiDetector},
    models::ProcessedDocument,
    redactor::{Redaction, Redactor},
    tokens::extract_tokens,
};
use crate::domain::{DocumentName, RunId};
use crate::ocr::WordRecord;
use anyhow::{Context, Result};
use image::RgbImage;
use std::sync::Arc;
use std::time::Instant;

/// Result of redacting one document
#[derive(Debug, Clone)]
pub struct RedactionOutcome {
    /// Text, finding and counts for the document
    pub document: ProcessedDocument,
    /// Copy of the source image with PII boxes filled
    pub redaction: Redaction,
}

/// Main redaction engine
///
/// # Thread Safety
///
/// The detector is shared behind `Arc<dyn PiiDetector>` and the redactor is
/// `Copy`; the engine holds no per-document state.
pub struct RedactionEngine {
    config: RedactionConfig,
    detector: Arc<dyn PiiDetector>,
    redactor: Redactor,
    audit_logger: Option<AuditLogger>,
}

impl RedactionEngine {
    /// Create a new redaction engine without an audit trail
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Configuration validation fails
    /// - The pattern library file cannot be loaded or compiled
    pub fn new(config: RedactionConfig) -> Result<Self> {
        config.validate().context("Invalid redaction configuration")?;

        let detector: Arc<dyn PiiDetector> = if let Some(ref pattern_path) = config.pattern_library
        {
            let registry = PatternRegistry::from_file(pattern_path)?;
            Arc::new(RegexDetector::with_registry(registry))
        } else {
            Arc::new(RegexDetector::new()?)
        };

        Ok(Self {
            redactor: Redactor::new(config.min_confidence),
            config,
            detector,
            audit_logger: None,
        })
    }

    /// Create an engine that audits every document under `run_id` when
    /// `config.audit.enabled` is set
    pub fn with_audit(config: RedactionConfig, run_id: RunId) -> Result<Self> {
        let mut engine = Self::new(config)?;
        if engine.config.audit.enabled {
            engine.audit_logger = Some(AuditLogger::from_config(&engine.config.audit, run_id)?);
        }
        Ok(engine)
    }

    /// Create an engine around a custom detector
    pub fn with_detector(config: RedactionConfig, detector: Arc<dyn PiiDetector>) -> Result<Self> {
        config.validate().context("Invalid redaction configuration")?;
        Ok(Self {
            redactor: Redactor::new(config.min_confidence),
            config,
            detector,
            audit_logger: None,
        })
    }

    /// Run assembly, detection, tokenization and redaction for one document.
    ///
    /// `original` is never modified. An empty finding yields a
    /// pixel-identical copy. Nothing is audited here; call
    /// [`RedactionEngine::audit`] once the redacted artifacts are persisted.
    pub fn redact_document(
        &self,
        name: DocumentName,
        original: &RgbImage,
        words: &[WordRecord],
    ) -> RedactionOutcome {
        let start = Instant::now();

        let text = assemble_text(words);
        let finding = self.detector.detect(&text);
        let tokens = extract_tokens(&finding);
        let redaction = self.redactor.redact(original, words, &tokens);

        tracing::debug!(
            document = %name,
            words = words.len(),
            categories = finding.len(),
            tokens = tokens.len(),
            regions = redaction.region_count(),
            "Document redacted"
        );

        let document = ProcessedDocument::new(
            name,
            text,
            finding,
            words.len(),
            redaction.region_count(),
            start.elapsed().as_millis() as u64,
        );

        RedactionOutcome {
            document,
            redaction,
        }
    }

    /// Append `document` to the audit trail, if one is configured
    ///
    /// # Errors
    ///
    /// Returns an error if the audit log cannot be written.
    pub fn audit(&self, document: &ProcessedDocument) -> Result<()> {
        match self.audit_logger {
            Some(ref logger) => logger
                .log_document(document)
                .with_context(|| format!("Failed to audit document {}", document.name)),
            None => Ok(()),
        }
    }

    pub fn config(&self) -> &RedactionConfig {
        &self.config
    }

    /// Check if audit logging is active
    pub fn is_audited(&self) -> bool {
        self.audit_logger.is_some()
    }
}
