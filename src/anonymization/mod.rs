//! PII detection and image redaction
//!
//! This module turns the words an OCR engine read from a scanned document
//! into a redacted copy of that document.
//!
//! # Architecture
//!
//! The pipeline consists of:
//! - **Assembly**: Word texts joined into searchable document text
//! - **Detection**: Ordered regex rules producing a per-category finding
//! - **Tokenization**: Findings broken into lower-cased word tokens
//! - **Redaction**: Matching word boxes filled on the original image
//! - **Reporting**: Text, PII listing and redacted image written per document
//! - **Audit**: Structured logging with hashed PII values
//!
//! # Usage
//!
//! ```rust,ignore
//! use medredact::anonymization::{RedactionEngine, config::RedactionConfig};
//!
//! let engine = RedactionEngine::new(RedactionConfig::default())?;
//! let outcome = engine.redact_document(name, &image, &words);
//! ```

pub mod assembler;
pub mod audit;
pub mod config;
pub mod detector;
pub mod engine;
pub mod models;
pub mod redactor;
pub mod report;
pub mod tokens;

// Re-export main types
pub use config::RedactionConfig;
pub use engine::{RedactionEngine, RedactionOutcome};
pub use models::{PiiCategory, PiiFinding, ProcessedDocument};
pub use redactor::{Redaction, Redactor};
pub use report::{DetectionReport, ReportWriter};
pub use tokens::TokenSet;
