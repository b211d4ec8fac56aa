// medredact - OCR-based PII redaction for scanned medical documents
// Copyright (c) 2025 medredact Contributors
// Licensed under the MIT License

//! # medredact - OCR-based PII redaction
//!
//! medredact reads scanned medical documents, recognizes their words with
//! Tesseract, finds patient identifiers in the recognized text and blacks out
//! the word boxes that carry them.
//!
//! ## Overview
//!
//! For every image in the input folder the library:
//! - **Recognizes** words with their boxes and confidences
//! - **Detects** PII (names, IPD/UHID numbers, age, sex, dates, long numbers,
//!   phone numbers) with ordered pattern rules over the assembled text
//! - **Redacts** every sufficiently confident word whose normalized text is a
//!   token of a detected value
//! - **Writes** the text, a PII listing and the redacted image
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Batch orchestration over the input folder
//! - [`anonymization`] - Detection, tokenization, redaction and reports
//! - [`ocr`] - OCR engine seam, Tesseract driver and preprocessing
//! - [`domain`] - Core domain types and errors
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use medredact::config::load_config;
//! use medredact::core::batch::BatchCoordinator;
//! use medredact::ocr::TesseractCli;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = load_config("medredact.toml")?;
//!     let ocr = Arc::new(TesseractCli::new(config.ocr.clone()));
//!     let (_tx, shutdown) = tokio::sync::watch::channel(false);
//!
//!     let coordinator = BatchCoordinator::new(config, ocr, shutdown)?;
//!     let summary = coordinator.execute().await?;
//!
//!     println!("Redacted {} images", summary.processed);
//!     Ok(())
//! }
//! ```
//!
//! ## Redacting Without a Batch
//!
//! The pipeline after OCR is synchronous and works on any word list:
//!
//! ```rust,no_run
//! use medredact::anonymization::{config::RedactionConfig, RedactionEngine};
//! use medredact::domain::DocumentName;
//! use medredact::ocr::{BoundingBox, WordRecord};
//!
//! # fn example() -> anyhow::Result<()> {
//! let engine = RedactionEngine::new(RedactionConfig::default())?;
//! let image = image::RgbImage::new(400, 60);
//! let words = vec![
//!     WordRecord::new("UHID", 93.0, BoundingBox::new(10, 10, 50, 20)),
//!     WordRecord::new("No:", 91.0, BoundingBox::new(70, 10, 30, 20)),
//!     WordRecord::new("A12345", 88.0, BoundingBox::new(110, 10, 80, 20)),
//! ];
//!
//! let name = DocumentName::new("scan_001").map_err(anyhow::Error::msg)?;
//! let outcome = engine.redact_document(name, &image, &words);
//! assert_eq!(outcome.document.redacted_regions, 1);
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! Library entry points return [`domain::RedactError`]. Per-image failures
//! inside a batch are collected in the summary instead of aborting the run.
//!
//! ## Logging
//!
//! medredact uses structured logging with the `tracing` crate. Detected PII
//! values are never written to logs; the optional audit trail stores SHA-256
//! hashes only.

pub mod anonymization;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
pub mod ocr;
