//! Core orchestration for medredact.
//!
//! # Modules
//!
//! - [`batch`] - Image discovery, per-image processing and batch summaries
//!
//! # Batch Workflow
//!
//! 1. **Discover**: List images in the input folder, sorted by path
//! 2. **Decode & Preprocess**: Load the image and binarize a copy for OCR
//! 3. **OCR**: Recognize words with their boxes and confidences
//! 4. **Redact**: Detect PII in the assembled text and fill matching word boxes
//! 5. **Write**: Save the text, the PII listing and the redacted image
//! 6. **Report**: Summarize the run
//!
//! # Example
//!
//! ```rust,no_run
//! use medredact::config::load_config;
//! use medredact::core::batch::BatchCoordinator;
//! use medredact::ocr::TesseractCli;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("medredact.toml")?;
//! let ocr = Arc::new(TesseractCli::new(config.ocr.clone()));
//!
//! let (_shutdown_tx, shutdown_rx) = tokio::sync::watch::channel(false);
//! let coordinator = BatchCoordinator::new(config, ocr, shutdown_rx)?;
//!
//! let summary = coordinator.execute().await?;
//! println!("Processed: {}", summary.processed);
//! println!("Failed: {}", summary.failed);
//! # Ok(())
//! # }
//! ```

pub mod batch;
