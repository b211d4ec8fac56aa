//! OCR collaborator
//!
//! The redaction core never calls an OCR engine directly; it consumes the
//! engine's output as an [`OcrData`] value. This module holds that model, the
//! [`OcrEngine`] seam, a Tesseract implementation driven through its CLI, a
//! mock engine for tests, and the image preprocessing applied before OCR.

pub mod mock;
pub mod model;
pub mod preprocess;
pub mod tesseract;

use crate::domain::OcrError;
use async_trait::async_trait;
use image::GrayImage;

pub use mock::MockOcrEngine;
pub use model::{parse_confidence, BoundingBox, OcrData, WordRecord, UNKNOWN_CONFIDENCE};
pub use tesseract::TesseractCli;

/// Word-level OCR engine
///
/// Implementations receive the preprocessed image and return one entry per
/// detected word in a stable reading order.
#[async_trait]
pub trait OcrEngine: Send + Sync {
    /// Recognize words and their boxes in `image`
    async fn recognize(&self, image: &GrayImage) -> Result<OcrData, OcrError>;

    /// Short engine name for logs
    fn name(&self) -> &str;
}
