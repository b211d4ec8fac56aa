//! Mock OCR engine for testing without Tesseract

use super::model::{BoundingBox, OcrData};
use super::OcrEngine;
use crate::domain::OcrError;
use async_trait::async_trait;
use image::GrayImage;

/// Horizontal advance per character used by [`MockOcrEngine::from_line`]
const CHAR_WIDTH: u32 = 10;
/// Gap between words laid out by [`MockOcrEngine::from_line`]
const WORD_GAP: u32 = 10;
/// Height of every word box laid out by [`MockOcrEngine::from_line`]
const LINE_HEIGHT: u32 = 20;

/// Returns canned OCR data, or a canned failure
pub struct MockOcrEngine {
    data: OcrData,
    failure: Option<String>,
}

impl MockOcrEngine {
    /// Engine that always returns `data`
    pub fn new(data: OcrData) -> Self {
        Self {
            data,
            failure: None,
        }
    }

    /// Engine that lays out the whitespace-separated words of `text` on a
    /// single line starting at (`CHAR_WIDTH`, `LINE_HEIGHT`), all with the same
    /// confidence
    pub fn from_line(text: &str, confidence: &str) -> Self {
        let mut data = OcrData::new();
        let mut left = CHAR_WIDTH;
        for word in text.split_whitespace() {
            let width = word.chars().count() as u32 * CHAR_WIDTH;
            data.push(
                word,
                confidence,
                BoundingBox::new(left as i32, LINE_HEIGHT as i32, width, LINE_HEIGHT),
            );
            left += width + WORD_GAP;
        }
        Self::new(data)
    }

    /// Engine whose every call fails with `message`
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            data: OcrData::new(),
            failure: Some(message.into()),
        }
    }
}

#[async_trait]
impl OcrEngine for MockOcrEngine {
    async fn recognize(&self, _image: &GrayImage) -> Result<OcrData, OcrError> {
        match &self.failure {
            Some(message) => Err(OcrError::ExitStatus {
                status: "exit status: 1".to_string(),
                stderr: message.clone(),
            }),
            None => Ok(self.data.clone()),
        }
    }

    fn name(&self) -> &str {
        "mock"
    }
}
