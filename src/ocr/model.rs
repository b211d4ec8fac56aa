//! OCR result model
//!
//! [`OcrData`] mirrors what an OCR engine hands back: parallel per-word
//! columns indexed positionally. [`OcrData::into_words`] normalizes those
//! columns into [`WordRecord`]s, the read-only representation the redaction
//! core works with.

use crate::domain::OcrError;
use serde::{Deserialize, Serialize};

/// Confidence assigned to words whose score is missing or not a number.
///
/// Lower than any acceptance threshold, so such words are never redacted.
pub const UNKNOWN_CONFIDENCE: f32 = -1.0;

/// Axis-aligned word box in image pixel coordinates, top-left origin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BoundingBox {
    pub left: i32,
    pub top: i32,
    pub width: u32,
    pub height: u32,
}

impl BoundingBox {
    pub fn new(left: i32, top: i32, width: u32, height: u32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// True when the box covers no pixels
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// One OCR-recognized word
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordRecord {
    /// Recognized text; empty or whitespace when nothing was read at this position
    pub text: String,
    /// Engine confidence (0-100), or [`UNKNOWN_CONFIDENCE`]
    pub confidence: f32,
    pub bounding_box: BoundingBox,
}

impl WordRecord {
    /// A non-finite `confidence` is stored as [`UNKNOWN_CONFIDENCE`]
    pub fn new(text: impl Into<String>, confidence: f32, bounding_box: BoundingBox) -> Self {
        Self {
            text: text.into(),
            confidence: if confidence.is_finite() {
                confidence
            } else {
                UNKNOWN_CONFIDENCE
            },
            bounding_box,
        }
    }

    /// True when the trimmed text is empty
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// Parse a raw confidence value.
///
/// Anything that is not a finite number maps to [`UNKNOWN_CONFIDENCE`].
pub fn parse_confidence(raw: &str) -> f32 {
    match raw.trim().parse::<f32>() {
        Ok(value) if value.is_finite() => value,
        _ => UNKNOWN_CONFIDENCE,
    }
}

/// Word-level OCR output as parallel columns
///
/// Index `i` in every column describes the same word. Confidence stays a raw
/// string because engines emit sentinels for undefined scores.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OcrData {
    pub text: Vec<String>,
    pub conf: Vec<String>,
    pub left: Vec<i32>,
    pub top: Vec<i32>,
    pub width: Vec<u32>,
    pub height: Vec<u32>,
}

impl OcrData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one word to every column
    pub fn push(&mut self, text: impl Into<String>, conf: impl Into<String>, bbox: BoundingBox) {
        self.text.push(text.into());
        self.conf.push(conf.into());
        self.left.push(bbox.left);
        self.top.push(bbox.top);
        self.width.push(bbox.width);
        self.height.push(bbox.height);
    }

    /// Number of entries in the text column
    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Normalize the columns into word records, preserving reading order.
    ///
    /// # Errors
    ///
    /// Returns [`OcrError::MisalignedColumns`] if the columns differ in length.
    pub fn into_words(self) -> Result<Vec<WordRecord>, OcrError> {
        let expected = self.text.len();
        let lengths = [
            ("conf", self.conf.len()),
            ("left", self.left.len()),
            ("top", self.top.len()),
            ("width", self.width.len()),
            ("height", self.height.len()),
        ];
        if let Some((column, len)) = lengths.iter().find(|(_, len)| *len != expected) {
            return Err(OcrError::MisalignedColumns(format!(
                "text has {expected} entries but {column} has {len}"
            )));
        }

        let words = self
            .text
            .into_iter()
            .zip(self.conf)
            .zip(self.left)
            .zip(self.top)
            .zip(self.width)
            .zip(self.height)
            .map(|(((((text, conf), left), top), width), height)| {
                WordRecord::new(
                    text,
                    parse_confidence(&conf),
                    BoundingBox::new(left, top, width, height),
                )
            })
            .collect();

        Ok(words)
    }
}
