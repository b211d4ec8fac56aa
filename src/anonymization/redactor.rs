//! Word-box redaction
//!
//! Maps detected PII back onto image geometry. Each OCR word is tested on its
//! own against the [`TokenSet`]; qualifying words have their bounding box
//! filled solid black on a copy of the original image. Matching is per word,
//! not per phrase, so an unrelated word spelled like a PII token is redacted
//! too.

use crate::anonymization::tokens::{normalize_word, TokenSet};
use crate::ocr::{BoundingBox, WordRecord};
use image::{Rgb, RgbImage};
use imageproc::drawing::draw_filled_rect_mut;
use imageproc::rect::Rect;

/// Confidence a word must reach to be redacted unless configured otherwise
pub const DEFAULT_MIN_CONFIDENCE: f32 = 40.0;

const FILL: Rgb<u8> = Rgb([0, 0, 0]);

/// Redacted copy of an image and the boxes that were filled
#[derive(Debug, Clone)]
pub struct Redaction {
    pub image: RgbImage,
    pub regions: Vec<BoundingBox>,
}

impl Redaction {
    pub fn region_count(&self) -> usize {
        self.regions.len()
    }
}

/// Fills qualifying word boxes
#[derive(Debug, Clone, Copy)]
pub struct Redactor {
    min_confidence: f32,
}

impl Default for Redactor {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_CONFIDENCE)
    }
}

impl Redactor {
    pub fn new(min_confidence: f32) -> Self {
        Self { min_confidence }
    }

    pub fn min_confidence(&self) -> f32 {
        self.min_confidence
    }

    /// Whether `word` should be redacted.
    ///
    /// The word must be non-blank and carry a finite confidence at or above
    /// the threshold. Its normalized text must be a non-empty member of
    /// `tokens`.
    pub fn qualifies(&self, word: &WordRecord, tokens: &TokenSet) -> bool {
        if word.is_blank() || !meets_threshold(word.confidence, self.min_confidence) {
            return false;
        }
        let normalized = normalize_word(&word.text);
        !normalized.is_empty() && tokens.contains(&normalized)
    }

    /// Produce a redacted copy of `original`. Inputs are left untouched.
    pub fn redact(
        &self,
        original: &RgbImage,
        words: &[WordRecord],
        tokens: &TokenSet,
    ) -> Redaction {
        let mut image = original.clone();
        let mut regions = Vec::new();

        if tokens.is_empty() {
            return Redaction { image, regions };
        }

        for word in words.iter().filter(|w| self.qualifies(w, tokens)) {
            if let Some(rect) = clip(&word.bounding_box, image.width(), image.height()) {
                draw_filled_rect_mut(&mut image, rect, FILL);
                regions.push(word.bounding_box);
            }
        }

        Redaction { image, regions }
    }
}

/// NaN and infinite scores never pass, whatever the threshold
fn meets_threshold(confidence: f32, min_confidence: f32) -> bool {
    confidence.is_finite() && confidence >= min_confidence
}

/// Intersect a word box with the image bounds; `None` when nothing is left
fn clip(bbox: &BoundingBox, image_width: u32, image_height: u32) -> Option<Rect> {
    if bbox.is_empty() {
        return None;
    }

    let x0 = i64::from(bbox.left).max(0);
    let y0 = i64::from(bbox.top).max(0);
    let x1 = (i64::from(bbox.left) + i64::from(bbox.width)).min(i64::from(image_width));
    let y1 = (i64::from(bbox.top) + i64::from(bbox.height)).min(i64::from(image_height));

    if x1 <= x0 || y1 <= y0 {
        return None;
    }

    // Bounded by the image dimensions, so the casts cannot truncate
    Some(Rect::at(x0 as i32, y0 as i32).of_size((x1 - x0) as u32, (y1 - y0) as u32))
}
