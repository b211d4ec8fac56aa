//! Integration tests for the per-document redaction pipeline
//!
//! These drive OCR output through assembly, detection, tokenization and
//! redaction using the public API only.

use image::{Rgb, RgbImage};
use medredact::anonymization::config::RedactionConfig;
use medredact::anonymization::models::PiiCategory;
use medredact::anonymization::report::format_pii_report;
use medredact::anonymization::RedactionEngine;
use medredact::domain::DocumentName;
use medredact::ocr::{BoundingBox, OcrData, WordRecord};

const WHITE: Rgb<u8> = Rgb([255, 255, 255]);
const BLACK: Rgb<u8> = Rgb([0, 0, 0]);

fn engine() -> RedactionEngine {
    RedactionEngine::new(RedactionConfig::default()).unwrap()
}

fn page() -> RgbImage {
    RgbImage::from_pixel(400, 100, WHITE)
}

fn name() -> DocumentName {
    DocumentName::new("scan_001").unwrap()
}

/// Lay out `(text, conf)` pairs left to right, 10px per character
fn words(entries: &[(&str, &str)]) -> Vec<WordRecord> {
    let mut data = OcrData::new();
    let mut left = 10;
    for (text, conf) in entries {
        let width = (text.chars().count() as u32).max(1) * 10;
        data.push(*text, *conf, BoundingBox::new(left, 20, width, 20));
        left += width as i32 + 10;
    }
    data.into_words().unwrap()
}

fn is_filled(image: &RgbImage, bbox: &BoundingBox) -> bool {
    let (x0, y0) = (bbox.left as u32, bbox.top as u32);
    (y0..y0 + bbox.height).all(|y| (x0..x0 + bbox.width).all(|x| *image.get_pixel(x, y) == BLACK))
}

#[test]
fn test_patient_name_redacted_above_threshold_only() {
    let words = words(&[
        ("Patient", "90"),
        ("Name:", "90"),
        ("John", "55"),
        ("Doe", "10"),
    ]);

    let outcome = engine().redact_document(name(), &page(), &words);
    let document = &outcome.document;

    assert_eq!(document.text, "Patient Name: John Doe");
    assert_eq!(
        document.finding.get(PiiCategory::PatientName),
        Some(&["John Doe".to_string()][..])
    );

    // "John" clears the threshold, "Doe" does not
    assert_eq!(outcome.redaction.regions, vec![words[2].bounding_box]);
    assert!(is_filled(&outcome.redaction.image, &words[2].bounding_box));
    assert!(!is_filled(&outcome.redaction.image, &words[3].bounding_box));
}

#[test]
fn test_age_and_sex() {
    let words = words(&[("Age:", "91"), ("34", "88"), ("Sex:", "90"), ("M", "77")]);

    let outcome = engine().redact_document(name(), &page(), &words);
    let finding = &outcome.document.finding;

    assert_eq!(finding.get(PiiCategory::Age), Some(&["34".to_string()][..]));
    assert_eq!(finding.get(PiiCategory::Sex), Some(&["M".to_string()][..]));
    assert_eq!(outcome.document.redacted_regions, 2);
    assert!(is_filled(&outcome.redaction.image, &words[1].bounding_box));
    assert!(is_filled(&outcome.redaction.image, &words[3].bounding_box));
    assert!(!is_filled(&outcome.redaction.image, &words[0].bounding_box));
}

#[test]
fn test_dates_are_deduplicated() {
    let words = words(&[
        ("11/11/25", "90"),
        ("and", "90"),
        ("10-4-2025", "90"),
        ("then", "90"),
        ("11/11/25", "90"),
    ]);

    let outcome = engine().redact_document(name(), &page(), &words);

    assert_eq!(
        outcome.document.finding.get(PiiCategory::Dates),
        Some(&["11/11/25".to_string(), "10-4-2025".to_string()][..])
    );
}

#[test]
fn test_no_pii_leaves_image_identical() {
    let words = words(&[("Discharge", "95"), ("summary", "95"), ("follows", "95")]);
    let original = page();

    let outcome = engine().redact_document(name(), &original, &words);

    assert!(outcome.document.finding.is_empty());
    assert_eq!(outcome.document.redacted_regions, 0);
    assert_eq!(outcome.redaction.image, original);
    assert_eq!(format_pii_report(&outcome.document.finding), "Detected PII:\n");
}

#[test]
fn test_blank_words_are_skipped() {
    let mut data = OcrData::new();
    data.push("Age:", "90", BoundingBox::new(10, 20, 40, 20));
    data.push("", "95", BoundingBox::new(60, 20, 20, 20));
    data.push("34", "90", BoundingBox::new(90, 20, 20, 20));
    let words = data.into_words().unwrap();

    let outcome = engine().redact_document(name(), &page(), &words);

    assert_eq!(outcome.document.text, "Age: 34");
    assert_eq!(outcome.redaction.regions, vec![words[2].bounding_box]);
}

#[test]
fn test_unknown_confidence_is_never_redacted() {
    let words = words(&[("Age:", "90"), ("34", "-1"), ("34", "n/a")]);

    let outcome = engine().redact_document(name(), &page(), &words);

    assert_eq!(outcome.document.finding.total_values(), 1);
    assert_eq!(outcome.document.redacted_regions, 0);
}

#[test]
fn test_token_matching_is_per_word() {
    // "34" is an age token; the unrelated "34" later on the page goes too
    let words = words(&[
        ("Age:", "90"),
        ("34", "90"),
        ("Bed", "90"),
        ("34,", "90"),
    ]);

    let outcome = engine().redact_document(name(), &page(), &words);

    assert_eq!(outcome.document.redacted_regions, 2);
    assert!(is_filled(&outcome.redaction.image, &words[3].bounding_box));
}

#[test]
fn test_box_outside_image_is_clipped() {
    let mut data = OcrData::new();
    data.push("Age:", "90", BoundingBox::new(10, 20, 40, 20));
    data.push("34", "90", BoundingBox::new(390, 90, 40, 40));
    data.push("34", "90", BoundingBox::new(500, 500, 20, 20));
    let words = data.into_words().unwrap();

    let outcome = engine().redact_document(name(), &page(), &words);
    let image = &outcome.redaction.image;

    // Only the partially visible box is filled
    assert_eq!(outcome.document.redacted_regions, 1);
    assert_eq!(*image.get_pixel(395, 95), BLACK);
    assert_eq!(*image.get_pixel(389, 95), WHITE);
}

#[test]
fn test_pii_report_layout() {
    let words = words(&[
        ("UHID", "90"),
        ("No:", "90"),
        ("A12345", "90"),
        ("Age:", "90"),
        ("34", "90"),
    ]);

    let outcome = engine().redact_document(name(), &page(), &words);

    assert_eq!(
        format_pii_report(&outcome.document.finding),
        "Detected PII:\nuhid: A12345\nage: 34\n"
    );
}

#[test]
fn test_custom_min_confidence() {
    let config = RedactionConfig {
        min_confidence: 80.0,
        ..RedactionConfig::default()
    };
    let engine = RedactionEngine::new(config).unwrap();
    let words = words(&[("Age:", "90"), ("34", "79")]);

    let outcome = engine.redact_document(name(), &page(), &words);
    assert_eq!(outcome.document.redacted_regions, 0);
}
