//! Text assembly from OCR words

use crate::ocr::WordRecord;

/// Join the text of every non-blank word with a single space, in reading order.
///
/// Blankness is judged on the trimmed text but the word is emitted as
/// recognized.
pub fn assemble_text(words: &[WordRecord]) -> String {
    words
        .iter()
        .filter(|w| !w.is_blank())
        .map(|w| w.text.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}
