//! Token extraction from detected PII
//!
//! A PII value such as `"John Doe"` or `"2025/1187"` rarely lines up with a
//! single OCR word. Values are therefore broken into lower-cased runs of word
//! characters, and OCR words are normalized the same way before the
//! membership test in the redactor.

use crate::anonymization::models::PiiFinding;
use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

static WORD_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\w+").expect("word run regex is valid"));

static NON_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\W+").expect("non-word regex is valid"));

/// Lower-cased word-character runs taken from every detected PII value
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenSet(HashSet<String>);

impl TokenSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, token: &str) -> bool {
        self.0.contains(token)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl FromIterator<String> for TokenSet {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Build the token set for a finding.
///
/// Every value of every category is split on non-word characters and each
/// run is lower-cased. Category membership is discarded.
pub fn extract_tokens(finding: &PiiFinding) -> TokenSet {
    finding
        .values()
        .flat_map(|value| WORD_RUN.find_iter(value))
        .map(|run| run.as_str().to_lowercase())
        .collect()
}

/// Normalize one OCR word for comparison against a [`TokenSet`]:
/// non-word characters removed, then lower-cased.
pub fn normalize_word(text: &str) -> String {
    NON_WORD.replace_all(text, "").to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::anonymization::models::{CollectionMode, PiiCategory};

    fn finding(entries: &[(PiiCategory, &[&str])]) -> PiiFinding {
        let mut finding = PiiFinding::new();
        for (category, values) in entries {
            for value in *values {
                finding.record(*category, CollectionMode::Ordered, value.to_string());
            }
        }
        finding
    }

    fn sorted(tokens: &TokenSet) -> Vec<&str> {
        let mut all: Vec<_> = tokens.iter().collect();
        all.sort_unstable();
        all
    }

    #[test]
    fn test_name_and_age_tokens() {
        let tokens = extract_tokens(&finding(&[
            (PiiCategory::PatientName, &["John Doe"]),
            (PiiCategory::Age, &["34"]),
        ]));
        assert_eq!(sorted(&tokens), vec!["34", "doe", "john"]);
    }

    #[test]
    fn test_identifier_split_on_slash() {
        let tokens = extract_tokens(&finding(&[(PiiCategory::IpdNo, &["2025/1187"])]));
        assert_eq!(sorted(&tokens), vec!["1187", "2025"]);
    }

    #[test]
    fn test_dates_split_on_separators() {
        let tokens = extract_tokens(&finding(&[(PiiCategory::Dates, &["11/11/25", "10-4-2025"])]));
        assert_eq!(sorted(&tokens), vec!["10", "11", "2025", "25", "4"]);
    }

    #[test]
    fn test_empty_finding_yields_empty_set() {
        let tokens = extract_tokens(&PiiFinding::new());
        assert!(tokens.is_empty());
        assert_eq!(tokens.len(), 0);
    }

    #[test]
    fn test_extraction_is_idempotent() {
        let source = finding(&[
            (PiiCategory::PatientName, &["Asha  Rao"]),
            (PiiCategory::Phone, &["9876543210"]),
        ]);
        assert_eq!(extract_tokens(&source), extract_tokens(&source));
    }

    #[test]
    fn test_blank_value_contributes_nothing() {
        let tokens = extract_tokens(&finding(&[(PiiCategory::PatientName, &[""])]));
        assert!(tokens.is_empty());
    }

    #[test]
    fn test_normalize_word() {
        assert_eq!(normalize_word("Doe,"), "doe");
        assert_eq!(normalize_word("(John)"), "john");
        assert_eq!(normalize_word("2025/1187"), "20251187");
        assert_eq!(normalize_word("Name:"), "name");
        assert_eq!(normalize_word("--"), "");
        assert_eq!(normalize_word("under_score"), "under_score");
    }

    #[test]
    fn test_normalize_keeps_unicode_letters() {
        assert_eq!(normalize_word("Ölçer."), "ölçer");
    }
}
