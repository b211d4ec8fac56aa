//! PII detection module
//!
//! Provides the trait-based detection interface and the regex implementation
//! that turns assembled document text into a [`PiiFinding`].

pub mod patterns;
pub mod regex;

use crate::anonymization::models::PiiFinding;

/// Trait for PII detection implementations
pub trait PiiDetector: Send + Sync {
    /// Detect PII in the assembled text of one document.
    ///
    /// Absence of a pattern is not an error; it just leaves that category out.
    fn detect(&self, text: &str) -> PiiFinding;
}
