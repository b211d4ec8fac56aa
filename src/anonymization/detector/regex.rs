//! Regex-based PII detector

use super::{patterns::PatternRegistry, PiiDetector};
use crate::anonymization::models::PiiFinding;
use anyhow::Result;
use std::sync::Arc;

/// Regex-based PII detector
///
/// Rules are independent: each one runs over the full text and a substring
/// may be claimed by several categories.
pub struct RegexDetector {
    pattern_registry: Arc<PatternRegistry>,
}

impl RegexDetector {
    /// Create a new regex detector with default patterns
    pub fn new() -> Result<Self> {
        let registry = PatternRegistry::default_patterns()?;
        Ok(Self::with_registry(registry))
    }

    /// Create a new regex detector with custom pattern registry
    pub fn with_registry(registry: PatternRegistry) -> Self {
        Self {
            pattern_registry: Arc::new(registry),
        }
    }
}

impl PiiDetector for RegexDetector {
    fn detect(&self, text: &str) -> PiiFinding {
        let mut finding = PiiFinding::new();

        for pattern in self.pattern_registry.all_patterns() {
            for value in pattern.extract(text) {
                finding.record(pattern.category, pattern.mode, value);
            }
        }

        finding
    }
}
