//! Data models for PII detection results

pub mod pii_finding;

pub use pii_finding::{CollectionMode, PiiCategory, PiiFinding, ProcessedDocument};
