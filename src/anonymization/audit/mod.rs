//! Audit logging module
//!
//! Provides a structured audit trail of redacted documents with hashed PII values.

pub mod logger;

pub use logger::AuditLogger;

