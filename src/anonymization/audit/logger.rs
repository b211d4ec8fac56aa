//! Audit logger for redaction runs

use crate::anonymization::config::AuditConfig;
use crate::anonymization::models::{PiiCategory, ProcessedDocument};
use crate::domain::RunId;
use anyhow::{Context, Result};
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

/// Audit log entry, one per processed document
#[derive(Debug, Serialize)]
struct AuditLogEntry {
    timestamp: String,
    run_id: String,
    document: String,
    detections_count: usize,
    redacted_regions: usize,
    processing_time_ms: u64,
    detections: Vec<AuditDetection>,
}

/// Audit detection entry (with hashed PII)
#[derive(Debug, Serialize)]
struct AuditDetection {
    category: PiiCategory,
    /// SHA-256 hash of each matched value (never log plaintext PII)
    value_hashes: Vec<String>,
}

/// Append-only audit trail of redacted documents
pub struct AuditLogger {
    log_path: PathBuf,
    json_format: bool,
    enabled: bool,
    run_id: RunId,
}

impl AuditLogger {
    /// Create a new audit logger
    pub fn new(log_path: PathBuf, json_format: bool, enabled: bool, run_id: RunId) -> Result<Self> {
        if enabled {
            if let Some(parent) = log_path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create audit log directory: {}", parent.display())
                })?;
            }
        }

        Ok(Self {
            log_path,
            json_format,
            enabled,
            run_id,
        })
    }

    /// Create an audit logger from configuration
    pub fn from_config(config: &AuditConfig, run_id: RunId) -> Result<Self> {
        Self::new(config.log_path.clone(), config.json_format, config.enabled, run_id)
    }

    /// Record one processed document
    pub fn log_document(&self, document: &ProcessedDocument) -> Result<()> {
        if !self.enabled {
            return Ok(());
        }

        let entry = AuditLogEntry {
            timestamp: document.timestamp.to_rfc3339(),
            run_id: self.run_id.to_string(),
            document: document.name.to_string(),
            detections_count: document.finding.total_values(),
            redacted_regions: document.redacted_regions,
            processing_time_ms: document.processing_time_ms,
            detections: document
                .finding
                .iter()
                .map(|(category, values)| AuditDetection {
                    category,
                    value_hashes: values.iter().map(|v| hash_pii_value(v)).collect(),
                })
                .collect(),
        };

        self.write_entry(&entry)
    }

    /// Write an audit entry to the log file
    fn write_entry(&self, entry: &AuditLogEntry) -> Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)
            .with_context(|| format!("Failed to open audit log: {}", self.log_path.display()))?;

        if self.json_format {
            let json_line =
                serde_json::to_string(entry).context("Failed to serialize audit entry")?;
            writeln!(file, "{json_line}").context("Failed to write audit entry")?;
        } else {
            writeln!(
                file,
                "[{}] Run: {} | Document: {} | Detections: {} | Regions: {} | Time: {}ms",
                entry.timestamp,
                entry.run_id,
                entry.document,
                entry.detections_count,
                entry.redacted_regions,
                entry.processing_time_ms
            )
            .context("Failed to write audit entry")?;
        }

        Ok(())
    }
}

/// Hash a PII value using SHA-256
fn hash_pii_value(value: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(value.as_bytes());
    let result = hasher.finalize();
    format!("{result:x}")
}
