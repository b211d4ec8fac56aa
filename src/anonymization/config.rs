//! Redaction configuration

use crate::anonymization::redactor::DEFAULT_MIN_CONFIDENCE;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Redaction settings (`[redaction]` section)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedactionConfig {
    /// Minimum OCR confidence (0-100) a word needs to be redacted
    #[serde(default = "default_min_confidence")]
    pub min_confidence: f32,

    /// Path to a custom pattern library TOML file; the built-in rules otherwise
    #[serde(default)]
    pub pattern_library: Option<PathBuf>,

    /// Audit logging configuration
    #[serde(default)]
    pub audit: AuditConfig,
}

fn default_min_confidence() -> f32 {
    DEFAULT_MIN_CONFIDENCE
}

impl Default for RedactionConfig {
    fn default() -> Self {
        Self {
            min_confidence: default_min_confidence(),
            pattern_library: None,
            audit: AuditConfig::default(),
        }
    }
}

impl RedactionConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=100.0).contains(&self.min_confidence) {
            anyhow::bail!(
                "redaction.min_confidence must be between 0 and 100, got {}",
                self.min_confidence
            );
        }

        if let Some(ref path) = self.pattern_library {
            if !path.exists() {
                anyhow::bail!("Pattern library file not found: {}", path.display());
            }
            if path.extension().and_then(|s| s.to_str()) != Some("toml") {
                anyhow::bail!("Pattern library must be a TOML file: {}", path.display());
            }
        }

        self.audit.validate().context("Invalid audit configuration")?;

        Ok(())
    }

    /// Apply environment variable overrides
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(val) = std::env::var("MEDREDACT_REDACTION_MIN_CONFIDENCE") {
            self.min_confidence = val
                .parse()
                .context("Invalid MEDREDACT_REDACTION_MIN_CONFIDENCE value")?;
        }

        if let Ok(val) = std::env::var("MEDREDACT_REDACTION_PATTERN_LIBRARY") {
            self.pattern_library = Some(PathBuf::from(val));
        }

        self.audit.apply_env_overrides()?;

        Ok(())
    }
}

/// Audit logging configuration (`[redaction.audit]` section)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditConfig {
    /// Enable audit logging
    #[serde(default)]
    pub enabled: bool,

    /// Audit log file path
    #[serde(default = "default_audit_log_path")]
    pub log_path: PathBuf,

    /// Write entries as JSON lines; a short text line per entry otherwise
    #[serde(default = "default_audit_json_format")]
    pub json_format: bool,
}

fn default_audit_log_path() -> PathBuf {
    PathBuf::from("./audit/redaction.log")
}

fn default_audit_json_format() -> bool {
    true
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            log_path: default_audit_log_path(),
            json_format: default_audit_json_format(),
        }
    }
}

impl AuditConfig {
    /// Validate audit configuration
    pub fn validate(&self) -> Result<()> {
        if self.enabled && self.log_path.as_os_str().is_empty() {
            anyhow::bail!("redaction.audit.log_path cannot be empty when audit is enabled");
        }
        Ok(())
    }

    /// Apply environment variable overrides
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(val) = std::env::var("MEDREDACT_REDACTION_AUDIT_ENABLED") {
            self.enabled = val
                .parse()
                .context("Invalid MEDREDACT_REDACTION_AUDIT_ENABLED value")?;
        }

        if let Ok(val) = std::env::var("MEDREDACT_REDACTION_AUDIT_LOG_PATH") {
            self.log_path = PathBuf::from(val);
        }

        if let Ok(val) = std::env::var("MEDREDACT_REDACTION_AUDIT_JSON_FORMAT") {
            self.json_format = val
                .parse()
                .context("Invalid MEDREDACT_REDACTION_AUDIT_JSON_FORMAT value")?;
        }

        Ok(())
    }
}
