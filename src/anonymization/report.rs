//! Report writing for redacted documents
//!
//! [`ReportWriter`] persists the per-document artifacts: the assembled text,
//! the PII listing and the redacted image. [`DetectionReport`] aggregates
//! detection statistics over a run and is what dry-run mode prints instead of
//! writing artifacts.

use crate::anonymization::models::{PiiCategory, PiiFinding, ProcessedDocument};
use crate::domain::{DocumentName, RedactError, Result};
use image::{ImageFormat, RgbImage};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Header line of every `_pii.txt` file
pub const PII_REPORT_HEADER: &str = "Detected PII:";

/// Render a finding in the `_pii.txt` layout: the header line, then one
/// `category: v1, v2` line per category present.
pub fn format_pii_report(finding: &PiiFinding) -> String {
    let mut output = format!("{PII_REPORT_HEADER}\n");
    for (category, values) in finding.iter() {
        output.push_str(&format!("{}: {}\n", category, values.join(", ")));
    }
    output
}

/// Paths written for one document
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArtifactPaths {
    pub text: PathBuf,
    pub pii: PathBuf,
    pub redacted_image: PathBuf,
}

/// Writes `<name>_text.txt`, `<name>_pii.txt` and `<name>_redacted.<ext>`
#[derive(Debug, Clone)]
pub struct ReportWriter {
    output_dir: PathBuf,
    image_extension: String,
    image_format: ImageFormat,
}

impl ReportWriter {
    /// Create a writer for `output_dir`, encoding redacted images by `image_extension`
    pub fn new(output_dir: impl Into<PathBuf>, image_extension: &str) -> Result<Self> {
        let extension = image_extension.trim_start_matches('.').to_lowercase();
        let image_format = ImageFormat::from_extension(&extension).ok_or_else(|| {
            RedactError::Configuration(format!(
                "Unsupported redacted image format: {image_extension}"
            ))
        })?;

        Ok(Self {
            output_dir: output_dir.into(),
            image_extension: extension,
            image_format,
        })
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Paths the artifacts for `name` will be written to
    pub fn paths_for(&self, name: &DocumentName) -> ArtifactPaths {
        ArtifactPaths {
            text: self.output_dir.join(name.artifact("text", "txt")),
            pii: self.output_dir.join(name.artifact("pii", "txt")),
            redacted_image: self
                .output_dir
                .join(name.artifact("redacted", &self.image_extension)),
        }
    }

    /// Create the output directory if it does not exist
    pub fn ensure_output_dir(&self) -> Result<()> {
        fs::create_dir_all(&self.output_dir).map_err(|e| {
            RedactError::Io(format!(
                "Failed to create output directory {}: {}",
                self.output_dir.display(),
                e
            ))
        })
    }

    /// Write all three artifacts for a processed document
    pub fn write(
        &self,
        document: &ProcessedDocument,
        redacted: &RgbImage,
    ) -> Result<ArtifactPaths> {
        self.ensure_output_dir()?;
        let paths = self.paths_for(&document.name);

        fs::write(&paths.text, &document.text).map_err(|e| {
            RedactError::Io(format!("Failed to write {}: {}", paths.text.display(), e))
        })?;

        fs::write(&paths.pii, format_pii_report(&document.finding)).map_err(|e| {
            RedactError::Io(format!("Failed to write {}: {}", paths.pii.display(), e))
        })?;

        redacted
            .save_with_format(&paths.redacted_image, self.image_format)
            .map_err(|e| {
                RedactError::Image(format!(
                    "Failed to write {}: {}",
                    paths.redacted_image.display(),
                    e
                ))
            })?;

        Ok(paths)
    }
}

/// Detection statistics over a set of processed documents
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DetectionReport {
    /// Total documents analyzed
    pub total_documents: usize,

    /// Total PII values detected
    pub total_pii_detected: usize,

    /// PII values by category
    pub detections_by_category: BTreeMap<PiiCategory, usize>,

    /// Word boxes that were (or would be) redacted
    pub total_redacted_regions: usize,

    /// Failed documents and other problems raised during the run
    pub warnings: Vec<String>,

    /// Processing statistics
    pub stats: ProcessingStats,
}

/// Processing statistics
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProcessingStats {
    /// Average processing time per document (ms)
    pub avg_processing_time_ms: u64,

    /// Total processing time (ms)
    pub total_processing_time_ms: u64,

    /// Documents with PII detected
    pub documents_with_pii: usize,

    /// Documents without PII
    pub documents_without_pii: usize,
}

impl DetectionReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add results from a processed document
    pub fn add_document(&mut self, document: &ProcessedDocument) {
        self.total_documents += 1;
        self.total_redacted_regions += document.redacted_regions;
        self.stats.total_processing_time_ms += document.processing_time_ms;

        if document.has_detections() {
            self.stats.documents_with_pii += 1;
            self.total_pii_detected += document.finding.total_values();
            for (category, values) in document.finding.iter() {
                *self.detections_by_category.entry(category).or_insert(0) += values.len();
            }
        } else {
            self.stats.documents_without_pii += 1;
        }

        self.stats.avg_processing_time_ms =
            self.stats.total_processing_time_ms / self.total_documents as u64;
    }

    pub fn add_warning(&mut self, warning: String) {
        self.warnings.push(warning);
    }

    /// Format report for console output
    pub fn format_console(&self) -> String {
        let mut output = String::new();

        output.push('\n');
        output.push_str("═══════════════════════════════════════════════════════════════\n");
        output.push_str("                   PII DETECTION REPORT                        \n");
        output.push_str("═══════════════════════════════════════════════════════════════\n");
        output.push('\n');

        output.push_str("📊 SUMMARY\n");
        output.push_str("───────────────────────────────────────────────────────────────\n");
        output.push_str(&format!(
            "  Total Documents Analyzed:    {}\n",
            self.total_documents
        ));
        output.push_str(&format!(
            "  Documents with PII:          {}\n",
            self.stats.documents_with_pii
        ));
        output.push_str(&format!(
            "  Documents without PII:       {}\n",
            self.stats.documents_without_pii
        ));
        output.push_str(&format!(
            "  Total PII Values Detected:   {}\n",
            self.total_pii_detected
        ));
        output.push_str(&format!(
            "  Word Boxes Redacted:         {}\n",
            self.total_redacted_regions
        ));
        output.push_str(&format!(
            "  Avg Processing Time:         {} ms\n",
            self.stats.avg_processing_time_ms
        ));
        output.push('\n');

        if !self.detections_by_category.is_empty() {
            output.push_str("🔍 PII DETECTIONS BY CATEGORY\n");
            output.push_str("───────────────────────────────────────────────────────────────\n");

            let mut categories: Vec<_> = self.detections_by_category.iter().collect();
            categories.sort_by(|a, b| b.1.cmp(a.1));

            for (category, count) in categories {
                output.push_str(&format!("  {:30} {:>5}\n", category.as_str(), count));
            }
            output.push('\n');
        }

        if !self.warnings.is_empty() {
            output.push_str("⚠️  WARNINGS\n");
            output.push_str("───────────────────────────────────────────────────────────────\n");
            for warning in &self.warnings {
                output.push_str(&format!("  • {warning}\n"));
            }
            output.push('\n');
        }

        output.push_str("═══════════════════════════════════════════════════════════════\n");
        output.push('\n');

        output
    }
}
