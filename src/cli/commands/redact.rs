//! Redact command implementation
//!
//! This module implements the `redact` command, which runs OCR over every
//! image in the input folder, detects PII and writes redacted copies.

use crate::config::{load_config, load_config_from_str, MedredactConfig};
use crate::core::batch::{BatchCoordinator, BatchSummary};
use crate::domain::{RedactError, Result};
use crate::log_error_with_context;
use crate::ocr::{OcrEngine, TesseractCli};
use clap::Args;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::watch;

/// Configuration file used when `--config` is not given
pub const DEFAULT_CONFIG_PATH: &str = "medredact.toml";

/// Arguments for the redact command
#[derive(Args, Debug, Default)]
pub struct RedactArgs {
    /// Skip confirmation prompt
    #[arg(short, long)]
    pub yes: bool,

    /// Dry run mode - detect and report PII without writing any files
    #[arg(long)]
    pub dry_run: bool,

    /// Override the folder scanned for images
    #[arg(short, long, value_name = "DIR")]
    pub input: Option<PathBuf>,

    /// Override the folder artifacts are written to
    #[arg(short, long, value_name = "DIR")]
    pub output: Option<PathBuf>,

    /// Override the minimum OCR confidence a word needs to be redacted
    #[arg(long, value_name = "CONF")]
    pub min_confidence: Option<f32>,
}

impl RedactArgs {
    /// Execute the redact command
    pub async fn execute(
        &self,
        config_path: &str,
        shutdown_signal: watch::Receiver<bool>,
    ) -> anyhow::Result<i32> {
        tracing::info!("Starting redact command");

        let mut config = match load_or_default(config_path) {
            Ok(c) => c,
            Err(e) => {
                tracing::error!(error = %e, "Failed to load configuration");
                eprintln!("Failed to load configuration: {e}");
                return Ok(2);
            }
        };

        self.apply_overrides(&mut config);

        if let Err(e) = config.validate() {
            tracing::error!(error = %e, "Configuration validation failed");
            eprintln!("Configuration validation failed: {e}");
            return Ok(2); // Configuration error exit code
        }

        let dry_run = config.application.dry_run;
        if dry_run {
            tracing::info!("Dry run mode enabled - no files will be written");
            println!("🔍 DRY RUN MODE - PII will be detected and reported, nothing is written");
            println!();
        }

        // Confirmation prompt (unless --yes or dry-run)
        if !self.yes && !dry_run {
            println!("Redaction Configuration:");
            println!("  Images: {}", config.input.images_dir.display());
            println!("  Outputs: {}", config.output.output_dir.display());
            println!("  Min confidence: {}", config.redaction.min_confidence);
            println!("  OCR: {} (lang {})", config.ocr.command, config.ocr.language);
            println!();
            print!("Proceed with redaction? [y/N]: ");
            use std::io::{self, Write};
            io::stdout().flush()?;

            let mut input = String::new();
            io::stdin().read_line(&mut input)?;

            if !input.trim().eq_ignore_ascii_case("y") {
                println!("Redaction cancelled.");
                return Ok(0);
            }
        }

        let ocr: Arc<dyn OcrEngine> = Arc::new(TesseractCli::new(config.ocr.clone()));

        tracing::info!("Creating batch coordinator");
        let coordinator = match BatchCoordinator::new(config, ocr, shutdown_signal) {
            Ok(c) => c,
            Err(e) => {
                tracing::error!(error = %e, "Failed to create batch coordinator");
                eprintln!("Failed to initialize redaction: {e}");
                return Ok(2);
            }
        };

        println!("🚀 Starting redaction...");
        println!();

        let summary = match coordinator.execute().await {
            Ok(s) => s,
            Err(RedactError::Configuration(message)) => {
                tracing::error!(error = %message, "Redaction could not start");
                eprintln!("{message}");
                return Ok(2);
            }
            Err(e) => {
                log_error_with_context!(e, "Redaction failed");
                eprintln!("Redaction failed: {e}");
                return Ok(5); // Fatal error exit code
            }
        };

        print_summary(&summary);

        Ok(exit_code(&summary))
    }

    /// Apply command-line overrides on top of file and environment settings
    pub fn apply_overrides(&self, config: &mut MedredactConfig) {
        if let Some(input) = &self.input {
            tracing::info!(images_dir = %input.display(), "Overriding images folder from CLI");
            config.input.images_dir = input.clone();
        }

        if let Some(output) = &self.output {
            tracing::info!(output_dir = %output.display(), "Overriding output folder from CLI");
            config.output.output_dir = output.clone();
        }

        if let Some(min_confidence) = self.min_confidence {
            tracing::info!(min_confidence, "Overriding minimum confidence from CLI");
            config.redaction.min_confidence = min_confidence;
        }

        if self.dry_run {
            tracing::info!("Enabling dry-run mode from CLI");
            config.application.dry_run = true;
        }
    }
}

/// Load `config_path`, or built-in defaults when the default file is absent
fn load_or_default(config_path: &str) -> Result<MedredactConfig> {
    if config_path == DEFAULT_CONFIG_PATH && !Path::new(config_path).exists() {
        tracing::info!("No configuration file found, using defaults");
        return load_config_from_str("");
    }
    load_config(config_path)
}

fn print_summary(summary: &BatchSummary) {
    if summary.dry_run {
        print!("{}", summary.detection_report.format_console());
    }

    println!();
    println!("📊 Redaction Summary:");
    println!("  Total Images: {}", summary.total_images);
    println!("  Processed: {}", summary.processed);
    println!("  Failed: {}", summary.failed);
    println!(
        "  PII Values Detected: {}",
        summary.detection_report.total_pii_detected
    );
    println!(
        "  Word Boxes Redacted: {}",
        summary.detection_report.total_redacted_regions
    );
    println!("  Duration: {:.2}s", summary.duration.as_secs_f64());
    println!("  Success Rate: {:.2}%", summary.success_rate());
    println!();

    if !summary.errors.is_empty() {
        println!("⚠️  Errors encountered:");
        for error in &summary.errors {
            println!("  - {error}");
        }
        println!();
    }

    if summary.interrupted {
        println!("⚠️  Redaction interrupted. Images already written are complete.");
        println!();
    } else if summary.is_successful() {
        println!("✅ Redaction completed successfully!");
    } else {
        println!("⚠️  Redaction completed with failures");
    }
}

/// Map a finished batch to the process exit code
pub fn exit_code(summary: &BatchSummary) -> i32 {
    if summary.interrupted {
        130 // SIGINT exit code (standard Unix convention)
    } else if summary.is_successful() {
        0
    } else {
        1 // Partial success
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::batch::{BatchError, BatchErrorType};
    use crate::domain::RunId;

    #[test]
    fn test_redact_args_defaults() {
        let args = RedactArgs::default();

        assert!(!args.yes);
        assert!(!args.dry_run);
        assert!(args.input.is_none());
        assert!(args.output.is_none());
        assert!(args.min_confidence.is_none());
    }

    #[test]
    fn test_apply_overrides() {
        let args = RedactArgs {
            yes: true,
            dry_run: true,
            input: Some(PathBuf::from("scans")),
            output: Some(PathBuf::from("redacted")),
            min_confidence: Some(60.0),
        };
        let mut config = MedredactConfig::default();
        args.apply_overrides(&mut config);

        assert!(config.application.dry_run);
        assert_eq!(config.input.images_dir, PathBuf::from("scans"));
        assert_eq!(config.output.output_dir, PathBuf::from("redacted"));
        assert_eq!(config.redaction.min_confidence, 60.0);
    }

    #[test]
    fn test_overrides_keep_config_values() {
        let mut config = MedredactConfig::default();
        config.input.images_dir = PathBuf::from("from_file");
        RedactArgs::default().apply_overrides(&mut config);

        assert_eq!(config.input.images_dir, PathBuf::from("from_file"));
        assert!(!config.application.dry_run);
    }

    #[test]
    fn test_exit_codes() {
        let mut summary = BatchSummary::new(RunId::generate(), false);
        assert_eq!(exit_code(&summary), 0);

        summary.add_error(BatchError::new(BatchErrorType::Ocr, "timed out"));
        assert_eq!(exit_code(&summary), 1);

        summary.interrupted = true;
        assert_eq!(exit_code(&summary), 130);
    }

    #[test]
    fn test_load_explicit_missing_config_fails() {
        assert!(load_or_default("does-not-exist.toml").is_err());
    }
}
