//! Validate config command implementation
//!
//! This module implements the `validate-config` command for validating
//! the medredact configuration file.

use crate::anonymization::RedactionEngine;
use crate::config::load_config;
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("🔍 Validating configuration file: {config_path}");
        println!();

        // Loading also validates
        let config = match load_config(config_path) {
            Ok(c) => {
                println!("✅ Configuration file loaded successfully");
                c
            }
            Err(e) => {
                println!("❌ Failed to load configuration file");
                println!("   Error: {e}");
                return Ok(2); // Configuration error exit code
            }
        };

        // Compile the pattern rules the way a run would
        if let Err(e) = RedactionEngine::new(config.redaction.clone()) {
            println!("❌ Pattern rules could not be loaded");
            println!("   Error: {e:#}");
            println!();
            return Ok(2);
        }

        println!("✅ Configuration is valid");
        println!();
        println!("Configuration Summary:");
        println!("  Log Level: {}", config.application.log_level);
        println!("  Dry Run: {}", config.application.dry_run);
        println!("  Images Folder: {}", config.input.images_dir.display());
        println!("  Extensions: {:?}", config.input.extensions);
        println!("  Output Folder: {}", config.output.output_dir.display());
        println!("  Redacted Format: {}", config.output.redacted_format);
        println!(
            "  OCR: {} --oem {} --psm {} -l {}",
            config.ocr.command,
            config.ocr.engine_mode,
            config.ocr.page_seg_mode,
            config.ocr.language
        );
        println!("  OCR Timeout: {}s", config.ocr.timeout_seconds);
        println!("  Preprocessing: {}", config.preprocess.enabled);
        println!("  Min Confidence: {}", config.redaction.min_confidence);
        println!(
            "  Pattern Library: {}",
            config
                .redaction
                .pattern_library
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "built-in".to_string())
        );
        println!("  Audit Log: {}", config.redaction.audit.enabled);
        println!();
        Ok(0)
    }
}
