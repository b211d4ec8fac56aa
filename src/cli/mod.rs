//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for medredact using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// medredact - OCR-based PII redaction for scanned medical documents
#[derive(Parser, Debug)]
#[command(name = "medredact")]
#[command(version, about, long_about = None)]
#[command(author = "medredact Contributors")]
pub struct Cli {
    /// Path to configuration file
    #[arg(
        short,
        long,
        default_value = commands::redact::DEFAULT_CONFIG_PATH,
        env = "MEDREDACT_CONFIG"
    )]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "MEDREDACT_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// OCR every image in the input folder and write redacted copies
    Redact(commands::redact::RedactArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}
