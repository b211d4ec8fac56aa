//! Init command implementation
//!
//! This module implements the `init` command for generating a sample
//! configuration file.

use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "medredact.toml")]
    pub output: String,

    /// Include every setting with comments
    #[arg(long)]
    pub with_examples: bool,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        println!("📝 Initializing medredact configuration");
        println!();

        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(2); // Configuration error exit code
        }

        let config_content = if self.with_examples {
            Self::generate_config_with_examples()
        } else {
            Self::generate_minimal_config()
        };

        match fs::write(&self.output, config_content) {
            Ok(_) => {
                println!("✅ Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Put the scans to redact in the images folder");
                println!("  2. Make sure tesseract is installed and on PATH");
                println!("  3. Validate configuration: medredact validate-config");
                println!("  4. Preview detections: medredact redact --dry-run");
                println!("  5. Run redaction: medredact redact");
                println!();
                Ok(0)
            }
            Err(e) => {
                println!("❌ Failed to write configuration file");
                println!("   Error: {e}");
                Ok(5) // Fatal error exit code
            }
        }
    }

    /// Generate minimal configuration
    fn generate_minimal_config() -> String {
        r#"# medredact configuration

[application]
log_level = "info"
dry_run = false

[input]
images_dir = "images"
extensions = ["jpg", "jpeg", "png"]

[output]
output_dir = "outputs"
redacted_format = "jpg"

[ocr]
command = "tesseract"
language = "eng"

[redaction]
min_confidence = 40.0
"#
        .to_string()
    }

    /// Generate configuration with every setting documented
    fn generate_config_with_examples() -> String {
        r#"# medredact configuration
# OCR-based PII redaction for scanned medical documents
#
# Every value can be overridden with MEDREDACT_<SECTION>_<KEY>,
# e.g. MEDREDACT_INPUT_IMAGES_DIR or MEDREDACT_REDACTION_MIN_CONFIDENCE.
# Values may reference environment variables with ${VAR_NAME}.

# ============================================================================
# Application Settings
# ============================================================================
[application]
# Log level: trace | debug | info | warn | error
log_level = "info"

# Detect and report PII without writing any files
dry_run = false

# ============================================================================
# Input
# ============================================================================
[input]
# Folder scanned for images (not recursive)
images_dir = "images"

# Accepted extensions, matched case-insensitively
extensions = ["jpg", "jpeg", "png"]

# ============================================================================
# Output
# ============================================================================
[output]
# Folder receiving <name>_text.txt, <name>_pii.txt and <name>_redacted.<ext>
output_dir = "outputs"

# Redacted image format: jpg | jpeg | png | tif | tiff
redacted_format = "jpg"

# Write batch_report.json with per-image results
write_batch_report = true

# ============================================================================
# OCR (Tesseract CLI)
# ============================================================================
[ocr]
command = "tesseract"

# OCR engine mode (--oem), 0-3
engine_mode = 3

# Page segmentation mode (--psm), 0-13; 6 assumes a uniform block of text
page_seg_mode = 6

# Tesseract language(s), e.g. "eng" or "eng+hin"
language = "eng"

# Per-image time limit in seconds
timeout_seconds = 120

# Extra arguments passed to tesseract
extra_args = []

# ============================================================================
# Preprocessing (applied to the OCR input only)
# ============================================================================
[preprocess]
enabled = true

# Gaussian blur sigma before thresholding (0 disables the blur)
blur_sigma = 1.1

# Adaptive threshold neighbourhood, odd and >= 3
threshold_block_size = 31

# Subtracted from the local mean before comparing
threshold_offset = 15

# ============================================================================
# Redaction
# ============================================================================
[redaction]
# Words below this OCR confidence are never redacted (0-100)
min_confidence = 40.0

# Custom pattern rules; the built-in library is used when unset
# pattern_library = "patterns/pii_patterns.toml"

[redaction.audit]
# Record hashed PII values per document as JSON lines
enabled = false
log_path = "./audit/redaction.log"
json_format = true

# ============================================================================
# Logging
# ============================================================================
[logging]
# Also log JSON to a rotating file
local_enabled = false
local_path = "./logs"

# Rotation: daily | hourly | never
local_rotation = "daily"
"#
        .to_string()
    }
}
