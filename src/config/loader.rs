//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::MedredactConfig;
use crate::domain::errors::RedactError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::LazyLock;

static ENV_PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}").expect("placeholder regex is valid")
});

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into MedredactConfig
/// 4. Applies environment variable overrides (MEDREDACT_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns an error if:
/// - File cannot be read
/// - TOML parsing fails
/// - A referenced environment variable is not set
/// - Configuration validation fails
///
/// # Examples
///
/// ```no_run
/// use medredact::config::loader::load_config;
///
/// let config = load_config("medredact.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<MedredactConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(RedactError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        RedactError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    load_config_from_str(&contents)
}

/// Loads configuration from TOML text, with the same substitution,
/// overrides and validation as [`load_config`]
pub fn load_config_from_str(contents: &str) -> Result<MedredactConfig> {
    let contents = substitute_env_vars(contents)?;

    let mut config: MedredactConfig = toml::from_str(&contents)
        .map_err(|e| RedactError::Configuration(format!("Failed to parse TOML: {e}")))?;

    apply_env_overrides(&mut config)?;

    config.validate().map_err(|e| {
        RedactError::Configuration(format!("Configuration validation failed: {e}"))
    })?;

    Ok(config)
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are left untouched.
///
/// # Errors
///
/// Returns an error if a referenced environment variable is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let mut result = String::new();
    let mut missing_vars = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in ENV_PLACEHOLDER.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    let placeholder = format!("${{{var_name}}}");
                    processed_line = processed_line.replace(&placeholder, &value);
                }
                Err(_) => {
                    if !missing_vars.contains(&var_name.to_string()) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        result.push_str(&processed_line);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(RedactError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

/// Parse an override value, naming the variable on failure
fn parse_env<T: FromStr>(name: &str, value: &str) -> Result<T> {
    value.trim().parse().map_err(|_| {
        RedactError::Configuration(format!("Invalid value for {name}: '{value}'"))
    })
}

/// Applies environment variable overrides using MEDREDACT_* prefix
///
/// Environment variables follow the pattern: MEDREDACT_<SECTION>_<KEY>
/// For example: MEDREDACT_INPUT_IMAGES_DIR, MEDREDACT_OCR_TIMEOUT_SECONDS
fn apply_env_overrides(config: &mut MedredactConfig) -> Result<()> {
    // Application overrides
    if let Ok(val) = std::env::var("MEDREDACT_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }
    if let Ok(val) = std::env::var("MEDREDACT_APPLICATION_DRY_RUN") {
        config.application.dry_run = parse_env("MEDREDACT_APPLICATION_DRY_RUN", &val)?;
    }

    // Input overrides
    if let Ok(val) = std::env::var("MEDREDACT_INPUT_IMAGES_DIR") {
        config.input.images_dir = PathBuf::from(val);
    }
    if let Ok(val) = std::env::var("MEDREDACT_INPUT_EXTENSIONS") {
        config.input.extensions = val.split(',').map(|s| s.trim().to_string()).collect();
    }

    // Output overrides
    if let Ok(val) = std::env::var("MEDREDACT_OUTPUT_OUTPUT_DIR") {
        config.output.output_dir = PathBuf::from(val);
    }
    if let Ok(val) = std::env::var("MEDREDACT_OUTPUT_REDACTED_FORMAT") {
        config.output.redacted_format = val;
    }
    if let Ok(val) = std::env::var("MEDREDACT_OUTPUT_WRITE_BATCH_REPORT") {
        config.output.write_batch_report =
            parse_env("MEDREDACT_OUTPUT_WRITE_BATCH_REPORT", &val)?;
    }

    // OCR overrides
    if let Ok(val) = std::env::var("MEDREDACT_OCR_COMMAND") {
        config.ocr.command = val;
    }
    if let Ok(val) = std::env::var("MEDREDACT_OCR_ENGINE_MODE") {
        config.ocr.engine_mode = parse_env("MEDREDACT_OCR_ENGINE_MODE", &val)?;
    }
    if let Ok(val) = std::env::var("MEDREDACT_OCR_PAGE_SEG_MODE") {
        config.ocr.page_seg_mode = parse_env("MEDREDACT_OCR_PAGE_SEG_MODE", &val)?;
    }
    if let Ok(val) = std::env::var("MEDREDACT_OCR_LANGUAGE") {
        config.ocr.language = val;
    }
    if let Ok(val) = std::env::var("MEDREDACT_OCR_TIMEOUT_SECONDS") {
        config.ocr.timeout_seconds = parse_env("MEDREDACT_OCR_TIMEOUT_SECONDS", &val)?;
    }

    // Preprocess overrides
    if let Ok(val) = std::env::var("MEDREDACT_PREPROCESS_ENABLED") {
        config.preprocess.enabled = parse_env("MEDREDACT_PREPROCESS_ENABLED", &val)?;
    }
    if let Ok(val) = std::env::var("MEDREDACT_PREPROCESS_BLUR_SIGMA") {
        config.preprocess.blur_sigma = parse_env("MEDREDACT_PREPROCESS_BLUR_SIGMA", &val)?;
    }

    // Redaction overrides (including audit)
    config
        .redaction
        .apply_env_overrides()
        .map_err(|e| RedactError::Configuration(format!("{e:#}")))?;

    // Logging overrides
    if let Ok(val) = std::env::var("MEDREDACT_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = parse_env("MEDREDACT_LOGGING_LOCAL_ENABLED", &val)?;
    }
    if let Ok(val) = std::env::var("MEDREDACT_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }
    if let Ok(val) = std::env::var("MEDREDACT_LOGGING_LOCAL_ROTATION") {
        config.logging.local_rotation = val;
    }

    Ok(())
}
