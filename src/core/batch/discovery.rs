//! Input image discovery

use crate::domain::{RedactError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// List the images directly inside `dir` whose extension is in `extensions`.
///
/// Extensions compare case-insensitively and may be given with or without a
/// leading dot. The result is sorted by path so runs are reproducible.
///
/// # Errors
///
/// Returns a configuration error if `dir` is missing or not a directory, and
/// an I/O error if it cannot be listed.
pub fn discover_images(dir: &Path, extensions: &[String]) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(RedactError::Configuration(format!(
            "Images folder not found: {}",
            dir.display()
        )));
    }

    let wanted: Vec<String> = extensions
        .iter()
        .map(|e| e.trim().trim_start_matches('.').to_lowercase())
        .collect();

    let entries = fs::read_dir(dir).map_err(|e| {
        RedactError::Io(format!("Failed to list images folder {}: {}", dir.display(), e))
    })?;

    let mut images = Vec::new();
    for entry in entries {
        let path = entry?.path();
        if !path.is_file() {
            continue;
        }
        let matches = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| wanted.contains(&e.to_lowercase()))
            .unwrap_or(false);
        if matches {
            images.push(path);
        }
    }

    images.sort();
    Ok(images)
}
