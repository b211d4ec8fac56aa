//! Domain identifier types with validation
//!
//! Newtype wrappers that keep document names and run identifiers from being
//! mixed up with arbitrary strings.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use uuid::Uuid;

/// Name of a document being processed
///
/// The file stem of the source image (`scan_001.jpg` → `scan_001`). All output
/// artifacts for the document are named after it.
///
/// # Examples
///
/// ```
/// use medredact::domain::ids::DocumentName;
/// use std::path::Path;
///
/// let name = DocumentName::from_path(Path::new("images/scan_001.jpg")).unwrap();
/// assert_eq!(name.as_str(), "scan_001");
/// assert_eq!(name.artifact("text", "txt"), "scan_001_text.txt");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DocumentName(String);

impl DocumentName {
    /// Creates a new DocumentName from a string
    pub fn new(name: impl Into<String>) -> Result<Self, String> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err("Document name cannot be empty".to_string());
        }
        if name.contains(['/', '\\']) {
            return Err(format!("Document name cannot contain path separators: {name}"));
        }
        Ok(Self(name))
    }

    /// Derives a document name from an image path's file stem
    pub fn from_path(path: &Path) -> Result<Self, String> {
        let stem = path
            .file_stem()
            .and_then(|s| s.to_str())
            .ok_or_else(|| format!("Path has no usable file stem: {}", path.display()))?;
        Self::new(stem)
    }

    /// Builds an artifact file name: `<name>_<suffix>.<extension>`
    pub fn artifact(&self, suffix: &str, extension: &str) -> String {
        format!("{}_{}.{}", self.0, suffix, extension)
    }

    /// Returns the document name as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DocumentName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for DocumentName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for DocumentName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Identifier of one batch run, stamped on audit entries and the batch report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RunId(Uuid);

impl RunId {
    /// Generates a fresh random run id
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for RunId {
    fn default() -> Self {
        Self::generate()
    }
}

impl fmt::Display for RunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
