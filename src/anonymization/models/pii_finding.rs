//! PII finding data models

use crate::domain::DocumentName;
use chrono::{DateTime, Utc};
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// PII categories recognized on scanned hospital documents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PiiCategory {
    /// Patient name following a "Patient Name" label
    PatientName,
    /// In-patient department admission number
    IpdNo,
    /// Unique hospital ID
    Uhid,
    /// Age in years
    Age,
    /// Sex marker (M/F)
    Sex,
    /// Day/month/year dates
    Dates,
    /// Runs of six or more digits
    LongNumbers,
    /// Ten-digit phone-like numbers
    Phone,
}

impl PiiCategory {
    /// All categories in default rule order
    pub const ALL: [PiiCategory; 8] = [
        Self::PatientName,
        Self::IpdNo,
        Self::Uhid,
        Self::Age,
        Self::Sex,
        Self::Dates,
        Self::LongNumbers,
        Self::Phone,
    ];

    /// Key used in reports and pattern libraries
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PatientName => "patient_name",
            Self::IpdNo => "ipd_no",
            Self::Uhid => "uhid",
            Self::Age => "age",
            Self::Sex => "sex",
            Self::Dates => "dates",
            Self::LongNumbers => "long_numbers",
            Self::Phone => "phone",
        }
    }

    /// How matches are collected when a library doesn't say otherwise
    pub fn default_mode(&self) -> CollectionMode {
        match self {
            Self::Dates | Self::LongNumbers | Self::Phone => CollectionMode::Set,
            _ => CollectionMode::Ordered,
        }
    }
}

impl fmt::Display for PiiCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PiiCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("Unknown PII category: {s}"))
    }
}

/// How repeated matches within one category are kept
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollectionMode {
    /// First-seen order, duplicates kept
    Ordered,
    /// Distinct values only
    Set,
}

/// Detected PII for one document: category → matched raw values
///
/// Categories appear in the order their first value was recorded. A category
/// is present only while it holds at least one value; there is no way to
/// insert an empty list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PiiFinding {
    entries: Vec<(PiiCategory, Vec<String>)>,
}

impl PiiFinding {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one matched value under `category`.
    ///
    /// With [`CollectionMode::Set`] a value already present is ignored.
    pub fn record(&mut self, category: PiiCategory, mode: CollectionMode, value: String) {
        match self.entries.iter_mut().find(|(c, _)| *c == category) {
            Some((_, values)) => {
                if mode == CollectionMode::Set && values.contains(&value) {
                    return;
                }
                values.push(value);
            }
            None => self.entries.push((category, vec![value])),
        }
    }

    /// Values recorded for `category`, if any
    pub fn get(&self, category: PiiCategory) -> Option<&[String]> {
        self.entries
            .iter()
            .find(|(c, _)| *c == category)
            .map(|(_, v)| v.as_slice())
    }

    pub fn contains(&self, category: PiiCategory) -> bool {
        self.get(category).is_some()
    }

    /// Categories present, in recording order
    pub fn categories(&self) -> impl Iterator<Item = PiiCategory> + '_ {
        self.entries.iter().map(|(c, _)| *c)
    }

    /// (category, values) pairs in recording order
    pub fn iter(&self) -> impl Iterator<Item = (PiiCategory, &[String])> {
        self.entries.iter().map(|(c, v)| (*c, v.as_slice()))
    }

    /// Every recorded value across all categories
    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.entries
            .iter()
            .flat_map(|(_, v)| v.iter().map(String::as_str))
    }

    /// Number of categories present
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of values across all categories
    pub fn total_values(&self) -> usize {
        self.entries.iter().map(|(_, v)| v.len()).sum()
    }
}

impl Serialize for PiiFinding {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (category, values) in &self.entries {
            map.serialize_entry(category, values)?;
        }
        map.end()
    }
}

/// Result of running the redaction pipeline over one document
#[derive(Debug, Clone, Serialize)]
pub struct ProcessedDocument {
    /// Document name (source file stem)
    pub name: DocumentName,
    /// Text assembled from the OCR words
    pub text: String,
    /// Detected PII
    pub finding: PiiFinding,
    /// Number of OCR word records
    pub word_count: usize,
    /// Number of word boxes filled on the redacted image
    pub redacted_regions: usize,
    /// Processing time in milliseconds
    pub processing_time_ms: u64,
    /// Timestamp of processing
    pub timestamp: DateTime<Utc>,
}

impl ProcessedDocument {
    pub fn new(
        name: DocumentName,
        text: String,
        finding: PiiFinding,
        word_count: usize,
        redacted_regions: usize,
        processing_time_ms: u64,
    ) -> Self {
        Self {
            name,
            text,
            finding,
            word_count,
            redacted_regions,
            processing_time_ms,
            timestamp: Utc::now(),
        }
    }

    /// Check if any PII was detected
    pub fn has_detections(&self) -> bool {
        !self.finding.is_empty()
    }
}
