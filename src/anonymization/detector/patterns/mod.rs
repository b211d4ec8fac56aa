//! Pattern library for PII detection

use crate::anonymization::models::{CollectionMode, PiiCategory};
use anyhow::{Context, Result};
use regex::{Regex, RegexBuilder};
use serde::Deserialize;
use std::path::Path;

/// Post-processing applied to each matched value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueTransform {
    #[default]
    None,
    /// Strip surrounding whitespace
    Trim,
    /// Convert to upper case
    Uppercase,
}

impl ValueTransform {
    pub fn apply(&self, value: &str) -> String {
        match self {
            Self::None => value.to_string(),
            Self::Trim => value.trim().to_string(),
            Self::Uppercase => value.to_uppercase(),
        }
    }
}

/// Rule definition from TOML
#[derive(Debug, Clone, Deserialize)]
pub struct RuleDefinition {
    /// PII category label
    pub category: String,
    /// Regex pattern
    pub pattern: String,
    /// Match the pattern case-insensitively
    #[serde(default)]
    pub case_insensitive: bool,
    /// Collection mode; the category default when omitted
    #[serde(default)]
    pub mode: Option<CollectionMode>,
    /// Value post-processing
    #[serde(default)]
    pub transform: ValueTransform,
}

/// Compiled rule with metadata
#[derive(Debug, Clone)]
pub struct CompiledPattern {
    /// Compiled regex
    pub regex: Regex,
    /// PII category
    pub category: PiiCategory,
    /// How repeated matches are kept
    pub mode: CollectionMode,
    /// Value post-processing
    pub transform: ValueTransform,
}

impl CompiledPattern {
    /// Every value this rule extracts from `text`, post-processed, in match order.
    ///
    /// Yields capture group 1 when the pattern has a group, else the whole match.
    pub fn extract<'a>(&'a self, text: &'a str) -> impl Iterator<Item = String> + 'a {
        let has_group = self.regex.captures_len() > 1;
        self.regex.captures_iter(text).map(move |caps| {
            let matched = if has_group { caps.get(1) } else { caps.get(0) };
            self.transform.apply(matched.map_or("", |m| m.as_str()))
        })
    }
}

/// Pattern library container
#[derive(Debug, Deserialize)]
struct PatternLibrary {
    #[serde(default)]
    rules: Vec<RuleDefinition>,
}

/// Ordered pattern registry for PII detection
#[derive(Debug, Clone)]
pub struct PatternRegistry {
    patterns: Vec<CompiledPattern>,
}

impl PatternRegistry {
    /// Create a new pattern registry from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).with_context(|| {
            format!(
                "Failed to read pattern library: {}",
                path.as_ref().display()
            )
        })?;

        Self::from_toml(&content)
    }

    /// Create a pattern registry from TOML content; rule order is file order
    pub fn from_toml(content: &str) -> Result<Self> {
        let library: PatternLibrary =
            toml::from_str(content).context("Failed to parse pattern library TOML")?;

        if library.rules.is_empty() {
            anyhow::bail!("Pattern library defines no rules");
        }

        let patterns = library
            .rules
            .iter()
            .enumerate()
            .map(|(index, def)| Self::compile(index, def))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { patterns })
    }

    fn compile(index: usize, def: &RuleDefinition) -> Result<CompiledPattern> {
        let category: PiiCategory = def
            .category
            .parse()
            .map_err(|e: String| anyhow::anyhow!(e))
            .with_context(|| format!("Invalid category in rule #{}", index + 1))?;

        let regex = RegexBuilder::new(&def.pattern)
            .case_insensitive(def.case_insensitive)
            .build()
            .with_context(|| {
                format!("Invalid regex in rule #{} ({category}): {}", index + 1, def.pattern)
            })?;

        Ok(CompiledPattern {
            regex,
            category,
            mode: def.mode.unwrap_or_else(|| category.default_mode()),
            transform: def.transform,
        })
    }

    /// Create a default pattern registry with built-in patterns
    pub fn default_patterns() -> Result<Self> {
        let default_toml = include_str!("../../../../patterns/pii_patterns.toml");
        Self::from_toml(default_toml)
    }

    /// Get all patterns in evaluation order
    pub fn all_patterns(&self) -> &[CompiledPattern] {
        &self.patterns
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    impl PatternRegistry {
        fn patterns_for_category(
            &self,
            category: PiiCategory,
        ) -> impl Iterator<Item = &CompiledPattern> {
            self.patterns.iter().filter(move |p| p.category == category)
        }
    }

    #[test]
    fn test_load_default_patterns() {
        let registry = PatternRegistry::default_patterns().unwrap();
        let categories: Vec<_> = registry.all_patterns().iter().map(|p| p.category).collect();
        assert_eq!(categories, PiiCategory::ALL.to_vec());
    }

    #[test]
    fn test_default_modes_and_transforms() {
        let registry = PatternRegistry::default_patterns().unwrap();
        let name = registry.patterns_for_category(PiiCategory::PatientName).next().unwrap();
        assert_eq!(name.transform, ValueTransform::Trim);
        assert_eq!(name.mode, CollectionMode::Ordered);

        let sex = registry.patterns_for_category(PiiCategory::Sex).next().unwrap();
        assert_eq!(sex.transform, ValueTransform::Uppercase);

        let phone = registry.patterns_for_category(PiiCategory::Phone).next().unwrap();
        assert_eq!(phone.mode, CollectionMode::Set);
    }

    #[test]
    fn test_extract_uses_capture_group() {
        let registry = PatternRegistry::default_patterns().unwrap();
        let age = registry.patterns_for_category(PiiCategory::Age).next().unwrap();
        let values: Vec<_> = age.extract("Age: 34 and age-7").collect();
        assert_eq!(values, vec!["34", "7"]);
    }

    #[test]
    fn test_extract_whole_match_without_group() {
        let registry = PatternRegistry::default_patterns().unwrap();
        let dates = registry.patterns_for_category(PiiCategory::Dates).next().unwrap();
        let values: Vec<_> = dates.extract("seen 11/11/25 then 10-4-2025").collect();
        assert_eq!(values, vec!["11/11/25", "10-4-2025"]);
    }

    #[test]
    fn test_custom_library_preserves_order() {
        let toml = r#"
[[rules]]
category = "phone"
pattern = '\b\d{10}\b'

[[rules]]
category = "age"
pattern = 'Age (\d+)'
mode = "set"
"#;
        let registry = PatternRegistry::from_toml(toml).unwrap();
        let patterns = registry.all_patterns();
        assert_eq!(patterns.len(), 2);
        assert_eq!(patterns[0].category, PiiCategory::Phone);
        assert_eq!(patterns[1].category, PiiCategory::Age);
        assert_eq!(patterns[1].mode, CollectionMode::Set);
        assert!(!patterns[1].regex.is_match("age 5"));
    }

    #[test]
    fn test_unknown_category_rejected() {
        let toml = r#"
[[rules]]
category = "email"
pattern = '\S+@\S+'
"#;
        let err = PatternRegistry::from_toml(toml).unwrap_err();
        assert!(format!("{err:#}").contains("Unknown PII category"));
    }

    #[test]
    fn test_invalid_regex_rejected() {
        let toml = r#"
[[rules]]
category = "age"
pattern = '(\d+'
"#;
        assert!(PatternRegistry::from_toml(toml).is_err());
    }

    #[test]
    fn test_empty_library_rejected() {
        assert!(PatternRegistry::from_toml("").is_err());
    }
}
