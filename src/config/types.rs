// Configuration types module
// Defines the serialized configuration structures

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::http::cache::Entry;

/// Main configuration structure
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub language: LanguageConfig,
    #[serde(default)]
    pub format: FormatConfig,
    #[serde(default)]
    pub cache: CacheConfig,
}

/// Language negotiation configuration
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct LanguageConfig {
    /// Served when `Accept-Language` is absent, empty or `*`
    #[serde(default = "default_language")]
    pub default: String,
}

#[allow(clippy::missing_const_for_fn)]
fn default_language() -> String {
    "en".to_string()
}

impl Default for LanguageConfig {
    fn default() -> Self {
        Self {
            default: default_language(),
        }
    }
}

/// Format negotiation configuration
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq, Eq)]
pub struct FormatConfig {
    /// Format served regardless of the `Accept` header (unless overridden)
    #[serde(default)]
    pub default_request_format: Option<String>,
    /// Allow-list of acceptable formats; empty means unrestricted
    #[serde(default)]
    pub accept: Vec<String>,
    /// Extra registrations, appended after the built-in table
    #[serde(default)]
    pub mime_types: Vec<MimeTypeMapping>,
}

/// Custom format registration
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct MimeTypeMapping {
    pub format: String,
    pub mime_type: String,
}

/// Cache configuration
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq, Eq)]
pub struct CacheConfig {
    /// Default Cache-Control directives, e.g. `["public", { max_age = 600 }]`
    #[serde(default)]
    pub control: Vec<CacheControlEntry>,
}

/// Cache-Control entry as written in configuration
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
#[serde(untagged)]
pub enum CacheControlEntry {
    Flag(String),
    /// One or more valued directives; keys are applied in name order
    Values(BTreeMap<String, u64>),
}

impl CacheControlEntry {
    pub fn entries(&self) -> Vec<Entry> {
        match self {
            Self::Flag(name) => vec![Entry::flag(name.as_str())],
            Self::Values(values) => values
                .iter()
                .map(|(name, seconds)| Entry::value(name.as_str(), *seconds))
                .collect(),
        }
    }
}
