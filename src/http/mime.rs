//! MIME type registry module
//!
//! Maps symbolic response formats (`html`, `json`, ...) to MIME types and back.

use std::borrow::Cow;
use std::fmt;

/// Symbolic response format name, e.g. `html` or `json`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Format(Cow<'static, str>);

impl Format {
    /// Catch-all format, served as `application/octet-stream`
    pub const ALL: Self = Self::from_static("all");
    pub const HTML: Self = Self::from_static("html");
    pub const JSON: Self = Self::from_static("json");

    pub const fn from_static(name: &'static str) -> Self {
        Self(Cow::Borrowed(name))
    }

    /// Build a format from user input
    ///
    /// Surrounding whitespace and one leading `:` are stripped, so `":json"`
    /// and `"json"` name the same format.
    pub fn new(name: &str) -> Self {
        let name = name.trim();
        let name = name.strip_prefix(':').unwrap_or(name);
        Self(Cow::Owned(name.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_all(&self) -> bool {
        *self == Self::ALL
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Format {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// MIME type of the catch-all format
pub const OCTET_STREAM: &str = "application/octet-stream";

/// Media range matching any type
pub const ANY_MEDIA_TYPE: &str = "*/*";

/// Built-in registrations, in lookup order
const DEFAULT_MIME_TYPES: &[(&str, &str)] = &[
    ("all", OCTET_STREAM),
    // Text
    ("html", "text/html"),
    ("xhtml", "application/xhtml+xml"),
    ("txt", "text/plain"),
    ("css", "text/css"),
    ("csv", "text/csv"),
    ("xml", "application/xml"),
    ("xml", "text/xml"),
    ("atom", "application/atom+xml"),
    ("rss", "application/rss+xml"),
    // JavaScript/WASM
    ("js", "application/javascript"),
    ("js", "text/javascript"),
    ("json", "application/json"),
    ("wasm", "application/wasm"),
    // Images
    ("png", "image/png"),
    ("jpg", "image/jpeg"),
    ("gif", "image/gif"),
    ("svg", "image/svg+xml"),
    ("ico", "image/x-icon"),
    ("webp", "image/webp"),
    // Video
    ("mp4", "video/mp4"),
    ("webm", "video/webm"),
    // Audio
    ("mp3", "audio/mpeg"),
    ("wav", "audio/wav"),
    // Fonts
    ("woff", "font/woff"),
    ("woff2", "font/woff2"),
    // Documents
    ("pdf", "application/pdf"),
    ("zip", "application/zip"),
    ("gz", "application/gzip"),
];

/// Ordered format <-> MIME type table
///
/// Built once while loading configuration and only read afterwards. A format
/// may own several MIME types; the first one registered is canonical.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatRegistry {
    entries: Vec<(Format, String)>,
}

impl FormatRegistry {
    /// Registry holding only the catch-all format
    pub fn new() -> Self {
        Self {
            entries: vec![(Format::ALL, OCTET_STREAM.to_string())],
        }
    }

    /// Registry holding the built-in web formats
    pub fn with_defaults() -> Self {
        Self {
            entries: DEFAULT_MIME_TYPES
                .iter()
                .map(|&(format, mime)| (Format::from_static(format), mime.to_string()))
                .collect(),
        }
    }

    /// Append a mapping; an identical mapping is registered only once
    pub fn register(&mut self, format: impl Into<Format>, mime_type: &str) {
        let format = format.into();
        let mime_type = mime_type.trim();
        if self
            .entries
            .iter()
            .any(|(f, m)| *f == format && m == mime_type)
        {
            return;
        }
        tracing::debug!(%format, mime_type, "registered format");
        self.entries.push((format, mime_type.to_string()));
    }

    /// First registered format whose MIME type equals `mime_type`
    ///
    /// # Examples
    /// ```
    /// use action_negotiation::http::mime::{Format, FormatRegistry};
    /// let registry = FormatRegistry::with_defaults();
    /// assert_eq!(registry.format_for("application/json"), Some(&Format::JSON));
    /// assert_eq!(registry.format_for("application/unknown"), None);
    /// ```
    pub fn format_for(&self, mime_type: &str) -> Option<&Format> {
        self.entries
            .iter()
            .find(|(_, m)| m == mime_type)
            .map(|(format, _)| format)
    }

    /// Canonical (first registered) MIME type of `format`
    pub fn mime_type_for(&self, format: &Format) -> Option<&str> {
        self.entries
            .iter()
            .find(|(f, _)| f == format)
            .map(|(_, m)| m.as_str())
    }

    /// Every MIME type registered for `format`, in registration order
    pub fn mime_types_for<'a>(&'a self, format: &'a Format) -> impl Iterator<Item = &'a str> + 'a {
        self.entries
            .iter()
            .filter(move |(f, _)| f == format)
            .map(|(_, m)| m.as_str())
    }

    pub fn contains(&self, format: &Format) -> bool {
        self.entries.iter().any(|(f, _)| f == format)
    }

    /// Registered formats, each listed once
    pub fn formats(&self) -> Vec<&Format> {
        let mut formats: Vec<&Format> = Vec::new();
        for (format, _) in &self.entries {
            if !formats.contains(&format) {
                formats.push(format);
            }
        }
        formats
    }
}

impl Default for FormatRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_normalization() {
        assert_eq!(Format::new(":json"), Format::JSON);
        assert_eq!(Format::new(" html "), Format::HTML);
        assert_eq!(Format::from("all"), Format::ALL);
        assert!(Format::new("all").is_all());
        assert_eq!(Format::new("csv").to_string(), "csv");
    }

    #[test]
    fn test_common_types() {
        let registry = FormatRegistry::with_defaults();
        assert_eq!(registry.format_for("text/html"), Some(&Format::HTML));
        assert_eq!(registry.format_for("application/json"), Some(&Format::JSON));
        assert_eq!(registry.format_for(OCTET_STREAM), Some(&Format::ALL));
        assert_eq!(registry.format_for("image/jpeg"), Some(&Format::new("jpg")));
        assert_eq!(registry.mime_type_for(&Format::HTML), Some("text/html"));
        assert_eq!(registry.mime_type_for(&Format::ALL), Some(OCTET_STREAM));
    }

    #[test]
    fn test_unknown_type() {
        let registry = FormatRegistry::with_defaults();
        assert_eq!(registry.format_for("application/unknown"), None);
        assert_eq!(registry.mime_type_for(&Format::new("unknown")), None);
        assert!(!registry.contains(&Format::new("unknown")));
    }

    #[test]
    fn test_aliases_share_format() {
        let registry = FormatRegistry::with_defaults();
        let xml = Format::new("xml");
        assert_eq!(registry.format_for("text/xml"), Some(&xml));
        assert_eq!(registry.mime_type_for(&xml), Some("application/xml"));
        assert_eq!(
            registry.mime_types_for(&xml).collect::<Vec<_>>(),
            vec!["application/xml", "text/xml"]
        );
    }

    #[test]
    fn test_register_custom() {
        let mut registry = FormatRegistry::new();
        assert_eq!(registry.formats(), vec![&Format::ALL]);

        registry.register("custom", "application/custom");
        registry.register(":custom", "application/custom");
        assert_eq!(
            registry.format_for("application/custom"),
            Some(&Format::new("custom"))
        );
        assert_eq!(registry.formats().len(), 2);
    }

    #[test]
    fn test_first_registration_wins() {
        let mut registry = FormatRegistry::with_defaults();
        registry.register("json", "application/vnd.api+json");
        registry.register("api", "application/json");

        // Canonical MIME type and MIME lookups keep the earlier entries
        assert_eq!(registry.mime_type_for(&Format::JSON), Some("application/json"));
        assert_eq!(registry.format_for("application/json"), Some(&Format::JSON));
        assert_eq!(
            registry.format_for("application/vnd.api+json"),
            Some(&Format::JSON)
        );
    }

    #[test]
    fn test_lookup_with_short_lived_format() {
        let registry = FormatRegistry::with_defaults();
        let canonical = {
            let format = Format::new("json");
            registry.mime_type_for(&format)
        };
        assert_eq!(canonical, Some("application/json"));
    }

    #[test]
    fn test_every_default_round_trips() {
        let registry = FormatRegistry::with_defaults();
        for format in registry.formats() {
            let mime = registry.mime_type_for(format).unwrap();
            assert_eq!(registry.format_for(mime), Some(format));
        }
    }
}
