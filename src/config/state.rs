// Negotiation settings module
// Immutable, validated configuration shared by every request

use super::types::Config;
use crate::error::{Result, UnknownFormatError};
use crate::http::cache::Entry;
use crate::http::mime::{Format, FormatRegistry};

/// Validated negotiation settings
///
/// Built once at startup and only read afterwards; share it by reference or
/// behind an `Arc` across request handlers.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    default_language: String,
    default_request_format: Option<Format>,
    accepted_formats: Vec<Format>,
    registry: FormatRegistry,
    cache_control: Vec<Entry>,
}

impl Settings {
    pub fn builder() -> SettingsBuilder {
        SettingsBuilder::default()
    }

    /// Build settings from a loaded [`Config`]
    pub fn from_config(config: &Config) -> Result<Self> {
        let mut builder = Self::builder().default_language(&config.language.default);

        for mapping in &config.format.mime_types {
            builder = builder.format(mapping.format.as_str(), &mapping.mime_type);
        }
        if let Some(format) = &config.format.default_request_format {
            builder = builder.default_request_format(format);
        }
        builder = builder.accept(config.format.accept.iter().map(String::as_str));
        builder = builder.cache_control(
            config
                .cache
                .control
                .iter()
                .flat_map(super::types::CacheControlEntry::entries),
        );

        builder.build()
    }

    pub fn default_language(&self) -> &str {
        &self.default_language
    }

    pub const fn default_request_format(&self) -> Option<&Format> {
        self.default_request_format.as_ref()
    }

    /// Allow-list of formats; empty when unrestricted
    pub fn accepted_formats(&self) -> &[Format] {
        &self.accepted_formats
    }

    pub const fn registry(&self) -> &FormatRegistry {
        &self.registry
    }

    /// Default Cache-Control entries for every response
    pub fn cache_control(&self) -> &[Entry] {
        &self.cache_control
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_language: "en".to_string(),
            default_request_format: None,
            accepted_formats: Vec::new(),
            registry: FormatRegistry::with_defaults(),
            cache_control: Vec::new(),
        }
    }
}

/// Builder for [`Settings`]
///
/// Format names are validated against the registry in [`SettingsBuilder::build`],
/// so registrations may come after the defaults that use them.
#[derive(Debug, Clone, Default)]
pub struct SettingsBuilder {
    settings: Settings,
    default_request_format: Option<String>,
    accept: Vec<String>,
}

impl SettingsBuilder {
    #[must_use]
    pub fn default_language(mut self, language: &str) -> Self {
        self.settings.default_language = language.trim().to_string();
        self
    }

    /// Format used instead of sniffing `Accept`; a blank name unsets it
    #[must_use]
    pub fn default_request_format(mut self, format: &str) -> Self {
        self.default_request_format = Some(format.to_string());
        self
    }

    #[must_use]
    pub fn accept<'a>(mut self, formats: impl IntoIterator<Item = &'a str>) -> Self {
        self.accept.extend(formats.into_iter().map(str::to_string));
        self
    }

    /// Register a MIME type for a format
    #[must_use]
    pub fn format(mut self, format: &str, mime_type: &str) -> Self {
        self.settings.registry.register(format, mime_type);
        self
    }

    #[must_use]
    pub fn cache_control<E: Into<Entry>>(mut self, entries: impl IntoIterator<Item = E>) -> Self {
        self.settings
            .cache_control
            .extend(entries.into_iter().map(Into::into));
        self
    }

    pub fn build(self) -> Result<Settings> {
        let Self {
            mut settings,
            default_request_format,
            accept,
        } = self;

        settings.default_request_format = match default_request_format.as_deref().map(Format::new)
        {
            Some(format) if format.as_str().is_empty() => None,
            Some(format) => Some(registered(&settings.registry, format)?),
            None => None,
        };

        settings.accepted_formats = accept
            .iter()
            .map(|name| registered(&settings.registry, Format::new(name)))
            .collect::<std::result::Result<_, _>>()?;

        tracing::debug!(
            default_language = %settings.default_language,
            default_request_format = ?settings.default_request_format,
            accepted_formats = ?settings.accepted_formats,
            "negotiation settings built"
        );
        Ok(settings)
    }
}

fn registered(
    registry: &FormatRegistry,
    format: Format,
) -> std::result::Result<Format, UnknownFormatError> {
    if registry.contains(&format) {
        Ok(format)
    } else {
        Err(UnknownFormatError::Unregistered {
            name: format.as_str().to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::types::{CacheControlEntry, MimeTypeMapping};
    use crate::error::Error;

    #[test]
    fn test_defaults() {
        let settings = Settings::builder().build().unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.default_language(), "en");
        assert_eq!(settings.default_request_format(), None);
        assert!(settings.accepted_formats().is_empty());
        assert!(settings.registry().contains(&Format::ALL));
    }

    #[test]
    fn test_builder_registers_before_validation() {
        let settings = Settings::builder()
            .default_request_format(":custom")
            .accept(["custom", "json"])
            .format("custom", "application/custom")
            .build()
            .unwrap();

        assert_eq!(settings.default_request_format(), Some(&Format::new("custom")));
        assert_eq!(settings.accepted_formats(), &[Format::new("custom"), Format::JSON]);
    }

    #[test]
    fn test_unknown_default_format() {
        let err = Settings::builder()
            .default_request_format("nope")
            .build()
            .unwrap_err();
        assert!(matches!(
            err,
            Error::UnknownFormat(UnknownFormatError::Unregistered { ref name }) if name == "nope"
        ));
    }

    #[test]
    fn test_unknown_accepted_format() {
        let err = Settings::builder().accept(["json", "nope"]).build().unwrap_err();
        assert!(matches!(err, Error::UnknownFormat(_)));
    }

    #[test]
    fn test_blank_default_format_is_unset() {
        let settings = Settings::builder().default_request_format("").build().unwrap();
        assert_eq!(settings.default_request_format(), None);
    }

    #[test]
    fn test_from_config() {
        let mut config = Config::default();
        config.language.default = "it".to_string();
        config.format.default_request_format = Some("jpg".to_string());
        config.format.accept = vec!["custom".to_string()];
        config.format.mime_types = vec![MimeTypeMapping {
            format: "custom".to_string(),
            mime_type: "application/custom".to_string(),
        }];
        config.cache.control = vec![
            CacheControlEntry::Flag("public".to_string()),
            CacheControlEntry::Values([("max_age".to_string(), 600)].into_iter().collect()),
        ];

        let settings = Settings::from_config(&config).unwrap();
        assert_eq!(settings.default_language(), "it");
        assert_eq!(settings.default_request_format(), Some(&Format::new("jpg")));
        assert_eq!(settings.accepted_formats(), &[Format::new("custom")]);
        assert_eq!(
            settings.cache_control(),
            &[Entry::flag("public"), Entry::value("max_age", 600)]
        );
    }
}
