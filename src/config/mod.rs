// Configuration module entry point
// Loads negotiation configuration and builds the immutable settings

mod state;
mod types;

// Re-export public types
pub use state::{Settings, SettingsBuilder};
pub use types::{CacheConfig, CacheControlEntry, Config, FormatConfig, LanguageConfig, MimeTypeMapping};

use crate::error::Result;

/// Environment variable prefix, e.g. `NEGOTIATION_LANGUAGE__DEFAULT=it`
pub const ENV_PREFIX: &str = "NEGOTIATION";

/// Keys whose environment values are comma-separated lists
const ENV_LIST_KEYS: &[&str] = &["format.accept"];

/// `NEGOTIATION_*` variables; `__` separates nested keys
fn environment() -> config::Environment {
    ENV_LIST_KEYS.iter().fold(
        config::Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true)
            .list_separator(","),
        |env, key| env.with_list_parse_key(key),
    )
}

impl Config {
    /// Load configuration from specified file path (without extension)
    /// Missing files are allowed; environment variables override file values
    pub fn load_from(config_path: &str) -> Result<Self> {
        Self::load_with_env(config_path, environment())
    }

    fn load_with_env(config_path: &str, env: config::Environment) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(env)
            .set_default("language.default", "en")?
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    /// Parse a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Build the validated runtime settings
    pub fn settings(&self) -> Result<Settings> {
        Settings::from_config(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::cache::Entry;
    use crate::http::mime::Format;
    use std::io::Write;

    const SAMPLE: &str = r#"
[language]
default = "en-US"

[format]
default_request_format = "json"
accept = ["json", "custom"]
mime_types = [{ format = "custom", mime_type = "application/custom" }]

[cache]
control = ["public", { max_age = 600 }]
"#;

    #[test]
    fn test_from_toml_str() {
        let config = Config::from_toml_str(SAMPLE).unwrap();
        assert_eq!(config.language.default, "en-US");
        assert_eq!(config.format.default_request_format.as_deref(), Some("json"));
        assert_eq!(config.format.mime_types[0].mime_type, "application/custom");

        let settings = config.settings().unwrap();
        assert_eq!(settings.default_request_format(), Some(&Format::JSON));
        assert_eq!(
            settings.cache_control(),
            &[Entry::flag("public"), Entry::value("max_age", 600)]
        );
    }

    #[test]
    fn test_from_toml_str_defaults() {
        let config = Config::from_toml_str("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.language.default, "en");
    }

    #[test]
    fn test_from_toml_str_invalid() {
        assert!(Config::from_toml_str("[language\n").is_err());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut file = std::fs::File::create(dir.path().join("negotiation.toml")).unwrap();
        file.write_all(
            b"[language]\ndefault = \"da\"\n\n[format]\naccept = [\"json\", \"html\"]\n",
        )
        .unwrap();

        // File::with_name resolves the extension itself
        let path = dir.path().join("negotiation");
        let config = Config::load_from(path.to_str().unwrap()).unwrap();
        assert_eq!(config.language.default, "da");
        assert_eq!(config.format.accept, vec!["json", "html"]);
        assert!(config.cache.control.is_empty());
    }

    #[test]
    fn test_env_overrides_list_keys() {
        let vars: config::Map<String, String> = [
            ("NEGOTIATION_FORMAT__ACCEPT", "json,html"),
            ("NEGOTIATION_FORMAT__DEFAULT_REQUEST_FORMAT", "json"),
            ("NEGOTIATION_LANGUAGE__DEFAULT", "it"),
        ]
        .into_iter()
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect();

        let config =
            Config::load_with_env("/nonexistent/negotiation", environment().source(Some(vars)))
                .unwrap();
        assert_eq!(config.format.accept, vec!["json", "html"]);
        assert_eq!(config.format.default_request_format.as_deref(), Some("json"));
        assert_eq!(config.language.default, "it");
        assert!(config.settings().is_ok());
    }

    #[test]
    fn test_env_single_list_value() {
        let vars: config::Map<String, String> =
            [("NEGOTIATION_FORMAT__ACCEPT".to_string(), "json".to_string())]
                .into_iter()
                .collect();

        let config =
            Config::load_with_env("/nonexistent/negotiation", environment().source(Some(vars)))
                .unwrap();
        assert_eq!(config.format.accept, vec!["json"]);
    }

    #[test]
    fn test_load_from_missing_file() {
        let config = Config::load_from("/nonexistent/negotiation").unwrap();
        assert_eq!(config.language.default, "en");
        assert!(config.format.default_request_format.is_none());
    }
}
