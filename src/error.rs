//! Error types

use thiserror::Error;

/// A format name that cannot be resolved against the format registry
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UnknownFormatError {
    /// The name is not registered
    #[error("Cannot find a corresponding MIME type for '{name}'. Please register it in the format registry.")]
    Unregistered { name: String },

    /// The override was missing or empty
    #[error("Format must be a non-empty format name. Please set one of the formats registered in the format registry.")]
    Blank,
}

/// Configuration and registration errors
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    UnknownFormat(#[from] UnknownFormatError),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Invalid configuration document: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid header value: {0}")]
    InvalidHeaderValue(#[from] hyper::header::InvalidHeaderValue),

    /// Action names must look like type names, e.g. `Index`
    #[error("Invalid action name '{0}': expected an identifier starting with an uppercase letter")]
    InvalidActionName(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
