//! Error types for harmony configuration and parsing.

use thiserror::Error;

/// Result type alias for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors that can occur while loading or validating `harmony.toml`.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Returned when a string does not name one of the four states.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown state: {0:?} (expected euphoric, harmonic, contemplative or mystical)")]
pub struct ParseStateError(pub String);
