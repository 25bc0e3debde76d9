//! Error types for the MatchupEngine

use thiserror::Error;

/// Result type alias for engine operations
pub type Result<T> = std::result::Result<T, EngineError>;

/// Errors that can occur while configuring the engine.
///
/// Scoring itself never fails: ineligible rows are excluded, not reported.
#[derive(Error, Debug)]
pub enum EngineError {
    /// Invalid configuration value
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O errors while reading or writing a config file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parse errors
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// TOML serialization errors
    #[error("TOML serialization error: {0}")]
    TomlSer(#[from] toml::ser::Error),
}

impl EngineError {
    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
