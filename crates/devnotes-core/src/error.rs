//! Error types for the devnotes core library.

use thiserror::Error;

/// Result type alias using `CoreError`.
pub type Result<T> = std::result::Result<T, CoreError>;

/// Core error types for devnotes.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Settings loading or parsing error.
    #[error("Settings error: {message}")]
    Settings {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// File system I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Generic configuration crate error.
    #[error("Config crate error: {0}")]
    ConfigCrate(#[from] config::ConfigError),
}

impl CoreError {
    /// Create a new settings error with a message.
    pub fn settings(message: impl Into<String>) -> Self {
        Self::Settings {
            message: message.into(),
            source: None,
        }
    }

    /// Create a new settings error with source.
    pub fn settings_with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Settings {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}
