//! Error types for the gdlens library.

use thiserror::Error;

/// Result type alias using gdlens's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while aggregating a batch.
///
/// Per-file extraction failure is not an `Error`: the fact extractor is total
/// and reports failure inside the record it returns.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML parsing error.
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Analysis-specific error.
    #[error("Analysis error: {message}")]
    Analysis { message: String },
}

impl Error {
    /// Create a new analysis error.
    pub fn analysis(message: impl Into<String>) -> Self {
        Self::Analysis {
            message: message.into(),
        }
    }

    /// Create a new config error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}
