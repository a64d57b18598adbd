//! Error types for the faqbot library.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias using faqbot's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading a corpus or configuring the engine.
///
/// Queries never fail: an empty query or a weak match falls back to the
/// configured message instead of surfacing an error.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Corpus file not found.
    #[error("Corpus file not found: {path}")]
    CorpusNotFound { path: PathBuf },

    /// A corpus row is missing a required field.
    #[error("Schema error in row {row}: missing field `{field}`")]
    Schema { row: usize, field: &'static str },

    /// Corpus file extension is not one we can read or write.
    #[error("Unsupported corpus format: {path}")]
    UnsupportedFormat { path: PathBuf },

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML parsing error.
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// TOML encoding error.
    #[error("TOML encoding error: {0}")]
    TomlSer(#[from] toml::ser::Error),

    /// Invalid argument.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl Error {
    /// Create a schema error for the given (1-based) row and field.
    pub fn schema(row: usize, field: &'static str) -> Self {
        Self::Schema { row, field }
    }

    /// Create a new config error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a new invalid argument error.
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }
}
