//! Error types for prompt-reviewer

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for prompt-reviewer
#[derive(Debug, Error)]
pub enum ReviewError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(String),

    /// Input could not be turned into records
    #[error("Failed to load records: {0}")]
    Load(String),

    /// File not found
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    /// Starting index outside the record range
    #[error("Invalid starting index {index}: expected a value in 0..{len}")]
    InvalidStartIndex { index: usize, len: usize },

    /// Classification attempted after the last record
    #[error("Review is already complete: all {len} records have been classified")]
    SessionComplete { len: usize },

    /// A bucket could not be written to its store
    #[error("Failed to persist {bucket}: {source}")]
    Persist {
        bucket: &'static str,
        #[source]
        source: Box<ReviewError>,
    },

    /// Archive creation error
    #[error("Archive error: {0}")]
    Archive(#[from] zip::result::ZipError),

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generic error with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<ReviewError>,
    },
}

impl ReviewError {
    /// Add context to an error
    pub fn with_context(self, context: impl Into<String>) -> Self {
        ReviewError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Whether the error only affects the durable mirror of a bucket
    pub fn is_persist(&self) -> bool {
        matches!(self, ReviewError::Persist { .. })
    }
}

impl From<toml::de::Error> for ReviewError {
    fn from(err: toml::de::Error) -> Self {
        ReviewError::Toml(err.to_string())
    }
}

impl From<toml::ser::Error> for ReviewError {
    fn from(err: toml::ser::Error) -> Self {
        ReviewError::Toml(err.to_string())
    }
}

/// Result type alias for prompt-reviewer
pub type Result<T> = std::result::Result<T, ReviewError>;
