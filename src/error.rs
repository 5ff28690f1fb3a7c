//! Error types for the ingestion pipeline

use thiserror::Error;

/// Result type alias for pipeline operations
pub type Result<T> = std::result::Result<T, Error>;

/// Ingestion pipeline errors
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Unsupported source file format
    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    /// Transient rate-limit signal from the embedding service.
    /// Consumed by the retry wrapper; only surfaces when unwrapped.
    #[error("Rate limited by embedding service: {0}")]
    RateLimited(String),

    /// Retry budget exhausted while the embedding service kept rate limiting
    #[error("Embedding failed after {attempts} attempts")]
    ExhaustedRetries { attempts: u32 },

    /// Embedding error
    #[error("Embedding generation failed: {0}")]
    Embedding(String),

    /// Blob storage error
    #[error("Blob storage error: {0}")]
    Storage(String),

    /// Search index error
    #[error("Search index error: {0}")]
    Index(String),

    /// File parsing error
    #[error("Failed to parse file '{filename}': {message}")]
    FileParse { filename: String, message: String },

    /// HTTP request error
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create an embedding error
    pub fn embedding(message: impl Into<String>) -> Self {
        Self::Embedding(message.into())
    }

    /// Create a blob storage error
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage(message.into())
    }

    /// Create a search index error
    pub fn index(message: impl Into<String>) -> Self {
        Self::Index(message.into())
    }

    /// Create a file parse error
    pub fn file_parse(filename: impl Into<String>, message: impl Into<String>) -> Self {
        Self::FileParse {
            filename: filename.into(),
            message: message.into(),
        }
    }
}
