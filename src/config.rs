//! Environment-driven configuration for the ingestion jobs
//!
//! Every remote collaborator (blob store, embedding deployment, search
//! index) reads its settings from the environment at startup. Missing
//! required values fail with [`Error::Config`] before any request is made.

use std::str::FromStr;

use crate::error::{Error, Result};

/// Read a required environment variable
fn required(name: &str) -> Result<String> {
    std::env::var(name).map_err(|_| Error::Config(format!("{name} is not set")))
}

/// Read an optional environment variable with a fallback
fn optional(name: &str, default: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default.to_string())
}

/// Read and parse an optional numeric environment variable
fn parsed<T: FromStr>(name: &str, default: T) -> Result<T> {
    match std::env::var(name) {
        Ok(raw) => raw
            .parse()
            .map_err(|_| Error::Config(format!("{name} is not a valid number: {raw}"))),
        Err(_) => Ok(default),
    }
}

/// Embedding deployment settings
#[derive(Debug, Clone)]
pub struct EmbeddingSettings {
    /// Service base URL
    pub endpoint: String,
    /// API key sent in the `api-key` header
    pub api_key: String,
    /// Deployment / model identifier
    pub deployment: String,
    /// REST API version query parameter
    pub api_version: String,
    /// Dimensionality of the returned vectors
    pub dimensions: usize,
    /// Retry budget for rate-limited calls
    pub max_retries: u32,
}

impl EmbeddingSettings {
    /// Load settings from the environment
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            endpoint: required("AZURE_OPENAI_ENDPOINT")?,
            api_key: required("AZURE_OPENAI_API_KEY")?,
            deployment: optional("AZURE_OPENAI_EMBED_DEPLOYMENT", "text-embedding-3-small"),
            api_version: optional("AZURE_OPENAI_API_VERSION", "2024-07-01-preview"),
            dimensions: parsed("EMBEDDING_DIMENSIONS", 1536)?,
            max_retries: parsed("EMBED_MAX_RETRIES", 5)?,
        })
    }
}

/// Search index settings
#[derive(Debug, Clone)]
pub struct SearchSettings {
    /// Service base URL
    pub endpoint: String,
    /// API key sent in the `api-key` header
    pub api_key: String,
    /// Target index name
    pub index: String,
    /// REST API version query parameter
    pub api_version: String,
}

impl SearchSettings {
    /// Load settings from the environment
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            endpoint: required("AZURE_SEARCH_ENDPOINT")?,
            api_key: required("AZURE_SEARCH_API_KEY")?,
            index: required("AZURE_SEARCH_INDEX")?,
            api_version: optional("AZURE_SEARCH_API_VERSION", "2024-07-01"),
        })
    }
}

/// Blob storage settings
#[derive(Debug, Clone)]
pub struct BlobSettings {
    /// Storage account base URL
    pub account_url: String,
    /// Shared access signature appended to download URLs
    pub sas_token: String,
    /// Container holding the source file
    pub container: String,
    /// Source blob name, e.g. `products.csv`
    pub blob: String,
}

impl BlobSettings {
    /// Load settings from the environment
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            account_url: required("AZURE_BLOB_ACCOUNT_URL")?,
            sas_token: required("AZURE_BLOB_SAS_TOKEN")?,
            container: required("AZURE_BLOB_CONTAINER")?,
            blob: required("AZURE_BLOB_FILE")?,
        })
    }
}

/// Batch upload settings shared by both jobs
#[derive(Debug, Clone)]
pub struct PipelineSettings {
    /// Documents per upload call
    pub batch_size: usize,
}

impl PipelineSettings {
    /// Load settings from the environment
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            batch_size: parsed("BATCH_SIZE", 50)?,
        })
    }
}

/// Report ingestion settings
#[derive(Debug, Clone)]
pub struct ReportSettings {
    /// HTTP URL of the source PDF
    pub url: String,
    /// Target chunk size in characters
    pub chunk_size: usize,
    /// Overlap between consecutive chunks in characters
    pub chunk_overlap: usize,
}

impl ReportSettings {
    /// Load settings from the environment
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            url: required("REPORT_URL")?,
            chunk_size: parsed("REPORT_CHUNK_SIZE", 400)?,
            chunk_overlap: parsed("REPORT_CHUNK_OVERLAP", 20)?,
        })
    }
}
