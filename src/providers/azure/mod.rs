//! REST clients for the Azure-hosted collaborators

mod embedder;
mod search;

pub use embedder::AzureEmbedder;
pub use search::AzureSearchIndex;
