//! Remote collaborators behind trait seams
//!
//! Each external service the pipeline talks to (blob store, embedding
//! deployment, search index) is a trait here, with the REST
//! implementations under [`azure`]. The binaries construct concrete
//! providers and hand them to the pipeline as trait objects.

pub mod azure;
pub mod blob_store;
pub mod embedding;
pub mod search_index;

pub use blob_store::{BlobStore, HttpBlobStore};
pub use embedding::{EmbeddingProvider, RetryingEmbedder};
pub use search_index::SearchIndex;
