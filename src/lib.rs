//! searchfeed: batch ingestion from cloud storage into a vector search index
//!
//! The pipeline downloads product records (CSV/JSON) from a blob store or a
//! PDF report from an HTTP URL, synthesizes a text chunk per record, embeds
//! each chunk through a remote embedding deployment (with exponential
//! backoff on rate limiting), and bulk-uploads the resulting documents to a
//! search index in batches.
//!
//! Processing is strictly sequential: one record is transformed, embedded
//! and buffered before the next begins, and the first unrecoverable error
//! aborts the run.

pub mod config;
pub mod error;
pub mod ingestion;
pub mod pipeline;
pub mod providers;
pub mod transform;
pub mod types;

pub use error::{Error, Result};
pub use types::{IndexDocument, RawRecord};
