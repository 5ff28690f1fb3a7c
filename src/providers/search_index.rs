//! Search index provider for bulk document uploads

use async_trait::async_trait;

use crate::error::Result;
use crate::types::IndexDocument;

/// A remote search index accepting bulk document uploads
#[async_trait]
pub trait SearchIndex: Send + Sync {
    /// Upload a batch of documents in one call
    async fn upload(&self, documents: &[IndexDocument]) -> Result<()>;

    /// Provider name for logging
    fn name(&self) -> &str;
}
