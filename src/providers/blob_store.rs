//! Blob storage provider for source files

use async_trait::async_trait;

use crate::config::BlobSettings;
use crate::error::{Error, Result};

/// A store holding the raw source files to ingest
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Download the full content of a blob. No streaming; the whole
    /// payload is memory-resident.
    async fn download(&self, container: &str, blob: &str) -> Result<Vec<u8>>;

    /// Provider name for logging
    fn name(&self) -> &str;
}

/// Blob store client speaking plain HTTP with a shared access signature
pub struct HttpBlobStore {
    client: reqwest::Client,
    account_url: String,
    sas_token: String,
}

impl HttpBlobStore {
    /// Create a new client from blob settings
    pub fn new(settings: &BlobSettings) -> Self {
        Self {
            client: reqwest::Client::new(),
            account_url: settings.account_url.trim_end_matches('/').to_string(),
            sas_token: settings.sas_token.trim_start_matches('?').to_string(),
        }
    }

    fn blob_url(&self, container: &str, blob: &str) -> String {
        format!("{}/{}/{}?{}", self.account_url, container, blob, self.sas_token)
    }
}

#[async_trait]
impl BlobStore for HttpBlobStore {
    async fn download(&self, container: &str, blob: &str) -> Result<Vec<u8>> {
        let url = self.blob_url(container, blob);
        tracing::debug!(container, blob, "downloading blob");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| Error::storage(format!("blob download failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::storage(format!(
                "blob download for '{container}/{blob}' returned {status}: {body}"
            )));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| Error::storage(format!("blob body read failed: {e}")))?;

        Ok(bytes.to_vec())
    }

    fn name(&self) -> &str {
        "http-blob"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BlobSettings;

    #[test]
    fn test_blob_url_strips_stray_separators() {
        let store = HttpBlobStore::new(&BlobSettings {
            account_url: "https://acct.blob.example.net/".to_string(),
            sas_token: "?sv=2024&sig=abc".to_string(),
            container: "data".to_string(),
            blob: "products.csv".to_string(),
        });

        assert_eq!(
            store.blob_url("data", "products.csv"),
            "https://acct.blob.example.net/data/products.csv?sv=2024&sig=abc"
        );
    }
}
