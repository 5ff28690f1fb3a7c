//! Azure AI Search index client

use async_trait::async_trait;
use serde::Serialize;

use crate::config::SearchSettings;
use crate::error::{Error, Result};
use crate::providers::search_index::SearchIndex;
use crate::types::IndexDocument;

/// Search index client speaking the bulk `docs/index` REST operation
pub struct AzureSearchIndex {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
}

impl AzureSearchIndex {
    /// Create a new client from search settings
    pub fn new(settings: &SearchSettings) -> Self {
        let endpoint = format!(
            "{}/indexes/{}/docs/index?api-version={}",
            settings.endpoint.trim_end_matches('/'),
            settings.index,
            settings.api_version
        );

        Self {
            client: reqwest::Client::new(),
            endpoint,
            api_key: settings.api_key.clone(),
        }
    }
}

#[derive(Serialize)]
struct UploadBatch<'a> {
    value: Vec<UploadAction<'a>>,
}

#[derive(Serialize)]
struct UploadAction<'a> {
    #[serde(rename = "@search.action")]
    action: &'static str,
    #[serde(flatten)]
    document: &'a IndexDocument,
}

#[async_trait]
impl SearchIndex for AzureSearchIndex {
    async fn upload(&self, documents: &[IndexDocument]) -> Result<()> {
        if documents.is_empty() {
            return Ok(());
        }

        let batch = UploadBatch {
            value: documents
                .iter()
                .map(|document| UploadAction {
                    action: "upload",
                    document,
                })
                .collect(),
        };

        let response = self
            .client
            .post(&self.endpoint)
            .header("api-key", &self.api_key)
            .json(&batch)
            .send()
            .await
            .map_err(|e| Error::index(format!("upload request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::index(format!(
                "upload of {} documents returned {status}: {body}",
                documents.len()
            )));
        }

        Ok(())
    }

    fn name(&self) -> &str {
        "azure-search"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upload_action_wire_format() {
        let document = IndexDocument {
            chunk_id: "c1".to_string(),
            parent_id: "p1".to_string(),
            title: None,
            main_category: Some("electronics".to_string()),
            sub_category: Some(String::new()),
            chunk: "A. ".to_string(),
            text_vector: vec![0.1, 0.2],
        };

        let batch = UploadBatch {
            value: vec![UploadAction {
                action: "upload",
                document: &document,
            }],
        };

        let json = serde_json::to_value(&batch).unwrap();
        let entry = &json["value"][0];
        assert_eq!(entry["@search.action"], "upload");
        assert_eq!(entry["chunk_id"], "c1");
        assert_eq!(entry["parent_id"], "p1");
        assert_eq!(entry["main_category"], "electronics");
        assert!(entry.get("title").is_none());
    }
}
