//! Azure OpenAI embedding provider

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

use crate::config::EmbeddingSettings;
use crate::error::{Error, Result};
use crate::providers::embedding::EmbeddingProvider;

/// Embedding provider backed by an Azure OpenAI deployment.
///
/// Calls the deployment's `/embeddings` operation directly over REST.
/// An HTTP 429 surfaces as [`Error::RateLimited`] so the retry wrapper
/// can back off; every other failure is terminal.
pub struct AzureEmbedder {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
    model: String,
    dimensions: usize,
}

impl AzureEmbedder {
    /// Create a new embedder from deployment settings
    pub fn new(settings: &EmbeddingSettings) -> Self {
        let endpoint = format!(
            "{}/openai/deployments/{}/embeddings?api-version={}",
            settings.endpoint.trim_end_matches('/'),
            settings.deployment,
            settings.api_version
        );

        Self {
            client: reqwest::Client::new(),
            endpoint,
            api_key: settings.api_key.clone(),
            model: settings.deployment.clone(),
            dimensions: settings.dimensions,
        }
    }
}

#[derive(Serialize)]
struct EmbeddingRequest<'a> {
    model: &'a str,
    input: &'a str,
}

#[derive(Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingData>,
}

#[derive(Deserialize)]
struct EmbeddingData {
    embedding: Vec<f32>,
}

#[async_trait]
impl EmbeddingProvider for AzureEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let request = EmbeddingRequest {
            model: &self.model,
            input: text,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .header("api-key", &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::embedding(format!("embedding request failed: {e}")))?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::RateLimited(body));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::embedding(format!(
                "embedding request returned {status}: {body}"
            )));
        }

        let parsed: EmbeddingResponse = response
            .json()
            .await
            .map_err(|e| Error::embedding(format!("failed to parse embedding response: {e}")))?;

        parsed
            .data
            .into_iter()
            .next()
            .map(|entry| entry.embedding)
            .ok_or_else(|| Error::embedding("no embedding in response"))
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn name(&self) -> &str {
        "azure-openai"
    }
}
