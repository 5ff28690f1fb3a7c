//! Embedding provider trait and rate-limit retry wrapper

use std::time::Duration;

use async_trait::async_trait;

use crate::error::{Error, Result};

/// Trait for generating text embeddings
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Generate an embedding for a single text
    async fn embed(&self, text: &str) -> Result<Vec<f32>>;

    /// Get embedding dimensions (e.g. 1536 for text-embedding-3-small)
    fn dimensions(&self) -> usize;

    /// Get provider name for logging
    fn name(&self) -> &str;
}

/// Wraps a provider with bounded exponential backoff on rate limiting.
///
/// A [`Error::RateLimited`] result triggers a sleep of `2^attempt` seconds
/// and a retry, up to `max_retries` attempts, after which the call fails
/// with [`Error::ExhaustedRetries`]. Every other error propagates
/// immediately.
pub struct RetryingEmbedder<P> {
    inner: P,
    max_retries: u32,
}

impl<P: EmbeddingProvider> RetryingEmbedder<P> {
    /// Wrap a provider with the given retry budget
    pub fn new(inner: P, max_retries: u32) -> Self {
        Self {
            inner,
            max_retries: max_retries.max(1),
        }
    }
}

#[async_trait]
impl<P: EmbeddingProvider> EmbeddingProvider for RetryingEmbedder<P> {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        for attempt in 0..self.max_retries {
            match self.inner.embed(text).await {
                Ok(vector) => return Ok(vector),
                Err(Error::RateLimited(message)) => {
                    let wait = Duration::from_secs(1u64 << attempt);
                    tracing::warn!(
                        provider = self.inner.name(),
                        attempt,
                        wait_secs = wait.as_secs(),
                        %message,
                        "rate limited, backing off"
                    );
                    tokio::time::sleep(wait).await;
                }
                Err(other) => return Err(other),
            }
        }

        Err(Error::ExhaustedRetries {
            attempts: self.max_retries,
        })
    }

    fn dimensions(&self) -> usize {
        self.inner.dimensions()
    }

    fn name(&self) -> &str {
        self.inner.name()
    }
}
