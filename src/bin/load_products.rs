//! Product records ingestion job
//!
//! Run with: cargo run --bin load-products

use std::sync::Arc;

use searchfeed::config::{BlobSettings, EmbeddingSettings, PipelineSettings, SearchSettings};
use searchfeed::pipeline::ProductPipeline;
use searchfeed::providers::azure::{AzureEmbedder, AzureSearchIndex};
use searchfeed::providers::{HttpBlobStore, RetryingEmbedder};
use searchfeed::transform::{ChunkTemplate, DocumentTransformer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "searchfeed=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let embedding = EmbeddingSettings::from_env()?;
    let search = SearchSettings::from_env()?;
    let blob = BlobSettings::from_env()?;
    let settings = PipelineSettings::from_env()?;

    tracing::info!("Configuration loaded");
    tracing::info!("  - Embedding deployment: {}", embedding.deployment);
    tracing::info!("  - Embedding dimensions: {}", embedding.dimensions);
    tracing::info!("  - Search index: {}", search.index);
    tracing::info!("  - Source blob: {}/{}", blob.container, blob.blob);
    tracing::info!("  - Batch size: {}", settings.batch_size);

    let embedder = RetryingEmbedder::new(AzureEmbedder::new(&embedding), embedding.max_retries);

    let pipeline = ProductPipeline::new(
        Arc::new(HttpBlobStore::new(&blob)),
        Arc::new(embedder),
        Arc::new(AzureSearchIndex::new(&search)),
        DocumentTransformer::new(ChunkTemplate::default()),
        settings.batch_size,
    );

    let uploaded = pipeline.run(&blob.container, &blob.blob).await?;
    tracing::info!(uploaded, "done");

    Ok(())
}
