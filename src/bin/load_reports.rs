//! PDF report ingestion job
//!
//! Run with: cargo run --bin load-reports

use std::sync::Arc;

use searchfeed::config::{EmbeddingSettings, PipelineSettings, ReportSettings, SearchSettings};
use searchfeed::ingestion::TextChunker;
use searchfeed::pipeline::ReportPipeline;
use searchfeed::providers::azure::{AzureEmbedder, AzureSearchIndex};
use searchfeed::providers::RetryingEmbedder;
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
    let report = ReportSettings::from_env()?;
    let settings = PipelineSettings::from_env()?;

    tracing::info!("Configuration loaded");
    tracing::info!("  - Embedding deployment: {}", embedding.deployment);
    tracing::info!("  - Search index: {}", search.index);
    tracing::info!("  - Report URL: {}", report.url);
    tracing::info!(
        "  - Chunking: {} chars, {} overlap",
        report.chunk_size,
        report.chunk_overlap
    );

    let embedder = RetryingEmbedder::new(AzureEmbedder::new(&embedding), embedding.max_retries);

    let pipeline = ReportPipeline::new(
        Arc::new(embedder),
        Arc::new(AzureSearchIndex::new(&search)),
        TextChunker::new(report.chunk_size, report.chunk_overlap),
        settings.batch_size,
    );

    let uploaded = pipeline.run(&report.url).await?;
    tracing::info!(uploaded, "done");

    Ok(())
}
