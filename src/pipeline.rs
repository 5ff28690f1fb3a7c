//! Sequential ingestion drivers and batch upload

use std::sync::Arc;
use std::time::Duration;

use crate::error::{Error, Result};
use crate::ingestion::{extract_text, parse_records, TextChunker};
use crate::providers::{BlobStore, EmbeddingProvider, SearchIndex};
use crate::transform::{DocumentTransformer, IdSource, UuidSource};
use crate::types::IndexDocument;

/// Fixed pause between batch uploads to smooth the request rate
pub const BATCH_DELAY: Duration = Duration::from_secs(1);

/// Accumulates documents and flushes them to the index in batches.
///
/// A flush fires when the buffer reaches `batch_size`, followed by the
/// inter-batch delay. [`finish`](BatchUploader::finish) flushes whatever
/// remains, skipping the call when the buffer is empty.
pub struct BatchUploader {
    index: Arc<dyn SearchIndex>,
    batch_size: usize,
    delay: Duration,
    buffer: Vec<IndexDocument>,
    uploaded: usize,
}

impl BatchUploader {
    /// Create an uploader flushing every `batch_size` documents
    pub fn new(index: Arc<dyn SearchIndex>, batch_size: usize, delay: Duration) -> Self {
        Self {
            index,
            batch_size: batch_size.max(1),
            delay,
            buffer: Vec::new(),
            uploaded: 0,
        }
    }

    /// Add a document, flushing when the batch threshold is reached
    pub async fn push(&mut self, document: IndexDocument) -> Result<()> {
        self.buffer.push(document);
        if self.buffer.len() >= self.batch_size {
            self.flush().await?;
            tokio::time::sleep(self.delay).await;
        }
        Ok(())
    }

    /// Flush the remainder and return the total number of uploaded documents
    pub async fn finish(mut self) -> Result<usize> {
        if !self.buffer.is_empty() {
            self.flush().await?;
        }
        Ok(self.uploaded)
    }

    async fn flush(&mut self) -> Result<()> {
        tracing::debug!(count = self.buffer.len(), index = self.index.name(), "uploading batch");
        self.index.upload(&self.buffer).await?;
        self.uploaded += self.buffer.len();
        self.buffer.clear();
        tracing::info!(uploaded = self.uploaded, "batch uploaded");
        Ok(())
    }
}

/// Driver for the product records job: blob download, record parsing,
/// transform, embed, batch upload. Strictly sequential; the first
/// unrecoverable failure aborts the run.
pub struct ProductPipeline {
    blob: Arc<dyn BlobStore>,
    embedder: Arc<dyn EmbeddingProvider>,
    index: Arc<dyn SearchIndex>,
    transformer: DocumentTransformer,
    batch_size: usize,
    batch_delay: Duration,
}

impl ProductPipeline {
    /// Create a driver from its collaborators.
    ///
    /// The embedder is expected to already carry its retry policy (see
    /// [`RetryingEmbedder`](crate::providers::RetryingEmbedder)).
    pub fn new(
        blob: Arc<dyn BlobStore>,
        embedder: Arc<dyn EmbeddingProvider>,
        index: Arc<dyn SearchIndex>,
        transformer: DocumentTransformer,
        batch_size: usize,
    ) -> Self {
        Self {
            blob,
            embedder,
            index,
            transformer,
            batch_size,
            batch_delay: BATCH_DELAY,
        }
    }

    /// Override the inter-batch delay
    pub fn with_batch_delay(mut self, delay: Duration) -> Self {
        self.batch_delay = delay;
        self
    }

    /// Run the full ingestion for one blob, returning the number of
    /// uploaded documents
    pub async fn run(&self, container: &str, blob_name: &str) -> Result<usize> {
        let bytes = self.blob.download(container, blob_name).await?;
        let content = String::from_utf8(bytes)
            .map_err(|e| Error::file_parse(blob_name, e.to_string()))?;
        let records = parse_records(blob_name, &content)?;
        tracing::info!(count = records.len(), blob = blob_name, "loaded records");

        let mut uploader =
            BatchUploader::new(self.index.clone(), self.batch_size, self.batch_delay);

        for record in &records {
            let mut document = self.transformer.transform(record);
            document.text_vector = self.embedder.embed(&document.chunk).await?;
            uploader.push(document).await?;
        }

        let uploaded = uploader.finish().await?;
        tracing::info!(uploaded, "ingestion complete");
        Ok(uploaded)
    }
}

/// Driver for the report job: fetch a PDF over HTTP, extract its text,
/// split into overlapping chunks, embed and batch upload.
pub struct ReportPipeline {
    http: reqwest::Client,
    embedder: Arc<dyn EmbeddingProvider>,
    index: Arc<dyn SearchIndex>,
    chunker: TextChunker,
    ids: Box<dyn IdSource>,
    batch_size: usize,
    batch_delay: Duration,
}

impl ReportPipeline {
    /// Create a driver from its collaborators
    pub fn new(
        embedder: Arc<dyn EmbeddingProvider>,
        index: Arc<dyn SearchIndex>,
        chunker: TextChunker,
        batch_size: usize,
    ) -> Self {
        Self {
            http: reqwest::Client::new(),
            embedder,
            index,
            chunker,
            ids: Box::new(UuidSource),
            batch_size,
            batch_delay: BATCH_DELAY,
        }
    }

    /// Replace the identifier source
    pub fn with_id_source(mut self, ids: Box<dyn IdSource>) -> Self {
        self.ids = ids;
        self
    }

    /// Override the inter-batch delay
    pub fn with_batch_delay(mut self, delay: Duration) -> Self {
        self.batch_delay = delay;
        self
    }

    /// Fetch the report, ingest every chunk, and return the number of
    /// uploaded documents
    pub async fn run(&self, url: &str) -> Result<usize> {
        tracing::info!(url, "fetching report");
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| Error::storage(format!("report download failed: {e}")))?;

        if !response.status().is_success() {
            return Err(Error::storage(format!(
                "report download for '{url}' returned {}",
                response.status()
            )));
        }

        let data = response
            .bytes()
            .await
            .map_err(|e| Error::storage(format!("report body read failed: {e}")))?;
        let text = extract_text(url, &data)?;

        self.ingest_text(url, &text).await
    }

    /// Split already-extracted text and upload one document per chunk
    pub async fn ingest_text(&self, title: &str, text: &str) -> Result<usize> {
        let chunks = self.chunker.split(text);
        tracing::info!(count = chunks.len(), title, "split report into chunks");

        let mut uploader =
            BatchUploader::new(self.index.clone(), self.batch_size, self.batch_delay);

        for chunk in chunks {
            let text_vector = self.embedder.embed(&chunk).await?;
            uploader
                .push(IndexDocument {
                    chunk_id: self.ids.next_id(),
                    parent_id: String::new(),
                    title: Some(title.to_string()),
                    main_category: None,
                    sub_category: None,
                    chunk,
                    text_vector,
                })
                .await?;
        }

        let uploaded = uploader.finish().await?;
        tracing::info!(uploaded, "report ingestion complete");
        Ok(uploaded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use crate::transform::ChunkTemplate;

    /// Records the size of every upload call
    struct RecordingIndex {
        calls: Mutex<Vec<Vec<IndexDocument>>>,
    }

    impl RecordingIndex {
        fn new() -> Arc<Self> {
            Arc::new(Self {
                calls: Mutex::new(Vec::new()),
            })
        }

        fn call_sizes(&self) -> Vec<usize> {
            self.calls.lock().unwrap().iter().map(|batch| batch.len()).collect()
        }
    }

    #[async_trait]
    impl SearchIndex for RecordingIndex {
        async fn upload(&self, documents: &[IndexDocument]) -> Result<()> {
            self.calls.lock().unwrap().push(documents.to_vec());
            Ok(())
        }

        fn name(&self) -> &str {
            "recording"
        }
    }

    struct FakeEmbedder {
        dims: usize,
    }

    #[async_trait]
    impl EmbeddingProvider for FakeEmbedder {
        async fn embed(&self, _text: &str) -> Result<Vec<f32>> {
            Ok(vec![0.0; self.dims])
        }

        fn dimensions(&self) -> usize {
            self.dims
        }

        fn name(&self) -> &str {
            "fake"
        }
    }

    struct StaticBlob {
        content: &'static str,
    }

    #[async_trait]
    impl BlobStore for StaticBlob {
        async fn download(&self, _container: &str, _blob: &str) -> Result<Vec<u8>> {
            Ok(self.content.as_bytes().to_vec())
        }

        fn name(&self) -> &str {
            "static"
        }
    }

    fn doc(i: usize) -> IndexDocument {
        IndexDocument {
            chunk_id: format!("c{i}"),
            parent_id: String::new(),
            title: None,
            main_category: None,
            sub_category: None,
            chunk: format!("chunk {i}"),
            text_vector: Vec::new(),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_batch_flushes_at_threshold_with_remainder() {
        let index = RecordingIndex::new();
        let mut uploader = BatchUploader::new(index.clone(), 100, BATCH_DELAY);

        for i in 0..250 {
            uploader.push(doc(i)).await.unwrap();
        }
        let uploaded = uploader.finish().await.unwrap();

        assert_eq!(uploaded, 250);
        assert_eq!(index.call_sizes(), vec![100, 100, 50]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_empty_remainder_skips_the_final_upload() {
        let index = RecordingIndex::new();
        let mut uploader = BatchUploader::new(index.clone(), 100, BATCH_DELAY);

        for i in 0..200 {
            uploader.push(doc(i)).await.unwrap();
        }
        let uploaded = uploader.finish().await.unwrap();

        assert_eq!(uploaded, 200);
        assert_eq!(index.call_sizes(), vec![100, 100]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_products_end_to_end() {
        let index = RecordingIndex::new();
        let pipeline = ProductPipeline::new(
            Arc::new(StaticBlob {
                content: "name,parent_id\nA,p1\nB,p2\nC,\n",
            }),
            Arc::new(FakeEmbedder { dims: 8 }),
            index.clone(),
            DocumentTransformer::new(ChunkTemplate::default()),
            100,
        );

        let uploaded = pipeline.run("data", "products.csv").await.unwrap();
        assert_eq!(uploaded, 3);

        let calls = index.calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        let docs = &calls[0];
        assert_eq!(docs[0].chunk, "A. ");
        assert_eq!(docs[1].chunk, "B. ");
        assert_eq!(docs[2].chunk, "C. ");
        assert_eq!(docs[0].parent_id, "p1");
        assert_eq!(docs[2].parent_id, "");
        assert!(docs.iter().all(|d| d.text_vector.len() == 8));
    }

    #[tokio::test]
    async fn test_products_abort_on_unsupported_format() {
        let index = RecordingIndex::new();
        let pipeline = ProductPipeline::new(
            Arc::new(StaticBlob { content: "raw" }),
            Arc::new(FakeEmbedder { dims: 8 }),
            index.clone(),
            DocumentTransformer::new(ChunkTemplate::default()),
            100,
        );

        let err = pipeline.run("data", "products.xml").await.unwrap_err();
        assert!(matches!(err, Error::UnsupportedFormat(_)));
        assert!(index.call_sizes().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_report_chunks_are_uploaded_with_title() {
        let index = RecordingIndex::new();
        let pipeline = ReportPipeline::new(
            Arc::new(FakeEmbedder { dims: 8 }),
            index.clone(),
            TextChunker::new(10, 0),
            100,
        );

        let uploaded = pipeline
            .ingest_text("https://reports.example.com/annual.pdf", "abcdefghijklmnop")
            .await
            .unwrap();
        assert_eq!(uploaded, 2);

        let calls = index.calls.lock().unwrap();
        let docs = &calls[0];
        assert_eq!(docs[0].chunk, "abcdefghij");
        assert_eq!(
            docs[0].title.as_deref(),
            Some("https://reports.example.com/annual.pdf")
        );
        assert_eq!(docs[0].parent_id, "");
        assert_eq!(docs[0].text_vector.len(), 8);
    }
}
