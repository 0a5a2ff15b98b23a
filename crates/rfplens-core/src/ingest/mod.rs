//! PDF ingestion pipeline
//!
//! extract text -> derive title -> hash -> chunk -> embed -> persist

pub mod chunker;
pub mod pdf;

pub use chunker::{chunk_by_chars, Chunk, CHUNK_OVERLAP_CHARS, CHUNK_SIZE_CHARS};
pub use pdf::{validate_pdf_filename, PdfExtractor};

use crate::config::IngestConfig;
use crate::db::{hash_content, Database};
use crate::error::Result;
use crate::llm::Embedder;
use std::path::Path;
use std::sync::{Arc, Mutex};

/// Outcome of one ingestion run
#[derive(Debug, Clone, Default)]
pub struct IngestReport {
    pub documents: usize,
    pub chunks: usize,
    pub skipped: usize,
}

/// Drives the ingestion pipeline against the store and embedding service
pub struct Ingestor {
    db: Arc<Mutex<Database>>,
    embedder: Arc<dyn Embedder>,
    extractor: PdfExtractor,
    config: IngestConfig,
}

impl Ingestor {
    pub fn new(db: Arc<Mutex<Database>>, embedder: Arc<dyn Embedder>, config: IngestConfig) -> Self {
        Self {
            db,
            embedder,
            extractor: PdfExtractor::new(),
            config,
        }
    }

    /// Ingest a single PDF from raw bytes (e.g. an HTTP upload)
    pub async fn ingest_bytes(&self, filename: &str, bytes: &[u8]) -> Result<IngestReport> {
        validate_pdf_filename(filename)?;
        let content = self.extractor.extract_text(bytes, filename)?;
        self.ingest_content(filename, &content).await
    }

    /// Ingest a single PDF file from disk
    pub async fn ingest_path(&self, path: &Path) -> Result<IngestReport> {
        validate_pdf_filename(&path.to_string_lossy())?;
        let content = self.extractor.extract_text_from_path(path)?;
        self.ingest_content(&path.to_string_lossy(), &content).await
    }

    /// Ingest every matching PDF under a directory, skipping files that fail
    /// to parse.
    pub async fn ingest_dir(&self, base: &Path, pattern: &str) -> Result<IngestReport> {
        let mut report = IngestReport::default();

        for path in self.extractor.scan_directory(base, pattern)? {
            match self.ingest_path(&path).await {
                Ok(one) => {
                    report.documents += one.documents;
                    report.chunks += one.chunks;
                }
                Err(e) if !e.is_collaborator_failure() => {
                    tracing::warn!("Skipping PDF {:?}: {}", path, e);
                    report.skipped += 1;
                }
                Err(e) => return Err(e),
            }
        }

        Ok(report)
    }

    async fn ingest_content(&self, filename: &str, content: &str) -> Result<IngestReport> {
        let title = self.extractor.extract_title(content, filename);
        let hash = hash_content(content);

        let chunks = chunk_by_chars(content, self.config.chunk_size, self.config.chunk_overlap);
        let texts: Vec<String> = chunks.iter().map(|c| c.text.clone()).collect();

        tracing::info!(
            "Ingesting {} ({} chunks, model {})",
            filename,
            chunks.len(),
            self.embedder.model_name()
        );

        let embeddings = self.embedder.embed_batch(&texts).await?;

        let rows: Vec<(usize, String)> = chunks
            .into_iter()
            .map(|c| (c.position, c.text))
            .collect();

        let db = self.db.lock().unwrap_or_else(|e| e.into_inner());
        let doc_id = db.insert_document(filename, &title, &hash, &rows)?;
        let chunk_ids = db.chunk_ids(doc_id)?;

        let embedding_rows: Vec<(i64, Vec<f32>)> =
            chunk_ids.into_iter().zip(embeddings).collect();
        db.insert_embeddings(&embedding_rows, self.embedder.model_name())?;

        Ok(IngestReport {
            documents: 1,
            chunks: rows.len(),
            skipped: 0,
        })
    }
}
