//! Vector retrieval over the ingested corpus
//!
//! Embeds the question and ranks stored chunk embeddings by cosine
//! similarity. Retrieval order is the provider's similarity ranking; callers
//! concatenate passages in this order.

use crate::db::{cosine_similarity, Database};
use crate::error::{Result, RfpLensError};
use crate::llm::Embedder;
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

/// One retrieved context passage
#[derive(Debug, Clone, PartialEq)]
pub struct Passage {
    pub text: String,
    /// Title of the source document
    pub source: String,
    pub score: f32,
}

/// Retrieval collaborator
///
/// Fails with `RetrievalUnavailable` when the backing store cannot serve the
/// query; empty context is never substituted silently.
#[async_trait]
pub trait Retriever: Send + Sync {
    /// Return the `limit` most relevant passages for a question
    async fn retrieve(&self, question: &str, limit: usize) -> Result<Vec<Passage>>;
}

/// Brute-force cosine retriever over the SQLite store
pub struct VectorRetriever {
    db: Arc<Mutex<Database>>,
    embedder: Arc<dyn Embedder>,
    min_score: f32,
}

impl VectorRetriever {
    pub fn new(db: Arc<Mutex<Database>>, embedder: Arc<dyn Embedder>, min_score: f32) -> Self {
        Self {
            db,
            embedder,
            min_score,
        }
    }
}

#[async_trait]
impl Retriever for VectorRetriever {
    async fn retrieve(&self, question: &str, limit: usize) -> Result<Vec<Passage>> {
        let query_embedding = self
            .embedder
            .embed(question)
            .await
            .map_err(|e| RfpLensError::RetrievalUnavailable(e.to_string()))?;

        let mut similarities = {
            let db = self.db.lock().unwrap_or_else(|e| e.into_inner());
            let stored = db
                .get_all_embeddings()
                .map_err(|e| RfpLensError::RetrievalUnavailable(e.to_string()))?;

            if stored.is_empty() {
                return Err(RfpLensError::RetrievalUnavailable(
                    "No documents have been ingested".to_string(),
                ));
            }

            stored
                .into_iter()
                .map(|(chunk_id, embedding)| {
                    (chunk_id, cosine_similarity(&query_embedding, &embedding))
                })
                .collect::<Vec<_>>()
        };

        similarities.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

        let db = self.db.lock().unwrap_or_else(|e| e.into_inner());
        let mut passages = Vec::new();
        for (chunk_id, score) in similarities.into_iter().take(limit) {
            if score < self.min_score {
                continue;
            }
            let chunk = db
                .get_chunk(chunk_id)
                .map_err(|e| RfpLensError::RetrievalUnavailable(e.to_string()))?;
            passages.push(Passage {
                text: chunk.text,
                source: chunk.document_title,
                score,
            });
        }

        tracing::debug!("Retrieved {} passages for question", passages.len());
        Ok(passages)
    }
}
