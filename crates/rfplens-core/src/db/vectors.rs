//! Vector storage operations
//!
//! Stores embeddings as BLOBs and computes cosine similarity in Rust.

use super::Database;
use crate::error::Result;
use chrono::Utc;
use rusqlite::params;

impl Database {
    /// Insert embedding for a chunk
    pub fn insert_embedding(&self, chunk_id: i64, model: &str, embedding: &[f32]) -> Result<()> {
        let now = Utc::now().to_rfc3339();
        let embedding_bytes = embedding_to_bytes(embedding);

        self.conn.execute(
            "INSERT OR REPLACE INTO embeddings (chunk_id, model, embedding, created_at)
             VALUES (?1, ?2, ?3, ?4)",
            params![chunk_id, model, embedding_bytes, now],
        )?;
        Ok(())
    }

    /// Insert embeddings for a batch of chunks in one transaction
    pub fn insert_embeddings(&self, rows: &[(i64, Vec<f32>)], model: &str) -> Result<()> {
        let now = Utc::now().to_rfc3339();

        self.conn.execute("BEGIN IMMEDIATE", [])?;
        let result = (|| {
            for (chunk_id, embedding) in rows {
                self.conn.execute(
                    "INSERT OR REPLACE INTO embeddings (chunk_id, model, embedding, created_at)
                     VALUES (?1, ?2, ?3, ?4)",
                    params![chunk_id, model, embedding_to_bytes(embedding), now],
                )?;
            }
            Ok(())
        })();

        if result.is_ok() {
            self.conn.execute("COMMIT", [])?;
        } else {
            let _ = self.conn.execute("ROLLBACK", []);
        }
        result
    }

    /// Whether any embeddings are stored
    pub fn has_embeddings(&self) -> bool {
        self.conn
            .query_row("SELECT COUNT(*) FROM embeddings", [], |row| {
                row.get::<_, i64>(0)
            })
            .map(|count| count > 0)
            .unwrap_or(false)
    }

    /// Get all embeddings for similarity search
    pub fn get_all_embeddings(&self) -> Result<Vec<(i64, Vec<f32>)>> {
        let mut stmt = self
            .conn
            .prepare("SELECT chunk_id, embedding FROM embeddings")?;

        let results = stmt
            .query_map([], |row| {
                let chunk_id: i64 = row.get(0)?;
                let embedding_bytes: Vec<u8> = row.get(1)?;
                Ok((chunk_id, bytes_to_embedding(&embedding_bytes)))
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(results)
    }
}

/// Convert f32 embedding to little-endian bytes
pub fn embedding_to_bytes(embedding: &[f32]) -> Vec<u8> {
    embedding.iter().flat_map(|f| f.to_le_bytes()).collect()
}

/// Convert bytes to f32 embedding
pub fn bytes_to_embedding(bytes: &[u8]) -> Vec<f32> {
    bytes
        .chunks_exact(4)
        .map(|chunk| f32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
        .collect()
}

/// Compute cosine similarity between two embeddings
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    dot / (norm_a * norm_b)
}
