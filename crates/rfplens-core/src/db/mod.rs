//! Storage layer for rfplens
//!
//! SQLite-backed store for ingested RFP documents:
//! - documents, content-addressed by SHA-256 of extracted text
//! - overlapping text chunks per document
//! - per-chunk embeddings stored as f32 little-endian BLOBs

mod documents;
mod schema;
pub mod vectors;

pub use documents::{DocumentInfo, StoredChunk};
pub use schema::Database;
pub use vectors::cosine_similarity;

use sha2::{Digest, Sha256};
use std::path::PathBuf;

/// SHA-256 hex digest of document content
pub fn hash_content(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    format!("{:x}", hasher.finalize())
}

impl Database {
    /// Get the default database path
    pub fn default_path() -> PathBuf {
        dirs::cache_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(crate::CACHE_DIR_NAME)
            .join("index.sqlite")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_content_stable() {
        let a = hash_content("Requirement 1: the system shall respond.");
        let b = hash_content("Requirement 1: the system shall respond.");
        assert_eq!(a, b);
        assert_eq!(a.len(), 64);
    }

    #[test]
    fn test_hash_content_differs() {
        assert_ne!(hash_content("a"), hash_content("b"));
    }
}
