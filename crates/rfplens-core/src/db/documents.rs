//! Document and chunk storage operations

use super::Database;
use crate::error::{Result, RfpLensError};
use chrono::Utc;
use rusqlite::{params, OptionalExtension};

/// Summary of a stored document
#[derive(Debug, Clone)]
pub struct DocumentInfo {
    pub id: i64,
    pub filename: String,
    pub title: String,
    pub hash: String,
    pub chunk_count: usize,
    pub created_at: String,
}

/// A chunk row joined with its parent document title
#[derive(Debug, Clone)]
pub struct StoredChunk {
    pub id: i64,
    pub document_title: String,
    pub seq: u32,
    pub text: String,
}

impl Database {
    /// Insert a document with its chunks in one transaction.
    ///
    /// Re-ingesting identical content (same hash) replaces the prior
    /// document row and all of its chunks and embeddings.
    pub fn insert_document(
        &self,
        filename: &str,
        title: &str,
        hash: &str,
        chunks: &[(usize, String)],
    ) -> Result<i64> {
        let now = Utc::now().to_rfc3339();

        self.conn.execute("BEGIN IMMEDIATE", [])?;
        let result = (|| {
            self.conn
                .execute("DELETE FROM documents WHERE hash = ?1", params![hash])?;
            self.conn.execute(
                "INSERT INTO documents (filename, title, hash, created_at)
                 VALUES (?1, ?2, ?3, ?4)",
                params![filename, title, hash, now],
            )?;
            let doc_id = self.conn.last_insert_rowid();

            for (seq, (pos, text)) in chunks.iter().enumerate() {
                self.conn.execute(
                    "INSERT INTO chunks (document_id, seq, pos, text)
                     VALUES (?1, ?2, ?3, ?4)",
                    params![doc_id, seq as i64, *pos as i64, text],
                )?;
            }
            Ok(doc_id)
        })();

        if result.is_ok() {
            self.conn.execute("COMMIT", [])?;
        } else {
            let _ = self.conn.execute("ROLLBACK", []);
        }
        result
    }

    /// Chunk ids for a document, in sequence order
    pub fn chunk_ids(&self, document_id: i64) -> Result<Vec<i64>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id FROM chunks WHERE document_id = ?1 ORDER BY seq")?;
        let ids = stmt
            .query_map(params![document_id], |row| row.get(0))?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(ids)
    }

    /// Fetch a chunk with its parent document title
    pub fn get_chunk(&self, chunk_id: i64) -> Result<StoredChunk> {
        self.conn
            .query_row(
                "SELECT c.id, d.title, c.seq, c.text
                 FROM chunks c
                 JOIN documents d ON d.id = c.document_id
                 WHERE c.id = ?1",
                params![chunk_id],
                |row| {
                    Ok(StoredChunk {
                        id: row.get(0)?,
                        document_title: row.get(1)?,
                        seq: row.get::<_, i64>(2)? as u32,
                        text: row.get(3)?,
                    })
                },
            )
            .optional()?
            .ok_or_else(|| RfpLensError::DocumentNotFound(format!("chunk {}", chunk_id)))
    }

    /// List all stored documents with chunk counts
    pub fn list_documents(&self) -> Result<Vec<DocumentInfo>> {
        let mut stmt = self.conn.prepare(
            "SELECT d.id, d.filename, d.title, d.hash, d.created_at,
                    (SELECT COUNT(*) FROM chunks c WHERE c.document_id = d.id)
             FROM documents d
             ORDER BY d.created_at",
        )?;

        let docs = stmt
            .query_map([], |row| {
                Ok(DocumentInfo {
                    id: row.get(0)?,
                    filename: row.get(1)?,
                    title: row.get(2)?,
                    hash: row.get(3)?,
                    created_at: row.get(4)?,
                    chunk_count: row.get::<_, i64>(5)? as usize,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(docs)
    }

    /// Number of stored documents
    pub fn document_count(&self) -> Result<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM documents", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// Number of stored chunks
    pub fn chunk_count(&self) -> Result<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM chunks", [], |row| row.get(0))?;
        Ok(count as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_db() -> Database {
        let db = Database::open_in_memory().unwrap();
        db.initialize().unwrap();
        db
    }

    #[test]
    fn test_insert_and_list() {
        let db = test_db();
        let chunks = vec![(0, "Requirement 1".to_string()), (10, "Requirement 2".to_string())];
        let id = db
            .insert_document("rfp.pdf", "City RFP", "abc123", &chunks)
            .unwrap();
        assert!(id > 0);

        let docs = db.list_documents().unwrap();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].title, "City RFP");
        assert_eq!(docs[0].chunk_count, 2);
        assert_eq!(db.chunk_count().unwrap(), 2);
    }

    #[test]
    fn test_reingest_same_hash_replaces() {
        let db = test_db();
        let chunks = vec![(0, "old".to_string())];
        db.insert_document("a.pdf", "A", "samehash", &chunks).unwrap();
        let chunks = vec![(0, "new 1".to_string()), (5, "new 2".to_string())];
        db.insert_document("a.pdf", "A", "samehash", &chunks).unwrap();

        assert_eq!(db.document_count().unwrap(), 1);
        assert_eq!(db.chunk_count().unwrap(), 2);
    }

    #[test]
    fn test_get_chunk_joins_title() {
        let db = test_db();
        let doc_id = db
            .insert_document("b.pdf", "Bridge RFP", "h", &[(0, "span load".to_string())])
            .unwrap();
        let ids = db.chunk_ids(doc_id).unwrap();
        assert_eq!(ids.len(), 1);

        let chunk = db.get_chunk(ids[0]).unwrap();
        assert_eq!(chunk.document_title, "Bridge RFP");
        assert_eq!(chunk.text, "span load");
    }

    #[test]
    fn test_get_missing_chunk() {
        let db = test_db();
        let err = db.get_chunk(999).unwrap_err();
        assert!(matches!(err, RfpLensError::DocumentNotFound(_)));
    }
}
