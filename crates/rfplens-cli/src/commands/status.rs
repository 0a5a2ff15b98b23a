//! Status command: index overview

use crate::AppContext;
use anyhow::Result;

pub async fn run(ctx: &AppContext) -> Result<()> {
    let db = ctx.db.lock().unwrap_or_else(|e| e.into_inner());

    let documents = db.list_documents()?;
    println!(
        "{} document(s), {} chunk(s) indexed, vector index {}",
        documents.len(),
        db.chunk_count()?,
        if db.has_embeddings() { "ready" } else { "empty" }
    );

    for doc in documents {
        println!(
            "  {}  ({} chunks)  {}",
            doc.title, doc.chunk_count, doc.filename
        );
    }

    Ok(())
}
