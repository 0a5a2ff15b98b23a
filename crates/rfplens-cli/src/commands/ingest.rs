//! Ingest command

use crate::app::IngestArgs;
use crate::AppContext;
use anyhow::Result;
use rfplens_core::ingest::Ingestor;

pub async fn run(args: IngestArgs, ctx: &AppContext) -> Result<()> {
    let client = super::llm_client(ctx)?;
    let ingestor = Ingestor::new(ctx.db.clone(), client, ctx.config.ingest.clone());

    let report = if args.path.is_dir() {
        let pattern = args
            .pattern
            .clone()
            .unwrap_or_else(|| ctx.config.ingest.pattern.clone());
        ingestor.ingest_dir(&args.path, &pattern).await?
    } else {
        ingestor.ingest_path(&args.path).await?
    };

    println!(
        "Ingested {} document(s), {} chunk(s)",
        report.documents, report.chunks
    );
    if report.skipped > 0 {
        println!("Skipped {} unparseable file(s)", report.skipped);
    }

    Ok(())
}
