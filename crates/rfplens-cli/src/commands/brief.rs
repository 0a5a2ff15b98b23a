//! Brief command: generate or refine an executive brief

use crate::app::BriefArgs;
use crate::AppContext;
use anyhow::Result;
use rfplens_core::agent::BriefWriter;

pub async fn run(args: BriefArgs, ctx: &AppContext) -> Result<()> {
    let client = super::llm_client(ctx)?;
    let writer = BriefWriter::new(
        client.clone(),
        super::retriever(ctx, client),
        ctx.config.retrieval.brief_top_k,
        ctx.config.agent.context_budget_chars,
    );

    let brief = match args.refine {
        Some(ref draft_path) => {
            let draft = std::fs::read_to_string(draft_path)?;
            let feedback = args
                .feedback
                .as_deref()
                .ok_or_else(|| anyhow::anyhow!("--feedback is required with --refine"))?;
            writer.refine(&draft, feedback).await?
        }
        None => writer.generate().await?,
    };

    println!("{}", brief);
    Ok(())
}
