//! Chat command: route the question and answer in the matching persona

use crate::app::AskArgs;
use crate::AppContext;
use anyhow::Result;
use rfplens_core::agent::{ChatPipeline, Router};

pub async fn run(args: AskArgs, ctx: &AppContext) -> Result<()> {
    let question = args.question_text();
    if question.trim().is_empty() {
        anyhow::bail!("No question given");
    }

    let client = super::llm_client(ctx)?;
    let pipeline = ChatPipeline::new(
        Router::from_config(client.clone(), &ctx.config.agent),
        super::retriever(ctx, client.clone()),
        client,
        &ctx.config.agent,
        ctx.config.retrieval.top_k,
    );

    let outcome = pipeline.respond(&question, &[]).await?;

    println!("[{}]", outcome.category);
    println!("{}", outcome.answer);
    if !outcome.sources.is_empty() {
        println!();
        println!("Sources: {}", outcome.sources.join(", "));
    }

    Ok(())
}
