//! Ask command: retrieve context and run the revision loop

use crate::app::AskArgs;
use crate::AppContext;
use anyhow::Result;
use rfplens_core::agent::{Analyst, RevisionLoop, RevisionOptions, TerminalState};

pub async fn run(args: AskArgs, ctx: &AppContext) -> Result<()> {
    let question = args.question_text();
    if question.trim().is_empty() {
        anyhow::bail!("No question given");
    }

    let client = super::llm_client(ctx)?;
    let analyst = Analyst::new(
        super::retriever(ctx, client.clone()),
        RevisionLoop::new(client, RevisionOptions::from(&ctx.config.agent)),
        ctx.config.retrieval.top_k,
    );

    let outcome = analyst.ask(&question).await?;

    println!("{}", outcome.answer);
    println!();
    if outcome.state == TerminalState::Exhausted {
        println!(
            "[unapproved: revision budget exhausted after {} cycle(s)]",
            outcome.revisions
        );
    }
    if !outcome.sources.is_empty() {
        println!("Sources: {}", outcome.sources.join(", "));
    }

    Ok(())
}
