//! Report command: render a saved chat history to markdown

use crate::app::ReportArgs;
use anyhow::{Context, Result};
use rfplens_core::agent::{render_report, HistoryTurn};

pub async fn run(args: ReportArgs) -> Result<()> {
    let raw = std::fs::read_to_string(&args.history)
        .with_context(|| format!("Failed to read {:?}", args.history))?;
    let history: Vec<HistoryTurn> =
        serde_json::from_str(&raw).context("History file must be a JSON array of {role, content}")?;

    let markdown = render_report(&history);
    std::fs::write(&args.out, markdown)?;

    println!("Report written to {:?}", args.out);
    Ok(())
}
