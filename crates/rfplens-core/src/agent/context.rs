//! Context assembly for prompts
//!
//! Passages are concatenated in retrieval order; history turns are rendered
//! chronologically as `ROLE: content` lines. The character budget is an
//! explicit configuration knob, applied here and logged when it truncates.

use crate::agent::state::HistoryTurn;
use crate::ingest::chunker::floor_char_boundary;
use crate::retrieval::Passage;

/// Join retrieved passages into one context block, in retrieval order.
/// No deduplication or reordering.
pub fn format_passages(passages: &[Passage]) -> String {
    passages
        .iter()
        .map(|p| p.text.as_str())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Render the last `last_n` history turns, chronological, one per line.
pub fn format_history(history: &[HistoryTurn], last_n: usize) -> String {
    let start = history.len().saturating_sub(last_n);
    let mut out = String::new();
    for turn in &history[start..] {
        out.push_str(&turn.role.to_uppercase());
        out.push_str(": ");
        out.push_str(&turn.content);
        out.push('\n');
    }
    out
}

/// Apply the context character budget, keeping the head of the block.
pub fn apply_budget(block: String, budget_chars: usize) -> String {
    if block.len() <= budget_chars {
        return block;
    }

    let cut = floor_char_boundary(&block, budget_chars);
    tracing::debug!(
        "Context block truncated from {} to {} bytes",
        block.len(),
        cut
    );
    block[..cut].to_string()
}

/// Collect deduplicated, sorted source titles from retrieved passages.
pub fn collect_sources(passages: &[Passage]) -> Vec<String> {
    let mut sources: Vec<String> = passages.iter().map(|p| p.source.clone()).collect();
    sources.sort();
    sources.dedup();
    sources
}
