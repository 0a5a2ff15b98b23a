//! Agent control flow
//!
//! The pieces that sequence retrieval, generation, critique, and routing.
//! Each incoming question owns its own state; nothing here is shared across
//! requests beyond the injected collaborator handles.

pub mod brief;
pub mod context;
pub mod prompts;
pub mod report;
pub mod revision;
pub mod router;
pub mod state;

pub use brief::BriefWriter;
pub use report::render_report;
pub use revision::{RevisionLoop, RevisionOptions};
pub use router::{Category, Router};
pub use state::{ConversationTurn, HistoryTurn, LoopOutcome, TerminalState, Verdict};

use crate::agent::context::{apply_budget, collect_sources, format_history, format_passages};
use crate::agent::prompts::persona_prompt;
use crate::config::AgentConfig;
use crate::error::Result;
use crate::llm::ChatModel;
use crate::retrieval::Retriever;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Final answer from the analyst pipeline
#[derive(Debug, Clone)]
pub struct AskOutcome {
    pub answer: String,
    pub state: TerminalState,
    pub revisions: u32,
    pub sources: Vec<String>,
}

/// Retrieve-then-revise pipeline: fetch context for the question, then drive
/// the revision loop to a terminal state.
pub struct Analyst {
    retriever: Arc<dyn Retriever>,
    revision_loop: RevisionLoop,
    top_k: usize,
}

impl Analyst {
    pub fn new(retriever: Arc<dyn Retriever>, revision_loop: RevisionLoop, top_k: usize) -> Self {
        Self {
            retriever,
            revision_loop,
            top_k,
        }
    }

    pub async fn ask(&self, question: &str) -> Result<AskOutcome> {
        self.ask_cancellable(question, &CancellationToken::new()).await
    }

    pub async fn ask_cancellable(
        &self,
        question: &str,
        cancel: &CancellationToken,
    ) -> Result<AskOutcome> {
        tracing::info!("Searching corpus for: {}", question);
        let passages = self.retriever.retrieve(question, self.top_k).await?;
        let sources = collect_sources(&passages);

        let turn = ConversationTurn::new(question, passages);
        let outcome = self.revision_loop.run_cancellable(&turn, cancel).await?;

        Ok(AskOutcome {
            answer: outcome.answer,
            state: outcome.state,
            revisions: outcome.revisions,
            sources,
        })
    }
}

/// Routed chat answer
#[derive(Debug, Clone)]
pub struct ChatOutcome {
    pub category: Category,
    pub answer: String,
    pub sources: Vec<String>,
}

/// Route-then-answer pipeline: classify the question, retrieve context, and
/// answer in the selected persona with recent history.
pub struct ChatPipeline {
    router: Router,
    retriever: Arc<dyn Retriever>,
    model: Arc<dyn ChatModel>,
    top_k: usize,
    history_turns: usize,
    context_budget_chars: usize,
}

impl ChatPipeline {
    pub fn new(
        router: Router,
        retriever: Arc<dyn Retriever>,
        model: Arc<dyn ChatModel>,
        config: &AgentConfig,
        top_k: usize,
    ) -> Self {
        Self {
            router,
            retriever,
            model,
            top_k,
            history_turns: config.history_turns,
            context_budget_chars: config.context_budget_chars,
        }
    }

    pub async fn respond(&self, question: &str, history: &[HistoryTurn]) -> Result<ChatOutcome> {
        let category = self.router.classify(question, history).await?;
        tracing::info!("Question classified as {}", category);

        let passages = self.retriever.retrieve(question, self.top_k).await?;
        let sources = collect_sources(&passages);

        let context = apply_budget(format_passages(&passages), self.context_budget_chars);
        let history_text = format_history(history, self.history_turns);

        let answer = self
            .model
            .complete(persona_prompt(category, &context, &history_text, question))
            .await?;

        Ok(ChatOutcome {
            category,
            answer,
            sources,
        })
    }
}
