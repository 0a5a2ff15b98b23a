//! Executive brief generation and refinement

use crate::agent::context::{apply_budget, format_passages};
use crate::agent::prompts::{brief_prompt, refine_prompt, BRIEF_SURVEY_QUERY};
use crate::error::Result;
use crate::llm::ChatModel;
use crate::retrieval::Retriever;
use std::sync::Arc;

/// Writes and rewrites executive briefs over the ingested corpus
pub struct BriefWriter {
    model: Arc<dyn ChatModel>,
    retriever: Arc<dyn Retriever>,
    top_k: usize,
    context_budget_chars: usize,
}

impl BriefWriter {
    pub fn new(
        model: Arc<dyn ChatModel>,
        retriever: Arc<dyn Retriever>,
        top_k: usize,
        context_budget_chars: usize,
    ) -> Self {
        Self {
            model,
            retriever,
            top_k,
            context_budget_chars,
        }
    }

    /// Generate a markdown executive brief from a broad survey of the corpus
    pub async fn generate(&self) -> Result<String> {
        let passages = self.retriever.retrieve(BRIEF_SURVEY_QUERY, self.top_k).await?;
        let context = apply_budget(format_passages(&passages), self.context_budget_chars);
        self.model.complete(brief_prompt(&context)).await
    }

    /// Rewrite a prior draft from feedback. No retrieval involved.
    pub async fn refine(&self, draft: &str, feedback: &str) -> Result<String> {
        self.model.complete(refine_prompt(draft, feedback)).await
    }
}
