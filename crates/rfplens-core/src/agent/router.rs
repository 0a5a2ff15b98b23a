//! Question classification and dispatch
//!
//! Asks the chat model for a single bare label, then normalizes the free-text
//! response against the closed label set. Normalization is mandatory: model
//! output is never trusted to match the set exactly.

use crate::agent::context::format_history;
use crate::agent::prompts::routing_prompt;
use crate::agent::state::HistoryTurn;
use crate::config::AgentConfig;
use crate::error::Result;
use crate::llm::ChatModel;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Closed category set for question routing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Category {
    Technical,
    Legal,
}

impl Category {
    /// Labels in tie-break priority order: LEGAL wins over TECHNICAL when a
    /// response names both.
    pub const PRIORITY: [Category; 2] = [Category::Legal, Category::Technical];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Technical => "TECHNICAL",
            Category::Legal => "LEGAL",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classifies questions into exactly one category
pub struct Router {
    model: Arc<dyn ChatModel>,
    fallback: Category,
    history_turns: usize,
}

impl Router {
    pub fn new(model: Arc<dyn ChatModel>, fallback: Category, history_turns: usize) -> Self {
        Self {
            model,
            fallback,
            history_turns,
        }
    }

    pub fn from_config(model: Arc<dyn ChatModel>, config: &AgentConfig) -> Self {
        Self::new(model, config.fallback_category, config.history_turns)
    }

    /// Classify one question, with trailing chat history as extra signal.
    ///
    /// The raw model response never escapes this method.
    pub async fn classify(&self, question: &str, history: &[HistoryTurn]) -> Result<Category> {
        let history_text = format_history(history, self.history_turns);
        let response = self
            .model
            .complete(routing_prompt(question, &history_text))
            .await?;

        Ok(normalize(&response, self.fallback))
    }
}

/// Normalize free-text classification output onto the closed set.
///
/// Uppercases the response, then matches known labels in tie-break priority
/// order; an unrecognized response resolves to the fallback label.
fn normalize(raw: &str, fallback: Category) -> Category {
    let upper = raw.trim().to_uppercase();

    for category in Category::PRIORITY {
        if upper.contains(category.as_str()) {
            return category;
        }
    }

    tracing::warn!(
        "Classification output matched no known label, using fallback {}: {:?}",
        fallback,
        raw
    );
    fallback
}
