//! Bounded generate/critique revision loop
//!
//! An explicit state machine with injected collaborators:
//!
//! ```text
//! Drafting -> Reviewing            always
//! Reviewing -> Approved            critique parses to Verdict::Approved
//! Reviewing -> Exhausted           not approved, revisions >= max_revisions
//! Reviewing -> Drafting            not approved, revisions < max_revisions
//! ```
//!
//! The revision counter is the sole guard against unbounded iteration and
//! satisfies `0 <= revisions <= max_revisions` on every path. Collaborator
//! failures propagate immediately without incrementing the counter.

use crate::agent::context::{apply_budget, format_passages};
use crate::agent::prompts::{critique_prompt, draft_prompt};
use crate::agent::state::{ConversationTurn, LoopOutcome, TerminalState, Verdict};
use crate::config::{AgentConfig, ApprovalPolicy};
use crate::error::{Result, RfpLensError};
use crate::llm::{ChatMessage, ChatModel};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Tuning knobs for one loop instance
#[derive(Debug, Clone)]
pub struct RevisionOptions {
    pub max_revisions: u32,
    pub approval_sentinel: String,
    pub approval_policy: ApprovalPolicy,
    pub context_budget_chars: usize,
}

impl Default for RevisionOptions {
    fn default() -> Self {
        let agent = AgentConfig::default();
        Self {
            max_revisions: agent.max_revisions,
            approval_sentinel: agent.approval_sentinel,
            approval_policy: agent.approval_policy,
            context_budget_chars: agent.context_budget_chars,
        }
    }
}

impl From<&AgentConfig> for RevisionOptions {
    fn from(config: &AgentConfig) -> Self {
        Self {
            max_revisions: config.max_revisions,
            approval_sentinel: config.approval_sentinel.clone(),
            approval_policy: config.approval_policy,
            context_budget_chars: config.context_budget_chars,
        }
    }
}

/// Produces a final answer through at most `max_revisions` critique cycles
pub struct RevisionLoop {
    model: Arc<dyn ChatModel>,
    options: RevisionOptions,
}

impl RevisionLoop {
    pub fn new(model: Arc<dyn ChatModel>, options: RevisionOptions) -> Self {
        Self { model, options }
    }

    /// Run the loop to a terminal state.
    pub async fn run(&self, turn: &ConversationTurn) -> Result<LoopOutcome> {
        self.run_cancellable(turn, &CancellationToken::new()).await
    }

    /// Run the loop, aborting with `Cancelled` when the token fires. The
    /// in-flight model call is dropped, which aborts its connection.
    pub async fn run_cancellable(
        &self,
        turn: &ConversationTurn,
        cancel: &CancellationToken,
    ) -> Result<LoopOutcome> {
        let context = apply_budget(
            format_passages(&turn.passages),
            self.options.context_budget_chars,
        );

        let mut revisions: u32 = 0;
        let mut critique: Option<String> = None;
        let mut critiques: Vec<String> = Vec::new();

        loop {
            // Drafting
            tracing::debug!(revisions, "Drafting answer");
            let draft = self
                .call(draft_prompt(&context, &turn.question, critique.as_deref()), cancel)
                .await?;

            // Reviewing
            tracing::debug!(revisions, "Reviewing draft");
            let review = self
                .call(
                    critique_prompt(&turn.question, &draft, &self.options.approval_sentinel),
                    cancel,
                )
                .await?;
            critiques.push(review.clone());

            match Verdict::parse(
                &review,
                &self.options.approval_sentinel,
                self.options.approval_policy,
            ) {
                Verdict::Approved => {
                    tracing::info!(revisions, "Draft approved");
                    return Ok(LoopOutcome {
                        answer: draft,
                        state: TerminalState::Approved,
                        revisions,
                        critiques,
                    });
                }
                verdict => {
                    if revisions >= self.options.max_revisions {
                        tracing::info!(
                            revisions,
                            "Revision budget exhausted, returning unapproved draft"
                        );
                        return Ok(LoopOutcome {
                            answer: draft,
                            state: TerminalState::Exhausted,
                            revisions,
                            critiques,
                        });
                    }
                    revisions += 1;
                    critique = Some(match verdict {
                        Verdict::NeedsRevision(feedback) => feedback,
                        // An empty critique carries no usable feedback; the
                        // next draft gets the explicit no-critique marker.
                        _ => {
                            tracing::warn!("Malformed critique, redrafting without feedback");
                            crate::agent::prompts::NO_CRITIQUE_MARKER.to_string()
                        }
                    });
                }
            }
        }
    }

    async fn call(&self, messages: Vec<ChatMessage>, cancel: &CancellationToken) -> Result<String> {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(RfpLensError::Cancelled),
            result = self.model.complete(messages) => result,
        }
    }
}
