//! Per-question state for the revision loop
//!
//! Everything here is created when a question arrives and dropped when its
//! final answer is returned; nothing outlives a single request.

use crate::config::ApprovalPolicy;
use crate::retrieval::Passage;
use serde::{Deserialize, Serialize};

/// One prior chat turn
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryTurn {
    pub role: String,
    pub content: String,
}

impl HistoryTurn {
    pub fn new(role: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            content: content.into(),
        }
    }
}

/// Input to one invocation of the revision loop
#[derive(Debug, Clone)]
pub struct ConversationTurn {
    pub question: String,
    pub history: Vec<HistoryTurn>,
    pub passages: Vec<Passage>,
}

impl ConversationTurn {
    pub fn new(question: impl Into<String>, passages: Vec<Passage>) -> Self {
        Self {
            question: question.into(),
            history: Vec::new(),
            passages,
        }
    }
}

/// Parsed critique output. The approval sentinel is inspected here and
/// nowhere else.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Approved,
    NeedsRevision(String),
    Malformed(String),
}

impl Verdict {
    /// Parse raw critique text against the approval sentinel.
    ///
    /// Under `Substring` (the default) a critique that merely mentions the
    /// sentinel in passing approves the draft; `ExactToken` requires the
    /// sentinel as a standalone word.
    pub fn parse(raw: &str, sentinel: &str, policy: ApprovalPolicy) -> Self {
        if raw.trim().is_empty() {
            return Verdict::Malformed(raw.to_string());
        }

        let approved = match policy {
            ApprovalPolicy::Substring => raw.contains(sentinel),
            ApprovalPolicy::ExactToken => raw
                .split(|c: char| !c.is_alphanumeric())
                .any(|token| token == sentinel),
        };

        if approved {
            Verdict::Approved
        } else {
            Verdict::NeedsRevision(raw.to_string())
        }
    }
}

/// Terminal state of the revision loop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TerminalState {
    /// The critic emitted the approval sentinel
    Approved,
    /// The revision budget ran out before approval
    Exhausted,
}

/// Result of a completed revision loop
#[derive(Debug, Clone)]
pub struct LoopOutcome {
    /// The most recent draft
    pub answer: String,
    pub state: TerminalState,
    /// Completed critique cycles; always `<= max_revisions`
    pub revisions: u32,
    /// Raw critique text from every review, in order
    pub critiques: Vec<String>,
}
