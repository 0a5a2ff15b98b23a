//! Revision loop state machine properties

mod common;

use common::{FnModel, ScriptItem, ScriptedModel};
use rfplens_core::agent::{ConversationTurn, RevisionLoop, RevisionOptions, TerminalState};
use rfplens_core::error::{Result, RfpLensError};
use rfplens_core::retrieval::Passage;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

fn passages(texts: &[&str]) -> Vec<Passage> {
    texts
        .iter()
        .map(|t| Passage {
            text: t.to_string(),
            source: "Test RFP".to_string(),
            score: 1.0,
        })
        .collect()
}

fn turn(question: &str) -> ConversationTurn {
    ConversationTurn::new(
        question,
        passages(&["Requirement 1: responses due in 30 days."]),
    )
}

fn options(max_revisions: u32) -> RevisionOptions {
    RevisionOptions {
        max_revisions,
        ..RevisionOptions::default()
    }
}

#[tokio::test]
async fn first_cycle_approval_terminates_with_zero_revisions() {
    let model = Arc::new(ScriptedModel::replies(&["The deadline is 30 days.", "APPROVE"]));
    let loop_ = RevisionLoop::new(model.clone(), options(2));

    let outcome = loop_.run(&turn("What is the deadline?")).await.unwrap();

    assert_eq!(outcome.state, TerminalState::Approved);
    assert_eq!(outcome.revisions, 0);
    assert_eq!(outcome.answer, "The deadline is 30 days.");
    assert_eq!(model.draft_call_count(), 1);
    assert_eq!(model.critique_call_count(), 1);
}

#[tokio::test]
async fn never_approving_critic_exhausts_after_exact_budget() {
    // max_revisions = 2 -> exactly 3 drafts and 3 critiques, never more
    let model = Arc::new(ScriptedModel::replies(&[
        "draft one",
        "Needs more detail on pricing.",
        "draft two",
        "Needs more detail on pricing.",
        "draft three",
        "Needs more detail on pricing.",
    ]));
    let loop_ = RevisionLoop::new(model.clone(), options(2));

    let outcome = loop_.run(&turn("Summarize pricing terms")).await.unwrap();

    assert_eq!(outcome.state, TerminalState::Exhausted);
    assert_eq!(outcome.revisions, 2);
    assert_eq!(outcome.answer, "draft three");
    assert_eq!(model.draft_call_count(), 3);
    assert_eq!(model.critique_call_count(), 3);
    assert_eq!(outcome.critiques.len(), 3);
    assert!(outcome.critiques.iter().all(|c| c == "Needs more detail on pricing."));
}

#[tokio::test]
async fn critique_feedback_reaches_next_draft() {
    let model = Arc::new(ScriptedModel::replies(&[
        "draft one",
        "Mention the insurance clause.",
        "draft two",
        "APPROVE",
    ]));
    let loop_ = RevisionLoop::new(model.clone(), options(2));

    let outcome = loop_.run(&turn("What liability terms apply?")).await.unwrap();
    assert_eq!(outcome.state, TerminalState::Approved);
    assert_eq!(outcome.revisions, 1);

    let calls = model.calls.lock().unwrap();
    // Third call is the second draft; it must carry the critique text.
    assert!(calls[2][1].content.contains("Mention the insurance clause."));
    // First draft carries the explicit no-critique marker instead.
    assert!(calls[0][1].content.contains("Previous Critique (if any): None"));
}

#[tokio::test]
async fn zero_budget_returns_first_draft_unapproved() {
    let model = Arc::new(ScriptedModel::replies(&["only draft", "too vague"]));
    let loop_ = RevisionLoop::new(model.clone(), options(0));

    let outcome = loop_.run(&turn("q")).await.unwrap();

    assert_eq!(outcome.state, TerminalState::Exhausted);
    assert_eq!(outcome.revisions, 0);
    assert_eq!(outcome.answer, "only draft");
    assert_eq!(model.call_count(), 2);
}

#[tokio::test]
async fn malformed_critique_counts_as_revision_cycle() {
    let model = Arc::new(ScriptedModel::new(vec![
        ScriptItem::Reply("draft one".to_string()),
        ScriptItem::Reply("   ".to_string()),
        ScriptItem::Reply("draft two".to_string()),
        ScriptItem::Reply("APPROVE".to_string()),
    ]));
    let loop_ = RevisionLoop::new(model.clone(), options(2));

    let outcome = loop_.run(&turn("q")).await.unwrap();
    assert_eq!(outcome.state, TerminalState::Approved);
    assert_eq!(outcome.revisions, 1);

    // The redraft after a malformed critique gets the no-critique marker.
    let calls = model.calls.lock().unwrap();
    assert!(calls[2][1].content.contains("Previous Critique (if any): None"));
}

#[tokio::test]
async fn model_failure_propagates_uncounted() {
    let model = Arc::new(ScriptedModel::new(vec![
        ScriptItem::Reply("draft one".to_string()),
        ScriptItem::Fail(RfpLensError::ModelUnavailable("connection refused".to_string())),
    ]));
    let loop_ = RevisionLoop::new(model.clone(), options(2));

    let err = loop_.run(&turn("q")).await.unwrap_err();
    assert!(matches!(err, RfpLensError::ModelUnavailable(_)));
    assert_eq!(model.call_count(), 2);
}

#[tokio::test]
async fn timeout_surfaces_as_distinct_error() {
    let model = Arc::new(ScriptedModel::new(vec![ScriptItem::Fail(
        RfpLensError::ModelTimeout { seconds: 30 },
    )]));
    let loop_ = RevisionLoop::new(model, options(2));

    let err = loop_.run(&turn("q")).await.unwrap_err();
    assert!(matches!(err, RfpLensError::ModelTimeout { seconds: 30 }));
}

#[tokio::test]
async fn cancellation_aborts_before_any_call() {
    let model = Arc::new(ScriptedModel::replies(&["never used", "never used"]));
    let loop_ = RevisionLoop::new(model.clone(), options(2));

    let cancel = CancellationToken::new();
    cancel.cancel();

    let err = loop_
        .run_cancellable(&turn("q"), &cancel)
        .await
        .unwrap_err();
    assert!(matches!(err, RfpLensError::Cancelled));
    assert_eq!(model.call_count(), 0);
}

#[tokio::test]
async fn identical_inputs_yield_identical_outcomes() {
    fn deterministic_model() -> Arc<FnModel<impl Fn(&[rfplens_core::ChatMessage]) -> Result<String> + Send + Sync>>
    {
        Arc::new(FnModel(|messages: &[rfplens_core::ChatMessage]| {
            let is_review = messages
                .iter()
                .any(|m| m.role == "system" && m.content.contains("Review this answer"));
            if is_review {
                Ok("Needs more detail on pricing.".to_string())
            } else {
                Ok(format!("answer derived from {} chars", messages[1].content.len()))
            }
        }))
    }

    let loop_a = RevisionLoop::new(deterministic_model(), options(2));
    let loop_b = RevisionLoop::new(deterministic_model(), options(2));

    let a = loop_a.run(&turn("Summarize the key requirements")).await.unwrap();
    let b = loop_b.run(&turn("Summarize the key requirements")).await.unwrap();

    assert_eq!(a.answer, b.answer);
    assert_eq!(a.state, b.state);
    assert_eq!(a.revisions, b.revisions);
}

mod counter_bound {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// For any revision budget and any point at which the critic starts
        /// approving, the counter stays within [0, max_revisions] and the
        /// terminal state matches.
        #[test]
        fn revision_count_never_exceeds_budget(
            max_revisions in 0u32..5,
            approve_at in proptest::option::of(0u32..8),
        ) {
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .unwrap();

            let outcome = runtime.block_on(async {
                let approve_at = approve_at;
                let critiques = std::sync::Mutex::new(0u32);
                let model = Arc::new(FnModel(move |messages: &[rfplens_core::ChatMessage]| {
                    let is_review = messages
                        .iter()
                        .any(|m| m.role == "system" && m.content.contains("Review this answer"));
                    if is_review {
                        let mut seen = critiques.lock().unwrap();
                        let this_one = *seen;
                        *seen += 1;
                        if approve_at == Some(this_one) {
                            Ok("APPROVE".to_string())
                        } else {
                            Ok("Needs work.".to_string())
                        }
                    } else {
                        Ok("draft".to_string())
                    }
                }));
                let loop_ = RevisionLoop::new(model, options(max_revisions));
                loop_.run(&turn("q")).await.unwrap()
            });

            prop_assert!(outcome.revisions <= max_revisions);
            match approve_at {
                Some(n) if n <= max_revisions => {
                    prop_assert_eq!(outcome.state, TerminalState::Approved);
                    prop_assert_eq!(outcome.revisions, n);
                }
                _ => {
                    prop_assert_eq!(outcome.state, TerminalState::Exhausted);
                    prop_assert_eq!(outcome.revisions, max_revisions);
                }
            }
        }
    }
}
