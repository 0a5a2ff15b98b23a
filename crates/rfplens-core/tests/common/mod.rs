//! Deterministic stub collaborators for agent tests
#![allow(dead_code)]

use async_trait::async_trait;
use rfplens_core::error::{Result, RfpLensError};
use rfplens_core::llm::{ChatMessage, ChatModel};
use rfplens_core::retrieval::{Passage, Retriever};
use std::collections::VecDeque;
use std::sync::Mutex;

/// One scripted model response
pub enum ScriptItem {
    Reply(String),
    Fail(RfpLensError),
}

/// Chat model that replays a fixed script and records every call
pub struct ScriptedModel {
    script: Mutex<VecDeque<ScriptItem>>,
    pub calls: Mutex<Vec<Vec<ChatMessage>>>,
}

impl ScriptedModel {
    pub fn new(script: Vec<ScriptItem>) -> Self {
        Self {
            script: Mutex::new(script.into_iter().collect()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn replies(replies: &[&str]) -> Self {
        Self::new(
            replies
                .iter()
                .map(|r| ScriptItem::Reply(r.to_string()))
                .collect(),
        )
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Calls whose prompt came from the critique template
    pub fn critique_call_count(&self) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|messages| is_critique_call(messages))
            .count()
    }

    /// Calls whose prompt came from the draft template
    pub fn draft_call_count(&self) -> usize {
        self.call_count() - self.critique_call_count()
    }
}

fn is_critique_call(messages: &[ChatMessage]) -> bool {
    messages
        .iter()
        .any(|m| m.role == "system" && m.content.contains("Review this answer"))
}

#[async_trait]
impl ChatModel for ScriptedModel {
    async fn complete(&self, messages: Vec<ChatMessage>) -> Result<String> {
        self.calls.lock().unwrap().push(messages);
        match self.script.lock().unwrap().pop_front() {
            Some(ScriptItem::Reply(reply)) => Ok(reply),
            Some(ScriptItem::Fail(err)) => Err(err),
            None => panic!("ScriptedModel ran out of scripted responses"),
        }
    }

    fn model_name(&self) -> &str {
        "scripted-test"
    }
}

/// Model computed as a pure function of the incoming prompt
pub struct FnModel<F>(pub F);

#[async_trait]
impl<F> ChatModel for FnModel<F>
where
    F: Fn(&[ChatMessage]) -> Result<String> + Send + Sync,
{
    async fn complete(&self, messages: Vec<ChatMessage>) -> Result<String> {
        (self.0)(&messages)
    }

    fn model_name(&self) -> &str {
        "fn-test"
    }
}

/// Retriever that returns fixed passages
pub struct FixedRetriever {
    pub passages: Vec<Passage>,
}

impl FixedRetriever {
    pub fn new(texts: &[&str], source: &str) -> Self {
        Self {
            passages: texts
                .iter()
                .enumerate()
                .map(|(i, t)| Passage {
                    text: t.to_string(),
                    source: source.to_string(),
                    score: 1.0 - (i as f32) * 0.1,
                })
                .collect(),
        }
    }
}

#[async_trait]
impl Retriever for FixedRetriever {
    async fn retrieve(&self, _question: &str, limit: usize) -> Result<Vec<Passage>> {
        Ok(self.passages.iter().take(limit).cloned().collect())
    }
}

/// Retriever whose store is always unreachable
pub struct DownRetriever;

#[async_trait]
impl Retriever for DownRetriever {
    async fn retrieve(&self, _question: &str, _limit: usize) -> Result<Vec<Passage>> {
        Err(RfpLensError::RetrievalUnavailable(
            "store unreachable".to_string(),
        ))
    }
}
