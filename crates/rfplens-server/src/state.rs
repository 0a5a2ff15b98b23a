//! Shared application state
//!
//! All handles are constructed once at startup and injected into handlers;
//! request handlers never touch process-wide singletons.

use rfplens_core::config::Config;
use rfplens_core::db::Database;
use rfplens_core::llm::{ChatModel, Embedder};
use rfplens_core::retrieval::Retriever;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub struct AppState {
    pub db: Arc<Mutex<Database>>,
    pub model: Arc<dyn ChatModel>,
    pub embedder: Arc<dyn Embedder>,
    pub retriever: Arc<dyn Retriever>,
    pub config: Arc<Config>,
}
