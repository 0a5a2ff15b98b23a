//! Command implementations

pub mod ask;
pub mod brief;
pub mod chat;
pub mod ingest;
pub mod report;
pub mod status;

use crate::AppContext;
use rfplens_core::llm::OpenAiClient;
use rfplens_core::retrieval::VectorRetriever;
use std::sync::Arc;

/// Build the shared LLM client for a command
pub(crate) fn llm_client(ctx: &AppContext) -> anyhow::Result<Arc<OpenAiClient>> {
    Ok(Arc::new(OpenAiClient::new(ctx.config.llm_service.clone())?))
}

/// Build the vector retriever over the local index
pub(crate) fn retriever(ctx: &AppContext, client: Arc<OpenAiClient>) -> Arc<VectorRetriever> {
    Arc::new(VectorRetriever::new(
        ctx.db.clone(),
        client,
        ctx.config.retrieval.min_score,
    ))
}
