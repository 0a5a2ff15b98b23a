//! Request handlers

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;
use axum::extract::{Multipart, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::Json;
use rfplens_core::agent::{
    render_report, Analyst, BriefWriter, Category, ChatPipeline, HistoryTurn, RevisionLoop,
    RevisionOptions, Router, TerminalState,
};
use rfplens_core::error::RfpLensError;
use rfplens_core::ingest::Ingestor;
use serde::{Deserialize, Serialize};

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

#[derive(Serialize)]
pub struct UploadResponse {
    pub message: String,
    pub chunks: usize,
}

#[derive(Deserialize)]
pub struct ChatRequest {
    pub question: String,
    #[serde(default)]
    pub history: Vec<HistoryTurn>,
}

#[derive(Serialize)]
pub struct ChatResponse {
    pub category: Category,
    pub answer: String,
    pub sources: Vec<String>,
}

#[derive(Deserialize)]
pub struct AskRequest {
    pub question: String,
}

#[derive(Serialize)]
pub struct AskResponse {
    pub answer: String,
    pub state: TerminalState,
    pub revisions: u32,
    pub sources: Vec<String>,
}

#[derive(Serialize)]
pub struct BriefResponse {
    pub answer: String,
    pub category: String,
}

#[derive(Deserialize)]
pub struct RefineRequest {
    pub draft: String,
    pub feedback: String,
}

#[derive(Deserialize)]
pub struct ReportRequest {
    #[serde(default)]
    pub history: Vec<HistoryTurn>,
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "Active".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

pub async fn upload_document(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> ApiResult<Json<UploadResponse>> {
    let mut uploaded: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| RfpLensError::InvalidInput(format!("Malformed upload: {}", e)))?
    {
        if field.name() == Some("file") {
            let filename = field
                .file_name()
                .ok_or_else(|| RfpLensError::InvalidInput("Upload has no filename".to_string()))?
                .to_string();
            let bytes = field
                .bytes()
                .await
                .map_err(|e| RfpLensError::InvalidInput(format!("Malformed upload: {}", e)))?;
            uploaded = Some((filename, bytes.to_vec()));
        }
    }

    let (filename, bytes) = uploaded
        .ok_or_else(|| ApiError(RfpLensError::InvalidInput("Missing 'file' field".to_string())))?;

    let ingestor = Ingestor::new(
        state.db.clone(),
        state.embedder.clone(),
        state.config.ingest.clone(),
    );
    let report = ingestor.ingest_bytes(&filename, &bytes).await?;

    Ok(Json(UploadResponse {
        message: format!("PDF parsed and indexed: {}", filename),
        chunks: report.chunks,
    }))
}

pub async fn chat(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> ApiResult<Json<ChatResponse>> {
    let pipeline = ChatPipeline::new(
        Router::from_config(state.model.clone(), &state.config.agent),
        state.retriever.clone(),
        state.model.clone(),
        &state.config.agent,
        state.config.retrieval.top_k,
    );

    let outcome = pipeline.respond(&request.question, &request.history).await?;

    Ok(Json(ChatResponse {
        category: outcome.category,
        answer: outcome.answer,
        sources: outcome.sources,
    }))
}

pub async fn ask(
    State(state): State<AppState>,
    Json(request): Json<AskRequest>,
) -> ApiResult<Json<AskResponse>> {
    let analyst = Analyst::new(
        state.retriever.clone(),
        RevisionLoop::new(
            state.model.clone(),
            RevisionOptions::from(&state.config.agent),
        ),
        state.config.retrieval.top_k,
    );

    let outcome = analyst.ask(&request.question).await?;

    Ok(Json(AskResponse {
        answer: outcome.answer,
        state: outcome.state,
        revisions: outcome.revisions,
        sources: outcome.sources,
    }))
}

pub async fn brief(State(state): State<AppState>) -> ApiResult<Json<BriefResponse>> {
    let writer = BriefWriter::new(
        state.model.clone(),
        state.retriever.clone(),
        state.config.retrieval.brief_top_k,
        state.config.agent.context_budget_chars,
    );

    let answer = writer.generate().await?;

    Ok(Json(BriefResponse {
        answer,
        category: "WRITER".to_string(),
    }))
}

pub async fn refine_brief(
    State(state): State<AppState>,
    Json(request): Json<RefineRequest>,
) -> ApiResult<Json<BriefResponse>> {
    let writer = BriefWriter::new(
        state.model.clone(),
        state.retriever.clone(),
        state.config.retrieval.brief_top_k,
        state.config.agent.context_budget_chars,
    );

    let answer = writer.refine(&request.draft, &request.feedback).await?;

    Ok(Json(BriefResponse {
        answer,
        category: "WRITER".to_string(),
    }))
}

pub async fn report(Json(request): Json<ReportRequest>) -> Response {
    let markdown = render_report(&request.history);

    (
        [
            (header::CONTENT_TYPE, "text/markdown; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"rfp_analysis.md\"",
            ),
        ],
        markdown,
    )
        .into_response()
}
