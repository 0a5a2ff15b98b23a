//! Route definitions

use crate::{handlers, state::AppState};
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Upload size ceiling for PDF ingestion
const MAX_UPLOAD_BYTES: usize = 50 * 1024 * 1024;

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/documents", post(handlers::upload_document))
        .route("/chat", post(handlers::chat))
        .route("/ask", post(handlers::ask))
        .route("/brief", post(handlers::brief))
        .route("/brief/refine", post(handlers::refine_brief))
        .route("/report", post(handlers::report))
        .with_state(state)
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .layer(
            CorsLayer::new()
                .allow_origin(tower_http::cors::Any)
                .allow_methods(tower_http::cors::Any)
                .allow_headers(tower_http::cors::Any),
        )
        .layer(TraceLayer::new_for_http())
}
