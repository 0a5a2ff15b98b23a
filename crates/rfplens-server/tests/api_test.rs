//! API smoke tests over the assembled router (no live collaborators needed)

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use rfplens_core::config::Config;
use rfplens_core::db::Database;
use rfplens_core::llm::OpenAiClient;
use rfplens_core::retrieval::VectorRetriever;
use rfplens_server::{create_router, AppState};
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

fn test_state() -> AppState {
    let config = Arc::new(Config::default());
    let db = Database::open_in_memory().unwrap();
    db.initialize().unwrap();
    let db = Arc::new(Mutex::new(db));

    let client = Arc::new(OpenAiClient::new(config.llm_service.clone()).unwrap());
    let retriever = Arc::new(VectorRetriever::new(
        db.clone(),
        client.clone(),
        config.retrieval.min_score,
    ));

    AppState {
        db,
        model: client.clone(),
        embedder: client,
        retriever,
        config,
    }
}

#[tokio::test]
async fn health_reports_active() {
    let app = create_router(test_state());

    let response = app
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .unwrap();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["status"], "Active");
}

#[tokio::test]
async fn report_renders_markdown_attachment() {
    let app = create_router(test_state());

    let payload = serde_json::json!({
        "history": [
            {"role": "user", "content": "What is the deadline?"},
            {"role": "assistant", "content": "Submissions close March 1."}
        ]
    });

    let response = app
        .oneshot(
            Request::post("/report")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(payload.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let disposition = response
        .headers()
        .get(header::CONTENT_DISPOSITION)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(disposition.contains("rfp_analysis.md"));

    let body = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .unwrap();
    let markdown = String::from_utf8(body.to_vec()).unwrap();
    assert!(markdown.starts_with("# RFP Analysis Report"));
    assert!(markdown.contains("## ASSISTANT"));
}

#[tokio::test]
async fn chat_rejects_missing_question() {
    let app = create_router(test_state());

    let response = app
        .oneshot(
            Request::post("/chat")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from("{}"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}
