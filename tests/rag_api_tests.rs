mod common;

use axum::http::StatusCode;
use axum_test::TestServer;
use common::mocks::{MockEmbedder, MockLLMClient, index_for};
use serde_json::{Value, json};
use std::sync::Arc;
use tempfile::TempDir;
use wellnest::rag::chunker::TextChunker;
use wellnest::{AppState, ChatMode, RagPipeline, WellnestConfig, create_app};

const KNOWLEDGE: &str = "\
Sleep hygiene means keeping a regular bedtime and avoiding screens late at night. \
Physical activity such as a daily walk can lift mood. \
Reaching out to friends and family helps against isolation.";

fn rag_config() -> WellnestConfig {
    let mut config = WellnestConfig::default();
    config.server.mode = ChatMode::Rag;
    config
}

fn server_with(pipeline: Option<Arc<RagPipeline>>) -> TestServer {
    let app = create_app(AppState::new(rag_config(), pipeline));
    TestServer::new(app).expect("Failed to create test server")
}

async fn pipeline_with(dir: &TempDir, llm: MockLLMClient) -> Arc<RagPipeline> {
    let chunker = TextChunker::new(90, 10).unwrap();
    let (index, _) = index_for(dir.path(), KNOWLEDGE, Arc::new(MockEmbedder::new()), chunker)
        .await
        .unwrap();
    Arc::new(RagPipeline::new(index, Arc::new(llm), 4))
}

// ============= Validation Tests =============

#[tokio::test]
async fn test_not_initialized() {
    let server = server_with(None);

    let response = server
        .post("/chat")
        .json(&json!({"question": "How can I sleep better?", "score": 8}))
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    response.assert_json(&json!({"error": "RAG chain not initialized"}));
}

#[tokio::test]
async fn test_missing_question() {
    let dir = TempDir::new().unwrap();
    let server = server_with(Some(pipeline_with(&dir, MockLLMClient::new("unused")).await));

    let response = server.post("/chat").json(&json!({"score": 8})).await;

    response.assert_status_bad_request();
    response.assert_json(&json!({"error": "Missing 'question' or 'score' in request"}));
}

#[tokio::test]
async fn test_missing_or_null_score() {
    let dir = TempDir::new().unwrap();
    let llm = MockLLMClient::new("unused");
    let server = server_with(Some(pipeline_with(&dir, llm.clone()).await));

    for body in [
        json!({"question": "How can I sleep better?"}),
        json!({"question": "How can I sleep better?", "score": null}),
        json!({"question": "", "score": 3}),
    ] {
        let response = server.post("/chat").json(&body).await;
        response.assert_status_bad_request();
        let error: Value = response.json();
        assert_eq!(error["error"], "Missing 'question' or 'score' in request");
    }

    assert!(llm.prompts().is_empty());
}

#[tokio::test]
async fn test_malformed_body() {
    let dir = TempDir::new().unwrap();
    let server = server_with(Some(pipeline_with(&dir, MockLLMClient::new("unused")).await));

    let response = server
        .post("/chat")
        .content_type("application/json")
        .bytes("{\"question\": ".into())
        .await;

    response.assert_status_bad_request();
}

// ============= Pipeline Tests =============

#[tokio::test]
async fn test_answer_returned_verbatim() {
    let dir = TempDir::new().unwrap();
    let llm = MockLLMClient::new("Try keeping a regular bedtime.\n");
    let server = server_with(Some(pipeline_with(&dir, llm.clone()).await));

    let response = server
        .post("/chat")
        .json(&json!({"question": "How can I sleep better at night?", "score": 12}))
        .await;

    response.assert_status_ok();
    response.assert_json(&json!({"answer": "Try keeping a regular bedtime.\n"}));

    let prompts = llm.prompts();
    assert_eq!(prompts.len(), 1);
    let prompt = &prompts[0];
    assert!(prompt.contains("USER'S PHQ-9 SCORE: 12"));
    assert!(prompt.contains("QUESTION:\nHow can I sleep better at night?"));
    assert!(prompt.contains("Sleep hygiene"));
}

#[tokio::test]
async fn test_llm_failure_is_generic_500() {
    let dir = TempDir::new().unwrap();
    let server = server_with(Some(pipeline_with(&dir, MockLLMClient::failing()).await));

    let response = server
        .post("/chat")
        .json(&json!({"question": "What helps with isolation?", "score": 20}))
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    response.assert_json(&json!({"error": "Failed to process the request"}));
}

#[tokio::test]
async fn test_pipeline_joins_context_with_blank_line() {
    let dir = TempDir::new().unwrap();
    let llm = MockLLMClient::new("ok");
    let pipeline = pipeline_with(&dir, llm.clone()).await;

    pipeline.answer("walk mood friends sleep", 0).await.unwrap();

    let prompts = llm.prompts();
    let prompt = &prompts[0];
    let context = prompt
        .split("CONTEXT:\n")
        .nth(1)
        .and_then(|rest| rest.split("\n\nUSER'S PHQ-9 SCORE").next())
        .unwrap();
    let chunks: Vec<&str> = context.split("\n\n").collect();
    assert!(chunks.len() > 1);
    assert!(chunks.len() <= 4);
}

// ============= Docs & Health =============

#[tokio::test]
async fn test_health_reports_rag_mode() {
    let server = server_with(None);

    let body: Value = server.get("/health").await.json();

    assert_eq!(body["mode"], "rag");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn test_openapi_document() {
    let server = server_with(None);

    let response = server.get("/api-docs/openapi.json").await;

    response.assert_status_ok();
    let doc: Value = response.json();
    assert!(doc["paths"]["/chat"]["post"].is_object());
    assert!(doc["components"]["schemas"]["RagChatRequest"].is_object());
}
