use serde_json::json;
use wellnest::llm::gemini::GeminiClient;
use wellnest::llm::{LLMClient, Provider};
use wellnest::types::AppError;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const GENERATE_PATH: &str = "/models/gemini-1.5-flash:generateContent";

fn client_for(server: &MockServer) -> GeminiClient {
    GeminiClient::new(
        "test-key".to_string(),
        Some(server.uri()),
        "gemini-1.5-flash".to_string(),
        0.3,
    )
    .unwrap()
}

#[tokio::test]
async fn test_generate_sends_prompt_and_returns_text() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .and(header("x-goog-api-key", "test-key"))
        .and(body_partial_json(json!({
            "contents": [{"role": "user", "parts": [{"text": "What is PHQ-9?"}]}]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{
                "content": {
                    "role": "model",
                    "parts": [{"text": "PHQ-9 is a "}, {"text": "screening questionnaire."}]
                },
                "finishReason": "STOP"
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let answer = client_for(&server).generate("What is PHQ-9?").await.unwrap();

    assert_eq!(answer, "PHQ-9 is a screening questionnaire.");
}

#[tokio::test]
async fn test_generation_config_carries_temperature() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{"content": {"parts": [{"text": "ok"}]}}]
        })))
        .mount(&server)
        .await;

    client_for(&server).generate("hi").await.unwrap();

    let requests = server.received_requests().await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    let temperature = body["generationConfig"]["temperature"].as_f64().unwrap();
    assert!((temperature - 0.3).abs() < 1e-6);
}

#[tokio::test]
async fn test_no_candidates_is_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "promptFeedback": {"blockReason": "SAFETY"}
        })))
        .mount(&server)
        .await;

    let result = client_for(&server).generate("hi").await;

    assert!(matches!(result, Err(AppError::LLM(msg)) if msg.contains("No candidates")));
}

#[tokio::test]
async fn test_http_errors_are_mapped() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(403).set_body_string("forbidden"))
        .mount(&server)
        .await;

    let result = client_for(&server).generate("hi").await;

    assert!(matches!(result, Err(AppError::LLM(msg)) if msg.contains("authentication")));
}

#[tokio::test]
async fn test_server_error_includes_status() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let result = client_for(&server).generate("hi").await;

    assert!(matches!(result, Err(AppError::LLM(msg)) if msg.contains("500") && msg.contains("boom")));
}

#[tokio::test]
async fn test_key_not_in_request_url() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{"content": {"parts": [{"text": "ok"}]}}]
        })))
        .mount(&server)
        .await;

    client_for(&server).generate("hi").await.unwrap();

    let requests = server.received_requests().await.unwrap();
    assert!(!requests[0].url.as_str().contains("test-key"));
}

#[tokio::test]
async fn test_transport_error_does_not_leak_key() {
    // Nothing listens on the discard port.
    let client = GeminiClient::new(
        "SUPERSECRET123".to_string(),
        Some("http://127.0.0.1:9".to_string()),
        "gemini-1.5-flash".to_string(),
        0.3,
    )
    .unwrap();

    let err = client.generate("hi").await.unwrap_err();

    assert!(matches!(err, AppError::LLM(_)));
    assert!(!err.to_string().contains("SUPERSECRET123"));
}

#[tokio::test]
async fn test_provider_builds_gemini_client() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{"content": {"parts": [{"text": "from provider"}]}}]
        })))
        .mount(&server)
        .await;

    let provider = Provider::Gemini {
        api_key: "test-key".to_string(),
        base_url: Some(server.uri()),
        model: "gemini-1.5-flash".to_string(),
        temperature: 0.3,
    };
    let client = provider.create_client().await.unwrap();

    assert_eq!(client.model_name(), "gemini-1.5-flash");
    assert_eq!(client.generate("hi").await.unwrap(), "from provider");
}
