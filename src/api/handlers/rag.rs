//! `POST /chat` backed by the RAG pipeline.

use crate::{
    AppState,
    types::{AppError, ErrorResponse, RagChatRequest, RagChatResponse, Result},
};
use axum::{Json, extract::State, extract::rejection::JsonRejection};
use serde_json::Value;
use tracing::error;

pub const MISSING_FIELDS: &str = "Missing 'question' or 'score' in request";
pub const PROCESSING_FAILED: &str = "Failed to process the request";

/// Ask a question about the knowledge base
#[utoipa::path(
    post,
    path = "/chat",
    request_body = RagChatRequest,
    responses(
        (status = 200, description = "Generated answer", body = RagChatResponse),
        (status = 400, description = "Missing 'question' or 'score'", body = ErrorResponse),
        (status = 500, description = "Pipeline not initialized or failed", body = ErrorResponse)
    ),
    tag = "chat"
)]
pub async fn chat(
    State(state): State<AppState>,
    payload: std::result::Result<Json<Value>, JsonRejection>,
) -> Result<Json<RagChatResponse>> {
    let pipeline = state.pipeline.as_ref().ok_or(AppError::NotInitialized)?;

    let (question, score) = payload
        .ok()
        .and_then(|Json(body)| extract_fields(&body))
        .ok_or_else(|| AppError::InvalidInput(MISSING_FIELDS.to_string()))?;

    let answer = pipeline.answer(&question, score).await.map_err(|e| {
        error!(error = %e, "RAG pipeline failed");
        AppError::Internal(PROCESSING_FAILED.to_string())
    })?;

    Ok(Json(RagChatResponse { answer }))
}

/// Pull a non-empty `question` and an integer `score` out of the body.
///
/// The score is rendered as a PHQ-9 number in the prompt, so it must be
/// integer-valued. Any other non-null score (`"moderate"`, `7.5`, `true`) is
/// treated as missing and the request gets a 400, rather than being passed
/// through to the template as text.
fn extract_fields(body: &Value) -> Option<(String, i64)> {
    let question = body.get("question")?.as_str()?;
    if question.is_empty() {
        return None;
    }
    let score = parse_integer(body.get("score")?)?;
    Some((question.to_string(), score))
}

/// Integers, integral floats and integer strings; `null` and anything else is rejected.
fn parse_integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.fract() == 0.0 && f.abs() < i64::MAX as f64)
                .map(|f| f as i64)
        }),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
