//! `POST /chat` backed by the keyword responder.

use crate::{
    rules::{self, RulesReply},
    types::{QueryResponse, ResponseStatus, RulesChatRequest, ScoreResponse, StatusErrorResponse},
};
use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::Value;
use tracing::debug;

/// Submit a PHQ-9 score or a free-text message
#[utoipa::path(
    post,
    path = "/chat",
    request_body = RulesChatRequest,
    responses(
        (status = 200, description = "Score band message, or a QueryResponse for `query` bodies", body = ScoreResponse),
        (status = 400, description = "No usable score or query", body = StatusErrorResponse)
    ),
    tag = "chat"
)]
pub async fn chat(payload: std::result::Result<Json<Value>, JsonRejection>) -> Response {
    let body = match payload {
        Ok(Json(body)) => body,
        Err(rejection) => {
            debug!(error = %rejection, "Unreadable chat body");
            Value::Null
        }
    };

    match rules::respond(&body) {
        RulesReply::Score { score, message } => Json(ScoreResponse {
            status: ResponseStatus::Success,
            score,
            message: message.to_string(),
        })
        .into_response(),
        RulesReply::Query {
            response,
            timestamp,
        } => Json(QueryResponse {
            status: ResponseStatus::Success,
            response: response.to_string(),
            timestamp,
        })
        .into_response(),
        RulesReply::Invalid(message) => (
            StatusCode::BAD_REQUEST,
            Json(StatusErrorResponse {
                status: ResponseStatus::Error,
                message: message.to_string(),
            }),
        )
            .into_response(),
    }
}
