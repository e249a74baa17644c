use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// ============= RAG API Types =============

/// Body accepted by the RAG chat endpoint.
///
/// Parsed leniently by the handler so that absent fields produce the
/// endpoint's own error shape rather than an extractor rejection.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RagChatRequest {
    pub question: String,
    /// PHQ-9 score (0-27)
    pub score: i64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RagChatResponse {
    pub answer: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

// ============= Keyword Responder API Types =============

/// Body accepted by the keyword responder. Exactly one of `score` or `query`
/// is expected; `score` wins when both are present.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RulesChatRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ResponseStatus {
    Success,
    Error,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ScoreResponse {
    pub status: ResponseStatus,
    pub score: i64,
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct QueryResponse {
    pub status: ResponseStatus,
    pub response: String,
    pub timestamp: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct StatusErrorResponse {
    pub status: ResponseStatus,
    pub message: String,
}

// ============= Health =============

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub mode: String,
    pub version: String,
}

// ============= RAG Types =============

/// A chunk of the knowledge base returned by retrieval.
#[derive(Debug, Clone, PartialEq)]
pub struct RetrievedChunk {
    pub id: String,
    pub text: String,
    pub score: f32,
}

// ============= Error Types =============

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("{0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Embedding error: {0}")]
    Embedding(String),

    #[error("Vector store error: {0}")]
    VectorStore(String),

    #[error("LLM error: {0}")]
    LLM(String),

    #[error("RAG chain not initialized")]
    NotInitialized,

    #[error("{0}")]
    Internal(String),
}

impl From<wellnest_vector::Error> for AppError {
    fn from(err: wellnest_vector::Error) -> Self {
        AppError::VectorStore(err.to_string())
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let status = match &self {
            AppError::NotFound(_) => axum::http::StatusCode::NOT_FOUND,
            AppError::InvalidInput(_) => axum::http::StatusCode::BAD_REQUEST,
            _ => axum::http::StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = ErrorResponse {
            error: self.to_string(),
        };

        (status, axum::Json(body)).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
