//! HTTP API Handlers and Routes
//!
//! # Module Structure
//!
//! - [`api::handlers`](crate::api::handlers) - Request handlers for each endpoint
//! - [`api::routes`](crate::api::routes) - Route definitions and router configuration
//!
//! # API Endpoints
//!
//! - `POST /chat` - RAG answer or keyword reply, depending on `server.mode`
//! - `GET /health` - Health check endpoint
//! - `GET /api-docs/openapi.json` - OpenAPI document for the active mode
//!
//! # OpenAPI Documentation
//!
//! When the `swagger-ui` feature is enabled, interactive API documentation
//! is available at `/swagger-ui/`.

/// Request and response handlers for all API endpoints.
pub mod handlers;
/// Router configuration and route definitions.
pub mod routes;

use crate::types::{
    ErrorResponse, HealthResponse, QueryResponse, RagChatRequest, RagChatResponse,
    ResponseStatus, RulesChatRequest, ScoreResponse, StatusErrorResponse,
};
use crate::utils::toml_config::ChatMode;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(title = "WellNest RAG API", description = "Knowledge-base answers conditioned on a PHQ-9 score"),
    paths(handlers::rag::chat, handlers::health::health),
    components(schemas(RagChatRequest, RagChatResponse, ErrorResponse, HealthResponse)),
    tags((name = "chat"), (name = "health"))
)]
pub struct RagApiDoc;

#[derive(OpenApi)]
#[openapi(
    info(title = "WellNest Keyword API", description = "PHQ-9 score bands and keyword replies"),
    paths(handlers::rules::chat, handlers::health::health),
    components(schemas(
        RulesChatRequest,
        ScoreResponse,
        QueryResponse,
        StatusErrorResponse,
        ResponseStatus,
        HealthResponse
    )),
    tags((name = "chat"), (name = "health"))
)]
pub struct RulesApiDoc;

/// OpenAPI document describing the endpoints mounted for `mode`.
pub fn openapi_for(mode: ChatMode) -> utoipa::openapi::OpenApi {
    match mode {
        ChatMode::Rag => RagApiDoc::openapi(),
        ChatMode::Rules => RulesApiDoc::openapi(),
    }
}
