use crate::{AppState, types::HealthResponse};
use axum::{Json, extract::State};

/// Liveness check
#[utoipa::path(
    get,
    path = "/health",
    responses((status = 200, description = "Server is up", body = HealthResponse)),
    tag = "health"
)]
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        mode: state.config.server.mode.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
