use crate::AppState;
use crate::api::handlers;
use crate::utils::toml_config::ChatMode;
use axum::{
    Router,
    routing::{get, post},
};

pub fn create_router(mode: ChatMode) -> Router<AppState> {
    let chat = match mode {
        ChatMode::Rag => post(handlers::rag::chat),
        ChatMode::Rules => post(handlers::rules::chat),
    };

    let router = Router::new()
        .route("/chat", chat)
        .route("/health", get(handlers::health::health));

    with_api_docs(router, mode)
}

#[cfg(not(feature = "swagger-ui"))]
fn with_api_docs(router: Router<AppState>, mode: ChatMode) -> Router<AppState> {
    use axum::Json;

    let doc = crate::api::openapi_for(mode);
    router.route(
        "/api-docs/openapi.json",
        get(move || async move { Json(doc) }),
    )
}

#[cfg(feature = "swagger-ui")]
fn with_api_docs(router: Router<AppState>, mode: ChatMode) -> Router<AppState> {
    use utoipa_swagger_ui::SwaggerUi;

    router.merge(
        SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", crate::api::openapi_for(mode)),
    )
}
