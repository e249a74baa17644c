//! # WellNest - mental-health support chat server
//!
//! A small HTTP backend exposing `POST /chat` for a mental-health support
//! assistant. Two implementations exist, chosen at startup:
//!
//! 1. **rules** - PHQ-9 score bands plus case-insensitive keyword replies
//! 2. **rag** - answers grounded in a knowledge-base document, generated by
//!    an LLM and conditioned on the user's PHQ-9 score
//!
//! ## Quick Start (Library Usage)
//!
//! ```rust,ignore
//! use wellnest::{AppState, WellnestConfig, create_app, rag::pipeline::RagPipeline};
//! use std::sync::Arc;
//!
//! let config = WellnestConfig::load("wellnest.toml")?;
//! let (pipeline, _origin) = RagPipeline::from_config(&config).await?;
//! let app = create_app(AppState::new(config, Some(Arc::new(pipeline))));
//!
//! let listener = tokio::net::TcpListener::bind("127.0.0.1:5000").await?;
//! axum::serve(listener, app).await?;
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `local-embeddings` | fastembed ONNX sentence embeddings (default) |
//! | `ollama` | Ollama LLM provider (default) |
//! | `openai` | OpenAI-compatible LLM provider |
//! | `swagger-ui` | Interactive API docs at `/swagger-ui/` |

pub mod api;
pub mod cli;
pub mod db;
pub mod llm;
pub mod rag;
pub mod rules;
pub mod types;
pub mod utils;

pub use llm::{LLMClient, Provider};
pub use rag::embeddings::Embedder;
pub use rag::pipeline::RagPipeline;
pub use types::{AppError, Result};
pub use utils::toml_config::{ChatMode, WellnestConfig};

use axum::Router;
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    trace::TraceLayer,
};

/// Application state shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// Effective configuration (file + CLI overrides)
    pub config: Arc<WellnestConfig>,
    /// RAG pipeline; `None` in rules mode or when initialization failed
    pub pipeline: Option<Arc<RagPipeline>>,
}

impl AppState {
    pub fn new(config: WellnestConfig, pipeline: Option<Arc<RagPipeline>>) -> Self {
        Self {
            config: Arc::new(config),
            pipeline,
        }
    }
}

/// Build the HTTP application for the configured mode.
pub fn create_app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    api::routes::create_router(state.config.server.mode)
        .layer(RequestBodyLimitLayer::new(state.config.server.body_limit))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
