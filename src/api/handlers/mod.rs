//! API request handlers.
//!
//! `POST /chat` has two implementations; the router mounts exactly one of
//! them depending on the configured [`ChatMode`](crate::utils::toml_config::ChatMode).

/// Health check handler.
pub mod health;
/// RAG chat handler.
pub mod rag;
/// Keyword responder chat handler.
pub mod rules;
