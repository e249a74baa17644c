//! LLM Provider Clients
//!
//! The RAG pipeline talks to the model through the [`LLMClient`] trait; which
//! implementation it gets is decided at startup from the `[llm]` config
//! section via [`Provider::create_client`].
//!
//! # Supported Providers
//!
//! - Gemini (always compiled, plain `reqwest`)
//! - `ollama` feature - Local Ollama server
//! - `openai` feature - OpenAI API and compatible endpoints

/// Core LLM client trait and provider selection.
pub mod client;
/// Google Gemini REST client.
pub mod gemini;

#[cfg(feature = "ollama")]
pub mod ollama;

#[cfg(feature = "openai")]
pub mod openai;

pub use client::{LLMClient, Provider};
