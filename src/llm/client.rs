//! LLM client abstraction and provider selection
//!
//! Supported providers:
//! - **Gemini**: Google Generative Language REST API (always available)
//! - **Ollama**: local inference server (feature `ollama`)
//! - **OpenAI**: OpenAI and compatible chat-completions APIs (feature `openai`)

use crate::types::Result;
use async_trait::async_trait;

/// Generic LLM client trait for provider abstraction
///
/// Failures are returned to the caller as-is; clients never retry or fall
/// back to another provider.
#[async_trait]
pub trait LLMClient: Send + Sync {
    /// Generate a completion from a prompt
    async fn generate(&self, prompt: &str) -> Result<String>;

    /// Get the model name/identifier
    fn model_name(&self) -> &str;
}

/// Provider enum for runtime selection
///
/// Built from the `[llm]` config section with secrets already resolved.
#[derive(Debug, Clone)]
pub enum Provider {
    /// Google Gemini
    ///
    /// # Example
    /// ```rust,ignore
    /// let provider = Provider::Gemini {
    ///     api_key: std::env::var("GOOGLE_API_KEY")?,
    ///     base_url: None,
    ///     model: "gemini-1.5-flash".to_string(),
    ///     temperature: 0.3,
    /// };
    /// ```
    Gemini {
        api_key: String,
        /// Overrides the public endpoint, mainly for tests
        base_url: Option<String>,
        model: String,
        temperature: f32,
    },

    /// OpenAI API provider (including compatible APIs)
    OpenAI {
        api_key: String,
        api_base: String,
        model: String,
        temperature: f32,
    },

    /// Ollama local LLM provider
    Ollama { base_url: String, model: String },
}

impl Provider {
    /// Create a client instance for this provider
    ///
    /// # Errors
    ///
    /// Returns an error if the provider's Cargo feature is disabled or the
    /// client cannot be constructed.
    pub async fn create_client(&self) -> Result<Box<dyn LLMClient>> {
        match self {
            Provider::Gemini {
                api_key,
                base_url,
                model,
                temperature,
            } => Ok(Box::new(super::gemini::GeminiClient::new(
                api_key.clone(),
                base_url.clone(),
                model.clone(),
                *temperature,
            )?)),

            #[cfg(feature = "openai")]
            Provider::OpenAI {
                api_key,
                api_base,
                model,
                temperature,
            } => Ok(Box::new(super::openai::OpenAIClient::new(
                api_key.clone(),
                api_base.clone(),
                model.clone(),
                *temperature,
            ))),

            #[cfg(not(feature = "openai"))]
            Provider::OpenAI { .. } => Err(crate::types::AppError::Configuration(
                "OpenAI provider requires the 'openai' feature".to_string(),
            )),

            #[cfg(feature = "ollama")]
            Provider::Ollama { base_url, model } => Ok(Box::new(
                super::ollama::OllamaClient::new(base_url.clone(), model.clone())?,
            )),

            #[cfg(not(feature = "ollama"))]
            Provider::Ollama { .. } => Err(crate::types::AppError::Configuration(
                "Ollama provider requires the 'ollama' feature".to_string(),
            )),
        }
    }

    /// Get a human-readable name for this provider
    pub fn name(&self) -> &'static str {
        match self {
            Provider::Gemini { .. } => "Gemini",
            Provider::OpenAI { .. } => "OpenAI",
            Provider::Ollama { .. } => "Ollama",
        }
    }
}
