use crate::llm::client::LLMClient;
use crate::types::{AppError, Result};
use async_trait::async_trait;
use ollama_rs::{
    Ollama,
    generation::chat::{ChatMessage, request::ChatMessageRequest},
};

const DEFAULT_OLLAMA_PORT: u16 = 11434;

pub struct OllamaClient {
    client: Ollama,
    model: String,
}

impl OllamaClient {
    pub fn new(base_url: String, model: String) -> Result<Self> {
        let (host, port) = split_base_url(&base_url)?;
        let client = Ollama::new(host, port);

        Ok(Self { client, model })
    }
}

/// Split `scheme://host[:port]` into the `(scheme://host, port)` pair ollama-rs expects.
fn split_base_url(base_url: &str) -> Result<(String, u16)> {
    let url = reqwest::Url::parse(base_url)
        .map_err(|e| AppError::Configuration(format!("Invalid Ollama URL '{}': {}", base_url, e)))?;
    let host = url
        .host_str()
        .ok_or_else(|| AppError::Configuration(format!("Ollama URL '{}' has no host", base_url)))?;
    let port = url.port().unwrap_or(DEFAULT_OLLAMA_PORT);

    Ok((format!("{}://{}", url.scheme(), host), port))
}

#[async_trait]
impl LLMClient for OllamaClient {
    async fn generate(&self, prompt: &str) -> Result<String> {
        let messages = vec![ChatMessage::user(prompt.to_string())];

        let request = ChatMessageRequest::new(self.model.clone(), messages);

        let response = self
            .client
            .send_chat_messages(request)
            .await
            .map_err(|e| AppError::LLM(format!("Ollama error: {}", e)))?;

        Ok(response.message.content)
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
