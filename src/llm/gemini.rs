//! Google Gemini client over the Generative Language REST API.

use crate::llm::client::LLMClient;
use crate::types::{AppError, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Header carrying the API key. Request URLs stay free of secrets.
const API_KEY_HEADER: &str = "x-goog-api-key";

pub struct GeminiClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
    temperature: f32,
}

// ============= Wire Types =============

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    role: &'static str,
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

impl GeminiClient {
    pub fn new(
        api_key: String,
        base_url: Option<String>,
        model: String,
        temperature: f32,
    ) -> Result<Self> {
        if api_key.is_empty() {
            return Err(AppError::Configuration(
                "Gemini API key is empty".to_string(),
            ));
        }

        let base_url = base_url
            .unwrap_or_else(|| DEFAULT_GEMINI_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        Ok(Self {
            client: reqwest::Client::new(),
            api_key,
            base_url,
            model,
            temperature,
        })
    }

    fn endpoint_url(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }

    fn map_http_error(status: reqwest::StatusCode, body_text: &str) -> AppError {
        match status.as_u16() {
            401 | 403 => AppError::LLM("Gemini authentication failed".to_string()),
            429 => AppError::LLM("Gemini rate limit exceeded".to_string()),
            _ => AppError::LLM(format!("HTTP {} from Gemini API: {}", status, body_text)),
        }
    }

    /// Concatenate the text parts of the first candidate.
    fn extract_answer(response: GenerateContentResponse) -> Result<String> {
        let candidate = response
            .candidates
            .into_iter()
            .next()
            .ok_or_else(|| AppError::LLM("No candidates in Gemini response".to_string()))?;

        let parts = candidate.content.map(|c| c.parts).unwrap_or_default();
        let texts: Vec<String> = parts.into_iter().filter_map(|p| p.text).collect();
        if texts.is_empty() {
            return Err(AppError::LLM(
                "Gemini response contained no text".to_string(),
            ));
        }
        Ok(texts.concat())
    }
}

#[async_trait]
impl LLMClient for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String> {
        let body = GenerateContentRequest {
            contents: vec![Content {
                role: "user",
                parts: vec![RequestPart { text: prompt }],
            }],
            generation_config: GenerationConfig {
                temperature: self.temperature,
            },
        };

        debug!(model = self.model.as_str(), "Sending Gemini request");

        let response = self
            .client
            .post(self.endpoint_url())
            .header(API_KEY_HEADER, self.api_key.as_str())
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                AppError::LLM(format!("Request to Gemini API failed: {}", e.without_url()))
            })?;

        let status = response.status();
        let body_text = response
            .text()
            .await
            .map_err(|e| {
                AppError::LLM(format!("Failed to read Gemini response: {}", e.without_url()))
            })?;

        if !status.is_success() {
            return Err(Self::map_http_error(status, &body_text));
        }

        let parsed: GenerateContentResponse = serde_json::from_str(&body_text)
            .map_err(|e| AppError::LLM(format!("Invalid JSON from Gemini: {}", e)))?;

        Self::extract_answer(parsed)
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
