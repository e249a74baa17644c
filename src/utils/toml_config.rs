//! TOML-based configuration for WellNest
//!
//! All settings live in a single file (`wellnest.toml` by default). Secrets
//! are never written into the file; instead the file names the environment
//! variable that holds them (e.g. `api_key_env = "GOOGLE_API_KEY"`).
//!
//! The configuration is loaded once at startup and shared read-only.

use crate::llm::Provider;
use crate::rag::embeddings::EmbeddingModelType;
use crate::types::AppError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Root configuration structure loaded from wellnest.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WellnestConfig {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub rag: RagConfig,

    #[serde(default)]
    pub llm: LlmConfig,
}

// ============= Server Configuration =============

/// Which implementation of `POST /chat` the server exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatMode {
    /// Retrieval-augmented answers from the knowledge base.
    #[default]
    Rag,
    /// Keyword responder, no model calls.
    Rules,
}

impl ChatMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChatMode::Rag => "rag",
            ChatMode::Rules => "rules",
        }
    }
}

impl fmt::Display for ChatMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChatMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "rag" => Ok(ChatMode::Rag),
            "rules" | "rule" | "keyword" => Ok(ChatMode::Rules),
            other => Err(format!("unknown chat mode '{}', expected 'rag' or 'rules'", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default)]
    pub mode: ChatMode,

    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub log_format: LogFormat,

    /// Maximum accepted request body size in bytes
    #[serde(default = "default_body_limit")]
    pub body_limit: usize,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_body_limit() -> usize {
    64 * 1024
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            mode: ChatMode::default(),
            log_level: default_log_level(),
            log_format: LogFormat::default(),
            body_limit: default_body_limit(),
        }
    }
}

// ============= RAG Configuration =============

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RagConfig {
    /// Knowledge-base text file, only read when the index has to be built
    #[serde(default = "default_knowledge_path")]
    pub knowledge_path: PathBuf,

    /// Directory holding the persisted vector index
    #[serde(default = "default_persist_directory")]
    pub persist_directory: PathBuf,

    #[serde(default = "default_collection_name")]
    pub collection_name: String,

    #[serde(default = "default_embedding_model")]
    pub embedding_model: String,

    /// Where fastembed caches downloaded model files
    #[serde(default)]
    pub model_cache_dir: Option<PathBuf>,

    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,

    #[serde(default = "default_chunk_overlap")]
    pub chunk_overlap: usize,

    /// Number of chunks retrieved per question
    #[serde(default = "default_top_k")]
    pub top_k: usize,
}

fn default_knowledge_path() -> PathBuf {
    PathBuf::from("report.txt")
}

fn default_persist_directory() -> PathBuf {
    PathBuf::from("chroma_db")
}

fn default_collection_name() -> String {
    "embeddings".to_string()
}

fn default_embedding_model() -> String {
    EmbeddingModelType::default().as_str().to_string()
}

fn default_chunk_size() -> usize {
    700
}

fn default_chunk_overlap() -> usize {
    50
}

fn default_top_k() -> usize {
    4
}

impl Default for RagConfig {
    fn default() -> Self {
        Self {
            knowledge_path: default_knowledge_path(),
            persist_directory: default_persist_directory(),
            collection_name: default_collection_name(),
            embedding_model: default_embedding_model(),
            model_cache_dir: None,
            chunk_size: default_chunk_size(),
            chunk_overlap: default_chunk_overlap(),
            top_k: default_top_k(),
        }
    }
}

// ============= LLM Configuration =============

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    #[default]
    Gemini,
    Ollama,
    OpenAI,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    #[serde(default)]
    pub provider: ProviderKind,

    #[serde(default = "default_model")]
    pub model: String,

    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Environment variable containing the API key (hosted providers only)
    #[serde(default = "default_api_key_env")]
    pub api_key_env: Option<String>,

    /// Override for the provider's API base URL
    #[serde(default)]
    pub base_url: Option<String>,
}

fn default_model() -> String {
    "gemini-1.5-flash".to_string()
}

fn default_temperature() -> f32 {
    0.3
}

fn default_api_key_env() -> Option<String> {
    Some("GOOGLE_API_KEY".to_string())
}

fn default_ollama_url() -> String {
    "http://localhost:11434".to_string()
}

fn default_openai_base() -> String {
    "https://api.openai.com/v1".to_string()
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: ProviderKind::default(),
            model: default_model(),
            temperature: default_temperature(),
            api_key_env: default_api_key_env(),
            base_url: None,
        }
    }
}

// ============= Configuration Loading & Validation =============

/// Errors that can occur during configuration loading
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Failed to read configuration file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Environment variable '{0}' referenced in config is not set")]
    MissingEnvVar(String),
}

impl From<ConfigError> for AppError {
    fn from(err: ConfigError) -> Self {
        AppError::Configuration(err.to_string())
    }
}

impl WellnestConfig {
    /// Load configuration from a TOML file.
    ///
    /// Settings are checked later against the mode actually served, since
    /// `serve --mode` may override the file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path)?;
        let config: WellnestConfig = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load `path`, falling back to defaults when the file is absent and
    /// `required` is false.
    pub fn load_or_default<P: AsRef<Path>>(path: P, required: bool) -> Result<Self, ConfigError> {
        match Self::load(path) {
            Err(ConfigError::FileNotFound(_)) if !required => Ok(Self::default()),
            other => other,
        }
    }

    /// Validate the `[rag]` and `[llm]` settings without touching the environment.
    pub fn validate_rag(&self) -> Result<(), ConfigError> {
        let rag = &self.rag;

        if rag.chunk_size == 0 {
            return Err(ConfigError::ValidationError(
                "rag.chunk_size must be greater than 0".to_string(),
            ));
        }
        if rag.chunk_overlap >= rag.chunk_size {
            return Err(ConfigError::ValidationError(format!(
                "rag.chunk_overlap ({}) must be smaller than rag.chunk_size ({})",
                rag.chunk_overlap, rag.chunk_size
            )));
        }
        if rag.top_k == 0 {
            return Err(ConfigError::ValidationError(
                "rag.top_k must be at least 1".to_string(),
            ));
        }
        if rag.collection_name.is_empty()
            || rag.collection_name.contains(['/', '\\'])
            || rag.collection_name.starts_with('.')
        {
            return Err(ConfigError::ValidationError(format!(
                "rag.collection_name '{}' is not a valid directory name",
                rag.collection_name
            )));
        }
        rag.embedding_model
            .parse::<EmbeddingModelType>()
            .map_err(ConfigError::ValidationError)?;

        if !(0.0..=2.0).contains(&self.llm.temperature) {
            return Err(ConfigError::ValidationError(format!(
                "llm.temperature must be within 0.0..=2.0, got {}",
                self.llm.temperature
            )));
        }

        Ok(())
    }

    /// Validate the environment needed to run in `mode`.
    ///
    /// The keyword responder needs nothing; the RAG pipeline needs valid
    /// `[rag]` settings and the LLM API key for hosted providers.
    pub fn validate_for_mode(&self, mode: ChatMode) -> Result<(), ConfigError> {
        match mode {
            ChatMode::Rules => Ok(()),
            ChatMode::Rag => {
                self.validate_rag()?;
                self.llm_provider().map(|_| ())
            }
        }
    }

    /// Get a resolved value from an env var reference
    pub fn resolve_env(&self, env_name: &str) -> Option<String> {
        std::env::var(env_name).ok().filter(|v| !v.is_empty())
    }

    /// Build the LLM provider description, resolving secrets from the environment.
    pub fn llm_provider(&self) -> Result<Provider, ConfigError> {
        self.llm_provider_with(|name| self.resolve_env(name))
    }

    /// Build the LLM provider description with `lookup` resolving the
    /// variable named by `llm.api_key_env`.
    pub fn llm_provider_with<F>(&self, lookup: F) -> Result<Provider, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let llm = &self.llm;
        match llm.provider {
            ProviderKind::Gemini => Ok(Provider::Gemini {
                api_key: self.required_api_key(&lookup)?,
                base_url: llm.base_url.clone(),
                model: llm.model.clone(),
                temperature: llm.temperature,
            }),
            ProviderKind::OpenAI => Ok(Provider::OpenAI {
                api_key: self.required_api_key(&lookup)?,
                api_base: llm.base_url.clone().unwrap_or_else(default_openai_base),
                model: llm.model.clone(),
                temperature: llm.temperature,
            }),
            ProviderKind::Ollama => Ok(Provider::Ollama {
                base_url: llm.base_url.clone().unwrap_or_else(default_ollama_url),
                model: llm.model.clone(),
            }),
        }
    }

    fn required_api_key<F>(&self, lookup: &F) -> Result<String, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env_name = self.llm.api_key_env.as_deref().ok_or_else(|| {
            ConfigError::ValidationError(format!(
                "llm.api_key_env is required for the {:?} provider",
                self.llm.provider
            ))
        })?;
        lookup(env_name)
            .filter(|v| !v.is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar(env_name.to_string()))
    }
}
