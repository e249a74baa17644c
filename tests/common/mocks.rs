//! Mock implementations for testing.
//!
//! Mock LLM clients and embedders shared across test files, so the RAG
//! pipeline can be exercised without model downloads or network access.

use async_trait::async_trait;
use parking_lot::Mutex;
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use wellnest::db::{IndexOrigin, IndexSettings, VectorIndex};
use wellnest::llm::LLMClient;
use wellnest::rag::chunker::TextChunker;
use wellnest::rag::embeddings::Embedder;
use wellnest::rag::loader::KnowledgeLoader;
use wellnest::types::{AppError, Result};

/// Mock LLM client with a canned response.
///
/// Every prompt it receives is recorded, so tests can assert on what the
/// pipeline actually sent.
///
/// ```ignore
/// let client = MockLLMClient::new("Take a short walk.");
/// let client = MockLLMClient::failing();
/// ```
#[derive(Clone)]
pub struct MockLLMClient {
    response: String,
    should_fail: bool,
    prompts: Arc<Mutex<Vec<String>>>,
}

impl MockLLMClient {
    /// Create a new mock client that returns the given response.
    pub fn new(response: &str) -> Self {
        Self {
            response: response.to_string(),
            should_fail: false,
            prompts: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Create a mock client that always returns an error.
    pub fn failing() -> Self {
        Self {
            should_fail: true,
            ..Self::new("")
        }
    }

    /// Prompts received so far, oldest first.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().clone()
    }
}

#[async_trait]
impl LLMClient for MockLLMClient {
    async fn generate(&self, prompt: &str) -> Result<String> {
        self.prompts.lock().push(prompt.to_string());
        if self.should_fail {
            return Err(AppError::LLM("Mock LLM failure".to_string()));
        }
        Ok(self.response.clone())
    }

    fn model_name(&self) -> &str {
        "mock-model"
    }
}

/// Deterministic bag-of-words embedder.
///
/// Each lowercase word is hashed into one of `DIMENSIONS` buckets, so texts
/// sharing words end up close under cosine similarity. Batch calls are
/// counted to check that a persisted index is never re-embedded.
#[derive(Default)]
pub struct MockEmbedder {
    document_batches: AtomicUsize,
    queries: AtomicUsize,
}

impl MockEmbedder {
    pub const DIMENSIONS: usize = 64;

    pub fn new() -> Self {
        Self::default()
    }

    pub fn document_batches(&self) -> usize {
        self.document_batches.load(Ordering::SeqCst)
    }

    pub fn queries(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }

    fn embed(text: &str) -> Vec<f32> {
        let mut vector = vec![0.0f32; Self::DIMENSIONS];
        for word in text
            .split(|c: char| !c.is_alphanumeric())
            .filter(|w| !w.is_empty())
        {
            let bucket = fnv1a(&word.to_lowercase()) as usize % Self::DIMENSIONS;
            vector[bucket] += 1.0;
        }
        // keep empty text off the zero vector
        vector[Self::DIMENSIONS - 1] += 0.01;
        vector
    }
}

fn fnv1a(text: &str) -> u64 {
    text.bytes().fold(0xcbf29ce484222325, |hash, byte| {
        (hash ^ byte as u64).wrapping_mul(0x100000001b3)
    })
}

impl Embedder for MockEmbedder {
    fn model_name(&self) -> &str {
        "mock-embedder"
    }

    fn embed_documents(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        self.document_batches.fetch_add(1, Ordering::SeqCst);
        Ok(texts.iter().map(|t| Self::embed(t)).collect())
    }

    fn embed_query(&self, text: &str) -> Result<Vec<f32>> {
        self.queries.fetch_add(1, Ordering::SeqCst);
        Ok(Self::embed(text))
    }
}

/// Write `knowledge` to `dir/report.txt` and open (or build) an index over it
/// under `dir/chroma_db`.
pub async fn index_for(
    dir: &Path,
    knowledge: &str,
    embedder: Arc<MockEmbedder>,
    chunker: TextChunker,
) -> Result<(VectorIndex, IndexOrigin)> {
    let knowledge_path = dir.join("report.txt");
    std::fs::write(&knowledge_path, knowledge)
        .map_err(|e| AppError::Internal(e.to_string()))?;

    let settings = IndexSettings::new(dir.join("chroma_db"), "embeddings");
    let loader = KnowledgeLoader::new(knowledge_path, chunker);
    VectorIndex::open_or_build(&settings, embedder, &loader).await
}
