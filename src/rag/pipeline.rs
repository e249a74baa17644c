//! The retrieve → assemble → generate pass behind `POST /chat` in RAG mode.

use crate::db::{IndexOrigin, IndexSettings, VectorIndex};
use crate::llm::LLMClient;
use crate::rag::chunker::TextChunker;
use crate::rag::embeddings::{self, Embedder};
use crate::rag::loader::KnowledgeLoader;
use crate::rag::prompt::{ChainInput, build_prompt};
use crate::types::Result;
use crate::utils::toml_config::WellnestConfig;
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Separator between retrieved chunks in the prompt context.
pub const CONTEXT_SEPARATOR: &str = "\n\n";

/// Immutable service object shared by all requests.
pub struct RagPipeline {
    index: VectorIndex,
    llm: Arc<dyn LLMClient>,
    top_k: usize,
}

impl RagPipeline {
    pub fn new(index: VectorIndex, llm: Arc<dyn LLMClient>, top_k: usize) -> Self {
        Self { index, llm, top_k }
    }

    /// Build the pipeline from configuration: embedder, index (loaded or
    /// built) and model client.
    pub async fn from_config(config: &WellnestConfig) -> Result<(Self, IndexOrigin)> {
        let embedder = embeddings::embedder_from_name(
            &config.rag.embedding_model,
            config.rag.model_cache_dir.clone(),
        )?;

        let provider = config.llm_provider()?;
        let llm: Arc<dyn LLMClient> = Arc::from(provider.create_client().await?);
        info!(provider = provider.name(), model = llm.model_name(), "LLM client ready");

        let (index, origin) = open_index(config, embedder).await?;
        Ok((Self::new(index, llm, config.rag.top_k), origin))
    }

    /// Answer `question` for a user with PHQ-9 `score`.
    #[instrument(skip(self, question))]
    pub async fn answer(&self, question: &str, score: i64) -> Result<String> {
        let chunks = self.index.retrieve(question, self.top_k).await?;
        debug!(chunks = chunks.len(), "Assembling prompt");

        let input = ChainInput {
            context: chunks.join(CONTEXT_SEPARATOR),
            question: question.to_string(),
            score,
        };
        let prompt = build_prompt(&input);

        self.llm.generate(&prompt).await
    }

    pub fn index(&self) -> &VectorIndex {
        &self.index
    }
}

/// Open or build the configured vector index.
pub async fn open_index(
    config: &WellnestConfig,
    embedder: Arc<dyn Embedder>,
) -> Result<(VectorIndex, IndexOrigin)> {
    let rag = &config.rag;
    let settings = IndexSettings::new(&rag.persist_directory, &rag.collection_name);
    let chunker = TextChunker::new(rag.chunk_size, rag.chunk_overlap)?;
    let loader = KnowledgeLoader::new(&rag.knowledge_path, chunker);

    VectorIndex::open_or_build(&settings, embedder, &loader).await
}
