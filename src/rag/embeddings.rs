//! Dense text embeddings.
//!
//! [`Embedder`] is the seam the vector index talks to. The default
//! implementation, [`FastEmbedder`], runs a local ONNX sentence-embedding
//! model through fastembed (feature `local-embeddings`).

use crate::types::{AppError, Result};
use std::fmt;
use std::str::FromStr;

/// Maps text to fixed-dimension vectors.
///
/// Implementations must be deterministic for a given model version, since
/// persisted document vectors are compared against freshly embedded queries.
pub trait Embedder: Send + Sync {
    /// Name of the underlying model.
    fn model_name(&self) -> &str;

    /// Embed a batch of documents, one vector per input, in order.
    fn embed_documents(&self, texts: &[String]) -> Result<Vec<Vec<f32>>>;

    /// Embed a single query.
    fn embed_query(&self, text: &str) -> Result<Vec<f32>>;
}

// ============= Model Selection =============

/// Supported sentence-embedding models.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EmbeddingModelType {
    #[default]
    AllMiniLML6V2,
    BGESmallENV15,
    BGEBaseENV15,
}

impl EmbeddingModelType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EmbeddingModelType::AllMiniLML6V2 => "sentence-transformers/all-MiniLM-L6-v2",
            EmbeddingModelType::BGESmallENV15 => "BAAI/bge-small-en-v1.5",
            EmbeddingModelType::BGEBaseENV15 => "BAAI/bge-base-en-v1.5",
        }
    }

    #[cfg(feature = "local-embeddings")]
    fn to_fastembed(self) -> fastembed::EmbeddingModel {
        match self {
            EmbeddingModelType::AllMiniLML6V2 => fastembed::EmbeddingModel::AllMiniLML6V2,
            EmbeddingModelType::BGESmallENV15 => fastembed::EmbeddingModel::BGESmallENV15,
            EmbeddingModelType::BGEBaseENV15 => fastembed::EmbeddingModel::BGEBaseENV15,
        }
    }
}

impl fmt::Display for EmbeddingModelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EmbeddingModelType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "sentence-transformers/all-MiniLM-L6-v2" | "all-MiniLM-L6-v2" => {
                Ok(EmbeddingModelType::AllMiniLML6V2)
            }
            "BAAI/bge-small-en-v1.5" | "bge-small-en-v1.5" => Ok(EmbeddingModelType::BGESmallENV15),
            "BAAI/bge-base-en-v1.5" | "bge-base-en-v1.5" => Ok(EmbeddingModelType::BGEBaseENV15),
            other => Err(format!("Unknown embedding model: {}", other)),
        }
    }
}

// ============= fastembed Implementation =============

#[cfg(feature = "local-embeddings")]
pub use local::FastEmbedder;

#[cfg(feature = "local-embeddings")]
mod local {
    use super::{Embedder, EmbeddingModelType};
    use crate::types::{AppError, Result};
    use fastembed::{InitOptions, TextEmbedding};
    use parking_lot::Mutex;
    use std::path::PathBuf;
    use tracing::{debug, info};

    /// Local ONNX embeddings via fastembed.
    ///
    /// The session needs exclusive access while embedding, so calls are
    /// serialized behind a mutex.
    pub struct FastEmbedder {
        model: Mutex<TextEmbedding>,
        model_type: EmbeddingModelType,
    }

    impl FastEmbedder {
        /// Load (downloading on first use) the given model.
        pub fn new(model_type: EmbeddingModelType, cache_dir: Option<PathBuf>) -> Result<Self> {
            info!(model = model_type.as_str(), "Loading embedding model");

            let mut options =
                InitOptions::new(model_type.to_fastembed()).with_show_download_progress(true);
            if let Some(dir) = cache_dir {
                options = options.with_cache_dir(dir);
            }

            let model = TextEmbedding::try_new(options)
                .map_err(|e| AppError::Embedding(format!("Failed to load model: {}", e)))?;

            Ok(Self {
                model: Mutex::new(model),
                model_type,
            })
        }
    }

    impl Embedder for FastEmbedder {
        fn model_name(&self) -> &str {
            self.model_type.as_str()
        }

        fn embed_documents(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
            debug!(count = texts.len(), "Embedding documents");
            self.model
                .lock()
                .embed(texts, None)
                .map_err(|e| AppError::Embedding(e.to_string()))
        }

        fn embed_query(&self, text: &str) -> Result<Vec<f32>> {
            let mut vectors = self
                .model
                .lock()
                .embed(&[text], None)
                .map_err(|e| AppError::Embedding(e.to_string()))?;
            vectors
                .pop()
                .ok_or_else(|| AppError::Embedding("Model returned no embedding".to_string()))
        }
    }
}

/// Build the configured embedder.
pub fn embedder_from_name(
    name: &str,
    cache_dir: Option<std::path::PathBuf>,
) -> Result<std::sync::Arc<dyn Embedder>> {
    let model_type: EmbeddingModelType = name.parse().map_err(AppError::Configuration)?;

    #[cfg(feature = "local-embeddings")]
    {
        Ok(std::sync::Arc::new(FastEmbedder::new(model_type, cache_dir)?))
    }

    #[cfg(not(feature = "local-embeddings"))]
    {
        let _ = cache_dir;
        Err(AppError::Configuration(format!(
            "Embedding model {} requires the 'local-embeddings' feature",
            model_type
        )))
    }
}
