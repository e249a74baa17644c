//! Persistent vector index over the knowledge base.
//!
//! The index is built at most once per persisted location
//! (`persist_directory` + `collection_name`). A later start finds
//! `<persist_directory>/<collection_name>/metadata.json` and loads the stored
//! vectors without reading the knowledge file or embedding anything.
//!
//! # Example
//!
//! ```rust,ignore
//! let (index, origin) = VectorIndex::open_or_build(&settings, embedder, &loader).await?;
//! let chunks = index.retrieve("What does a PHQ-9 score of 12 mean?", 4).await?;
//! ```

use crate::rag::embeddings::Embedder;
use crate::rag::loader::KnowledgeLoader;
use crate::types::{AppError, Result, RetrievedChunk};
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info, instrument};
use wellnest_vector::{Config, DistanceMetric, VectorDb, VectorMetadata};

/// Where the index lives on disk.
#[derive(Debug, Clone)]
pub struct IndexSettings {
    pub persist_directory: PathBuf,
    pub collection_name: String,
}

impl IndexSettings {
    pub fn new(persist_directory: impl Into<PathBuf>, collection_name: impl Into<String>) -> Self {
        Self {
            persist_directory: persist_directory.into(),
            collection_name: collection_name.into(),
        }
    }
}

/// How [`VectorIndex::open_or_build`] produced the index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexOrigin {
    /// Reused a previously persisted collection.
    Loaded,
    /// Embedded the knowledge file and persisted the result.
    Built,
}

impl fmt::Display for IndexOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndexOrigin::Loaded => f.write_str("loaded"),
            IndexOrigin::Built => f.write_str("built"),
        }
    }
}

/// A ready-to-query vector index.
pub struct VectorIndex {
    db: VectorDb,
    collection: String,
    embedder: Arc<dyn Embedder>,
}

impl VectorIndex {
    /// Load the persisted index, or build and persist it from `loader`.
    #[instrument(skip_all, fields(collection = %settings.collection_name))]
    pub async fn open_or_build(
        settings: &IndexSettings,
        embedder: Arc<dyn Embedder>,
        loader: &KnowledgeLoader,
    ) -> Result<(Self, IndexOrigin)> {
        let db = VectorDb::open(Config::persistent(&settings.persist_directory)).await?;
        let collection = settings.collection_name.clone();

        if db.collection_exists(&collection) {
            let loaded = db.load_collection(&collection).await?;
            info!(
                path = %settings.persist_directory.display(),
                vectors = loaded.len(),
                "Loaded existing vector index"
            );
            let index = Self {
                db,
                collection,
                embedder,
            };
            return Ok((index, IndexOrigin::Loaded));
        }

        info!(
            path = %settings.persist_directory.display(),
            knowledge = %loader.path().display(),
            "No persisted index found, building from knowledge file"
        );

        let chunks = loader.load_chunks().await?;
        // Whitespace-only files chunk into blank windows.
        if chunks.iter().all(|chunk| chunk.trim().is_empty()) {
            return Err(AppError::InvalidInput(format!(
                "knowledge base produced no chunks: {}",
                loader.path().display()
            )));
        }

        let vectors = embed_blocking(embedder.clone(), chunks.clone()).await?;
        if vectors.len() != chunks.len() {
            return Err(AppError::Embedding(format!(
                "expected {} embeddings, got {}",
                chunks.len(),
                vectors.len()
            )));
        }
        let dimensions = vectors.first().map(Vec::len).unwrap_or(0);

        db.create_collection(&collection, dimensions, DistanceMetric::Cosine)?;
        let source = loader.path().display().to_string();
        for (i, (chunk, vector)) in chunks.iter().zip(&vectors).enumerate() {
            let mut metadata = VectorMetadata::new();
            metadata.insert("source".to_string(), source.clone());
            metadata.insert("chunk_index".to_string(), i.to_string());
            db.insert(&collection, &chunk_id(i), vector, chunk, metadata)?;
        }
        db.persist(&collection).await?;

        info!(chunks = chunks.len(), dimensions, "Built and persisted vector index");

        let index = Self {
            db,
            collection,
            embedder,
        };
        Ok((index, IndexOrigin::Built))
    }

    /// Up to `k` chunk texts, closest first.
    pub async fn retrieve(&self, query: &str, k: usize) -> Result<Vec<String>> {
        Ok(self
            .retrieve_scored(query, k)
            .await?
            .into_iter()
            .map(|chunk| chunk.text)
            .collect())
    }

    /// Up to `k` chunks with their similarity scores, closest first.
    pub async fn retrieve_scored(&self, query: &str, k: usize) -> Result<Vec<RetrievedChunk>> {
        if k == 0 {
            return Ok(Vec::new());
        }

        let embedder = self.embedder.clone();
        let query_text = query.to_string();
        let query_vector = tokio::task::spawn_blocking(move || embedder.embed_query(&query_text))
            .await
            .map_err(|e| AppError::Internal(format!("Embedding task failed: {}", e)))??;

        let hits = self.db.search(&self.collection, &query_vector, k)?;
        debug!(requested = k, returned = hits.len(), "Retrieved context chunks");

        Ok(hits
            .into_iter()
            .map(|hit| RetrievedChunk {
                id: hit.id,
                text: hit.document,
                score: hit.score,
            })
            .collect())
    }

    /// Number of stored chunks.
    pub fn len(&self) -> usize {
        self.db
            .get_collection(&self.collection)
            .map(|c| c.len())
            .unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn collection_name(&self) -> &str {
        &self.collection
    }
}

fn chunk_id(index: usize) -> String {
    format!("chunk-{:04}", index)
}

async fn embed_blocking(embedder: Arc<dyn Embedder>, chunks: Vec<String>) -> Result<Vec<Vec<f32>>> {
    tokio::task::spawn_blocking(move || embedder.embed_documents(&chunks))
        .await
        .map_err(|e| AppError::Internal(format!("Embedding task failed: {}", e)))?
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rag::chunker::TextChunker;

    /// One dimension per letter a-z, counting occurrences.
    struct LetterEmbedder;

    impl Embedder for LetterEmbedder {
        fn model_name(&self) -> &str {
            "letters"
        }

        fn embed_documents(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
            texts.iter().map(|t| self.embed_query(t)).collect()
        }

        fn embed_query(&self, text: &str) -> Result<Vec<f32>> {
            let mut v = vec![0.0; 26];
            for c in text.to_lowercase().chars().filter(char::is_ascii_lowercase) {
                v[(c as u8 - b'a') as usize] += 1.0;
            }
            if v.iter().all(|x| *x == 0.0) {
                v[0] = 0.001;
            }
            Ok(v)
        }
    }

    #[test]
    fn test_chunk_ids_sort_in_order() {
        assert_eq!(chunk_id(0), "chunk-0000");
        assert_eq!(chunk_id(42), "chunk-0042");
        assert!(chunk_id(9) < chunk_id(10));
    }

    #[tokio::test]
    async fn test_empty_knowledge_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let kb = dir.path().join("report.txt");
        std::fs::write(&kb, "").unwrap();

        let settings = IndexSettings::new(dir.path().join("db"), "embeddings");
        let loader = KnowledgeLoader::new(&kb, TextChunker::default());
        let result = VectorIndex::open_or_build(&settings, Arc::new(LetterEmbedder), &loader).await;

        assert!(matches!(result, Err(AppError::InvalidInput(msg)) if msg.contains("no chunks")));
        assert!(!dir.path().join("db").join("embeddings").join("metadata.json").exists());
    }

    #[tokio::test]
    async fn test_whitespace_knowledge_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let kb = dir.path().join("report.txt");
        std::fs::write(&kb, "   \n\n  \t ").unwrap();

        let settings = IndexSettings::new(dir.path().join("db"), "embeddings");
        let loader = KnowledgeLoader::new(&kb, TextChunker::default());
        let result = VectorIndex::open_or_build(&settings, Arc::new(LetterEmbedder), &loader).await;

        assert!(matches!(result, Err(AppError::InvalidInput(msg)) if msg.contains("no chunks")));
        assert!(!dir.path().join("db").join("embeddings").join("metadata.json").exists());
    }

    #[tokio::test]
    async fn test_build_then_retrieve() {
        let dir = tempfile::tempdir().unwrap();
        let kb = dir.path().join("report.txt");
        std::fs::write(&kb, "aaaa bbbb cccc").unwrap();

        let settings = IndexSettings::new(dir.path().join("db"), "embeddings");
        let loader = KnowledgeLoader::new(&kb, TextChunker::new(5, 0).unwrap());
        let (index, origin) =
            VectorIndex::open_or_build(&settings, Arc::new(LetterEmbedder), &loader)
                .await
                .unwrap();

        assert_eq!(origin, IndexOrigin::Built);
        assert_eq!(index.len(), 3);

        let hits = index.retrieve("bbbb", 1).await.unwrap();
        assert_eq!(hits, vec!["bbbb ".to_string()]);
        assert!(index.retrieve("bbbb", 0).await.unwrap().is_empty());
    }
}
