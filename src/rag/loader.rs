//! Knowledge-base loading.

use crate::rag::chunker::TextChunker;
use crate::types::{AppError, Result};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Reads the knowledge-base document and splits it into chunks.
#[derive(Debug, Clone)]
pub struct KnowledgeLoader {
    path: PathBuf,
    chunker: TextChunker,
}

impl KnowledgeLoader {
    pub fn new(path: impl Into<PathBuf>, chunker: TextChunker) -> Self {
        Self {
            path: path.into(),
            chunker,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the whole document as UTF-8.
    pub async fn read(&self) -> Result<String> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(text) => Ok(text),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(AppError::NotFound(
                format!("knowledge file {}", self.path.display()),
            )),
            Err(e) => Err(AppError::Internal(format!(
                "Failed to read {}: {}",
                self.path.display(),
                e
            ))),
        }
    }

    /// Read the document and return its chunks in order.
    pub async fn load_chunks(&self) -> Result<Vec<String>> {
        let text = self.read().await?;
        let chunks = self.chunker.chunk(&text);
        debug!(
            path = %self.path.display(),
            chars = text.chars().count(),
            chunks = chunks.len(),
            "Chunked knowledge file"
        );
        Ok(chunks)
    }
}
