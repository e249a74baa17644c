//! Character-window text chunking.
//!
//! Windows are measured in characters (Unicode scalar values), never bytes,
//! so a multi-byte code point is never split across chunks.

use crate::types::{AppError, Result};

/// Splits text into fixed-size, overlapping character windows.
#[derive(Debug, Clone, Copy)]
pub struct TextChunker {
    chunk_size: usize,
    chunk_overlap: usize,
}

impl TextChunker {
    /// Create a chunker. `chunk_overlap` must be smaller than `chunk_size`.
    pub fn new(chunk_size: usize, chunk_overlap: usize) -> Result<Self> {
        if chunk_size == 0 {
            return Err(AppError::Configuration(
                "chunk_size must be greater than 0".to_string(),
            ));
        }
        if chunk_overlap >= chunk_size {
            return Err(AppError::Configuration(format!(
                "chunk_overlap ({}) must be smaller than chunk_size ({})",
                chunk_overlap, chunk_size
            )));
        }
        Ok(Self {
            chunk_size,
            chunk_overlap,
        })
    }

    /// Split `text` into windows of `chunk_size` characters, each starting
    /// `chunk_size - chunk_overlap` characters after the previous one.
    ///
    /// The last window ends exactly at the end of the text. Empty text
    /// yields no chunks.
    pub fn chunk(&self, text: &str) -> Vec<String> {
        // byte offset of every char boundary, plus the end of the text
        let boundaries: Vec<usize> = text
            .char_indices()
            .map(|(i, _)| i)
            .chain(std::iter::once(text.len()))
            .collect();
        let char_count = boundaries.len() - 1;
        if char_count == 0 {
            return Vec::new();
        }

        let step = self.chunk_size - self.chunk_overlap;
        let mut chunks = Vec::new();
        let mut start = 0;

        loop {
            let end = (start + self.chunk_size).min(char_count);
            chunks.push(text[boundaries[start]..boundaries[end]].to_string());
            if end == char_count {
                break;
            }
            start += step;
        }

        chunks
    }
}

impl Default for TextChunker {
    fn default() -> Self {
        Self {
            chunk_size: 700,
            chunk_overlap: 50,
        }
    }
}
