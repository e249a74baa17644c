//! Retrieval Augmented Generation (RAG) Pipeline
//!
//! Answers questions about the knowledge-base document, conditioned on the
//! user's PHQ-9 score.
//!
//! # Module Structure
//!
//! - [`rag::loader`](crate::rag::loader) - Reads the knowledge file
//! - [`rag::chunker`](crate::rag::chunker) - Character-window chunking
//! - [`rag::embeddings`](crate::rag::embeddings) - Sentence embeddings (fastembed)
//! - [`rag::prompt`](crate::rag::prompt) - Prompt template and substitution
//! - [`rag::pipeline`](crate::rag::pipeline) - The per-request pass
//!
//! # RAG Pipeline
//!
//! 1. **Ingestion** (first start only) - the document is chunked and embedded
//! 2. **Storage** - vectors persisted under the configured directory
//! 3. **Retrieval** - the question is embedded, the top-k chunks retrieved
//! 4. **Generation** - the prompt is rendered and sent to the LLM
//!
//! # Example
//!
//! ```ignore
//! use wellnest::rag::pipeline::RagPipeline;
//!
//! let (pipeline, origin) = RagPipeline::from_config(&config).await?;
//! let answer = pipeline.answer("What does my score mean?", 12).await?;
//! ```

pub mod chunker;
pub mod embeddings;
pub mod loader;
pub mod pipeline;
pub mod prompt;
