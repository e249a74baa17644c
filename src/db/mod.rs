//! Vector storage for the knowledge base.
//!
//! [`vector_index`] adapts the embedded `wellnest-vector` crate to the RAG
//! pipeline: it owns the embedder used for queries and knows how to build
//! the collection from the knowledge file on first start.

pub mod vector_index;

pub use vector_index::{IndexOrigin, IndexSettings, VectorIndex};
