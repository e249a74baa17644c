//! Common types for wellnest-vector.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Unique identifier for a vector in a collection.
pub type VectorId = String;

/// String key-value pairs stored alongside a vector.
pub type VectorMetadata = BTreeMap<String, String>;

/// A stored vector together with the document text it was computed from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entry {
    /// Caller-supplied identifier.
    pub id: VectorId,
    /// The embedding.
    pub vector: Vec<f32>,
    /// Source text for the embedding.
    pub document: String,
    /// Optional metadata.
    #[serde(default, skip_serializing_if = "VectorMetadata::is_empty")]
    pub metadata: VectorMetadata,
}

/// A search hit.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult {
    /// Identifier of the matched entry.
    pub id: VectorId,
    /// Similarity score, higher is closer.
    pub score: f32,
    /// Document text of the matched entry.
    pub document: String,
    /// Metadata of the matched entry.
    pub metadata: VectorMetadata,
}
