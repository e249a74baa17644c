//! Persistence layer for wellnest-vector.
//!
//! Each collection lives in its own directory:
//! - `{base_path}/{name}/vectors.json` - entries, in insertion order
//! - `{base_path}/{name}/metadata.json` - collection metadata
//!
//! Vectors are written before metadata. A collection counts as persisted
//! only once `metadata.json` exists, so an interrupted save is never loaded.

use crate::collection::Collection;
use crate::distance::DistanceMetric;
use crate::error::{Error, Result};
use crate::types::Entry;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

const METADATA_FILE: &str = "metadata.json";
const VECTORS_FILE: &str = "vectors.json";

/// Collection metadata stored on disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct CollectionMetadata {
    name: String,
    dimensions: usize,
    metric: String,
    count: usize,
    saved_at: DateTime<Utc>,
}

/// Whether a complete persisted copy of `name` exists under `base_path`.
pub fn collection_exists(base_path: &Path, name: &str) -> bool {
    base_path.join(name).join(METADATA_FILE).is_file()
}

/// Save a collection to disk.
pub async fn save_collection(base_path: &Path, collection: &Collection) -> Result<()> {
    let collection_path = base_path.join(collection.name());
    tokio::fs::create_dir_all(&collection_path).await?;

    let entries = collection.export_all();
    let vectors_json = serde_json::to_string(&entries)
        .map_err(|e| Error::Persistence(format!("Failed to serialize vectors: {}", e)))?;
    tokio::fs::write(collection_path.join(VECTORS_FILE), vectors_json).await?;

    let metadata = CollectionMetadata {
        name: collection.name().to_string(),
        dimensions: collection.dimensions(),
        metric: collection.metric().name().to_string(),
        count: entries.len(),
        saved_at: Utc::now(),
    };
    let metadata_json = serde_json::to_string_pretty(&metadata)
        .map_err(|e| Error::Persistence(format!("Failed to serialize metadata: {}", e)))?;
    tokio::fs::write(collection_path.join(METADATA_FILE), metadata_json).await?;

    info!(name = collection.name(), count = entries.len(), path = ?collection_path, "Saved collection");
    Ok(())
}

/// Load a collection from disk.
pub async fn load_collection(base_path: &Path, name: &str) -> Result<Collection> {
    if !collection_exists(base_path, name) {
        return Err(Error::CollectionNotFound(name.to_string()));
    }
    let collection_path = base_path.join(name);

    let metadata_json = tokio::fs::read_to_string(collection_path.join(METADATA_FILE)).await?;
    let metadata: CollectionMetadata = serde_json::from_str(&metadata_json)
        .map_err(|e| Error::Persistence(format!("Failed to parse metadata: {}", e)))?;

    let metric: DistanceMetric = metadata.metric.parse().map_err(Error::Persistence)?;
    let collection = Collection::new(metadata.name.clone(), metadata.dimensions, metric)?;

    let vectors_json = tokio::fs::read_to_string(collection_path.join(VECTORS_FILE)).await?;
    let entries: Vec<Entry> = serde_json::from_str(&vectors_json)
        .map_err(|e| Error::Persistence(format!("Failed to parse vectors: {}", e)))?;

    if entries.len() != metadata.count {
        return Err(Error::Persistence(format!(
            "Collection '{}' expected {} vectors, found {}",
            name,
            metadata.count,
            entries.len()
        )));
    }

    for entry in entries {
        collection.insert(&entry.id, &entry.vector, &entry.document, entry.metadata)?;
    }

    debug!(name, count = collection.len(), "Loaded vectors");
    info!(name, dimensions = metadata.dimensions, "Loaded collection");
    Ok(collection)
}
