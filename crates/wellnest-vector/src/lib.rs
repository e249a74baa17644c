//! # wellnest-vector
//!
//! A small embedded vector store for the WellNest server: named collections
//! of fixed-dimension vectors, exact similarity search, and a plain JSON
//! on-disk format so a collection built once can be reloaded on every later
//! start.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use wellnest_vector::{VectorDb, Config, DistanceMetric};
//!
//! let db = VectorDb::open(Config::persistent("./chroma_db")).await?;
//! if !db.collection_exists("embeddings") {
//!     db.create_collection("embeddings", 384, DistanceMetric::Cosine)?;
//!     db.insert("embeddings", "chunk-0", &embedding, "text", Default::default())?;
//!     db.persist("embeddings").await?;
//! }
//! let hits = db.search("embeddings", &query, 4)?;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod collection;
pub mod distance;
pub mod error;
pub mod persistence;
pub mod types;

pub use collection::Collection;
pub use distance::DistanceMetric;
pub use error::{Error, Result};
pub use types::{Entry, SearchResult, VectorId, VectorMetadata};

use parking_lot::RwLock;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Configuration for the vector database.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Directory holding one sub-directory per collection. `None` keeps
    /// everything in memory.
    pub data_path: Option<PathBuf>,
}

impl Config {
    /// Create an in-memory configuration.
    pub fn memory() -> Self {
        Self::default()
    }

    /// Create a persistent configuration rooted at `path`.
    pub fn persistent<P: Into<PathBuf>>(path: P) -> Self {
        Self {
            data_path: Some(path.into()),
        }
    }
}

/// The vector database handle.
///
/// Cheap to clone. Collections are loaded from disk when first requested
/// through [`VectorDb::load_collection`], or created empty with
/// [`VectorDb::create_collection`].
#[derive(Clone)]
pub struct VectorDb {
    inner: Arc<VectorDbInner>,
}

struct VectorDbInner {
    config: Config,
    collections: RwLock<HashMap<String, Arc<Collection>>>,
}

impl VectorDb {
    /// Open a vector database with the given configuration.
    ///
    /// Creates the data directory if it does not exist yet.
    #[instrument(skip(config), fields(persistent = config.data_path.is_some()))]
    pub async fn open(config: Config) -> Result<Self> {
        if let Some(ref path) = config.data_path {
            tokio::fs::create_dir_all(path).await?;
        }
        info!("Opened vector database");

        Ok(Self {
            inner: Arc::new(VectorDbInner {
                config,
                collections: RwLock::new(HashMap::new()),
            }),
        })
    }

    /// The configured data directory, if persistent.
    pub fn data_path(&self) -> Option<&PathBuf> {
        self.inner.config.data_path.as_ref()
    }

    /// Whether `name` is loaded in memory or fully persisted on disk.
    pub fn collection_exists(&self, name: &str) -> bool {
        if self.inner.collections.read().contains_key(name) {
            return true;
        }
        self.data_path()
            .map(|path| persistence::collection_exists(path, name))
            .unwrap_or(false)
    }

    /// Create a new, empty in-memory collection.
    ///
    /// Nothing is written to disk until [`VectorDb::persist`] is called.
    #[instrument(skip(self))]
    pub fn create_collection(
        &self,
        name: &str,
        dimensions: usize,
        metric: DistanceMetric,
    ) -> Result<Arc<Collection>> {
        if self.collection_exists(name) {
            return Err(Error::CollectionExists(name.to_string()));
        }

        info!(name, dimensions, %metric, "Creating collection");
        let collection = Arc::new(Collection::new(name.to_string(), dimensions, metric)?);
        self.inner
            .collections
            .write()
            .insert(name.to_string(), collection.clone());
        Ok(collection)
    }

    /// Load a persisted collection into memory (or return it if already loaded).
    #[instrument(skip(self))]
    pub async fn load_collection(&self, name: &str) -> Result<Arc<Collection>> {
        if let Some(existing) = self.inner.collections.read().get(name) {
            return Ok(existing.clone());
        }

        let path = self
            .data_path()
            .ok_or_else(|| Error::CollectionNotFound(name.to_string()))?;
        let collection = Arc::new(persistence::load_collection(path, name).await?);
        self.inner
            .collections
            .write()
            .insert(name.to_string(), collection.clone());
        Ok(collection)
    }

    /// Get a loaded collection.
    pub fn get_collection(&self, name: &str) -> Result<Arc<Collection>> {
        self.inner
            .collections
            .read()
            .get(name)
            .cloned()
            .ok_or_else(|| Error::CollectionNotFound(name.to_string()))
    }

    /// Insert a vector into a loaded collection.
    pub fn insert(
        &self,
        collection: &str,
        id: &str,
        vector: &[f32],
        document: &str,
        metadata: VectorMetadata,
    ) -> Result<()> {
        self.get_collection(collection)?
            .insert(id, vector, document, metadata)
    }

    /// Search a loaded collection, best match first.
    #[instrument(skip(self, query), fields(dim = query.len()))]
    pub fn search(&self, collection: &str, query: &[f32], limit: usize) -> Result<Vec<SearchResult>> {
        let results = self.get_collection(collection)?.search(query, limit)?;
        debug!(count = results.len(), "Search completed");
        Ok(results)
    }

    /// Write a loaded collection to disk. A no-op for in-memory databases.
    #[instrument(skip(self))]
    pub async fn persist(&self, name: &str) -> Result<()> {
        let Some(path) = self.data_path() else {
            debug!("Skipping persist for in-memory database");
            return Ok(());
        };
        let collection = self.get_collection(name)?;
        persistence::save_collection(path, &collection).await
    }
}
