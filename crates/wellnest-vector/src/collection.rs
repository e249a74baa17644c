//! Vector collection.
//!
//! A collection is a named container for vectors with a fixed dimensionality
//! and distance metric. Search is exact: every stored vector is scored
//! against the query.

use crate::distance::DistanceMetric;
use crate::error::{Error, Result};
use crate::types::{Entry, SearchResult, VectorMetadata};
use parking_lot::RwLock;
use std::cmp::Ordering;
use std::collections::HashMap;

/// A named collection of vectors.
pub struct Collection {
    name: String,
    dimensions: usize,
    metric: DistanceMetric,
    inner: RwLock<Entries>,
}

#[derive(Default)]
struct Entries {
    /// Insertion-ordered entries.
    items: Vec<Entry>,
    /// Position of each id in `items`.
    positions: HashMap<String, usize>,
}

impl Collection {
    /// Create a new, empty collection.
    pub fn new(name: String, dimensions: usize, metric: DistanceMetric) -> Result<Self> {
        if dimensions == 0 {
            return Err(Error::InvalidVector("Dimensions must be > 0".to_string()));
        }

        Ok(Self {
            name,
            dimensions,
            metric,
            inner: RwLock::new(Entries::default()),
        })
    }

    /// Get the collection name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the vector dimensions.
    pub fn dimensions(&self) -> usize {
        self.dimensions
    }

    /// Get the distance metric.
    pub fn metric(&self) -> DistanceMetric {
        self.metric
    }

    /// Get the number of vectors in the collection.
    pub fn len(&self) -> usize {
        self.inner.read().items.len()
    }

    /// Check if the collection is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Insert a vector, replacing any existing entry with the same id.
    pub fn insert(
        &self,
        id: &str,
        vector: &[f32],
        document: &str,
        metadata: VectorMetadata,
    ) -> Result<()> {
        self.validate(vector)?;

        let entry = Entry {
            id: id.to_string(),
            vector: vector.to_vec(),
            document: document.to_string(),
            metadata,
        };

        let mut inner = self.inner.write();
        match inner.positions.get(id).copied() {
            Some(pos) => inner.items[pos] = entry,
            None => {
                let pos = inner.items.len();
                inner.items.push(entry);
                inner.positions.insert(id.to_string(), pos);
            }
        }
        Ok(())
    }

    /// Search for the `limit` most similar vectors, best first.
    ///
    /// Entries with equal scores keep their insertion order.
    pub fn search(&self, query: &[f32], limit: usize) -> Result<Vec<SearchResult>> {
        self.validate(query)?;
        if limit == 0 {
            return Ok(Vec::new());
        }

        let inner = self.inner.read();
        let mut scored: Vec<(usize, f32)> = inner
            .items
            .iter()
            .enumerate()
            .map(|(pos, entry)| (pos, self.metric.similarity(query, &entry.vector)))
            .collect();

        scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
        scored.truncate(limit);

        Ok(scored
            .into_iter()
            .map(|(pos, score)| {
                let entry = &inner.items[pos];
                SearchResult {
                    id: entry.id.clone(),
                    score,
                    document: entry.document.clone(),
                    metadata: entry.metadata.clone(),
                }
            })
            .collect())
    }

    /// Export all entries in insertion order for persistence.
    pub fn export_all(&self) -> Vec<Entry> {
        self.inner.read().items.clone()
    }

    fn validate(&self, vector: &[f32]) -> Result<()> {
        if vector.len() != self.dimensions {
            return Err(Error::DimensionMismatch {
                expected: self.dimensions,
                actual: vector.len(),
            });
        }
        if vector.iter().any(|v| !v.is_finite()) {
            return Err(Error::InvalidVector(
                "Vector contains NaN or infinite values".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collection() -> Collection {
        Collection::new("test".to_string(), 3, DistanceMetric::Cosine).unwrap()
    }

    #[test]
    fn test_collection_basic() {
        let col = collection();
        assert_eq!(col.name(), "test");
        assert_eq!(col.dimensions(), 3);
        assert_eq!(col.metric(), DistanceMetric::Cosine);
        assert!(col.is_empty());
    }

    #[test]
    fn test_zero_dimensions_rejected() {
        assert!(Collection::new("bad".to_string(), 0, DistanceMetric::Cosine).is_err());
    }

    #[test]
    fn test_search_orders_by_similarity() {
        let col = collection();
        col.insert("far", &[0.0, 1.0, 0.0], "far", VectorMetadata::new())
            .unwrap();
        col.insert("near", &[1.0, 0.1, 0.0], "near", VectorMetadata::new())
            .unwrap();
        col.insert("exact", &[1.0, 0.0, 0.0], "exact", VectorMetadata::new())
            .unwrap();

        let results = col.search(&[1.0, 0.0, 0.0], 10).unwrap();
        let ids: Vec<_> = results.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["exact", "near", "far"]);
        assert!(results.windows(2).all(|w| w[0].score >= w[1].score));
    }

    #[test]
    fn test_search_respects_limit() {
        let col = collection();
        for i in 0..5 {
            col.insert(&format!("v{}", i), &[1.0, i as f32, 0.0], "doc", VectorMetadata::new())
                .unwrap();
        }

        assert_eq!(col.search(&[1.0, 0.0, 0.0], 2).unwrap().len(), 2);
        assert!(col.search(&[1.0, 0.0, 0.0], 0).unwrap().is_empty());
        assert_eq!(col.search(&[1.0, 0.0, 0.0], 50).unwrap().len(), 5);
    }

    #[test]
    fn test_ties_keep_insertion_order() {
        let col = collection();
        col.insert("first", &[1.0, 0.0, 0.0], "a", VectorMetadata::new())
            .unwrap();
        col.insert("second", &[2.0, 0.0, 0.0], "b", VectorMetadata::new())
            .unwrap();

        let results = col.search(&[1.0, 0.0, 0.0], 2).unwrap();
        assert_eq!(results[0].id, "first");
        assert_eq!(results[1].id, "second");
    }

    #[test]
    fn test_insert_replaces_existing_id() {
        let col = collection();
        col.insert("v", &[1.0, 0.0, 0.0], "old", VectorMetadata::new())
            .unwrap();
        col.insert("v", &[0.0, 1.0, 0.0], "new", VectorMetadata::new())
            .unwrap();

        assert_eq!(col.len(), 1);
        let results = col.search(&[0.0, 1.0, 0.0], 1).unwrap();
        assert_eq!(results[0].document, "new");
    }

    #[test]
    fn test_dimension_mismatch() {
        let col = collection();
        let err = col
            .insert("v", &[1.0, 0.0], "doc", VectorMetadata::new())
            .unwrap_err();
        assert!(matches!(
            err,
            Error::DimensionMismatch {
                expected: 3,
                actual: 2
            }
        ));
        assert!(col.search(&[1.0], 1).is_err());
    }

    #[test]
    fn test_nan_rejected() {
        let col = collection();
        assert!(col
            .insert("v", &[f32::NAN, 0.0, 0.0], "doc", VectorMetadata::new())
            .is_err());
    }
}
