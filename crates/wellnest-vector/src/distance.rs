//! Distance metrics for vector similarity.

use std::fmt;

/// Distance metric used to rank vectors in a collection.
///
/// Every metric is exposed through [`DistanceMetric::similarity`], where a
/// **higher score always means more similar**, so search code can sort in
/// one direction regardless of the metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DistanceMetric {
    /// Cosine similarity. Range [-1, 1], 1 means identical direction.
    ///
    /// Best for: sentence embeddings.
    #[default]
    Cosine,

    /// Euclidean (L2) distance, reported as `1 / (1 + dist)`.
    Euclidean,

    /// Raw inner product. Only meaningful for normalized vectors.
    DotProduct,
}

impl DistanceMetric {
    /// Compute the similarity score between two vectors (higher is closer).
    ///
    /// Callers must ensure both slices have the same length.
    #[inline]
    pub fn similarity(&self, a: &[f32], b: &[f32]) -> f32 {
        debug_assert_eq!(a.len(), b.len(), "Vector dimensions must match");

        match self {
            DistanceMetric::Cosine => cosine_similarity(a, b),
            DistanceMetric::Euclidean => 1.0 / (1.0 + euclidean_distance(a, b)),
            DistanceMetric::DotProduct => dot_product(a, b),
        }
    }

    /// Get the name of this distance metric.
    pub fn name(&self) -> &'static str {
        match self {
            DistanceMetric::Cosine => "cosine",
            DistanceMetric::Euclidean => "euclidean",
            DistanceMetric::DotProduct => "dot_product",
        }
    }
}

impl fmt::Display for DistanceMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl std::str::FromStr for DistanceMetric {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "cosine" | "cos" => Ok(DistanceMetric::Cosine),
            "euclidean" | "l2" => Ok(DistanceMetric::Euclidean),
            "dot" | "dot_product" | "inner" => Ok(DistanceMetric::DotProduct),
            _ => Err(format!("Unknown distance metric: {}", s)),
        }
    }
}

#[inline]
fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let mut dot = 0.0f32;
    let mut norm_a = 0.0f32;
    let mut norm_b = 0.0f32;

    for (x, y) in a.iter().zip(b.iter()) {
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    let denom = (norm_a * norm_b).sqrt();
    if denom == 0.0 {
        0.0
    } else {
        dot / denom
    }
}

#[inline]
fn euclidean_distance(a: &[f32], b: &[f32]) -> f32 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| (x - y) * (x - y))
        .sum::<f32>()
        .sqrt()
}

#[inline]
fn dot_product(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cosine_identical() {
        let sim = DistanceMetric::Cosine.similarity(&[1.0, 0.0, 0.0], &[2.0, 0.0, 0.0]);
        assert!((sim - 1.0).abs() < 0.0001);
    }

    #[test]
    fn test_cosine_orthogonal() {
        let sim = DistanceMetric::Cosine.similarity(&[1.0, 0.0, 0.0], &[0.0, 1.0, 0.0]);
        assert!(sim.abs() < 0.0001);
    }

    #[test]
    fn test_cosine_zero_vector() {
        let sim = DistanceMetric::Cosine.similarity(&[0.0, 0.0], &[1.0, 0.0]);
        assert_eq!(sim, 0.0);
    }

    #[test]
    fn test_euclidean_similarity() {
        let same = DistanceMetric::Euclidean.similarity(&[1.0, 2.0], &[1.0, 2.0]);
        assert!((same - 1.0).abs() < 0.0001);

        let far = DistanceMetric::Euclidean.similarity(&[0.0, 0.0], &[3.0, 4.0]);
        assert!((far - 1.0 / 6.0).abs() < 0.0001);
    }

    #[test]
    fn test_dot_product() {
        let sim = DistanceMetric::DotProduct.similarity(&[1.0, 2.0, 3.0], &[4.0, 5.0, 6.0]);
        assert!((sim - 32.0).abs() < 0.0001);
    }

    #[test]
    fn test_metric_round_trips_through_name() {
        for metric in [
            DistanceMetric::Cosine,
            DistanceMetric::Euclidean,
            DistanceMetric::DotProduct,
        ] {
            assert_eq!(metric.name().parse::<DistanceMetric>().unwrap(), metric);
        }
        assert!("manhattan".parse::<DistanceMetric>().is_err());
    }
}
