//! In-memory vector index over the knowledge chunks.
//!
//! Built once at startup, read-only afterwards. Rebuilding means
//! restarting the process.

use serde::Serialize;

use super::engine::TextChunk;
use crate::core::errors::IndexBuildError;
use crate::vector_math::rank_descending_by_cosine;

/// A retrieved chunk with its similarity score.
#[derive(Debug, Clone, Serialize)]
pub struct ScoredChunk {
    pub chunk: TextChunk,
    /// Cosine similarity to the query (higher = better).
    pub score: f32,
}

#[derive(Debug)]
pub struct VectorIndex {
    chunks: Vec<TextChunk>,
    embeddings: Vec<Vec<f32>>,
    dimension: usize,
}

impl VectorIndex {
    /// Pair each chunk with its embedding. All vectors must share one
    /// dimension; the embedding model fixes it.
    pub fn build(
        chunks: Vec<TextChunk>,
        embeddings: Vec<Vec<f32>>,
    ) -> Result<Self, IndexBuildError> {
        if chunks.len() != embeddings.len() {
            return Err(IndexBuildError::CountMismatch {
                expected: chunks.len(),
                got: embeddings.len(),
            });
        }
        if chunks.is_empty() {
            return Err(IndexBuildError::EmptyDocument);
        }

        let dimension = embeddings[0].len();
        for embedding in &embeddings {
            if embedding.len() != dimension {
                return Err(IndexBuildError::DimensionMismatch {
                    expected: dimension,
                    got: embedding.len(),
                });
            }
        }
        if dimension == 0 {
            return Err(IndexBuildError::DimensionMismatch {
                expected: 1,
                got: 0,
            });
        }

        Ok(Self {
            chunks,
            embeddings,
            dimension,
        })
    }

    /// Top-k chunks by cosine similarity, best first. Ties keep ascending
    /// chunk order, so identical queries always return identical results.
    pub fn search(&self, query: &[f32], k: usize) -> Vec<ScoredChunk> {
        rank_descending_by_cosine(query, &self.embeddings)
            .into_iter()
            .take(k)
            .map(|(idx, score)| ScoredChunk {
                chunk: self.chunks[idx].clone(),
                score,
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chunk(text: &str, chunk_index: usize) -> TextChunk {
        TextChunk {
            text: text.to_string(),
            source: "test".to_string(),
            start_offset: 0,
            chunk_index,
        }
    }

    #[test]
    fn search_orders_by_decreasing_similarity() {
        let index = VectorIndex::build(
            vec![chunk("a", 0), chunk("b", 1), chunk("c", 2)],
            vec![vec![0.1, 0.9], vec![0.9, 0.1], vec![0.5, 0.5]],
        )
        .expect("index should build");

        let results = index.search(&[1.0, 0.0], 2);
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].chunk.text, "b");
        assert_eq!(results[1].chunk.text, "c");
        assert!(results[0].score >= results[1].score);
    }

    #[test]
    fn k_larger_than_index_returns_everything() {
        let index = VectorIndex::build(
            vec![chunk("a", 0), chunk("b", 1)],
            vec![vec![1.0, 0.0], vec![0.0, 1.0]],
        )
        .expect("index should build");

        assert_eq!(index.search(&[1.0, 0.0], 10).len(), 2);
    }

    #[test]
    fn repeated_searches_are_identical() {
        let index = VectorIndex::build(
            vec![chunk("a", 0), chunk("b", 1), chunk("c", 2)],
            vec![vec![1.0, 0.0], vec![1.0, 0.0], vec![0.0, 1.0]],
        )
        .expect("index should build");

        let first: Vec<usize> = index
            .search(&[1.0, 0.0], 3)
            .iter()
            .map(|r| r.chunk.chunk_index)
            .collect();
        let second: Vec<usize> = index
            .search(&[1.0, 0.0], 3)
            .iter()
            .map(|r| r.chunk.chunk_index)
            .collect();

        assert_eq!(first, second);
        // Equal-score chunks rank by ascending chunk index.
        assert_eq!(first, vec![0, 1, 2]);
    }

    #[test]
    fn mismatched_counts_fail_to_build() {
        let err = VectorIndex::build(vec![chunk("a", 0)], vec![]).expect_err("should fail");
        assert!(matches!(err, IndexBuildError::CountMismatch { .. }));
    }

    #[test]
    fn mismatched_dimensions_fail_to_build() {
        let err = VectorIndex::build(
            vec![chunk("a", 0), chunk("b", 1)],
            vec![vec![1.0, 0.0], vec![1.0]],
        )
        .expect_err("should fail");
        assert!(matches!(err, IndexBuildError::DimensionMismatch { .. }));
    }

    #[test]
    fn empty_index_fails_to_build() {
        let err = VectorIndex::build(vec![], vec![]).expect_err("should fail");
        assert!(matches!(err, IndexBuildError::EmptyDocument));
    }
}
