//! Startup indexing pipeline and query-time retrieval.

use std::sync::Arc;

use crate::config::Config;
use crate::core::errors::{IndexBuildError, ProviderError};
use crate::llm::provider::EmbeddingProvider;

use super::engine::{self, ChunkerConfig};
use super::index::{ScoredChunk, VectorIndex};

/// The retrieval half of the chatbot: the vector index plus the embedding
/// provider it was built with. Queries reuse the same provider handle, so
/// index and query vectors always share one embedding space.
pub struct Retrieval {
    index: VectorIndex,
    embedder: Arc<dyn EmbeddingProvider>,
    top_k: usize,
}

impl Retrieval {
    /// Load, chunk, and embed the knowledge document, then build the index.
    /// One batched embedding call covers all chunks.
    pub async fn build(
        config: &Config,
        embedder: Arc<dyn EmbeddingProvider>,
    ) -> Result<Self, IndexBuildError> {
        let document = engine::load_knowledge(&config.knowledge_path)?;
        let chunker = ChunkerConfig {
            chunk_size: config.chunk_size,
            chunk_overlap: config.chunk_overlap,
        };
        let chunks = engine::split_into_chunks(&document, &chunker);

        let texts: Vec<String> = chunks.iter().map(|chunk| chunk.text.clone()).collect();
        let embeddings = embedder.embed(&texts).await?;

        let index = VectorIndex::build(chunks, embeddings)?;
        tracing::info!(
            "Knowledge index built: {} chunks, dimension {}",
            index.len(),
            index.dimension()
        );

        Ok(Self {
            index,
            embedder,
            top_k: config.top_k,
        })
    }

    /// Embed the query and return the top-k chunks, best first.
    pub async fn retrieve(&self, query: &str) -> Result<Vec<ScoredChunk>, ProviderError> {
        let embeddings = self.embedder.embed(&[query.to_string()]).await?;
        let query_vector = embeddings.into_iter().next().ok_or_else(|| {
            ProviderError::MalformedResponse("no embedding returned for query".to_string())
        })?;

        Ok(self.index.search(&query_vector, self.top_k))
    }

    pub fn chunk_count(&self) -> usize {
        self.index.len()
    }
}
