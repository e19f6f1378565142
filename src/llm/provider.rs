use async_trait::async_trait;

use crate::core::errors::ProviderError;

/// Text to fixed-dimension vector, via a hosted embedding model.
///
/// The same provider handle must be used for indexing and for queries;
/// mismatched embedding spaces degrade retrieval silently instead of
/// failing, so the invariant is enforced by construction.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Embed a batch of inputs, one vector per input, in order.
    async fn embed(&self, inputs: &[String]) -> Result<Vec<Vec<f32>>, ProviderError>;
}

/// Prompt to text, via a hosted chat-completion model.
#[async_trait]
pub trait ChatProvider: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, ProviderError>;
}
