//! The chatbot orchestrator.
//!
//! Two of the three service states live here: Ready (index built, full
//! retrieve-then-generate flow) and Degraded (index build failed, direct
//! generation only). The third, Unavailable, is the absence of a `Chatbot`
//! on `AppState` when the model client could not be constructed.

use std::sync::Arc;

use crate::config::Config;
use crate::core::errors::ProviderError;
use crate::llm::provider::{ChatProvider, EmbeddingProvider};
use crate::rag::prompt::render_prompt;
use crate::rag::Retrieval;

pub struct Chatbot {
    chat: Arc<dyn ChatProvider>,
    retrieval: Option<Retrieval>,
}

impl Chatbot {
    /// Build the chatbot, attempting the indexing pipeline. Index build
    /// failures are absorbed: the chatbot comes up without retrieval and
    /// answers from the model alone.
    pub async fn initialize(
        config: &Config,
        chat: Arc<dyn ChatProvider>,
        embedder: Arc<dyn EmbeddingProvider>,
    ) -> Self {
        let retrieval = match Retrieval::build(config, embedder).await {
            Ok(retrieval) => Some(retrieval),
            Err(err) => {
                tracing::warn!("Failed to build retrieval index, running without RAG: {}", err);
                None
            }
        };

        Self { chat, retrieval }
    }

    /// Whether the retrieval index is active.
    pub fn rag_active(&self) -> bool {
        self.retrieval.is_some()
    }

    /// Answer a question. With retrieval active, runs the full
    /// retrieve-then-generate flow and falls back to direct generation on
    /// any failure inside it. Without retrieval, the raw question goes
    /// straight to the model. An error here means even the fallback failed.
    pub async fn respond(&self, question: &str) -> Result<String, ProviderError> {
        if let Some(retrieval) = &self.retrieval {
            match self.respond_with_context(retrieval, question).await {
                Ok(answer) => return Ok(answer),
                Err(err) => {
                    tracing::warn!(
                        "Retrieval-augmented answer failed, falling back to direct generation: {}",
                        err
                    );
                }
            }
        }

        self.chat.generate(question).await
    }

    async fn respond_with_context(
        &self,
        retrieval: &Retrieval,
        question: &str,
    ) -> Result<String, ProviderError> {
        let chunks = retrieval.retrieve(question).await?;
        let prompt = render_prompt(&chunks, question);
        self.chat.generate(&prompt).await
    }
}
