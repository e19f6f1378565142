use std::sync::Arc;

use crate::chatbot::Chatbot;
use crate::config::Config;
use crate::llm::gemini::GeminiClient;
use crate::llm::provider::{ChatProvider, EmbeddingProvider};

/// Process-wide state, built once before serving and read-only afterwards.
///
/// `chatbot` is `None` when the model client itself could not be
/// constructed; every chat request then gets the fixed unavailable
/// response while `/health` keeps answering.
pub struct AppState {
    pub config: Config,
    pub chatbot: Option<Chatbot>,
}

impl AppState {
    /// Build state with the real provider client. Never fails: client
    /// construction errors leave the chatbot absent.
    pub async fn initialize(config: Config) -> Arc<Self> {
        let chatbot = match GeminiClient::from_config(&config) {
            Ok(client) => {
                let client = Arc::new(client);
                let chat: Arc<dyn ChatProvider> = client.clone();
                let embedder: Arc<dyn EmbeddingProvider> = client;
                Some(Chatbot::initialize(&config, chat, embedder).await)
            }
            Err(err) => {
                tracing::error!(
                    "Failed to construct model client, chat endpoint unavailable: {}",
                    err
                );
                None
            }
        };

        Arc::new(Self { config, chatbot })
    }

    /// Build state around an already-constructed chatbot (or none). Used
    /// with substitute providers in tests.
    pub fn with_chatbot(config: Config, chatbot: Option<Chatbot>) -> Arc<Self> {
        Arc::new(Self { config, chatbot })
    }
}
