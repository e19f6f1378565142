use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::core::errors::ApiError;
use crate::state::AppState;

/// Fixed response when the model client never came up.
pub const UNAVAILABLE_MESSAGE: &str =
    "Le service IA est temporairement indisponible (Erreur RAG).";

/// User-facing apology for a failed request.
pub const APOLOGY_MESSAGE: &str =
    "Désolé, une erreur est survenue lors du traitement de votre demande.";

#[derive(Debug, Deserialize)]
pub struct ChatBody {
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub response: String,
}

/// Answer a user question.
///
/// Validation happens before the availability check so an empty message is
/// always a 400, whatever state the pipeline is in. An unparseable body
/// counts as a missing message.
pub async fn chat(
    State(state): State<Arc<AppState>>,
    body: Option<Json<ChatBody>>,
) -> Result<Json<ChatResponse>, ApiError> {
    let message = body
        .as_ref()
        .map(|Json(body)| body.message.trim())
        .unwrap_or_default();
    if message.is_empty() {
        return Err(ApiError::BadRequest("Message empty".to_string()));
    }

    let Some(bot) = state.chatbot.as_ref() else {
        return Err(ApiError::Unavailable(UNAVAILABLE_MESSAGE.to_string()));
    };

    match bot.respond(message).await {
        Ok(answer) => Ok(Json(ChatResponse { response: answer })),
        Err(err) => {
            tracing::error!("Chat request failed: {}", err);
            Err(ApiError::Internal(APOLOGY_MESSAGE.to_string()))
        }
    }
}
