use std::sync::Arc;

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;

use crate::chatbot::Chatbot;
use crate::state::AppState;

pub async fn health(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let rag_active = state
        .chatbot
        .as_ref()
        .map(Chatbot::rag_active)
        .unwrap_or(false);

    Json(json!({
        "status": "ok",
        "rag_active": rag_active
    }))
}
