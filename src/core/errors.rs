use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use thiserror::Error;

/// Error shape of the HTTP boundary. Nothing else crosses the wire.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("service unavailable: {0}")]
    Unavailable(String),
    #[error("internal error: {0}")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        match self {
            ApiError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, Json(json!({ "error": msg }))).into_response()
            }
            // The chat surface returns user-facing text in `response` on
            // failure, matching what the frontend renders.
            ApiError::Unavailable(msg) | ApiError::Internal(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "response": msg })),
            )
                .into_response(),
        }
    }
}

/// Failure of a hosted provider call at runtime.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("provider returned status {code}: {body}")]
    Status { code: u16, body: String },
    #[error("malformed provider response: {0}")]
    MalformedResponse(String),
    #[error("GOOGLE_API_KEY is not set")]
    MissingApiKey,
}

impl ProviderError {
    /// Transport failures and throttling/server statuses are worth a retry;
    /// auth and malformed-payload failures are not.
    pub fn is_retryable(&self) -> bool {
        match self {
            ProviderError::Request(_) => true,
            ProviderError::Status { code, .. } => *code == 429 || *code >= 500,
            ProviderError::MalformedResponse(_) | ProviderError::MissingApiKey => false,
        }
    }
}

/// Failure while building the knowledge index at startup. Absorbed by the
/// chatbot layer: the process keeps running without retrieval.
#[derive(Debug, Error)]
pub enum IndexBuildError {
    #[error("failed to read knowledge file: {0}")]
    Knowledge(#[from] std::io::Error),
    #[error("knowledge document is empty")]
    EmptyDocument,
    #[error("embedding failed: {0}")]
    Embedding(#[from] ProviderError),
    #[error("embedding dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },
    #[error("provider returned {got} embeddings for {expected} chunks")]
    CountMismatch { expected: usize, got: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn throttling_and_server_statuses_are_retryable() {
        let throttled = ProviderError::Status {
            code: 429,
            body: String::new(),
        };
        let server_error = ProviderError::Status {
            code: 503,
            body: String::new(),
        };
        assert!(throttled.is_retryable());
        assert!(server_error.is_retryable());
    }

    #[test]
    fn client_errors_are_not_retryable() {
        let auth = ProviderError::Status {
            code: 403,
            body: String::new(),
        };
        assert!(!auth.is_retryable());
        assert!(!ProviderError::MissingApiKey.is_retryable());
        assert!(!ProviderError::MalformedResponse("no candidates".to_string()).is_retryable());
    }
}
