use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};

use super::provider::{ChatProvider, EmbeddingProvider};
use super::types::BatchEmbedResponse;
use crate::config::Config;
use crate::core::errors::ProviderError;

/// Client for the Google Generative Language API, covering both the
/// chat-completion and embedding endpoints.
#[derive(Clone)]
pub struct GeminiClient {
    api_base: String,
    chat_model: String,
    embedding_model: String,
    api_key: String,
    max_retries: u32,
    client: Client,
}

impl GeminiClient {
    /// Build the client from config. Fails with `MissingApiKey` when
    /// `GOOGLE_API_KEY` is absent; the server then runs without a chatbot.
    pub fn from_config(config: &Config) -> Result<Self, ProviderError> {
        let api_key = Config::api_key().ok_or(ProviderError::MissingApiKey)?;
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self {
            api_base: config.api_base.trim_end_matches('/').to_string(),
            chat_model: config.chat_model.clone(),
            embedding_model: config.embedding_model.clone(),
            api_key,
            max_retries: config.max_retries,
            client,
        })
    }

    async fn post_json(&self, url: &str, body: &Value) -> Result<Value, ProviderError> {
        let mut attempt = 0;
        loop {
            match self.try_post(url, body).await {
                Ok(payload) => return Ok(payload),
                Err(err) if err.is_retryable() && attempt < self.max_retries => {
                    attempt += 1;
                    tracing::warn!(
                        "Provider call failed (attempt {}): {}; retrying",
                        attempt,
                        err
                    );
                    tokio::time::sleep(Duration::from_millis(250 * u64::from(attempt))).await;
                }
                Err(err) => return Err(err),
            }
        }
    }

    async fn try_post(&self, url: &str, body: &Value) -> Result<Value, ProviderError> {
        let res = self
            .client
            .post(url)
            .header("x-goog-api-key", &self.api_key)
            .json(body)
            .send()
            .await?;

        let status = res.status();
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            return Err(ProviderError::Status {
                code: status.as_u16(),
                body,
            });
        }

        Ok(res.json().await?)
    }
}

#[async_trait]
impl ChatProvider for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String, ProviderError> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.api_base, self.chat_model
        );
        let body = json!({
            "contents": [{ "parts": [{ "text": prompt }] }],
        });

        let payload = self.post_json(&url, &body).await?;
        extract_answer(&payload)
    }
}

#[async_trait]
impl EmbeddingProvider for GeminiClient {
    async fn embed(&self, inputs: &[String]) -> Result<Vec<Vec<f32>>, ProviderError> {
        if inputs.is_empty() {
            return Ok(Vec::new());
        }

        let url = format!(
            "{}/v1beta/models/{}:batchEmbedContents",
            self.api_base, self.embedding_model
        );
        let requests: Vec<Value> = inputs
            .iter()
            .map(|text| {
                json!({
                    "model": format!("models/{}", self.embedding_model),
                    "content": { "parts": [{ "text": text }] },
                })
            })
            .collect();
        let body = json!({ "requests": requests });

        let payload = self.post_json(&url, &body).await?;
        extract_embeddings(payload, inputs.len())
    }
}

fn extract_answer(payload: &Value) -> Result<String, ProviderError> {
    payload["candidates"][0]["content"]["parts"][0]["text"]
        .as_str()
        .map(|text| text.to_string())
        .ok_or_else(|| ProviderError::MalformedResponse("no candidate text".to_string()))
}

fn extract_embeddings(payload: Value, expected: usize) -> Result<Vec<Vec<f32>>, ProviderError> {
    let response: BatchEmbedResponse = serde_json::from_value(payload)
        .map_err(|err| ProviderError::MalformedResponse(err.to_string()))?;

    let embeddings: Vec<Vec<f32>> = response
        .embeddings
        .into_iter()
        .map(|embedding| embedding.values)
        .collect();

    if embeddings.len() != expected || embeddings.iter().any(|embedding| embedding.is_empty()) {
        return Err(ProviderError::MalformedResponse(format!(
            "expected {} embeddings, got {}",
            expected,
            embeddings.len()
        )));
    }

    Ok(embeddings)
}
