//! Wire types for the Generative Language REST API.
//!
//! Only the fields this backend reads are modelled; everything else in the
//! provider payloads is ignored.

use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct BatchEmbedResponse {
    #[serde(default)]
    pub embeddings: Vec<EmbeddingValues>,
}

#[derive(Debug, Deserialize)]
pub struct EmbeddingValues {
    #[serde(default)]
    pub values: Vec<f32>,
}
