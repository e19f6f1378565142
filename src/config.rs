//! Runtime configuration.
//!
//! Values come from an optional TOML file (path in `IBNSINA_CONFIG`) with
//! environment-variable overrides on top. The provider API key is read from
//! the environment at call time and is never stored in the struct, written
//! to disk, or logged.

use std::env;
use std::path::PathBuf;

use anyhow::Context;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Path to the single knowledge-base text file.
    pub knowledge_path: PathBuf,
    /// Maximum chunk size in characters.
    pub chunk_size: usize,
    /// Overlap between consecutive chunks in characters.
    pub chunk_overlap: usize,
    /// Number of chunks retrieved per question.
    pub top_k: usize,
    /// Port to serve on. The `PORT` environment variable wins.
    pub port: u16,
    /// Base URL of the Generative Language API.
    pub api_base: String,
    /// Chat-completion model identifier.
    pub chat_model: String,
    /// Embedding model identifier. Must match the model the index was
    /// built with; both sides read it from this one field.
    pub embedding_model: String,
    /// Timeout for a single provider call, in seconds.
    pub request_timeout_secs: u64,
    /// Retries for transient provider failures (429 and 5xx).
    pub max_retries: u32,
    /// Directory for rolling log files.
    pub log_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            knowledge_path: PathBuf::from("knowledge_base.txt"),
            chunk_size: 500,
            chunk_overlap: 50,
            top_k: 3,
            port: 5000,
            api_base: "https://generativelanguage.googleapis.com".to_string(),
            chat_model: "gemini-1.5-flash".to_string(),
            embedding_model: "embedding-001".to_string(),
            request_timeout_secs: 30,
            max_retries: 2,
            log_dir: PathBuf::from("logs"),
        }
    }
}

impl Config {
    /// Load configuration: defaults, then the optional TOML file named by
    /// `IBNSINA_CONFIG`, then environment overrides.
    pub fn load() -> anyhow::Result<Self> {
        let mut config = match env::var("IBNSINA_CONFIG") {
            Ok(path) if !path.trim().is_empty() => {
                let raw = std::fs::read_to_string(&path)
                    .with_context(|| format!("Failed to read config file {}", path))?;
                toml::from_str(&raw)
                    .with_context(|| format!("Failed to parse config file {}", path))?
            }
            _ => Config::default(),
        };
        config.apply_env_overrides();
        Ok(config)
    }

    /// The provider API key, from the environment only.
    pub fn api_key() -> Option<String> {
        env::var("GOOGLE_API_KEY")
            .ok()
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty())
    }

    fn apply_env_overrides(&mut self) {
        if let Some(path) = env_string("IBNSINA_KNOWLEDGE_PATH") {
            self.knowledge_path = PathBuf::from(path);
        }
        if let Some(size) = env_parse("IBNSINA_CHUNK_SIZE") {
            self.chunk_size = size;
        }
        if let Some(overlap) = env_parse("IBNSINA_CHUNK_OVERLAP") {
            self.chunk_overlap = overlap;
        }
        if let Some(top_k) = env_parse("IBNSINA_TOP_K") {
            self.top_k = top_k;
        }
        if let Some(port) = env_parse("PORT") {
            self.port = port;
        }
        if let Some(base) = env_string("IBNSINA_API_BASE") {
            self.api_base = base;
        }
        if let Some(model) = env_string("IBNSINA_CHAT_MODEL") {
            self.chat_model = model;
        }
        if let Some(model) = env_string("IBNSINA_EMBEDDING_MODEL") {
            self.embedding_model = model;
        }
        if let Some(secs) = env_parse("IBNSINA_REQUEST_TIMEOUT_SECS") {
            self.request_timeout_secs = secs;
        }
        if let Some(retries) = env_parse("IBNSINA_MAX_RETRIES") {
            self.max_retries = retries;
        }
        if let Some(dir) = env_string("IBNSINA_LOG_DIR") {
            self.log_dir = PathBuf::from(dir);
        }
    }
}

fn env_string(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|val| val.trim().to_string())
        .filter(|val| !val.is_empty())
}

fn env_parse<T: std::str::FromStr>(name: &str) -> Option<T> {
    env_string(name).and_then(|val| val.parse().ok())
}
