//! HTTP client for an external embedding service.
//!
//! The service exposes `POST {endpoint}/embed` taking a model name and a
//! list of texts, returning one vector per text in the same order. One
//! request covers a whole batch, so scoring n jobs costs one round trip.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{EncoderError, TextEncoder};

#[derive(Debug, Clone)]
pub struct HttpEncoderConfig {
    pub endpoint: String,
    pub model: String,
    pub dimension: usize,
    pub timeout_secs: u64,
    pub api_key: Option<String>,
}

impl Default for HttpEncoderConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:8100".into(),
            model: "paraphrase-multilingual-mpnet-base-v2".into(),
            dimension: 768,
            timeout_secs: 30,
            api_key: None,
        }
    }
}

impl HttpEncoderConfig {
    /// Read the client configuration from `JR_EMBED_*` environment
    /// variables, falling back to the defaults above.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            endpoint: std::env::var("JR_EMBED_ENDPOINT").unwrap_or(defaults.endpoint),
            model: std::env::var("JR_EMBED_MODEL").unwrap_or(defaults.model),
            dimension: std::env::var("JR_EMBED_DIMENSION")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.dimension),
            timeout_secs: std::env::var("JR_EMBED_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.timeout_secs),
            api_key: std::env::var("JR_EMBED_API_KEY").ok(),
        }
    }
}

#[derive(Debug, Serialize)]
struct EmbedRequest<'a> {
    model: &'a str,
    texts: &'a [String],
}

#[derive(Debug, Deserialize)]
struct EmbedResponse {
    embeddings: Vec<Vec<f32>>,
}

pub struct HttpEncoder {
    client: reqwest::Client,
    config: HttpEncoderConfig,
}

impl HttpEncoder {
    pub fn new(config: HttpEncoderConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .unwrap_or_default();
        Self { client, config }
    }

    pub fn from_env() -> Self {
        Self::new(HttpEncoderConfig::from_env())
    }

    fn embed_url(&self) -> String {
        format!("{}/embed", self.config.endpoint.trim_end_matches('/'))
    }
}

#[async_trait]
impl TextEncoder for HttpEncoder {
    fn name(&self) -> &'static str {
        "http"
    }

    fn dimension(&self) -> usize {
        self.config.dimension
    }

    async fn encode(&self, text: &str) -> Result<Vec<f32>, EncoderError> {
        let mut vectors = self.encode_batch(&[text.to_string()]).await?;
        vectors
            .pop()
            .ok_or_else(|| EncoderError::MalformedResponse("empty embedding list".into()))
    }

    async fn encode_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EncoderError> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let mut request = self.client.post(self.embed_url()).json(&EmbedRequest {
            model: &self.config.model,
            texts,
        });
        if let Some(key) = self.config.api_key.as_deref() {
            request = request.bearer_auth(key);
        }

        let response = request.send().await?.error_for_status()?;
        let body: EmbedResponse = response.json().await?;

        if body.embeddings.len() != texts.len() {
            return Err(EncoderError::MalformedResponse(format!(
                "expected {} embeddings, got {}",
                texts.len(),
                body.embeddings.len()
            )));
        }

        debug!(
            model = %self.config.model,
            batch = texts.len(),
            "embedding batch encoded"
        );
        Ok(body.embeddings)
    }
}
