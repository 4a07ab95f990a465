//! HTTP client for an external pairwise reranking service.
//!
//! `POST {endpoint}/rerank` takes the model name and the (query, document)
//! pairs, and answers with one raw logit per pair, order-preserving.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{PairScorer, RerankError};

#[derive(Debug, Clone)]
pub struct HttpPairScorerConfig {
    pub endpoint: String,
    pub model: String,
    pub timeout_secs: u64,
    pub api_key: Option<String>,
}

impl Default for HttpPairScorerConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:8101".into(),
            model: "ms-marco-MiniLM-L-6-v2".into(),
            timeout_secs: 30,
            api_key: None,
        }
    }
}

impl HttpPairScorerConfig {
    /// Read the client configuration from `JR_RERANK_*` environment
    /// variables, falling back to the defaults above.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            endpoint: std::env::var("JR_RERANK_ENDPOINT").unwrap_or(defaults.endpoint),
            model: std::env::var("JR_RERANK_MODEL").unwrap_or(defaults.model),
            timeout_secs: std::env::var("JR_RERANK_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.timeout_secs),
            api_key: std::env::var("JR_RERANK_API_KEY").ok(),
        }
    }
}

#[derive(Debug, Serialize)]
struct RerankRequest<'a> {
    model: &'a str,
    pairs: &'a [(String, String)],
}

#[derive(Debug, Deserialize)]
struct RerankResponse {
    scores: Vec<f64>,
}

pub struct HttpPairScorer {
    client: reqwest::Client,
    config: HttpPairScorerConfig,
}

impl HttpPairScorer {
    pub fn new(config: HttpPairScorerConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .unwrap_or_default();
        Self { client, config }
    }

    pub fn from_env() -> Self {
        Self::new(HttpPairScorerConfig::from_env())
    }

    fn rerank_url(&self) -> String {
        format!("{}/rerank", self.config.endpoint.trim_end_matches('/'))
    }
}

#[async_trait]
impl PairScorer for HttpPairScorer {
    fn name(&self) -> &'static str {
        "http"
    }

    async fn score_pairs(&self, pairs: &[(String, String)]) -> Result<Vec<f64>, RerankError> {
        if pairs.is_empty() {
            return Ok(Vec::new());
        }

        let mut request = self.client.post(self.rerank_url()).json(&RerankRequest {
            model: &self.config.model,
            pairs,
        });
        if let Some(key) = self.config.api_key.as_deref() {
            request = request.bearer_auth(key);
        }

        let response = request.send().await?.error_for_status()?;
        let body: RerankResponse = response.json().await?;

        if body.scores.len() != pairs.len() {
            return Err(RerankError::MalformedResponse(format!(
                "expected {} scores, got {}",
                pairs.len(),
                body.scores.len()
            )));
        }

        debug!(
            model = %self.config.model,
            pairs = pairs.len(),
            "rerank batch scored"
        );
        Ok(body.scores)
    }
}
