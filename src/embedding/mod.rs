//! Embedding similarity scoring.
//!
//! The embedding model is an opaque oracle behind [`TextEncoder`]: text in,
//! fixed-length vector out. Two implementations ship with the crate:
//! [`HttpEncoder`] for an external embedding service and [`HashEncoder`],
//! a deterministic feature-hashing fallback that needs no network and no
//! training.

pub mod hash;
pub mod http;
pub mod similarity;

use async_trait::async_trait;
use thiserror::Error;

pub use hash::HashEncoder;
pub use http::{HttpEncoder, HttpEncoderConfig};
pub use similarity::cosine_similarity;

#[derive(Debug, Error)]
pub enum EncoderError {
    #[error("embedding request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("embedding service returned malformed output: {0}")]
    MalformedResponse(String),
}

/// Capability interface for the external embedding model.
///
/// Implementations must honor the batching contract: when many jobs are
/// scored against one profile, the profile is encoded once and all job
/// texts go through a single [`TextEncoder::encode_batch`] call.
#[async_trait]
pub trait TextEncoder: Send + Sync {
    /// Implementation name, recorded in logs ("http", "hash").
    fn name(&self) -> &'static str;

    /// Fixed output dimensionality of the model.
    fn dimension(&self) -> usize;

    async fn encode(&self, text: &str) -> Result<Vec<f32>, EncoderError>;

    /// Encode many texts in one round trip. The default loops over
    /// [`TextEncoder::encode`]; service-backed implementations override it
    /// with a real batch call.
    async fn encode_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EncoderError> {
        let mut vectors = Vec::with_capacity(texts.len());
        for text in texts {
            vectors.push(self.encode(text).await?);
        }
        Ok(vectors)
    }
}

/// Similarity of two already-encoded texts, in [0, 1].
pub fn pair_similarity(a: &[f32], b: &[f32]) -> f64 {
    cosine_similarity(a, b) as f64
}
