//! Deterministic feature-hashing encoder.
//!
//! No model download, no network: each whitespace token is hashed into a
//! fixed-dimension vector with sign hashing, then L2-normalized. Useful as
//! an offline fallback and in tests where real embeddings are overkill.

use std::hash::{Hash, Hasher};

use async_trait::async_trait;
use siphasher::sip::SipHasher13;

use super::{EncoderError, TextEncoder};

// Fixed seed keeps embeddings stable across processes and Rust versions.
// Changing it changes every vector ever produced.
const HASH_SEED_K0: u64 = 0x7261_6e6b_6a6f_6273;
const HASH_SEED_K1: u64 = 0x656d_6265_6464_6572;

pub struct HashEncoder {
    dimension: usize,
}

impl HashEncoder {
    pub fn new(dimension: usize) -> Self {
        Self {
            dimension: dimension.max(1),
        }
    }

    fn hash_token(&self, token: &str) -> u64 {
        let mut hasher = SipHasher13::new_with_keys(HASH_SEED_K0, HASH_SEED_K1);
        token.hash(&mut hasher);
        hasher.finish()
    }

    fn encode_sync(&self, text: &str) -> Vec<f32> {
        let mut vector = vec![0.0f32; self.dimension];

        for token in text.split_whitespace() {
            let token = token
                .trim_matches(|c: char| !c.is_alphanumeric())
                .to_lowercase();
            if token.is_empty() {
                continue;
            }
            let h = self.hash_token(&token);
            let idx = (h as usize) % self.dimension;
            // Sign hashing: a second bit of the same hash decides +1/-1.
            let sign = if (h >> 63) == 0 { 1.0 } else { -1.0 };
            vector[idx] += sign;
        }

        let norm: f32 = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > 0.0 {
            for v in &mut vector {
                *v /= norm;
            }
        }
        vector
    }
}

impl Default for HashEncoder {
    fn default() -> Self {
        Self::new(256)
    }
}

#[async_trait]
impl TextEncoder for HashEncoder {
    fn name(&self) -> &'static str {
        "hash"
    }

    fn dimension(&self) -> usize {
        self.dimension
    }

    async fn encode(&self, text: &str) -> Result<Vec<f32>, EncoderError> {
        Ok(self.encode_sync(text))
    }

    async fn encode_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EncoderError> {
        Ok(texts.iter().map(|t| self.encode_sync(t)).collect())
    }
}
