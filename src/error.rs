//! Boundary errors surfaced to callers of the pipeline.
//!
//! Only malformed input is a hard failure. External-service problems are
//! absorbed inside the pipeline with neutral fallbacks and never reach the
//! caller; see [`crate::embedding::EncoderError`] and
//! [`crate::rerank::RerankError`] for the client-side taxonomies.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScoreError {
    /// Profile identity is unresolvable (no target role).
    #[error("invalid profile: {0}")]
    InvalidProfile(String),
    /// Job identity is unresolvable (no title).
    #[error("invalid job: {0}")]
    InvalidJob(String),
}
