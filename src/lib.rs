//! Relevance scoring and reranking pipeline for job recommendations.
//!
//! Turns a [`UserProfile`] and a set of [`JobRecord`]s into a ranked list:
//! embedding similarity plus rule-based sub-scores are fused into one final
//! score, and an optional cross-encoder pass re-orders the top of the list.
//! The embedding and reranking models are external services behind the
//! [`embedding::TextEncoder`] and [`rerank::PairScorer`] traits.

pub mod config;
pub mod embedding;
pub mod error;
pub mod logging;
pub mod normalize;
pub mod pipeline;
pub mod rerank;
pub mod scoring;
pub mod text;

use serde::{Deserialize, Serialize};

pub use config::RankerConfig;
pub use error::ScoreError;
pub use pipeline::{RankedJob, Ranker};
pub use scoring::{FusionWeights, ScoreBreakdown};

/// Work arrangement vocabulary shared by profiles and jobs.
///
/// Upstream enrichment occasionally emits French tokens (`presentiel`,
/// `hybride`); parsing accepts them, the canonical form is always the
/// lowercase English name.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(ascii_case_insensitive)]
pub enum WorkMode {
    #[strum(to_string = "remote", serialize = "full remote")]
    Remote,
    #[strum(to_string = "hybrid", serialize = "hybride")]
    Hybrid,
    #[strum(
        to_string = "onsite",
        serialize = "on-site",
        serialize = "on site",
        serialize = "presentiel",
        serialize = "office"
    )]
    Onsite,
}

impl WorkMode {
    /// Lenient parse for strings coming from the enrichment boundary.
    /// Unknown or empty input maps to `None`, never to an error.
    pub fn parse(raw: &str) -> Option<Self> {
        normalize::normalize_token(raw).parse().ok()
    }
}

// Commonly used data models for the scoring functions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub target_job: String,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub soft_skills: Vec<String>,
    #[serde(default)]
    pub preferred_locations: Vec<String>,
    #[serde(default)]
    pub preferred_work_modes: Vec<WorkMode>,
    #[serde(default)]
    pub min_compensation: Option<f64>,
    #[serde(default)]
    pub currency: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobRecord {
    #[serde(default)]
    pub id: Option<i64>,
    pub title: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub required_skills: Vec<String>,
    #[serde(default)]
    pub nice_to_have_skills: Vec<String>,
    #[serde(default)]
    pub soft_skills: Vec<String>,
    #[serde(default)]
    pub missions: Vec<String>,
    #[serde(default, deserialize_with = "normalize::de_opt_work_mode")]
    pub work_mode: Option<WorkMode>,
    #[serde(default)]
    pub compensation_text: Option<String>,
    #[serde(default)]
    pub compensation_min: Option<f64>,
    #[serde(default)]
    pub compensation_max: Option<f64>,
    #[serde(default)]
    pub embedding_similarity: Option<f64>,
    /// Publication date from the crawler, passed through untouched.
    #[serde(default)]
    pub posted_at: Option<chrono::NaiveDate>,
}
