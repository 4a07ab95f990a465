//! Rule-based sub-scorers and score fusion.
//!
//! Four explainable signals computed from structured fields, no model call
//! involved, each a pure function of `(profile, job)` returning [0, 1].
//! [`fuse`] blends them with the embedding similarity into the final score.

pub mod compensation;
pub mod fusion;
pub mod location;
pub mod skills;
pub mod weights;
pub mod work_mode;

use serde::{Deserialize, Serialize};

pub use compensation::compensation_score;
pub use fusion::fuse;
pub use location::location_score;
pub use skills::skill_overlap_score;
pub use weights::{DEFAULT_WEIGHTS, FusionWeights, load_weights_from_env};
pub use work_mode::work_mode_score;

use crate::{JobRecord, UserProfile};

/// The four rule signals, before fusion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RuleScores {
    pub skills: f64,
    pub work_mode: f64,
    pub location: f64,
    pub compensation: f64,
}

/// Full per-job score detail returned to callers. Request-scoped: computed
/// from current profile and job state, never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub skills: f64,
    pub work_mode: f64,
    pub location: f64,
    pub compensation: f64,
    pub embedding: f64,
    /// Weighted fusion of the five sub-scores ("final" on the wire;
    /// renamed because `final` is reserved in Rust).
    #[serde(rename = "final")]
    pub total: f64,
}

/// Compute the four rule signals. Order does not matter, none of them can
/// fail, and a degenerate input always lands on the documented 0.0 default.
pub fn compute_rule_scores(profile: &UserProfile, job: &JobRecord) -> RuleScores {
    RuleScores {
        skills: skill_overlap_score(profile, job),
        work_mode: work_mode_score(profile, job),
        location: location_score(profile, job),
        compensation: compensation_score(profile, job),
    }
}

/// Rule scores + a known embedding similarity, fused in one step.
pub fn score_with_embedding(
    profile: &UserProfile,
    job: &JobRecord,
    embedding: f64,
    weights: &FusionWeights,
) -> ScoreBreakdown {
    let rules = compute_rule_scores(profile, job);
    fuse(embedding, &rules, weights)
}
