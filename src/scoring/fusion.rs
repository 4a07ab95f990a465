//! Linear fusion of the embedding score and the rule sub-scores.

use super::{FusionWeights, RuleScores, ScoreBreakdown};

/// Weighted sum of the five sub-scores, clamped to [0, 1].
///
/// Stateless and identical for single-job and batch scoring: no batch-level
/// normalization ever happens here, so scores stay comparable across pages
/// and across requests. The clamp only matters if a sub-score drifts out of
/// range.
pub fn fuse(embedding: f64, rules: &RuleScores, weights: &FusionWeights) -> ScoreBreakdown {
    let total = weights.embedding * embedding
        + weights.skills * rules.skills
        + weights.work_mode * rules.work_mode
        + weights.location * rules.location
        + weights.compensation * rules.compensation;

    ScoreBreakdown {
        skills: rules.skills,
        work_mode: rules.work_mode,
        location: rules.location,
        compensation: rules.compensation,
        embedding,
        total: total.clamp(0.0, 1.0),
    }
}
