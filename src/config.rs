//! Pipeline configuration.

use crate::scoring::{FusionWeights, load_weights_from_env};

pub const DEFAULT_RERANK_TOP_K: usize = 30;

#[derive(Debug, Clone)]
pub struct RankerConfig {
    /// Fusion weights; the defaults reproduce the reference ratios.
    pub weights: FusionWeights,
    /// How many fusion-ranked jobs the cross-encoder re-scores per request.
    /// 0 disables the stage.
    pub rerank_top_k: usize,
}

impl Default for RankerConfig {
    fn default() -> Self {
        Self {
            weights: FusionWeights::default(),
            rerank_top_k: DEFAULT_RERANK_TOP_K,
        }
    }
}

/// Load the ranker configuration from the environment: fusion weights from
/// `JR_WEIGHT_*` and the rerank window from `JR_RERANK_TOP_K`. Anything
/// unset or unparseable keeps its default.
pub fn load_config_from_env() -> RankerConfig {
    RankerConfig {
        weights: load_weights_from_env(),
        rerank_top_k: std::env::var("JR_RERANK_TOP_K")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_RERANK_TOP_K),
    }
}
