//! Fusion weight configuration.
//!
//! Weight tuning is a deployable change, not a code change: the defaults
//! below are the reference ratios, overridable per instance or through
//! `JR_WEIGHT_*` environment variables.

/// Reference fusion weights. The embedding carries most of the signal, the
/// explicit skill overlap most of the rest.
pub const DEFAULT_WEIGHTS: FusionWeights = FusionWeights {
    embedding: 0.55,
    skills: 0.25,
    work_mode: 0.10,
    location: 0.05,
    compensation: 0.05,
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FusionWeights {
    pub embedding: f64,
    pub skills: f64,
    pub work_mode: f64,
    pub location: f64,
    pub compensation: f64,
}

impl Default for FusionWeights {
    fn default() -> Self {
        DEFAULT_WEIGHTS
    }
}

impl FusionWeights {
    pub fn sum(&self) -> f64 {
        self.embedding + self.skills + self.work_mode + self.location + self.compensation
    }
}

fn env_weight(var: &str, default: f64) -> f64 {
    std::env::var(var)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

/// Read fusion weights from `JR_WEIGHT_{EMBEDDING,SKILLS,WORK_MODE,LOCATION,
/// COMPENSATION}`. Unset or unparseable variables keep the reference value.
pub fn load_weights_from_env() -> FusionWeights {
    FusionWeights {
        embedding: env_weight("JR_WEIGHT_EMBEDDING", DEFAULT_WEIGHTS.embedding),
        skills: env_weight("JR_WEIGHT_SKILLS", DEFAULT_WEIGHTS.skills),
        work_mode: env_weight("JR_WEIGHT_WORK_MODE", DEFAULT_WEIGHTS.work_mode),
        location: env_weight("JR_WEIGHT_LOCATION", DEFAULT_WEIGHTS.location),
        compensation: env_weight("JR_WEIGHT_COMPENSATION", DEFAULT_WEIGHTS.compensation),
    }
}
