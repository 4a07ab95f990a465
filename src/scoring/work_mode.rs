//! Work-mode compatibility.

use crate::{JobRecord, UserProfile, WorkMode};

/// Compatibility between the profile's preferred modes and the job's mode.
///
/// No preference or no job mode means no signal: 0.0, not neutral. An exact
/// match is 1.0. An onsite job against a remote/hybrid preference is 0.2:
/// poor but not hopeless, onsite postings sometimes carry flexibility the
/// single field does not capture. Every other mismatch is 0.5.
pub fn work_mode_score(profile: &UserProfile, job: &JobRecord) -> f64 {
    let Some(job_mode) = job.work_mode else {
        return 0.0;
    };
    if profile.preferred_work_modes.is_empty() {
        return 0.0;
    }

    if profile.preferred_work_modes.contains(&job_mode) {
        return 1.0;
    }

    let prefers_flexible = profile
        .preferred_work_modes
        .iter()
        .any(|m| matches!(m, WorkMode::Remote | WorkMode::Hybrid));
    if job_mode == WorkMode::Onsite && prefers_flexible {
        return 0.2;
    }

    0.5
}
