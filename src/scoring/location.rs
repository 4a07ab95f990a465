//! Location compatibility.

use crate::normalize::{normalize_token, normalize_tokens};
use crate::{JobRecord, UserProfile};

/// Substring match of any preferred location inside the job's location
/// string. Binary: 1.0 on the first hit, otherwise 0.0. Missing preferences
/// or a missing job location give 0.0 (no signal).
pub fn location_score(profile: &UserProfile, job: &JobRecord) -> f64 {
    let preferred = normalize_tokens(&profile.preferred_locations);
    let job_location = normalize_token(&job.location);

    if preferred.is_empty() || job_location.is_empty() {
        return 0.0;
    }

    if preferred.iter().any(|loc| job_location.contains(loc.as_str())) {
        1.0
    } else {
        0.0
    }
}
