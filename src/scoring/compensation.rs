//! Compensation compatibility.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::{JobRecord, UserProfile};

static RE_NUMBER: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+(?:[.,]\d+)?").unwrap());

/// Salary compatibility against the profile's monthly floor.
///
/// Priority order: a structured minimum is compared directly to the floor
/// (>= floor 1.0, >= 70% of it 0.5, else 0.0); a structured maximum alone
/// uses a discounted ladder (0.8 / 0.4 / 0.0) since the floor may only be
/// reachable at the top of the band; otherwise the free-text statement is
/// mined for its largest numeric token and judged like a minimum. A profile
/// without a floor scores 0.0 everywhere: no constraint earns no credit,
/// otherwise unscored profiles would look equally compatible with every job
/// on this axis.
pub fn compensation_score(profile: &UserProfile, job: &JobRecord) -> f64 {
    let Some(floor) = profile.min_compensation else {
        return 0.0;
    };

    if let Some(min) = job.compensation_min {
        return ladder(min, floor, 1.0, 0.5);
    }

    if let Some(max) = job.compensation_max {
        return ladder(max, floor, 0.8, 0.4);
    }

    let best_effort = extract_numeric_figure(job.compensation_text.as_deref().unwrap_or(""));
    if best_effort <= 0.0 {
        return 0.0;
    }
    ladder(best_effort, floor, 1.0, 0.5)
}

fn ladder(offered: f64, floor: f64, full: f64, partial: f64) -> f64 {
    if offered >= floor {
        full
    } else if offered >= 0.7 * floor {
        partial
    } else {
        0.0
    }
}

/// Best-effort numeric read of a free-text salary statement: take every
/// numeric token (comma accepted as decimal separator) and keep the largest,
/// e.g. "between 6000 and 8000 MAD" -> 8000.
pub fn extract_numeric_figure(text: &str) -> f64 {
    RE_NUMBER
        .find_iter(text)
        .filter_map(|m| m.as_str().replace(',', ".").parse::<f64>().ok())
        .fold(0.0, f64::max)
}
