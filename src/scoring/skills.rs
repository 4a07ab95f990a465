//! Skill overlap between a profile and a posting.

use crate::normalize::normalize_tokens;
use crate::{JobRecord, UserProfile};

/// Fraction of the job's listed skills covered by the profile, in [0, 1].
///
/// A profile skill matches a job skill when either token contains the other,
/// which lets compound terms and suffixed variants line up ("react" vs
/// "react.js", "python" vs "python 3"). The denominator is the
/// job's skill count: a posting that lists only two skills is fully
/// satisfied by two matches, however rich the profile is. Matches are
/// capped so the score never exceeds 1.0.
pub fn skill_overlap_score(profile: &UserProfile, job: &JobRecord) -> f64 {
    let profile_skills = normalize_tokens(&profile.skills);
    let job_skills = normalize_tokens(&job.required_skills);

    if profile_skills.is_empty() || job_skills.is_empty() {
        return 0.0;
    }

    let mut matches = 0usize;
    for ps in &profile_skills {
        if job_skills.iter().any(|js| ps.contains(js.as_str()) || js.contains(ps.as_str())) {
            matches += 1;
        }
    }

    (matches as f64 / job_skills.len().max(1) as f64).min(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(skills: &[&str]) -> UserProfile {
        UserProfile {
            target_job: "Data Engineer".into(),
            skills: skills.iter().map(|s| s.to_string()).collect(),
            ..UserProfile::default()
        }
    }

    fn job(skills: &[&str]) -> JobRecord {
        JobRecord {
            title: "Data Engineer".into(),
            required_skills: skills.iter().map(|s| s.to_string()).collect(),
            ..JobRecord::default()
        }
    }

    #[test]
    fn empty_sets_score_zero() {
        assert_eq!(skill_overlap_score(&profile(&[]), &job(&["python"])), 0.0);
        assert_eq!(skill_overlap_score(&profile(&["python"]), &job(&[])), 0.0);
    }

    #[test]
    fn matching_is_case_insensitive() {
        let score = skill_overlap_score(&profile(&["python", "sql"]), &job(&["Python", "SQL"]));
        assert_eq!(score, 1.0);
    }

    #[test]
    fn substring_containment_matches_both_directions() {
        // profile "react" is contained in job "react.js"; job "sql" is
        // contained in profile "postgresql".
        let score = skill_overlap_score(
            &profile(&["react", "postgresql"]),
            &job(&["React.js", "SQL"]),
        );
        assert_eq!(score, 1.0);
    }

    #[test]
    fn denominator_is_the_job_skill_count() {
        // Two of the three listed job skills are covered.
        let score = skill_overlap_score(
            &profile(&["python", "sql"]),
            &job(&["Python", "Django", "SQL"]),
        );
        assert!((score - 2.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn score_is_capped_at_one() {
        // Many profile skills all hitting a single-skill posting.
        let score = skill_overlap_score(
            &profile(&["python", "python 3", "py"]),
            &job(&["Python"]),
        );
        assert_eq!(score, 1.0);
    }

    #[test]
    fn duplicate_job_skills_collapse() {
        let score = skill_overlap_score(
            &profile(&["python"]),
            &job(&["Python", "python", "SQL"]),
        );
        assert!((score - 0.5).abs() < 1e-9);
    }
}
