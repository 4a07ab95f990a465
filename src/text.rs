//! Text representation builders.
//!
//! Structured profile/job data is flattened into labeled natural-language
//! paragraphs before being sent to the embedding or reranking service. Field
//! order is fixed and empty fields are omitted entirely; a "none"
//! placeholder would feed negative signal into the embedding. Both builders
//! are pure and total; identical input always yields identical text, which
//! downstream scoring relies on for reproducibility.

use crate::{JobRecord, UserProfile};

/// One paragraph describing the candidate: target role first, then skills,
/// preferences and the compensation floor.
pub fn build_profile_text(profile: &UserProfile) -> String {
    let mut parts: Vec<String> = Vec::new();

    parts.push(format!("Target role: {}.", profile.target_job));

    if !profile.skills.is_empty() {
        parts.push(format!("Technical skills: {}.", profile.skills.join(", ")));
    }

    if !profile.soft_skills.is_empty() {
        parts.push(format!("Soft skills: {}.", profile.soft_skills.join(", ")));
    }

    if !profile.preferred_locations.is_empty() {
        parts.push(format!(
            "Preferred locations: {}.",
            profile.preferred_locations.join(", ")
        ));
    }

    if !profile.preferred_work_modes.is_empty() {
        let modes: Vec<String> = profile
            .preferred_work_modes
            .iter()
            .map(|m| m.to_string())
            .collect();
        parts.push(format!("Preferred work modes: {}.", modes.join(", ")));
    }

    if let Some(floor) = profile.min_compensation {
        let sentence = match profile.currency.as_deref() {
            Some(currency) => format!(
                "Minimum expected compensation: {floor} {currency} (approximate monthly)."
            ),
            None => format!("Minimum expected compensation: {floor} (approximate monthly)."),
        };
        parts.push(sentence);
    }

    parts.join("\n")
}

/// One paragraph describing the posting, in the same fixed order the
/// enrichment step populates the record.
pub fn build_job_text(job: &JobRecord) -> String {
    let mut parts: Vec<String> = Vec::new();

    parts.push(format!("Job title: {}", job.title));

    if !job.company.is_empty() {
        parts.push(format!("Company: {}", job.company));
    }
    if !job.location.is_empty() {
        parts.push(format!("Location: {}", job.location));
    }
    if let Some(mode) = job.work_mode {
        parts.push(format!("Work mode: {mode}"));
    }

    if let Some(description) = job.description.as_deref() {
        if !description.is_empty() {
            parts.push("Description:".to_string());
            parts.push(description.to_string());
        }
    }

    if !job.required_skills.is_empty() {
        parts.push(format!(
            "Required technical skills: {}.",
            job.required_skills.join(", ")
        ));
    }
    if !job.nice_to_have_skills.is_empty() {
        parts.push(format!(
            "Nice-to-have skills: {}.",
            job.nice_to_have_skills.join(", ")
        ));
    }
    if !job.soft_skills.is_empty() {
        parts.push(format!("Desired soft skills: {}.", job.soft_skills.join(", ")));
    }

    if !job.missions.is_empty() {
        parts.push(format!("Main missions: {}", job.missions.join(" ")));
    }

    if let Some(compensation) = job.compensation_text.as_deref() {
        if !compensation.is_empty() {
            parts.push(format!("Stated compensation: {compensation}"));
        }
    }

    parts.join("\n")
}
