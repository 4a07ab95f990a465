//! Token normalization shared by the rule scorers and the work-mode parser.

use serde::{Deserialize, Deserializer};

use crate::WorkMode;

/// Lowercase + trim. Every comparison in the rule scorers goes through this.
pub fn normalize_token(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Normalize a list of tokens, dropping empties and duplicates while
/// preserving first-seen order.
pub fn normalize_tokens(raw: &[String]) -> Vec<String> {
    let mut seen = Vec::new();
    for token in raw {
        let normalized = normalize_token(token);
        if !normalized.is_empty() && !seen.contains(&normalized) {
            seen.push(normalized);
        }
    }
    seen
}

/// Serde helper for `JobRecord.work_mode`: the enrichment collaborator is
/// allowed to emit anything, unknown vocabulary becomes `None` rather than a
/// deserialization failure.
pub fn de_opt_work_mode<'de, D>(deserializer: D) -> Result<Option<WorkMode>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(WorkMode::parse))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_token_lowercases_and_trims() {
        assert_eq!(normalize_token("  Python 3 "), "python 3");
        assert_eq!(normalize_token("SQL"), "sql");
        assert_eq!(normalize_token("   "), "");
    }

    #[test]
    fn normalize_tokens_dedupes_preserving_order() {
        let raw = vec![
            "Python".to_string(),
            "  SQL".to_string(),
            "python".to_string(),
            "".to_string(),
            "Django".to_string(),
        ];
        assert_eq!(normalize_tokens(&raw), vec!["python", "sql", "django"]);
    }

    #[test]
    fn normalize_tokens_of_empty_input_is_empty() {
        assert!(normalize_tokens(&[]).is_empty());
    }
}
