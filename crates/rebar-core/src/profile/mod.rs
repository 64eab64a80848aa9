pub mod builtin;
pub mod schema;

use crate::error::RebarError;
use schema::PatternProfile;
use std::path::Path;

/// Load a pattern profile from a JSON file.
pub fn load_profile(path: &Path) -> Result<PatternProfile, RebarError> {
    let content = std::fs::read_to_string(path).map_err(|e| RebarError::ProfileLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    parse_profile(&content, path)
}

/// Parse a pattern profile from a JSON string.
pub fn parse_profile(json: &str, source: &Path) -> Result<PatternProfile, RebarError> {
    let profile: PatternProfile =
        serde_json::from_str(json).map_err(|e| RebarError::ProfileLoad {
            path: source.to_path_buf(),
            reason: e.to_string(),
        })?;
    validate_profile(&profile)?;
    Ok(profile)
}

/// Parse a pattern profile from a JSON string (no file path context).
pub fn parse_profile_str(json: &str) -> Result<PatternProfile, RebarError> {
    let profile: PatternProfile = serde_json::from_str(json).map_err(RebarError::Json)?;
    validate_profile(&profile)?;
    Ok(profile)
}

/// Validate that a profile is well-formed.
pub fn validate_profile(profile: &PatternProfile) -> Result<(), RebarError> {
    if profile.name.trim().is_empty() {
        return Err(RebarError::ProfileInvalid("name must not be empty".into()));
    }

    if profile.element_prefixes.is_empty() {
        return Err(RebarError::ProfileInvalid(
            "element_prefixes must not be empty".into(),
        ));
    }

    if profile.element_categories.is_empty() {
        return Err(RebarError::ProfileInvalid(
            "element_categories must not be empty".into(),
        ));
    }

    for prefix in &profile.element_prefixes {
        if prefix.trim().is_empty() || prefix.chars().any(char::is_whitespace) {
            return Err(RebarError::ProfileInvalid(format!(
                "element prefix '{}' must be a single non-empty word",
                prefix
            )));
        }
    }

    for prefix in profile.element_descriptions.keys() {
        if !profile.element_prefixes.contains(prefix) {
            return Err(RebarError::ProfileInvalid(format!(
                "description given for unknown element prefix '{}'",
                prefix
            )));
        }
    }

    for category in &profile.element_categories {
        if category.trim().is_empty() {
            return Err(RebarError::ProfileInvalid(
                "element category must not be empty".into(),
            ));
        }
    }

    let phrases = [
        ("section_marker", &profile.section_marker),
        ("embedded_item_label", &profile.embedded_item_label),
        ("embedded_item_prefix", &profile.embedded_item_prefix),
        ("rod_keyword", &profile.rod_keyword),
        ("standard_prefix", &profile.standard_prefix),
    ];
    for (field, value) in phrases {
        if value.trim().is_empty() {
            return Err(RebarError::ProfileInvalid(format!(
                "{} must not be empty",
                field
            )));
        }
    }

    Ok(())
}
