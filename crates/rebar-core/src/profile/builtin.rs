use crate::error::RebarError;
use crate::profile::schema::PatternProfile;

const DEFAULT_PROFILE_JSON: &str = include_str!("../../../../profiles/default.json");

/// Available predefined profiles.
pub const PRESETS: &[&str] = &["default"];

/// Load a predefined profile by name.
pub fn load_preset(name: &str) -> Result<PatternProfile, RebarError> {
    match name {
        "default" => default_profile(),
        _ => Err(RebarError::ProfileInvalid(format!(
            "unknown preset '{}'. Available: {}",
            name,
            PRESETS.join(", ")
        ))),
    }
}

/// The vocabulary of Russian structural specification sheets.
pub fn default_profile() -> Result<PatternProfile, RebarError> {
    let profile: PatternProfile = serde_json::from_str(DEFAULT_PROFILE_JSON)?;
    Ok(profile)
}
