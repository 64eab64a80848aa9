use rebar_core::error::RebarError;
use rebar_core::patterns::LinePatternSet;
use rebar_core::profile::builtin;
use std::path::Path;

pub fn list() -> Result<(), RebarError> {
    println!("Available predefined profiles:\n");
    for name in builtin::PRESETS {
        let p = builtin::load_preset(name)?;
        println!("  {:<8} {} (v{})", name, p.name, p.version);
        if let Some(ref desc) = p.description {
            println!("           {}", desc);
        }
        println!();
    }
    Ok(())
}

pub fn show(preset: &str) -> Result<(), RebarError> {
    let p = builtin::load_preset(preset)?;
    println!("{}", serde_json::to_string_pretty(&p)?);
    Ok(())
}

pub fn validate(file: &Path) -> Result<(), RebarError> {
    let p = rebar_core::profile::load_profile(file)?;
    // Compiling catches vocabulary that validates but cannot form a pattern.
    LinePatternSet::from_profile(&p)?;

    println!("Profile '{}' (v{}) is valid.", p.name, p.version);
    println!("  Element prefixes: {}", p.element_prefixes.join(", "));
    println!("  Element categories: {}", p.element_categories.join(", "));

    let undescribed: Vec<&str> = p
        .element_prefixes
        .iter()
        .filter(|prefix| !p.element_descriptions.contains_key(*prefix))
        .map(|s| s.as_str())
        .collect();
    if !undescribed.is_empty() {
        println!("\nWarnings:");
        println!("  - no description for prefix(es): {}", undescribed.join(", "));
    }

    Ok(())
}
