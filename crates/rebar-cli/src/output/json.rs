use rebar_core::error::RebarError;
use rebar_core::model::Digitization;
use std::path::Path;

pub fn print(result: &Digitization) -> Result<(), RebarError> {
    let json = serde_json::to_string_pretty(result)?;
    println!("{json}");
    Ok(())
}

pub fn write(result: &Digitization, path: &Path) -> Result<(), RebarError> {
    let json = serde_json::to_string_pretty(result)?;
    std::fs::write(path, json)?;
    Ok(())
}
