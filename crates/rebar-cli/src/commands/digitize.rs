use rebar_core::error::RebarError;
use rebar_core::extraction::pdftotext::PdftotextExtractor;
use rebar_core::extraction::pages_from_texts;
use rebar_core::model::Digitization;
use rebar_core::patterns::LinePatternSet;
use rebar_core::profile::load_profile;
use std::path::{Path, PathBuf};

use crate::output;

pub fn run(
    input_file: PathBuf,
    output_format: &str,
    output_file: Option<PathBuf>,
    profile_file: Option<PathBuf>,
) -> Result<(), RebarError> {
    let custom;
    let patterns = match profile_file {
        Some(path) => {
            let profile = load_profile(&path)?;
            tracing::debug!(profile = %profile.name, "using custom profile");
            custom = LinePatternSet::from_profile(&profile)?;
            &custom
        }
        None => LinePatternSet::builtin(),
    };

    let result = if has_extension(&input_file, "json") {
        let json_bytes = std::fs::read(&input_file)?;
        let texts: Vec<Option<String>> = serde_json::from_slice(&json_bytes)?;
        rebar_core::digitize_pages(&pages_from_texts(texts), patterns)?
    } else {
        let pdf_bytes = std::fs::read(&input_file)?;
        let extractor = PdftotextExtractor::new();
        rebar_core::digitize_pdf(&pdf_bytes, &extractor, patterns)?
    };

    match output_file {
        Some(path) => {
            if has_extension(&path, "csv") {
                output::csv::write(&result, &path)?;
            } else {
                output::json::write(&result, &path)?;
            }
            eprintln!("{} row(s) written to {}", result.rows.len(), path.display());
            report_diagnostics(&result);
        }
        None => match output_format {
            "json" => output::json::print(&result)?,
            "csv" => output::csv::print(&result)?,
            _ => output::table::print(&result),
        },
    }

    Ok(())
}

fn report_diagnostics(result: &Digitization) {
    for w in &result.warnings {
        match w.page_number {
            Some(page) => eprintln!("  warning (page {page}): {}", w.message),
            None => eprintln!("  warning: {}", w.message),
        }
    }
    if !result.skipped_lines.is_empty() {
        eprintln!(
            "  {} line(s) skipped during parsing",
            result.skipped_lines.len()
        );
    }
}

fn has_extension(path: &Path, ext: &str) -> bool {
    path.extension()
        .map(|e| e.eq_ignore_ascii_case(ext))
        .unwrap_or(false)
}
