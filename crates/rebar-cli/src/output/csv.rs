use rebar_core::error::RebarError;
use rebar_core::model::Digitization;
use rebar_core::COLUMNS;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Byte-order mark so that spreadsheet programs read the Cyrillic headers as UTF-8.
const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

pub fn print(result: &Digitization) -> Result<(), RebarError> {
    let stdout = std::io::stdout();
    write_rows(result, stdout.lock()).map_err(std::io::Error::from)?;
    Ok(())
}

pub fn write(result: &Digitization, path: &Path) -> Result<(), RebarError> {
    let mut file = File::create(path)?;
    file.write_all(UTF8_BOM)?;
    write_rows(result, file).map_err(std::io::Error::from)?;
    Ok(())
}

/// Write the bill of materials with the fixed column header, one row per
/// (element, rod spec), in document order.
fn write_rows<W: Write>(result: &Digitization, out: W) -> Result<(), csv::Error> {
    let mut writer = csv::Writer::from_writer(out);

    writer.write_record(COLUMNS)?;

    for row in &result.rows {
        writer.write_record([
            row.element.to_string(),
            row.name.clone(),
            row.diameter_mm.to_string(),
            row.length_mm.to_string(),
            row.direct_rods.to_string(),
            row.rods_per_embedded.to_string(),
            row.object_count.to_string(),
            row.embedded_count.to_string(),
            row.total.to_string(),
        ])?;
    }

    writer.flush()?;
    Ok(())
}
