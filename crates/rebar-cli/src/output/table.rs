use rebar_core::model::{Digitization, OutputRow};

pub fn print(result: &Digitization) {
    print!("{}", format_result(result));
}

pub fn format_result(result: &Digitization) -> String {
    let mut out = String::new();

    if result.rows.is_empty() {
        out.push_str("No rod lines recognized.\n");
    } else {
        let name_width = result
            .rows
            .iter()
            .map(|r| r.name.chars().count())
            .max()
            .unwrap_or(12)
            .max("Наименование".chars().count());
        let element_width = result
            .rows
            .iter()
            .map(|r| r.element.as_str().chars().count())
            .max()
            .unwrap_or(7)
            .max("Элемент".chars().count());

        out.push_str(&format!(
            "{:<ew$}  {:<nw$}  {:>5}  {:>6}  {:>7}  {:>7}  {:>5}  {:>5}  {:>8}\n",
            "Элемент",
            "Наименование",
            "Ø",
            "L, мм",
            "Прямо",
            "В ЗД",
            "Объ.",
            "ЗД",
            "Всего",
            ew = element_width,
            nw = name_width,
        ));
        out.push_str(&format!(
            "{}\n",
            "-".repeat(element_width + name_width + 5 + 6 + 7 + 7 + 5 + 5 + 8 + 16)
        ));

        for row in &result.rows {
            out.push_str(&format_row(row, element_width, name_width));
        }

        out.push_str("\nTotals by rod spec:\n");
        let totals = result.totals_by_spec();
        for (spec, total) in &totals {
            out.push_str(&format!(
                "  {:<nw$}  {:>8}\n",
                spec.name,
                total,
                nw = name_width
            ));
        }
    }

    if !result.warnings.is_empty() {
        out.push_str("\nWarnings:\n");
        for w in &result.warnings {
            match w.page_number {
                Some(page) => out.push_str(&format!("  - page {page}: {}\n", w.message)),
                None => out.push_str(&format!("  - {}\n", w.message)),
            }
        }
    }

    if !result.skipped_lines.is_empty() {
        out.push_str("\nSkipped lines:\n");
        for s in &result.skipped_lines {
            out.push_str(&format!(
                "  - page {}: {} ({})\n",
                s.page_number, s.line_text, s.reason
            ));
        }
    }

    out
}

fn format_row(row: &OutputRow, element_width: usize, name_width: usize) -> String {
    format!(
        "{:<ew$}  {:<nw$}  {:>5}  {:>6}  {:>7}  {:>7}  {:>5}  {:>5}  {:>8}\n",
        row.element.as_str(),
        row.name,
        row.diameter_mm,
        row.length_mm,
        row.direct_rods,
        row.rods_per_embedded,
        row.object_count,
        row.embedded_count,
        row.total,
        ew = element_width,
        nw = name_width,
    )
}
