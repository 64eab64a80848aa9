use crate::aggregate::AggregationTable;
use crate::model::OutputRow;
use crate::objects::ObjectCounts;

/// Turn aggregated records into bill-of-materials rows.
///
/// Rows keep the table's first-insertion order. Each row is scaled by the
/// element's instance count (1 if the summary page does not list it):
///
/// `total = direct_rods * objects + rods_per_embedded * embedded_count * objects`
pub fn project_rows(table: &AggregationTable, counts: &ObjectCounts) -> Vec<OutputRow> {
    table
        .iter()
        .map(|(key, record)| {
            let object_count = counts.get(&key.element);
            let direct = record.direct_rods.saturating_mul(object_count);
            let embedded = record
                .rods_per_embedded
                .saturating_mul(record.embedded_count)
                .saturating_mul(object_count);

            OutputRow {
                element: key.element.clone(),
                name: key.rod.name.clone(),
                diameter_mm: key.rod.diameter_mm,
                length_mm: key.rod.length_mm,
                direct_rods: record.direct_rods,
                rods_per_embedded: record.rods_per_embedded,
                object_count,
                embedded_count: record.embedded_count,
                total: direct.saturating_add(embedded),
            }
        })
        .collect()
}
