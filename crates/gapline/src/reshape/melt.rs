//! Wide-to-long reshaping.

use serde::{Deserialize, Serialize};

use super::metric::Metric;
use crate::normalize::NormalizedWideTable;

/// One observation in long format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactRow {
    pub country: String,
    pub year: i32,
    pub metric: Metric,
    pub value: f64,
}

/// Iterate the facts of a normalized table, row by row, year by year.
///
/// Yields exactly `rows × years` facts. Duplicate country rows are passed
/// through as duplicate facts.
pub fn facts(table: &NormalizedWideTable, metric: Metric) -> impl Iterator<Item = FactRow> + '_ {
    table.rows.iter().flat_map(move |row| {
        table
            .years
            .iter()
            .zip(&row.values)
            .map(move |(&year, &value)| FactRow {
                country: row.country.clone(),
                year,
                metric,
                value,
            })
    })
}

/// Materialize the facts of a normalized table.
pub fn melt(table: &NormalizedWideTable, metric: Metric) -> Vec<FactRow> {
    let mut out = Vec::with_capacity(table.row_count() * table.year_count());
    out.extend(facts(table, metric));
    out
}
