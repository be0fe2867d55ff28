//! Table preprocessing: normalize every year cell, drop incomplete rows.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::numeric::normalize_cell;
use crate::input::{RawRow, RawWideTable};

/// A row with a country and one finite value per year column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedRow {
    /// Source line the row came from.
    pub line: usize,
    pub country: String,
    /// Values in the table's year order.
    pub values: Vec<f64>,
}

/// A wide table with no missing cells.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedWideTable {
    /// Label of the source.
    pub file: String,
    /// Years in header order.
    pub years: Vec<i32>,
    pub rows: Vec<NormalizedRow>,
}

impl NormalizedWideTable {
    /// Get the number of rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Get the number of year columns.
    pub fn year_count(&self) -> usize {
        self.years.len()
    }
}

/// Why a row was removed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum DropReason {
    /// The source had no value in these columns (`country` for the identifier).
    Missing { columns: Vec<String> },
    /// A value was present but did not parse to a finite number.
    Unparseable { column: String, value: String },
}

impl std::fmt::Display for DropReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DropReason::Missing { columns } => {
                let shown: Vec<&str> = columns.iter().take(5).map(String::as_str).collect();
                let more = columns.len().saturating_sub(shown.len());
                write!(f, "missing {}", shown.join(", "))?;
                if more > 0 {
                    write!(f, " (+{} more)", more)?;
                }
                Ok(())
            }
            DropReason::Unparseable { column, value } => {
                write!(f, "unparseable '{}' in {}", value, column)
            }
        }
    }
}

/// A row removed by the preprocessor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DroppedRow {
    pub line: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(flatten)]
    pub reason: DropReason,
}

/// What the preprocessor did to one table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PreprocessReport {
    pub file: String,
    pub input_rows: usize,
    pub kept_rows: usize,
    /// Rows dropped because the source had missing cells.
    pub dropped_missing: usize,
    /// Rows dropped because a cell did not normalize.
    pub dropped_unparseable: usize,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dropped: Vec<DroppedRow>,
}

/// Applies the numeric normalizer to whole tables.
pub struct Preprocessor;

impl Preprocessor {
    /// Create a new preprocessor.
    pub fn new() -> Self {
        Self
    }

    /// Normalize a raw table.
    ///
    /// Rows with raw missing cells are dropped first; the remaining rows are
    /// normalized and any row with a cell that still has no finite value is
    /// dropped too. The input is left untouched.
    pub fn process(&self, table: &RawWideTable) -> (NormalizedWideTable, PreprocessReport) {
        let headers: Vec<&str> = table
            .schema
            .year_columns
            .iter()
            .map(|c| c.header.as_str())
            .collect();

        let mut rows = Vec::with_capacity(table.row_count());
        let mut report = PreprocessReport {
            file: table.file.clone(),
            input_rows: table.row_count(),
            ..Default::default()
        };

        for raw in &table.rows {
            match self.process_row(raw, &table.schema.id_column, &headers) {
                Ok(row) => rows.push(row),
                Err(reason) => {
                    debug!(file = %table.file, line = raw.line, %reason, "dropping row");
                    match reason {
                        DropReason::Missing { .. } => report.dropped_missing += 1,
                        DropReason::Unparseable { .. } => report.dropped_unparseable += 1,
                    }
                    report.dropped.push(DroppedRow {
                        line: raw.line,
                        country: raw.country.clone(),
                        reason,
                    });
                }
            }
        }

        report.kept_rows = rows.len();

        let normalized = NormalizedWideTable {
            file: table.file.clone(),
            years: table.years(),
            rows,
        };

        (normalized, report)
    }

    fn process_row(
        &self,
        raw: &RawRow,
        id_column: &str,
        headers: &[&str],
    ) -> Result<NormalizedRow, DropReason> {
        // Pass 1: raw missing values
        let mut missing: Vec<String> = Vec::new();
        if raw.country.is_none() {
            missing.push(id_column.to_string());
        }
        for (cell, header) in raw.cells.iter().zip(headers) {
            if cell.is_missing() {
                missing.push(header.to_string());
            }
        }
        if !missing.is_empty() {
            return Err(DropReason::Missing { columns: missing });
        }

        // Pass 2: normalization
        let mut values = Vec::with_capacity(raw.cells.len());
        for (cell, header) in raw.cells.iter().zip(headers) {
            match normalize_cell(cell).filter(|v| v.is_finite()) {
                Some(v) => values.push(v),
                None => {
                    return Err(DropReason::Unparseable {
                        column: header.to_string(),
                        value: cell.display(),
                    });
                }
            }
        }

        Ok(NormalizedRow {
            line: raw.line,
            country: raw.country.clone().unwrap_or_default(),
            values,
        })
    }
}

impl Default for Preprocessor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::RawCell;

    fn raw(rows: Vec<Vec<RawCell>>) -> RawWideTable {
        RawWideTable::from_records("gdp.csv", "country", ["country", "2000", "2001"], rows).unwrap()
    }

    fn text(s: &str) -> RawCell {
        RawCell::from(s)
    }

    #[test]
    fn test_normalizes_all_cells() {
        let table = raw(vec![vec![text("Chad"), text("$1,000"), text("2k")]]);
        let (normalized, report) = Preprocessor::new().process(&table);

        assert_eq!(normalized.years, vec![2000, 2001]);
        assert_eq!(normalized.rows[0].country, "Chad");
        assert_eq!(normalized.rows[0].values, vec![1000.0, 2000.0]);
        assert_eq!(report.kept_rows, 1);
        assert!(report.dropped.is_empty());
    }

    #[test]
    fn test_drops_raw_missing_rows() {
        let table = raw(vec![
            vec![text("Chad"), text("1"), text("")],
            vec![text("Peru"), text("1"), text("2")],
        ]);
        let (normalized, report) = Preprocessor::new().process(&table);

        assert_eq!(normalized.row_count(), 1);
        assert_eq!(normalized.rows[0].country, "Peru");
        assert_eq!(report.dropped_missing, 1);
        assert_eq!(
            report.dropped[0].reason,
            DropReason::Missing {
                columns: vec!["2001".to_string()]
            }
        );
    }

    #[test]
    fn test_drops_missing_country() {
        let table = raw(vec![vec![text(""), text("1"), text("2")]]);
        let (normalized, report) = Preprocessor::new().process(&table);

        assert_eq!(normalized.row_count(), 0);
        assert_eq!(
            report.dropped[0].reason,
            DropReason::Missing {
                columns: vec!["country".to_string()]
            }
        );
    }

    #[test]
    fn test_drops_unparseable_rows() {
        let table = raw(vec![
            vec![text("Chad"), text("1Bn"), text("2")],
            vec![text("Peru"), text("1"), RawCell::Number(f64::INFINITY)],
        ]);
        let (normalized, report) = Preprocessor::new().process(&table);

        assert_eq!(normalized.row_count(), 0);
        assert_eq!(report.dropped_unparseable, 2);
        assert_eq!(
            report.dropped[0].reason,
            DropReason::Unparseable {
                column: "2000".to_string(),
                value: "1Bn".to_string()
            }
        );
    }

    #[test]
    fn test_numeric_cells_kept() {
        let table = raw(vec![vec![text("Chad"), RawCell::Number(1.5), RawCell::Number(2.0)]]);
        let (normalized, _) = Preprocessor::new().process(&table);
        assert_eq!(normalized.rows[0].values, vec![1.5, 2.0]);
    }

    #[test]
    fn test_input_not_mutated() {
        let table = raw(vec![vec![text("Chad"), text("2k"), text("x")]]);
        let before = table.clone();
        let _ = Preprocessor::new().process(&table);
        assert_eq!(table, before);
    }

    #[test]
    fn test_drop_reason_display() {
        let reason = DropReason::Missing {
            columns: (1990..1997).map(|y| y.to_string()).collect(),
        };
        assert_eq!(reason.to_string(), "missing 1990, 1991, 1992, 1993, 1994 (+2 more)");
    }
}
