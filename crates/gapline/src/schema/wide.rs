//! Header validation for wide country-by-year tables.

use serde::{Deserialize, Serialize};

use crate::error::{GaplineError, Result};

/// Default name of the identifier column.
pub const DEFAULT_ID_COLUMN: &str = "country";

/// A year column located in the header row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearColumn {
    /// Zero-based position in the header row.
    pub index: usize,
    /// Header text as read from the file.
    pub header: String,
    /// Parsed year.
    pub year: i32,
}

/// Validated layout of a wide table: one identifier column, the rest years.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WideSchema {
    /// Name of the identifier column.
    pub id_column: String,
    /// Position of the identifier column in the header row.
    pub id_index: usize,
    /// Year columns in header order.
    pub year_columns: Vec<YearColumn>,
    /// Total number of header fields.
    pub width: usize,
}

impl WideSchema {
    /// Validate a header row.
    ///
    /// The identifier column is matched by name (surrounding whitespace and a
    /// leading byte-order mark are ignored). Every other header must parse as
    /// an integer; the first one that does not aborts with
    /// [`GaplineError::InvalidYearColumn`].
    pub fn from_headers<S: AsRef<str>>(file: &str, headers: &[S], id_column: &str) -> Result<Self> {
        if headers.is_empty() {
            return Err(GaplineError::EmptyData(format!("'{}' has no header row", file)));
        }

        let id_index = headers
            .iter()
            .position(|h| clean_header(h.as_ref()) == id_column)
            .ok_or_else(|| GaplineError::MissingIdColumn {
                file: file.to_string(),
                column: id_column.to_string(),
            })?;

        let mut year_columns = Vec::with_capacity(headers.len().saturating_sub(1));
        for (index, header) in headers.iter().enumerate() {
            if index == id_index {
                continue;
            }
            let header = header.as_ref();
            let year = clean_header(header).parse::<i32>().map_err(|_| {
                GaplineError::InvalidYearColumn {
                    file: file.to_string(),
                    column: header.to_string(),
                    position: index + 1,
                }
            })?;
            year_columns.push(YearColumn {
                index,
                header: header.to_string(),
                year,
            });
        }

        if year_columns.is_empty() {
            return Err(GaplineError::NoYearColumns {
                file: file.to_string(),
            });
        }

        Ok(Self {
            id_column: id_column.to_string(),
            id_index,
            year_columns,
            width: headers.len(),
        })
    }

    /// Years in header order.
    pub fn years(&self) -> Vec<i32> {
        self.year_columns.iter().map(|c| c.year).collect()
    }

    /// Number of year columns.
    pub fn year_count(&self) -> usize {
        self.year_columns.len()
    }

    /// Smallest and largest year in the header.
    pub fn year_span(&self) -> (i32, i32) {
        let min = self.year_columns.iter().map(|c| c.year).min().unwrap_or_default();
        let max = self.year_columns.iter().map(|c| c.year).max().unwrap_or_default();
        (min, max)
    }
}

fn clean_header(header: &str) -> &str {
    header.trim_start_matches('\u{feff}').trim()
}
