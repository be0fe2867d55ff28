//! Raw wide tables and source metadata.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::schema::WideSchema;

/// Metadata about a loaded source file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceMetadata {
    /// File name without path.
    pub file: String,
    /// Full path to the file.
    pub path: PathBuf,
    /// SHA-256 hash of the file contents.
    pub hash: String,
    /// File size in bytes.
    pub size_bytes: u64,
    /// Detected format (csv, tsv, etc.).
    pub format: String,
    /// Number of data rows (excluding header).
    pub row_count: usize,
    /// Number of year columns.
    pub year_count: usize,
    /// Earliest year column.
    pub first_year: i32,
    /// Latest year column.
    pub last_year: i32,
    /// When the file was loaded.
    pub loaded_at: DateTime<Utc>,
}

impl SourceMetadata {
    /// Create metadata for a file that has been loaded.
    pub fn new(
        path: PathBuf,
        hash: String,
        size_bytes: u64,
        format: String,
        table: &RawWideTable,
    ) -> Self {
        let file = path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let (first_year, last_year) = table.schema.year_span();

        Self {
            file,
            path,
            hash,
            size_bytes,
            format,
            row_count: table.row_count(),
            year_count: table.schema.year_count(),
            first_year,
            last_year,
            loaded_at: Utc::now(),
        }
    }
}

/// A single cell as it arrives from a source, before normalization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawCell {
    /// Already numeric.
    Number(f64),
    /// String-encoded value (possibly with `$`, commas or a k/M/B suffix).
    Text(String),
    /// Missing in the source.
    #[default]
    Missing,
}

impl RawCell {
    /// Check if a value represents a missing/null value.
    pub fn is_null_token(value: &str) -> bool {
        let trimmed = value.trim();
        trimmed.is_empty()
            || trimmed.eq_ignore_ascii_case("na")
            || trimmed.eq_ignore_ascii_case("n/a")
            || trimmed.eq_ignore_ascii_case("null")
            || trimmed.eq_ignore_ascii_case("none")
            || trimmed.eq_ignore_ascii_case("nil")
            || trimmed == "."
            || trimmed == "-"
    }

    /// Whether the source had no value at all.
    pub fn is_missing(&self) -> bool {
        match self {
            RawCell::Missing => true,
            RawCell::Number(v) => v.is_nan(),
            RawCell::Text(_) => false,
        }
    }

    /// Render the cell as it appeared, for reports.
    pub fn display(&self) -> String {
        match self {
            RawCell::Number(v) => v.to_string(),
            RawCell::Text(s) => s.clone(),
            RawCell::Missing => String::new(),
        }
    }
}

impl From<&str> for RawCell {
    fn from(value: &str) -> Self {
        if RawCell::is_null_token(value) {
            RawCell::Missing
        } else {
            RawCell::Text(value.to_string())
        }
    }
}

impl From<String> for RawCell {
    fn from(value: String) -> Self {
        if RawCell::is_null_token(&value) {
            RawCell::Missing
        } else {
            RawCell::Text(value)
        }
    }
}

impl From<f64> for RawCell {
    fn from(value: f64) -> Self {
        RawCell::Number(value)
    }
}

impl From<Option<f64>> for RawCell {
    fn from(value: Option<f64>) -> Self {
        value.map_or(RawCell::Missing, RawCell::Number)
    }
}

/// One data row of a wide table.
#[derive(Debug, Clone, PartialEq)]
pub struct RawRow {
    /// Line number in the source (header is line 1).
    pub line: usize,
    /// Identifier value, `None` when missing in the source.
    pub country: Option<String>,
    /// Year cells in schema order.
    pub cells: Vec<RawCell>,
}

impl RawRow {
    /// Split a full record into identifier and year cells.
    ///
    /// Short records are padded with missing cells; extra fields are ignored.
    pub fn from_record(line: usize, schema: &WideSchema, mut record: Vec<RawCell>) -> Self {
        record.resize(schema.width, RawCell::Missing);

        let country = match std::mem::take(&mut record[schema.id_index]) {
            RawCell::Text(s) => Some(s),
            RawCell::Number(v) if !v.is_nan() => Some(v.to_string()),
            _ => None,
        };

        let cells = schema
            .year_columns
            .iter()
            .map(|column| std::mem::take(&mut record[column.index]))
            .collect();

        Self {
            line,
            country,
            cells,
        }
    }
}

/// A wide table as loaded: identifier column plus validated year columns.
#[derive(Debug, Clone, PartialEq)]
pub struct RawWideTable {
    /// Label of the source (file name), used in errors and reports.
    pub file: String,
    /// Validated header layout.
    pub schema: WideSchema,
    /// Data rows in file order.
    pub rows: Vec<RawRow>,
}

impl RawWideTable {
    /// Create a table from an already validated schema.
    pub fn new(file: impl Into<String>, schema: WideSchema, rows: Vec<RawRow>) -> Self {
        Self {
            file: file.into(),
            schema,
            rows,
        }
    }

    /// Build a table from in-memory records, validating the header.
    ///
    /// # Example
    ///
    /// ```
    /// use gapline::RawWideTable;
    ///
    /// let table = RawWideTable::from_records(
    ///     "gdp.csv",
    ///     "country",
    ///     ["country", "2000", "2001"],
    ///     [["Country A", "$1,000", "2k"]],
    /// )
    /// .unwrap();
    /// assert_eq!(table.row_count(), 1);
    /// assert_eq!(table.years(), vec![2000, 2001]);
    /// ```
    pub fn from_records<H, R, C>(
        file: impl Into<String>,
        id_column: &str,
        headers: impl IntoIterator<Item = H>,
        records: impl IntoIterator<Item = R>,
    ) -> Result<Self>
    where
        H: AsRef<str>,
        R: IntoIterator<Item = C>,
        C: Into<RawCell>,
    {
        let file = file.into();
        let headers: Vec<String> = headers.into_iter().map(|h| h.as_ref().to_string()).collect();
        let schema = WideSchema::from_headers(&file, &headers, id_column)?;

        let rows = records
            .into_iter()
            .enumerate()
            .map(|(i, record)| {
                let record: Vec<RawCell> = record.into_iter().map(Into::into).collect();
                RawRow::from_record(i + 2, &schema, record)
            })
            .collect();

        Ok(Self { file, schema, rows })
    }

    /// Get the number of data rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Get the number of year columns.
    pub fn year_count(&self) -> usize {
        self.schema.year_count()
    }

    /// Years in header order.
    pub fn years(&self) -> Vec<i32> {
        self.schema.years()
    }
}
