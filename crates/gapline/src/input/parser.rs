//! Wide-table CSV/TSV loader with delimiter detection.

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::debug;

use super::source::{RawCell, RawRow, RawWideTable, SourceMetadata};
use crate::error::{GaplineError, Result};
use crate::schema::{DEFAULT_ID_COLUMN, WideSchema};

/// Delimiters to try when auto-detecting.
const DELIMITERS: &[u8] = &[b'\t', b',', b';', b'|'];

/// Parser configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Delimiter to use (None = auto-detect).
    pub delimiter: Option<u8>,
    /// Quote character.
    pub quote: u8,
    /// Name of the identifier column.
    pub id_column: String,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            delimiter: None,
            quote: b'"',
            id_column: DEFAULT_ID_COLUMN.to_string(),
        }
    }
}

/// Loads wide tables from delimited files.
pub struct Parser {
    config: ParserConfig,
}

impl Parser {
    /// Create a new parser with default configuration.
    pub fn new() -> Self {
        Self {
            config: ParserConfig::default(),
        }
    }

    /// Create a parser with custom configuration.
    pub fn with_config(config: ParserConfig) -> Self {
        Self { config }
    }

    /// Parse a file and return the raw table and its metadata.
    ///
    /// A missing file, unreadable CSV or malformed header is fatal and the
    /// error names the file.
    pub fn parse_file(&self, path: impl AsRef<Path>) -> Result<(RawWideTable, SourceMetadata)> {
        let path = path.as_ref();
        let contents = read_file(path)?;
        let hash = content_hash(&contents);

        let label = path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        let delimiter = match self.config.delimiter {
            Some(d) => d,
            None => detect_delimiter(&contents)
                .map_err(|_| GaplineError::EmptyData(format!("'{}' is empty", label)))?,
        };

        let table = self.parse_bytes(&label, &contents, delimiter)?;

        let format = match delimiter {
            b'\t' => "tsv",
            b',' => "csv",
            b';' => "csv-semicolon",
            b'|' => "psv",
            _ => "delimited",
        }
        .to_string();

        debug!(
            file = %label,
            rows = table.row_count(),
            years = table.year_count(),
            format = %format,
            "loaded wide table"
        );

        let metadata = SourceMetadata::new(
            path.to_path_buf(),
            hash,
            contents.len() as u64,
            format,
            &table,
        );

        Ok((table, metadata))
    }

    /// Parse bytes directly, labelling errors with `file`.
    pub fn parse_bytes(&self, file: &str, bytes: &[u8], delimiter: u8) -> Result<RawWideTable> {
        let csv_error = |source: csv::Error| GaplineError::Csv {
            file: file.to_string(),
            source,
        };

        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(true)
            .quote(self.config.quote)
            .flexible(true)
            .from_reader(bytes);

        let headers: Vec<String> = reader
            .headers()
            .map_err(csv_error)?
            .iter()
            .map(|s| s.to_string())
            .collect();

        if headers.iter().all(|h| h.trim().is_empty()) {
            return Err(GaplineError::EmptyData(format!("'{}' has no header row", file)));
        }

        let schema = WideSchema::from_headers(file, &headers, &self.config.id_column)?;

        let mut rows = Vec::new();
        for (row_idx, result) in reader.records().enumerate() {
            let record = result.map_err(csv_error)?;
            let line = record
                .position()
                .map(|p| p.line() as usize)
                .unwrap_or(row_idx + 2);
            let cells: Vec<RawCell> = record.iter().map(RawCell::from).collect();
            rows.push(RawRow::from_record(line, &schema, cells));
        }

        Ok(RawWideTable::new(file, schema, rows))
    }
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

/// Read a whole file, attaching the path to any IO error.
pub(crate) fn read_file(path: &Path) -> Result<Vec<u8>> {
    let mut file = File::open(path).map_err(|e| GaplineError::io(path, e))?;
    let mut contents = Vec::new();
    file.read_to_end(&mut contents)
        .map_err(|e| GaplineError::io(path, e))?;
    Ok(contents)
}

/// SHA-256 of file contents, formatted as `sha256:<hex>`.
pub fn content_hash(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("sha256:{:x}", hasher.finalize())
}

/// Detect the delimiter by analyzing the first few lines.
fn detect_delimiter(bytes: &[u8]) -> Result<u8> {
    let reader = BufReader::new(bytes);
    let lines: Vec<String> = reader
        .lines()
        .take(10)
        .filter_map(|l| l.ok())
        .filter(|l| !l.trim().is_empty())
        .collect();

    if lines.is_empty() {
        return Err(GaplineError::EmptyData("No lines to analyze".to_string()));
    }

    let mut best_delimiter = b',';
    let mut best_score = 0;

    for &delim in DELIMITERS {
        let counts: Vec<usize> = lines
            .iter()
            .map(|line| count_delimiter_in_line(line, delim))
            .collect();

        let first_count = counts[0];
        if first_count == 0 {
            continue;
        }

        // Higher count with lower variance wins; tab gets a slight bonus
        let consistent = counts.iter().all(|&c| c == first_count);
        let variance: f64 = if counts.len() > 1 {
            let mean = counts.iter().sum::<usize>() as f64 / counts.len() as f64;
            counts.iter().map(|&c| (c as f64 - mean).powi(2)).sum::<f64>() / counts.len() as f64
        } else {
            0.0
        };

        let score = if consistent {
            first_count * 1000 + (if delim == b'\t' { 100 } else { 0 })
        } else if variance < 1.0 {
            first_count * 100
        } else {
            first_count
        };

        if score > best_score {
            best_score = score;
            best_delimiter = delim;
        }
    }

    Ok(best_delimiter)
}

/// Count delimiter occurrences in a line, respecting quotes.
fn count_delimiter_in_line(line: &str, delimiter: u8) -> usize {
    let delim_char = delimiter as char;
    let mut count = 0;
    let mut in_quotes = false;

    for ch in line.chars() {
        match ch {
            '"' => in_quotes = !in_quotes,
            c if c == delim_char && !in_quotes => count += 1,
            _ => {}
        }
    }

    count
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_delimiter_csv() {
        let data = b"country,2000,2001\nChad,1,2\nPeru,4,5";
        assert_eq!(detect_delimiter(data).unwrap(), b',');
    }

    #[test]
    fn test_detect_delimiter_tsv() {
        let data = b"country\t2000\t2001\nChad\t1\t2\nPeru\t4\t5";
        assert_eq!(detect_delimiter(data).unwrap(), b'\t');
    }

    #[test]
    fn test_quoted_thousands_do_not_confuse_detection() {
        let data = b"country,2000,2001\nChad,\"1,200\",\"1,300\"\nPeru,\"4,000\",5";
        assert_eq!(detect_delimiter(data).unwrap(), b',');
    }

    #[test]
    fn test_parse_csv() {
        let parser = Parser::new();
        let data = b"country,2000,2001\nChad,\"$1,200\",2k\nPeru,4,";
        let table = parser.parse_bytes("gdp.csv", data, b',').unwrap();

        assert_eq!(table.years(), vec![2000, 2001]);
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.rows[0].country.as_deref(), Some("Chad"));
        assert_eq!(table.rows[0].cells[0], RawCell::Text("$1,200".to_string()));
        assert_eq!(table.rows[1].cells[1], RawCell::Missing);
        assert_eq!(table.rows[1].line, 3);
    }

    #[test]
    fn test_parse_rejects_bad_year_header() {
        let parser = Parser::new();
        let data = b"country,2000,total\nChad,1,2";
        let err = parser.parse_bytes("gdp.csv", data, b',').unwrap_err();
        assert!(matches!(err, GaplineError::InvalidYearColumn { ref column, .. } if column == "total"));
    }

    #[test]
    fn test_content_hash_format() {
        let hash = content_hash(b"country,2000\n");
        assert!(hash.starts_with("sha256:"));
        assert_eq!(hash.len(), "sha256:".len() + 64);
    }
}
