//! Delimited-text export of unified rows.

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use crate::error::{GaplineError, Result};
use crate::join::UnifiedRow;

/// Download name for a year's slice.
pub fn export_file_name(year: i32) -> String {
    format!("gdp_life_pop_{}.csv", year)
}

/// Write rows with a header line using `delimiter`.
pub fn write_delimited<'a, W: Write>(
    rows: impl IntoIterator<Item = &'a UnifiedRow>,
    writer: W,
    delimiter: u8,
) -> Result<()> {
    let mut out = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .from_writer(writer);

    let mut wrote_any = false;
    for row in rows {
        out.serialize(row)
            .map_err(|e| GaplineError::Persistence(format!("Failed to write row: {}", e)))?;
        wrote_any = true;
    }

    // serialize() only emits the header with the first record
    if !wrote_any {
        out.write_record(["country", "year", "gdp_per_cap", "life_exp", "population"])
            .map_err(|e| GaplineError::Persistence(format!("Failed to write header: {}", e)))?;
    }

    out.flush()
        .map_err(|e| GaplineError::Persistence(format!("Failed to flush output: {}", e)))?;
    Ok(())
}

/// Render rows as comma-separated text.
pub fn to_csv_string<'a>(rows: impl IntoIterator<Item = &'a UnifiedRow>) -> Result<String> {
    let mut buf = Vec::new();
    write_delimited(rows, &mut buf, b',')?;
    String::from_utf8(buf).map_err(|e| GaplineError::Persistence(format!("Invalid UTF-8 in output: {}", e)))
}

/// Write rows to a file, creating parent directories as needed.
pub fn write_delimited_file<'a>(
    rows: impl IntoIterator<Item = &'a UnifiedRow>,
    path: impl AsRef<Path>,
    delimiter: u8,
) -> Result<()> {
    let path = path.as_ref();

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent).map_err(|e| GaplineError::io(parent, e))?;
        }
    }

    let file = File::create(path).map_err(|e| GaplineError::io(path, e))?;
    write_delimited(rows, std::io::BufWriter::new(file), delimiter)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_csv_layout() {
        let rows = vec![UnifiedRow {
            country: "Country A".to_string(),
            year: 2000,
            gdp_per_cap: 1000.0,
            life_exp: 50.5,
            population: 1_000_000.0,
        }];
        let text = to_csv_string(&rows).unwrap();
        assert_eq!(
            text,
            "country,year,gdp_per_cap,life_exp,population\nCountry A,2000,1000.0,50.5,1000000.0\n"
        );
    }

    #[test]
    fn test_empty_export_has_header() {
        let text = to_csv_string(&Vec::<UnifiedRow>::new()).unwrap();
        assert_eq!(text, "country,year,gdp_per_cap,life_exp,population\n");
    }

    #[test]
    fn test_quotes_country_with_delimiter() {
        let rows = vec![UnifiedRow {
            country: "Korea, Rep.".to_string(),
            year: 2000,
            gdp_per_cap: 1.0,
            life_exp: 2.0,
            population: 3.0,
        }];
        let text = to_csv_string(&rows).unwrap();
        assert!(text.contains("\"Korea, Rep.\",2000"));
    }

    #[test]
    fn test_file_name() {
        assert_eq!(export_file_name(2007), "gdp_life_pop_2007.csv");
    }
}
