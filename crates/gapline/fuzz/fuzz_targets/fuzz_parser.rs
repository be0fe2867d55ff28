//! Fuzz target for the wide-table loader and preprocessor.
//!
//! Malformed files must come back as errors, never panics.

#![no_main]

use gapline::input::Parser;
use gapline::normalize::Preprocessor;
use libfuzzer_sys::fuzz_target;
use std::io::Write;

fuzz_target!(|data: &[u8]| {
    // Keep inputs small to avoid OOM
    if data.len() > 100_000 {
        return;
    }

    if let Ok(mut temp_file) = tempfile::NamedTempFile::new() {
        if temp_file.write_all(data).is_ok() {
            if let Ok((table, _)) = Parser::new().parse_file(temp_file.path()) {
                let (normalized, report) = Preprocessor::new().process(&table);
                assert_eq!(normalized.row_count(), report.kept_rows);
            }
        }
    }
});
