//! Numeric cell normalization.
//!
//! Source tables mix plain numbers with display strings such as `"$1,234.50"`,
//! `"12.3k"` or `"1.1B"`. Everything resolves to a finite `f64` or to `None`.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::input::RawCell;

/// Whole-string magnitude pattern: digits, optional fraction, one suffix letter.
static MAGNITUDE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^([0-9]+(?:\.[0-9]+)?)([kMB])$").unwrap());

/// Multiplier for a case-sensitive magnitude suffix.
fn suffix_multiplier(suffix: &str) -> Option<f64> {
    match suffix {
        "k" => Some(1e3),
        "M" => Some(1e6),
        "B" => Some(1e9),
        _ => None,
    }
}

/// Strip whitespace, thousands separators and currency symbols.
fn clean(value: &str) -> String {
    value
        .trim()
        .chars()
        .filter(|c| *c != ',' && *c != '$')
        .collect::<String>()
        .trim()
        .to_string()
}

/// Parse a string-encoded number.
///
/// Handles:
/// - Plain numbers: "123", "-45.67", "1.5e3"
/// - Thousands separators and currency: "$1,234.50"
/// - Magnitude suffixes: "2k", "3.5M", "1B" (case-sensitive)
///
/// Returns None for anything else, including non-finite results.
pub fn parse_numeric(value: &str) -> Option<f64> {
    let cleaned = clean(value);

    let parsed = match MAGNITUDE.captures(&cleaned) {
        Some(caps) => {
            let base: f64 = caps[1].parse().ok()?;
            base * suffix_multiplier(&caps[2])?
        }
        None => cleaned.parse::<f64>().ok()?,
    };

    parsed.is_finite().then_some(parsed)
}

/// Normalize one raw cell.
///
/// Numbers pass through unchanged; NaN is the missing marker of numeric
/// sources and maps to None.
pub fn normalize_cell(cell: &RawCell) -> Option<f64> {
    match cell {
        RawCell::Number(v) if v.is_nan() => None,
        RawCell::Number(v) => Some(*v),
        RawCell::Text(s) => parse_numeric(s),
        RawCell::Missing => None,
    }
}
