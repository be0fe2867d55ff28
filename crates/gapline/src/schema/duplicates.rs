//! Duplicate identifier detection.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{GaplineError, Result};
use crate::input::RawWideTable;

/// What to do when a country appears on more than one row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    /// Keep every row and report a warning. Duplicate rows flow through to
    /// duplicate facts and, after the join, duplicate unified rows.
    #[default]
    Warn,
    /// Keep the first row for each country, drop the rest, report a warning.
    KeepFirst,
    /// Abort with [`GaplineError::DuplicateCountry`].
    Reject,
}

impl std::str::FromStr for DuplicatePolicy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "warn" => Ok(DuplicatePolicy::Warn),
            "keep_first" | "first" => Ok(DuplicatePolicy::KeepFirst),
            "reject" | "error" => Ok(DuplicatePolicy::Reject),
            _ => Err(format!(
                "Unknown duplicate policy: {}. Use warn, keep-first, or reject.",
                s
            )),
        }
    }
}

impl std::fmt::Display for DuplicatePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DuplicatePolicy::Warn => write!(f, "warn"),
            DuplicatePolicy::KeepFirst => write!(f, "keep-first"),
            DuplicatePolicy::Reject => write!(f, "reject"),
        }
    }
}

/// A non-fatal finding about the structure of a source table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SchemaWarning {
    /// A country occurs on several lines.
    DuplicateCountry {
        file: String,
        country: String,
        lines: Vec<usize>,
        /// Whether the later rows were dropped.
        dropped: bool,
    },
}

impl std::fmt::Display for SchemaWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SchemaWarning::DuplicateCountry {
                file,
                country,
                lines,
                dropped,
            } => {
                let lines: Vec<String> = lines.iter().map(|l| l.to_string()).collect();
                write!(
                    f,
                    "'{}' appears {} times in {} (lines {}){}",
                    country,
                    lines.len(),
                    file,
                    lines.join(", "),
                    if *dropped { ", kept first" } else { "" }
                )
            }
        }
    }
}

/// Apply a duplicate policy to a freshly loaded table.
///
/// Rows with a missing identifier are ignored here; the preprocessor drops
/// them. Warnings are returned in order of first appearance.
pub fn check_duplicates(
    table: RawWideTable,
    policy: DuplicatePolicy,
) -> Result<(RawWideTable, Vec<SchemaWarning>)> {
    let mut seen: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<(String, Vec<usize>)> = Vec::new();

    for row in &table.rows {
        let Some(country) = row.country.as_deref() else {
            continue;
        };
        match seen.get(country) {
            Some(&group) => {
                if policy == DuplicatePolicy::Reject {
                    return Err(GaplineError::DuplicateCountry {
                        file: table.file.clone(),
                        country: country.to_string(),
                        first_line: groups[group].1[0],
                        line: row.line,
                    });
                }
                groups[group].1.push(row.line);
            }
            None => {
                seen.insert(country, groups.len());
                groups.push((country.to_string(), vec![row.line]));
            }
        }
    }

    let dropped = policy == DuplicatePolicy::KeepFirst;
    let warnings: Vec<SchemaWarning> = groups
        .into_iter()
        .filter(|(_, lines)| lines.len() > 1)
        .map(|(country, lines)| SchemaWarning::DuplicateCountry {
            file: table.file.clone(),
            country,
            lines,
            dropped,
        })
        .collect();

    for warning in &warnings {
        warn!("{}", warning);
    }

    if !dropped || warnings.is_empty() {
        return Ok((table, warnings));
    }

    let RawWideTable { file, schema, rows } = table;
    let mut kept: std::collections::HashSet<String> = std::collections::HashSet::new();
    let rows = rows
        .into_iter()
        .filter(|row| match &row.country {
            Some(country) => kept.insert(country.clone()),
            None => true,
        })
        .collect();

    Ok((RawWideTable::new(file, schema, rows), warnings))
}
