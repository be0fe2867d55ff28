//! Distinct years and countries available in the unified table.

use std::collections::BTreeSet;

use crate::join::UnifiedTable;

/// Year the overview opens on when none is requested.
pub const DEFAULT_YEAR: i32 = 2000;

/// Countries the comparison view opens with when none are selected.
pub const DEFAULT_COUNTRIES: [&str; 3] = ["India", "China", "United States"];

impl UnifiedTable {
    /// Distinct years, ascending.
    pub fn years(&self) -> Vec<i32> {
        let years: BTreeSet<i32> = self.iter().map(|r| r.year).collect();
        years.into_iter().collect()
    }

    /// Earliest and latest year, or None for an empty table.
    pub fn year_range(&self) -> Option<(i32, i32)> {
        let min = self.iter().map(|r| r.year).min()?;
        let max = self.iter().map(|r| r.year).max()?;
        Some((min, max))
    }

    /// Distinct countries in table order (which is sorted).
    pub fn countries(&self) -> Vec<&str> {
        let mut out: Vec<&str> = Vec::new();
        for row in self {
            if out.last() != Some(&row.country.as_str()) {
                out.push(&row.country);
            }
        }
        out
    }

    /// Whether a country has at least one complete row.
    pub fn has_country(&self, country: &str) -> bool {
        self.iter().any(|r| r.country == country)
    }

    /// [`DEFAULT_COUNTRIES`] that have data, in their listed order.
    pub fn default_countries(&self) -> Vec<&'static str> {
        DEFAULT_COUNTRIES
            .into_iter()
            .filter(|c| self.has_country(c))
            .collect()
    }

    /// The available year nearest to `target`; the earlier one wins a tie.
    pub fn closest_year(&self, target: i32) -> Option<i32> {
        self.years()
            .into_iter()
            .min_by_key(|&y| ((y as i64 - target as i64).abs(), y))
    }
}
