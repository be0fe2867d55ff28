//! Single-year slices for the scatter view.

use serde::{Deserialize, Serialize};

use crate::join::{JoinReport, UnifiedRow, UnifiedTable};

/// All complete rows for one year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrossSection {
    pub year: i32,
    pub rows: Vec<UnifiedRow>,
    /// Countries with some data for this year that did not make it into the
    /// slice because a metric was missing.
    pub excluded: usize,
}

impl CrossSection {
    /// Whether the year has no complete rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl UnifiedTable {
    /// Rows for one year, in country order.
    pub fn year_rows(&self, year: i32) -> impl Iterator<Item = &UnifiedRow> {
        self.iter().filter(move |r| r.year == year)
    }

    /// Slice the table at `year`, taking exclusion counts from the join report.
    pub fn cross_section(&self, year: i32, report: &JoinReport) -> CrossSection {
        CrossSection {
            year,
            rows: self.year_rows(year).cloned().collect(),
            excluded: report.excluded_in(year),
        }
    }
}
