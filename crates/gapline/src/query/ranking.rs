//! Year rankings by GDP per capita.

use serde::{Deserialize, Serialize};

use crate::join::{UnifiedRow, UnifiedTable};

/// Number of rows shown at each end of the ranking.
pub const DEFAULT_RANK_LIMIT: usize = 10;

/// A row with its 1-based position in the descending ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedRow {
    pub rank: usize,
    #[serde(flatten)]
    pub row: UnifiedRow,
}

/// Top and bottom of one year's GDP per capita ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rankings {
    pub year: i32,
    pub limit: usize,
    /// Rows ranked for the year.
    pub ranked: usize,
    /// Highest first.
    pub top: Vec<RankedRow>,
    /// The last `limit` rows, still highest first.
    pub bottom: Vec<RankedRow>,
    /// True when fewer than `2 * limit` rows exist, so the lists share rows.
    pub overlapping: bool,
}

impl UnifiedTable {
    /// Rank a year's rows by GDP per capita, descending.
    ///
    /// Ties keep country order.
    pub fn rankings(&self, year: i32, limit: usize) -> Rankings {
        let mut rows: Vec<&UnifiedRow> = self.year_rows(year).collect();
        rows.sort_by(|a, b| b.gdp_per_cap.total_cmp(&a.gdp_per_cap));

        let ranked = rows.len();
        let to_ranked = |(i, row): (usize, &&UnifiedRow)| RankedRow {
            rank: i + 1,
            row: (*row).clone(),
        };

        let top = rows.iter().enumerate().take(limit).map(to_ranked).collect();
        let bottom = rows
            .iter()
            .enumerate()
            .skip(ranked.saturating_sub(limit))
            .map(to_ranked)
            .collect();

        Rankings {
            year,
            limit,
            ranked,
            top,
            bottom,
            overlapping: ranked > 0 && ranked < limit.saturating_mul(2),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(n: usize) -> UnifiedTable {
        UnifiedTable::from_rows(
            (0..n)
                .map(|i| UnifiedRow {
                    country: format!("C{:02}", i),
                    year: 2000,
                    gdp_per_cap: (i * 100) as f64,
                    life_exp: 60.0,
                    population: 1e6,
                })
                .collect(),
        )
    }

    #[test]
    fn test_disjoint_with_enough_rows() {
        let r = table(25).rankings(2000, 10);
        assert_eq!(r.ranked, 25);
        assert!(!r.overlapping);
        assert_eq!(r.top[0].row.country, "C24");
        assert_eq!(r.top[0].rank, 1);
        assert_eq!(r.bottom.len(), 10);
        assert_eq!(r.bottom[0].rank, 16);
        assert_eq!(r.bottom[9].row.country, "C00");
        assert!(r.top.iter().all(|t| r.bottom.iter().all(|b| b.row.country != t.row.country)));
    }

    #[test]
    fn test_overlap_flagged() {
        let r = table(12).rankings(2000, 10);
        assert!(r.overlapping);
        assert_eq!(r.top.len(), 10);
        assert_eq!(r.bottom.len(), 10);
        assert_eq!(r.bottom[0].rank, 3);
    }

    #[test]
    fn test_exactly_twice_limit_is_disjoint() {
        let r = table(20).rankings(2000, 10);
        assert!(!r.overlapping);
    }

    #[test]
    fn test_empty_year() {
        let r = table(5).rankings(1990, 10);
        assert_eq!(r.ranked, 0);
        assert!(r.top.is_empty());
        assert!(r.bottom.is_empty());
        assert!(!r.overlapping);
    }

    #[test]
    fn test_ties_keep_country_order() {
        let mut rows: Vec<UnifiedRow> = table(3).rows().to_vec();
        for row in &mut rows {
            row.gdp_per_cap = 5.0;
        }
        let r = UnifiedTable::from_rows(rows).rankings(2000, 10);
        let names: Vec<&str> = r.top.iter().map(|t| t.row.country.as_str()).collect();
        assert_eq!(names, vec!["C00", "C01", "C02"]);
    }
}
