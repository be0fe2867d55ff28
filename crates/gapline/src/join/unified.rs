//! The unified country-year table.

use serde::{Deserialize, Serialize};

use crate::reshape::Metric;

/// One country-year with all three metrics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnifiedRow {
    pub country: String,
    pub year: i32,
    pub gdp_per_cap: f64,
    pub life_exp: f64,
    pub population: f64,
}

impl UnifiedRow {
    /// Value of one metric.
    pub fn metric(&self, metric: Metric) -> f64 {
        match metric {
            Metric::GdpPerCapita => self.gdp_per_cap,
            Metric::LifeExpectancy => self.life_exp,
            Metric::Population => self.population,
        }
    }

    /// Whether every metric holds a finite number.
    pub fn is_complete(&self) -> bool {
        self.gdp_per_cap.is_finite() && self.life_exp.is_finite() && self.population.is_finite()
    }
}

/// Complete rows sorted by country, then year.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UnifiedTable {
    rows: Vec<UnifiedRow>,
}

impl UnifiedTable {
    /// Build a table, dropping incomplete rows and sorting by (country, year).
    ///
    /// The sort is stable, so rows sharing a key keep their relative order.
    pub fn from_rows(mut rows: Vec<UnifiedRow>) -> Self {
        rows.retain(UnifiedRow::is_complete);
        rows.sort_by(|a, b| a.country.cmp(&b.country).then(a.year.cmp(&b.year)));
        Self { rows }
    }

    /// All rows in order.
    pub fn rows(&self) -> &[UnifiedRow] {
        &self.rows
    }

    /// Iterate rows in order.
    pub fn iter(&self) -> std::slice::Iter<'_, UnifiedRow> {
        self.rows.iter()
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether no country-year survived the join.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl<'a> IntoIterator for &'a UnifiedTable {
    type Item = &'a UnifiedRow;
    type IntoIter = std::slice::Iter<'a, UnifiedRow>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(country: &str, year: i32, gdp: f64) -> UnifiedRow {
        UnifiedRow {
            country: country.to_string(),
            year,
            gdp_per_cap: gdp,
            life_exp: 60.0,
            population: 1e6,
        }
    }

    #[test]
    fn test_sorted_by_country_then_year() {
        let table = UnifiedTable::from_rows(vec![
            row("Peru", 2001, 1.0),
            row("Chad", 2001, 2.0),
            row("Peru", 2000, 3.0),
            row("Chad", 2000, 4.0),
        ]);
        let keys: Vec<(&str, i32)> = table.iter().map(|r| (r.country.as_str(), r.year)).collect();
        assert_eq!(keys, vec![("Chad", 2000), ("Chad", 2001), ("Peru", 2000), ("Peru", 2001)]);
    }

    #[test]
    fn test_incomplete_rows_dropped() {
        let table = UnifiedTable::from_rows(vec![row("Chad", 2000, f64::NAN), row("Peru", 2000, 1.0)]);
        assert_eq!(table.len(), 1);
        assert_eq!(table.rows()[0].country, "Peru");
    }

    #[test]
    fn test_metric_accessor() {
        let r = row("Chad", 2000, 900.0);
        assert_eq!(r.metric(Metric::GdpPerCapita), 900.0);
        assert_eq!(r.metric(Metric::LifeExpectancy), 60.0);
        assert_eq!(r.metric(Metric::Population), 1e6);
    }
}
