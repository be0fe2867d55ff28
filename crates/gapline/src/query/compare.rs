//! Multi-country time series for the comparison view.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::join::UnifiedTable;
use crate::reshape::Metric;

/// One year of one country's series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub year: i32,
    pub gdp_per_cap: f64,
    pub life_exp: f64,
    pub population: f64,
}

/// A country's rows ordered by year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountrySeries {
    pub country: String,
    pub points: Vec<SeriesPoint>,
}

impl CountrySeries {
    /// `(year, value)` pairs for one metric, as a line chart consumes them.
    pub fn values(&self, metric: Metric) -> Vec<(i32, f64)> {
        self.points
            .iter()
            .map(|p| {
                let value = match metric {
                    Metric::GdpPerCapita => p.gdp_per_cap,
                    Metric::LifeExpectancy => p.life_exp,
                    Metric::Population => p.population,
                };
                (p.year, value)
            })
            .collect()
    }
}

/// Series for a set of selected countries.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Comparison {
    /// One series per known country, in selection order.
    pub series: Vec<CountrySeries>,
    /// Selected countries with no complete rows.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub unknown: Vec<String>,
}

impl UnifiedTable {
    /// Group rows of the selected countries into per-country series.
    ///
    /// Repeated selections are collapsed. Countries without data are listed
    /// in `unknown`.
    pub fn compare<S: AsRef<str>>(&self, countries: &[S]) -> Comparison {
        let mut selected: IndexMap<&str, Vec<SeriesPoint>> = IndexMap::new();
        for country in countries {
            selected.entry(country.as_ref()).or_default();
        }

        for row in self {
            if let Some(points) = selected.get_mut(row.country.as_str()) {
                points.push(SeriesPoint {
                    year: row.year,
                    gdp_per_cap: row.gdp_per_cap,
                    life_exp: row.life_exp,
                    population: row.population,
                });
            }
        }

        let mut comparison = Comparison::default();
        for (country, points) in selected {
            if points.is_empty() {
                comparison.unknown.push(country.to_string());
            } else {
                comparison.series.push(CountrySeries {
                    country: country.to_string(),
                    points,
                });
            }
        }
        comparison
    }
}
