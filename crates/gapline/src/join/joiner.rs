//! Inner join of the three metric relations on (country, year).

use std::collections::{BTreeMap, HashMap, HashSet};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::unified::{UnifiedRow, UnifiedTable};
use crate::reshape::FactRow;

type Key<'a> = (&'a str, i32);

/// Per-metric counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricCounts {
    pub gdp_per_cap: usize,
    pub life_exp: usize,
    pub population: usize,
}

/// What the join kept and what it excluded.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JoinReport {
    /// Facts supplied per metric.
    pub input_facts: MetricCounts,
    /// Rows in the unified table.
    pub joined_rows: usize,
    /// Distinct keys present in at least one relation but absent from the table.
    pub excluded_keys: usize,
    /// `excluded_keys` broken down by year.
    pub excluded_by_year: BTreeMap<i32, usize>,
    /// Joined rows removed because a metric was not finite.
    pub dropped_incomplete: usize,
}

impl JoinReport {
    /// Keys excluded for a given year.
    pub fn excluded_in(&self, year: i32) -> usize {
        self.excluded_by_year.get(&year).copied().unwrap_or(0)
    }
}

/// Joins gdp, life expectancy and population facts.
pub struct Joiner;

impl Joiner {
    /// Create a new joiner.
    pub fn new() -> Self {
        Self
    }

    /// Inner join the three relations.
    ///
    /// gdp ⋈ life first, then ⋈ population, both on (country, year). Keys that
    /// repeat within a relation produce every matching combination. Rows with
    /// a non-finite metric are dropped and the result is sorted by country,
    /// then year.
    pub fn join(
        &self,
        gdp: &[FactRow],
        life: &[FactRow],
        population: &[FactRow],
    ) -> (UnifiedTable, JoinReport) {
        let life_index = index_by_key(life);
        let population_index = index_by_key(population);

        let mut partial: Vec<(&str, i32, f64, f64)> = Vec::with_capacity(gdp.len());
        for fact in gdp {
            if let Some(life_values) = life_index.get(&(fact.country.as_str(), fact.year)) {
                for &life_exp in life_values {
                    partial.push((fact.country.as_str(), fact.year, fact.value, life_exp));
                }
            }
        }
        debug!(rows = partial.len(), "joined gdp with life expectancy");

        let mut rows = Vec::with_capacity(partial.len());
        for (country, year, gdp_per_cap, life_exp) in partial {
            if let Some(population_values) = population_index.get(&(country, year)) {
                for &population in population_values {
                    rows.push(UnifiedRow {
                        country: country.to_string(),
                        year,
                        gdp_per_cap,
                        life_exp,
                        population,
                    });
                }
            }
        }

        let before_cleanup = rows.len();
        let table = UnifiedTable::from_rows(rows);
        let dropped_incomplete = before_cleanup - table.len();

        // Keys whose every joined row failed cleanup count as excluded too
        let (excluded_keys, excluded_by_year) = count_excluded(&table, [gdp, life, population]);

        let report = JoinReport {
            input_facts: MetricCounts {
                gdp_per_cap: gdp.len(),
                life_exp: life.len(),
                population: population.len(),
            },
            joined_rows: table.len(),
            excluded_keys,
            excluded_by_year,
            dropped_incomplete,
        };

        info!(
            rows = report.joined_rows,
            excluded_keys = report.excluded_keys,
            dropped_incomplete = report.dropped_incomplete,
            "joined metric relations"
        );

        (table, report)
    }
}

impl Default for Joiner {
    fn default() -> Self {
        Self::new()
    }
}

fn count_excluded(
    table: &UnifiedTable,
    relations: [&[FactRow]; 3],
) -> (usize, BTreeMap<i32, usize>) {
    let kept: HashSet<Key<'_>> = table.iter().map(|r| (r.country.as_str(), r.year)).collect();
    let mut by_year: BTreeMap<i32, usize> = BTreeMap::new();
    let mut seen: HashSet<Key<'_>> = HashSet::new();
    for fact in relations.into_iter().flatten() {
        let key = (fact.country.as_str(), fact.year);
        if !kept.contains(&key) && seen.insert(key) {
            *by_year.entry(fact.year).or_insert(0) += 1;
        }
    }
    (seen.len(), by_year)
}

fn index_by_key(facts: &[FactRow]) -> HashMap<Key<'_>, Vec<f64>> {
    let mut index: HashMap<Key<'_>, Vec<f64>> = HashMap::with_capacity(facts.len());
    for fact in facts {
        index
            .entry((fact.country.as_str(), fact.year))
            .or_default()
            .push(fact.value);
    }
    index
}
