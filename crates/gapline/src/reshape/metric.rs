//! The three indicators carried by the dashboard.

use serde::{Deserialize, Serialize};

/// An indicator measured per country and year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Metric {
    #[serde(rename = "gdp_per_cap")]
    GdpPerCapita,
    #[serde(rename = "life_exp")]
    LifeExpectancy,
    #[serde(rename = "population")]
    Population,
}

impl Metric {
    /// All metrics in join order.
    pub const ALL: [Metric; 3] = [Metric::GdpPerCapita, Metric::LifeExpectancy, Metric::Population];

    /// Column name used in long-format and unified tables.
    pub fn as_str(&self) -> &'static str {
        match self {
            Metric::GdpPerCapita => "gdp_per_cap",
            Metric::LifeExpectancy => "life_exp",
            Metric::Population => "population",
        }
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Metric::GdpPerCapita => "GDP per Capita",
            Metric::LifeExpectancy => "Life Expectancy",
            Metric::Population => "Population",
        }
    }
}

impl std::str::FromStr for Metric {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "gdp_per_cap" | "gdp" | "gdp_pcap" => Ok(Metric::GdpPerCapita),
            "life_exp" | "life" | "life_expectancy" => Ok(Metric::LifeExpectancy),
            "population" | "pop" => Ok(Metric::Population),
            _ => Err(format!(
                "Unknown metric: {}. Use gdp, life, or population.",
                s
            )),
        }
    }
}

impl std::fmt::Display for Metric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
