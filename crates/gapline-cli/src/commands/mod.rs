//! CLI command implementations.

pub mod build;
pub mod compare;
pub mod inspect;
pub mod overview;
pub mod rank;
pub mod serve;

use gapline::query::DEFAULT_YEAR;
use gapline::{GaplineConfig, Pipeline, PipelineOutput};

use crate::cli::DataArgs;

/// Resolve configuration and run the pipeline once.
fn load(data: &DataArgs) -> Result<(GaplineConfig, PipelineOutput), Box<dyn std::error::Error>> {
    let config = data.resolve()?;
    let output = Pipeline::with_config(config.pipeline.clone()).run(&config.data)?;
    Ok((config, output))
}

/// The requested year, or the available year nearest the default.
fn pick_year(output: &PipelineOutput, year: Option<i32>) -> Result<i32, Box<dyn std::error::Error>> {
    match year {
        Some(year) => Ok(year),
        None => output
            .table
            .closest_year(DEFAULT_YEAR)
            .ok_or_else(|| "No country-year has all three metrics".into()),
    }
}

/// Format large numbers with a magnitude suffix for terminal output.
fn human(value: f64) -> String {
    let abs = value.abs();
    if abs >= 1e9 {
        format!("{:.2}B", value / 1e9)
    } else if abs >= 1e6 {
        format!("{:.2}M", value / 1e6)
    } else if abs >= 1e4 {
        format!("{:.1}k", value / 1e3)
    } else {
        format!("{:.1}", value)
    }
}
