//! Compare command - time series for selected countries.

use colored::Colorize;
use gapline::Metric;
use gapline::query::DEFAULT_COUNTRIES;

use super::human;
use crate::cli::DataArgs;

pub fn run(
    data: &DataArgs,
    countries: Vec<String>,
    metric: Option<Metric>,
    json_output: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let (_config, output) = super::load(data)?;
    let countries: Vec<String> = if countries.is_empty() {
        output
            .table
            .default_countries()
            .into_iter()
            .map(String::from)
            .collect()
    } else {
        countries
    };
    if countries.is_empty() {
        return Err(format!(
            "No countries selected and none of {} has data",
            DEFAULT_COUNTRIES.join(", ")
        )
        .into());
    }
    let comparison = output.compare(&countries);

    if json_output {
        println!("{}", serde_json::to_string_pretty(&comparison)?);
        return Ok(());
    }

    for unknown in &comparison.unknown {
        eprintln!(
            "{} no complete data for '{}'",
            "Warning:".yellow(),
            unknown
        );
    }

    let metrics: Vec<Metric> = match metric {
        Some(m) => vec![m],
        None => Metric::ALL.to_vec(),
    };

    for series in &comparison.series {
        println!("{}", series.country.cyan().bold());
        for metric in &metrics {
            let values = series.values(*metric);
            let first = values.first();
            let last = values.last();
            if let (Some((y0, v0)), Some((y1, v1))) = (first, last) {
                println!(
                    "  {:16} {} {} -> {} {} ({} years)",
                    metric.label(),
                    y0,
                    human(*v0).white(),
                    y1,
                    human(*v1).white(),
                    values.len()
                );
            }
        }
        if metric.is_some() {
            for (year, value) in series.values(metrics[0]) {
                println!("    {} {}", year, human(value));
            }
        }
        println!();
    }

    if comparison.series.is_empty() {
        return Err("None of the selected countries has complete data".into());
    }

    Ok(())
}
