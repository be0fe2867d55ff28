//! Example: build the unified table and print what each dashboard view shows.
//!
//! Usage:
//!   cargo run --example dashboard_summary -- [data_dir] [year]
//!
//! Example:
//!   cargo run --example dashboard_summary -- data 2000

use std::env;

use gapline::query::{DEFAULT_RANK_LIMIT, DEFAULT_YEAR};
use gapline::{DatasetPaths, Metric, Pipeline};

fn main() -> gapline::Result<()> {
    let args: Vec<String> = env::args().collect();
    let data_dir = args.get(1).map(String::as_str).unwrap_or("data");
    let year: i32 = match args.get(2) {
        Some(y) => y.parse().unwrap_or_else(|_| {
            eprintln!("Error: year must be an integer, got '{}'", y);
            std::process::exit(1);
        }),
        None => DEFAULT_YEAR,
    };

    let output = Pipeline::new().run(&DatasetPaths::from_dir(data_dir))?;

    let separator = "=".repeat(60);
    println!("{}", separator);
    println!("Dashboard data: {}", data_dir);
    println!("{}", separator);
    println!();

    println!("## Sources");
    for dataset in &output.datasets {
        let kept = dataset.preprocess.kept_rows;
        let input = dataset.preprocess.input_rows;
        println!("  {:16} kept {}/{} rows, {} facts", dataset.metric.label(), kept, input, dataset.facts);
        for dropped in &dataset.preprocess.dropped {
            println!(
                "      line {}: {} ({})",
                dropped.line,
                dropped.country.as_deref().unwrap_or("?"),
                dropped.reason
            );
        }
    }
    println!();

    println!(
        "## Unified table: {} rows, {} countries",
        output.summary.rows, output.summary.countries
    );
    println!();

    let Some(year) = output.table.closest_year(year) else {
        println!("No country has all three indicators for any year.");
        return Ok(());
    };

    let slice = output.cross_section(year);
    println!("## {} ({} countries, {} excluded)", year, slice.rows.len(), slice.excluded);
    for row in &slice.rows {
        println!(
            "  {:20} gdp={:>10.0} life={:>5.1} pop={:>14.0}",
            row.country,
            row.metric(Metric::GdpPerCapita),
            row.metric(Metric::LifeExpectancy),
            row.metric(Metric::Population)
        );
    }
    println!();

    let rankings = output.rankings(year, DEFAULT_RANK_LIMIT);
    println!("## Richest");
    for ranked in &rankings.top {
        println!("  {:>3}. {}", ranked.rank, ranked.row.country);
    }
    if rankings.overlapping {
        println!("  (fewer than {} countries; top and bottom overlap)", 2 * rankings.limit);
    }

    Ok(())
}
