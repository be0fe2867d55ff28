//! Rank command - top and bottom countries by GDP per capita.

use colored::Colorize;
use gapline::query::RankedRow;

use super::human;
use crate::cli::DataArgs;

pub fn run(
    data: &DataArgs,
    year: Option<i32>,
    limit: usize,
    json_output: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if limit == 0 {
        return Err("--limit must be at least 1".into());
    }

    let (_config, output) = super::load(data)?;
    let year = super::pick_year(&output, year)?;
    let rankings = output.rankings(year, limit);

    if json_output {
        println!("{}", serde_json::to_string_pretty(&rankings)?);
        return Ok(());
    }

    println!(
        "{} {} ({} countries)",
        "GDP per capita ranking for".cyan().bold(),
        year.to_string().white().bold(),
        rankings.ranked
    );
    println!();

    if rankings.ranked == 0 {
        println!("  No country has all three metrics for {}.", year);
        return Ok(());
    }

    println!("{}", format!("Top {}:", rankings.top.len()).green().bold());
    print_rows(&rankings.top);
    println!();
    println!("{}", format!("Bottom {}:", rankings.bottom.len()).red().bold());
    print_rows(&rankings.bottom);

    if rankings.overlapping {
        println!();
        println!(
            "{} fewer than {} countries, so the lists overlap",
            "Note:".yellow(),
            rankings.limit * 2
        );
    }

    Ok(())
}

fn print_rows(rows: &[RankedRow]) {
    for ranked in rows {
        println!(
            "  {:>4}. {:28} {:>10}",
            ranked.rank,
            ranked.row.country,
            human(ranked.row.gdp_per_cap)
        );
    }
}
