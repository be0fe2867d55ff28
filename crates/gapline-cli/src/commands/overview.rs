//! Overview command - every country for one year.

use std::path::PathBuf;

use colored::Colorize;
use gapline::query::{export_file_name, write_delimited_file};

use super::human;
use crate::cli::DataArgs;

pub fn run(
    data: &DataArgs,
    year: Option<i32>,
    export: Option<PathBuf>,
    json_output: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let (_config, output) = super::load(data)?;
    let year = super::pick_year(&output, year)?;
    let slice = output.cross_section(year);

    if let Some(dir) = export {
        let path = dir.join(export_file_name(year));
        write_delimited_file(&slice.rows, &path, b',')?;
        if !json_output {
            println!("Wrote {}", path.display().to_string().white());
            println!();
        }
    }

    if json_output {
        println!("{}", serde_json::to_string_pretty(&slice)?);
        return Ok(());
    }

    println!(
        "{} {}",
        "Overview for".cyan().bold(),
        year.to_string().white().bold()
    );
    println!();

    if slice.is_empty() {
        println!("  No country has all three metrics for {}.", year);
        return Ok(());
    }

    println!(
        "  {:28} {:>12} {:>10} {:>12}",
        "Country".bold(),
        "GDP/cap".bold(),
        "Life exp".bold(),
        "Population".bold()
    );
    for row in &slice.rows {
        println!(
            "  {:28} {:>12} {:>10.1} {:>12}",
            row.country,
            human(row.gdp_per_cap),
            row.life_exp,
            human(row.population)
        );
    }
    println!();
    println!("  {} countries", slice.rows.len());
    if slice.excluded > 0 {
        println!(
            "  {} {} more with a missing metric were left out",
            "Note:".yellow(),
            slice.excluded
        );
    }

    Ok(())
}
