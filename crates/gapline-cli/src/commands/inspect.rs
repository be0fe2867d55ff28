//! Inspect command - source metadata, schema warnings and dropped rows.

use colored::Colorize;

use crate::cli::DataArgs;

/// Dropped rows listed per source without --all.
const MAX_DROPPED_SHOWN: usize = 10;

pub fn run(data: &DataArgs, all: bool, json_output: bool) -> Result<(), Box<dyn std::error::Error>> {
    let (config, output) = super::load(data)?;

    if json_output {
        let report = serde_json::json!({
            "config": config,
            "datasets": output.datasets,
            "join": output.join,
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!(
        "{} id column '{}', duplicates: {}",
        "Settings:".yellow().bold(),
        config.pipeline.parser.id_column,
        config.pipeline.duplicates
    );
    println!();

    for dataset in &output.datasets {
        println!("{}", dataset.metric.label().cyan().bold());

        if let Some(source) = &dataset.source {
            println!("  File:    {}", source.path.display().to_string().white());
            println!("  Format:  {} ({} bytes)", source.format, source.size_bytes);
            println!(
                "  Shape:   {} rows x {} years ({}-{})",
                source.row_count, source.year_count, source.first_year, source.last_year
            );
            println!("  Hash:    {}", source.hash.dimmed());
            println!("  Loaded:  {}", source.loaded_at.format("%Y-%m-%d %H:%M:%S UTC"));
        }

        let report = &dataset.preprocess;
        println!(
            "  Rows:    {} kept, {} missing values, {} unparseable",
            report.kept_rows.to_string().green(),
            report.dropped_missing,
            report.dropped_unparseable
        );

        for warning in &dataset.warnings {
            println!("  {} {}", "Warning:".yellow(), warning);
        }

        let shown = if all {
            report.dropped.len()
        } else {
            MAX_DROPPED_SHOWN.min(report.dropped.len())
        };
        for dropped in &report.dropped[..shown] {
            println!(
                "    line {:>4}  {:24} {}",
                dropped.line,
                dropped.country.as_deref().unwrap_or("<no country>"),
                dropped.reason.to_string().dimmed()
            );
        }
        if shown < report.dropped.len() {
            println!(
                "    ... {} more (use --all)",
                report.dropped.len() - shown
            );
        }
        println!();
    }

    println!("{}", "Join:".yellow().bold());
    println!("  Rows:     {}", output.join.joined_rows);
    println!("  Excluded: {} country-years", output.join.excluded_keys);
    if output.join.dropped_incomplete > 0 {
        println!("  Dropped:  {} incomplete rows", output.join.dropped_incomplete);
    }

    Ok(())
}
