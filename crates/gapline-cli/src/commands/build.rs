//! Build command - run the pipeline and report the result.

use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use colored::Colorize;
use gapline::query::write_delimited_file;

use crate::cli::{DataArgs, OutputFormat};

pub fn run(
    data: &DataArgs,
    output_path: Option<PathBuf>,
    format: OutputFormat,
    json_output: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let (_config, output) = super::load(data)?;

    if let Some(path) = &output_path {
        match format.delimiter() {
            Some(delimiter) => write_delimited_file(&output.table, path, delimiter)?,
            None => {
                let file = File::create(path)?;
                serde_json::to_writer_pretty(BufWriter::new(file), output.table.rows())?;
            }
        }
    }

    if json_output {
        let summary = serde_json::json!({
            "summary": output.summary,
            "sources": output.datasets.iter().map(|d| serde_json::json!({
                "metric": d.metric,
                "file": d.source.as_ref().map(|s| s.file.as_str()),
                "input_rows": d.preprocess.input_rows,
                "kept_rows": d.preprocess.kept_rows,
                "facts": d.facts,
                "warnings": d.warnings.len(),
            })).collect::<Vec<_>>(),
            "join": output.join,
            "output": output_path.as_ref().map(|p| p.display().to_string()),
        });
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!("{}", "Pipeline complete".cyan().bold());
    println!();

    println!("{}", "Sources:".yellow().bold());
    for dataset in &output.datasets {
        let file = dataset
            .source
            .as_ref()
            .map(|s| s.file.clone())
            .unwrap_or_default();
        let dropped = dataset.preprocess.input_rows - dataset.preprocess.kept_rows;
        println!(
            "  {:16} {:24} {} rows kept, {} dropped, {} facts",
            dataset.metric.label(),
            file.white(),
            dataset.preprocess.kept_rows.to_string().green(),
            if dropped > 0 {
                dropped.to_string().red()
            } else {
                dropped.to_string().normal()
            },
            dataset.facts
        );
    }
    println!();

    let summary = &output.summary;
    println!("{}", "Unified table:".yellow().bold());
    println!("  Rows:      {}", summary.rows.to_string().white().bold());
    println!("  Countries: {}", summary.countries);
    match (summary.first_year, summary.last_year) {
        (Some(first), Some(last)) => println!("  Years:     {}-{} ({})", first, last, summary.years),
        _ => println!("  Years:     {}", "none".red()),
    }
    println!(
        "  Excluded:  {} country-years missing a metric",
        summary.excluded_keys
    );
    if summary.warnings > 0 {
        println!(
            "  {} {} schema warning(s); run 'gapline inspect' for details",
            "Warning:".yellow(),
            summary.warnings
        );
    }

    if let Some(path) = output_path {
        println!();
        println!("Wrote {} ({})", path.display().to_string().white(), format);
    }

    Ok(())
}
