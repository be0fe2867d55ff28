//! Gapline CLI - GDP, life expectancy and population by country and year.

mod cli;
mod commands;
mod logging;
mod server;

use clap::Parser;
use cli::{Cli, Commands};
use logging::LogConfig;

fn main() {
    let cli = Cli::parse();

    let log_config = LogConfig::from_verbosity(cli.verbose)
        .with_format(cli.log_format)
        .with_log_file(cli.log_file.clone());
    if let Err(e) = logging::init_logging(&log_config) {
        eprintln!("Error: could not open log file: {}", e);
        std::process::exit(1);
    }

    let data = &cli.data;
    let result = match cli.command {
        Commands::Build {
            output,
            format,
            json,
        } => commands::build::run(data, output, format, json),

        Commands::Overview { year, export, json } => {
            commands::overview::run(data, year, export, json)
        }

        Commands::Compare {
            countries,
            metric,
            json,
        } => commands::compare::run(data, countries, metric, json),

        Commands::Rank { year, limit, json } => commands::rank::run(data, year, limit, json),

        Commands::Inspect { all, json } => commands::inspect::run(data, all, json),

        Commands::Serve { port } => commands::serve::run(data, port),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
