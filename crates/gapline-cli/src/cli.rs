//! CLI argument definitions using clap.

use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::PathBuf;

use gapline::query::DEFAULT_RANK_LIMIT;
use gapline::{DatasetPaths, DuplicatePolicy, GaplineConfig, Metric};

use crate::logging::LogFormat;

/// Gapline: GDP, life expectancy and population by country and year
#[derive(Parser)]
#[command(name = "gapline")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub data: DataArgs,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Log output format (pretty, compact, json)
    #[arg(long, global = true, default_value = "pretty")]
    pub log_format: LogFormat,

    /// Append logs to a file instead of stderr
    #[arg(long, global = true, value_name = "FILE")]
    pub log_file: Option<PathBuf>,
}

/// Where the input tables come from and how they are read.
#[derive(Args, Debug, Clone, Default)]
pub struct DataArgs {
    /// JSON config file with data paths and pipeline settings
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Directory holding gdp_pcap.csv, life_expectancy.csv and population.csv
    #[arg(short, long, global = true, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// GDP per capita table
    #[arg(long, global = true, value_name = "FILE")]
    pub gdp: Option<PathBuf>,

    /// Life expectancy table
    #[arg(long, global = true, value_name = "FILE")]
    pub life: Option<PathBuf>,

    /// Population table
    #[arg(long, global = true, value_name = "FILE")]
    pub population: Option<PathBuf>,

    /// Name of the identifier column
    #[arg(long, global = true)]
    pub id_column: Option<String>,

    /// Repeated country rows: warn, keep-first or reject
    #[arg(long, global = true)]
    pub duplicates: Option<DuplicatePolicy>,
}

impl DataArgs {
    /// Merge the config file (if any) with command-line overrides.
    pub fn resolve(&self) -> Result<GaplineConfig, Box<dyn std::error::Error>> {
        let mut config = match &self.config {
            Some(path) => GaplineConfig::load(path)?,
            None => GaplineConfig::default(),
        };

        if let Some(dir) = &self.data_dir {
            config.data = DatasetPaths::from_dir(dir);
        }
        for (metric, path) in [
            (Metric::GdpPerCapita, &self.gdp),
            (Metric::LifeExpectancy, &self.life),
            (Metric::Population, &self.population),
        ] {
            if let Some(path) = path {
                config.data.set(metric, path);
            }
        }
        if let Some(id_column) = &self.id_column {
            config.pipeline.parser.id_column = id_column.clone();
        }
        if let Some(policy) = self.duplicates {
            config.pipeline.duplicates = policy;
        }

        Ok(config)
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the pipeline and report what was kept and dropped
    Build {
        /// Write the unified table to this file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format for --output
        #[arg(short, long, default_value = "csv")]
        format: OutputFormat,

        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show every country for one year
    Overview {
        /// Year to show (default: closest available to 2000)
        #[arg(short, long)]
        year: Option<i32>,

        /// Write gdp_life_pop_<year>.csv into DIR (default: current directory)
        #[arg(long, value_name = "DIR", num_args = 0..=1, default_missing_value = ".")]
        export: Option<PathBuf>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Compare countries over time
    Compare {
        /// Countries to compare, in display order (default: India, China, United States)
        #[arg(value_name = "COUNTRY")]
        countries: Vec<String>,

        /// Show only one metric (gdp, life, population)
        #[arg(short, long)]
        metric: Option<Metric>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Rank countries by GDP per capita for one year
    Rank {
        /// Year to rank (default: closest available to 2000)
        #[arg(short, long)]
        year: Option<i32>,

        /// Rows at each end of the ranking
        #[arg(short, long, default_value_t = DEFAULT_RANK_LIMIT)]
        limit: usize,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show source metadata, schema warnings and dropped rows
    Inspect {
        /// List every dropped row instead of the first few
        #[arg(long)]
        all: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Serve the dashboard data as a JSON API
    Serve {
        /// Port for web server
        #[arg(short, long, default_value = "8050")]
        port: u16,
    },
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Csv,
    Tsv,
    Json,
}

impl OutputFormat {
    /// Field delimiter for the delimited formats.
    pub fn delimiter(&self) -> Option<u8> {
        match self {
            OutputFormat::Csv => Some(b','),
            OutputFormat::Tsv => Some(b'\t'),
            OutputFormat::Json => None,
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(OutputFormat::Csv),
            "tsv" => Ok(OutputFormat::Tsv),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown format: {}. Use csv, tsv, or json.", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Csv => write!(f, "csv"),
            OutputFormat::Tsv => write!(f, "tsv"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_output_format_parse() {
        assert_eq!("TSV".parse::<OutputFormat>().unwrap(), OutputFormat::Tsv);
        assert_eq!(OutputFormat::Json.delimiter(), None);
        assert!("xlsx".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_overrides_applied() {
        let cli = Cli::parse_from([
            "gapline",
            "--data-dir",
            "/srv/gap",
            "--population",
            "/tmp/pop.csv",
            "--duplicates",
            "keep-first",
            "rank",
            "--year",
            "2001",
        ]);
        let config = cli.data.resolve().unwrap();
        assert_eq!(config.data.gdp_per_cap, PathBuf::from("/srv/gap/gdp_pcap.csv"));
        assert_eq!(config.data.population, PathBuf::from("/tmp/pop.csv"));
        assert_eq!(config.pipeline.duplicates, DuplicatePolicy::KeepFirst);
        assert!(matches!(cli.command, Commands::Rank { year: Some(2001), limit: 10, .. }));
    }

    #[test]
    fn test_compare_without_countries() {
        let cli = Cli::parse_from(["gapline", "compare"]);
        match cli.command {
            Commands::Compare { countries, .. } => assert!(countries.is_empty()),
            _ => panic!("expected compare"),
        }
    }

    #[test]
    fn test_export_without_dir() {
        let cli = Cli::parse_from(["gapline", "overview", "--export"]);
        match cli.command {
            Commands::Overview { export, .. } => assert_eq!(export, Some(PathBuf::from("."))),
            _ => panic!("expected overview"),
        }
    }
}
