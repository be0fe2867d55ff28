//! Load, normalize, reshape and join the three sources.

use serde::{Deserialize, Serialize};
use tracing::{info, info_span};

use crate::config::DatasetPaths;
use crate::error::Result;
use crate::input::{Parser, ParserConfig, RawWideTable, SourceMetadata};
use crate::join::{JoinReport, Joiner, UnifiedTable};
use crate::normalize::{PreprocessReport, Preprocessor};
use crate::query::{Comparison, CrossSection, Rankings};
use crate::reshape::{FactRow, Metric, melt};
use crate::schema::{DuplicatePolicy, SchemaWarning, check_duplicates};

/// Configuration for a pipeline run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Parser configuration, including the identifier column name.
    pub parser: ParserConfig,
    /// What to do with repeated country rows.
    pub duplicates: DuplicatePolicy,
}

/// What happened to one source on its way to the join.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetReport {
    pub metric: Metric,
    /// Present when the table was loaded from a file.
    pub source: Option<SourceMetadata>,
    pub warnings: Vec<SchemaWarning>,
    pub preprocess: PreprocessReport,
    /// Long-format facts fed to the join.
    pub facts: usize,
}

/// Headline numbers for the dashboard.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PipelineSummary {
    pub rows: usize,
    pub countries: usize,
    pub years: usize,
    pub first_year: Option<i32>,
    pub last_year: Option<i32>,
    pub dropped_rows: usize,
    pub excluded_keys: usize,
    pub warnings: usize,
}

/// Result of a pipeline run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineOutput {
    /// One report per metric, in join order.
    pub datasets: Vec<DatasetReport>,
    pub join: JoinReport,
    pub table: UnifiedTable,
    pub summary: PipelineSummary,
}

impl PipelineOutput {
    /// Report for one metric.
    pub fn dataset(&self, metric: Metric) -> Option<&DatasetReport> {
        self.datasets.iter().find(|d| d.metric == metric)
    }

    /// All schema warnings across sources.
    pub fn warnings(&self) -> impl Iterator<Item = &SchemaWarning> {
        self.datasets.iter().flat_map(|d| d.warnings.iter())
    }

    /// Content hashes of file-backed sources, in join order.
    pub fn source_hashes(&self) -> Vec<Option<&str>> {
        self.datasets
            .iter()
            .map(|d| d.source.as_ref().map(|s| s.hash.as_str()))
            .collect()
    }

    /// Scatter data for one year.
    pub fn cross_section(&self, year: i32) -> CrossSection {
        self.table.cross_section(year, &self.join)
    }

    /// Time series for the selected countries.
    pub fn compare<S: AsRef<str>>(&self, countries: &[S]) -> Comparison {
        self.table.compare(countries)
    }

    /// Top and bottom GDP per capita for one year.
    pub fn rankings(&self, year: i32, limit: usize) -> Rankings {
        self.table.rankings(year, limit)
    }
}

/// The data pipeline.
pub struct Pipeline {
    config: PipelineConfig,
    parser: Parser,
    preprocessor: Preprocessor,
    joiner: Joiner,
}

impl Pipeline {
    /// Create a pipeline with default configuration.
    pub fn new() -> Self {
        Self::with_config(PipelineConfig::default())
    }

    /// Create a pipeline with custom configuration.
    pub fn with_config(config: PipelineConfig) -> Self {
        let parser = Parser::with_config(config.parser.clone());
        Self {
            config,
            parser,
            preprocessor: Preprocessor::new(),
            joiner: Joiner::new(),
        }
    }

    /// The configuration in use.
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Run the full pipeline on three files.
    ///
    /// Any load or schema error aborts the run; nothing is partially built.
    pub fn run(&self, paths: &DatasetPaths) -> Result<PipelineOutput> {
        let _span = info_span!("pipeline").entered();

        let mut loaded = Vec::with_capacity(Metric::ALL.len());
        for metric in Metric::ALL {
            let (table, source) = self.parser.parse_file(paths.get(metric))?;
            info!(
                metric = %metric,
                file = %source.file,
                rows = source.row_count,
                years = source.year_count,
                "Loaded source"
            );
            loaded.push((metric, table, Some(source)));
        }

        self.assemble(loaded)
    }

    /// Run the pipeline on tables already in memory.
    pub fn run_tables(
        &self,
        gdp: RawWideTable,
        life: RawWideTable,
        population: RawWideTable,
    ) -> Result<PipelineOutput> {
        let _span = info_span!("pipeline").entered();

        self.assemble(vec![
            (Metric::GdpPerCapita, gdp, None),
            (Metric::LifeExpectancy, life, None),
            (Metric::Population, population, None),
        ])
    }

    fn assemble(
        &self,
        loaded: Vec<(Metric, RawWideTable, Option<SourceMetadata>)>,
    ) -> Result<PipelineOutput> {
        let mut datasets = Vec::with_capacity(loaded.len());
        let mut facts: Vec<Vec<FactRow>> = Vec::with_capacity(loaded.len());

        for (metric, table, source) in loaded {
            let (report, rows) = self.prepare(metric, table, source)?;
            datasets.push(report);
            facts.push(rows);
        }

        let (table, join) = self.joiner.join(&facts[0], &facts[1], &facts[2]);
        let summary = summarize(&datasets, &join, &table);

        info!(
            rows = summary.rows,
            countries = summary.countries,
            years = summary.years,
            "Pipeline complete"
        );

        Ok(PipelineOutput {
            datasets,
            join,
            table,
            summary,
        })
    }

    fn prepare(
        &self,
        metric: Metric,
        table: RawWideTable,
        source: Option<SourceMetadata>,
    ) -> Result<(DatasetReport, Vec<FactRow>)> {
        let (table, warnings) = check_duplicates(table, self.config.duplicates)?;
        let (normalized, preprocess) = self.preprocessor.process(&table);
        let facts = melt(&normalized, metric);

        info!(
            metric = %metric,
            kept = preprocess.kept_rows,
            dropped = preprocess.input_rows - preprocess.kept_rows,
            facts = facts.len(),
            "Prepared source"
        );

        let report = DatasetReport {
            metric,
            source,
            warnings,
            preprocess,
            facts: facts.len(),
        };
        Ok((report, facts))
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}

fn summarize(datasets: &[DatasetReport], join: &JoinReport, table: &UnifiedTable) -> PipelineSummary {
    let years = table.years();
    PipelineSummary {
        rows: table.len(),
        countries: table.countries().len(),
        years: years.len(),
        first_year: years.first().copied(),
        last_year: years.last().copied(),
        dropped_rows: datasets
            .iter()
            .map(|d| d.preprocess.input_rows - d.preprocess.kept_rows)
            .sum(),
        excluded_keys: join.excluded_keys,
        warnings: datasets.iter().map(|d| d.warnings.len()).sum(),
    }
}
