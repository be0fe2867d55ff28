//! Summary, catalogue and refresh handlers.

use axum::{Json, extract::State};
use serde::Serialize;

use gapline::query::DEFAULT_YEAR;
use gapline::{Metric, PipelineOutput, PipelineSummary};

use crate::server::error::ApiError;
use crate::server::state::AppState;

/// Per-source counts.
#[derive(Serialize)]
pub struct SourceSummary {
    pub metric: Metric,
    pub file: Option<String>,
    pub hash: Option<String>,
    pub input_rows: usize,
    pub kept_rows: usize,
    pub warnings: usize,
}

/// Response for the summary endpoint.
#[derive(Serialize)]
pub struct SummaryResponse {
    pub summary: PipelineSummary,
    pub sources: Vec<SourceSummary>,
}

impl SummaryResponse {
    fn from_output(output: &PipelineOutput) -> Self {
        let sources = output
            .datasets
            .iter()
            .map(|d| SourceSummary {
                metric: d.metric,
                file: d.source.as_ref().map(|s| s.file.clone()),
                hash: d.source.as_ref().map(|s| s.hash.clone()),
                input_rows: d.preprocess.input_rows,
                kept_rows: d.preprocess.kept_rows,
                warnings: d.warnings.len(),
            })
            .collect();

        Self {
            summary: output.summary.clone(),
            sources,
        }
    }
}

/// Response for the years endpoint.
#[derive(Serialize)]
pub struct YearsResponse {
    pub years: Vec<i32>,
    pub min: Option<i32>,
    pub max: Option<i32>,
    /// Year the overview opens on.
    pub default: Option<i32>,
}

/// Response for the countries endpoint.
#[derive(Serialize)]
pub struct CountriesResponse {
    pub countries: Vec<String>,
}

/// Get headline numbers for the unified table.
pub async fn get_summary(State(state): State<AppState>) -> Result<Json<SummaryResponse>, ApiError> {
    let output = state.output().await?;
    Ok(Json(SummaryResponse::from_output(&output)))
}

/// Get the years available for the year slider.
pub async fn get_years(State(state): State<AppState>) -> Result<Json<YearsResponse>, ApiError> {
    let output = state.output().await?;
    let range = output.table.year_range();

    Ok(Json(YearsResponse {
        years: output.table.years(),
        min: range.map(|(min, _)| min),
        max: range.map(|(_, max)| max),
        default: output.table.closest_year(DEFAULT_YEAR),
    }))
}

/// Get the countries available for selection.
pub async fn get_countries(
    State(state): State<AppState>,
) -> Result<Json<CountriesResponse>, ApiError> {
    let output = state.output().await?;
    let countries = output.table.countries().into_iter().map(String::from).collect();
    Ok(Json(CountriesResponse { countries }))
}

/// Rebuild from disk regardless of file hashes.
pub async fn refresh(State(state): State<AppState>) -> Result<Json<SummaryResponse>, ApiError> {
    let output = state.refresh().await?;
    Ok(Json(SummaryResponse::from_output(&output)))
}
