//! Year slice handlers for the scatter view and its CSV download.

use axum::{
    Json,
    extract::{Query, State},
    http::header,
    response::IntoResponse,
};
use serde::Deserialize;

use gapline::CrossSection;
use gapline::query::{export_file_name, to_csv_string};

use super::resolve_year;
use crate::server::error::ApiError;
use crate::server::state::AppState;

/// Query parameters for year-based endpoints.
#[derive(Debug, Deserialize)]
pub struct YearQuery {
    pub year: Option<i32>,
}

/// Get every complete row for one year.
pub async fn get_overview(
    State(state): State<AppState>,
    Query(query): Query<YearQuery>,
) -> Result<Json<CrossSection>, ApiError> {
    let output = state.output().await?;
    let year = resolve_year(&output, query.year);
    Ok(Json(output.cross_section(year)))
}

/// Download one year as CSV.
pub async fn export_overview(
    State(state): State<AppState>,
    Query(query): Query<YearQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let output = state.output().await?;
    let year = resolve_year(&output, query.year);
    let slice = output.cross_section(year);

    let body = to_csv_string(&slice.rows).map_err(|e| ApiError::Internal(e.to_string()))?;
    let disposition = format!("attachment; filename=\"{}\"", export_file_name(year));

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        body,
    ))
}
