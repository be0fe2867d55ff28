//! Country comparison handler.

use axum::{
    Json,
    extract::{Query, State},
};
use serde::Deserialize;

use gapline::Comparison;

use crate::server::error::ApiError;
use crate::server::state::AppState;

/// Query parameters for the comparison endpoint.
#[derive(Debug, Deserialize)]
pub struct CompareQuery {
    /// Comma-separated country names.
    pub countries: Option<String>,
}

/// Get time series for the selected countries.
///
/// Without `countries`, the default selection present in the data is used.
pub async fn get_comparison(
    State(state): State<AppState>,
    Query(query): Query<CompareQuery>,
) -> Result<Json<Comparison>, ApiError> {
    let output = state.output().await?;

    let mut countries: Vec<&str> = query
        .countries
        .as_deref()
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .collect();
    if countries.is_empty() {
        countries = output.table.default_countries();
    }

    if countries.is_empty() {
        return Err(ApiError::BadRequest(
            "Select at least one country with ?countries=a,b".to_string(),
        ));
    }

    Ok(Json(output.compare(&countries)))
}
