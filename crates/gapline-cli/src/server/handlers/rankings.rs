//! GDP per capita ranking handler.

use axum::{
    Json,
    extract::{Query, State},
};
use serde::Deserialize;

use gapline::Rankings;
use gapline::query::DEFAULT_RANK_LIMIT;

use super::resolve_year;
use crate::server::error::ApiError;
use crate::server::state::AppState;

/// Largest accepted `limit`.
const MAX_RANK_LIMIT: usize = 500;

/// Query parameters for the rankings endpoint.
#[derive(Debug, Deserialize)]
pub struct RankQuery {
    pub year: Option<i32>,
    pub limit: Option<usize>,
}

/// Get the top and bottom of one year's ranking.
pub async fn get_rankings(
    State(state): State<AppState>,
    Query(query): Query<RankQuery>,
) -> Result<Json<Rankings>, ApiError> {
    let limit = query.limit.unwrap_or(DEFAULT_RANK_LIMIT);
    if limit == 0 || limit > MAX_RANK_LIMIT {
        return Err(ApiError::BadRequest(format!(
            "limit must be between 1 and {}",
            MAX_RANK_LIMIT
        )));
    }

    let output = state.output().await?;
    let year = resolve_year(&output, query.year);
    Ok(Json(output.rankings(year, limit)))
}
