//! API request handlers.

mod compare;
mod overview;
mod rankings;
mod summary;

pub use compare::*;
pub use overview::*;
pub use rankings::*;
pub use summary::*;

use gapline::PipelineOutput;
use gapline::query::DEFAULT_YEAR;

/// The requested year, or the available year nearest the default.
///
/// An empty table falls back to the default so views render empty.
fn resolve_year(output: &PipelineOutput, year: Option<i32>) -> i32 {
    year.or_else(|| output.table.closest_year(DEFAULT_YEAR))
        .unwrap_or(DEFAULT_YEAR)
}
