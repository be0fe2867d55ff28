//! Gapline: the data core of a GDP, life expectancy and population dashboard.
//!
//! Three wide tables (one row per country, one column per year) are cleaned,
//! reshaped to long format and inner-joined into a single country-year table
//! that the dashboard views query.
//!
//! # Stages
//!
//! - **Normalize**: strings like `"$1,200"`, `"3.5k"` or `"1.2B"` become numbers
//! - **Preprocess**: rows with any missing or unparseable cell are dropped
//! - **Reshape**: each wide table melts to `(country, year, value)` facts
//! - **Join**: only country-years present in all three sources survive
//!
//! # Example
//!
//! ```no_run
//! use gapline::{DatasetPaths, Pipeline};
//!
//! let output = Pipeline::new().run(&DatasetPaths::from_dir("data")).unwrap();
//!
//! println!("Rows: {}", output.table.len());
//! for row in output.cross_section(2000).rows {
//!     println!("{} {:.0} {:.1}", row.country, row.gdp_per_cap, row.life_exp);
//! }
//! ```

pub mod config;
pub mod error;
pub mod input;
pub mod join;
pub mod normalize;
pub mod query;
pub mod reshape;
pub mod schema;

mod cache;
mod pipeline;

pub use cache::PipelineCache;
pub use config::{DatasetPaths, GaplineConfig};
pub use error::{GaplineError, Result};
pub use input::{RawWideTable, SourceMetadata};
pub use join::{JoinReport, UnifiedRow, UnifiedTable};
pub use normalize::{normalize_cell, parse_numeric};
pub use pipeline::{DatasetReport, Pipeline, PipelineConfig, PipelineOutput, PipelineSummary};
pub use query::{Comparison, CrossSection, Rankings};
pub use reshape::{FactRow, Metric};
pub use schema::{DuplicatePolicy, SchemaWarning};
