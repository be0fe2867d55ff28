//! Read-side views over the unified table.

mod catalogue;
mod compare;
mod cross_section;
mod export;
mod ranking;

pub use catalogue::{DEFAULT_COUNTRIES, DEFAULT_YEAR};
pub use compare::{Comparison, CountrySeries, SeriesPoint};
pub use cross_section::CrossSection;
pub use export::{export_file_name, to_csv_string, write_delimited, write_delimited_file};
pub use ranking::{DEFAULT_RANK_LIMIT, RankedRow, Rankings};
