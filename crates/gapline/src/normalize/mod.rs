//! Cell normalization and table preprocessing.

mod numeric;
mod preprocess;

pub use numeric::{normalize_cell, parse_numeric};
pub use preprocess::{
    DropReason, DroppedRow, NormalizedRow, NormalizedWideTable, PreprocessReport, Preprocessor,
};
