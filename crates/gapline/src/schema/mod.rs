//! Structural checks on wide tables: header layout and duplicate identifiers.

mod duplicates;
mod wide;

pub use duplicates::{DuplicatePolicy, SchemaWarning, check_duplicates};
pub use wide::{DEFAULT_ID_COLUMN, WideSchema, YearColumn};
